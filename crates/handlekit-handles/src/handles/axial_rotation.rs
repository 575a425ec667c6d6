//! Rotation about the handle's Z axis.

use super::{Handle, HandleBase};
use crate::drag::DragEvent;
use crate::error::{HandleError, HandleResult};
use handlekit_core::{DQuat, DVec3, Xfo};
use handlekit_settings::HandleSettings;
use handlekit_undo::UndoRedoManager;

#[derive(Debug, Clone, Copy)]
struct AxialDrag {
    pivot: Xfo,
    vec0: DVec3,
    angle: f64,
}

/// Rotates its target about the Z axis of the handle.
///
/// The angle is the one swept from the grab point to the hold point around
/// the handle centre, signed by the rotation axis. It can be clamped to a
/// range and, while shift is held, snaps down to a fixed increment.
#[derive(Debug)]
pub struct AxialRotationHandle {
    base: HandleBase,
    range: Option<[f64; 2]>,
    snap_increment: f64,
    drag: Option<AxialDrag>,
}

impl AxialRotationHandle {
    pub fn new(name: impl Into<String>, settings: &HandleSettings) -> Self {
        Self {
            base: HandleBase::new(name),
            range: settings.rotation_range(),
            snap_increment: settings.snap_increment(),
            drag: None,
        }
    }

    /// Clamp angles to `[min, max]` radians
    pub fn set_range(&mut self, range: Option<[f64; 2]>) {
        self.range = range;
    }

    pub fn range(&self) -> Option<[f64; 2]> {
        self.range
    }

    /// Snap increment in radians
    pub fn snap_increment(&self) -> f64 {
        self.snap_increment
    }

    /// Angle of the current drag, zero when idle
    pub fn angle(&self) -> f64 {
        self.drag.map_or(0.0, |d| d.angle)
    }

    fn signed_angle(&self, vec0: DVec3, vec1: DVec3, axis: DVec3, snap: bool) -> f64 {
        if vec0 == DVec3::ZERO || vec1 == DVec3::ZERO {
            return 0.0;
        }
        let mut angle = vec0.angle_between(vec1);
        if vec0.cross(vec1).dot(axis) < 0.0 {
            angle = -angle;
        }
        if let Some([min, max]) = self.range {
            angle = angle.clamp(min, max);
        }
        if snap && self.snap_increment > 0.0 {
            angle = (angle / self.snap_increment).floor() * self.snap_increment;
        }
        angle
    }
}

impl Handle for AxialRotationHandle {
    fn base(&self) -> &HandleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut HandleBase {
        &mut self.base
    }

    fn on_drag_start(&mut self, manager: &mut UndoRedoManager, event: &DragEvent) -> HandleResult<()> {
        let pivot = self.base.begin_drag(manager)?;
        self.drag = Some(AxialDrag {
            pivot,
            vec0: (event.pos - pivot.tr).normalize_or_zero(),
            angle: 0.0,
        });
        Ok(())
    }

    fn on_drag(&mut self, manager: &mut UndoRedoManager, event: &DragEvent) -> HandleResult<()> {
        let drag = self.drag.ok_or(HandleError::NotDragging)?;
        let vec1 = (event.pos - drag.pivot.tr).normalize_or_zero();
        let angle = self.signed_angle(drag.vec0, vec1, drag.pivot.z_axis(), event.shift_key);

        let delta = Xfo::from_rotation(DQuat::from_axis_angle(DVec3::Z, angle));
        self.base.update_drag(manager, delta)?;
        if let Some(drag) = &mut self.drag {
            drag.angle = angle;
        }
        Ok(())
    }

    fn on_drag_end(&mut self, manager: &mut UndoRedoManager, _event: &DragEvent) -> HandleResult<()> {
        let drag = self.drag.take().ok_or(HandleError::NotDragging)?;
        self.base.end_drag(manager, drag.angle == 0.0)
    }
}
