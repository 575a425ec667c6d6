//! Free rotation about the handle centre.

use super::{Handle, HandleBase};
use crate::drag::DragEvent;
use crate::error::{HandleError, HandleResult};
use handlekit_core::{DQuat, DVec3, Xfo};
use handlekit_undo::UndoRedoManager;

#[derive(Debug, Clone, Copy)]
struct SphericalDrag {
    pivot: Xfo,
    vec0: DVec3,
    angle: f64,
}

/// Rotates its target by the rotation taking the grab direction onto the
/// hold direction, both seen from the handle centre.
#[derive(Debug)]
pub struct SphericalRotationHandle {
    base: HandleBase,
    drag: Option<SphericalDrag>,
}

impl SphericalRotationHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: HandleBase::new(name),
            drag: None,
        }
    }

    pub fn angle(&self) -> f64 {
        self.drag.map_or(0.0, |d| d.angle)
    }
}

impl Handle for SphericalRotationHandle {
    fn base(&self) -> &HandleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut HandleBase {
        &mut self.base
    }

    fn on_drag_start(&mut self, manager: &mut UndoRedoManager, event: &DragEvent) -> HandleResult<()> {
        let pivot = self.base.begin_drag(manager)?;
        self.drag = Some(SphericalDrag {
            pivot,
            vec0: (event.pos - pivot.tr).normalize_or_zero(),
            angle: 0.0,
        });
        Ok(())
    }

    fn on_drag(&mut self, manager: &mut UndoRedoManager, event: &DragEvent) -> HandleResult<()> {
        let drag = self.drag.ok_or(HandleError::NotDragging)?;
        let vec1 = (event.pos - drag.pivot.tr).normalize_or_zero();
        // Parallel or undefined directions have no rotation axis
        let axis = drag.vec0.cross(vec1).normalize_or_zero();
        if axis == DVec3::ZERO {
            return Ok(());
        }
        let angle = drag.vec0.angle_between(vec1);

        let local_axis = drag.pivot.ori.inverse() * axis;
        let delta = Xfo::from_rotation(DQuat::from_axis_angle(local_axis, angle));
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
