//! Uniform scale driven along the handle's Z axis.

use super::{Handle, HandleBase};
use crate::drag::DragEvent;
use crate::error::{HandleError, HandleResult};
use handlekit_core::{DVec3, Xfo};
use handlekit_settings::HandleSettings;
use handlekit_undo::UndoRedoManager;

#[derive(Debug, Clone, Copy)]
struct ScaleDrag {
    pivot: Xfo,
    grab_dist: f64,
    scale: Option<f64>,
}

/// Scales its target uniformly by `hold_dist / grab_dist`, both measured
/// from the handle centre along its Z axis.
///
/// Ratios below the configured minimum (including a flipped or collapsed
/// drag) are ignored and leave the last applied scale in place.
#[derive(Debug)]
pub struct LinearScaleHandle {
    base: HandleBase,
    min_scale: f64,
    drag: Option<ScaleDrag>,
}

impl LinearScaleHandle {
    pub fn new(name: impl Into<String>, settings: &HandleSettings) -> Self {
        Self {
            base: HandleBase::new(name),
            min_scale: settings.min_scale,
            drag: None,
        }
    }

    pub fn min_scale(&self) -> f64 {
        self.min_scale
    }

    /// Last scale factor applied by the current drag
    pub fn scale(&self) -> Option<f64> {
        self.drag.and_then(|d| d.scale)
    }
}

impl Handle for LinearScaleHandle {
    fn base(&self) -> &HandleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut HandleBase {
        &mut self.base
    }

    fn on_drag_start(&mut self, manager: &mut UndoRedoManager, event: &DragEvent) -> HandleResult<()> {
        let pivot = self.base.begin_drag(manager)?;
        let axis = pivot.z_axis().normalize_or_zero();
        self.drag = Some(ScaleDrag {
            pivot,
            grab_dist: (event.pos - pivot.tr).dot(axis),
            scale: None,
        });
        Ok(())
    }

    fn on_drag(&mut self, manager: &mut UndoRedoManager, event: &DragEvent) -> HandleResult<()> {
        let drag = self.drag.ok_or(HandleError::NotDragging)?;
        let axis = drag.pivot.z_axis().normalize_or_zero();
        let hold_dist = (event.pos - drag.pivot.tr).dot(axis);
        let sc = hold_dist / drag.grab_dist;
        if !(sc.is_finite() && sc >= self.min_scale) {
            tracing::trace!("Scale {} skipped", sc);
            return Ok(());
        }

        self.base.update_drag(manager, Xfo::from_scale(DVec3::splat(sc)))?;
        if let Some(drag) = &mut self.drag {
            drag.scale = Some(sc);
        }
        Ok(())
    }

    fn on_drag_end(&mut self, manager: &mut UndoRedoManager, _event: &DragEvent) -> HandleResult<()> {
        let drag = self.drag.take().ok_or(HandleError::NotDragging)?;
        let unchanged = drag.scale.is_none_or(|sc| sc == 1.0);
        self.base.end_drag(manager, unchanged)
    }
}
