//! Translation along the handle's Z axis.

use super::base::local_translation;
use super::{Handle, HandleBase};
use crate::drag::DragEvent;
use crate::error::{HandleError, HandleResult};
use handlekit_core::{DVec3, Xfo};
use handlekit_undo::UndoRedoManager;

#[derive(Debug, Clone, Copy)]
struct LinearDrag {
    pivot: Xfo,
    grab_pos: DVec3,
    dist: f64,
}

/// Moves its target along the Z axis of the handle by the component of the
/// drag vector along that axis.
#[derive(Debug)]
pub struct LinearMovementHandle {
    base: HandleBase,
    drag: Option<LinearDrag>,
}

impl LinearMovementHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: HandleBase::new(name),
            drag: None,
        }
    }

    /// Distance moved by the current drag
    pub fn distance(&self) -> f64 {
        self.drag.map_or(0.0, |d| d.dist)
    }
}

impl Handle for LinearMovementHandle {
    fn base(&self) -> &HandleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut HandleBase {
        &mut self.base
    }

    fn on_drag_start(&mut self, manager: &mut UndoRedoManager, event: &DragEvent) -> HandleResult<()> {
        let pivot = self.base.begin_drag(manager)?;
        self.drag = Some(LinearDrag {
            pivot,
            grab_pos: event.pos,
            dist: 0.0,
        });
        Ok(())
    }

    fn on_drag(&mut self, manager: &mut UndoRedoManager, event: &DragEvent) -> HandleResult<()> {
        let drag = self.drag.ok_or(HandleError::NotDragging)?;
        let axis = drag.pivot.z_axis().normalize_or_zero();
        let dist = (event.pos - drag.grab_pos).dot(axis);

        let delta = local_translation(&drag.pivot, axis * dist);
        self.base.update_drag(manager, delta)?;
        if let Some(drag) = &mut self.drag {
            drag.dist = dist;
        }
        Ok(())
    }

    fn on_drag_end(&mut self, manager: &mut UndoRedoManager, _event: &DragEvent) -> HandleResult<()> {
        let drag = self.drag.take().ok_or(HandleError::NotDragging)?;
        self.base.end_drag(manager, drag.dist == 0.0)
    }
}
