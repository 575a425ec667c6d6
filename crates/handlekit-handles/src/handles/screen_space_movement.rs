//! Free translation in the view plane.

use super::base::local_translation;
use super::{Handle, HandleBase};
use crate::drag::DragEvent;
use crate::error::{HandleError, HandleResult};
use handlekit_core::{DVec3, Xfo};
use handlekit_undo::UndoRedoManager;

#[derive(Debug, Clone, Copy)]
struct ScreenDrag {
    pivot: Xfo,
    grab_pos: DVec3,
    offset: DVec3,
}

/// Moves its target by the raw drag vector.
///
/// The host intersects the pointer ray with a plane facing the camera
/// through the target, so the vector already lies in the view plane.
#[derive(Debug)]
pub struct ScreenSpaceMovementHandle {
    base: HandleBase,
    drag: Option<ScreenDrag>,
}

impl ScreenSpaceMovementHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            base: HandleBase::new(name),
            drag: None,
        }
    }

    pub fn offset(&self) -> DVec3 {
        self.drag.map_or(DVec3::ZERO, |d| d.offset)
    }
}

impl Handle for ScreenSpaceMovementHandle {
    fn base(&self) -> &HandleBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut HandleBase {
        &mut self.base
    }

    fn on_drag_start(&mut self, manager: &mut UndoRedoManager, event: &DragEvent) -> HandleResult<()> {
        let pivot = self.base.begin_drag(manager)?;
        self.drag = Some(ScreenDrag {
            pivot,
            grab_pos: event.pos,
            offset: DVec3::ZERO,
        });
        Ok(())
    }

    fn on_drag(&mut self, manager: &mut UndoRedoManager, event: &DragEvent) -> HandleResult<()> {
        let drag = self.drag.ok_or(HandleError::NotDragging)?;
        let offset = event.pos - drag.grab_pos;
        self.base
            .update_drag(manager, local_translation(&drag.pivot, offset))?;
        if let Some(drag) = &mut self.drag {
            drag.offset = offset;
        }
        Ok(())
    }

    fn on_drag_end(&mut self, manager: &mut UndoRedoManager, _event: &DragEvent) -> HandleResult<()> {
        let drag = self.drag.take().ok_or(HandleError::NotDragging)?;
        self.base.end_drag(manager, drag.offset == DVec3::ZERO)
    }
}
