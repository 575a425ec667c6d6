//! Manipulation handles.
//!
//! Every handle follows the same protocol: `on_drag_start` opens one
//! transaction, `on_drag` updates it any number of times, `on_drag_end`
//! commits it, or cancels it when the drag produced no change.

mod axial_rotation;
mod base;
mod linear_movement;
mod linear_scale;
mod planar_movement;
mod screen_space_movement;
mod spherical_rotation;

pub use axial_rotation::AxialRotationHandle;
pub use base::{HandleBase, GLOBAL_XFO_PARAM};
pub use linear_movement::LinearMovementHandle;
pub use linear_scale::LinearScaleHandle;
pub use planar_movement::PlanarMovementHandle;
pub use screen_space_movement::ScreenSpaceMovementHandle;
pub use spherical_rotation::SphericalRotationHandle;

use crate::drag::{DragEvent, DragState};
use crate::error::HandleResult;
use handlekit_undo::UndoRedoManager;

/// A drag-driven producer of one undoable change per drag
pub trait Handle {
    fn base(&self) -> &HandleBase;

    fn base_mut(&mut self) -> &mut HandleBase;

    fn on_drag_start(&mut self, manager: &mut UndoRedoManager, event: &DragEvent)
        -> HandleResult<()>;

    fn on_drag(&mut self, manager: &mut UndoRedoManager, event: &DragEvent) -> HandleResult<()>;

    fn on_drag_end(&mut self, manager: &mut UndoRedoManager, event: &DragEvent)
        -> HandleResult<()>;

    fn name(&self) -> &str {
        self.base().name()
    }

    fn drag_state(&self) -> DragState {
        self.base().drag_state()
    }
}
