//! Tools receive pointer and controller events from the host through a
//! [`ToolManager`] and turn them into undoable changes.

mod create_geom_tool;
mod event;
mod hold_objects_tool;
mod measure_radius_tool;
mod tool_manager;

pub use create_geom_tool::{CreateGeomTool, CreateStage};
pub use event::{
    ControllerId, ControllerPose, PointerButton, PointerEvent, PointerSource, PoseEvent,
    Propagation,
};
pub use hold_objects_tool::{compute_grab_xfo, HoldObjectsTool};
pub use measure_radius_tool::{radial_feature, MeasureRadiusTool, SURFACE_TYPE_PARAM};
pub use tool_manager::ToolManager;

use crate::error::ToolResult;
use handlekit_undo::UndoRedoManager;

/// An event consumer on the tool stack.
///
/// Every callback defaults to ignoring the event. A tool that handles an
/// event calls `stop_propagation` on it so tools lower on the stack do not
/// see it.
pub trait Tool {
    /// Called when the tool is pushed onto the stack
    fn activate(&mut self) {}

    /// Called when the tool is popped. Work in progress should be closed
    /// here so the manager is not left with an open transaction.
    fn deactivate(&mut self, _manager: &mut UndoRedoManager) -> ToolResult<()> {
        Ok(())
    }

    fn on_pointer_down(
        &mut self,
        _manager: &mut UndoRedoManager,
        _event: &mut PointerEvent,
    ) -> ToolResult<()> {
        Ok(())
    }

    fn on_pointer_move(
        &mut self,
        _manager: &mut UndoRedoManager,
        _event: &mut PointerEvent,
    ) -> ToolResult<()> {
        Ok(())
    }

    fn on_pointer_up(
        &mut self,
        _manager: &mut UndoRedoManager,
        _event: &mut PointerEvent,
    ) -> ToolResult<()> {
        Ok(())
    }

    /// New controller poses, once per frame in VR
    fn on_pose_changed(
        &mut self,
        _manager: &mut UndoRedoManager,
        _event: &mut PoseEvent,
    ) -> ToolResult<()> {
        Ok(())
    }
}
