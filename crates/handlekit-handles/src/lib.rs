//! # HandleKit Handles
//!
//! Interactive producers of undoable changes.
//!
//! Handles turn a drag (start, any number of updates, end) into one
//! transaction on the [`UndoRedoManager`](handlekit_undo::UndoRedoManager):
//! the change is begun on drag start, updated live while dragging and
//! committed on release, or cancelled when the drag did nothing. Tools do the
//! same for multi-click creation and for VR controllers holding items, and
//! add measurements as single changes.

pub mod drag;
pub mod error;
pub mod handles;
pub mod selection;
pub mod tools;

pub use drag::{DragEvent, DragSession, DragState, DragTarget};
pub use error::{HandleError, HandleResult, ToolError, ToolResult};
pub use handles::{
    AxialRotationHandle, Handle, HandleBase, LinearMovementHandle, LinearScaleHandle,
    PlanarMovementHandle, ScreenSpaceMovementHandle, SphericalRotationHandle, GLOBAL_XFO_PARAM,
};
pub use selection::SelectionGroup;
pub use tools::{
    compute_grab_xfo, radial_feature, ControllerId, ControllerPose, CreateGeomTool, CreateStage,
    HoldObjectsTool, MeasureRadiusTool, PointerButton, PointerEvent, PointerSource, PoseEvent,
    Propagation, Tool, ToolManager, SURFACE_TYPE_PARAM,
};
