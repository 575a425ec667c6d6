//! # HandleKit
//!
//! Interactive 3D manipulation handles backed by a reversible, serializable
//! undo/redo transaction system.
//!
//! ## Architecture
//!
//! HandleKit is organized as a workspace with multiple crates:
//!
//! 1. **handlekit-core** - Scene tree, parameters, transforms, signals
//! 2. **handlekit-undo** - Changes, the undo/redo manager, the change registry, history files
//! 3. **handlekit-handles** - Drag handles, selection groups, creation, hold and measure tools
//! 4. **handlekit-settings** - Configuration file handling
//! 5. **handlekit** - Demo session and the command line binary

pub mod demo;

pub use handlekit_core::{
    Color, DQuat, DVec3, Parameter, ParameterRef, SceneError, ScenePath, TreeItem, TreeItemRef,
    Value, ValueKind, Xfo,
};

pub use handlekit_undo::{
    Change, ChangeContext, ChangeError, ChangeRecord, ChangeRegistry, ChangeSummary, ChangeUpdate,
    CreateGeomChange, GeomKind, GeomShape, HistoryFile, HoldObjectsChange, Measurement,
    MeasurementChange, NameValueChange, ParameterValueChange, RestoreReport, SelectionXfoChange,
    Transaction, TransactionError, UndoError, UndoRedoManager,
};

pub use handlekit_handles::{
    AxialRotationHandle, CreateGeomTool, DragEvent, Handle, HandleError, HoldObjectsTool,
    LinearMovementHandle, LinearScaleHandle, MeasureRadiusTool, PlanarMovementHandle,
    ScreenSpaceMovementHandle, SelectionGroup, SphericalRotationHandle, Tool, ToolError,
    ToolManager,
};

pub use handlekit_settings::{Config, SettingsError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output with pretty formatting
/// - RUST_LOG environment variable support
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true)
        .pretty();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
