//! Error types for handles and tools.

use handlekit_core::ValueKind;
use handlekit_undo::{ChangeError, TransactionError, UndoError};
use thiserror::Error;

/// Errors raised by the drag protocol.
#[derive(Error, Debug)]
pub enum HandleError {
    /// A drag update or end arrived without a drag start.
    #[error("No drag in progress")]
    NotDragging,

    /// A drag start arrived while a drag was already in progress.
    #[error("A drag is already in progress")]
    AlreadyDragging,

    /// The target parameter does not hold a transform.
    #[error("Target parameter '{name}' holds a {found}, expected an xfo")]
    TargetNotXfo { name: String, found: ValueKind },

    #[error(transparent)]
    Change(#[from] ChangeError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Undo(#[from] UndoError),
}

/// Errors raised by tools and the tool manager.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Tool not found: {name}")]
    ToolNotFound { name: String },

    #[error("Tool stack is empty")]
    StackEmpty,

    /// `create_start` while a primitive is still being placed.
    #[error("Already creating a {kind}")]
    AlreadyCreating { kind: String },

    #[error(transparent)]
    Change(#[from] ChangeError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Undo(#[from] UndoError),
}

/// Result type for handle operations
pub type HandleResult<T> = Result<T, HandleError>;

/// Result type for tool operations
pub type ToolResult<T> = Result<T, ToolError>;
