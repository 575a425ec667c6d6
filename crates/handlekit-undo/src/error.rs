//! Error types for the undo crate.
//!
//! This module provides structured error types for change construction,
//! update and (de)serialization, transaction misuse, and history files.

use handlekit_core::SceneError;
use thiserror::Error;

/// Errors raised by an individual change.
#[derive(Error, Debug)]
pub enum ChangeError {
    /// The scene rejected a write or a structural edit.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// The change does not understand this kind of update.
    #[error("{change} does not accept {update} updates")]
    UnsupportedUpdate {
        change: String,
        update: &'static str,
    },

    /// A record is missing a field the change type needs.
    #[error("{type_name} record is missing field '{field}'")]
    MissingField { type_name: String, field: String },

    /// A record field could not be read or written.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A record names a change type that is not registered.
    #[error("Unknown change type: {type_name}")]
    UnknownType { type_name: String },

    /// A record was handed to a change of another type.
    #[error("Record type mismatch: expected {expected}, found {found}")]
    RecordTypeMismatch { expected: String, found: String },

    /// The change has no target and cannot be serialized.
    #[error("{type_name} has no resolved target")]
    Inert { type_name: String },
}

/// Errors raised when the transaction protocol is used out of order.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransactionError {
    /// A history operation was attempted while a transaction is open.
    #[error("Cannot {operation} while transaction '{name}' is open")]
    TransactionOpen {
        operation: &'static str,
        name: String,
    },

    /// The transaction was already committed, cancelled or cleared.
    #[error("Transaction {id} is not open")]
    NotOpen { id: String },
}

/// Errors raised while saving or loading a history file.
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file was written by an incompatible version.
    #[error("Unsupported history version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Umbrella error for the undo crate.
#[derive(Error, Debug)]
pub enum UndoError {
    #[error(transparent)]
    Change(#[from] ChangeError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Result type alias for change operations.
pub type ChangeResult<T> = Result<T, ChangeError>;

/// Result type alias for the undo crate.
pub type UndoResult<T> = Result<T, UndoError>;
