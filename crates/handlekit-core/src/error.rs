//! Error handling for HandleKit core
//!
//! Provides error types for the host scene model:
//! - Scene errors (path resolution, tree structure, parameter typing)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Scene error type
///
/// Represents errors raised by the host scene model when a path cannot be
/// resolved, a tree edit is structurally invalid, or a value of the wrong
/// kind is written into a parameter.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    /// A path did not resolve against the scene root
    #[error("Unable to resolve path: {path}")]
    PathNotFound {
        /// The path that failed to resolve.
        path: String,
    },

    /// The path resolved to an item where a parameter was expected, or vice versa
    #[error("Path {path} resolved to a {found}, expected a {expected}")]
    WrongNodeKind {
        /// The resolved path.
        path: String,
        /// The node kind that was expected.
        expected: String,
        /// The node kind that was found.
        found: String,
    },

    /// A parameter was written with a value of another kind
    #[error("Type mismatch for parameter '{name}': expected {expected}, got {actual}")]
    TypeMismatch {
        /// The parameter name.
        name: String,
        /// The kind the parameter holds.
        expected: String,
        /// The kind that was supplied.
        actual: String,
    },

    /// A named parameter does not exist on an item
    #[error("Parameter '{name}' not found on '{item}'")]
    ParameterNotFound {
        /// The item name.
        item: String,
        /// The missing parameter name.
        name: String,
    },

    /// Child index is outside the parent's child list
    #[error("Child index {index} out of range (children: {count})")]
    ChildIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The current child count.
        count: usize,
    },

    /// The item is already attached to a parent
    #[error("Item '{name}' already has a parent")]
    AlreadyParented {
        /// The item name.
        name: String,
    },

    /// The item is not a child of the given parent
    #[error("Item '{name}' is not a child of '{parent}'")]
    NotAChild {
        /// The item name.
        name: String,
        /// The parent name.
        parent: String,
    },
}
