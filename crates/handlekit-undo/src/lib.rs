//! # HandleKit Undo
//!
//! Reversible, serializable changes and the per-session undo/redo manager.
//!
//! Producers construct a change (which applies it), hand it to the
//! [`UndoRedoManager`] and, when they need to keep editing it, hold a
//! [`Transaction`] token until they commit or cancel. Changes serialize to
//! [`ChangeRecord`]s and are rebuilt through a [`ChangeRegistry`].

pub mod change;
pub mod changes;
pub mod error;
pub mod manager;
pub mod persistence;
pub mod record;
pub mod registry;
pub mod snapshot;
pub mod transaction;

pub use change::{Change, ChangeSummary, ChangeUpdate, ChangeUpdated};
pub use changes::{
    CreateGeomChange, GeomKind, GeomShape, HoldObjectsChange, Measurement, MeasurementChange,
    NameValueChange, ParameterValueChange, SelectionXfoChange, COLOR_PARAM, CURVE_TYPE_PARAM,
};
pub use error::{
    ChangeError, ChangeResult, PersistenceError, TransactionError, UndoError, UndoResult,
};
pub use manager::{UndoRedoManager, DEFAULT_MAX_DEPTH};
pub use persistence::{HistoryFile, RestoreReport, HISTORY_VERSION};
pub use record::{ChangeContext, ChangeRecord};
pub use registry::{ChangeFactory, ChangeKind, ChangeRegistry};
pub use snapshot::{ItemName, Snapshot, ValueTarget, XfoSnapshot};
pub use transaction::{Transaction, TransactionId};
