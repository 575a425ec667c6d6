//! The change abstraction.
//!
//! A change is one reversible, serializable unit of scene mutation. It is
//! applied when constructed, may be updated in place while its transaction
//! is open, and afterwards only flips between done and undone.

use crate::changes::{GeomShape, Measurement};
use crate::error::ChangeResult;
use crate::record::{ChangeContext, ChangeRecord};
use handlekit_core::{TreeItemRef, Value, Xfo};
use serde::Serialize;

/// Payload of an in-place update to an open change.
#[derive(Debug, Clone)]
pub enum ChangeUpdate {
    /// New value for a parameter
    Value(Value),
    /// New item name
    Name(String),
    /// New delta transform for a group of items
    Delta(Xfo),
    /// New primitive dimensions for a created item
    Geometry(GeomShape),
    /// Start holding `item` in slot `index`
    HoldNewItem { index: usize, item: TreeItemRef },
    /// New global transforms for held slots
    HoldXfos(Vec<(usize, Xfo)>),
    /// New end points of a measurement
    Measure(Measurement),
}

impl ChangeUpdate {
    /// Short label used in logs and errors
    pub fn kind_name(&self) -> &'static str {
        match self {
            ChangeUpdate::Value(_) => "value",
            ChangeUpdate::Name(_) => "name",
            ChangeUpdate::Delta(_) => "delta",
            ChangeUpdate::Geometry(_) => "geometry",
            ChangeUpdate::HoldNewItem { .. } => "hold-new-item",
            ChangeUpdate::HoldXfos(_) => "hold-xfos",
            ChangeUpdate::Measure(_) => "measure",
        }
    }
}

/// A reversible unit of scene mutation.
///
/// Implementors provide [`revert`](Change::revert) and
/// [`reapply`](Change::reapply); the provided [`undo`](Change::undo) and
/// [`redo`](Change::redo) guard them with the done flag so a change is never
/// reverted or reapplied twice in a row.
pub trait Change {
    /// Human readable label
    fn name(&self) -> &str;

    /// Registered type name, written as the record's `type`
    fn type_name(&self) -> &str;

    /// Whether the forward effect is currently applied
    fn is_done(&self) -> bool;

    /// Set by the provided undo/redo after a successful flip
    fn set_done(&mut self, done: bool);

    /// A change whose target could not be resolved does nothing
    fn is_inert(&self) -> bool;

    /// Restore the state captured before the change was applied
    fn revert(&mut self);

    /// Apply the latest forward state again
    fn reapply(&mut self);

    /// Apply a new forward state while the change is open
    fn update(&mut self, update: &ChangeUpdate) -> ChangeResult<()>;

    /// Serialize the forward state
    fn to_record(&self) -> ChangeResult<ChangeRecord>;

    /// Resolve targets against `context` and apply the recorded forward state.
    ///
    /// An unresolvable target leaves the change inert and is not an error;
    /// malformed records are.
    fn from_record(&mut self, record: &ChangeRecord, context: &ChangeContext) -> ChangeResult<()>;

    fn undo(&mut self) {
        if !self.is_done() {
            tracing::warn!("Ignoring undo of '{}': already undone", self.name());
            return;
        }
        self.revert();
        self.set_done(false);
    }

    fn redo(&mut self) {
        if self.is_done() {
            tracing::warn!("Ignoring redo of '{}': already applied", self.name());
            return;
        }
        self.reapply();
        self.set_done(true);
    }

    fn summary(&self) -> ChangeSummary {
        ChangeSummary {
            name: self.name().to_string(),
            type_name: self.type_name().to_string(),
            done: self.is_done(),
        }
    }
}

impl std::fmt::Debug for dyn Change {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Change")
            .field("name", &self.name())
            .field("type", &self.type_name())
            .field("done", &self.is_done())
            .finish()
    }
}

/// Snapshot of a change's identity, carried by manager notifications
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeSummary {
    pub name: String,
    pub type_name: String,
    pub done: bool,
}

impl std::fmt::Display for ChangeSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.type_name)
    }
}

/// Payload of the change-updated notification
#[derive(Debug, Clone)]
pub struct ChangeUpdated {
    pub change: ChangeSummary,
    pub update: ChangeUpdate,
}
