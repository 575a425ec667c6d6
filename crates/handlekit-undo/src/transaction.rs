//! Open-transaction tokens.
//!
//! A producer that wants to keep updating a change after adding it (a
//! handle during a drag, a creation tool between clicks) holds a
//! [`Transaction`] instead of the change itself. The token addresses the
//! top of the manager's undo stack for as long as it is open; committing or
//! cancelling consumes it.

use crate::change::ChangeUpdate;
use crate::error::{TransactionError, UndoResult};
use crate::manager::UndoRedoManager;
use uuid::Uuid;

/// Identity of one transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId(Uuid);

impl TransactionId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tx({})", &self.0.to_string()[..8])
    }
}

/// Handle on the change a producer is still editing.
///
/// While a transaction is open the manager refuses `add_change`, `undo`,
/// `redo` and `begin_transaction`. `cancel` and `clear` close it, after
/// which every method on the token reports [`TransactionError::NotOpen`].
#[derive(Debug)]
#[must_use = "an open transaction blocks undo and redo until committed or cancelled"]
pub struct Transaction {
    id: TransactionId,
}

impl Transaction {
    pub(crate) fn new(id: TransactionId) -> Self {
        Self { id }
    }

    pub fn id(&self) -> TransactionId {
        self.id
    }

    /// Whether `manager` still considers this transaction open
    pub fn is_open(&self, manager: &UndoRedoManager) -> bool {
        manager.is_current(self.id)
    }

    /// Apply a new forward state to the change
    pub fn update(&self, manager: &mut UndoRedoManager, update: ChangeUpdate) -> UndoResult<()> {
        manager.update_transaction(self.id, update)
    }

    /// Freeze the change; it stays on the undo stack
    pub fn commit(self, manager: &mut UndoRedoManager) -> Result<(), TransactionError> {
        manager.commit_transaction(self.id)
    }

    /// Revert and discard the change
    pub fn cancel(self, manager: &mut UndoRedoManager) -> Result<(), TransactionError> {
        manager.cancel_transaction(self.id)
    }
}
