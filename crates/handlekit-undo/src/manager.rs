//! Undo/redo stacks of changes for one editing session.

use crate::change::{Change, ChangeSummary, ChangeUpdate, ChangeUpdated};
use crate::error::{ChangeResult, TransactionError, UndoResult};
use crate::transaction::{Transaction, TransactionId};
use handlekit_core::Signal;

/// Default number of changes kept on the undo stack
pub const DEFAULT_MAX_DEPTH: usize = 100;

/// Owns the history of one editing session.
///
/// Changes are applied by their producers before they are added; the
/// manager only moves them between the stacks, flipping them as it goes.
/// Notifications are emitted after the stacks have been updated.
pub struct UndoRedoManager {
    undo_stack: Vec<Box<dyn Change>>,
    redo_stack: Vec<Box<dyn Change>>,
    max_depth: usize,
    open: Option<TransactionId>,
    change_added: Signal<ChangeSummary>,
    change_updated: Signal<ChangeUpdated>,
    change_undone: Signal<ChangeSummary>,
    change_redone: Signal<ChangeSummary>,
    change_cancelled: Signal<ChangeSummary>,
}

impl UndoRedoManager {
    /// Create a new manager with default depth (100)
    pub fn new() -> Self {
        Self::with_depth(DEFAULT_MAX_DEPTH)
    }

    /// Create with custom maximum undo depth; 0 keeps every change
    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_depth,
            open: None,
            change_added: Signal::new(),
            change_updated: Signal::new(),
            change_undone: Signal::new(),
            change_redone: Signal::new(),
            change_cancelled: Signal::new(),
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Change the depth limit, evicting the oldest changes if needed
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth;
        self.evict();
    }

    /// Push an applied change. The redo stack is discarded.
    ///
    /// While a transaction is open the change is reverted and rejected.
    pub fn add_change(&mut self, change: Box<dyn Change>) -> Result<(), TransactionError> {
        let change = self.admit(change, "add a change")?;
        self.push(change);
        Ok(())
    }

    /// Push an applied change and open a transaction on it.
    ///
    /// Fails like [`add_change`](Self::add_change) while another transaction is open.
    pub fn begin_transaction(&mut self, change: Box<dyn Change>) -> Result<Transaction, TransactionError> {
        let change = self.admit(change, "begin a transaction")?;
        self.push(change);
        let id = TransactionId::new();
        tracing::debug!("Opened transaction {}", id);
        self.open = Some(id);
        Ok(Transaction::new(id))
    }

    /// Update the most recent change in place.
    ///
    /// Returns `Ok(false)` when there is nothing to update.
    pub fn update_change(&mut self, update: ChangeUpdate) -> ChangeResult<bool> {
        let Some(change) = self.undo_stack.last_mut() else {
            return Ok(false);
        };
        change.update(&update)?;
        let payload = ChangeUpdated {
            change: change.summary(),
            update,
        };
        self.change_updated.emit(&payload);
        Ok(true)
    }

    /// Revert the most recent change and move it to the redo stack.
    ///
    /// Returns `Ok(false)` when the undo stack is empty.
    pub fn undo(&mut self) -> Result<bool, TransactionError> {
        self.ensure_closed("undo")?;
        let Some(mut change) = self.undo_stack.pop() else {
            return Ok(false);
        };
        change.undo();
        let summary = change.summary();
        tracing::debug!("Undid {}", summary);
        self.redo_stack.push(change);
        self.change_undone.emit(&summary);
        Ok(true)
    }

    /// Reapply the most recently undone change.
    ///
    /// Returns `Ok(false)` when the redo stack is empty.
    pub fn redo(&mut self) -> Result<bool, TransactionError> {
        self.ensure_closed("redo")?;
        let Some(mut change) = self.redo_stack.pop() else {
            return Ok(false);
        };
        change.redo();
        let summary = change.summary();
        tracing::debug!("Redid {}", summary);
        self.undo_stack.push(change);
        self.change_redone.emit(&summary);
        Ok(true)
    }

    /// Revert and discard the most recent change without making it redoable.
    ///
    /// Closes the open transaction, which always targets that change.
    /// Returns `false` when the undo stack is empty.
    pub fn cancel(&mut self) -> bool {
        let Some(mut change) = self.undo_stack.pop() else {
            return false;
        };
        if let Some(id) = self.open.take() {
            tracing::debug!("Transaction {} closed by cancel", id);
        }
        change.undo();
        let summary = change.summary();
        tracing::debug!("Cancelled {}", summary);
        self.change_cancelled.emit(&summary);
        true
    }

    /// Drop all history and close any open transaction
    pub fn clear(&mut self) {
        tracing::debug!(
            "Clearing history ({} undo, {} redo)",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open = None;
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Get number of undo operations available
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get number of redo operations available
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn is_transaction_open(&self) -> bool {
        self.open.is_some()
    }

    /// The most recent change, if any
    pub fn top(&self) -> Option<&dyn Change> {
        self.undo_stack.last().map(|c| c.as_ref())
    }

    /// Undo stack summaries, oldest first
    pub fn history(&self) -> Vec<ChangeSummary> {
        self.undo_stack.iter().map(|c| c.summary()).collect()
    }

    /// Redo stack summaries, next to redo last
    pub fn redo_history(&self) -> Vec<ChangeSummary> {
        self.redo_stack.iter().map(|c| c.summary()).collect()
    }

    /// Changes on the undo stack, oldest first
    pub fn changes(&self) -> impl Iterator<Item = &dyn Change> {
        self.undo_stack.iter().map(|c| c.as_ref())
    }

    pub fn change_added(&self) -> &Signal<ChangeSummary> {
        &self.change_added
    }

    pub fn change_updated(&self) -> &Signal<ChangeUpdated> {
        &self.change_updated
    }

    pub fn change_undone(&self) -> &Signal<ChangeSummary> {
        &self.change_undone
    }

    pub fn change_redone(&self) -> &Signal<ChangeSummary> {
        &self.change_redone
    }

    pub fn change_cancelled(&self) -> &Signal<ChangeSummary> {
        &self.change_cancelled
    }

    pub(crate) fn update_transaction(&mut self, id: TransactionId, update: ChangeUpdate) -> UndoResult<()> {
        self.ensure_current(id)?;
        self.update_change(update)?;
        Ok(())
    }

    pub(crate) fn commit_transaction(&mut self, id: TransactionId) -> Result<(), TransactionError> {
        self.ensure_current(id)?;
        self.open = None;
        tracing::debug!("Committed transaction {}", id);
        Ok(())
    }

    pub(crate) fn cancel_transaction(&mut self, id: TransactionId) -> Result<(), TransactionError> {
        self.ensure_current(id)?;
        self.cancel();
        Ok(())
    }

    pub(crate) fn is_current(&self, id: TransactionId) -> bool {
        self.open == Some(id)
    }

    fn push(&mut self, change: Box<dyn Change>) {
        let summary = change.summary();
        if !self.redo_stack.is_empty() {
            tracing::debug!("Discarding {} redoable changes", self.redo_stack.len());
            self.redo_stack.clear();
        }
        self.undo_stack.push(change);
        self.evict();
        tracing::debug!("Added {}", summary);
        self.change_added.emit(&summary);
    }

    fn evict(&mut self) {
        if self.max_depth == 0 || self.undo_stack.len() <= self.max_depth {
            return;
        }
        let excess = self.undo_stack.len() - self.max_depth;
        for change in self.undo_stack.drain(..excess) {
            tracing::debug!("Evicted {}", change.summary());
        }
    }

    fn admit(
        &self,
        mut change: Box<dyn Change>,
        operation: &'static str,
    ) -> Result<Box<dyn Change>, TransactionError> {
        if let Err(e) = self.ensure_closed(operation) {
            tracing::warn!("Reverting {}: {}", change.summary(), e);
            change.undo();
            return Err(e);
        }
        Ok(change)
    }

    fn ensure_closed(&self, operation: &'static str) -> Result<(), TransactionError> {
        if self.open.is_none() {
            return Ok(());
        }
        Err(TransactionError::TransactionOpen {
            operation,
            name: self.top().map(|c| c.name().to_string()).unwrap_or_default(),
        })
    }

    fn ensure_current(&self, id: TransactionId) -> Result<(), TransactionError> {
        if self.is_current(id) {
            Ok(())
        } else {
            Err(TransactionError::NotOpen { id: id.to_string() })
        }
    }
}

impl Default for UndoRedoManager {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for UndoRedoManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoRedoManager")
            .field("undo", &self.undo_stack.len())
            .field("redo", &self.redo_stack.len())
            .field("max_depth", &self.max_depth)
            .field("open", &self.open)
            .finish()
    }
}
