//! Drag state shared by every handle.
//!
//! A drag owns exactly one open [`Transaction`] between its start and its
//! end. Events that arrive out of order are rejected before anything on the
//! undo stack is touched.

use crate::error::{HandleError, HandleResult};
use handlekit_core::{DVec3, Xfo};
use handlekit_undo::{Change, ChangeUpdate, Transaction, UndoRedoManager};

/// Whether a handle is between drag start and drag end
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// A pointer position delivered to a handle.
///
/// `pos` is the grab point on drag start and the hold point afterwards,
/// already projected by the host onto whatever surface the handle drags on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragEvent {
    pub pos: DVec3,
    pub shift_key: bool,
}

impl DragEvent {
    pub fn at(pos: DVec3) -> Self {
        Self {
            pos,
            shift_key: false,
        }
    }

    pub fn with_shift(mut self) -> Self {
        self.shift_key = true;
        self
    }
}

/// What the open change writes to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragTarget {
    /// A transform parameter, with its value at drag start
    Parameter { start: Xfo },
    /// Every item of a selection group
    Selection,
}

#[derive(Debug)]
struct ActiveDrag {
    transaction: Transaction,
    pivot: Xfo,
    target: DragTarget,
}

/// The open transaction of one drag
#[derive(Debug, Default)]
pub struct DragSession {
    active: Option<ActiveDrag>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        match self.active {
            Some(_) => DragState::Dragging,
            None => DragState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    /// Fail unless idle. Call before building the change.
    pub fn ensure_idle(&self) -> HandleResult<()> {
        match self.active {
            Some(_) => Err(HandleError::AlreadyDragging),
            None => Ok(()),
        }
    }

    /// Hand `change` to the manager and keep its transaction open
    pub fn begin(
        &mut self,
        manager: &mut UndoRedoManager,
        change: Box<dyn Change>,
        pivot: Xfo,
        target: DragTarget,
    ) -> HandleResult<()> {
        self.ensure_idle()?;
        let transaction = manager.begin_transaction(change)?;
        tracing::debug!("Drag started ({})", transaction.id());
        self.active = Some(ActiveDrag {
            transaction,
            pivot,
            target,
        });
        Ok(())
    }

    /// Pivot captured on drag start
    pub fn pivot(&self) -> HandleResult<Xfo> {
        self.active
            .as_ref()
            .map(|a| a.pivot)
            .ok_or(HandleError::NotDragging)
    }

    pub fn target(&self) -> HandleResult<DragTarget> {
        self.active
            .as_ref()
            .map(|a| a.target)
            .ok_or(HandleError::NotDragging)
    }

    pub fn update(&self, manager: &mut UndoRedoManager, update: ChangeUpdate) -> HandleResult<()> {
        let active = self.active.as_ref().ok_or(HandleError::NotDragging)?;
        active.transaction.update(manager, update)?;
        Ok(())
    }

    /// Commit the change, or cancel it when the drag did nothing
    pub fn finish(&mut self, manager: &mut UndoRedoManager, degenerate: bool) -> HandleResult<()> {
        let active = self.active.take().ok_or(HandleError::NotDragging)?;
        let id = active.transaction.id();
        if degenerate {
            active.transaction.cancel(manager)?;
            tracing::debug!("Drag cancelled ({})", id);
        } else {
            active.transaction.commit(manager)?;
            tracing::debug!("Drag committed ({})", id);
        }
        Ok(())
    }
}
