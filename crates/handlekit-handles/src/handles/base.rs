//! State every handle carries: its own transform, its target and the
//! drag session.

use crate::drag::{DragSession, DragState, DragTarget};
use crate::error::{HandleError, HandleResult};
use crate::selection::SelectionGroup;
use handlekit_core::{DVec3, Parameter, ParameterRef, Shared, SubscriptionId, Value, ValueKind, Xfo};
use handlekit_undo::{ChangeUpdate, ParameterValueChange, SelectionXfoChange, UndoRedoManager};
use std::rc::Rc;

/// Name of the parameter holding a handle's own global transform
pub const GLOBAL_XFO_PARAM: &str = "GlobalXfo";

/// The frame a delta is expressed in: `pivot * delta * pivot⁻¹`
pub(crate) fn about_pivot(pivot: &Xfo, delta: &Xfo) -> Xfo {
    pivot.multiply(delta).multiply(&pivot.inverse())
}

/// A world-space translation expressed in the pivot's frame
pub(crate) fn local_translation(pivot: &Xfo, world: DVec3) -> Xfo {
    Xfo::from_translation(pivot.ori.inverse() * world / pivot.sc)
}

/// Shared handle state.
///
/// A handle drives either a transform parameter (its own `GlobalXfo` unless
/// a target is set) or, when given a selection group, every item of the
/// group. Handles express each drag update as a delta in the frame of the
/// pivot captured at drag start; both kinds of target apply it the same way.
#[derive(Debug)]
pub struct HandleBase {
    name: String,
    xfo: ParameterRef,
    target: Option<ParameterRef>,
    tracking: Option<SubscriptionId>,
    selection: Option<Shared<SelectionGroup>>,
    /// Handle transform when the current drag started
    drag_start: Xfo,
    session: DragSession,
}

impl HandleBase {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            xfo: Parameter::new(GLOBAL_XFO_PARAM, Xfo::IDENTITY),
            target: None,
            tracking: None,
            selection: None,
            drag_start: Xfo::IDENTITY,
            session: DragSession::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The handle's own transform parameter
    pub fn xfo_param(&self) -> &ParameterRef {
        &self.xfo
    }

    pub fn xfo(&self) -> Xfo {
        self.xfo.value().as_xfo().unwrap_or(Xfo::IDENTITY)
    }

    pub fn set_xfo(&self, xfo: Xfo) {
        if let Err(e) = self.xfo.set_value(Value::Xfo(xfo)) {
            tracing::warn!("Handle '{}' could not move: {}", self.name, e);
        }
    }

    /// Drive `param` instead of the handle's own transform.
    ///
    /// With `track` the handle snaps to the parameter's value now and
    /// follows every later change of it.
    pub fn set_target_param(&mut self, param: ParameterRef, track: bool) -> HandleResult<()> {
        if param.kind() != ValueKind::Xfo {
            return Err(HandleError::TargetNotXfo {
                name: param.name().to_string(),
                found: param.kind(),
            });
        }
        self.untrack();
        if track && !Rc::ptr_eq(&param, &self.xfo) {
            if let Some(xfo) = param.value().as_xfo() {
                self.set_xfo(xfo);
            }
            let own = self.xfo.clone();
            let id = param.value_changed().subscribe(move |value| {
                if let Err(e) = own.set_value(value.clone()) {
                    tracing::warn!("Handle tracking failed: {}", e);
                }
            });
            self.tracking = Some(id);
        }
        self.target = Some(param);
        Ok(())
    }

    /// The parameter a drag writes when no selection group is set
    pub fn target_param(&self) -> ParameterRef {
        self.target.clone().unwrap_or_else(|| self.xfo.clone())
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking.is_some()
    }

    /// Move a whole selection instead of the target parameter.
    ///
    /// The handle jumps to the group's pivot.
    pub fn set_selection_group(&mut self, group: Option<Shared<SelectionGroup>>) {
        self.selection = group;
        self.snap_to_selection();
    }

    /// Move the handle onto its group's pivot, keeping the handle's scale.
    ///
    /// Handles do not observe the undo manager: hosts call this after an
    /// undo or redo that moved the group.
    pub fn snap_to_selection(&self) {
        if let Some(group) = &self.selection {
            let mut xfo = group.borrow().pivot_xfo();
            xfo.sc = self.xfo().sc;
            self.set_xfo(xfo);
        }
    }

    pub fn selection_group(&self) -> Option<&Shared<SelectionGroup>> {
        self.selection.as_ref()
    }

    pub fn drag_state(&self) -> DragState {
        self.session.state()
    }

    pub fn session(&self) -> &DragSession {
        &self.session
    }

    /// Open the drag's change and return the pivot (the handle's transform
    /// without scale).
    pub fn begin_drag(&mut self, manager: &mut UndoRedoManager) -> HandleResult<Xfo> {
        self.session.ensure_idle()?;
        self.drag_start = self.xfo();
        let mut pivot = self.drag_start;
        pivot.sc = DVec3::ONE;

        let items = self
            .selection
            .as_ref()
            .map(|group| group.borrow().items().to_vec())
            .filter(|items| !items.is_empty());

        match items {
            Some(items) => {
                let change = SelectionXfoChange::new(items, pivot);
                self.session
                    .begin(manager, Box::new(change), pivot, DragTarget::Selection)?;
            }
            None => {
                let param = self.target_param();
                let start = param.value().as_xfo().ok_or_else(|| HandleError::TargetNotXfo {
                    name: param.name().to_string(),
                    found: param.kind(),
                })?;
                let change = ParameterValueChange::new(param, None)?;
                self.session.begin(
                    manager,
                    Box::new(change),
                    pivot,
                    DragTarget::Parameter { start },
                )?;
            }
        }
        Ok(pivot)
    }

    /// Apply `delta`, expressed in the pivot's frame, to the drag target
    pub fn update_drag(&self, manager: &mut UndoRedoManager, delta: Xfo) -> HandleResult<()> {
        let pivot = self.session.pivot()?;
        match self.session.target()? {
            DragTarget::Parameter { start } => {
                let value = about_pivot(&pivot, &delta).multiply(&start);
                self.session
                    .update(manager, ChangeUpdate::Value(Value::Xfo(value)))?;
            }
            DragTarget::Selection => {
                self.session.update(manager, ChangeUpdate::Delta(delta))?;
                self.set_xfo(about_pivot(&pivot, &delta).multiply(&self.drag_start));
            }
        }
        Ok(())
    }

    pub fn end_drag(&mut self, manager: &mut UndoRedoManager, degenerate: bool) -> HandleResult<()> {
        self.session.finish(manager, degenerate)
    }

    fn untrack(&mut self) {
        if let (Some(id), Some(target)) = (self.tracking.take(), &self.target) {
            target.value_changed().unsubscribe(id);
        }
    }
}

impl Drop for HandleBase {
    fn drop(&mut self) {
        self.untrack();
    }
}
