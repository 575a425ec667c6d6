//! Settable value cells owned by tree items.

use super::path::ScenePath;
use super::tree_item::TreeItem;
use super::value::{Value, ValueKind};
use crate::error::SceneError;
use crate::signal::Signal;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Shared handle to a [`Parameter`]
pub type ParameterRef = Rc<Parameter>;

/// A named value cell with a value-changed notification.
///
/// Every successful write notifies subscribers, including writes of a value
/// equal to the current one.
pub struct Parameter {
    name: String,
    kind: ValueKind,
    value: RefCell<Value>,
    owner: RefCell<Weak<TreeItem>>,
    value_changed: Signal<Value>,
}

impl Parameter {
    /// Create a free-standing parameter. The initial value fixes its kind.
    pub fn new(name: impl Into<String>, value: impl Into<Value>) -> ParameterRef {
        let value = value.into();
        Rc::new(Self {
            name: name.into(),
            kind: value.kind(),
            value: RefCell::new(value),
            owner: RefCell::new(Weak::new()),
            value_changed: Signal::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The kind every value of this parameter must have
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// A copy of the current value
    pub fn value(&self) -> Value {
        self.value.borrow().clone()
    }

    /// Write a new value and notify subscribers
    pub fn set_value(&self, value: Value) -> Result<(), SceneError> {
        value.check_kind(&self.name, self.kind)?;
        self.replace(value);
        Ok(())
    }

    /// Write a value already known to be of the right kind
    pub(crate) fn replace(&self, value: Value) {
        *self.value.borrow_mut() = value.clone();
        self.value_changed.emit(&value);
    }

    /// Notified with the new value after every write
    pub fn value_changed(&self) -> &Signal<Value> {
        &self.value_changed
    }

    /// The item this parameter belongs to, if any
    pub fn owner(&self) -> Option<Rc<TreeItem>> {
        self.owner.borrow().upgrade()
    }

    pub(crate) fn set_owner(&self, owner: Weak<TreeItem>) {
        *self.owner.borrow_mut() = owner;
    }

    /// Address of this parameter: the owner's path followed by its name
    pub fn path(&self) -> ScenePath {
        match self.owner() {
            Some(owner) => owner.path().join(self.name.clone()),
            None => ScenePath::new([self.name.clone()]),
        }
    }
}

impl std::fmt::Debug for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parameter")
            .field("name", &self.name)
            .field("value", &*self.value.borrow())
            .finish()
    }
}
