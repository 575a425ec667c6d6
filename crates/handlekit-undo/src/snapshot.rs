//! Before/after capture of a single settable value.
//!
//! Every value-style change is built from [`Snapshot`]s: the value before
//! the change is captured once and never touched again, the latest forward
//! value follows each update. The target's path is captured alongside the
//! value, so a record addresses the target as it was named when the change
//! was made and replaying records in order resolves each one.

use handlekit_core::{ParameterRef, SceneError, ScenePath, TreeItemRef, Value, Xfo};

/// Something a change can read, write and address by path.
pub trait ValueTarget {
    type Value: Clone + PartialEq + std::fmt::Debug;

    fn get(&self) -> Self::Value;

    fn set(&self, value: Self::Value) -> Result<(), SceneError>;

    /// Path used when the change is serialized
    fn path(&self) -> ScenePath;
}

impl ValueTarget for ParameterRef {
    type Value = Value;

    fn get(&self) -> Value {
        self.value()
    }

    fn set(&self, value: Value) -> Result<(), SceneError> {
        self.set_value(value)
    }

    fn path(&self) -> ScenePath {
        handlekit_core::Parameter::path(self)
    }
}

/// The name of a tree item
#[derive(Debug, Clone)]
pub struct ItemName(pub TreeItemRef);

impl ValueTarget for ItemName {
    type Value = String;

    fn get(&self) -> String {
        self.0.name()
    }

    fn set(&self, value: String) -> Result<(), SceneError> {
        self.0.set_name(value);
        Ok(())
    }

    fn path(&self) -> ScenePath {
        self.0.path()
    }
}

/// A target with its captured previous value and latest forward value
#[derive(Debug, Clone)]
pub struct Snapshot<T: ValueTarget> {
    target: T,
    path: ScenePath,
    prev: T::Value,
    next: T::Value,
}

impl<T: ValueTarget> Snapshot<T> {
    /// Capture the live value as both previous and forward state
    pub fn capture(target: T) -> Self {
        let prev = target.get();
        Self {
            path: target.path(),
            next: prev.clone(),
            prev,
            target,
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Path of the target at capture time
    pub fn path(&self) -> &ScenePath {
        &self.path
    }

    pub fn prev(&self) -> &T::Value {
        &self.prev
    }

    pub fn next(&self) -> &T::Value {
        &self.next
    }

    /// Write a new forward value
    pub fn apply(&mut self, value: T::Value) -> Result<(), SceneError> {
        self.target.set(value.clone())?;
        self.next = value;
        Ok(())
    }

    /// Write the captured previous value back
    pub fn restore(&self) {
        self.write(self.prev.clone());
    }

    /// Write the latest forward value again
    pub fn reapply(&self) {
        self.write(self.next.clone());
    }

    // Values come from the target itself, so the kind always matches.
    fn write(&self, value: T::Value) {
        if let Err(e) = self.target.set(value) {
            tracing::warn!("Failed to write {}: {}", self.path, e);
        }
    }
}

/// Transform capture of a tree item.
///
/// Updates are expressed as global transforms, but undo and redo write the
/// local transforms seen before and after, so the item lands on exactly the
/// values it had under any parent.
#[derive(Debug, Clone)]
pub struct XfoSnapshot {
    item: TreeItemRef,
    path: ScenePath,
    prev: Xfo,
    prev_local: Xfo,
    next: Xfo,
    next_local: Xfo,
}

impl XfoSnapshot {
    pub fn capture(item: TreeItemRef) -> Self {
        let prev = item.global_xfo();
        let prev_local = item.local_xfo();
        Self {
            path: item.path(),
            prev,
            prev_local,
            next: prev,
            next_local: prev_local,
            item,
        }
    }

    pub fn item(&self) -> &TreeItemRef {
        &self.item
    }

    /// Path of the item at capture time
    pub fn path(&self) -> &ScenePath {
        &self.path
    }

    /// Global transform at capture time
    pub fn prev(&self) -> &Xfo {
        &self.prev
    }

    /// Latest global transform written
    pub fn next(&self) -> &Xfo {
        &self.next
    }

    pub fn prev_local(&self) -> Xfo {
        self.prev_local
    }

    /// Move the item to a new global transform
    pub fn apply(&mut self, xfo: Xfo) {
        self.item.set_global_xfo(xfo);
        self.next = xfo;
        self.next_local = self.item.local_xfo();
    }

    pub fn restore(&self) {
        self.item.set_local_xfo(self.prev_local);
    }

    pub fn reapply(&self) {
        self.item.set_local_xfo(self.next_local);
    }
}
