//! Scene tree nodes.
//!
//! Items own their children and parameters; parents and parameter owners
//! are weak back-references so dropping the root releases the whole tree.

use super::parameter::{Parameter, ParameterRef};
use super::path::ScenePath;
use super::value::Value;
use crate::error::SceneError;
use crate::math::Xfo;
use crate::signal::Signal;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Name of the parameter every item carries for its local transform
pub const LOCAL_XFO_PARAM: &str = "LocalXfo";

/// Shared handle to a [`TreeItem`]
pub type TreeItemRef = Rc<TreeItem>;

/// Payload of the child-added / child-removed signals
#[derive(Debug, Clone, PartialEq)]
pub struct ChildEvent {
    /// Position of the child in the parent's list
    pub index: usize,
    /// Name of the child at the time of the event
    pub child_name: String,
}

/// The result of resolving a [`ScenePath`]
#[derive(Debug, Clone)]
pub enum SceneNode {
    Item(TreeItemRef),
    Parameter(ParameterRef),
}

/// A named node in the scene tree.
pub struct TreeItem {
    name: RefCell<String>,
    this: Weak<TreeItem>,
    parent: RefCell<Weak<TreeItem>>,
    children: RefCell<Vec<TreeItemRef>>,
    parameters: RefCell<Vec<ParameterRef>>,
    local_xfo: ParameterRef,
    name_changed: Signal<String>,
    child_added: Signal<ChildEvent>,
    child_removed: Signal<ChildEvent>,
}

impl TreeItem {
    /// Create a detached item with an identity `LocalXfo`
    pub fn new(name: impl Into<String>) -> TreeItemRef {
        let local_xfo = Parameter::new(LOCAL_XFO_PARAM, Xfo::IDENTITY);
        let item = Rc::new_cyclic(|this: &Weak<TreeItem>| {
            local_xfo.set_owner(this.clone());
            TreeItem {
                name: RefCell::new(name.into()),
                this: this.clone(),
                parent: RefCell::new(Weak::new()),
                children: RefCell::new(Vec::new()),
                parameters: RefCell::new(vec![local_xfo.clone()]),
                local_xfo,
                name_changed: Signal::new(),
                child_added: Signal::new(),
                child_removed: Signal::new(),
            }
        });
        item
    }

    pub fn name(&self) -> String {
        self.name.borrow().clone()
    }

    /// Rename the item and notify subscribers
    pub fn set_name(&self, name: impl Into<String>) {
        let name = name.into();
        *self.name.borrow_mut() = name.clone();
        self.name_changed.emit(&name);
    }

    pub fn parent(&self) -> Option<TreeItemRef> {
        self.parent.borrow().upgrade()
    }

    /// A snapshot of the children in order
    pub fn children(&self) -> Vec<TreeItemRef> {
        self.children.borrow().clone()
    }

    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn child(&self, index: usize) -> Option<TreeItemRef> {
        self.children.borrow().get(index).cloned()
    }

    /// The first child with the given name
    pub fn child_by_name(&self, name: &str) -> Option<TreeItemRef> {
        self.children
            .borrow()
            .iter()
            .find(|child| *child.name.borrow() == name)
            .cloned()
    }

    /// Position of `child` in this item's child list
    pub fn child_index(&self, child: &TreeItemRef) -> Option<usize> {
        self.children
            .borrow()
            .iter()
            .position(|c| Rc::ptr_eq(c, child))
    }

    /// Append a child, returning its index
    pub fn add_child(&self, child: TreeItemRef) -> Result<usize, SceneError> {
        let index = self.child_count();
        self.insert_child(index, child)?;
        Ok(index)
    }

    /// Insert a child at `index` (which may equal the child count)
    pub fn insert_child(&self, index: usize, child: TreeItemRef) -> Result<(), SceneError> {
        if child.parent().is_some() {
            return Err(SceneError::AlreadyParented { name: child.name() });
        }
        let count = self.child_count();
        if index > count {
            return Err(SceneError::ChildIndexOutOfRange { index, count });
        }

        *child.parent.borrow_mut() = self.this.clone();
        let child_name = child.name();
        self.children.borrow_mut().insert(index, child);
        tracing::trace!("Inserted '{}' under '{}' at {}", child_name, self.name(), index);
        self.child_added.emit(&ChildEvent { index, child_name });
        Ok(())
    }

    /// Detach and return the child at `index`
    pub fn remove_child(&self, index: usize) -> Result<TreeItemRef, SceneError> {
        let count = self.child_count();
        if index >= count {
            return Err(SceneError::ChildIndexOutOfRange { index, count });
        }

        let child = self.children.borrow_mut().remove(index);
        *child.parent.borrow_mut() = Weak::new();
        self.child_removed.emit(&ChildEvent {
            index,
            child_name: child.name(),
        });
        Ok(child)
    }

    /// Detach a specific child, returning the index it occupied
    pub fn remove_child_item(&self, child: &TreeItemRef) -> Result<usize, SceneError> {
        let index = self.child_index(child).ok_or_else(|| SceneError::NotAChild {
            name: child.name(),
            parent: self.name(),
        })?;
        self.remove_child(index)?;
        Ok(index)
    }

    /// `base` if no child uses it, otherwise `base` followed by the first free counter
    pub fn generate_unique_name(&self, base: &str) -> String {
        if self.child_by_name(base).is_none() {
            return base.to_string();
        }
        let mut counter = 1;
        loop {
            let candidate = format!("{}{}", base, counter);
            if self.child_by_name(&candidate).is_none() {
                return candidate;
            }
            counter += 1;
        }
    }

    /// Attach a parameter to this item
    pub fn add_parameter(&self, param: ParameterRef) -> ParameterRef {
        param.set_owner(self.this.clone());
        self.parameters.borrow_mut().push(param.clone());
        param
    }

    pub fn parameter(&self, name: &str) -> Option<ParameterRef> {
        self.parameters
            .borrow()
            .iter()
            .find(|p| p.name() == name)
            .cloned()
    }

    /// Like [`parameter`](Self::parameter) but reports a missing parameter as an error
    pub fn require_parameter(&self, name: &str) -> Result<ParameterRef, SceneError> {
        self.parameter(name)
            .ok_or_else(|| SceneError::ParameterNotFound {
                item: self.name(),
                name: name.to_string(),
            })
    }

    pub fn parameters(&self) -> Vec<ParameterRef> {
        self.parameters.borrow().clone()
    }

    /// The `LocalXfo` parameter
    pub fn local_xfo_param(&self) -> ParameterRef {
        self.local_xfo.clone()
    }

    pub fn local_xfo(&self) -> Xfo {
        self.local_xfo.value().as_xfo().unwrap_or_default()
    }

    pub fn set_local_xfo(&self, xfo: Xfo) {
        self.local_xfo.replace(Value::Xfo(xfo));
    }

    /// Transform of this item in the root's frame
    pub fn global_xfo(&self) -> Xfo {
        let local = self.local_xfo();
        match self.parent() {
            Some(parent) => parent.global_xfo().multiply(&local),
            None => local,
        }
    }

    /// Set the local transform so the item ends up at `xfo` in the root's frame
    pub fn set_global_xfo(&self, xfo: Xfo) {
        let local = match self.parent() {
            Some(parent) => parent.global_xfo().inverse().multiply(&xfo),
            None => xfo,
        };
        self.set_local_xfo(local);
    }

    /// Names from the root down to this item
    pub fn path(&self) -> ScenePath {
        let mut names = vec![self.name()];
        let mut current = self.parent();
        while let Some(item) = current {
            names.push(item.name());
            current = item.parent();
        }
        names.reverse();
        ScenePath::new(names)
    }

    /// Resolve `path` relative to this item, which must be its first segment
    pub fn resolve_path(&self, path: &ScenePath) -> Option<SceneNode> {
        let segments = path.segments();
        let (first, rest) = segments.split_first()?;
        if *first != self.name() {
            return None;
        }

        let mut current = self.this.upgrade()?;
        for (i, segment) in rest.iter().enumerate() {
            if let Some(child) = current.child_by_name(segment) {
                current = child;
            } else if i == rest.len() - 1 {
                return current.parameter(segment).map(SceneNode::Parameter);
            } else {
                return None;
            }
        }
        Some(SceneNode::Item(current))
    }

    /// Resolve `path` to an item
    pub fn resolve_item(&self, path: &ScenePath) -> Result<TreeItemRef, SceneError> {
        match self.resolve_path(path) {
            Some(SceneNode::Item(item)) => Ok(item),
            Some(SceneNode::Parameter(_)) => Err(SceneError::WrongNodeKind {
                path: path.to_string(),
                expected: "item".to_string(),
                found: "parameter".to_string(),
            }),
            None => Err(SceneError::PathNotFound {
                path: path.to_string(),
            }),
        }
    }

    /// Resolve `path` to a parameter
    pub fn resolve_parameter(&self, path: &ScenePath) -> Result<ParameterRef, SceneError> {
        match self.resolve_path(path) {
            Some(SceneNode::Parameter(param)) => Ok(param),
            Some(SceneNode::Item(_)) => Err(SceneError::WrongNodeKind {
                path: path.to_string(),
                expected: "parameter".to_string(),
                found: "item".to_string(),
            }),
            None => Err(SceneError::PathNotFound {
                path: path.to_string(),
            }),
        }
    }

    /// Notified with the new name after every rename
    pub fn name_changed(&self) -> &Signal<String> {
        &self.name_changed
    }

    pub fn child_added(&self) -> &Signal<ChildEvent> {
        &self.child_added
    }

    pub fn child_removed(&self) -> &Signal<ChildEvent> {
        &self.child_removed
    }
}

impl std::fmt::Debug for TreeItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeItem")
            .field("name", &*self.name.borrow())
            .field("children", &self.child_count())
            .field("parameters", &self.parameters.borrow().len())
            .finish()
    }
}
