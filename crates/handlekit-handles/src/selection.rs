//! The set of items a handle moves together.

use handlekit_core::{DVec3, TreeItemRef, Xfo};
use std::rc::Rc;

/// Ordered, duplicate-free set of selected tree items.
///
/// Handles given a group write a [`SelectionXfoChange`] instead of a
/// parameter change, so every item moves about one pivot and undoes as one.
///
/// [`SelectionXfoChange`]: handlekit_undo::SelectionXfoChange
#[derive(Debug, Clone, Default)]
pub struct SelectionGroup {
    items: Vec<TreeItemRef>,
}

impl SelectionGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: impl IntoIterator<Item = TreeItemRef>) -> Self {
        let mut group = Self::new();
        for item in items {
            group.add_item(item);
        }
        group
    }

    pub fn items(&self) -> &[TreeItemRef] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &TreeItemRef) -> bool {
        self.items.iter().any(|i| Rc::ptr_eq(i, item))
    }

    /// Returns false if the item was already selected
    pub fn add_item(&mut self, item: TreeItemRef) -> bool {
        if self.contains(&item) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn remove_item(&mut self, item: &TreeItemRef) -> bool {
        let before = self.items.len();
        self.items.retain(|i| !Rc::ptr_eq(i, item));
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Transform a handle attached to this group sits at: the mean of the
    /// items' positions, oriented like the first item, unit scale.
    pub fn pivot_xfo(&self) -> Xfo {
        let Some(first) = self.items.first() else {
            return Xfo::IDENTITY;
        };
        let sum: DVec3 = self.items.iter().map(|i| i.global_xfo().tr).sum();
        Xfo::new(
            sum / self.items.len() as f64,
            first.global_xfo().ori,
            DVec3::ONE,
        )
    }
}
