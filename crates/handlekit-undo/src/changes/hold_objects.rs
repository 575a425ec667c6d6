//! Items moved by VR controllers while held.

use crate::change::{Change, ChangeUpdate};
use crate::error::{ChangeError, ChangeResult};
use crate::record::{ChangeContext, ChangeRecord};
use crate::snapshot::XfoSnapshot;
use handlekit_core::{ScenePath, TreeItemRef, Xfo};
use std::rc::Rc;

pub const HOLD_OBJECTS_CHANGE: &str = "HoldObjectsChange";

/// Global transforms of held items, addressed by slot.
///
/// Slots are assigned by the hold tool as items are grabbed and may be
/// sparse; empty slots are skipped by undo and redo.
#[derive(Debug, Default)]
pub struct HoldObjectsChange {
    name: String,
    slots: Vec<Option<XfoSnapshot>>,
    done: bool,
}

impl HoldObjectsChange {
    pub fn new() -> Self {
        Self {
            name: HOLD_OBJECTS_CHANGE.to_string(),
            slots: Vec::new(),
            done: true,
        }
    }

    pub fn inert() -> Self {
        Self::default()
    }

    /// Start a change already holding `item` in `index`
    pub fn with_item(index: usize, item: TreeItemRef) -> Self {
        let mut change = Self::new();
        change.hold(index, item);
        change
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// The item held in `index`, if any
    pub fn item(&self, index: usize) -> Option<&TreeItemRef> {
        self.slots
            .get(index)
            .and_then(Option::as_ref)
            .map(XfoSnapshot::item)
    }

    fn hold(&mut self, index: usize, item: TreeItemRef) {
        if self.slots.len() <= index {
            self.slots.resize_with(index + 1, || None);
        }
        let slot = &mut self.slots[index];
        // Re-grabbing keeps the transform captured at the first grab
        if slot.as_ref().is_some_and(|s| Rc::ptr_eq(s.item(), &item)) {
            return;
        }
        *slot = Some(XfoSnapshot::capture(item));
    }

    fn move_slots(&mut self, xfos: &[(usize, Xfo)]) {
        for (index, xfo) in xfos {
            match self.slots.get_mut(*index).and_then(Option::as_mut) {
                Some(slot) => slot.apply(*xfo),
                None => tracing::trace!("Skipping transform for empty slot {}", index),
            }
        }
    }
}

impl Change for HoldObjectsChange {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        HOLD_OBJECTS_CHANGE
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    fn is_inert(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    fn revert(&mut self) {
        for slot in self.slots.iter().flatten() {
            slot.restore();
        }
    }

    fn reapply(&mut self) {
        for slot in self.slots.iter().flatten() {
            slot.reapply();
        }
    }

    fn update(&mut self, update: &ChangeUpdate) -> ChangeResult<()> {
        match update {
            ChangeUpdate::HoldNewItem { index, item } => {
                self.hold(*index, item.clone());
                Ok(())
            }
            ChangeUpdate::HoldXfos(xfos) => {
                self.move_slots(xfos);
                Ok(())
            }
            other => Err(ChangeError::UnsupportedUpdate {
                change: HOLD_OBJECTS_CHANGE.to_string(),
                update: other.kind_name(),
            }),
        }
    }

    fn to_record(&self) -> ChangeResult<ChangeRecord> {
        if self.is_inert() {
            return Err(ChangeError::Inert {
                type_name: HOLD_OBJECTS_CHANGE.to_string(),
            });
        }
        let paths: Vec<Option<&ScenePath>> = self
            .slots
            .iter()
            .map(|s| s.as_ref().map(XfoSnapshot::path))
            .collect();
        let xfos: Vec<Option<Xfo>> = self
            .slots
            .iter()
            .map(|s| s.as_ref().map(|s| *s.next()))
            .collect();
        ChangeRecord::new(HOLD_OBJECTS_CHANGE, &self.name)
            .with("itemPaths", paths)?
            .with("xfos", xfos)
    }

    /// Slots whose path no longer resolves are left empty; the rest are
    /// moved to their recorded transforms.
    fn from_record(&mut self, record: &ChangeRecord, context: &ChangeContext) -> ChangeResult<()> {
        record.expect_type(HOLD_OBJECTS_CHANGE)?;
        let paths: Vec<Option<ScenePath>> = record.get("itemPaths")?;
        let xfos: Vec<Option<Xfo>> = record.get("xfos")?;
        self.name = record.name.clone();
        self.slots.clear();

        let mut moves = Vec::new();
        for (index, path) in paths.iter().enumerate() {
            let Some(path) = path else { continue };
            match context.root.resolve_item(path) {
                Ok(item) => {
                    self.hold(index, item);
                    if let Some(Some(xfo)) = xfos.get(index) {
                        moves.push((index, *xfo));
                    }
                }
                Err(e) => tracing::warn!("Slot {} of '{}' is empty: {}", index, self.name, e),
            }
        }

        if self.is_inert() {
            tracing::warn!("Loaded '{}' is inert: no held item resolved", self.name);
            return Ok(());
        }
        self.move_slots(&moves);
        self.done = true;
        Ok(())
    }
}
