//! Transform of a whole selection about a shared pivot.

use crate::change::{Change, ChangeUpdate};
use crate::error::{ChangeError, ChangeResult};
use crate::record::{ChangeContext, ChangeRecord};
use crate::snapshot::XfoSnapshot;
use handlekit_core::{ScenePath, TreeItemRef, Xfo};

pub const SELECTION_XFO_CHANGE: &str = "SelectionXfoChange";

/// Moves every selected item by one delta expressed in the pivot's frame.
///
/// Each item's new global transform is `pivot * delta * pivot⁻¹ * prev`,
/// always computed from the transforms captured at construction so that
/// repeated updates never accumulate.
#[derive(Debug)]
pub struct SelectionXfoChange {
    name: String,
    entries: Vec<XfoSnapshot>,
    pivot: Xfo,
    delta: Xfo,
    done: bool,
    inert: bool,
}

impl Default for SelectionXfoChange {
    fn default() -> Self {
        Self {
            name: String::new(),
            entries: Vec::new(),
            pivot: Xfo::IDENTITY,
            delta: Xfo::IDENTITY,
            done: false,
            inert: true,
        }
    }
}

impl SelectionXfoChange {
    /// Capture the items' global transforms. Nothing moves until the first update.
    pub fn new(items: Vec<TreeItemRef>, pivot: Xfo) -> Self {
        Self {
            name: "Selection Xfo Change".to_string(),
            entries: items
                .into_iter()
                .map(XfoSnapshot::capture)
                .collect(),
            pivot,
            delta: Xfo::IDENTITY,
            done: true,
            inert: false,
        }
    }

    pub fn inert() -> Self {
        Self::default()
    }

    pub fn items(&self) -> impl Iterator<Item = &TreeItemRef> {
        self.entries.iter().map(XfoSnapshot::item)
    }

    pub fn pivot(&self) -> Xfo {
        self.pivot
    }

    pub fn delta(&self) -> Xfo {
        self.delta
    }

    fn set_delta(&mut self, delta: Xfo) {
        let frame = self.pivot.multiply(&delta).multiply(&self.pivot.inverse());
        for entry in &mut self.entries {
            let new_xfo = frame.multiply(entry.prev());
            entry.apply(new_xfo);
        }
        self.delta = delta;
    }
}

impl Change for SelectionXfoChange {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        SELECTION_XFO_CHANGE
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    fn is_inert(&self) -> bool {
        self.inert
    }

    fn revert(&mut self) {
        for entry in &self.entries {
            entry.restore();
        }
    }

    fn reapply(&mut self) {
        for entry in &self.entries {
            entry.reapply();
        }
    }

    fn update(&mut self, update: &ChangeUpdate) -> ChangeResult<()> {
        match update {
            ChangeUpdate::Delta(delta) => {
                self.set_delta(*delta);
                Ok(())
            }
            other => Err(ChangeError::UnsupportedUpdate {
                change: SELECTION_XFO_CHANGE.to_string(),
                update: other.kind_name(),
            }),
        }
    }

    fn to_record(&self) -> ChangeResult<ChangeRecord> {
        if self.inert {
            return Err(ChangeError::Inert {
                type_name: SELECTION_XFO_CHANGE.to_string(),
            });
        }
        let paths: Vec<&ScenePath> = self.entries.iter().map(XfoSnapshot::path).collect();
        ChangeRecord::new(SELECTION_XFO_CHANGE, &self.name)
            .with("itemPaths", paths)?
            .with("pivotXfo", self.pivot)?
            .with("deltaXfo", self.delta)
    }

    fn from_record(&mut self, record: &ChangeRecord, context: &ChangeContext) -> ChangeResult<()> {
        record.expect_type(SELECTION_XFO_CHANGE)?;
        let paths: Vec<ScenePath> = record.get("itemPaths")?;
        let pivot: Xfo = record.get("pivotXfo")?;
        let delta: Xfo = record.get("deltaXfo")?;
        self.name = record.name.clone();

        let mut items = Vec::with_capacity(paths.len());
        for path in &paths {
            match context.root.resolve_item(path) {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!("Loaded '{}' is inert: {}", self.name, e);
                    return Ok(());
                }
            }
        }

        let name = std::mem::take(&mut self.name);
        *self = Self::new(items, pivot);
        self.name = name;
        self.set_delta(delta);
        Ok(())
    }
}
