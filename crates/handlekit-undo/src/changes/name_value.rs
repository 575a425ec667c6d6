//! Rename of a tree item.

use crate::change::{Change, ChangeUpdate};
use crate::error::{ChangeError, ChangeResult};
use crate::record::{ChangeContext, ChangeRecord};
use crate::snapshot::{ItemName, Snapshot};
use handlekit_core::TreeItemRef;

pub const NAME_VALUE_CHANGE: &str = "NameValueChange";

/// Records an item's name before and after a rename.
#[derive(Debug, Default)]
pub struct NameValueChange {
    name: String,
    snapshot: Option<Snapshot<ItemName>>,
    done: bool,
}

impl NameValueChange {
    /// Capture the item's name and, if given, rename it
    pub fn new(item: TreeItemRef, new_name: Option<String>) -> ChangeResult<Self> {
        let name = format!("{} Name Changed", item.name());
        let mut snapshot = Snapshot::capture(ItemName(item));
        if let Some(new_name) = new_name {
            snapshot.apply(new_name)?;
        }
        Ok(Self {
            name,
            snapshot: Some(snapshot),
            done: true,
        })
    }

    pub fn inert() -> Self {
        Self::default()
    }

    pub fn item(&self) -> Option<&TreeItemRef> {
        self.snapshot.as_ref().map(|s| &s.target().0)
    }
}

impl Change for NameValueChange {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &str {
        NAME_VALUE_CHANGE
    }

    fn is_done(&self) -> bool {
        self.done
    }

    fn set_done(&mut self, done: bool) {
        self.done = done;
    }

    fn is_inert(&self) -> bool {
        self.snapshot.is_none()
    }

    fn revert(&mut self) {
        if let Some(snapshot) = &self.snapshot {
            snapshot.restore();
        }
    }

    fn reapply(&mut self) {
        if let Some(snapshot) = &self.snapshot {
            snapshot.reapply();
        }
    }

    fn update(&mut self, update: &ChangeUpdate) -> ChangeResult<()> {
        let ChangeUpdate::Name(new_name) = update else {
            return Err(ChangeError::UnsupportedUpdate {
                change: NAME_VALUE_CHANGE.to_string(),
                update: update.kind_name(),
            });
        };
        match &mut self.snapshot {
            Some(snapshot) => Ok(snapshot.apply(new_name.clone())?),
            None => Ok(()),
        }
    }

    fn to_record(&self) -> ChangeResult<ChangeRecord> {
        let snapshot = self.snapshot.as_ref().ok_or_else(|| ChangeError::Inert {
            type_name: NAME_VALUE_CHANGE.to_string(),
        })?;
        ChangeRecord::new(NAME_VALUE_CHANGE, &self.name)
            .with("itemPath", snapshot.path())?
            .with("value", snapshot.next())
    }

    fn from_record(&mut self, record: &ChangeRecord, context: &ChangeContext) -> ChangeResult<()> {
        record.expect_type(NAME_VALUE_CHANGE)?;
        let path = record.path("itemPath")?;
        let new_name: String = record.get("value")?;
        self.name = record.name.clone();

        let item = match context.root.resolve_item(&path) {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!("Loaded '{}' is inert: {}", self.name, e);
                return Ok(());
            }
        };

        let mut snapshot = Snapshot::capture(ItemName(item));
        snapshot.apply(new_name)?;
        self.snapshot = Some(snapshot);
        self.done = true;
        Ok(())
    }
}
