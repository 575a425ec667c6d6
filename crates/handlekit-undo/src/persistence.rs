//! Saving and restoring a session's undo history.
//!
//! A history file is JSON:
//!
//! ```json
//! { "version": 1, "savedAt": "2026-01-01T00:00:00Z", "changes": [ ... ] }
//! ```
//!
//! Restoring replays every record in order against the live scene through a
//! [`ChangeRegistry`], so the scene ends up in the state it was saved in.

use crate::error::{ChangeResult, PersistenceError, UndoResult};
use crate::manager::UndoRedoManager;
use crate::record::{ChangeContext, ChangeRecord};
use crate::registry::ChangeRegistry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current history file format
pub const HISTORY_VERSION: u32 = 1;

/// Serialized undo stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryFile {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    pub changes: Vec<ChangeRecord>,
}

/// Outcome of [`HistoryFile::restore`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RestoreReport {
    /// Changes applied and pushed onto the undo stack
    pub applied: usize,
    /// Names of changes whose targets did not resolve
    pub inert: Vec<String>,
}

impl HistoryFile {
    /// Capture the undo stack of `manager`, oldest first.
    ///
    /// Inert changes have nothing to record and are skipped.
    pub fn from_manager(manager: &UndoRedoManager) -> ChangeResult<Self> {
        let mut changes = Vec::with_capacity(manager.undo_count());
        for change in manager.changes() {
            if change.is_inert() {
                tracing::warn!("Skipping inert change '{}'", change.name());
                continue;
            }
            changes.push(change.to_record()?);
        }
        Ok(Self {
            version: HISTORY_VERSION,
            saved_at: Some(Utc::now()),
            changes,
        })
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let file: HistoryFile = serde_json::from_str(json)?;
        if file.version != HISTORY_VERSION {
            return Err(PersistenceError::UnsupportedVersion {
                found: file.version,
                expected: HISTORY_VERSION,
            });
        }
        Ok(file)
    }

    /// Save to a JSON file
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        std::fs::write(path, self.to_json()?)?;
        tracing::info!("Saved {} changes to {:?}", self.changes.len(), path);
        Ok(())
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let content = std::fs::read_to_string(path)?;
        let file = Self::from_json(&content)?;
        tracing::info!("Loaded {} changes from {:?}", file.changes.len(), path);
        Ok(file)
    }

    /// Replay the records into `manager`.
    ///
    /// Inert changes are reported and not pushed. A malformed record or an
    /// open transaction stops the restore with an error.
    pub fn restore(
        &self,
        manager: &mut UndoRedoManager,
        registry: &ChangeRegistry,
        context: &ChangeContext,
    ) -> UndoResult<RestoreReport> {
        let mut report = RestoreReport::default();
        for record in &self.changes {
            let change = registry.load(record, context)?;
            if change.is_inert() {
                report.inert.push(record.name.clone());
                continue;
            }
            manager.add_change(change)?;
            report.applied += 1;
        }
        tracing::info!(
            "Restored history: {} applied, {} inert",
            report.applied,
            report.inert.len()
        );
        Ok(report)
    }
}
