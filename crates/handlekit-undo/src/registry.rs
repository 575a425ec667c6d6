//! Type name → constructor lookup used when loading history.
//!
//! The built-in change types form the closed [`ChangeKind`] set. Hosts may
//! register additional types on a [`ChangeRegistry`]; registration replaces
//! an existing entry and entries are never removed.

use crate::change::Change;
use crate::changes::{
    CreateGeomChange, GeomKind, HoldObjectsChange, MeasurementChange, NameValueChange,
    ParameterValueChange, SelectionXfoChange, HOLD_OBJECTS_CHANGE, MEASUREMENT_CHANGE,
    NAME_VALUE_CHANGE, PARAMETER_VALUE_CHANGE, SELECTION_XFO_CHANGE,
};
use crate::error::{ChangeError, ChangeResult};
use crate::record::{ChangeContext, ChangeRecord};
use handlekit_core::{thread_safe_rw_map, ThreadSafeRwMap};
use std::sync::{Arc, OnceLock};

/// The built-in change types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    ParameterValue,
    NameValue,
    SelectionXfo,
    HoldObjects,
    Measurement,
    CreateGeom(GeomKind),
}

impl ChangeKind {
    /// Every built-in kind
    pub fn all() -> Vec<ChangeKind> {
        let mut kinds = vec![
            ChangeKind::ParameterValue,
            ChangeKind::NameValue,
            ChangeKind::SelectionXfo,
            ChangeKind::HoldObjects,
            ChangeKind::Measurement,
        ];
        kinds.extend(GeomKind::ALL.into_iter().map(ChangeKind::CreateGeom));
        kinds
    }

    pub fn type_name(self) -> &'static str {
        match self {
            ChangeKind::ParameterValue => PARAMETER_VALUE_CHANGE,
            ChangeKind::NameValue => NAME_VALUE_CHANGE,
            ChangeKind::SelectionXfo => SELECTION_XFO_CHANGE,
            ChangeKind::HoldObjects => HOLD_OBJECTS_CHANGE,
            ChangeKind::Measurement => MEASUREMENT_CHANGE,
            ChangeKind::CreateGeom(kind) => kind.type_name(),
        }
    }

    pub fn from_type_name(type_name: &str) -> Option<ChangeKind> {
        Self::all().into_iter().find(|k| k.type_name() == type_name)
    }

    /// An inert change of this kind, ready for [`Change::from_record`]
    pub fn construct(self) -> Box<dyn Change> {
        match self {
            ChangeKind::ParameterValue => Box::new(ParameterValueChange::inert()),
            ChangeKind::NameValue => Box::new(NameValueChange::inert()),
            ChangeKind::SelectionXfo => Box::new(SelectionXfoChange::inert()),
            ChangeKind::HoldObjects => Box::new(HoldObjectsChange::inert()),
            ChangeKind::Measurement => Box::new(MeasurementChange::inert()),
            ChangeKind::CreateGeom(kind) => Box::new(CreateGeomChange::inert(kind)),
        }
    }
}

/// Builds an inert change of a registered type
pub type ChangeFactory = Arc<dyn Fn() -> Box<dyn Change> + Send + Sync>;

/// Registered change constructors keyed by type name
pub struct ChangeRegistry {
    factories: ThreadSafeRwMap<String, ChangeFactory>,
}

impl ChangeRegistry {
    /// A registry with no entries
    pub fn empty() -> Self {
        Self {
            factories: thread_safe_rw_map(),
        }
    }

    /// A registry holding every built-in kind
    pub fn with_builtin() -> Self {
        let registry = Self::empty();
        for kind in ChangeKind::all() {
            registry.register(kind.type_name(), move || kind.construct());
        }
        registry
    }

    /// The process-wide registry, created with the built-in kinds on first use
    pub fn global() -> &'static ChangeRegistry {
        static GLOBAL: OnceLock<ChangeRegistry> = OnceLock::new();
        GLOBAL.get_or_init(ChangeRegistry::with_builtin)
    }

    /// Register `factory` under `type_name`, replacing any previous entry
    pub fn register<F>(&self, type_name: &str, factory: F)
    where
        F: Fn() -> Box<dyn Change> + Send + Sync + 'static,
    {
        let previous = self
            .factories
            .write()
            .insert(type_name.to_string(), Arc::new(factory));
        if previous.is_some() {
            tracing::warn!("Replaced change factory for '{}'", type_name);
        } else {
            tracing::trace!("Registered change type '{}'", type_name);
        }
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.factories.read().contains_key(type_name)
    }

    /// Registered type names, sorted
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.factories.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// An inert change of the named type
    pub fn construct(&self, type_name: &str) -> ChangeResult<Box<dyn Change>> {
        // Clone the factory out so it runs without the lock held
        let factory = self
            .factories
            .read()
            .get(type_name)
            .cloned()
            .ok_or_else(|| ChangeError::UnknownType {
                type_name: type_name.to_string(),
            })?;
        Ok(factory())
    }

    /// Construct the record's type and load the record into it
    pub fn load(&self, record: &ChangeRecord, context: &ChangeContext) -> ChangeResult<Box<dyn Change>> {
        let mut change = self.construct(&record.type_name)?;
        change.from_record(record, context)?;
        Ok(change)
    }
}

impl Default for ChangeRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl std::fmt::Debug for ChangeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeRegistry")
            .field("types", &self.type_names())
            .finish()
    }
}
