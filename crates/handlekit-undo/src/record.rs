//! Serialized form of a change.
//!
//! A record is a flat JSON object: `type` and `name` are common to every
//! change, the remaining fields are owned by the change type, e.g.
//!
//! ```json
//! { "type": "ParameterValueChange", "name": "Radius Changed",
//!   "paramPath": ["root", "Sphere", "Radius"], "value": 9.0 }
//! ```

use crate::error::{ChangeError, ChangeResult};
use handlekit_core::{ScenePath, TreeItemRef};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// JSON form of a change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Registered type name used to reconstruct the change
    #[serde(rename = "type")]
    pub type_name: String,
    /// Human readable label
    pub name: String,
    /// Type specific payload
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl ChangeRecord {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            fields: serde_json::Map::new(),
        }
    }

    /// Add a field, builder style
    pub fn with(mut self, key: &str, value: impl Serialize) -> ChangeResult<Self> {
        self.fields
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    /// The raw JSON of a required field
    pub fn field(&self, key: &str) -> ChangeResult<&serde_json::Value> {
        self.fields.get(key).ok_or_else(|| ChangeError::MissingField {
            type_name: self.type_name.clone(),
            field: key.to_string(),
        })
    }

    /// Decode a required field
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> ChangeResult<T> {
        Ok(serde_json::from_value(self.field(key)?.clone())?)
    }

    /// Decode a required path field
    pub fn path(&self, key: &str) -> ChangeResult<ScenePath> {
        self.get(key)
    }

    /// Fail unless this record was written by a change of `expected` type
    pub fn expect_type(&self, expected: &str) -> ChangeResult<()> {
        if self.type_name == expected {
            Ok(())
        } else {
            Err(ChangeError::RecordTypeMismatch {
                expected: expected.to_string(),
                found: self.type_name.clone(),
            })
        }
    }
}

/// What a record is loaded against
#[derive(Debug, Clone)]
pub struct ChangeContext {
    /// Scene root that record paths are resolved from
    pub root: TreeItemRef,
}

impl ChangeContext {
    pub fn new(root: TreeItemRef) -> Self {
        Self { root }
    }
}
