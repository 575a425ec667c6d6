//! Values stored in scene parameters.
//!
//! A parameter keeps the kind of its initial value for its whole life;
//! writes of a different kind are rejected. Serialized values are untagged,
//! so reading one back needs the kind of the cell it is written into.

use crate::error::SceneError;
use crate::math::{Color, DVec3, Xfo};
use serde::{Deserialize, Serialize};

/// The kind of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Number,
    Bool,
    String,
    Vec3,
    Color,
    Xfo,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number => write!(f, "number"),
            Self::Bool => write!(f, "bool"),
            Self::String => write!(f, "string"),
            Self::Vec3 => write!(f, "vec3"),
            Self::Color => write!(f, "color"),
            Self::Xfo => write!(f, "xfo"),
        }
    }
}

/// A value held by a [`Parameter`](super::Parameter)
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Bool(bool),
    String(String),
    Vec3(DVec3),
    Color(Color),
    Xfo(Xfo),
}

impl Value {
    /// The kind of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Number(_) => ValueKind::Number,
            Value::Bool(_) => ValueKind::Bool,
            Value::String(_) => ValueKind::String,
            Value::Vec3(_) => ValueKind::Vec3,
            Value::Color(_) => ValueKind::Color,
            Value::Xfo(_) => ValueKind::Xfo,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_vec3(&self) -> Option<DVec3> {
        match self {
            Value::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_xfo(&self) -> Option<Xfo> {
        match self {
            Value::Xfo(x) => Some(*x),
            _ => None,
        }
    }

    /// Serialize the payload without a kind tag
    pub fn to_json(&self) -> serde_json::Value {
        let result = match self {
            Value::Number(n) => serde_json::to_value(n),
            Value::Bool(b) => serde_json::to_value(b),
            Value::String(s) => serde_json::to_value(s),
            Value::Vec3(v) => serde_json::to_value(v),
            Value::Color(c) => serde_json::to_value(c),
            Value::Xfo(x) => serde_json::to_value(x),
        };
        // None of the payload types can fail to serialize; non-finite
        // floats become null, which from_json then rejects.
        result.unwrap_or(serde_json::Value::Null)
    }

    /// Read an untagged payload as a value of `kind`
    pub fn from_json(kind: ValueKind, json: &serde_json::Value) -> Result<Value, serde_json::Error> {
        let json = json.clone();
        Ok(match kind {
            ValueKind::Number => Value::Number(serde_json::from_value(json)?),
            ValueKind::Bool => Value::Bool(serde_json::from_value(json)?),
            ValueKind::String => Value::String(serde_json::from_value(json)?),
            ValueKind::Vec3 => Value::Vec3(serde_json::from_value(json)?),
            ValueKind::Color => Value::Color(serde_json::from_value(json)?),
            ValueKind::Xfo => Value::Xfo(serde_json::from_value(json)?),
        })
    }

    /// Check that this value can be written into a cell of `expected` kind
    pub fn check_kind(&self, name: &str, expected: ValueKind) -> Result<(), SceneError> {
        if self.kind() == expected {
            Ok(())
        } else {
            Err(SceneError::TypeMismatch {
                name: name.to_string(),
                expected: expected.to_string(),
                actual: self.kind().to_string(),
            })
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DVec3> for Value {
    fn from(v: DVec3) -> Self {
        Value::Vec3(v)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}

impl From<Xfo> for Value {
    fn from(x: Xfo) -> Self {
        Value::Xfo(x)
    }
}
