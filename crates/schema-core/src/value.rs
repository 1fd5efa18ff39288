//! Generated values and result trees.
//!
//! `Value` is the closed set of things a generator may return or receive as a
//! static argument. A result tree is an ordered map of values in which groups
//! are represented by `Value::Object`.

use crate::error::GenerationError;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value as YamlValue;
use std::fmt;
use uuid::Uuid;

/// Concrete result tree produced by evaluating a schema.
///
/// Keys follow the declaration order of the schema they were produced from.
pub type ResultTree = IndexMap<String, Value>;

/// Static keyword arguments attached to a leaf.
pub type Kwargs = IndexMap<String, Value>;

/// A single generated value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Null value
    Null,

    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point
    Float(f64),

    /// String value
    String(String),

    /// UUID value
    Uuid(Uuid),

    /// Date/time in UTC
    DateTime(DateTime<Utc>),

    /// List of values
    Array(Vec<Value>),

    /// Nested mapping; a group in a result tree
    Object(ResultTree),
}

impl Value {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this value is a group (nested mapping).
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an f64. Integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a list.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Self::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Try to get this value as a nested mapping.
    pub fn as_object(&self) -> Option<&ResultTree> {
        match self {
            Self::Object(obj) => Some(obj),
            _ => None,
        }
    }
}

/// Resolve a dotted path such as `owner.creator` or `tags.0` inside a result tree.
///
/// Mapping segments are looked up by key and list segments by index. Any
/// segment that cannot be resolved fails with [`GenerationError::Lookup`]
/// carrying the full path.
pub fn lookup<'a>(tree: &'a ResultTree, path: &str) -> Result<&'a Value, GenerationError> {
    let missing = || GenerationError::Lookup {
        path: path.to_string(),
    };

    let mut segments = path.split('.');
    let first = segments.next().ok_or_else(missing)?;
    let mut current = tree.get(first).ok_or_else(missing)?;
    for segment in segments {
        current = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
        .ok_or_else(missing)?;
    }
    Ok(current)
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::Uuid(u) => write!(f, "{u}"),
            Self::DateTime(dt) => f.write_str(&dt.to_rfc3339()),
            Self::Array(_) | Self::Object(_) => {
                let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
                f.write_str(&json)
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Self::Uuid(u)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::Array(items.into_iter().map(Into::into).collect())
    }
}

impl From<ResultTree> for Value {
    fn from(map: ResultTree) -> Self {
        Self::Object(map)
    }
}

impl From<&YamlValue> for Value {
    fn from(yaml: &YamlValue) -> Self {
        match yaml {
            YamlValue::Null => Self::Null,
            YamlValue::Bool(b) => Self::Bool(*b),
            YamlValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(x) = n.as_f64() {
                    Self::Float(x)
                } else {
                    Self::String(n.to_string())
                }
            }
            YamlValue::String(s) => Self::String(s.clone()),
            YamlValue::Sequence(items) => Self::Array(items.iter().map(Value::from).collect()),
            // Non-string keys (`1: one`) keep their scalar text as the key
            YamlValue::Mapping(map) => Self::Object(
                map.iter()
                    .map(|(k, v)| {
                        let key = match k.as_str() {
                            Some(k) => k.to_string(),
                            None => Value::from(k).to_string(),
                        };
                        (key, Value::from(v))
                    })
                    .collect(),
            ),
            YamlValue::Tagged(tagged) => Value::from(&tagged.value),
        }
    }
}
