//! Core data types shared by the schema boundary, the resolver and the codec.

use chrono::{DateTime, FixedOffset};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The type of an attribute as presented to grids and forms.
///
/// The set is open-ended: schema adapters may report types this crate has no
/// dedicated variant for, which are carried through as [`AttrType::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AttrType {
    #[default]
    String,
    Text,
    Boolean,
    Integer,
    Float,
    Decimal,
    Date,
    Datetime,
    Time,
    Binary,
    Other(String),
}

impl AttrType {
    pub fn as_str(&self) -> &str {
        match self {
            AttrType::String => "string",
            AttrType::Text => "text",
            AttrType::Boolean => "boolean",
            AttrType::Integer => "integer",
            AttrType::Float => "float",
            AttrType::Decimal => "decimal",
            AttrType::Date => "date",
            AttrType::Datetime => "datetime",
            AttrType::Time => "time",
            AttrType::Binary => "binary",
            AttrType::Other(name) => name,
        }
    }
}

impl From<&str> for AttrType {
    fn from(name: &str) -> Self {
        match name {
            "string" => AttrType::String,
            "text" => AttrType::Text,
            "boolean" => AttrType::Boolean,
            "integer" => AttrType::Integer,
            "float" => AttrType::Float,
            "decimal" => AttrType::Decimal,
            "date" => AttrType::Date,
            "datetime" | "timestamp" => AttrType::Datetime,
            "time" => AttrType::Time,
            "binary" => AttrType::Binary,
            other => AttrType::Other(other.to_string()),
        }
    }
}

impl From<String> for AttrType {
    fn from(name: String) -> Self {
        AttrType::from(name.as_str())
    }
}

impl From<AttrType> for String {
    fn from(ty: AttrType) -> Self {
        ty.as_str().to_string()
    }
}

impl fmt::Display for AttrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value read from or written to a record.
///
/// Zoned date/times are kept as a distinct variant so the codec can normalize
/// them before they reach a serialization layer. Nested objects keep their key
/// order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    DateTime(DateTime<FixedOffset>),
    List(Vec<Value>),
    Map(IndexMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Self {
        Value::DateTime(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::List(v)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(v: IndexMap<String, Value>) -> Self {
        Value::Map(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// A physical column as reported by schema introspection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,

    #[serde(rename = "type")]
    pub attr_type: AttrType,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub primary_key: bool,
}

impl Column {
    pub fn new(name: impl Into<String>, attr_type: impl Into<AttrType>) -> Self {
        Self {
            name: name.into(),
            attr_type: attr_type.into(),
            default: None,
            primary_key: false,
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn primary(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// The schema default, treating an explicit null the same as no default.
    pub fn non_null_default(&self) -> Option<&Value> {
        self.default.as_ref().filter(|v| !v.is_null())
    }
}

/// A foreign-key association from one model type to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub name: String,
    pub foreign_key: String,
    pub target: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub polymorphic: bool,
}

impl Association {
    pub fn new(
        name: impl Into<String>,
        foreign_key: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            foreign_key: foreign_key.into(),
            target: target.into(),
            polymorphic: false,
        }
    }

    pub fn polymorphic(mut self) -> Self {
        self.polymorphic = true;
        self
    }
}
