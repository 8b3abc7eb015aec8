//! Author-supplied attribute declarations.

use super::accessor::{Getter, Setter};
use crate::model::{AttrType, Value};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A partial descriptor supplied by a model author.
///
/// Every field except `name` is optional: only what is set here overrides what
/// the schema or the association lookup derived. Unrecognized keys (such as
/// `read_only`) are kept in `options` and carried through to the descriptor
/// untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Declaration {
    pub name: String,

    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub attr_type: Option<AttrType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    #[serde(default, rename = "virtual", skip_serializing_if = "Option::is_none")]
    pub is_virtual: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub included: Option<bool>,

    #[serde(skip)]
    pub getter: Option<Getter>,

    #[serde(skip)]
    pub setter: Option<Setter>,

    #[serde(flatten)]
    pub options: IndexMap<String, serde_json::Value>,
}

impl Declaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn attr_type(mut self, attr_type: impl Into<AttrType>) -> Self {
        self.attr_type = Some(attr_type.into());
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn virtual_attr(mut self) -> Self {
        self.is_virtual = Some(true);
        self
    }

    pub fn included(mut self, included: bool) -> Self {
        self.included = Some(included);
        self
    }

    pub fn getter(mut self, getter: Getter) -> Self {
        self.getter = Some(getter);
        self
    }

    pub fn setter(mut self, setter: Setter) -> Self {
        self.setter = Some(setter);
        self
    }

    pub fn option(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn read_only(self) -> Self {
        self.option("read_only", true)
    }

    /// Shallow merge: every field set on `other` replaces the one here.
    pub fn merge(&mut self, other: Declaration) {
        if other.attr_type.is_some() {
            self.attr_type = other.attr_type;
        }
        if other.default_value.is_some() {
            self.default_value = other.default_value;
        }
        if other.is_virtual.is_some() {
            self.is_virtual = other.is_virtual;
        }
        if other.included.is_some() {
            self.included = other.included;
        }
        if other.getter.is_some() {
            self.getter = other.getter;
        }
        if other.setter.is_some() {
            self.setter = other.setter;
        }
        self.options.extend(other.options);
    }
}
