//! Resolved attribute descriptors.

use super::accessor::ValueAccessor;
use super::declaration::Declaration;
use crate::model::{AttrType, Column, Value};
use indexmap::IndexMap;
use serde::Serialize;

/// The UI-facing description of one attribute of a model type.
///
/// Produced by the resolver; consumed by grid/form builders and by the codec.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeDescriptor {
    pub name: String,

    #[serde(rename = "type")]
    pub attr_type: AttrType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    /// Not backed by a physical column and not an association attribute
    #[serde(rename = "virtual")]
    pub is_virtual: bool,

    /// Whether the codec emits this attribute; does not affect list membership
    pub included: bool,

    #[serde(skip)]
    pub accessor: ValueAccessor,

    /// Presentation options carried through from declarations
    #[serde(flatten)]
    pub options: IndexMap<String, serde_json::Value>,
}

impl AttributeDescriptor {
    pub fn new(name: impl Into<String>, attr_type: AttrType) -> Self {
        let name = name.into();
        Self {
            accessor: ValueAccessor::member(&name),
            name,
            attr_type,
            default_value: None,
            is_virtual: false,
            included: true,
            options: IndexMap::new(),
        }
    }

    /// Seed a descriptor from a physical column, carrying its type and default.
    pub fn from_column(column: &Column) -> Self {
        let mut descriptor = Self::new(&column.name, column.attr_type.clone());
        descriptor.default_value = column.non_null_default().cloned();
        descriptor
    }

    /// Seed a descriptor that has no column behind it.
    pub fn virtual_attr(name: impl Into<String>) -> Self {
        let mut descriptor = Self::new(name, AttrType::String);
        descriptor.is_virtual = true;
        descriptor
    }

    /// Layer a declaration on top; every field the declaration sets wins.
    pub fn apply(&mut self, declaration: &Declaration) {
        if let Some(ty) = &declaration.attr_type {
            self.attr_type = ty.clone();
        }
        if let Some(default) = &declaration.default_value {
            self.default_value = Some(default.clone());
        }
        if let Some(is_virtual) = declaration.is_virtual {
            self.is_virtual = is_virtual;
        }
        if let Some(included) = declaration.included {
            self.included = included;
        }
        if let Some(getter) = &declaration.getter {
            self.accessor = self.accessor.clone().with_getter(getter.clone());
        }
        if let Some(setter) = &declaration.setter {
            self.accessor = self.accessor.clone().with_setter(setter.clone());
        }
        for (key, value) in &declaration.options {
            self.options.insert(key.clone(), value.clone());
        }
    }

    pub fn option(&self, key: &str) -> Option<&serde_json::Value> {
        self.options.get(key)
    }

    pub fn is_read_only(&self) -> bool {
        matches!(self.option("read_only"), Some(serde_json::Value::Bool(true)))
    }
}
