//! # Attribute Registry
//!
//! Per-model-type store of what authors said about attributes:
//!
//! - **declared**: [`Declaration`]s in declaration order, primary key first
//! - **excluded**: names dropped from natural-order resolution
//! - **exposed**: names forced into the result, in that exact order
//!
//! ## Write During Boot, Read Thereafter
//!
//! Mutation only happens through [`RegistryBuilder`], which is consumed by
//! [`RegistryBuilder::freeze`]. The resulting [`AttributeRegistry`] has no
//! mutating methods at all, so it can be shared freely between threads once
//! type registration is over.
//!
//! ## Inheritance
//!
//! Subtypes do not look up their supertype at read time. Instead,
//! [`RegistryBuilder::inherit`] copies the supertype entry once and layers the
//! subtype's own declarations on top of it.

use crate::attributes::Declaration;
use crate::error::Result;
use crate::model::AttrType;
use crate::schema::SchemaIntrospector;
use std::collections::HashMap;
use tracing::{debug, info};

/// Everything declared for one model type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelAttributes {
    declared: Vec<Declaration>,
    excluded: Option<Vec<String>>,
    exposed: Option<Vec<String>>,
}

impl ModelAttributes {
    pub fn declared(&self) -> &[Declaration] {
        &self.declared
    }

    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declared.iter().find(|d| d.name == name)
    }

    pub fn excluded(&self) -> &[String] {
        self.excluded.as_deref().unwrap_or(&[])
    }

    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded().iter().any(|n| n == name)
    }

    pub fn exposed(&self) -> Option<&[String]> {
        self.exposed.as_deref()
    }

    /// Insert a declaration, or merge it into an existing one of the same name.
    ///
    /// New declarations are appended, except the primary key which goes first.
    fn upsert(&mut self, declaration: Declaration, primary_key: Option<&str>) {
        if let Some(existing) = self
            .declared
            .iter_mut()
            .find(|d| d.name == declaration.name)
        {
            existing.merge(declaration);
        } else if primary_key == Some(declaration.name.as_str()) {
            self.declared.insert(0, declaration);
        } else {
            self.declared.push(declaration);
        }
    }

    fn set_exposed(&mut self, names: Vec<String>, primary_key: Option<&str>) {
        let mut exposed: Vec<String> = Vec::with_capacity(names.len() + 1);
        for name in names {
            if !exposed.contains(&name) {
                exposed.push(name);
            }
        }

        if let Some(pk) = primary_key {
            if !exposed.iter().any(|n| n == pk) {
                exposed.insert(0, pk.to_string());
            }
            if self.declaration(pk).is_none() {
                self.upsert(Declaration::new(pk).attr_type(AttrType::String), primary_key);
            }
        }

        self.exposed = Some(exposed);
    }
}

/// Mutable registry used while model types are being defined.
pub struct RegistryBuilder<'s> {
    schema: &'s dyn SchemaIntrospector,
    models: HashMap<String, ModelAttributes>,
}

impl<'s> RegistryBuilder<'s> {
    pub fn new(schema: &'s dyn SchemaIntrospector) -> Self {
        Self {
            schema,
            models: HashMap::new(),
        }
    }

    /// Declare (or re-declare) an attribute on a model type.
    ///
    /// A declaration without a type is declared as `string`, which then
    /// overrides the schema type of a column of the same name.
    pub fn declare(&mut self, model: &str, mut declaration: Declaration) -> Result<()> {
        if declaration.attr_type.is_none() {
            declaration.attr_type = Some(AttrType::String);
        }
        let schema = self.schema;
        let pk = schema.primary_key(model)?;
        debug!(model, attribute = %declaration.name, "declare attribute");
        self.entry(model).upsert(declaration, pk);
        Ok(())
    }

    /// Replace the exclusion set of a model type.
    pub fn exclude<I, N>(&mut self, model: &str, names: I) -> Result<()>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        self.schema.columns(model)?;
        self.entry(model).excluded = Some(names.into_iter().map(Into::into).collect());
        Ok(())
    }

    /// Replace the exposure list of a model type.
    ///
    /// Duplicate names are dropped. When the primary key is not listed it is
    /// put at the front and declared implicitly.
    pub fn expose<I, N>(&mut self, model: &str, names: I) -> Result<()>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let schema = self.schema;
        let pk = schema.primary_key(model)?;
        let names = names.into_iter().map(Into::into).collect();
        self.entry(model).set_exposed(names, pk);
        Ok(())
    }

    /// Register `subtype` as inheriting from `supertype`.
    ///
    /// The supertype's current entry becomes the base; whatever the subtype
    /// already declared is layered on top, and its own exclusion/exposure sets
    /// replace the inherited ones. Later declarations on the supertype are not
    /// seen by the subtype.
    pub fn inherit(&mut self, subtype: &str, supertype: &str) -> Result<()> {
        let schema = self.schema;
        let pk = schema.primary_key(subtype)?;
        let mut merged = self.models.get(supertype).cloned().unwrap_or_default();

        if let Some(own) = self.models.remove(subtype) {
            for declaration in own.declared {
                merged.upsert(declaration, pk);
            }
            if own.excluded.is_some() {
                merged.excluded = own.excluded;
            }
            if own.exposed.is_some() {
                merged.exposed = own.exposed;
            }
        }

        if let Some(exposed) = merged.exposed.take() {
            merged.set_exposed(exposed, pk);
        }

        debug!(subtype, supertype, "inherit attributes");
        self.models.insert(subtype.to_string(), merged);
        Ok(())
    }

    pub fn declared(&self, model: &str) -> &[Declaration] {
        self.models.get(model).map(ModelAttributes::declared).unwrap_or_default()
    }

    pub fn excluded(&self, model: &str) -> &[String] {
        self.models.get(model).map(ModelAttributes::excluded).unwrap_or_default()
    }

    pub fn exposed(&self, model: &str) -> Option<&[String]> {
        self.models.get(model).and_then(ModelAttributes::exposed)
    }

    /// Finish registration. The returned registry is read-only.
    pub fn freeze(self) -> AttributeRegistry {
        info!(models = self.models.len(), "attribute registry frozen");
        AttributeRegistry {
            models: self.models,
        }
    }

    fn entry(&mut self, model: &str) -> &mut ModelAttributes {
        self.models.entry(model.to_string()).or_default()
    }
}

/// Frozen, read-only attribute registry.
#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
    models: HashMap<String, ModelAttributes>,
}

impl AttributeRegistry {
    pub fn model(&self, model: &str) -> Option<&ModelAttributes> {
        self.models.get(model)
    }

    pub fn declared(&self, model: &str) -> &[Declaration] {
        self.models.get(model).map(ModelAttributes::declared).unwrap_or_default()
    }

    pub fn excluded(&self, model: &str) -> &[String] {
        self.models.get(model).map(ModelAttributes::excluded).unwrap_or_default()
    }

    pub fn exposed(&self, model: &str) -> Option<&[String]> {
        self.models.get(model).and_then(ModelAttributes::exposed)
    }

    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }
}
