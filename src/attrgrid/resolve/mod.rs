//! # Attribute Resolution
//!
//! [`AttributeResolver::resolve`] merges the attribute registry with schema
//! introspection into the final, ordered descriptor list of a model type.
//!
//! ## Natural Order (no exposure list)
//!
//! ```text
//! schema columns, in order
//!   ├─ non-polymorphic FK?  → replaced in place by <association>__<field>
//!   ├─ non-null default     → default_value
//!   └─ declaration with the resulting name → merged on top, consumed
//! + declarations not matched by any column, in declaration order
//! - names in the exclusion set
//! ```
//!
//! ## Forced Order (exposure list present)
//!
//! Exactly the exposed names, in order. Each one is seeded from the column of
//! that name, or treated as an association attribute when it contains the
//! separator, or as virtual when only declared; the declaration is merged on
//! top. A name matching none of these is an [`UnknownAttribute`] error. The
//! exclusion set is ignored.
//!
//! Resolution is a pure function of the schema and the frozen registry, so
//! results can be cached per type (see [`Catalog`]).
//!
//! [`UnknownAttribute`]: crate::error::AttrgridError::UnknownAttribute
//! [`Catalog`]: crate::catalog::Catalog

use crate::attributes::{AttributeDescriptor, Declaration};
use crate::config::ResolverConfig;
use crate::error::{AttrgridError, Result};
use crate::model::AttrType;
use crate::registry::AttributeRegistry;
use crate::schema::SchemaIntrospector;
use std::collections::HashSet;
use tracing::{debug, warn};

pub mod association;

pub use association::{
    association_attr_name, is_association_attr, AssociationNameResolver, ASSOCIATION_SEPARATOR,
};

/// Which algorithm produced a descriptor list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderMode {
    Natural,
    Forced,
}

pub struct AttributeResolver<'a> {
    schema: &'a dyn SchemaIntrospector,
    registry: &'a AttributeRegistry,
    associations: AssociationNameResolver,
}

impl<'a> AttributeResolver<'a> {
    pub fn new(schema: &'a dyn SchemaIntrospector, registry: &'a AttributeRegistry) -> Self {
        Self {
            schema,
            registry,
            associations: AssociationNameResolver::default(),
        }
    }

    pub fn with_config(
        schema: &'a dyn SchemaIntrospector,
        registry: &'a AttributeRegistry,
        config: &ResolverConfig,
    ) -> Self {
        Self {
            schema,
            registry,
            associations: AssociationNameResolver::new(config.display_fields.clone()),
        }
    }

    pub fn mode(&self, model: &str) -> OrderMode {
        if self.registry.exposed(model).is_some() {
            OrderMode::Forced
        } else {
            OrderMode::Natural
        }
    }

    /// Resolve the ordered descriptor list of a model type.
    pub fn resolve(&self, model: &str) -> Result<Vec<AttributeDescriptor>> {
        let mode = self.mode(model);
        let resolved = match self.registry.exposed(model) {
            Some(exposed) => self.forced_order(model, exposed)?,
            None => self.natural_order(model)?,
        };
        let resolved = unique_names(model, resolved);
        debug!(model, ?mode, attributes = resolved.len(), "resolved attributes");
        Ok(resolved)
    }

    fn forced_order(&self, model: &str, exposed: &[String]) -> Result<Vec<AttributeDescriptor>> {
        exposed
            .iter()
            .map(|name| self.forced_attr(model, name))
            .collect()
    }

    fn forced_attr(&self, model: &str, name: &str) -> Result<AttributeDescriptor> {
        let declared = self
            .registry
            .model(model)
            .and_then(|attrs| attrs.declaration(name));

        let mut descriptor = if let Some(column) = self.schema.column(model, name)? {
            AttributeDescriptor::from_column(column)
        } else if is_association_attr(name) {
            AttributeDescriptor::new(name, self.association_attr_type(model, name))
        } else if declared.is_some() {
            AttributeDescriptor::virtual_attr(name)
        } else {
            return Err(AttrgridError::UnknownAttribute {
                attribute: name.to_string(),
                model: model.to_string(),
            });
        };

        if let Some(declaration) = declared {
            descriptor.apply(declaration);
        }
        Ok(descriptor)
    }

    fn natural_order(&self, model: &str) -> Result<Vec<AttributeDescriptor>> {
        let attrs = self.registry.model(model);
        let mut pending: Vec<&Declaration> = self.registry.declared(model).iter().collect();
        let mut resolved = Vec::new();

        for column in self.schema.columns(model)? {
            let mut descriptor = match self.schema.association_for_column(model, &column.name)? {
                Some(association) => {
                    let (name, attr_type) = self.associations.resolve(self.schema, association);
                    let mut descriptor = AttributeDescriptor::new(name, attr_type);
                    descriptor.default_value = column.non_null_default().cloned();
                    descriptor
                }
                None => AttributeDescriptor::from_column(column),
            };

            if let Some(pos) = pending.iter().position(|d| d.name == descriptor.name) {
                descriptor.apply(pending.remove(pos));
            }
            resolved.push(descriptor);
        }

        for declaration in pending {
            let mut descriptor = if is_association_attr(&declaration.name) {
                AttributeDescriptor::new(
                    &declaration.name,
                    self.association_attr_type(model, &declaration.name),
                )
            } else {
                AttributeDescriptor::virtual_attr(&declaration.name)
            };
            descriptor.apply(declaration);
            resolved.push(descriptor);
        }

        if let Some(attrs) = attrs {
            resolved.retain(|d| !attrs.is_excluded(&d.name));
        }
        Ok(resolved)
    }

    /// Best-effort type of an `<association>__<field>` name.
    ///
    /// Uses the target column type when the association and the field can be
    /// found, `string` otherwise.
    fn association_attr_type(&self, model: &str, name: &str) -> AttrType {
        let Some((association, field)) = name.split_once(ASSOCIATION_SEPARATOR) else {
            return AttrType::String;
        };

        self.schema
            .associations(model)
            .ok()
            .and_then(|all| all.iter().find(|a| a.name == association && !a.polymorphic))
            .and_then(|a| self.schema.column(&a.target, field).ok().flatten())
            .map_or(AttrType::String, |c| c.attr_type.clone())
    }
}

/// Drop any descriptor whose name was already produced earlier in the list.
fn unique_names(model: &str, descriptors: Vec<AttributeDescriptor>) -> Vec<AttributeDescriptor> {
    let mut seen = HashSet::with_capacity(descriptors.len());
    descriptors
        .into_iter()
        .filter(|d| {
            let fresh = seen.insert(d.name.clone());
            if !fresh {
                warn!(model, attribute = %d.name, "duplicate attribute dropped");
            }
            fresh
        })
        .collect()
}
