//! # Descriptor Catalog
//!
//! The catalog is the read side of the system once model types are defined:
//! it owns the schema, the frozen [`AttributeRegistry`] and the resolver
//! settings, and memoizes resolved descriptor lists per model type.
//!
//! Cached lists are immutable (`Arc<[AttributeDescriptor]>`) and published
//! through an [`ArcSwap`] snapshot, so concurrent readers never block and never
//! see a half-built entry. Two threads missing the cache for the same type may
//! both resolve it; resolution is pure, so either result is the same.
//!
//! Nothing invalidates the cache implicitly. [`Catalog::rebuild`] is the
//! explicit administrative action that drops every cached list.

use crate::attributes::AttributeDescriptor;
use crate::codec::ValueCodec;
use crate::config::ResolverConfig;
use crate::error::Result;
use crate::registry::AttributeRegistry;
use crate::resolve::AttributeResolver;
use crate::schema::SchemaIntrospector;
use arc_swap::ArcSwap;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};

type Snapshot = HashMap<String, Arc<[AttributeDescriptor]>>;

pub struct Catalog<S> {
    schema: S,
    registry: AttributeRegistry,
    config: ResolverConfig,
    resolved: ArcSwap<Snapshot>,
}

impl<S: SchemaIntrospector> Catalog<S> {
    pub fn new(schema: S, registry: AttributeRegistry) -> Self {
        Self::with_config(schema, registry, ResolverConfig::default())
    }

    pub fn with_config(schema: S, registry: AttributeRegistry, config: ResolverConfig) -> Self {
        Self {
            schema,
            registry,
            config,
            resolved: ArcSwap::from_pointee(Snapshot::new()),
        }
    }

    pub fn schema(&self) -> &S {
        &self.schema
    }

    pub fn registry(&self) -> &AttributeRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    pub fn resolver(&self) -> AttributeResolver<'_> {
        AttributeResolver::with_config(&self.schema, &self.registry, &self.config)
    }

    pub fn codec(&self) -> ValueCodec {
        ValueCodec::from_config(&self.config)
    }

    /// Resolved descriptors of a model type, computed on first use.
    pub fn descriptors(&self, model: &str) -> Result<Arc<[AttributeDescriptor]>> {
        if let Some(cached) = self.resolved.load().get(model) {
            return Ok(Arc::clone(cached));
        }

        let resolved: Arc<[AttributeDescriptor]> = self.resolver().resolve(model)?.into();
        self.resolved.rcu(|current| {
            let mut next = Snapshot::clone(current);
            next.entry(model.to_string())
                .or_insert_with(|| Arc::clone(&resolved));
            next
        });
        debug!(model, "cached attribute descriptors");

        // another thread may have published first; hand out the shared copy
        Ok(self
            .resolved
            .load()
            .get(model)
            .map_or(resolved, Arc::clone))
    }

    pub fn is_cached(&self, model: &str) -> bool {
        self.resolved.load().contains_key(model)
    }

    /// Resolve every model type the schema knows. Stops at the first error.
    pub fn warm(&self) -> Result<usize> {
        let models = self.schema.model_names();
        for model in &models {
            self.descriptors(model)?;
        }
        Ok(models.len())
    }

    /// Drop all cached descriptor lists.
    pub fn rebuild(&self) {
        let dropped = self.resolved.swap(Arc::new(Snapshot::new())).len();
        info!(dropped, "attribute catalog rebuilt");
    }
}
