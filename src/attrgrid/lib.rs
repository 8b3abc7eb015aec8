//! # Attrgrid Architecture
//!
//! Attrgrid computes the canonical, ordered list of **attribute descriptors**
//! for a data-model type: which attributes a grid or form should show, in
//! which order, with which types and defaults, and how to read and write their
//! values on a record. Model authors only state what the schema cannot tell.
//!
//! ## Sources
//!
//! ```text
//! ┌──────────────────────┐  ┌──────────────────────┐  ┌──────────────────────┐
//! │ Declarations         │  │ Schema columns       │  │ Associations         │
//! │ (registry.rs)        │  │ (schema/)            │  │ (resolve/association)│
//! │ overrides, virtuals, │  │ name, type, default, │  │ role_id → role__name │
//! │ exclude / expose     │  │ primary key          │  │                      │
//! └──────────┬───────────┘  └──────────┬───────────┘  └──────────┬───────────┘
//!            └──────────────────────────┼──────────────────────────┘
//!                                       ▼
//!                       ┌───────────────────────────────┐
//!                       │  AttributeResolver (resolve/) │
//!                       │  natural or forced order      │
//!                       └───────────────┬───────────────┘
//!                                       ▼
//!                       ┌───────────────────────────────┐
//!                       │  Vec<AttributeDescriptor>     │──► Catalog (memoized)
//!                       └───────────────┬───────────────┘
//!                                       ▼
//!                       ┌───────────────────────────────┐
//!                       │  ValueCodec (codec.rs)        │
//!                       │  value_for / set_value        │
//!                       │  to_sequence / to_mapping     │
//!                       └───────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Boot**: model types register declarations through a
//!    [`registry::RegistryBuilder`] (directly, or from a
//!    [`definition::Definition`] file).
//! 2. **Freeze**: the builder becomes an immutable
//!    [`registry::AttributeRegistry`].
//! 3. **Serve**: a [`catalog::Catalog`] resolves and caches descriptor lists
//!    per type; any number of threads read them concurrently.
//!
//! Declared fields always win over schema-derived ones, key by key.
//!
//! ## Key Principle: No I/O in the Core
//!
//! Resolution and the codec take Rust values and return Rust values. Only
//! [`config`] and [`definition`] touch the filesystem, and only the binary
//! writes to stdout/stderr.
//!
//! ## Module Overview
//!
//! - [`attributes`]: descriptors, declarations, value accessors
//! - [`model`]: attribute types, values, columns, associations
//! - [`schema`]: the introspection boundary and the in-memory schema
//! - [`registry`]: declaration/exclusion/exposure store
//! - [`resolve`]: the merge algorithm and association naming
//! - [`codec`]: record access and row serialization
//! - [`catalog`]: frozen, memoizing read side
//! - [`config`]: resolver settings
//! - [`definition`]: JSON boot files
//! - [`error`]: error types

pub mod attributes;
pub mod catalog;
pub mod codec;
pub mod config;
pub mod definition;
pub mod error;
pub mod model;
pub mod registry;
pub mod resolve;
pub mod schema;
