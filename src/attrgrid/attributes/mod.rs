//! # Attribute Descriptors
//!
//! An attribute descriptor is the canonical, UI-consumable description of one
//! attribute of a model type: its name, type, default, whether it is virtual,
//! whether serialization includes it, and how to read/write its value.
//!
//! Descriptors come from three sources, merged by the resolver:
//!
//! | Source | Provides |
//! |--------|----------|
//! | Schema column | name, type, default |
//! | Association | `<association>__<field>` name and the target field type |
//! | [`Declaration`] | anything the author sets; always wins key-by-key |
//!
//! ## Accessors
//!
//! A descriptor's [`ValueAccessor`] is fixed at build time. A declared
//! [`Getter`]/[`Setter`] replaces member access for that direction only, so an
//! attribute with a custom getter still writes through the record member of
//! the same name.

mod accessor;
mod declaration;
mod descriptor;

pub use accessor::{Getter, Reader, Setter, ValueAccessor, Writer};
pub use declaration::Declaration;
pub use descriptor::AttributeDescriptor;
