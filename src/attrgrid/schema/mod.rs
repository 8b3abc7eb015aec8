//! # Schema Introspection Boundary
//!
//! The resolver never talks to a database. Everything it knows about the
//! physical shape of a model type comes through the [`SchemaIntrospector`]
//! trait, which is treated as a read-only oracle:
//!
//! - ordered physical columns (name, type, default)
//! - the primary-key column name
//! - foreign-key associations, including the polymorphic flag
//! - instance-level readable members (computed fields that are not columns)
//!
//! Members are only consulted when a type is the *target* of an association,
//! to find a displayable field on it.
//!
//! ## Implementations
//!
//! - [`memory::InMemorySchema`]: a plain, serde-loadable description of the
//!   schema, used by the definition file and by tests.
//!
//! Adapters for live databases implement the same trait and are expected to
//! cache their answers: the schema is assumed stable for the process lifetime.

use crate::error::Result;
use crate::model::{Association, Column};

pub mod memory;

/// Read-only access to the storage schema of model types.
///
/// Every method fails with [`AttrgridError::UnknownModel`] when asked about a
/// type the introspector does not know.
///
/// [`AttrgridError::UnknownModel`]: crate::error::AttrgridError::UnknownModel
pub trait SchemaIntrospector {
    /// Physical columns in schema-declared order
    fn columns(&self, model: &str) -> Result<&[Column]>;

    /// Name of the primary-key column, if the type has one
    fn primary_key(&self, model: &str) -> Result<Option<&str>>;

    /// Associations declared on the type
    fn associations(&self, model: &str) -> Result<&[Association]>;

    /// Instance-level readable members that are not physical columns
    fn members(&self, model: &str) -> Result<&[String]>;

    /// All model types this introspector can describe
    fn model_names(&self) -> Vec<&str>;

    /// Look up a single column by exact name.
    fn column(&self, model: &str, name: &str) -> Result<Option<&Column>> {
        Ok(self.columns(model)?.iter().find(|c| c.name == name))
    }

    /// The non-polymorphic association whose foreign key is `column`, if any.
    ///
    /// Polymorphic foreign keys are deliberately not matched: they stay plain
    /// columns because their target type is not fixed.
    fn association_for_column(&self, model: &str, column: &str) -> Result<Option<&Association>> {
        Ok(self
            .associations(model)?
            .iter()
            .find(|a| a.foreign_key == column && !a.polymorphic))
    }

    /// Whether `member` can be read on the type, either as a column or as a
    /// computed member.
    fn has_member(&self, model: &str, member: &str) -> Result<bool> {
        Ok(self.members(model)?.iter().any(|m| m == member)
            || self.columns(model)?.iter().any(|c| c.name == member))
    }
}
