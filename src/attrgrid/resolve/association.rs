//! Association attribute naming.
//!
//! A non-polymorphic foreign-key column such as `role_id` is shown as a field
//! of the associated record instead, e.g. `role__name`.

use crate::model::{AttrType, Association};
use crate::schema::SchemaIntrospector;
use tracing::{debug, warn};

/// Separator between association name and target field in attribute names.
pub const ASSOCIATION_SEPARATOR: &str = "__";

/// Whether an attribute name looks like an association attribute.
///
/// This is only a naming heuristic: the target field is not checked, since
/// at this point the target type may not even be known.
pub fn is_association_attr(name: &str) -> bool {
    name.contains(ASSOCIATION_SEPARATOR)
}

pub fn association_attr_name(association: &str, field: &str) -> String {
    format!("{association}{ASSOCIATION_SEPARATOR}{field}")
}

/// Derives the display name and type for a foreign-key column.
#[derive(Debug, Clone)]
pub struct AssociationNameResolver {
    display_fields: Vec<String>,
}

impl AssociationNameResolver {
    pub fn new(display_fields: Vec<String>) -> Self {
        Self { display_fields }
    }

    /// Resolve `(display_name, display_type)` for an association.
    ///
    /// Candidates are the configured display fields followed by the foreign-key
    /// column name; the first one readable on the target wins. The type is the
    /// target column's type, or `string` for computed members. This never fails:
    /// an unknown target or a target with none of the candidates falls back to
    /// the foreign-key column name typed as `string`.
    pub fn resolve(
        &self,
        schema: &dyn SchemaIntrospector,
        association: &Association,
    ) -> (String, AttrType) {
        let candidates = self
            .display_fields
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(association.foreign_key.as_str()));

        let mut found = None;
        for candidate in candidates {
            match schema.has_member(&association.target, candidate) {
                Ok(true) => {
                    found = Some(candidate);
                    break;
                }
                Ok(false) => {}
                Err(e) => {
                    warn!(
                        association = %association.name,
                        target = %association.target,
                        error = %e,
                        "association target unavailable"
                    );
                    break;
                }
            }
        }

        let field = found.unwrap_or_else(|| {
            debug!(
                association = %association.name,
                "no display field on association target, using foreign key"
            );
            association.foreign_key.as_str()
        });

        let attr_type = schema
            .column(&association.target, field)
            .ok()
            .flatten()
            .map_or(AttrType::String, |c| c.attr_type.clone());

        (association_attr_name(&association.name, field), attr_type)
    }
}

impl Default for AssociationNameResolver {
    fn default() -> Self {
        Self::new(vec!["name".into(), "title".into(), "label".into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Column;
    use crate::schema::memory::{InMemorySchema, ModelSchema};

    fn schema_with_target(target: ModelSchema) -> InMemorySchema {
        InMemorySchema::new().with_model("Role", target)
    }

    fn role() -> Association {
        Association::new("role", "role_id", "Role")
    }

    #[test]
    fn association_heuristic() {
        assert!(is_association_attr("role__name"));
        assert!(!is_association_attr("role_id"));
        assert!(!is_association_attr("name"));
    }

    #[test]
    fn name_column_wins() {
        let schema = schema_with_target(
            ModelSchema::new()
                .column(Column::new("title", "string"))
                .column(Column::new("name", "text")),
        );
        let (name, ty) = AssociationNameResolver::default().resolve(&schema, &role());
        assert_eq!(name, "role__name");
        assert_eq!(ty, AttrType::Text);
    }

    #[test]
    fn falls_through_candidates_in_order() {
        let schema = schema_with_target(
            ModelSchema::new()
                .column(Column::new("label", "string"))
                .column(Column::new("title", "integer")),
        );
        let (name, ty) = AssociationNameResolver::default().resolve(&schema, &role());
        assert_eq!(name, "role__title");
        assert_eq!(ty, AttrType::Integer);
    }

    #[test]
    fn computed_member_is_typed_as_string() {
        let schema = schema_with_target(ModelSchema::new().member("name"));
        let (name, ty) = AssociationNameResolver::default().resolve(&schema, &role());
        assert_eq!(name, "role__name");
        assert_eq!(ty, AttrType::String);
    }

    #[test]
    fn foreign_key_is_the_last_candidate() {
        let schema = schema_with_target(
            ModelSchema::new()
                .column(Column::new("id", "integer"))
                .column(Column::new("role_id", "integer")),
        );
        let (name, ty) = AssociationNameResolver::default().resolve(&schema, &role());
        assert_eq!(name, "role__role_id");
        assert_eq!(ty, AttrType::Integer);
    }

    #[test]
    fn unknown_target_falls_back_to_string() {
        let schema = InMemorySchema::new();
        let (name, ty) = AssociationNameResolver::default().resolve(&schema, &role());
        assert_eq!(name, "role__role_id");
        assert_eq!(ty, AttrType::String);
    }

    #[test]
    fn custom_display_fields() {
        let schema = schema_with_target(
            ModelSchema::new()
                .column(Column::new("name", "string"))
                .column(Column::new("code", "string")),
        );
        let resolver = AssociationNameResolver::new(vec!["code".into()]);
        assert_eq!(resolver.resolve(&schema, &role()).0, "role__code");
    }
}
