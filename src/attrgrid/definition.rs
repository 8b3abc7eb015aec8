//! # Definition Files
//!
//! A definition file describes, in JSON, everything needed to boot a catalog
//! without code: the schema of each model type and the attribute declarations
//! made for it.
//!
//! ```json
//! {
//!   "schema": {
//!     "User": {
//!       "primary_key": "id",
//!       "columns": [{"name": "id", "type": "integer"}, {"name": "role_id", "type": "integer"}],
//!       "associations": [{"name": "role", "foreign_key": "role_id", "target": "Role"}]
//!     },
//!     "Role": {"columns": [{"name": "name", "type": "string"}]}
//!   },
//!   "attributes": {
//!     "User": {
//!       "declare": [{"name": "full_name", "read_only": true}],
//!       "exclude": ["created_at"]
//!     },
//!     "Admin": {"extends": "User", "expose": ["full_name"]}
//!   }
//! }
//! ```
//!
//! Supertypes are always registered before their subtypes, regardless of the
//! order they appear in the file.

use crate::attributes::Declaration;
use crate::catalog::Catalog;
use crate::config::ResolverConfig;
use crate::error::{AttrgridError, Result};
use crate::registry::{AttributeRegistry, RegistryBuilder};
use crate::schema::memory::InMemorySchema;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extends: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub declare: Vec<Declaration>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expose: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    #[serde(default)]
    pub schema: InMemorySchema,

    #[serde(default)]
    pub attributes: IndexMap<String, ModelDefinition>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

impl Definition {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(AttrgridError::Io)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(AttrgridError::Serialization)
    }

    /// Register every model's attributes and freeze the result.
    pub fn registry(&self) -> Result<AttributeRegistry> {
        let mut builder = RegistryBuilder::new(&self.schema);

        for model in self.registration_order()? {
            let def = &self.attributes[model];
            for declaration in &def.declare {
                builder.declare(model, declaration.clone())?;
            }
            if let Some(names) = &def.exclude {
                builder.exclude(model, names.iter().cloned())?;
            }
            if let Some(names) = &def.expose {
                builder.expose(model, names.iter().cloned())?;
            }
            if let Some(parent) = &def.extends {
                builder.inherit(model, parent)?;
            }
        }

        Ok(builder.freeze())
    }

    pub fn into_catalog(self, config: ResolverConfig) -> Result<Catalog<InMemorySchema>> {
        let registry = self.registry()?;
        Ok(Catalog::with_config(self.schema, registry, config))
    }

    /// Model names with every supertype ahead of its subtypes.
    fn registration_order(&self) -> Result<Vec<&str>> {
        let mut state: HashMap<&str, Visit> = HashMap::new();
        let mut order = Vec::with_capacity(self.attributes.len());
        for model in self.attributes.keys() {
            self.visit(model, &mut state, &mut order)?;
        }
        Ok(order)
    }

    fn visit<'a>(
        &'a self,
        model: &'a str,
        state: &mut HashMap<&'a str, Visit>,
        order: &mut Vec<&'a str>,
    ) -> Result<()> {
        match state.get(model) {
            Some(Visit::Done) => return Ok(()),
            Some(Visit::InProgress) => {
                return Err(AttrgridError::Definition(format!(
                    "inheritance cycle through model {model}"
                )))
            }
            None => {}
        }

        let Some(def) = self.attributes.get(model) else {
            // supertype with no attributes of its own
            return Ok(());
        };

        state.insert(model, Visit::InProgress);
        if let Some(parent) = def.extends.as_deref() {
            if !self.attributes.contains_key(parent) && !self.schema.contains(parent) {
                return Err(AttrgridError::Definition(format!(
                    "model {model} extends unknown model {parent}"
                )));
            }
            self.visit(parent, state, order)?;
        }
        state.insert(model, Visit::Done);
        order.push(model);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const USERS: &str = r#"{
        "schema": {
            "User": {
                "primary_key": "id",
                "columns": [
                    {"name": "id", "type": "integer"},
                    {"name": "email", "type": "string"},
                    {"name": "role_id", "type": "integer"}
                ],
                "associations": [{"name": "role", "foreign_key": "role_id", "target": "Role"}]
            },
            "Admin": {
                "primary_key": "id",
                "columns": [
                    {"name": "id", "type": "integer"},
                    {"name": "email", "type": "string"},
                    {"name": "role_id", "type": "integer"},
                    {"name": "level", "type": "integer"}
                ],
                "associations": [{"name": "role", "foreign_key": "role_id", "target": "Role"}]
            },
            "Role": {
                "primary_key": "id",
                "columns": [{"name": "id", "type": "integer"}, {"name": "name", "type": "string"}]
            }
        },
        "attributes": {
            "Admin": {"extends": "User", "declare": [{"name": "level", "read_only": true}]},
            "User": {
                "declare": [{"name": "full_name", "virtual": true}],
                "exclude": ["email"]
            }
        }
    }"#;

    fn names(d: &[crate::attributes::AttributeDescriptor]) -> Vec<&str> {
        d.iter().map(|a| a.name.as_str()).collect()
    }

    #[test]
    fn supertypes_register_first() {
        let def = Definition::from_json(USERS).unwrap();
        let registry = def.registry().unwrap();
        let admin: Vec<&str> = registry
            .declared("Admin")
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(admin, vec!["full_name", "level"]);
        assert_eq!(registry.excluded("Admin"), ["email".to_string()]);
    }

    #[test]
    fn builds_a_catalog() {
        let catalog = Definition::from_json(USERS)
            .unwrap()
            .into_catalog(ResolverConfig::default())
            .unwrap();
        let user = catalog.descriptors("User").unwrap();
        assert_eq!(names(&user), vec!["id", "role__name", "full_name"]);

        let admin = catalog.descriptors("Admin").unwrap();
        assert_eq!(names(&admin), vec!["id", "role__name", "level", "full_name"]);
        assert!(admin[2].is_read_only());
    }

    #[test]
    fn unknown_supertype_is_rejected() {
        let def = Definition::from_json(
            r#"{"schema": {"A": {}}, "attributes": {"A": {"extends": "Nope"}}}"#,
        )
        .unwrap();
        assert!(matches!(def.registry(), Err(AttrgridError::Definition(_))));
    }

    #[test]
    fn inheritance_cycle_is_rejected() {
        let def = Definition::from_json(
            r#"{
                "schema": {"A": {}, "B": {}},
                "attributes": {"A": {"extends": "B"}, "B": {"extends": "A"}}
            }"#,
        )
        .unwrap();
        let err = def.registry().unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }

    #[test]
    fn supertype_from_schema_only_is_allowed() {
        let def = Definition::from_json(
            r#"{"schema": {"A": {}, "B": {}}, "attributes": {"B": {"extends": "A"}}}"#,
        )
        .unwrap();
        assert!(def.registry().is_ok());
    }

    #[test]
    fn load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("models.json");
        fs::write(&path, USERS).unwrap();
        let def = Definition::load(&path).unwrap();
        assert_eq!(def.attributes.len(), 2);
        assert!(def.schema.contains("Role"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(matches!(
            Definition::load(temp_dir.path().join("none.json")),
            Err(AttrgridError::Io(_))
        ));
    }
}
