use super::SchemaIntrospector;
use crate::error::{AttrgridError, Result};
use crate::model::{Association, Column};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Schema of a single model type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Explicit primary key; falls back to the first column flagged as primary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,

    #[serde(default)]
    pub columns: Vec<Column>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub associations: Vec<Association>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<String>,
}

impl ModelSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    pub fn primary_key(mut self, name: impl Into<String>) -> Self {
        self.primary_key = Some(name.into());
        self
    }

    pub fn association(mut self, association: Association) -> Self {
        self.associations.push(association);
        self
    }

    pub fn member(mut self, name: impl Into<String>) -> Self {
        self.members.push(name.into());
        self
    }
}

/// In-memory schema description.
///
/// Model order is preserved so listings are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InMemorySchema {
    models: IndexMap<String, ModelSchema>,
}

impl InMemorySchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_model(mut self, name: impl Into<String>, schema: ModelSchema) -> Self {
        self.insert(name, schema);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, schema: ModelSchema) {
        self.models.insert(name.into(), schema);
    }

    pub fn contains(&self, model: &str) -> bool {
        self.models.contains_key(model)
    }

    fn model(&self, model: &str) -> Result<&ModelSchema> {
        self.models
            .get(model)
            .ok_or_else(|| AttrgridError::UnknownModel(model.to_string()))
    }
}

impl SchemaIntrospector for InMemorySchema {
    fn columns(&self, model: &str) -> Result<&[Column]> {
        Ok(&self.model(model)?.columns)
    }

    fn primary_key(&self, model: &str) -> Result<Option<&str>> {
        let schema = self.model(model)?;
        Ok(schema.primary_key.as_deref().or_else(|| {
            schema
                .columns
                .iter()
                .find(|c| c.primary_key)
                .map(|c| c.name.as_str())
        }))
    }

    fn associations(&self, model: &str) -> Result<&[Association]> {
        Ok(&self.model(model)?.associations)
    }

    fn members(&self, model: &str) -> Result<&[String]> {
        Ok(&self.model(model)?.members)
    }

    fn model_names(&self) -> Vec<&str> {
        self.models.keys().map(String::as_str).collect()
    }
}
