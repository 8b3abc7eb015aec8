//! # Value Codec
//!
//! Reads and writes attribute values on a concrete record according to
//! resolved descriptors, and serializes a record into the row shapes grids
//! and forms consume:
//!
//! - [`ValueCodec::to_sequence`]: values in descriptor order (grid rows)
//! - [`ValueCodec::to_mapping`]: values keyed by attribute name (form data)
//!
//! Descriptors with `included == false` are skipped by both.
//!
//! ## Failure Policy
//!
//! - Read failures (a getter error, a missing member) propagate unchanged.
//! - Writes with no target are silently ignored, so partial or unknown-field
//!   payloads do not abort an update.
//!
//! ## Zoned Date/Times
//!
//! A [`Value::DateTime`] is rendered to a string in its own offset using the
//! configured format before it is returned, so that downstream serializers
//! cannot reinterpret it in another zone. A pattern chrono cannot render is
//! reported as [`AttrgridError::Config`].

use crate::attributes::{AttributeDescriptor, Reader, Writer};
use crate::config::ResolverConfig;
use crate::error::{AttrgridError, Result};
use crate::model::Value;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Write;
use std::hash::BuildHasher;

/// A record instance whose members can be read and written by name.
pub trait Record {
    /// Read a member. Fails when the record has no such member.
    fn read(&self, member: &str) -> Result<Value>;

    /// Whether `member` can be written.
    fn writes(&self, member: &str) -> bool;

    fn write(&mut self, member: &str, value: Value) -> Result<()>;
}

/// A record backed by an ordered name -> value map.
///
/// Only members already present are writable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapRecord {
    values: IndexMap<String, Value>,
}

impl MapRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, member: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(member.into(), value.into());
        self
    }

    pub fn get(&self, member: &str) -> Option<&Value> {
        self.values.get(member)
    }
}

impl Record for MapRecord {
    fn read(&self, member: &str) -> Result<Value> {
        self.values
            .get(member)
            .cloned()
            .ok_or_else(|| AttrgridError::UnknownMember(member.to_string()))
    }

    fn writes(&self, member: &str) -> bool {
        self.values.contains_key(member)
    }

    fn write(&mut self, member: &str, value: Value) -> Result<()> {
        self.values.insert(member.to_string(), value);
        Ok(())
    }
}

/// Anything the codec can iterate descriptors from: ordered lists, or maps
/// keyed by attribute name.
pub trait DescriptorSource {
    fn descriptors(&self) -> Box<dyn Iterator<Item = &AttributeDescriptor> + '_>;
}

impl DescriptorSource for [AttributeDescriptor] {
    fn descriptors(&self) -> Box<dyn Iterator<Item = &AttributeDescriptor> + '_> {
        Box::new(self.iter())
    }
}

impl DescriptorSource for Vec<AttributeDescriptor> {
    fn descriptors(&self) -> Box<dyn Iterator<Item = &AttributeDescriptor> + '_> {
        Box::new(self.iter())
    }
}

impl<S> DescriptorSource for IndexMap<String, AttributeDescriptor, S> {
    fn descriptors(&self) -> Box<dyn Iterator<Item = &AttributeDescriptor> + '_> {
        Box::new(self.values())
    }
}

impl<S: BuildHasher> DescriptorSource for HashMap<String, AttributeDescriptor, S> {
    fn descriptors(&self) -> Box<dyn Iterator<Item = &AttributeDescriptor> + '_> {
        Box::new(self.values())
    }
}

#[derive(Debug, Clone)]
pub struct ValueCodec {
    datetime_format: String,
}

impl Default for ValueCodec {
    fn default() -> Self {
        Self::from_config(&ResolverConfig::default())
    }
}

impl ValueCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ResolverConfig) -> Self {
        Self {
            datetime_format: config.datetime_format.clone(),
        }
    }

    /// Read the value of one attribute from `record`.
    pub fn value_for(&self, descriptor: &AttributeDescriptor, record: &dyn Record) -> Result<Value> {
        let value = match descriptor.accessor.reader() {
            Reader::Getter(getter) => getter.call(record)?,
            Reader::Member(member) => record.read(member)?,
            Reader::Nothing => Value::Null,
        };

        match value {
            Value::DateTime(dt) => {
                let mut rendered = String::new();
                write!(rendered, "{}", dt.format(&self.datetime_format)).map_err(|_| {
                    AttrgridError::Config(format!(
                        "invalid datetime format '{}'",
                        self.datetime_format
                    ))
                })?;
                Ok(Value::String(rendered))
            }
            other => Ok(other),
        }
    }

    /// Write the value of one attribute to `record`.
    ///
    /// Returns whether anything was written; a missing target is not an error.
    pub fn set_value(
        &self,
        descriptor: &AttributeDescriptor,
        record: &mut dyn Record,
        value: Value,
    ) -> Result<bool> {
        match descriptor.accessor.writer() {
            Writer::Setter(setter) => {
                setter.call(record, value)?;
                Ok(true)
            }
            Writer::Member(member) if record.writes(member) => {
                record.write(member, value)?;
                Ok(true)
            }
            Writer::Member(_) => Ok(false),
        }
    }

    /// Serialize `record` to values in descriptor order.
    pub fn to_sequence<D>(&self, record: &dyn Record, descriptors: &D) -> Result<Vec<Value>>
    where
        D: DescriptorSource + ?Sized,
    {
        descriptors
            .descriptors()
            .filter(|d| d.included)
            .map(|d| self.value_for(d, record))
            .collect()
    }

    /// Serialize `record` to values keyed by attribute name.
    pub fn to_mapping<D>(&self, record: &dyn Record, descriptors: &D) -> Result<IndexMap<String, Value>>
    where
        D: DescriptorSource + ?Sized,
    {
        descriptors
            .descriptors()
            .filter(|d| d.included)
            .map(|d| Ok((d.name.clone(), self.value_for(d, record)?)))
            .collect()
    }

    /// Apply a keyed payload of values to `record`.
    ///
    /// Only descriptors named in `values` are written; payload keys without a
    /// descriptor are ignored. Returns the number of attributes written.
    pub fn update_from_mapping<D>(
        &self,
        record: &mut dyn Record,
        descriptors: &D,
        values: &IndexMap<String, Value>,
    ) -> Result<usize>
    where
        D: DescriptorSource + ?Sized,
    {
        let mut written = 0;
        for descriptor in descriptors.descriptors() {
            if let Some(value) = values.get(&descriptor.name) {
                if self.set_value(descriptor, record, value.clone())? {
                    written += 1;
                }
            }
        }
        Ok(written)
    }
}
