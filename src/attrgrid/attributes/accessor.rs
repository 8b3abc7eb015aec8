//! Per-descriptor value access.
//!
//! Each descriptor carries a [`ValueAccessor`] decided once, when the
//! descriptor is built: either a custom getter/setter supplied by a
//! declaration, or the record member named after the attribute. Reads and
//! writes then dispatch on that decision instead of probing the record.

use crate::codec::Record;
use crate::error::Result;
use crate::model::Value;
use std::fmt;
use std::sync::Arc;

type GetterFn = dyn Fn(&dyn Record) -> Result<Value> + Send + Sync;
type SetterFn = dyn Fn(&mut dyn Record, Value) -> Result<()> + Send + Sync;

/// A custom read routine for one attribute.
#[derive(Clone)]
pub struct Getter(Arc<GetterFn>);

impl Getter {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&dyn Record) -> Result<Value> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, record: &dyn Record) -> Result<Value> {
        (self.0)(record)
    }
}

impl fmt::Debug for Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Getter(..)")
    }
}

impl PartialEq for Getter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A custom write routine for one attribute.
#[derive(Clone)]
pub struct Setter(Arc<SetterFn>);

impl Setter {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut dyn Record, Value) -> Result<()> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, record: &mut dyn Record, value: Value) -> Result<()> {
        (self.0)(record, value)
    }
}

impl fmt::Debug for Setter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Setter(..)")
    }
}

impl PartialEq for Setter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Reader {
    Getter(Getter),
    Member(String),
    /// Unnamed attribute without a getter; always reads as null
    Nothing,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Writer {
    Setter(Setter),
    Member(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValueAccessor {
    reader: Reader,
    writer: Writer,
}

impl ValueAccessor {
    /// Plain member access by attribute name.
    pub fn member(name: &str) -> Self {
        let reader = if name.is_empty() {
            Reader::Nothing
        } else {
            Reader::Member(name.to_string())
        };
        Self {
            reader,
            writer: Writer::Member(name.to_string()),
        }
    }

    pub fn with_getter(mut self, getter: Getter) -> Self {
        self.reader = Reader::Getter(getter);
        self
    }

    pub fn with_setter(mut self, setter: Setter) -> Self {
        self.writer = Writer::Setter(setter);
        self
    }

    pub fn reader(&self) -> &Reader {
        &self.reader
    }

    pub fn writer(&self) -> &Writer {
        &self.writer
    }

    pub fn has_getter(&self) -> bool {
        matches!(self.reader, Reader::Getter(_))
    }

    pub fn has_setter(&self) -> bool {
        matches!(self.writer, Writer::Setter(_))
    }
}

impl Default for ValueAccessor {
    fn default() -> Self {
        Self::member("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_accessor_reads_and_writes_by_name() {
        let acc = ValueAccessor::member("email");
        assert_eq!(acc.reader(), &Reader::Member("email".into()));
        assert_eq!(acc.writer(), &Writer::Member("email".into()));
        assert!(!acc.has_getter());
        assert!(!acc.has_setter());
    }

    #[test]
    fn empty_name_reads_nothing() {
        assert_eq!(ValueAccessor::member("").reader(), &Reader::Nothing);
    }

    #[test]
    fn getter_replaces_reader_only() {
        let acc = ValueAccessor::member("full_name").with_getter(Getter::new(|_| Ok(Value::Null)));
        assert!(acc.has_getter());
        assert_eq!(acc.writer(), &Writer::Member("full_name".into()));
    }

    #[test]
    fn getters_compare_by_identity() {
        let g = Getter::new(|_| Ok(Value::Null));
        let same = g.clone();
        let other = Getter::new(|_| Ok(Value::Null));
        assert_eq!(g, same);
        assert_ne!(g, other);
    }
}
