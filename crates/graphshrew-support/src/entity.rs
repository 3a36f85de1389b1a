//! Store values and entities as exchanged through `store.get`/`store.set`

use std::fmt;

use num_bigint::BigInt;

use crate::error::{Error, Result};

#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreValueKind {
    String = 0,
    Int = 1,
    BigDecimal = 2,
    Bool = 3,
    Array = 4,
    Null = 5,
    Bytes = 6,
    BigInt = 7,
}

impl TryFrom<u32> for StoreValueKind {
    type Error = Error;

    fn try_from(discriminant: u32) -> Result<Self> {
        Ok(match discriminant {
            0 => StoreValueKind::String,
            1 => StoreValueKind::Int,
            2 => StoreValueKind::BigDecimal,
            3 => StoreValueKind::Bool,
            4 => StoreValueKind::Array,
            5 => StoreValueKind::Null,
            6 => StoreValueKind::Bytes,
            7 => StoreValueKind::BigInt,
            _ => {
                return Err(Error::InvalidValue {
                    kind: "store",
                    discriminant,
                })
            }
        })
    }
}

impl fmt::Display for StoreValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single entity field value.
///
/// Big decimals have a discriminant but no representation here: every path
/// that would produce or consume one fails with [`Error::Unsupported`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreValue {
    String(String),
    Int(i32),
    Bool(bool),
    Array(Vec<StoreValue>),
    Null,
    Bytes(Vec<u8>),
    BigInt(BigInt),
}

impl StoreValue {
    pub fn kind(&self) -> StoreValueKind {
        match self {
            StoreValue::String(_) => StoreValueKind::String,
            StoreValue::Int(_) => StoreValueKind::Int,
            StoreValue::Bool(_) => StoreValueKind::Bool,
            StoreValue::Array(_) => StoreValueKind::Array,
            StoreValue::Null => StoreValueKind::Null,
            StoreValue::Bytes(_) => StoreValueKind::Bytes,
            StoreValue::BigInt(_) => StoreValueKind::BigInt,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub value: StoreValue,
}

impl Entry {
    pub fn new(name: impl Into<String>, value: StoreValue) -> Self {
        Entry {
            name: name.into(),
            value,
        }
    }
}

/// An ordered collection of uniquely named entries.
///
/// Entry order is kept for encoding but ignored by equality.
#[derive(Debug, Clone, Default)]
pub struct Entity {
    entries: Vec<Entry>,
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an entity from entries, rejecting repeated names.
    pub fn from_entries(entries: Vec<Entry>) -> Result<Self> {
        let mut entity = Entity::new();
        for entry in entries {
            entity.push(entry)?;
        }
        Ok(entity)
    }

    pub fn push(&mut self, entry: Entry) -> Result<()> {
        if self.get(&entry.name).is_some() {
            return Err(Error::DuplicateEntry(entry.name));
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Insert or replace the value for `name`, keeping its position.
    pub fn set(&mut self, name: impl Into<String>, value: StoreValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|entry| entry.name == name) {
            Some(entry) => entry.value = value,
            None => self.entries.push(Entry { name, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&StoreValue> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.value)
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .all(|entry| other.get(&entry.name) == Some(&entry.value))
    }
}

impl Eq for Entity {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_order() {
        let a = Entity::from_entries(vec![
            Entry::new("id", StoreValue::String("1".into())),
            Entry::new("count", StoreValue::Int(3)),
        ])
        .unwrap();
        let b = Entity::from_entries(vec![
            Entry::new("count", StoreValue::Int(3)),
            Entry::new("id", StoreValue::String("1".into())),
        ])
        .unwrap();
        assert_eq!(a, b);

        let mut c = b.clone();
        c.set("count", StoreValue::Int(4));
        assert_ne!(a, c);
        c.set("extra", StoreValue::Null);
        assert_ne!(c, a);
    }

    #[test]
    fn test_duplicate_entry_rejected() {
        let err = Entity::from_entries(vec![
            Entry::new("id", StoreValue::Null),
            Entry::new("id", StoreValue::Bool(true)),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateEntry(name) if name == "id"));
    }

    #[test]
    fn test_set_keeps_position() {
        let mut entity = Entity::new();
        entity.set("a", StoreValue::Int(1));
        entity.set("b", StoreValue::Int(2));
        entity.set("a", StoreValue::Int(3));
        let names: Vec<_> = entity.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "b"]);
        assert_eq!(entity.get("a"), Some(&StoreValue::Int(3)));
    }

    #[test]
    fn test_kind_discriminants() {
        assert_eq!(StoreValueKind::try_from(2).unwrap(), StoreValueKind::BigDecimal);
        assert_eq!(StoreValue::BigInt(BigInt::from(1)).kind() as u32, 7);
        let err = StoreValueKind::try_from(8).unwrap_err();
        assert_eq!(err.to_string(), "invalid store value 8");
    }
}
