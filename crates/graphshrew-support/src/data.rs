//! Plain native records used by tests to describe events and entities

use std::collections::BTreeMap;

use num_bigint::BigInt;

/// A native field value, independent of how it is tagged in guest memory.
///
/// Byte fields are carried as `0x`-prefixed hex strings. The host always
/// produces lowercase digits; equality ignores the case of hex digits so a
/// record built with either case equals what is read back.
#[derive(Debug, Clone, Eq)]
pub enum Data {
    String(String),
    Int(i32),
    Bool(bool),
    BigInt(BigInt),
    Bytes(String),
    Null,
    Array(Vec<Data>),
}

pub type Record = BTreeMap<String, Data>;

impl PartialEq for Data {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Data::String(a), Data::String(b)) => a == b,
            (Data::Int(a), Data::Int(b)) => a == b,
            (Data::Bool(a), Data::Bool(b)) => a == b,
            (Data::BigInt(a), Data::BigInt(b)) => a == b,
            (Data::Bytes(a), Data::Bytes(b)) => a.eq_ignore_ascii_case(b),
            (Data::Null, Data::Null) => true,
            (Data::Array(a), Data::Array(b)) => a == b,
            _ => false,
        }
    }
}

impl Data {
    /// A bytes value from a hex string; the digits are lowercased.
    pub fn bytes(hex: impl AsRef<str>) -> Self {
        Data::Bytes(hex.as_ref().to_ascii_lowercase())
    }

    pub fn big(value: impl Into<BigInt>) -> Self {
        Data::BigInt(value.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Data::String(_) => "String",
            Data::Int(_) => "Int",
            Data::Bool(_) => "Bool",
            Data::BigInt(_) => "BigInt",
            Data::Bytes(_) => "Bytes",
            Data::Null => "Null",
            Data::Array(_) => "Array",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Data::String(value) | Data::Bytes(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_big_int(&self) -> Option<BigInt> {
        match self {
            Data::BigInt(value) => Some(value.clone()),
            Data::Int(value) => Some(BigInt::from(*value)),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Data::Null)
    }
}

impl From<i32> for Data {
    fn from(value: i32) -> Self {
        Data::Int(value)
    }
}

impl From<bool> for Data {
    fn from(value: bool) -> Self {
        Data::Bool(value)
    }
}

impl From<&str> for Data {
    fn from(value: &str) -> Self {
        Data::String(value.to_string())
    }
}

impl From<String> for Data {
    fn from(value: String) -> Self {
        Data::String(value)
    }
}

impl From<BigInt> for Data {
    fn from(value: BigInt) -> Self {
        Data::BigInt(value)
    }
}

impl From<i64> for Data {
    fn from(value: i64) -> Self {
        Data::BigInt(BigInt::from(value))
    }
}

impl From<u64> for Data {
    fn from(value: u64) -> Self {
        Data::BigInt(BigInt::from(value))
    }
}

impl<T: Into<Data>> From<Option<T>> for Data {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Data::Null)
    }
}

impl<T: Into<Data>> From<Vec<T>> for Data {
    fn from(values: Vec<T>) -> Self {
        Data::Array(values.into_iter().map(Into::into).collect())
    }
}
