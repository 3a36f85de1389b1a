//! Coercion between store entities and native records

use crate::convert::{from_hex, to_hex};
use crate::data::{Data, Record};
use crate::definition::{EntityDefinition, EntityKind};
use crate::entity::{Entity, Entry, StoreValue, StoreValueKind};
use crate::error::{Error, Result};

/// Convert an entity read from the store into a record shaped by `definition`.
///
/// Every defined field must have an entry of the defined kind, and the
/// entity may not carry entries the definition does not name. Byte values
/// become lowercase `0x` hex strings.
pub fn to_data(definition: &EntityDefinition, entity: &Entity) -> Result<Record> {
    for entry in entity.entries() {
        if definition.kind_of(&entry.name).is_none() {
            return Err(Error::UnexpectedEntry(entry.name.clone()));
        }
    }

    let mut record = Record::new();
    for (name, kind) in &definition.fields {
        let value = entity
            .get(name)
            .ok_or_else(|| Error::MissingEntry(name.clone()))?;
        record.insert(name.clone(), coerce_from_value(value, kind)?);
    }
    Ok(record)
}

/// Convert a record into an entity, with entries in definition order.
pub fn from_data(definition: &EntityDefinition, record: &Record) -> Result<Entity> {
    for name in record.keys() {
        if definition.kind_of(name).is_none() {
            return Err(Error::UnexpectedField(name.clone()));
        }
    }

    let mut entity = Entity::new();
    for (name, kind) in &definition.fields {
        let data = record
            .get(name)
            .ok_or_else(|| Error::MissingField(name.clone()))?;
        entity.push(Entry::new(name.clone(), coerce_to_value(data, kind)?))?;
    }
    Ok(entity)
}

fn mismatch(expected: &EntityKind, actual: impl ToString) -> Error {
    Error::KindMismatch {
        expected: format!("{} store", expected),
        actual: actual.to_string(),
    }
}

fn coerce_from_value(value: &StoreValue, kind: &EntityKind) -> Result<Data> {
    match kind {
        EntityKind::Optional(inner) => match value {
            StoreValue::Null => Ok(Data::Null),
            _ => coerce_from_value(value, inner),
        },
        EntityKind::Array(inner) => match value {
            StoreValue::Array(values) => Ok(Data::Array(
                values
                    .iter()
                    .map(|value| coerce_from_value(value, inner))
                    .collect::<Result<Vec<_>>>()?,
            )),
            _ => Err(mismatch(kind, value.kind())),
        },
        EntityKind::Value(expected) => {
            check_scalar_kind(*expected)?;
            if value.kind() != *expected {
                return Err(mismatch(kind, value.kind()));
            }
            Ok(match value {
                StoreValue::String(value) => Data::String(value.clone()),
                StoreValue::Int(value) => Data::Int(*value),
                StoreValue::Bool(value) => Data::Bool(*value),
                StoreValue::Null => Data::Null,
                StoreValue::Bytes(bytes) => Data::Bytes(to_hex(bytes)),
                StoreValue::BigInt(value) => Data::BigInt(value.clone()),
                StoreValue::Array(_) => return Err(mismatch(kind, value.kind())),
            })
        }
    }
}

fn coerce_to_value(data: &Data, kind: &EntityKind) -> Result<StoreValue> {
    match kind {
        EntityKind::Optional(inner) => match data {
            Data::Null => Ok(StoreValue::Null),
            _ => coerce_to_value(data, inner),
        },
        EntityKind::Array(inner) => match data {
            Data::Array(items) => Ok(StoreValue::Array(
                items
                    .iter()
                    .map(|item| coerce_to_value(item, inner))
                    .collect::<Result<Vec<_>>>()?,
            )),
            _ => Err(mismatch(kind, data.type_name())),
        },
        EntityKind::Value(expected) => {
            check_scalar_kind(*expected)?;
            Ok(match (expected, data) {
                (StoreValueKind::String, Data::String(value)) => StoreValue::String(value.clone()),
                (StoreValueKind::Int, Data::Int(value)) => StoreValue::Int(*value),
                (StoreValueKind::Bool, Data::Bool(value)) => StoreValue::Bool(*value),
                (StoreValueKind::Null, Data::Null) => StoreValue::Null,
                (StoreValueKind::Bytes, Data::Bytes(hex)) => StoreValue::Bytes(from_hex(hex)?),
                (StoreValueKind::BigInt, Data::BigInt(value)) => StoreValue::BigInt(value.clone()),
                _ => return Err(mismatch(kind, data.type_name())),
            })
        }
    }
}

/// Arrays need an element kind and big decimals have no representation.
fn check_scalar_kind(kind: StoreValueKind) -> Result<()> {
    match kind {
        StoreValueKind::BigDecimal => Err(Error::Unsupported("big decimal")),
        StoreValueKind::Array => Err(Error::InvalidDefinition(
            "Array without element kind".to_string(),
        )),
        _ => Ok(()),
    }
}
