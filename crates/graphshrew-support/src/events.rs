//! Building ethereum events from native records and metadata overrides

use num_bigint::BigInt;

use crate::convert::{addr_to_bytes, from_hex, hash_to_bytes};
use crate::data::{Data, Record};
use crate::definition::{EventDefinition, ParamKind};
use crate::error::{Error, Result};
use crate::ethereum::{Address, Block, Event, EventParam, Hash, Transaction, Value, ValueKind};

pub const ZERO_ADDRESS: Address = [0u8; 20];
pub const ZERO_HASH: Hash = [0u8; 32];

/// Block fields to override; everything left `None` gets a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockMetadata {
    pub hash: Option<Hash>,
    pub parent_hash: Option<Hash>,
    pub uncles_hash: Option<Hash>,
    pub author: Option<Address>,
    pub state_root: Option<Hash>,
    pub transactions_root: Option<Hash>,
    pub receipts_root: Option<Hash>,
    pub number: Option<BigInt>,
    pub gas_used: Option<BigInt>,
    pub gas_limit: Option<BigInt>,
    pub timestamp: Option<BigInt>,
    pub difficulty: Option<BigInt>,
    pub total_difficulty: Option<BigInt>,
    pub size: Option<BigInt>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionMetadata {
    pub hash: Option<Hash>,
    pub index: Option<BigInt>,
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub value: Option<BigInt>,
    pub gas_used: Option<BigInt>,
    pub gas_price: Option<BigInt>,
    pub input: Option<Vec<u8>>,
}

/// Partial event metadata.
///
/// Missing values default to the zero address, the zero hash, zero
/// integers, no block size, no log type and empty input. The transaction
/// log index follows the log index and `transaction.to` follows the event
/// address unless given explicitly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pub address: Option<Address>,
    pub log_index: Option<BigInt>,
    pub transaction_log_index: Option<BigInt>,
    pub log_type: Option<String>,
    pub block: BlockMetadata,
    pub transaction: TransactionMetadata,
}

impl Metadata {
    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn log_index(mut self, index: impl Into<BigInt>) -> Self {
        self.log_index = Some(index.into());
        self
    }

    pub fn timestamp(mut self, timestamp: impl Into<BigInt>) -> Self {
        self.block.timestamp = Some(timestamp.into());
        self
    }

    pub fn block_number(mut self, number: impl Into<BigInt>) -> Self {
        self.block.number = Some(number.into());
        self
    }

    pub fn tx_hash(mut self, hash: Hash) -> Self {
        self.transaction.hash = Some(hash);
        self
    }

    pub fn tx_from(mut self, from: Address) -> Self {
        self.transaction.from = Some(from);
        self
    }

    // hex forms; addresses must be 20 bytes and hashes 32

    pub fn address_hex(self, address: &str) -> Result<Self> {
        Ok(self.address(addr_to_bytes(address)?))
    }

    pub fn tx_hash_hex(self, hash: &str) -> Result<Self> {
        Ok(self.tx_hash(hash_to_bytes(hash)?))
    }

    pub fn tx_from_hex(self, from: &str) -> Result<Self> {
        Ok(self.tx_from(addr_to_bytes(from)?))
    }

    pub fn tx_to_hex(mut self, to: &str) -> Result<Self> {
        self.transaction.to = Some(addr_to_bytes(to)?);
        Ok(self)
    }

    pub fn block_hash_hex(mut self, hash: &str) -> Result<Self> {
        self.block.hash = Some(hash_to_bytes(hash)?);
        Ok(self)
    }

    pub fn parent_hash_hex(mut self, hash: &str) -> Result<Self> {
        self.block.parent_hash = Some(hash_to_bytes(hash)?);
        Ok(self)
    }

    pub fn block_author_hex(mut self, author: &str) -> Result<Self> {
        self.block.author = Some(addr_to_bytes(author)?);
        Ok(self)
    }
}

/// Coerce `record` into event parameters per `definition` and attach
/// metadata, filling in placeholders for everything not overridden.
pub fn to_event(definition: &EventDefinition, record: &Record, metadata: &Metadata) -> Result<Event> {
    for name in record.keys() {
        if !definition.params.iter().any(|(param, _)| param == name) {
            return Err(Error::UnexpectedField(name.clone()));
        }
    }

    let parameters = definition
        .params
        .iter()
        .map(|(name, kind)| {
            let data = record
                .get(name)
                .ok_or_else(|| Error::MissingField(name.clone()))?;
            Ok(EventParam {
                name: name.clone(),
                value: coerce_to_parameter(data, kind)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(new_event(parameters, metadata))
}

fn new_event(parameters: Vec<EventParam>, meta: &Metadata) -> Event {
    let zero = BigInt::default;
    let address = meta.address.unwrap_or(ZERO_ADDRESS);
    let log_index = meta.log_index.clone().unwrap_or_else(zero);
    let block = &meta.block;
    let tx = &meta.transaction;

    Event {
        address,
        transaction_log_index: meta
            .transaction_log_index
            .clone()
            .unwrap_or_else(|| log_index.clone()),
        log_index,
        log_type: meta.log_type.clone(),
        block: Block {
            hash: block.hash.unwrap_or(ZERO_HASH),
            parent_hash: block.parent_hash.unwrap_or(ZERO_HASH),
            uncles_hash: block.uncles_hash.unwrap_or(ZERO_HASH),
            author: block.author.unwrap_or(ZERO_ADDRESS),
            state_root: block.state_root.unwrap_or(ZERO_HASH),
            transactions_root: block.transactions_root.unwrap_or(ZERO_HASH),
            receipts_root: block.receipts_root.unwrap_or(ZERO_HASH),
            number: block.number.clone().unwrap_or_else(zero),
            gas_used: block.gas_used.clone().unwrap_or_else(zero),
            gas_limit: block.gas_limit.clone().unwrap_or_else(zero),
            timestamp: block.timestamp.clone().unwrap_or_else(zero),
            difficulty: block.difficulty.clone().unwrap_or_else(zero),
            total_difficulty: block.total_difficulty.clone().unwrap_or_else(zero),
            size: block.size.clone(),
        },
        transaction: Transaction {
            hash: tx.hash.unwrap_or(ZERO_HASH),
            index: tx.index.clone().unwrap_or_else(zero),
            from: tx.from.unwrap_or(ZERO_ADDRESS),
            to: Some(tx.to.unwrap_or(address)),
            value: tx.value.clone().unwrap_or_else(zero),
            gas_used: tx.gas_used.clone().unwrap_or_else(zero),
            gas_price: tx.gas_price.clone().unwrap_or_else(zero),
            input: tx.input.clone().unwrap_or_default(),
        },
        parameters,
    }
}

fn mismatch(expected: ValueKind, data: &Data) -> Error {
    Error::KindMismatch {
        expected: format!("{} ethereum", expected),
        actual: data.type_name().to_string(),
    }
}

fn coerce_to_parameter(data: &Data, kind: &ParamKind) -> Result<Value> {
    match kind {
        ParamKind::Array(inner) => match data {
            Data::Array(items) => Ok(Value::Array(
                items
                    .iter()
                    .map(|item| coerce_to_parameter(item, inner))
                    .collect::<Result<Vec<_>>>()?,
            )),
            _ => Err(mismatch(ValueKind::Array, data)),
        },
        ParamKind::Tuple(kinds) => match data {
            Data::Array(items) => {
                if items.len() != kinds.len() {
                    return Err(Error::ArityMismatch {
                        expected: kinds.len(),
                        actual: items.len(),
                    });
                }
                Ok(Value::Tuple(
                    items
                        .iter()
                        .zip(kinds)
                        .map(|(item, kind)| coerce_to_parameter(item, kind))
                        .collect::<Result<Vec<_>>>()?,
                ))
            }
            _ => Err(mismatch(ValueKind::Tuple, data)),
        },
        ParamKind::Value(kind) => coerce_scalar(data, *kind),
    }
}

fn coerce_scalar(data: &Data, kind: ValueKind) -> Result<Value> {
    if kind.is_compound() {
        return Err(Error::InvalidDefinition(format!(
            "{} parameter without element kinds",
            kind
        )));
    }
    let hex = || data.as_str().ok_or_else(|| mismatch(kind, data));
    let integer = || data.as_big_int().ok_or_else(|| mismatch(kind, data));
    Ok(match (kind, data) {
        (ValueKind::Address, _) => Value::Address(addr_to_bytes(hex()?)?),
        (ValueKind::FixedBytes, _) => Value::FixedBytes(from_hex(hex()?)?),
        (ValueKind::Bytes, _) => Value::Bytes(from_hex(hex()?)?),
        (ValueKind::Int, _) => Value::Int(integer()?),
        (ValueKind::Uint, _) => Value::Uint(integer()?),
        (ValueKind::Bool, Data::Bool(value)) => Value::Bool(*value),
        (ValueKind::String, Data::String(value)) => Value::String(value.clone()),
        _ => return Err(mismatch(kind, data)),
    })
}
