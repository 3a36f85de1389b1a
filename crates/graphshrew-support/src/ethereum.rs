//! Ethereum event, block, transaction and call types passed to mappings

use std::fmt;

use num_bigint::BigInt;

use crate::error::{Error, Result};

pub type Address = [u8; 20];
pub type Hash = [u8; 32];

/// Discriminant of an [`Value`] as seen by the guest.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Address = 0,
    FixedBytes = 1,
    Bytes = 2,
    Int = 3,
    Uint = 4,
    Bool = 5,
    String = 6,
    FixedArray = 7,
    Array = 8,
    Tuple = 9,
}

impl ValueKind {
    pub fn is_compound(self) -> bool {
        matches!(self, ValueKind::FixedArray | ValueKind::Array | ValueKind::Tuple)
    }
}

impl TryFrom<u32> for ValueKind {
    type Error = Error;

    fn try_from(discriminant: u32) -> Result<Self> {
        Ok(match discriminant {
            0 => ValueKind::Address,
            1 => ValueKind::FixedBytes,
            2 => ValueKind::Bytes,
            3 => ValueKind::Int,
            4 => ValueKind::Uint,
            5 => ValueKind::Bool,
            6 => ValueKind::String,
            7 => ValueKind::FixedArray,
            8 => ValueKind::Array,
            9 => ValueKind::Tuple,
            _ => {
                return Err(Error::InvalidValue {
                    kind: "ethereum",
                    discriminant,
                })
            }
        })
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A decoded ABI value: an event parameter, call argument or call result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Address(Address),
    FixedBytes(Vec<u8>),
    Bytes(Vec<u8>),
    Int(BigInt),
    Uint(BigInt),
    Bool(bool),
    String(String),
    FixedArray(Vec<Value>),
    Array(Vec<Value>),
    Tuple(Vec<Value>),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Address(_) => ValueKind::Address,
            Value::FixedBytes(_) => ValueKind::FixedBytes,
            Value::Bytes(_) => ValueKind::Bytes,
            Value::Int(_) => ValueKind::Int,
            Value::Uint(_) => ValueKind::Uint,
            Value::Bool(_) => ValueKind::Bool,
            Value::String(_) => ValueKind::String,
            Value::FixedArray(_) => ValueKind::FixedArray,
            Value::Array(_) => ValueKind::Array,
            Value::Tuple(_) => ValueKind::Tuple,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventParam {
    pub name: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub hash: Hash,
    pub parent_hash: Hash,
    pub uncles_hash: Hash,
    pub author: Address,
    pub state_root: Hash,
    pub transactions_root: Hash,
    pub receipts_root: Hash,
    pub number: BigInt,
    pub gas_used: BigInt,
    pub gas_limit: BigInt,
    pub timestamp: BigInt,
    pub difficulty: BigInt,
    pub total_difficulty: BigInt,
    pub size: Option<BigInt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub hash: Hash,
    pub index: BigInt,
    pub from: Address,
    pub to: Option<Address>,
    pub value: BigInt,
    pub gas_used: BigInt,
    pub gas_price: BigInt,
    pub input: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub address: Address,
    pub log_index: BigInt,
    pub transaction_log_index: BigInt,
    pub log_type: Option<String>,
    pub block: Block,
    pub transaction: Transaction,
    pub parameters: Vec<EventParam>,
}

impl Event {
    pub fn parameter(&self, name: &str) -> Option<&Value> {
        self.parameters
            .iter()
            .find(|param| param.name == name)
            .map(|param| &param.value)
    }
}

/// A read-only contract call requested by the guest through `ethereum.call`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub contract_name: String,
    pub contract_address: Address,
    pub function_name: String,
    pub function_signature: String,
    pub function_params: Vec<Value>,
}
