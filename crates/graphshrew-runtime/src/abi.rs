//! Typed reads and writes of guest objects in linear memory
//!
//! [`Abi`] knows the in-memory layout of every object the mapping module
//! exchanges with its host. All multi-byte words are little-endian `u32`
//! pointers or lengths; `0` is the null pointer. Objects written by the host
//! are allocated through the guest's own allocator export and are never
//! freed.
//!
//! | object       | size | layout                                                  |
//! |--------------|------|---------------------------------------------------------|
//! | String       | 4+2n | `[len_utf16][utf16le units]`                            |
//! | ArrayBuffer  | 8+n  | `[byte_len][pad][bytes]`                                |
//! | Uint8Array   | 12   | `[buffer][byte_offset][byte_len]`                       |
//! | Array        | 8    | `[buffer][len]`, buffer holds `len` element pointers    |
//! | tagged value | 16   | `[kind][pad][payload: i64]`                             |
//! | Event        | 28   | address logIndex txLogIndex logType block tx params    |
//! | Block        | 56   | 7 hashes/addresses then 7 integers, `size` nullable     |
//! | Transaction  | 32   | hash index from to value gasUsed gasPrice input         |
//! | EventParam   | 8    | `[name][value]`                                         |
//! | Entity       | 4    | `[entries]`, an array of 8-byte `[name][value]` entries  |
//! | Call         | 20   | contractName contractAddress functionName signature params |

use anyhow::Context;
use graphshrew_support::entity::{Entity, Entry, StoreValue, StoreValueKind};
use graphshrew_support::error::{Error, Result};
use graphshrew_support::ethereum::{
    Address, Block, Call, Event, EventParam, Hash, Transaction, Value, ValueKind,
};
use graphshrew_support::int;
use num_bigint::BigInt;
use wasmtime::{AsContext, AsContextMut, Memory, TypedFunc};

pub type Pointer = u32;

/// Largest single allocation the guest allocator accepts.
pub const MAX_ALLOCATION: usize = 0x8000_0000;

const WORD: u32 = 4;
const TAGGED_VALUE_SIZE: usize = 16;
const EVENT_SIZE: usize = 28;
const BLOCK_SIZE: usize = 56;
const TRANSACTION_SIZE: usize = 32;
const EVENT_PARAM_SIZE: usize = 8;
const ENTITY_SIZE: usize = 4;
const ENTRY_SIZE: usize = 8;
const CALL_SIZE: usize = 20;

/// Size actually requested from the guest allocator for an object of
/// `size` bytes: the arena allocator only hands out powers of two.
pub fn allocation_size(size: usize) -> Result<u32> {
    if size == 0 || size > MAX_ALLOCATION {
        return Err(Error::InvalidAllocation(size));
    }
    u32::try_from(size.next_power_of_two()).map_err(|_| Error::InvalidAllocation(size))
}

fn at(ptr: Pointer, offset: u32) -> Result<Pointer> {
    ptr.checked_add(offset)
        .ok_or_else(|| Error::Memory(format!("pointer {:#x} + {} overflows", ptr, offset)))
}

fn non_null(ptr: Pointer, what: &'static str) -> Result<Pointer> {
    if ptr == 0 {
        Err(Error::NullPointer(what))
    } else {
        Ok(ptr)
    }
}

fn decode_bool(payload: i64) -> Result<bool> {
    match payload {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(Error::InvalidBool(payload)),
    }
}

fn fixed<const N: usize>(bytes: Vec<u8>, what: &'static str) -> Result<[u8; N]> {
    let len = bytes.len();
    bytes
        .try_into()
        .map_err(|_| Error::Memory(format!("{} must be {} bytes, got {}", what, N, len)))
}

/// Codec bound to one instance's exported memory and allocator.
#[derive(Clone)]
pub struct Abi {
    memory: Memory,
    allocator: TypedFunc<u32, u32>,
}

impl Abi {
    pub fn new(memory: Memory, allocator: TypedFunc<u32, u32>) -> Self {
        Abi { memory, allocator }
    }

    pub fn memory(&self) -> Memory {
        self.memory
    }

    /// Allocate `size` bytes in guest memory.
    pub fn allocate<S: AsContextMut>(&self, store: &mut S, size: usize) -> Result<Pointer> {
        let request = allocation_size(size)?;
        let ptr = self
            .allocator
            .call(&mut *store, request)
            .with_context(|| format!("guest allocation of {} bytes", request))?;
        Ok(ptr)
    }

    fn read_into<S: AsContext>(&self, store: &S, ptr: Pointer, buf: &mut [u8]) -> Result<()> {
        let len = buf.len();
        self.memory
            .read(store, ptr as usize, buf)
            .map_err(|e| Error::Memory(format!("reading {} bytes at {:#x}: {}", len, ptr, e)))
    }

    fn write_from<S: AsContextMut>(&self, store: &mut S, ptr: Pointer, buf: &[u8]) -> Result<()> {
        self.memory
            .write(&mut *store, ptr as usize, buf)
            .map_err(|e| Error::Memory(format!("writing {} bytes at {:#x}: {}", buf.len(), ptr, e)))
    }

    /// Copy `len` bytes at `ptr`; the range is checked against the current
    /// memory size before anything is allocated.
    pub fn read_raw<S: AsContext>(&self, store: &S, ptr: Pointer, len: usize) -> Result<Vec<u8>> {
        let data = self.memory.data(store.as_context());
        let start = ptr as usize;
        start
            .checked_add(len)
            .and_then(|end| data.get(start..end))
            .map(<[u8]>::to_vec)
            .ok_or_else(|| {
                Error::Memory(format!(
                    "reading {} bytes at {:#x}: outside guest memory of {} bytes",
                    len,
                    ptr,
                    data.len()
                ))
            })
    }

    pub fn read_word<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_into(store, ptr, &mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    fn read_field<S: AsContext>(&self, store: &S, ptr: Pointer, offset: u32) -> Result<u32> {
        self.read_word(store, at(ptr, offset)?)
    }

    fn read_i64<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<i64> {
        let mut buf = [0u8; 8];
        self.read_into(store, ptr, &mut buf)?;
        Ok(i64::from_le_bytes(buf))
    }

    pub fn write_word<S: AsContextMut>(&self, store: &mut S, ptr: Pointer, value: u32) -> Result<()> {
        self.write_from(store, ptr, &value.to_le_bytes())
    }

    fn write_fields<S: AsContextMut>(&self, store: &mut S, ptr: Pointer, words: &[u32]) -> Result<()> {
        let bytes: Vec<u8> = words.iter().flat_map(|word| word.to_le_bytes()).collect();
        self.write_from(store, ptr, &bytes)
    }

    // strings

    pub fn read_string<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<String> {
        let ptr = non_null(ptr, "string")?;
        let len = self.read_word(store, ptr)? as usize;
        let bytes = self.read_raw(store, at(ptr, WORD)?, len.saturating_mul(2))?;
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|unit| u16::from_le_bytes([unit[0], unit[1]]))
            .collect();
        Ok(String::from_utf16_lossy(&units))
    }

    pub fn read_optional_string<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<Option<String>> {
        if ptr == 0 {
            return Ok(None);
        }
        self.read_string(store, ptr).map(Some)
    }

    pub fn write_string<S: AsContextMut>(&self, store: &mut S, value: &str) -> Result<Pointer> {
        let units: Vec<u16> = value.encode_utf16().collect();
        let mut bytes = Vec::with_capacity(4 + units.len() * 2);
        bytes.extend_from_slice(&(units.len() as u32).to_le_bytes());
        bytes.extend(units.iter().flat_map(|unit| unit.to_le_bytes()));

        let ptr = self.allocate(store, bytes.len())?;
        self.write_from(store, ptr, &bytes)?;
        Ok(ptr)
    }

    // buffers and byte views

    pub fn read_array_buffer<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<Vec<u8>> {
        let ptr = non_null(ptr, "ArrayBuffer")?;
        let len = self.read_word(store, ptr)? as usize;
        self.read_raw(store, at(ptr, 2 * WORD)?, len)
    }

    pub fn write_array_buffer<S: AsContextMut>(&self, store: &mut S, value: &[u8]) -> Result<Pointer> {
        let ptr = self.allocate(store, 8 + value.len())?;
        self.write_fields(store, ptr, &[value.len() as u32, 0])?;
        self.write_from(store, at(ptr, 2 * WORD)?, value)?;
        Ok(ptr)
    }

    pub fn read_bytes<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<Vec<u8>> {
        let ptr = non_null(ptr, "Uint8Array")?;
        let buffer = non_null(self.read_word(store, ptr)?, "Uint8Array buffer")?;
        let offset = self.read_field(store, ptr, WORD)?;
        let len = self.read_field(store, ptr, 2 * WORD)?;
        let buffer_len = self.read_word(store, buffer)?;
        if offset as u64 + len as u64 > buffer_len as u64 {
            return Err(Error::Memory(format!(
                "Uint8Array view {}..{} outside buffer of {} bytes",
                offset,
                offset as u64 + len as u64,
                buffer_len
            )));
        }
        self.read_raw(store, at(at(buffer, 2 * WORD)?, offset)?, len as usize)
    }

    pub fn write_bytes<S: AsContextMut>(&self, store: &mut S, value: &[u8]) -> Result<Pointer> {
        let buffer = self.write_array_buffer(store, value)?;
        let ptr = self.allocate(store, 12)?;
        self.write_fields(store, ptr, &[buffer, 0, value.len() as u32])?;
        Ok(ptr)
    }

    pub fn read_address<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<Address> {
        fixed(self.read_bytes(store, ptr)?, "address")
    }

    pub fn read_hash<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<Hash> {
        fixed(self.read_bytes(store, ptr)?, "hash")
    }

    // integers

    pub fn read_big_int<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<BigInt> {
        let ptr = non_null(ptr, "BigInt")?;
        Ok(int::from_bytes_le(&self.read_bytes(store, ptr)?))
    }

    pub fn read_optional_big_int<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<Option<BigInt>> {
        if ptr == 0 {
            return Ok(None);
        }
        self.read_big_int(store, ptr).map(Some)
    }

    pub fn write_big_int<S: AsContextMut>(&self, store: &mut S, value: &BigInt) -> Result<Pointer> {
        self.write_bytes(store, &int::to_bytes_le(value))
    }

    // arrays

    /// Read an `Array<T>` whose elements are pointers decoded by `reader`.
    pub fn read_array<S, T, F>(&self, store: &S, ptr: Pointer, mut reader: F) -> Result<Vec<T>>
    where
        S: AsContext,
        F: FnMut(&S, Pointer) -> Result<T>,
    {
        let ptr = non_null(ptr, "array")?;
        let len = self.read_field(store, ptr, WORD)? as usize;
        if len == 0 {
            return Ok(Vec::new());
        }

        let buffer = non_null(self.read_word(store, ptr)?, "array buffer")?;
        let buffer_len = self.read_word(store, buffer)? as usize;
        if buffer_len < len.saturating_mul(4) {
            return Err(Error::Memory(format!(
                "array of {} elements has a buffer of only {} bytes",
                len, buffer_len
            )));
        }
        let ptrs = self.read_raw(store, at(buffer, 2 * WORD)?, len.saturating_mul(4))?;
        ptrs.chunks_exact(4)
            .map(|word| reader(store, u32::from_le_bytes([word[0], word[1], word[2], word[3]])))
            .collect()
    }

    pub fn write_array<S, T, F>(&self, store: &mut S, values: &[T], mut writer: F) -> Result<Pointer>
    where
        S: AsContextMut,
        F: FnMut(&mut S, &T) -> Result<Pointer>,
    {
        let mut ptrs = Vec::with_capacity(values.len() * 4);
        for value in values {
            ptrs.extend_from_slice(&writer(store, value)?.to_le_bytes());
        }
        let buffer = self.write_array_buffer(store, &ptrs)?;
        let ptr = self.allocate(store, 8)?;
        self.write_fields(store, ptr, &[buffer, values.len() as u32])?;
        Ok(ptr)
    }

    // ethereum values

    pub fn read_ethereum_value<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<Value> {
        let ptr = non_null(ptr, "ethereum value")?;
        let kind = ValueKind::try_from(self.read_word(store, ptr)?)?;
        let payload = self.read_i64(store, at(ptr, 2 * WORD)?)?;
        let payload_ptr = payload as Pointer;
        Ok(match kind {
            ValueKind::Address => Value::Address(self.read_address(store, payload_ptr)?),
            ValueKind::FixedBytes => Value::FixedBytes(self.read_bytes(store, payload_ptr)?),
            ValueKind::Bytes => Value::Bytes(self.read_bytes(store, payload_ptr)?),
            ValueKind::Int => Value::Int(self.read_big_int(store, payload_ptr)?),
            ValueKind::Uint => Value::Uint(self.read_big_int(store, payload_ptr)?),
            ValueKind::Bool => Value::Bool(decode_bool(payload)?),
            ValueKind::String => Value::String(self.read_string(store, payload_ptr)?),
            ValueKind::FixedArray => Value::FixedArray(self.read_ethereum_values(store, payload_ptr)?),
            ValueKind::Array => Value::Array(self.read_ethereum_values(store, payload_ptr)?),
            ValueKind::Tuple => Value::Tuple(self.read_ethereum_values(store, payload_ptr)?),
        })
    }

    pub fn read_ethereum_values<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<Vec<Value>> {
        self.read_array(store, ptr, |store, ptr| self.read_ethereum_value(store, ptr))
    }

    pub fn write_ethereum_value<S: AsContextMut>(&self, store: &mut S, value: &Value) -> Result<Pointer> {
        let payload = match value {
            Value::Address(bytes) => self.write_bytes(store, bytes)? as i64,
            Value::FixedBytes(bytes) | Value::Bytes(bytes) => self.write_bytes(store, bytes)? as i64,
            Value::Int(value) | Value::Uint(value) => self.write_big_int(store, value)? as i64,
            Value::Bool(value) => *value as i64,
            Value::String(value) => self.write_string(store, value)? as i64,
            Value::FixedArray(values) | Value::Array(values) | Value::Tuple(values) => {
                self.write_ethereum_values(store, values)? as i64
            }
        };
        self.write_tagged(store, value.kind() as u32, payload)
    }

    pub fn write_ethereum_values<S: AsContextMut>(&self, store: &mut S, values: &[Value]) -> Result<Pointer> {
        self.write_array(store, values, |store, value| self.write_ethereum_value(store, value))
    }

    fn write_tagged<S: AsContextMut>(&self, store: &mut S, kind: u32, payload: i64) -> Result<Pointer> {
        let mut bytes = [0u8; TAGGED_VALUE_SIZE];
        bytes[..4].copy_from_slice(&kind.to_le_bytes());
        bytes[8..].copy_from_slice(&payload.to_le_bytes());
        let ptr = self.allocate(store, TAGGED_VALUE_SIZE)?;
        self.write_from(store, ptr, &bytes)?;
        Ok(ptr)
    }

    // events

    pub fn write_event<S: AsContextMut>(&self, store: &mut S, event: &Event) -> Result<Pointer> {
        let block = self.write_block(store, &event.block)?;
        let transaction = self.write_transaction(store, &event.transaction)?;
        let parameters = self.write_array(store, &event.parameters, |store, param| {
            let name = self.write_string(store, &param.name)?;
            let value = self.write_ethereum_value(store, &param.value)?;
            let ptr = self.allocate(store, EVENT_PARAM_SIZE)?;
            self.write_fields(store, ptr, &[name, value])?;
            Ok(ptr)
        })?;

        let fields = [
            self.write_bytes(store, &event.address)?,
            self.write_big_int(store, &event.log_index)?,
            self.write_big_int(store, &event.transaction_log_index)?,
            match &event.log_type {
                Some(log_type) => self.write_string(store, log_type)?,
                None => 0,
            },
            block,
            transaction,
            parameters,
        ];
        let ptr = self.allocate(store, EVENT_SIZE)?;
        self.write_fields(store, ptr, &fields)?;
        Ok(ptr)
    }

    fn write_block<S: AsContextMut>(&self, store: &mut S, block: &Block) -> Result<Pointer> {
        let fields = [
            self.write_bytes(store, &block.hash)?,
            self.write_bytes(store, &block.parent_hash)?,
            self.write_bytes(store, &block.uncles_hash)?,
            self.write_bytes(store, &block.author)?,
            self.write_bytes(store, &block.state_root)?,
            self.write_bytes(store, &block.transactions_root)?,
            self.write_bytes(store, &block.receipts_root)?,
            self.write_big_int(store, &block.number)?,
            self.write_big_int(store, &block.gas_used)?,
            self.write_big_int(store, &block.gas_limit)?,
            self.write_big_int(store, &block.timestamp)?,
            self.write_big_int(store, &block.difficulty)?,
            self.write_big_int(store, &block.total_difficulty)?,
            match &block.size {
                Some(size) => self.write_big_int(store, size)?,
                None => 0,
            },
        ];
        let ptr = self.allocate(store, BLOCK_SIZE)?;
        self.write_fields(store, ptr, &fields)?;
        Ok(ptr)
    }

    fn write_transaction<S: AsContextMut>(&self, store: &mut S, tx: &Transaction) -> Result<Pointer> {
        let fields = [
            self.write_bytes(store, &tx.hash)?,
            self.write_big_int(store, &tx.index)?,
            self.write_bytes(store, &tx.from)?,
            match &tx.to {
                Some(to) => self.write_bytes(store, to)?,
                None => 0,
            },
            self.write_big_int(store, &tx.value)?,
            self.write_big_int(store, &tx.gas_used)?,
            self.write_big_int(store, &tx.gas_price)?,
            self.write_bytes(store, &tx.input)?,
        ];
        let ptr = self.allocate(store, TRANSACTION_SIZE)?;
        self.write_fields(store, ptr, &fields)?;
        Ok(ptr)
    }

    pub fn read_event<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<Event> {
        let ptr = non_null(ptr, "event")?;
        let words = self.read_words::<_, 7>(store, ptr)?;
        let parameters = self.read_array(store, words[6], |store, ptr| {
            let [name, value] = self.read_words::<_, 2>(store, non_null(ptr, "event parameter")?)?;
            Ok(EventParam {
                name: self.read_string(store, name)?,
                value: self.read_ethereum_value(store, value)?,
            })
        })?;
        Ok(Event {
            address: self.read_address(store, words[0])?,
            log_index: self.read_big_int(store, words[1])?,
            transaction_log_index: self.read_big_int(store, words[2])?,
            log_type: self.read_optional_string(store, words[3])?,
            block: self.read_block(store, words[4])?,
            transaction: self.read_transaction(store, words[5])?,
            parameters,
        })
    }

    fn read_block<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<Block> {
        let w = self.read_words::<_, 14>(store, non_null(ptr, "block")?)?;
        Ok(Block {
            hash: self.read_hash(store, w[0])?,
            parent_hash: self.read_hash(store, w[1])?,
            uncles_hash: self.read_hash(store, w[2])?,
            author: self.read_address(store, w[3])?,
            state_root: self.read_hash(store, w[4])?,
            transactions_root: self.read_hash(store, w[5])?,
            receipts_root: self.read_hash(store, w[6])?,
            number: self.read_big_int(store, w[7])?,
            gas_used: self.read_big_int(store, w[8])?,
            gas_limit: self.read_big_int(store, w[9])?,
            timestamp: self.read_big_int(store, w[10])?,
            difficulty: self.read_big_int(store, w[11])?,
            total_difficulty: self.read_big_int(store, w[12])?,
            size: self.read_optional_big_int(store, w[13])?,
        })
    }

    fn read_transaction<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<Transaction> {
        let w = self.read_words::<_, 8>(store, non_null(ptr, "transaction")?)?;
        Ok(Transaction {
            hash: self.read_hash(store, w[0])?,
            index: self.read_big_int(store, w[1])?,
            from: self.read_address(store, w[2])?,
            to: match w[3] {
                0 => None,
                to => Some(self.read_address(store, to)?),
            },
            value: self.read_big_int(store, w[4])?,
            gas_used: self.read_big_int(store, w[5])?,
            gas_price: self.read_big_int(store, w[6])?,
            input: self.read_bytes(store, w[7])?,
        })
    }

    fn read_words<S: AsContext, const N: usize>(&self, store: &S, ptr: Pointer) -> Result<[u32; N]> {
        let bytes = self.read_raw(store, ptr, N * 4)?;
        let mut words = [0u32; N];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(words)
    }

    // store values and entities

    pub fn read_store_value<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<StoreValue> {
        let ptr = non_null(ptr, "store value")?;
        let kind = StoreValueKind::try_from(self.read_word(store, ptr)?)?;
        let payload = self.read_i64(store, at(ptr, 2 * WORD)?)?;
        let payload_ptr = payload as Pointer;
        Ok(match kind {
            StoreValueKind::String => StoreValue::String(self.read_string(store, payload_ptr)?),
            StoreValueKind::Int => StoreValue::Int(payload as i32),
            StoreValueKind::BigDecimal => return Err(Error::Unsupported("big decimal")),
            StoreValueKind::Bool => StoreValue::Bool(decode_bool(payload)?),
            StoreValueKind::Array => StoreValue::Array(self.read_array(store, payload_ptr, |store, ptr| {
                self.read_store_value(store, ptr)
            })?),
            StoreValueKind::Null => StoreValue::Null,
            StoreValueKind::Bytes => StoreValue::Bytes(self.read_bytes(store, payload_ptr)?),
            StoreValueKind::BigInt => StoreValue::BigInt(self.read_big_int(store, payload_ptr)?),
        })
    }

    pub fn write_store_value<S: AsContextMut>(&self, store: &mut S, value: &StoreValue) -> Result<Pointer> {
        let payload = match value {
            StoreValue::String(value) => self.write_string(store, value)? as i64,
            StoreValue::Int(value) => i64::from(*value),
            StoreValue::Bool(value) => *value as i64,
            StoreValue::Array(values) => self.write_array(store, values, |store, value| {
                self.write_store_value(store, value)
            })? as i64,
            StoreValue::Null => 0,
            StoreValue::Bytes(bytes) => self.write_bytes(store, bytes)? as i64,
            StoreValue::BigInt(value) => self.write_big_int(store, value)? as i64,
        };
        self.write_tagged(store, value.kind() as u32, payload)
    }

    pub fn read_entity<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<Entity> {
        let ptr = non_null(ptr, "entity")?;
        let entries = self.read_array(store, self.read_word(store, ptr)?, |store, ptr| {
            let [name, value] = self.read_words::<_, 2>(store, non_null(ptr, "entity entry")?)?;
            Ok(Entry {
                name: self.read_string(store, name)?,
                value: self.read_store_value(store, value)?,
            })
        })?;
        Entity::from_entries(entries)
    }

    pub fn write_entity<S: AsContextMut>(&self, store: &mut S, entity: &Entity) -> Result<Pointer> {
        let entries = self.write_array(store, entity.entries(), |store, entry| {
            let name = self.write_string(store, &entry.name)?;
            let value = self.write_store_value(store, &entry.value)?;
            let ptr = self.allocate(store, ENTRY_SIZE)?;
            self.write_fields(store, ptr, &[name, value])?;
            Ok(ptr)
        })?;
        let ptr = self.allocate(store, ENTITY_SIZE)?;
        self.write_word(store, ptr, entries)?;
        Ok(ptr)
    }

    // calls

    pub fn read_call<S: AsContext>(&self, store: &S, ptr: Pointer) -> Result<Call> {
        let w = self.read_words::<_, 5>(store, non_null(ptr, "call")?)?;
        Ok(Call {
            contract_name: self.read_string(store, w[0])?,
            contract_address: self.read_address(store, w[1])?,
            function_name: self.read_string(store, w[2])?,
            function_signature: self.read_string(store, w[3])?,
            function_params: self.read_ethereum_values(store, w[4])?,
        })
    }

    pub fn write_call<S: AsContextMut>(&self, store: &mut S, call: &Call) -> Result<Pointer> {
        let fields = [
            self.write_string(store, &call.contract_name)?,
            self.write_bytes(store, &call.contract_address)?,
            self.write_string(store, &call.function_name)?,
            self.write_string(store, &call.function_signature)?,
            self.write_ethereum_values(store, &call.function_params)?,
        ];
        let ptr = self.allocate(store, CALL_SIZE)?;
        self.write_fields(store, ptr, &fields)?;
        Ok(ptr)
    }
}
