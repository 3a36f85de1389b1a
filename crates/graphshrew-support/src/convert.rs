//! Hex conversions for addresses, hashes and raw bytes

use crate::error::{Error, Result};
use crate::ethereum::{Address, Hash};

/// Format bytes as `0x`-prefixed lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Parse a `0x`-prefixed hex string of any even length.
pub fn from_hex(value: &str) -> Result<Vec<u8>> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| Error::InvalidHex(value.to_string()))?;
    hex::decode(digits).map_err(|_| Error::InvalidHex(value.to_string()))
}

fn fixed_length_hex<const N: usize>(value: &str) -> Result<[u8; N]> {
    let invalid = || Error::InvalidFixedHex {
        len: N,
        value: value.to_string(),
    };
    if value.len() != N * 2 + 2 {
        return Err(invalid());
    }
    let bytes = from_hex(value).map_err(|_| invalid())?;
    bytes.try_into().map_err(|_| invalid())
}

/// Parse a 20-byte address from `0x` + 40 hex digits.
pub fn addr_to_bytes(value: &str) -> Result<Address> {
    fixed_length_hex::<20>(value)
}

/// Parse a 32-byte hash from `0x` + 64 hex digits.
pub fn hash_to_bytes(value: &str) -> Result<Hash> {
    fixed_length_hex::<32>(value)
}
