//! Arbitrary-precision integer codec
//!
//! Guest `BigInt` values are byte arrays holding the little-endian two's
//! complement representation of the integer. The host always produces the
//! minimal encoding (zero is the empty array, and a sign byte is only added
//! when the top bit of the magnitude would otherwise be read as the sign),
//! but accepts any encoding the guest hands over, including ones padded with
//! redundant `0x00`/`0xff` bytes.

use num_bigint::{BigInt, Sign};

/// Encode `value` as minimal little-endian two's complement bytes.
pub fn to_bytes_le(value: &BigInt) -> Vec<u8> {
    if value.sign() == Sign::NoSign {
        return Vec::new();
    }
    value.to_signed_bytes_le()
}

/// Decode little-endian two's complement bytes. The high bit of the last
/// byte is the sign; an empty slice is zero.
pub fn from_bytes_le(bytes: &[u8]) -> BigInt {
    if bytes.is_empty() {
        return BigInt::default();
    }
    BigInt::from_signed_bytes_le(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    fn roundtrip(v: BigInt) {
        let bytes = to_bytes_le(&v);
        assert_eq!(from_bytes_le(&bytes), v, "roundtrip of {} via {:02x?}", v, bytes);
    }

    #[test]
    fn test_zero_is_empty() {
        assert!(to_bytes_le(&BigInt::default()).is_empty());
        assert_eq!(from_bytes_le(&[]), BigInt::default());
    }

    #[test]
    fn test_small_values() {
        assert_eq!(to_bytes_le(&BigInt::from(1)), vec![0x01]);
        assert_eq!(to_bytes_le(&BigInt::from(-1)), vec![0xff]);
        assert_eq!(to_bytes_le(&BigInt::from(300)), vec![0x2c, 0x01]);
        assert_eq!(to_bytes_le(&BigInt::from(-300)), vec![0xd4, 0xfe]);
    }

    #[test]
    fn test_sign_extension_byte() {
        // 0x80 alone would read back as -128
        assert_eq!(to_bytes_le(&BigInt::from(128)), vec![0x80, 0x00]);
        assert_eq!(to_bytes_le(&BigInt::from(255)), vec![0xff, 0x00]);
        assert_eq!(to_bytes_le(&BigInt::from(-128)), vec![0x80]);
        assert_eq!(to_bytes_le(&BigInt::from(-129)), vec![0x7f, 0xff]);
        assert_eq!(to_bytes_le(&BigInt::from(127)), vec![0x7f]);
    }

    #[test]
    fn test_redundant_input_bytes() {
        assert_eq!(from_bytes_le(&[0x01, 0x00, 0x00]), BigInt::from(1));
        assert_eq!(from_bytes_le(&[0xff, 0xff, 0xff]), BigInt::from(-1));
        assert_eq!(from_bytes_le(&[0x80, 0xff]), BigInt::from(-128));
    }

    #[test]
    fn test_roundtrip_representative_range() {
        for v in -1024i64..=1024 {
            roundtrip(BigInt::from(v));
        }
        for shift in [7u32, 8, 15, 16, 31, 32, 63, 64, 127, 128, 255, 256, 1000] {
            let p = BigInt::one() << shift;
            roundtrip(p.clone());
            roundtrip(-p.clone());
            roundtrip(p.clone() - 1);
            roundtrip(-(p.clone() - 1i32));
            roundtrip(p + 1);
        }
        roundtrip(BigInt::from(100000u64) * BigInt::from(10u64).pow(18));
        roundtrip(BigInt::from(i64::MIN));
        roundtrip(BigInt::from(u64::MAX));
    }

    #[test]
    fn test_encoding_is_minimal() {
        for v in -70000i64..=70000 {
            let bytes = to_bytes_le(&BigInt::from(v));
            if bytes.len() < 2 {
                continue;
            }
            let last = bytes[bytes.len() - 1];
            let prev = bytes[bytes.len() - 2];
            let redundant = (last == 0x00 && prev & 0x80 == 0) || (last == 0xff && prev & 0x80 != 0);
            assert!(!redundant, "redundant byte in encoding of {}: {:02x?}", v, bytes);
        }
    }
}
