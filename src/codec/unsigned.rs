//! Unsigned varint (LEB128-style): 7 payload bits per byte, least
//! significant group first, bit 7 set on every byte except the last.

use num_traits::{AsPrimitive, PrimInt, Unsigned};
use tracing::{debug, trace};

use super::bits::{check_bit, set_bit};
use super::constants::{CONTINUATION_BIT, GROUP_BITS, GROUP_MASK};
use super::error::DecodeError;

/// Fixed-width unsigned integer the codec can carry
pub trait VarUint: PrimInt + Unsigned + From<u8> + AsPrimitive<u8> {
    const BITS: u32;
}

macro_rules! impl_var_uint {
    ($($t:ty),*) => {
        $(
            impl VarUint for $t {
                const BITS: u32 = <$t>::BITS;
            }
        )*
    };
}

impl_var_uint!(u8, u16, u32, u64, u128, usize);

/// Groups needed to hold `bits` bits: `ceil(bits / 7)`
pub const fn groups_for_bits(bits: u32) -> usize {
    ((bits + GROUP_BITS - 1) / GROUP_BITS) as usize
}

/// Most groups a decoder will read for `U`
pub fn max_groups<U: VarUint>() -> usize {
    groups_for_bits(U::BITS)
}

/// Encode `value` and append it to `out`. Returns the number of bytes written.
pub fn encode_unsigned<U: VarUint>(value: U, out: &mut Vec<u8>) -> usize {
    let start = out.len();
    let threshold = <U as From<u8>>::from(0x80);
    let mut value = value;

    while value >= threshold {
        let group: u8 = value.as_();
        out.push(set_bit(group & GROUP_MASK, CONTINUATION_BIT));
        value = value >> GROUP_BITS as usize;
    }
    out.push(value.as_());

    out.len() - start
}

/// Decode one varint starting at `*cursor`, advancing the cursor past it.
///
/// At most [`max_groups`] bytes are consumed. When the last permitted byte
/// still carries the continuation flag, decoding stops there and the bits
/// that do not fit in `U` are dropped. The cursor is left untouched on error.
pub fn decode_unsigned<U: VarUint>(bytes: &[u8], cursor: &mut usize) -> Result<U, DecodeError> {
    let (value, consumed) = read_groups::<U>(bytes, *cursor, max_groups::<U>())?;
    *cursor += consumed;
    Ok(value)
}

/// Number of bytes `encode_unsigned(value)` produces
pub fn encoded_len_unsigned<U: VarUint>(value: U) -> usize {
    let significant = U::BITS - value.leading_zeros();
    if significant == 0 {
        1
    } else {
        groups_for_bits(significant)
    }
}

/// Accumulate at most `limit` groups starting at `start`
pub(crate) fn read_groups<U: VarUint>(
    bytes: &[u8],
    start: usize,
    limit: usize,
) -> Result<(U, usize), DecodeError> {
    let mut result = U::zero();

    for i in 0..limit {
        let offset = start.saturating_add(i);
        let byte = match bytes.get(offset) {
            Some(&byte) => byte,
            None => {
                debug!(offset, len = bytes.len(), "varint truncated");
                return Err(DecodeError::Truncated { offset });
            }
        };

        let group = <U as From<u8>>::from(byte & GROUP_MASK);
        result = result | (group << (GROUP_BITS as usize * i));

        if !check_bit(byte, CONTINUATION_BIT) {
            return Ok((result, i + 1));
        }
    }

    trace!(start, groups = limit, bits = U::BITS, "varint wider than target, high bits dropped");
    Ok((result, limit))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn encoded<U: VarUint>(value: U) -> Vec<u8> {
        let mut out = Vec::new();
        encode_unsigned(value, &mut out);
        out
    }

    #[test]
    fn test_encode_300() {
        assert_eq!(encoded(300u64), vec![0xAC, 0x02]);
    }

    #[test]
    fn test_decode_300() {
        let mut cursor = 0;
        let value: u64 = decode_unsigned(&[0xAC, 0x02], &mut cursor).unwrap();
        assert_eq!(value, 300);
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_zero_is_single_byte() {
        assert_eq!(encoded(0u32), vec![0x00]);
        assert_eq!(encoded(0u128), vec![0x00]);
    }

    #[test_case(0, 1 ; "zero")]
    #[test_case(127, 1 ; "one byte max")]
    #[test_case(128, 2 ; "two byte min")]
    #[test_case(16_383, 2 ; "two byte max")]
    #[test_case(16_384, 3 ; "three byte min")]
    #[test_case(2_097_151, 3 ; "three byte max")]
    #[test_case(2_097_152, 4 ; "four byte min")]
    #[test_case(u64::MAX, 10 ; "u64 max")]
    fn test_minimal_length(value: u64, len: usize) {
        assert_eq!(encoded(value).len(), len);
        assert_eq!(encoded_len_unsigned(value), len);
    }

    #[test]
    fn test_encode_appends_only() {
        let mut out = vec![0xDE, 0xAD];
        let written = encode_unsigned(300u16, &mut out);
        assert_eq!(written, 2);
        assert_eq!(out, vec![0xDE, 0xAD, 0xAC, 0x02]);
    }

    #[test]
    fn test_decode_from_middle() {
        let bytes = [0xFF, 0xAC, 0x02, 0x07];
        let mut cursor = 1;
        let value: u32 = decode_unsigned(&bytes, &mut cursor).unwrap();
        assert_eq!(value, 300);
        assert_eq!(cursor, 3);
    }

    #[test]
    fn test_u16_exhaustive_round_trip() {
        for value in 0..=u16::MAX {
            let bytes = encoded(value);
            let mut cursor = 0;
            assert_eq!(decode_unsigned::<u16>(&bytes, &mut cursor), Ok(value));
            assert_eq!(cursor, bytes.len());
        }
    }

    #[test]
    fn test_u8_max_uses_two_bytes() {
        assert_eq!(encoded(u8::MAX), vec![0xFF, 0x01]);
    }

    #[test]
    fn test_max_groups() {
        assert_eq!(max_groups::<u8>(), 2);
        assert_eq!(max_groups::<u16>(), 3);
        assert_eq!(max_groups::<u32>(), 5);
        assert_eq!(max_groups::<u64>(), 10);
        assert_eq!(max_groups::<u128>(), 19);
    }

    #[test]
    fn test_truncated_empty() {
        let mut cursor = 0;
        assert_eq!(
            decode_unsigned::<u64>(&[], &mut cursor),
            Err(DecodeError::Truncated { offset: 0 })
        );
        assert_eq!(cursor, 0);
    }

    #[test]
    fn test_truncated_mid_value_leaves_cursor() {
        let mut cursor = 1;
        assert_eq!(
            decode_unsigned::<u64>(&[0x00, 0xAC, 0x80], &mut cursor),
            Err(DecodeError::Truncated { offset: 3 })
        );
        assert_eq!(cursor, 1);
    }

    #[test]
    fn test_cursor_past_end() {
        let mut cursor = 5;
        assert_eq!(
            decode_unsigned::<u8>(&[0x01], &mut cursor),
            Err(DecodeError::Truncated { offset: 5 })
        );
    }

    #[test]
    fn test_overflow_stops_at_width() {
        // Two groups fit a u8; the third byte is left for the next read.
        let bytes = [0xFF, 0xFF, 0x01];
        let mut cursor = 0;
        let value: u8 = decode_unsigned(&bytes, &mut cursor).unwrap();
        assert_eq!(value, 0xFF);
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_overflow_drops_high_bits_of_last_group() {
        // 0x7F << 7 only keeps its lowest bit in a u8
        let mut cursor = 0;
        let value: u8 = decode_unsigned(&[0x80, 0x7F], &mut cursor).unwrap();
        assert_eq!(value, 0x80);
        assert_eq!(cursor, 2);
    }

    #[test]
    fn test_overflow_u64() {
        let bytes = [0xFF; 12];
        let mut cursor = 0;
        let value: u64 = decode_unsigned(&bytes, &mut cursor).unwrap();
        assert_eq!(value, u64::MAX);
        assert_eq!(cursor, 10);
    }

    #[test]
    fn test_non_canonical_padding_decodes() {
        let mut cursor = 0;
        let value: u32 = decode_unsigned(&[0x81, 0x80, 0x00], &mut cursor).unwrap();
        assert_eq!(value, 1);
        assert_eq!(cursor, 3);
    }
}
