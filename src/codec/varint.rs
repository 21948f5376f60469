//! Static dispatch on signedness: every supported integer type implements
//! [`Varint`], routed to the unsigned or signed scheme at compile time.

use super::error::DecodeError;
use super::signed::{decode_signed, encode_signed, encoded_len_signed, signed_max_len};
use super::unsigned::{decode_unsigned, encode_unsigned, encoded_len_unsigned, groups_for_bits};

pub trait Varint: Copy + Sized {
    const SIGNED: bool;

    /// Longest encoding the encoder emits for this type
    const MAX_ENCODED_LEN: usize;

    fn encode_varint(self, out: &mut Vec<u8>) -> usize;

    fn decode_varint(bytes: &[u8], cursor: &mut usize) -> Result<Self, DecodeError>;

    fn encoded_len(self) -> usize;
}

macro_rules! impl_unsigned_varint {
    ($($t:ty),*) => {
        $(
            impl Varint for $t {
                const SIGNED: bool = false;
                const MAX_ENCODED_LEN: usize = groups_for_bits(<$t>::BITS);

                #[inline]
                fn encode_varint(self, out: &mut Vec<u8>) -> usize {
                    encode_unsigned(self, out)
                }

                #[inline]
                fn decode_varint(bytes: &[u8], cursor: &mut usize) -> Result<Self, DecodeError> {
                    decode_unsigned(bytes, cursor)
                }

                #[inline]
                fn encoded_len(self) -> usize {
                    encoded_len_unsigned(self)
                }
            }
        )*
    };
}

macro_rules! impl_signed_varint {
    ($($t:ty),*) => {
        $(
            impl Varint for $t {
                const SIGNED: bool = true;
                const MAX_ENCODED_LEN: usize = signed_max_len(<$t>::BITS);

                #[inline]
                fn encode_varint(self, out: &mut Vec<u8>) -> usize {
                    encode_signed(self, out)
                }

                #[inline]
                fn decode_varint(bytes: &[u8], cursor: &mut usize) -> Result<Self, DecodeError> {
                    decode_signed(bytes, cursor)
                }

                #[inline]
                fn encoded_len(self) -> usize {
                    encoded_len_signed(self)
                }
            }
        )*
    };
}

impl_unsigned_varint!(u8, u16, u32, u64, u128, usize);
impl_signed_varint!(i8, i16, i32, i64, i128, isize);

/// Append the varint form of `value` to `out`
pub fn encode<T: Varint>(value: T, out: &mut Vec<u8>) -> usize {
    value.encode_varint(out)
}

pub fn decode<T: Varint>(bytes: &[u8], cursor: &mut usize) -> Result<T, DecodeError> {
    T::decode_varint(bytes, cursor)
}

/// Decode back-to-back varints until `bytes` is used up
pub fn decode_all<T: Varint>(bytes: &[u8]) -> Result<Vec<T>, DecodeError> {
    let mut cursor = 0;
    let mut values = Vec::new();
    while cursor < bytes.len() {
        values.push(T::decode_varint(bytes, &mut cursor)?);
    }
    Ok(values)
}
