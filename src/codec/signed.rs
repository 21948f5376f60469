//! Signed varint.
//!
//! The first byte is always present and carries the sign in bit 7, a
//! continuation flag in bit 6 and the six least significant bits of the
//! magnitude. When the magnitude does not fit in six bits, the rest of it
//! (shifted down by six) follows as an unsigned varint.
//!
//! ```text
//!   first byte            continuation bytes
//!   S C m m m m m m       C m m m m m m m ...
//! ```

use num_traits::{AsPrimitive, PrimInt, Signed, Zero};
use tracing::debug;

use super::bits::{check_bit, set_bit};
use super::constants::{FIRST_BITS, FIRST_CONTINUATION_BIT, FIRST_MASK, SIGN_BIT};
use super::error::DecodeError;
use super::unsigned::{encode_unsigned, encoded_len_unsigned, groups_for_bits, read_groups, VarUint};

/// Fixed-width signed integer the codec can carry, paired with the unsigned
/// type that holds its magnitude.
pub trait VarSint: PrimInt + Signed {
    type Magnitude: VarUint;

    /// `|self|` without overflow, so `MIN` is representable
    fn magnitude(self) -> Self::Magnitude;

    /// Rebuild a value from its magnitude. Out-of-range magnitudes wrap.
    fn from_magnitude(magnitude: Self::Magnitude, negative: bool) -> Self;
}

macro_rules! impl_var_sint {
    ($($t:ty => $u:ty),*) => {
        $(
            impl VarSint for $t {
                type Magnitude = $u;

                #[inline]
                fn magnitude(self) -> $u {
                    self.unsigned_abs()
                }

                #[inline]
                fn from_magnitude(magnitude: $u, negative: bool) -> Self {
                    let value = magnitude as $t;
                    if negative {
                        value.wrapping_neg()
                    } else {
                        value
                    }
                }
            }
        )*
    };
}

impl_var_sint!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize);

/// Longest canonical signed encoding for a `bits`-wide type: the first byte
/// plus the groups for the `bits - 6` magnitude bits left over.
pub const fn signed_max_len(bits: u32) -> usize {
    1 + groups_for_bits(bits - FIRST_BITS)
}

pub fn encode_signed<I: VarSint>(value: I, out: &mut Vec<u8>) -> usize {
    let start = out.len();
    let magnitude = value.magnitude();

    let low: u8 = magnitude.as_();
    let mut first = low & FIRST_MASK;
    if value < I::zero() {
        first = set_bit(first, SIGN_BIT);
    }

    let rest = magnitude >> FIRST_BITS as usize;
    if rest.is_zero() {
        out.push(first);
    } else {
        out.push(set_bit(first, FIRST_CONTINUATION_BIT));
        encode_unsigned(rest, out);
    }

    out.len() - start
}

/// Decode one signed varint at `*cursor`. Follows the same overflow and
/// truncation rules as [`decode_unsigned`](super::unsigned::decode_unsigned).
pub fn decode_signed<I: VarSint>(bytes: &[u8], cursor: &mut usize) -> Result<I, DecodeError> {
    let (value, consumed) = read_signed::<I>(bytes, *cursor)?;
    *cursor += consumed;
    Ok(value)
}

pub fn encoded_len_signed<I: VarSint>(value: I) -> usize {
    let rest = value.magnitude() >> FIRST_BITS as usize;
    if rest.is_zero() {
        1
    } else {
        1 + encoded_len_unsigned(rest)
    }
}

fn read_signed<I: VarSint>(bytes: &[u8], start: usize) -> Result<(I, usize), DecodeError> {
    let first = match bytes.get(start) {
        Some(&byte) => byte,
        None => {
            debug!(offset = start, len = bytes.len(), "signed varint truncated");
            return Err(DecodeError::Truncated { offset: start });
        }
    };

    let negative = check_bit(first, SIGN_BIT);
    let mut magnitude = <I::Magnitude as From<u8>>::from(first & FIRST_MASK);
    let mut consumed = 1;

    if check_bit(first, FIRST_CONTINUATION_BIT) {
        // the first byte already carried six of the magnitude bits
        let limit = groups_for_bits(<I::Magnitude as VarUint>::BITS - FIRST_BITS);
        let (rest, used) = read_groups::<I::Magnitude>(bytes, start.saturating_add(1), limit)?;
        magnitude = magnitude | (rest << FIRST_BITS as usize);
        consumed += used;
    }

    Ok((I::from_magnitude(magnitude, negative), consumed))
}
