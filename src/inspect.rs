//! Byte-by-byte breakdown of a single encoded value

use std::fmt::Display;

use serde::Serialize;

use crate::codec::bits::check_bit;
use crate::codec::constants::{
    CONTINUATION_BIT, FIRST_BITS, FIRST_CONTINUATION_BIT, FIRST_MASK, GROUP_BITS, GROUP_MASK, SIGN_BIT,
};
use crate::codec::{DecodeError, Varint};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupInfo {
    pub offset: usize,
    pub byte: u8,
    pub payload: u8,
    pub payload_bits: u32,
    pub continuation: bool,
    /// Only set on the first byte of a signed value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative: Option<bool>,
}

impl GroupInfo {
    pub fn group(offset: usize, byte: u8) -> Self {
        Self {
            offset,
            byte,
            payload: byte & GROUP_MASK,
            payload_bits: GROUP_BITS,
            continuation: check_bit(byte, CONTINUATION_BIT),
            negative: None,
        }
    }

    pub fn signed_first(offset: usize, byte: u8) -> Self {
        Self {
            offset,
            byte,
            payload: byte & FIRST_MASK,
            payload_bits: FIRST_BITS,
            continuation: check_bit(byte, FIRST_CONTINUATION_BIT),
            negative: Some(check_bit(byte, SIGN_BIT)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Inspection {
    /// Decimal form, so 128-bit values survive JSON
    pub value: String,
    pub start: usize,
    pub len: usize,
    pub groups: Vec<GroupInfo>,
}

/// Decode one value at `*cursor` and describe every byte it consumed
pub fn inspect<T: Varint + Display>(bytes: &[u8], cursor: &mut usize) -> Result<Inspection, DecodeError> {
    let start = *cursor;
    let value = T::decode_varint(bytes, cursor)?;

    let groups = bytes[start..*cursor]
        .iter()
        .enumerate()
        .map(|(i, &byte)| {
            if T::SIGNED && i == 0 {
                GroupInfo::signed_first(start, byte)
            } else {
                GroupInfo::group(start + i, byte)
            }
        })
        .collect();

    Ok(Inspection {
        value: value.to_string(),
        start,
        len: *cursor - start,
        groups,
    })
}
