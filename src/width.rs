//! Runtime choice of integer type for the command-line tool. Each variant
//! maps onto the statically dispatched codec for that type.

use std::fmt;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::codec::{decode, encode, DecodeError};
use crate::inspect::{inspect, Inspection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum IntWidth {
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
}

macro_rules! with_width {
    ($width:expr, $t:ident => $body:expr) => {
        match $width {
            IntWidth::U8 => { type $t = u8; $body }
            IntWidth::U16 => { type $t = u16; $body }
            IntWidth::U32 => { type $t = u32; $body }
            IntWidth::U64 => { type $t = u64; $body }
            IntWidth::U128 => { type $t = u128; $body }
            IntWidth::Usize => { type $t = usize; $body }
            IntWidth::I8 => { type $t = i8; $body }
            IntWidth::I16 => { type $t = i16; $body }
            IntWidth::I32 => { type $t = i32; $body }
            IntWidth::I64 => { type $t = i64; $body }
            IntWidth::I128 => { type $t = i128; $body }
            IntWidth::Isize => { type $t = isize; $body }
        }
    };
}

impl IntWidth {
    pub fn as_str(&self) -> &'static str {
        match self {
            IntWidth::U8 => "u8",
            IntWidth::U16 => "u16",
            IntWidth::U32 => "u32",
            IntWidth::U64 => "u64",
            IntWidth::U128 => "u128",
            IntWidth::Usize => "usize",
            IntWidth::I8 => "i8",
            IntWidth::I16 => "i16",
            IntWidth::I32 => "i32",
            IntWidth::I64 => "i64",
            IntWidth::I128 => "i128",
            IntWidth::Isize => "isize",
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            IntWidth::I8 | IntWidth::I16 | IntWidth::I32 | IntWidth::I64 | IntWidth::I128 | IntWidth::Isize
        )
    }

    /// Parse a decimal integer of this width and append its encoding to `out`
    pub fn encode_decimal(&self, text: &str, out: &mut Vec<u8>) -> Result<usize> {
        let text = text.trim();
        with_width!(self, T => {
            let value: T = text
                .parse()
                .with_context(|| format!("invalid {} value {:?}", self, text))?;
            Ok(encode(value, out))
        })
    }

    /// Decode the value at `*cursor` and render it in decimal
    pub fn decode_decimal(&self, bytes: &[u8], cursor: &mut usize) -> std::result::Result<String, DecodeError> {
        with_width!(self, T => decode::<T>(bytes, cursor).map(|value| value.to_string()))
    }

    pub fn inspect(&self, bytes: &[u8], cursor: &mut usize) -> std::result::Result<Inspection, DecodeError> {
        with_width!(self, T => inspect::<T>(bytes, cursor))
    }
}

impl fmt::Display for IntWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(IntWidth::U64, "300", &[0xAC, 0x02] ; "u64")]
    #[test_case(IntWidth::I64, "-300", &[0xEC, 0x04] ; "i64")]
    #[test_case(IntWidth::U8, " 255 ", &[0xFF, 0x01] ; "u8 padded")]
    #[test_case(IntWidth::I8, "-128", &[0xC0, 0x02] ; "i8 min")]
    #[test_case(IntWidth::U128, "340282366920938463463374607431768211455", &[0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0x03] ; "u128 max")]
    fn test_decimal_round_trip(width: IntWidth, text: &str, expected: &[u8]) {
        let mut out = Vec::new();
        assert_eq!(width.encode_decimal(text, &mut out).unwrap(), expected.len());
        assert_eq!(out, expected);

        let mut cursor = 0;
        assert_eq!(width.decode_decimal(&out, &mut cursor).unwrap(), text.trim());
        assert_eq!(cursor, expected.len());
    }

    #[test_case(IntWidth::U8, "256" ; "u8 overflow")]
    #[test_case(IntWidth::U32, "-1" ; "negative unsigned")]
    #[test_case(IntWidth::I16, "abc" ; "not a number")]
    fn test_encode_rejects(width: IntWidth, text: &str) {
        let mut out = Vec::new();
        let err = width.encode_decimal(text, &mut out).unwrap_err();
        assert!(err.to_string().contains(width.as_str()));
        assert!(out.is_empty());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&IntWidth::Usize).unwrap();
        assert_eq!(json, "\"usize\"");
        let width: IntWidth = serde_json::from_str("\"i128\"").unwrap();
        assert_eq!(width, IntWidth::I128);
        assert!(width.is_signed());
        assert!(!IntWidth::U16.is_signed());
    }
}
