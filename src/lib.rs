//! Variable-length integer codec.
//!
//! Unsigned values use base-128 groups, least significant first, with bit 7
//! flagging that another byte follows. Signed values lead with a byte that
//! holds the sign, a continuation flag and six magnitude bits; any remaining
//! magnitude follows as unsigned groups.
//!
//! ```
//! let mut out = Vec::new();
//! varcodec::encode(300u64, &mut out);
//! assert_eq!(out, [0xAC, 0x02]);
//!
//! let mut cursor = 0;
//! let value: u64 = varcodec::decode(&out, &mut cursor).unwrap();
//! assert_eq!((value, cursor), (300, 2));
//! ```

pub mod codec;
pub mod config;
pub mod inspect;
pub mod stats;
pub mod utils;
pub mod width;

pub use codec::{
    decode, decode_all, decode_signed, decode_unsigned, encode, encode_signed, encode_unsigned,
    encoded_len_signed, encoded_len_unsigned, DecodeError, VarSint, VarUint, Varint,
};
pub use width::IntWidth;
