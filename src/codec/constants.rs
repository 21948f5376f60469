//! Wire-format constants for the varint encodings

/// Continuation flag of an unsigned group byte
pub const CONTINUATION_BIT: u8 = 7;

/// Payload bits carried by an unsigned group byte
pub const GROUP_BITS: u32 = 7;
pub const GROUP_MASK: u8 = 0x7F;

/// Signed first byte: sign flag, continuation flag, 6 magnitude bits
pub const SIGN_BIT: u8 = 7;
pub const FIRST_CONTINUATION_BIT: u8 = 6;
pub const FIRST_BITS: u32 = 6;
pub const FIRST_MASK: u8 = 0x3F;
