//! Single-bit helpers over one encoded byte. `pos` counts from the least
//! significant bit and must be below 8.

#[inline]
pub fn check_bit(byte: u8, pos: u8) -> bool {
    byte & (1 << pos) != 0
}

#[inline]
pub fn set_bit(byte: u8, pos: u8) -> u8 {
    byte | (1 << pos)
}

#[inline]
pub fn clear_bit(byte: u8, pos: u8) -> u8 {
    byte & !(1 << pos)
}
