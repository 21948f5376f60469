pub mod bits;
pub mod constants;
pub mod error;
pub mod signed;
pub mod unsigned;
pub mod varint;

pub use error::DecodeError;
pub use signed::*;
pub use unsigned::*;
pub use varint::*;
