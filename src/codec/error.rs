use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// A read was attempted at `offset`, past the end of the input
    Truncated { offset: usize },
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Truncated { offset } =>
                write!(f, "truncated varint: no byte at offset {}", offset),
        }
    }
}

impl std::error::Error for DecodeError {}
