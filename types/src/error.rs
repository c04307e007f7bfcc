//! Errors raised while parsing native wire values.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypesError {
    #[error("missing 0x prefix: {0}")]
    MissingPrefix(String),

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("redundant leading zeros in integer: {0}")]
    LeadingZeros(String),

    #[error("integer out of range: {0}")]
    Overflow(String),

    #[error("unknown script hash type byte: {0}")]
    UnknownHashType(u8),
}
