use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("transaction too large: {size} > {max}")]
    TooLarge { size: usize, max: usize },

    #[error("malformed transaction: {0}")]
    Malformed(String),

    #[error("inconsistent transaction: {0}")]
    Inconsistent(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}
