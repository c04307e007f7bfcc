use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressError {
    #[error("invalid bech32 string: {0}")]
    InvalidEncoding(String),

    #[error("invalid checksum")]
    InvalidChecksum,

    #[error("checksum variant does not match address format {format:#04x}")]
    VariantMismatch { format: u8 },

    #[error("unknown address prefix: {0}")]
    UnknownPrefix(String),

    #[error("unsupported address format: {0:#04x}")]
    UnsupportedFormat(u8),

    #[error("unknown short-format code index: {0:#04x}")]
    UnknownCodeIndex(u8),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("address is for {actual}, expected {expected}")]
    WrongNetwork {
        expected: &'static str,
        actual: &'static str,
    },
}

impl From<bech32::Error> for AddressError {
    fn from(e: bech32::Error) -> Self {
        match e {
            bech32::Error::InvalidChecksum => Self::InvalidChecksum,
            other => Self::InvalidEncoding(other.to_string()),
        }
    }
}
