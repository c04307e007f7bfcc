//! Transaction codec: the wire form of a transaction accepted for
//! submission and produced for signing.

pub mod codec;
pub mod error;

pub use codec::{decode_transaction, encode_transaction, MAX_TRANSACTION_SIZE};
pub use error::CodecError;
