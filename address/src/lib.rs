//! Address codec.
//!
//! A lock script maps deterministically to a human-readable address for a
//! given network, and a well-formed address maps back to its lock script.

pub mod address;
pub mod error;

pub use address::{
    generate_address, parse_address, Address, MULTISIG_CODE_HASH, SECP256K1_BLAKE160_CODE_HASH,
};
pub use error::AddressError;
