//! Headers and blocks.

use serde::{Deserialize, Serialize};

use crate::{Transaction, H256};

pub type BlockNumber = u64;

/// The subset of a block header the engine consumes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    #[serde(with = "crate::hex::uint64")]
    pub number: BlockNumber,
    pub hash: H256,
    pub parent_hash: H256,
    /// Milliseconds since the Unix epoch.
    #[serde(with = "crate::hex::uint64")]
    pub timestamp: u64,
}

/// A block: its header and transactions in block order.
///
/// The transaction at position 0 is the cellbase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub header: Header,
    pub transactions: Vec<Transaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_ignores_extra_fields() {
        let json = format!(
            r#"{{"number":"0x10","hash":"0x{}","parent_hash":"0x{}","timestamp":"0x17a","epoch":"0x1","nonce":"0x0"}}"#,
            "01".repeat(32),
            "02".repeat(32)
        );
        let header: Header = serde_json::from_str(&json).unwrap();
        assert_eq!(header.number, 16);
        assert_eq!(header.timestamp, 0x17a);
        assert_eq!(header.parent_hash, H256::new([2u8; 32]));
    }
}
