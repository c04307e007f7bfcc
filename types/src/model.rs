//! Standardized, ledger-agnostic representation.
//!
//! These are the shapes handed to API consumers: blocks and transactions as
//! ordered lists of balance-changing operations, balances tied to the block
//! they were computed at. Field names follow the Rosetta data API.

use serde::{Deserialize, Serialize};

use crate::{Capacity, Currency, Header, NetworkId, H256};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkIdentifier {
    pub blockchain: String,
    pub network: String,
}

impl NetworkIdentifier {
    pub const BLOCKCHAIN: &'static str = "CKB";

    pub fn for_network(network: NetworkId) -> Self {
        Self {
            blockchain: Self::BLOCKCHAIN.to_string(),
            network: network.as_str().to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockIdentifier {
    pub index: u64,
    pub hash: H256,
}

impl BlockIdentifier {
    pub fn new(index: u64, hash: H256) -> Self {
        Self { index, hash }
    }

    pub fn of(header: &Header) -> Self {
        Self::new(header.number, header.hash)
    }

    /// The parent of `header`. The genesis block is its own parent.
    pub fn parent_of(header: &Header) -> Self {
        match header.number {
            0 => Self::of(header),
            n => Self::new(n - 1, header.parent_hash),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionIdentifier {
    pub hash: H256,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OperationIdentifier {
    pub index: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountIdentifier {
    pub address: String,
}

/// A signed decimal amount in a currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub value: String,
    pub currency: Currency,
}

impl Amount {
    pub fn credit(capacity: Capacity, currency: &Currency) -> Self {
        Self {
            value: capacity.to_string(),
            currency: currency.clone(),
        }
    }

    /// A negated capacity. Zero is rendered unsigned.
    pub fn debit(capacity: Capacity, currency: &Currency) -> Self {
        let value = if capacity.is_zero() {
            "0".to_string()
        } else {
            format!("-{capacity}")
        };
        Self {
            value,
            currency: currency.clone(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    /// Newly issued capacity credited by a cellbase.
    Reward,
    /// Capacity moved by an ordinary transaction.
    Transfer,
    /// Alternative label for the credit side of an ordinary transaction.
    Receive,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Reward => "Reward",
            Self::Transfer => "Transfer",
            Self::Receive => "Receive",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationStatus {
    Success,
}

impl OperationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "Success",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    pub operation_identifier: OperationIdentifier,
    #[serde(rename = "type")]
    pub kind: OperationType,
    pub status: OperationStatus,
    pub account: AccountIdentifier,
    pub amount: Amount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardTransaction {
    pub transaction_identifier: TransactionIdentifier,
    pub operations: Vec<Operation>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardBlock {
    pub block_identifier: BlockIdentifier,
    pub parent_block_identifier: BlockIdentifier,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub transactions: Vec<StandardTransaction>,
}

/// Total capacity controlled by an account as of `block_identifier`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub block_identifier: BlockIdentifier,
    pub balances: Vec<Amount>,
}

/// A peer the node is connected to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Peer {
    pub peer_id: String,
}

/// Where the chain stands from the serving node's point of view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkStatus {
    pub current_block_identifier: BlockIdentifier,
    /// Milliseconds since the Unix epoch.
    pub current_block_timestamp: u64,
    pub genesis_block_identifier: BlockIdentifier,
    pub peers: Vec<Peer>,
}
