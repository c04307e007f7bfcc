//! Fundamental types for cellgate.
//!
//! This crate defines the types shared across every other crate in the workspace:
//! the node's native cell model (scripts, cells, transactions, headers, blocks),
//! the standardized operation-based representation produced by the ledger
//! engine, hashes, capacities and network identifiers.

pub mod amount;
pub mod block;
pub mod cell;
pub mod error;
pub mod hash;
pub mod hex;
pub mod indexer;
pub mod model;
pub mod network;
pub mod node;
pub mod script;
pub mod transaction;

pub use amount::{Capacity, Currency};
pub use block::{Block, BlockNumber, Header};
pub use cell::{CellDep, CellInput, CellOutput, DepType, OutPoint};
pub use error::TypesError;
pub use hash::H256;
pub use indexer::{CellsPage, IndexerCell, Order, ScriptType, SearchKey};
pub use model::{
    AccountBalance, AccountIdentifier, Amount, BlockIdentifier, NetworkIdentifier, NetworkStatus,
    Operation, OperationIdentifier, OperationStatus, OperationType, Peer, StandardBlock,
    StandardTransaction, TransactionIdentifier,
};
pub use network::NetworkId;
pub use node::{LocalNode, RemoteNode};
pub use script::{Script, ScriptHashType};
pub use transaction::{RawTransaction, Transaction, TransactionWithStatus, TxStatus};
