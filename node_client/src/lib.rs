//! Node access for cellgate.
//!
//! [`NodeRpc`] is the set of chain capabilities the ledger engine consumes.
//! [`JsonRpcNodeClient`] implements it over JSON-RPC 2.0 against a node's
//! chain endpoint and its cell indexer endpoint.

pub mod client;
pub mod error;
pub mod jsonrpc;
pub mod node;

pub use client::JsonRpcNodeClient;
pub use error::{NodeError, NodeResult};
pub use node::NodeRpc;
