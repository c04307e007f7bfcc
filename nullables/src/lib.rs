//! Nullable infrastructure for deterministic testing.
//!
//! [`NullNode`] stands in for a chain node and its cell indexer. It is fed
//! blocks, transactions and live cells programmatically, never touches the
//! network, and records what it was asked so tests can assert on batching
//! and pagination.
//!
//! Usage: build a `NullNode`, hand it to the engine instead of the HTTP
//! client.

pub mod fixtures;
pub mod node;

pub use node::NullNode;
