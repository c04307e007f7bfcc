//! Ledger translation engine.
//!
//! Turns the node's cell model into the standardized operation model:
//! blocks and transactions become ordered lists of debits and credits,
//! addresses become balances. Every call is a self-contained request
//! against the node; the engine keeps no state between calls.

pub mod balance;
pub mod block;
pub mod config;
pub mod deadline;
pub mod engine;
pub mod error;
pub mod network;
pub mod resolver;
pub mod translate;

pub use config::EngineConfig;
pub use deadline::Deadline;
pub use engine::{BlockRef, LedgerEngine};
pub use error::{ErrorClass, LedgerError};
pub use resolver::ResolvedOutputs;
