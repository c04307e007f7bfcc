//! HTTP API for cellgate.
//!
//! Rosetta-style JSON endpoints, all `POST`:
//! - `/network/list`, `/network/status`, `/network/options`
//! - `/block`, `/block/transaction`
//! - `/account/balance`
//! - `/construction/metadata`, `/construction/submit`

pub mod error;
pub mod handlers;
pub mod server;

pub use error::{ApiError, RpcError};
pub use server::{router, RpcServer};
