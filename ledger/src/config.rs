//! Engine configuration.

use cellgate_types::{Currency, NetworkId, OperationType};
use std::time::Duration;

use crate::LedgerError;

pub const DEFAULT_MAX_BATCH_SIZE: usize = 2000;
pub const DEFAULT_PAGE_SIZE: u32 = 1000;
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable settings shared by every engine operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Network whose addresses are produced and accepted.
    pub network: NetworkId,
    pub currency: Currency,
    /// Most previous-transaction lookups sent in one batch round-trip.
    pub max_batch_size: usize,
    /// Live cells requested per indexer page.
    pub page_size: u32,
    /// Label for the credit side of ordinary transactions. `Transfer` or
    /// `Receive`; applied the same way for blocks and single transactions.
    pub credit_operation: OperationType,
    /// Budget for a whole request, across all of its node calls.
    pub request_timeout: Duration,
}

impl EngineConfig {
    pub fn new(network: NetworkId) -> Self {
        Self {
            network,
            currency: Currency::ckb(),
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
            page_size: DEFAULT_PAGE_SIZE,
            credit_operation: OperationType::Transfer,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.max_batch_size == 0 {
            return Err(LedgerError::InvalidConfig(
                "max_batch_size must be at least 1".into(),
            ));
        }
        if self.page_size == 0 {
            return Err(LedgerError::InvalidConfig(
                "page_size must be at least 1".into(),
            ));
        }
        if self.credit_operation == OperationType::Reward {
            return Err(LedgerError::InvalidConfig(
                "credit_operation must be Transfer or Receive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(NetworkId::Testnet)
    }
}
