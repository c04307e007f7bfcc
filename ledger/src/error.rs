use cellgate_address::AddressError;
use cellgate_codec::CodecError;
use cellgate_node_client::NodeError;
use cellgate_types::{OutPoint, H256};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("node error: {0}")]
    Node(#[from] NodeError),

    #[error("request deadline exceeded")]
    DeadlineExceeded,

    #[error("previous transaction {0} not found")]
    MissingPreviousTransaction(H256),

    #[error("previous output {}:{} does not exist", .0.tx_hash, .0.index)]
    MissingPreviousOutput(OutPoint),

    #[error("previous output {}:{} was never resolved", .0.tx_hash, .0.index)]
    UnresolvedReference(OutPoint),

    #[error("inconsistent node view: {0}")]
    Inconsistent(String),

    #[error("balance overflows u64")]
    BalanceOverflow,

    #[error("block not found: {0}")]
    BlockNotFound(String),

    #[error("transaction {0} not found")]
    TransactionNotFound(H256),

    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    #[error("invalid transaction: {0}")]
    InvalidTransaction(#[from] CodecError),

    #[error("transaction rejected by node ({code}): {message}")]
    Rejected { code: i64, message: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// How a caller should treat a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorClass {
    /// The node could not be reached or answered garbage.
    Upstream,
    /// The node answered, but its view of the chain does not add up.
    Inconsistency,
    /// The request itself is wrong.
    Client,
    /// The requested block or transaction does not exist.
    NotFound,
    /// The node refused a submitted transaction.
    Rejected,
}

impl LedgerError {
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Node(_) | Self::DeadlineExceeded => ErrorClass::Upstream,
            Self::MissingPreviousTransaction(_)
            | Self::MissingPreviousOutput(_)
            | Self::UnresolvedReference(_)
            | Self::Inconsistent(_)
            | Self::BalanceOverflow => ErrorClass::Inconsistency,
            Self::BlockNotFound(_) | Self::TransactionNotFound(_) => ErrorClass::NotFound,
            Self::InvalidAddress(_) | Self::InvalidTransaction(_) | Self::InvalidConfig(_) => {
                ErrorClass::Client
            }
            Self::Rejected { .. } => ErrorClass::Rejected,
        }
    }

    /// Whether repeating the whole request may succeed.
    pub fn retriable(&self) -> bool {
        matches!(self.class(), ErrorClass::Upstream | ErrorClass::Rejected)
    }
}
