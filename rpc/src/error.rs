//! RPC error types.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cellgate_ledger::{ErrorClass, LedgerError};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Failure to run the server itself.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// Error body returned by every endpoint, always with HTTP 500.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message} (code {code})")]
pub struct ApiError {
    pub code: u32,
    pub message: String,
    pub retriable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Code, message and default retriability of every API error.
const CATALOGUE: [(u32, &str, bool); 10] = [
    (1, "not implemented", false),
    (2, "rpc error", true),
    (3, "address error", false),
    (4, "submit transaction error", true),
    (5, "server error", false),
    (6, "block not found", false),
    (7, "transaction not found", false),
    (8, "invalid transaction", false),
    (9, "unsupported network", false),
    (10, "invalid request", false),
];

impl ApiError {
    fn from_catalogue(code: u32) -> Self {
        let (code, message, retriable) = CATALOGUE[code as usize - 1];
        Self {
            code,
            message: message.to_string(),
            retriable,
            details: None,
        }
    }

    /// Every error an endpoint may return, as advertised by `/network/options`.
    pub fn catalogue() -> Vec<Self> {
        (1..=CATALOGUE.len() as u32)
            .map(Self::from_catalogue)
            .collect()
    }

    pub fn not_implemented() -> Self {
        Self::from_catalogue(1)
    }

    pub fn rpc() -> Self {
        Self::from_catalogue(2)
    }

    pub fn address() -> Self {
        Self::from_catalogue(3)
    }

    pub fn submit() -> Self {
        Self::from_catalogue(4)
    }

    pub fn server() -> Self {
        Self::from_catalogue(5)
    }

    pub fn block_not_found() -> Self {
        Self::from_catalogue(6)
    }

    pub fn transaction_not_found() -> Self {
        Self::from_catalogue(7)
    }

    pub fn invalid_transaction() -> Self {
        Self::from_catalogue(8)
    }

    pub fn unsupported_network() -> Self {
        Self::from_catalogue(9)
    }

    pub fn invalid_request() -> Self {
        Self::from_catalogue(10)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_retriable(mut self, retriable: bool) -> Self {
        self.retriable = retriable;
        self
    }
}

impl From<LedgerError> for ApiError {
    fn from(e: LedgerError) -> Self {
        let retriable = e.retriable();
        let base = match &e {
            LedgerError::BlockNotFound(_) => Self::block_not_found(),
            LedgerError::TransactionNotFound(_) => Self::transaction_not_found(),
            LedgerError::InvalidAddress(_) => Self::address(),
            LedgerError::InvalidTransaction(_) => Self::invalid_transaction(),
            LedgerError::Rejected { code, message } => {
                return Self::submit()
                    .with_retriable(retriable)
                    .with_details(json!({ "code": code, "message": message }));
            }
            _ => match e.class() {
                ErrorClass::Upstream => Self::rpc(),
                _ => Self::server(),
            },
        };
        if matches!(e.class(), ErrorClass::Upstream | ErrorClass::Inconsistency) {
            warn!(error = %e, "request failed");
        }
        base.with_retriable(retriable)
            .with_details(json!({ "error": e.to_string() }))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::invalid_request().with_details(json!({ "error": rejection.body_text() }))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}
