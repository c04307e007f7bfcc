use thiserror::Error;

/// Failure talking to the node.
///
/// "Not found" is never an error here; lookups return `Ok(None)`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("node returned error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("invalid response from node: {0}")]
    InvalidResponse(String),
}

impl From<reqwest::Error> for NodeError {
    fn from(e: reqwest::Error) -> Self {
        NodeError::Transport(e.to_string())
    }
}

pub type NodeResult<T> = Result<T, NodeError>;
