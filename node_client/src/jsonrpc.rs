//! JSON-RPC 2.0 envelopes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{NodeError, NodeResult};

#[derive(Debug, Serialize)]
pub struct Request<'a, P> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: P,
}

impl<'a, P> Request<'a, P> {
    pub fn new(id: u64, method: &'a str, params: P) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<ErrorObject>,
}

impl Response {
    /// The `result` payload, or the node's error.
    ///
    /// An absent result is read as JSON `null`, which is how the node reports
    /// "not found" for single-object lookups.
    pub fn into_result(self) -> NodeResult<serde_json::Value> {
        if let Some(error) = self.error {
            let message = match error.data {
                Some(data) => format!("{}: {}", error.message, data),
                None => error.message,
            };
            return Err(NodeError::Rpc {
                code: error.code,
                message,
            });
        }
        Ok(self.result.unwrap_or(serde_json::Value::Null))
    }
}

/// Order batch responses by the request ids they answer.
///
/// A response is required for every id; a missing one is reported as an
/// error for that item only.
pub fn match_batch(ids: &[u64], responses: Vec<Response>) -> Vec<NodeResult<serde_json::Value>> {
    let mut by_id: HashMap<u64, Response> = responses
        .into_iter()
        .filter_map(|r| r.id.map(|id| (id, r)))
        .collect();
    ids.iter()
        .map(|id| match by_id.remove(id) {
            Some(response) => response.into_result(),
            None => Err(NodeError::InvalidResponse(format!(
                "no batch response for request id {id}"
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(value: serde_json::Value) -> Response {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn request_shape() {
        let req = Request::new(7, "get_tip_header", json!([]));
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({"jsonrpc": "2.0", "id": 7, "method": "get_tip_header", "params": []})
        );
    }

    #[test]
    fn null_result_is_not_an_error() {
        let r = response(json!({"jsonrpc": "2.0", "id": 1, "result": null}));
        assert_eq!(r.into_result().unwrap(), serde_json::Value::Null);
    }

    #[test]
    fn error_object_becomes_rpc_error() {
        let r = response(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": {"code": -301, "message": "TransactionFailedToResolve", "data": "Unknown(OutPoint)"}
        }));
        assert_eq!(
            r.into_result(),
            Err(NodeError::Rpc {
                code: -301,
                message: "TransactionFailedToResolve: \"Unknown(OutPoint)\"".into(),
            })
        );
    }

    #[test]
    fn batch_matched_by_id_not_position() {
        let responses = vec![
            response(json!({"id": 2, "result": "b"})),
            response(json!({"id": 1, "result": "a"})),
        ];
        let matched = match_batch(&[1, 2, 3], responses);
        assert_eq!(matched[0], Ok(json!("a")));
        assert_eq!(matched[1], Ok(json!("b")));
        assert!(matches!(matched[2], Err(NodeError::InvalidResponse(_))));
    }
}
