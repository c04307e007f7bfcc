//! RPC request handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use cellgate_ledger::{BlockRef, LedgerEngine};
use cellgate_node_client::NodeRpc;
use cellgate_types::{
    AccountBalance, AccountIdentifier, NetworkIdentifier, NetworkStatus, OperationStatus,
    OperationType, StandardBlock, StandardTransaction, TransactionIdentifier, H256,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::ApiError;

pub const ROSETTA_VERSION: &str = "1.3.0";

type Engine<N> = State<Arc<LedgerEngine<N>>>;
type Payload<T> = Result<Json<T>, JsonRejection>;

// ── Identifiers ──────────────────────────────────────────────────────────

/// A block named by height, hash, both, or neither (the tip).
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct PartialBlockIdentifier {
    #[serde(default)]
    pub index: Option<i64>,
    #[serde(default)]
    pub hash: Option<String>,
}

impl PartialBlockIdentifier {
    /// The hash wins when both are given. A negative height is read as 0.
    pub fn to_block_ref(&self) -> Result<BlockRef, ApiError> {
        match (&self.hash, self.index) {
            (Some(hash), _) => Ok(BlockRef::Hash(parse_hash(hash)?)),
            (None, Some(index)) => Ok(BlockRef::Number(index.max(0) as u64)),
            (None, None) => Ok(BlockRef::Latest),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TransactionIdentifierRequest {
    pub hash: String,
}

fn parse_hash(s: &str) -> Result<H256, ApiError> {
    H256::from_hex(s).map_err(|e| {
        ApiError::invalid_request().with_details(json!({ "error": format!("bad hash {s}: {e}") }))
    })
}

fn check_network<N: NodeRpc>(
    engine: &LedgerEngine<N>,
    requested: &NetworkIdentifier,
) -> Result<(), ApiError> {
    let served = engine.network_identifier();
    if *requested == served {
        Ok(())
    } else {
        Err(ApiError::unsupported_network().with_details(json!({
            "requested": requested,
            "served": served,
        })))
    }
}

// ── Network ──────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct MetadataRequest {
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NetworkListResponse {
    pub network_identifiers: Vec<NetworkIdentifier>,
}

#[derive(Debug, Deserialize)]
pub struct NetworkRequest {
    pub network_identifier: NetworkIdentifier,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Version {
    pub rosetta_version: String,
    pub node_version: String,
    pub middleware_version: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OperationStatusInfo {
    pub status: String,
    pub successful: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Allow {
    pub operation_statuses: Vec<OperationStatusInfo>,
    pub operation_types: Vec<String>,
    pub errors: Vec<ApiError>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NetworkOptionsResponse {
    pub version: Version,
    pub allow: Allow,
}

pub async fn network_list<N: NodeRpc>(
    State(engine): Engine<N>,
    payload: Payload<MetadataRequest>,
) -> Result<Json<NetworkListResponse>, ApiError> {
    payload?;
    Ok(Json(NetworkListResponse {
        network_identifiers: vec![engine.network_identifier()],
    }))
}

pub async fn network_status<N: NodeRpc>(
    State(engine): Engine<N>,
    payload: Payload<NetworkRequest>,
) -> Result<Json<NetworkStatus>, ApiError> {
    let Json(req) = payload?;
    check_network(&engine, &req.network_identifier)?;
    Ok(Json(engine.network_status(engine.deadline()).await?))
}

pub async fn network_options<N: NodeRpc>(
    State(engine): Engine<N>,
    payload: Payload<NetworkRequest>,
) -> Result<Json<NetworkOptionsResponse>, ApiError> {
    let Json(req) = payload?;
    check_network(&engine, &req.network_identifier)?;
    let node_version = engine.node_version(engine.deadline()).await?;

    let mut operation_types = vec![OperationType::Transfer, OperationType::Reward];
    if engine.config().credit_operation == OperationType::Receive {
        operation_types.push(OperationType::Receive);
    }
    Ok(Json(NetworkOptionsResponse {
        version: Version {
            rosetta_version: ROSETTA_VERSION.to_string(),
            node_version,
            middleware_version: env!("CARGO_PKG_VERSION").to_string(),
        },
        allow: Allow {
            operation_statuses: vec![OperationStatusInfo {
                status: OperationStatus::Success.as_str().to_string(),
                successful: true,
            }],
            operation_types: operation_types
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
            errors: ApiError::catalogue(),
        },
    }))
}

// ── Block ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct BlockRequest {
    pub network_identifier: NetworkIdentifier,
    #[serde(default)]
    pub block_identifier: PartialBlockIdentifier,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BlockResponse {
    pub block: StandardBlock,
}

#[derive(Debug, Deserialize)]
pub struct BlockTransactionRequest {
    pub network_identifier: NetworkIdentifier,
    pub block_identifier: PartialBlockIdentifier,
    pub transaction_identifier: TransactionIdentifierRequest,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BlockTransactionResponse {
    pub transaction: StandardTransaction,
}

pub async fn block<N: NodeRpc>(
    State(engine): Engine<N>,
    payload: Payload<BlockRequest>,
) -> Result<Json<BlockResponse>, ApiError> {
    let Json(req) = payload?;
    check_network(&engine, &req.network_identifier)?;
    let block_ref = req.block_identifier.to_block_ref()?;
    let block = engine.block(block_ref, engine.deadline()).await?;
    Ok(Json(BlockResponse { block }))
}

pub async fn block_transaction<N: NodeRpc>(
    State(engine): Engine<N>,
    payload: Payload<BlockTransactionRequest>,
) -> Result<Json<BlockTransactionResponse>, ApiError> {
    let Json(req) = payload?;
    check_network(&engine, &req.network_identifier)?;
    let block_ref = req.block_identifier.to_block_ref()?;
    let tx_hash = parse_hash(&req.transaction_identifier.hash)?;
    let transaction = engine
        .block_transaction(block_ref, tx_hash, engine.deadline())
        .await?;
    Ok(Json(BlockTransactionResponse { transaction }))
}

// ── Account ──────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AccountBalanceRequest {
    pub network_identifier: NetworkIdentifier,
    pub account_identifier: AccountIdentifier,
    #[serde(default)]
    pub block_identifier: Option<PartialBlockIdentifier>,
}

pub async fn account_balance<N: NodeRpc>(
    State(engine): Engine<N>,
    payload: Payload<AccountBalanceRequest>,
) -> Result<Json<AccountBalance>, ApiError> {
    let Json(req) = payload?;
    check_network(&engine, &req.network_identifier)?;
    if req.block_identifier.is_some() {
        return Err(ApiError::not_implemented()
            .with_details(json!({ "error": "historical balances are not supported" })));
    }
    let balance = engine
        .account_balance(&req.account_identifier.address, engine.deadline())
        .await?;
    Ok(Json(balance))
}

// ── Construction ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ConstructionMetadataRequest {
    pub network_identifier: NetworkIdentifier,
    #[serde(default)]
    pub options: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConstructionMetadataResponse {
    pub metadata: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct ConstructionSubmitRequest {
    pub network_identifier: NetworkIdentifier,
    pub signed_transaction: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConstructionSubmitResponse {
    pub transaction_identifier: TransactionIdentifier,
}

pub async fn construction_metadata<N: NodeRpc>(
    State(engine): Engine<N>,
    payload: Payload<ConstructionMetadataRequest>,
) -> Result<Json<ConstructionMetadataResponse>, ApiError> {
    let Json(req) = payload?;
    check_network(&engine, &req.network_identifier)?;
    Ok(Json(ConstructionMetadataResponse {
        metadata: json!({}),
    }))
}

pub async fn construction_submit<N: NodeRpc>(
    State(engine): Engine<N>,
    payload: Payload<ConstructionSubmitRequest>,
) -> Result<Json<ConstructionSubmitResponse>, ApiError> {
    let Json(req) = payload?;
    check_network(&engine, &req.network_identifier)?;
    let transaction_identifier = engine
        .submit(&req.signed_transaction, engine.deadline())
        .await?;
    Ok(Json(ConstructionSubmitResponse {
        transaction_identifier,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_identifier_selection() {
        let tip = PartialBlockIdentifier::default();
        assert_eq!(tip.to_block_ref().unwrap(), BlockRef::Latest);

        let negative = PartialBlockIdentifier {
            index: Some(-5),
            hash: None,
        };
        assert_eq!(negative.to_block_ref().unwrap(), BlockRef::Number(0));

        let hash = H256::new([3; 32]);
        let both = PartialBlockIdentifier {
            index: Some(9),
            hash: Some(hash.to_string()),
        };
        assert_eq!(both.to_block_ref().unwrap(), BlockRef::Hash(hash));
    }

    #[test]
    fn malformed_hash_is_invalid_request() {
        let bad = PartialBlockIdentifier {
            index: None,
            hash: Some("0x1234".into()),
        };
        assert_eq!(bad.to_block_ref().unwrap_err().code, 10);
    }
}
