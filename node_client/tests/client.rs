//! The JSON-RPC client against an in-process mock node.

use axum::{routing::post, Json, Router};
use cellgate_node_client::{JsonRpcNodeClient, NodeError, NodeRpc};
use cellgate_types::{Order, Script, ScriptHashType, SearchKey, H256};
use serde_json::{json, Value};
use std::time::Duration;

fn known_hash() -> H256 {
    H256::new([0x11; 32])
}

fn header_json(number: u64) -> Value {
    json!({
        "number": format!("{number:#x}"),
        "hash": format!("0x{}", "ab".repeat(32)),
        "parent_hash": format!("0x{}", "cd".repeat(32)),
        "timestamp": "0x17d7c4b7c00",
        "epoch": "0x0",
    })
}

fn tx_json() -> Value {
    json!({
        "transaction": {
            "version": "0x0",
            "hash": known_hash().to_string(),
            "cell_deps": [],
            "header_deps": [],
            "inputs": [],
            "outputs": [{
                "capacity": "0x12a05f200",
                "lock": {"code_hash": format!("0x{}", "00".repeat(32)), "hash_type": "data", "args": "0x"},
                "type": null
            }],
            "outputs_data": ["0x"],
            "witnesses": []
        },
        "tx_status": {"status": "committed", "block_hash": format!("0x{}", "ab".repeat(32))}
    })
}

fn answer(request: &Value) -> Value {
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default();
    let params = &request["params"];
    let result = match method {
        "get_tip_header" => header_json(42),
        "get_header_by_number" if params[0] == "0x2a" => header_json(42),
        "get_header_by_number" => Value::Null,
        "get_transaction" if params[0] == json!(known_hash().to_string()) => tx_json(),
        "get_transaction" => {
            return json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {"code": -32602, "message": "Invalid params"}
            })
        }
        "get_cells" => json!({
            "objects": [],
            "last_cursor": "0x"
        }),
        "local_node_info" => json!({"node_id": "QmLocal", "version": "0.110.0", "addresses": []}),
        "get_peers" => json!([{"node_id": "QmPeer", "version": "0.109.0"}]),
        _ => {
            return json!({
                "jsonrpc": "2.0",
                "id": id,
                "error": {"code": -32601, "message": "Method not found"}
            })
        }
    };
    json!({"jsonrpc": "2.0", "id": id, "result": result})
}

async fn handle(Json(body): Json<Value>) -> Json<Value> {
    match body {
        // Answer batches in reverse so matching must go by id.
        Value::Array(items) => Json(Value::Array(items.iter().rev().map(answer).collect())),
        single => Json(answer(&single)),
    }
}

async fn spawn_node() -> JsonRpcNodeClient {
    let app = Router::new()
        .route("/rpc", post(handle))
        .route("/indexer", post(handle));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    JsonRpcNodeClient::new(
        format!("http://{addr}/rpc"),
        format!("http://{addr}/indexer"),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn tip_header_decodes() {
    let client = spawn_node().await;
    let tip = client.get_tip_header().await.unwrap();
    assert_eq!(tip.number, 42);
    assert_eq!(tip.timestamp, 0x17d7c4b7c00);
}

#[tokio::test]
async fn missing_header_is_none() {
    let client = spawn_node().await;
    assert!(client.get_header_by_number(7).await.unwrap().is_none());
    assert!(client.get_header_by_number(42).await.unwrap().is_some());
}

#[tokio::test]
async fn batch_reports_items_individually() {
    let client = spawn_node().await;
    let unknown = H256::new([0x22; 32]);
    let results = client
        .batch_transactions(&[known_hash(), unknown, known_hash()])
        .await
        .unwrap();
    assert_eq!(results.len(), 3);
    let first = results[0].as_ref().unwrap().as_ref().unwrap();
    assert_eq!(first.transaction.as_ref().unwrap().hash, known_hash());
    assert!(matches!(results[1], Err(NodeError::Rpc { code: -32602, .. })));
    assert!(results[2].is_ok());
}

#[tokio::test]
async fn empty_batch_skips_round_trip() {
    let client = JsonRpcNodeClient::new(
        "http://127.0.0.1:9/rpc",
        "http://127.0.0.1:9/indexer",
        Duration::from_secs(1),
    )
    .unwrap();
    assert!(client.batch_transactions(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn cells_come_from_indexer() {
    let client = spawn_node().await;
    let key = SearchKey::lock(Script {
        code_hash: H256::ZERO,
        hash_type: ScriptHashType::Type,
        args: vec![1, 2, 3],
    });
    let page = client.get_cells(&key, Order::Asc, 100, None).await.unwrap();
    assert!(page.objects.is_empty());
    assert_eq!(page.last_cursor, "0x");
}

#[tokio::test]
async fn node_info_and_peers() {
    let client = spawn_node().await;
    assert_eq!(client.local_node_info().await.unwrap().version, "0.110.0");
    let peers = client.get_peers().await.unwrap();
    assert_eq!(peers.len(), 1);
    assert_eq!(peers[0].node_id, "QmPeer");
}

#[tokio::test]
async fn unreachable_node_is_transport_error() {
    let client = JsonRpcNodeClient::new(
        "http://127.0.0.1:9/rpc",
        "http://127.0.0.1:9/indexer",
        Duration::from_secs(1),
    )
    .unwrap();
    assert!(matches!(
        client.get_tip_header().await,
        Err(NodeError::Transport(_))
    ));
}
