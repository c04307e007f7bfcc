//! JSON-RPC over HTTP implementation of [`NodeRpc`].

use async_trait::async_trait;
use cellgate_types::{
    hex, Block, BlockNumber, CellsPage, Header, LocalNode, Order, RemoteNode, SearchKey,
    Transaction, TransactionWithStatus, H256,
};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::jsonrpc::{self, Request, Response};
use crate::{NodeError, NodeResult, NodeRpc};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Talks to a node's chain RPC endpoint and its cell indexer endpoint.
#[derive(Clone)]
pub struct JsonRpcNodeClient {
    http: reqwest::Client,
    rpc_url: String,
    indexer_url: String,
    id_counter: Arc<AtomicU64>,
}

impl JsonRpcNodeClient {
    /// Create a client. `request_timeout` bounds each HTTP exchange.
    pub fn new(
        rpc_url: impl Into<String>,
        indexer_url: impl Into<String>,
        request_timeout: Duration,
    ) -> NodeResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(request_timeout)
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| NodeError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            rpc_url: rpc_url.into(),
            indexer_url: indexer_url.into(),
            id_counter: Arc::new(AtomicU64::new(0)),
        })
    }

    fn next_id(&self) -> u64 {
        self.id_counter.fetch_add(1, Ordering::Relaxed)
    }

    async fn post<B: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> NodeResult<R> {
        let response = self.http.post(url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NodeError::Transport(format!("node returned HTTP {status}")));
        }
        response
            .json()
            .await
            .map_err(|e| NodeError::InvalidResponse(e.to_string()))
    }

    async fn call<P: Serialize + Send + Sync, R: DeserializeOwned>(
        &self,
        url: &str,
        method: &str,
        params: P,
    ) -> NodeResult<R> {
        let request = Request::new(self.next_id(), method, params);
        debug!(method, id = request.id, "node rpc call");
        let response: Response = self.post(url, &request).await?;
        let value = response.into_result().inspect_err(|e| {
            warn!(method, error = %e, "node rpc call failed");
        })?;
        decode(method, value)
    }

    async fn rpc<P: Serialize + Send + Sync, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> NodeResult<R> {
        self.call(&self.rpc_url, method, params).await
    }
}

fn no_params() -> [(); 0] {
    []
}

fn decode<R: DeserializeOwned>(method: &str, value: serde_json::Value) -> NodeResult<R> {
    serde_json::from_value(value)
        .map_err(|e| NodeError::InvalidResponse(format!("{method}: {e}")))
}

#[async_trait]
impl NodeRpc for JsonRpcNodeClient {
    async fn get_block_by_number(&self, number: BlockNumber) -> NodeResult<Option<Block>> {
        self.rpc("get_block_by_number", [hex::encode_uint(number)])
            .await
    }

    async fn get_block(&self, hash: &H256) -> NodeResult<Option<Block>> {
        self.rpc("get_block", [hash]).await
    }

    async fn get_transaction(&self, hash: &H256) -> NodeResult<Option<TransactionWithStatus>> {
        self.rpc("get_transaction", [hash]).await
    }

    async fn batch_transactions(
        &self,
        hashes: &[H256],
    ) -> NodeResult<Vec<NodeResult<Option<TransactionWithStatus>>>> {
        if hashes.is_empty() {
            return Ok(Vec::new());
        }
        let requests: Vec<_> = hashes
            .iter()
            .map(|hash| Request::new(self.next_id(), "get_transaction", [hash]))
            .collect();
        let ids: Vec<u64> = requests.iter().map(|r| r.id).collect();
        debug!(count = requests.len(), "node rpc batch");
        let responses: Vec<Response> = self.post(&self.rpc_url, &requests).await?;
        Ok(jsonrpc::match_batch(&ids, responses)
            .into_iter()
            .map(|item| item.and_then(|value| decode("get_transaction", value)))
            .collect())
    }

    async fn get_header_by_number(&self, number: BlockNumber) -> NodeResult<Option<Header>> {
        self.rpc("get_header_by_number", [hex::encode_uint(number)])
            .await
    }

    async fn get_tip_header(&self) -> NodeResult<Header> {
        self.rpc("get_tip_header", no_params()).await
    }

    async fn get_cells(
        &self,
        search_key: &SearchKey,
        order: Order,
        limit: u32,
        after: Option<&str>,
    ) -> NodeResult<CellsPage> {
        let params = (
            search_key,
            order,
            hex::encode_uint(u64::from(limit)),
            after,
        );
        self.call(&self.indexer_url, "get_cells", params).await
    }

    async fn send_transaction(&self, tx: &Transaction) -> NodeResult<H256> {
        self.rpc("send_transaction", (tx.raw(), "passthrough")).await
    }

    async fn get_peers(&self) -> NodeResult<Vec<RemoteNode>> {
        self.rpc("get_peers", no_params()).await
    }

    async fn local_node_info(&self) -> NodeResult<LocalNode> {
        self.rpc("local_node_info", no_params()).await
    }
}
