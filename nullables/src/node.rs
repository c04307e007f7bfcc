//! Nullable node: an in-memory chain behind the node capability trait.

use async_trait::async_trait;
use cellgate_node_client::{NodeError, NodeResult, NodeRpc};
use cellgate_types::{
    transaction::Status, Block, BlockNumber, CellsPage, Header, IndexerCell, LocalNode, Order,
    RemoteNode, ScriptType, SearchKey, Transaction, TransactionWithStatus, TxStatus, H256,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
struct State {
    blocks: BTreeMap<BlockNumber, Block>,
    headers: BTreeMap<BlockNumber, Header>,
    transactions: HashMap<H256, TransactionWithStatus>,
    tip: Option<Header>,
    cells: Vec<IndexerCell>,
    failing: HashSet<H256>,
    unreachable: bool,
    latency: Option<Duration>,
    rejection: Option<(i64, String)>,
    pending_tip: Option<Header>,
    peers: Vec<RemoteNode>,
    version: String,
    // Recorded calls
    batch_sizes: Vec<usize>,
    page_cursors: Vec<Option<String>>,
    submitted: Vec<Transaction>,
}

/// A test node that serves an in-memory chain.
/// Thread-safe for use with tokio's multi-threaded runtime.
pub struct NullNode {
    state: Mutex<State>,
}

impl NullNode {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                version: "0.0.0-null".to_string(),
                ..State::default()
            }),
        }
    }

    /// Add a block. Its transactions become committed in it and the tip
    /// moves to it if it is the highest block so far.
    pub fn add_block(&self, block: Block) {
        let mut state = self.state.lock().unwrap();
        for tx in &block.transactions {
            state.transactions.insert(
                tx.hash,
                TransactionWithStatus {
                    transaction: Some(tx.clone()),
                    tx_status: TxStatus {
                        status: Status::Committed,
                        block_hash: Some(block.header.hash),
                    },
                },
            );
        }
        let header = block.header.clone();
        if state.tip.as_ref().map_or(true, |tip| tip.number < header.number) {
            state.tip = Some(header.clone());
        }
        state.headers.insert(header.number, header.clone());
        state.blocks.insert(header.number, block);
    }

    /// Add a transaction committed in a block the node does not serve.
    pub fn add_transaction(&self, tx: Transaction, block_hash: H256) {
        self.state.lock().unwrap().transactions.insert(
            tx.hash,
            TransactionWithStatus {
                transaction: Some(tx),
                tx_status: TxStatus {
                    status: Status::Committed,
                    block_hash: Some(block_hash),
                },
            },
        );
    }

    /// Serve `tx` for lookups of `hash`, whatever `tx`'s own hash is.
    pub fn answer_with(&self, hash: H256, tx: Transaction) {
        self.state.lock().unwrap().transactions.insert(
            hash,
            TransactionWithStatus {
                transaction: Some(tx),
                tx_status: TxStatus {
                    status: Status::Committed,
                    block_hash: None,
                },
            },
        );
    }

    /// Add a header without a block body.
    pub fn add_header(&self, header: Header) {
        self.state
            .lock()
            .unwrap()
            .headers
            .insert(header.number, header);
    }

    /// Add a live cell to the indexer. Cells are served in
    /// `(block_number, tx_index)` order.
    pub fn add_cell(&self, cell: IndexerCell) {
        let mut state = self.state.lock().unwrap();
        state.cells.push(cell);
        state
            .cells
            .sort_by_key(|cell| (cell.block_number, cell.tx_index, cell.out_point.index));
    }

    /// Make batch lookups of `hash` fail with a node error.
    pub fn fail_transaction(&self, hash: H256) {
        self.state.lock().unwrap().failing.insert(hash);
    }

    /// Make every call fail as if the node were down.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.state.lock().unwrap().unreachable = unreachable;
    }

    /// Delay every call.
    pub fn set_latency(&self, latency: Duration) {
        self.state.lock().unwrap().latency = Some(latency);
    }

    /// Reject every submitted transaction with this node error.
    pub fn reject_submissions(&self, code: i64, message: impl Into<String>) {
        self.state.lock().unwrap().rejection = Some((code, message.into()));
    }

    /// Advance the tip to `header` right after the next cell page is served,
    /// as if a block arrived mid-scan.
    pub fn advance_tip_during_scan(&self, header: Header) {
        self.state.lock().unwrap().pending_tip = Some(header);
    }

    pub fn add_peer(&self, node_id: impl Into<String>) {
        self.state.lock().unwrap().peers.push(RemoteNode {
            node_id: node_id.into(),
            version: String::new(),
        });
    }

    pub fn set_version(&self, version: impl Into<String>) {
        self.state.lock().unwrap().version = version.into();
    }

    /// Sizes of the transaction batches requested so far.
    pub fn batch_sizes(&self) -> Vec<usize> {
        self.state.lock().unwrap().batch_sizes.clone()
    }

    /// Cursor of every cell page requested so far.
    pub fn page_cursors(&self) -> Vec<Option<String>> {
        self.state.lock().unwrap().page_cursors.clone()
    }

    /// Transactions accepted by `send_transaction`.
    pub fn submitted(&self) -> Vec<Transaction> {
        self.state.lock().unwrap().submitted.clone()
    }

    async fn enter(&self) -> NodeResult<()> {
        let (latency, unreachable) = {
            let state = self.state.lock().unwrap();
            (state.latency, state.unreachable)
        };
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
        if unreachable {
            return Err(NodeError::Transport("connection refused".into()));
        }
        Ok(())
    }
}

impl Default for NullNode {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_cursor(position: usize) -> String {
    format!("{position:#x}")
}

fn decode_cursor(cursor: &str) -> NodeResult<usize> {
    cursor
        .strip_prefix("0x")
        .and_then(|digits| usize::from_str_radix(digits, 16).ok())
        .ok_or_else(|| NodeError::Rpc {
            code: -32602,
            message: format!("invalid cursor {cursor}"),
        })
}

#[async_trait]
impl NodeRpc for NullNode {
    async fn get_block_by_number(&self, number: BlockNumber) -> NodeResult<Option<Block>> {
        self.enter().await?;
        Ok(self.state.lock().unwrap().blocks.get(&number).cloned())
    }

    async fn get_block(&self, hash: &H256) -> NodeResult<Option<Block>> {
        self.enter().await?;
        let state = self.state.lock().unwrap();
        Ok(state
            .blocks
            .values()
            .find(|block| block.header.hash == *hash)
            .cloned())
    }

    async fn get_transaction(&self, hash: &H256) -> NodeResult<Option<TransactionWithStatus>> {
        self.enter().await?;
        Ok(self.state.lock().unwrap().transactions.get(hash).cloned())
    }

    async fn batch_transactions(
        &self,
        hashes: &[H256],
    ) -> NodeResult<Vec<NodeResult<Option<TransactionWithStatus>>>> {
        self.enter().await?;
        let mut state = self.state.lock().unwrap();
        state.batch_sizes.push(hashes.len());
        Ok(hashes
            .iter()
            .map(|hash| {
                if state.failing.contains(hash) {
                    Err(NodeError::Rpc {
                        code: -1,
                        message: format!("lookup of {hash} failed"),
                    })
                } else {
                    Ok(state.transactions.get(hash).cloned())
                }
            })
            .collect())
    }

    async fn get_header_by_number(&self, number: BlockNumber) -> NodeResult<Option<Header>> {
        self.enter().await?;
        Ok(self.state.lock().unwrap().headers.get(&number).cloned())
    }

    async fn get_tip_header(&self) -> NodeResult<Header> {
        self.enter().await?;
        self.state
            .lock()
            .unwrap()
            .tip
            .clone()
            .ok_or_else(|| NodeError::InvalidResponse("node has no blocks".into()))
    }

    async fn get_cells(
        &self,
        search_key: &SearchKey,
        order: Order,
        limit: u32,
        after: Option<&str>,
    ) -> NodeResult<CellsPage> {
        self.enter().await?;
        let start = after.map(decode_cursor).transpose()?.unwrap_or(0);
        let mut state = self.state.lock().unwrap();
        state.page_cursors.push(after.map(str::to_string));

        let mut matching: Vec<&IndexerCell> = state
            .cells
            .iter()
            .filter(|cell| match search_key.script_type {
                ScriptType::Lock => cell.output.lock == search_key.script,
                ScriptType::Type => cell.output.type_.as_ref() == Some(&search_key.script),
            })
            .collect();
        if order == Order::Desc {
            matching.reverse();
        }
        let objects: Vec<IndexerCell> = matching
            .into_iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();
        let page = CellsPage {
            last_cursor: encode_cursor(start + objects.len()),
            objects,
        };

        if let Some(header) = state.pending_tip.take() {
            state.headers.insert(header.number, header.clone());
            state.tip = Some(header);
        }
        Ok(page)
    }

    async fn send_transaction(&self, tx: &Transaction) -> NodeResult<H256> {
        self.enter().await?;
        let mut state = self.state.lock().unwrap();
        if let Some((code, message)) = state.rejection.clone() {
            return Err(NodeError::Rpc { code, message });
        }
        state.submitted.push(tx.clone());
        Ok(tx.hash)
    }

    async fn get_peers(&self) -> NodeResult<Vec<RemoteNode>> {
        self.enter().await?;
        Ok(self.state.lock().unwrap().peers.clone())
    }

    async fn local_node_info(&self) -> NodeResult<LocalNode> {
        self.enter().await?;
        let state = self.state.lock().unwrap();
        Ok(LocalNode {
            node_id: "null".to_string(),
            version: state.version.clone(),
        })
    }
}
