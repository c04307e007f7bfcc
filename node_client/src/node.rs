//! The node capability trait.

use async_trait::async_trait;
use cellgate_types::{
    Block, BlockNumber, CellsPage, Header, LocalNode, Order, RemoteNode, SearchKey, Transaction,
    TransactionWithStatus, H256,
};

use crate::NodeResult;

/// Chain capabilities consumed by the ledger engine.
#[async_trait]
pub trait NodeRpc: Send + Sync + 'static {
    async fn get_block_by_number(&self, number: BlockNumber) -> NodeResult<Option<Block>>;

    async fn get_block(&self, hash: &H256) -> NodeResult<Option<Block>>;

    async fn get_transaction(&self, hash: &H256) -> NodeResult<Option<TransactionWithStatus>>;

    /// Fetch several transactions in one round-trip.
    ///
    /// The outer result fails when the round-trip itself fails. Otherwise the
    /// returned vector is aligned with `hashes`, one result per item.
    async fn batch_transactions(
        &self,
        hashes: &[H256],
    ) -> NodeResult<Vec<NodeResult<Option<TransactionWithStatus>>>>;

    async fn get_header_by_number(&self, number: BlockNumber) -> NodeResult<Option<Header>>;

    async fn get_tip_header(&self) -> NodeResult<Header>;

    /// One page of live cells matching `search_key`.
    ///
    /// `after` is the cursor returned by the previous page, `None` for the
    /// first page.
    async fn get_cells(
        &self,
        search_key: &SearchKey,
        order: Order,
        limit: u32,
        after: Option<&str>,
    ) -> NodeResult<CellsPage>;

    /// Submit a signed transaction; returns the hash the node assigned.
    async fn send_transaction(&self, tx: &Transaction) -> NodeResult<H256>;

    async fn get_peers(&self) -> NodeResult<Vec<RemoteNode>>;

    async fn local_node_info(&self) -> NodeResult<LocalNode>;
}
