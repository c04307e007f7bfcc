//! The engine: every operation the API layer exposes.

use cellgate_address::parse_address;
use cellgate_codec::{decode_transaction, encode_transaction};
use cellgate_node_client::{NodeError, NodeRpc};
use cellgate_types::{
    transaction::Status, AccountBalance, Block, BlockNumber, NetworkIdentifier, NetworkStatus,
    StandardBlock, StandardTransaction, Transaction, TransactionIdentifier, H256,
};
use tracing::{debug, info, warn};

use crate::block::{assemble_block, block_references};
use crate::translate::translate_transaction;
use crate::{balance, network, resolver, Deadline, EngineConfig, LedgerError};

/// Which block a request is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockRef {
    Number(BlockNumber),
    Hash(H256),
    /// The current chain tip.
    Latest,
}

impl BlockRef {
    fn describe(&self) -> String {
        match self {
            Self::Number(number) => format!("#{number}"),
            Self::Hash(hash) => hash.to_string(),
            Self::Latest => "tip".to_string(),
        }
    }
}

/// Translates node data on demand. Holds only the node handle and its
/// configuration, so one engine can serve any number of concurrent requests.
pub struct LedgerEngine<N> {
    node: N,
    config: EngineConfig,
}

impl<N: NodeRpc> LedgerEngine<N> {
    pub fn new(node: N, config: EngineConfig) -> Result<Self, LedgerError> {
        config.validate()?;
        Ok(Self { node, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn node(&self) -> &N {
        &self.node
    }

    pub fn network_identifier(&self) -> NetworkIdentifier {
        NetworkIdentifier::for_network(self.config.network)
    }

    /// A fresh deadline using the configured request budget.
    pub fn deadline(&self) -> Deadline {
        Deadline::after(self.config.request_timeout)
    }

    async fn fetch_block(&self, block: BlockRef, deadline: Deadline) -> Result<Block, LedgerError> {
        let found = match block {
            BlockRef::Number(number) => deadline.run(self.node.get_block_by_number(number)).await?,
            BlockRef::Hash(hash) => deadline.run(self.node.get_block(&hash)).await?,
            BlockRef::Latest => {
                let tip = deadline.run(self.node.get_tip_header()).await?;
                deadline.run(self.node.get_block(&tip.hash)).await?
            }
        };
        found.ok_or_else(|| LedgerError::BlockNotFound(block.describe()))
    }

    async fn block_hash(&self, block: BlockRef, deadline: Deadline) -> Result<H256, LedgerError> {
        match block {
            BlockRef::Hash(hash) => Ok(hash),
            BlockRef::Number(number) => deadline
                .run(self.node.get_header_by_number(number))
                .await?
                .map(|header| header.hash)
                .ok_or_else(|| LedgerError::BlockNotFound(block.describe())),
            BlockRef::Latest => Ok(deadline.run(self.node.get_tip_header()).await?.hash),
        }
    }

    /// Translate a whole block.
    ///
    /// Previous outputs for every transaction are resolved together before
    /// any transaction is translated; nothing is returned unless all of them
    /// translate.
    pub async fn block(
        &self,
        block: BlockRef,
        deadline: Deadline,
    ) -> Result<StandardBlock, LedgerError> {
        let native = self.fetch_block(block, deadline).await?;
        let references = block_references(&native);
        debug!(
            number = native.header.number,
            transactions = native.transactions.len(),
            references = references.len(),
            "translating block"
        );
        let resolved = resolver::resolve(
            &self.node,
            &references,
            self.config.max_batch_size,
            deadline,
        )
        .await?;
        assemble_block(&self.config, &native, &resolved)
    }

    /// Translate one committed transaction of `block`.
    ///
    /// The transaction must be committed in that very block. A cellbase is
    /// always the first transaction of its block and is translated as the
    /// block's issuance.
    pub async fn block_transaction(
        &self,
        block: BlockRef,
        tx_hash: H256,
        deadline: Deadline,
    ) -> Result<StandardTransaction, LedgerError> {
        let block_hash = self.block_hash(block, deadline).await?;
        let with_status = deadline
            .run(self.node.get_transaction(&tx_hash))
            .await?
            .ok_or(LedgerError::TransactionNotFound(tx_hash))?;
        let in_block = with_status.tx_status.status == Status::Committed
            && with_status.tx_status.block_hash == Some(block_hash);
        let tx = match with_status.transaction {
            Some(tx) if in_block => tx,
            _ => return Err(LedgerError::TransactionNotFound(tx_hash)),
        };

        let position = if tx.is_cellbase() { 0 } else { 1 };
        let resolved = if position == 0 {
            resolver::ResolvedOutputs::new()
        } else {
            let references = resolver::referenced_hashes([&tx]);
            resolver::resolve(
                &self.node,
                &references,
                self.config.max_batch_size,
                deadline,
            )
            .await?
        };
        translate_transaction(&self.config, &tx, position, &resolved)
    }

    /// Live capacity controlled by `address`.
    ///
    /// The address is checked before the node is contacted.
    pub async fn account_balance(
        &self,
        address: &str,
        deadline: Deadline,
    ) -> Result<AccountBalance, LedgerError> {
        let address = parse_address(address)?.require_network(self.config.network)?;
        balance::account_balance(
            &self.node,
            address.script,
            &self.config.currency,
            self.config.page_size,
            deadline,
        )
        .await
    }

    /// Decode a signed transaction and hand it to the node.
    pub async fn submit(
        &self,
        signed: &str,
        deadline: Deadline,
    ) -> Result<TransactionIdentifier, LedgerError> {
        let tx = decode_transaction(signed)?;
        match deadline.run(self.node.send_transaction(&tx)).await {
            Ok(hash) => {
                info!(%hash, "transaction submitted");
                Ok(TransactionIdentifier { hash })
            }
            Err(LedgerError::Node(NodeError::Rpc { code, message })) => {
                warn!(code, %message, "transaction rejected");
                Err(LedgerError::Rejected { code, message })
            }
            Err(e) => Err(e),
        }
    }

    /// Wire form of `tx`, for callers preparing a transaction for signing.
    pub fn encode(&self, tx: &Transaction) -> Result<String, LedgerError> {
        Ok(encode_transaction(tx)?)
    }

    pub async fn network_status(&self, deadline: Deadline) -> Result<NetworkStatus, LedgerError> {
        network::network_status(&self.node, deadline).await
    }

    pub async fn node_version(&self, deadline: Deadline) -> Result<String, LedgerError> {
        network::node_version(&self.node, deadline).await
    }
}
