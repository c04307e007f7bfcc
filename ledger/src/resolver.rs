//! Previous-output resolution.
//!
//! An input only names the output it spends. To know whose capacity moved,
//! and how much, the transaction that created that output has to be fetched.
//! References are deduplicated across a whole block and fetched in bounded
//! batches, with a few batches in flight at once.

use cellgate_node_client::{NodeError, NodeRpc};
use cellgate_types::{CellOutput, OutPoint, Transaction, H256};
use futures_util::stream::{self, StreamExt, TryStreamExt};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::{Deadline, LedgerError};

/// Batch round-trips allowed in flight for one resolution.
pub const MAX_IN_FLIGHT_BATCHES: usize = 4;

/// Distinct transaction hashes referenced by the inputs of `txs`, in order of
/// first appearance. Null references are skipped.
pub fn referenced_hashes<'a>(txs: impl IntoIterator<Item = &'a Transaction>) -> Vec<H256> {
    let mut seen = HashSet::new();
    txs.into_iter()
        .flat_map(|tx| tx.inputs.iter())
        .map(|input| &input.previous_output)
        .filter(|out_point| !out_point.is_null())
        .filter_map(|out_point| seen.insert(out_point.tx_hash).then_some(out_point.tx_hash))
        .collect()
}

/// Previously created transactions, keyed by hash.
#[derive(Clone, Debug, Default)]
pub struct ResolvedOutputs {
    txs: HashMap<H256, Transaction>,
}

impl ResolvedOutputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tx: Transaction) {
        self.txs.insert(tx.hash, tx);
    }

    /// The output `out_point` refers to.
    ///
    /// Asking for a transaction that was never resolved is a caller bug and
    /// fails immediately.
    pub fn output(&self, out_point: &OutPoint) -> Result<&CellOutput, LedgerError> {
        let tx = self
            .txs
            .get(&out_point.tx_hash)
            .ok_or(LedgerError::UnresolvedReference(*out_point))?;
        tx.outputs
            .get(out_point.index as usize)
            .ok_or(LedgerError::MissingPreviousOutput(*out_point))
    }
}

impl FromIterator<Transaction> for ResolvedOutputs {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        let mut resolved = Self::new();
        for tx in iter {
            resolved.insert(tx);
        }
        resolved
    }
}

async fn fetch_batch<N: NodeRpc>(
    node: &N,
    round: usize,
    batch: &[H256],
    deadline: Deadline,
) -> Result<Vec<(H256, Transaction)>, LedgerError> {
    debug!(round, size = batch.len(), "resolving previous transactions");
    let results = deadline.run(node.batch_transactions(batch)).await?;
    if results.len() != batch.len() {
        return Err(NodeError::InvalidResponse(format!(
            "batch of {} answered with {} results",
            batch.len(),
            results.len()
        ))
        .into());
    }
    batch
        .iter()
        .zip(results)
        .map(|(hash, item)| {
            let tx = item
                .inspect_err(|e| warn!(%hash, error = %e, "previous transaction lookup failed"))?
                .and_then(|with_status| with_status.transaction)
                .ok_or_else(|| {
                    warn!(%hash, "previous transaction missing from node");
                    LedgerError::MissingPreviousTransaction(*hash)
                })?;
            if tx.hash != *hash {
                warn!(requested = %hash, returned = %tx.hash, "node answered with another transaction");
                return Err(NodeError::InvalidResponse(format!(
                    "asked for {hash}, got {}",
                    tx.hash
                ))
                .into());
            }
            Ok((*hash, tx))
        })
        .collect()
}

/// Fetch every transaction in `hashes`.
///
/// Batches hold at most `max_batch_size` hashes; up to
/// [`MAX_IN_FLIGHT_BATCHES`] are outstanding at a time and their results are
/// consumed in request order. A failed or empty item anywhere fails the
/// whole resolution and stops further consumption.
pub async fn resolve<N: NodeRpc>(
    node: &N,
    hashes: &[H256],
    max_batch_size: usize,
    deadline: Deadline,
) -> Result<ResolvedOutputs, LedgerError> {
    let rounds: Vec<_> = hashes
        .chunks(max_batch_size.max(1))
        .enumerate()
        .map(|(round, batch)| fetch_batch(node, round, batch, deadline))
        .collect();
    let mut batches = std::pin::pin!(stream::iter(rounds).buffered(MAX_IN_FLIGHT_BATCHES));

    let mut resolved = ResolvedOutputs::new();
    while let Some(batch) = batches.try_next().await? {
        resolved.txs.extend(batch);
    }
    Ok(resolved)
}
