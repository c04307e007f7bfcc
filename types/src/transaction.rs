//! Native transactions.

use serde::{Deserialize, Serialize};

use crate::{CellDep, CellInput, CellOutput, H256};

/// A transaction as the node reports it.
///
/// `hash` is content-derived by the node; it is carried as an opaque
/// identifier and never recomputed here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(with = "crate::hex::uint32")]
    pub version: u32,
    #[serde(default)]
    pub hash: H256,
    pub cell_deps: Vec<CellDep>,
    pub header_deps: Vec<H256>,
    pub inputs: Vec<CellInput>,
    pub outputs: Vec<CellOutput>,
    #[serde(with = "crate::hex::bytes_vec")]
    pub outputs_data: Vec<Vec<u8>>,
    #[serde(with = "crate::hex::bytes_vec")]
    pub witnesses: Vec<Vec<u8>>,
}

impl Transaction {
    /// A cellbase spends nothing: its first input carries the null out point.
    pub fn is_cellbase(&self) -> bool {
        self.inputs
            .first()
            .is_some_and(|input| input.previous_output.is_null())
    }

    /// The transaction without its hash, as submitted to the node.
    pub fn raw(&self) -> RawTransaction {
        RawTransaction {
            version: self.version,
            cell_deps: self.cell_deps.clone(),
            header_deps: self.header_deps.clone(),
            inputs: self.inputs.clone(),
            outputs: self.outputs.clone(),
            outputs_data: self.outputs_data.clone(),
            witnesses: self.witnesses.clone(),
        }
    }
}

/// Every transaction field except the hash, in wire order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(with = "crate::hex::uint32")]
    pub version: u32,
    pub cell_deps: Vec<CellDep>,
    pub header_deps: Vec<H256>,
    pub inputs: Vec<CellInput>,
    pub outputs: Vec<CellOutput>,
    #[serde(with = "crate::hex::bytes_vec")]
    pub outputs_data: Vec<Vec<u8>>,
    #[serde(with = "crate::hex::bytes_vec")]
    pub witnesses: Vec<Vec<u8>>,
}

impl RawTransaction {
    /// Attach a hash, producing the full transaction.
    pub fn with_hash(self, hash: H256) -> Transaction {
        Transaction {
            version: self.version,
            hash,
            cell_deps: self.cell_deps,
            header_deps: self.header_deps,
            inputs: self.inputs,
            outputs: self.outputs,
            outputs_data: self.outputs_data,
            witnesses: self.witnesses,
        }
    }
}

/// Pool/chain status of a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Proposed,
    Committed,
    Rejected,
    #[serde(other)]
    Unknown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxStatus {
    pub status: Status,
    #[serde(default)]
    pub block_hash: Option<H256>,
}

/// A transaction together with its inclusion status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionWithStatus {
    #[serde(default)]
    pub transaction: Option<Transaction>,
    pub tx_status: TxStatus,
}
