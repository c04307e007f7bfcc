//! Cells and the references between them.

use serde::{Deserialize, Serialize};

use crate::{Capacity, Script, H256};

/// Identifies a single output of a single transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    pub tx_hash: H256,
    #[serde(with = "crate::hex::uint32")]
    pub index: u32,
}

impl OutPoint {
    pub fn new(tx_hash: H256, index: u32) -> Self {
        Self { tx_hash, index }
    }

    /// True for the all-zero reference carried by cellbase inputs.
    pub fn is_null(&self) -> bool {
        self.tx_hash.is_zero()
    }
}

/// A transaction input: the output it spends plus a lock-time condition.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellInput {
    #[serde(with = "crate::hex::uint64")]
    pub since: u64,
    pub previous_output: OutPoint,
}

/// A cell: capacity guarded by a lock script, optionally typed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellOutput {
    pub capacity: Capacity,
    pub lock: Script,
    #[serde(rename = "type", default)]
    pub type_: Option<Script>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepType {
    Code,
    DepGroup,
}

/// A cell the transaction loads code or data from without consuming it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellDep {
    pub out_point: OutPoint,
    pub dep_type: DepType,
}
