//! Cell indexer query and result types.

use serde::{Deserialize, Serialize};

use crate::{BlockNumber, CellOutput, OutPoint, Script};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScriptType {
    Lock,
    Type,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    Asc,
    Desc,
}

/// Selects live cells by script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchKey {
    pub script: Script,
    pub script_type: ScriptType,
}

impl SearchKey {
    pub fn lock(script: Script) -> Self {
        Self {
            script,
            script_type: ScriptType::Lock,
        }
    }
}

/// A live cell returned by the indexer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexerCell {
    pub output: CellOutput,
    #[serde(default, with = "crate::hex::option_bytes")]
    pub output_data: Option<Vec<u8>>,
    pub out_point: OutPoint,
    /// Height of the block that created the cell.
    #[serde(with = "crate::hex::uint64")]
    pub block_number: BlockNumber,
    #[serde(with = "crate::hex::uint32")]
    pub tx_index: u32,
}

/// One page of a cursor-paginated cell scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellsPage {
    pub objects: Vec<IndexerCell>,
    /// Opaque continuation cursor for the next page.
    pub last_cursor: String,
}
