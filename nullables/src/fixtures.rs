//! Builders for chain data used by tests.

use cellgate_types::{
    Block, BlockNumber, Capacity, CellInput, CellOutput, Header, IndexerCell, OutPoint,
    RawTransaction, Script, ScriptHashType, Transaction, H256,
};

/// Type hash of the default secp256k1-blake160 lock.
const DEFAULT_LOCK_CODE_HASH: [u8; 32] = [
    0x9b, 0xd7, 0xe0, 0x6f, 0x3e, 0xcf, 0x4b, 0xe0, 0xf2, 0xfc, 0xd2, 0x18, 0x8b, 0x23, 0xf1, 0xb9,
    0xfc, 0xc8, 0x8e, 0x5d, 0x4b, 0x65, 0xa8, 0x63, 0x7b, 0x17, 0x72, 0x3b, 0xbd, 0xa3, 0xcc, 0xe8,
];

/// A default lock owned by `owner`.
pub fn lock(owner: u8) -> Script {
    Script {
        code_hash: H256::new(DEFAULT_LOCK_CODE_HASH),
        hash_type: ScriptHashType::Type,
        args: vec![owner; 20],
    }
}

pub fn output(owner: u8, capacity: u64) -> CellOutput {
    CellOutput {
        capacity: Capacity::shannons(capacity),
        lock: lock(owner),
        type_: None,
    }
}

/// A hash that is distinct for every `(tag, n)` pair.
pub fn hash(tag: u8, n: u64) -> H256 {
    let mut bytes = [0u8; 32];
    bytes[0] = tag;
    bytes[24..].copy_from_slice(&n.to_be_bytes());
    H256::new(bytes)
}

pub fn tx_hash(n: u64) -> H256 {
    hash(0x7a, n)
}

pub fn transaction(n: u64, inputs: Vec<OutPoint>, outputs: Vec<CellOutput>) -> Transaction {
    let outputs_data = vec![Vec::new(); outputs.len()];
    RawTransaction {
        version: 0,
        cell_deps: vec![],
        header_deps: vec![],
        inputs: inputs
            .into_iter()
            .map(|previous_output| CellInput {
                since: 0,
                previous_output,
            })
            .collect(),
        outputs,
        outputs_data,
        witnesses: vec![vec![0x55; 16]],
    }
    .with_hash(tx_hash(n))
}

/// An issuance transaction for block `number`.
pub fn cellbase(n: u64, number: BlockNumber, outputs: Vec<CellOutput>) -> Transaction {
    let mut tx = transaction(n, vec![OutPoint::new(H256::ZERO, u32::MAX)], outputs);
    tx.inputs[0].since = number;
    tx
}

pub fn header(number: BlockNumber) -> Header {
    Header {
        number,
        hash: hash(0xb1, number),
        parent_hash: match number {
            0 => H256::ZERO,
            n => hash(0xb1, n - 1),
        },
        timestamp: 1_573_852_190_812 + number * 8_000,
    }
}

pub fn block(number: BlockNumber, transactions: Vec<Transaction>) -> Block {
    Block {
        header: header(number),
        transactions,
    }
}

/// A live cell of `owner` created at `block_number`.
pub fn live_cell(owner: u8, capacity: u64, block_number: BlockNumber, n: u32) -> IndexerCell {
    IndexerCell {
        output: output(owner, capacity),
        output_data: Some(Vec::new()),
        out_point: OutPoint::new(hash(0xce, u64::from(n)), 0),
        block_number,
        tx_index: n,
    }
}
