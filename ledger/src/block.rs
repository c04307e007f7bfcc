//! Whole block -> standardized block.

use cellgate_types::{Block, BlockIdentifier, StandardBlock, H256};

use crate::translate::translate_transaction;
use crate::{resolver, EngineConfig, LedgerError, ResolvedOutputs};

/// Every distinct transaction the block's inputs spend from. The issuance
/// transaction at position 0 spends nothing and is skipped.
pub fn block_references(block: &Block) -> Vec<H256> {
    resolver::referenced_hashes(block.transactions.iter().skip(1))
}

/// Translate `block` using previously resolved outputs.
///
/// An issuance transaction without outputs contributes no operations and is
/// left out; every other transaction is kept in block order, even when it
/// yields no operations. The first failing transaction fails the block.
pub fn assemble_block(
    config: &EngineConfig,
    block: &Block,
    resolved: &ResolvedOutputs,
) -> Result<StandardBlock, LedgerError> {
    let mut transactions = Vec::with_capacity(block.transactions.len());
    for (position, tx) in block.transactions.iter().enumerate() {
        if position == 0 && tx.outputs.is_empty() {
            continue;
        }
        transactions.push(translate_transaction(config, tx, position, resolved)?);
    }
    Ok(StandardBlock {
        block_identifier: BlockIdentifier::of(&block.header),
        parent_block_identifier: BlockIdentifier::parent_of(&block.header),
        timestamp: block.header.timestamp,
        transactions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use cellgate_types::{
        Capacity, CellInput, CellOutput, Header, NetworkId, OperationType, OutPoint,
        RawTransaction, Script, ScriptHashType, Transaction,
    };

    fn lock() -> Script {
        Script {
            code_hash: H256::new([0x42; 32]),
            hash_type: ScriptHashType::Data1,
            args: vec![1, 2, 3],
        }
    }

    fn tx(hash: u8, inputs: &[(u8, u32)], capacities: &[u64]) -> Transaction {
        RawTransaction {
            version: 0,
            cell_deps: vec![],
            header_deps: vec![],
            inputs: inputs
                .iter()
                .map(|&(h, index)| CellInput {
                    since: 0,
                    previous_output: OutPoint::new(H256::new([h; 32]), index),
                })
                .collect(),
            outputs: capacities
                .iter()
                .map(|&c| CellOutput {
                    capacity: Capacity::shannons(c),
                    lock: lock(),
                    type_: None,
                })
                .collect(),
            outputs_data: vec![Vec::new(); capacities.len()],
            witnesses: vec![],
        }
        .with_hash(H256::new([hash; 32]))
    }

    fn block(number: u64, transactions: Vec<Transaction>) -> Block {
        Block {
            header: Header {
                number,
                hash: H256::new([0xb0; 32]),
                parent_hash: H256::new([0xaf; 32]),
                timestamp: 1_600_000_000_000,
            },
            transactions,
        }
    }

    #[test]
    fn references_skip_issuance() {
        let b = block(
            10,
            vec![
                tx(1, &[(0, u32::MAX)], &[100]),
                tx(2, &[(7, 0), (8, 0)], &[1]),
                tx(3, &[(7, 1)], &[1]),
            ],
        );
        assert_eq!(
            block_references(&b),
            vec![H256::new([7; 32]), H256::new([8; 32])]
        );
    }

    #[test]
    fn identifiers_and_order() {
        let prev = tx(7, &[], &[5, 6]);
        let b = block(
            10,
            vec![
                tx(1, &[(0, u32::MAX)], &[100]),
                tx(2, &[(7, 0)], &[]),
                tx(3, &[(7, 1)], &[6]),
            ],
        );
        let resolved: ResolvedOutputs = [prev].into_iter().collect();
        let config = EngineConfig::new(NetworkId::Testnet);

        let standard = assemble_block(&config, &b, &resolved).unwrap();
        assert_eq!(standard.block_identifier, BlockIdentifier::new(10, b.header.hash));
        assert_eq!(
            standard.parent_block_identifier,
            BlockIdentifier::new(9, b.header.parent_hash)
        );
        assert_eq!(standard.timestamp, 1_600_000_000_000);

        let hashes: Vec<_> = standard
            .transactions
            .iter()
            .map(|t| t.transaction_identifier.hash)
            .collect();
        assert_eq!(hashes, vec![H256::new([1; 32]), H256::new([2; 32]), H256::new([3; 32])]);
        assert_eq!(standard.transactions[0].operations[0].kind, OperationType::Reward);
        // A transaction that only burns capacity still appears.
        assert_eq!(standard.transactions[1].operations.len(), 1);
        assert_eq!(standard.transactions[1].operations[0].amount.value, "-5");
    }

    #[test]
    fn genesis_parent_is_itself() {
        let b = block(0, vec![tx(1, &[(0, u32::MAX)], &[100])]);
        let standard =
            assemble_block(&EngineConfig::default(), &b, &ResolvedOutputs::new()).unwrap();
        assert_eq!(standard.parent_block_identifier, standard.block_identifier);
    }

    #[test]
    fn empty_issuance_is_omitted() {
        let b = block(5, vec![tx(1, &[(0, u32::MAX)], &[])]);
        let standard =
            assemble_block(&EngineConfig::default(), &b, &ResolvedOutputs::new()).unwrap();
        assert!(standard.transactions.is_empty());
    }

    #[test]
    fn unresolved_input_fails_whole_block() {
        let b = block(
            10,
            vec![tx(1, &[(0, u32::MAX)], &[100]), tx(2, &[(7, 0)], &[1])],
        );
        assert!(matches!(
            assemble_block(&EngineConfig::default(), &b, &ResolvedOutputs::new()),
            Err(LedgerError::UnresolvedReference(_))
        ));
    }
}
