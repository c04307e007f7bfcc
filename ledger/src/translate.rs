//! Single transaction -> operations.

use cellgate_address::generate_address;
use cellgate_types::{
    AccountIdentifier, Amount, Capacity, Operation, OperationIdentifier, OperationStatus,
    OperationType, Script, StandardTransaction, Transaction, TransactionIdentifier,
};

use crate::{EngineConfig, LedgerError, ResolvedOutputs};

/// Accumulates operations with contiguous indices.
struct Operations<'a> {
    config: &'a EngineConfig,
    ops: Vec<Operation>,
}

impl<'a> Operations<'a> {
    fn new(config: &'a EngineConfig, capacity: usize) -> Self {
        Self {
            config,
            ops: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, kind: OperationType, lock: &Script, amount: Amount) {
        let index = self.ops.len() as u64;
        self.ops.push(Operation {
            operation_identifier: OperationIdentifier { index },
            kind,
            status: OperationStatus::Success,
            account: AccountIdentifier {
                address: generate_address(self.config.network, lock),
            },
            amount,
        });
    }

    fn credit(&mut self, kind: OperationType, lock: &Script, capacity: Capacity) {
        let amount = Amount::credit(capacity, &self.config.currency);
        self.push(kind, lock, amount);
    }

    fn debit(&mut self, lock: &Script, capacity: Capacity) {
        let amount = Amount::debit(capacity, &self.config.currency);
        self.push(OperationType::Transfer, lock, amount);
    }
}

/// Translate `tx`, found at `position` in its block.
///
/// Position 0 is the block's issuance transaction: each output is a
/// `Reward` and inputs are ignored. Any other transaction debits the owner
/// of every spent output, then credits the owner of every new output with
/// the configured credit label. `resolved` must cover all non-null inputs.
pub fn translate_transaction(
    config: &EngineConfig,
    tx: &Transaction,
    position: usize,
    resolved: &ResolvedOutputs,
) -> Result<StandardTransaction, LedgerError> {
    let mut ops = Operations::new(config, tx.inputs.len() + tx.outputs.len());

    if position == 0 {
        for output in &tx.outputs {
            ops.credit(OperationType::Reward, &output.lock, output.capacity);
        }
    } else {
        for input in &tx.inputs {
            if input.previous_output.is_null() {
                continue;
            }
            let spent = resolved.output(&input.previous_output)?;
            ops.debit(&spent.lock, spent.capacity);
        }
        for output in &tx.outputs {
            ops.credit(config.credit_operation, &output.lock, output.capacity);
        }
    }

    Ok(StandardTransaction {
        transaction_identifier: TransactionIdentifier { hash: tx.hash },
        operations: ops.ops,
    })
}
