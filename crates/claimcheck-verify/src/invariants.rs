//! Ledger-level preconditions a claim transaction must meet.

use claimcheck_core::{FailureReason, Transaction};

/// Check memo kind, operation count and result, in that order.
///
/// Returns the committed memo hash on success.
pub fn check_invariants(tx: &Transaction) -> Result<&[u8; 32], FailureReason> {
    let commitment = tx.memo.hash().ok_or(FailureReason::MemoNotHash)?;

    if tx.operation_count() != 1 {
        return Err(FailureReason::MultipleOperations);
    }

    if !tx.result.is_success() {
        return Err(FailureReason::TransactionNotSuccessful);
    }

    Ok(commitment)
}
