//! Isolating the payment a claim transaction carries.

use claimcheck_core::{AssetIdentity, FailureReason, PaymentOp, Transaction};

/// The sole operation's payment body.
///
/// Expects a transaction that already passed the invariant checks.
pub fn extract_payment(tx: &Transaction) -> Result<&PaymentOp, FailureReason> {
    tx.operations
        .first()
        .and_then(|op| op.as_payment())
        .ok_or(FailureReason::NotAPayment)
}

/// The identity of the paid asset; native payments have none.
pub fn issued_asset(payment: &PaymentOp) -> Result<&AssetIdentity, FailureReason> {
    payment
        .asset
        .identity()
        .ok_or(FailureReason::NativeAssetNotSupported)
}
