//! The payment must send the asset back to the account that issued it.

use claimcheck_core::{AssetIdentity, FailureReason, PaymentOp};

/// Succeeds when the payment's destination account is the asset's issuer.
///
/// A muxed destination counts as its underlying account; the sub-account id
/// is not compared.
pub fn check_redemption(payment: &PaymentOp, asset: &AssetIdentity) -> Result<(), FailureReason> {
    if payment.destination == asset.issuer {
        Ok(())
    } else {
        Err(FailureReason::NotARedemption)
    }
}
