//! Comparing the paid asset with the claimed one.

use claimcheck_core::{AccountAddress, AssetIdentity, FailureReason};

/// Parse the claimed issuer, rejecting addresses that fail the checksum or
/// version checks.
pub fn claimed_issuer(issuer: &str) -> Result<AccountAddress, FailureReason> {
    AccountAddress::parse(issuer).map_err(|_| FailureReason::InvalidIssuer)
}

/// Issuer and padded code must both match exactly.
pub fn check_asset(paid: &AssetIdentity, claimed: &AssetIdentity) -> Result<(), FailureReason> {
    if paid == claimed {
        Ok(())
    } else {
        Err(FailureReason::AssetMismatch)
    }
}
