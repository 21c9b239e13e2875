//! Proof of knowledge of the pre-image committed in the memo.

use claimcheck_core::FailureReason;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// SHA-256 digest of `data`.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Decode a hex secret (either case) into bytes that are wiped on drop.
pub fn decode_secret(secret_hex: &str) -> Result<Zeroizing<Vec<u8>>, FailureReason> {
    hex::decode(secret_hex)
        .map(Zeroizing::new)
        .map_err(|_| FailureReason::InvalidSecretEncoding)
}

/// Succeeds when SHA-256 of the decoded secret equals the commitment.
pub fn check_secret(secret_hex: &str, commitment: &[u8; 32]) -> Result<(), FailureReason> {
    let secret = decode_secret(secret_hex)?;
    if sha256(&secret) == *commitment {
        Ok(())
    } else {
        Err(FailureReason::SecretMismatch)
    }
}
