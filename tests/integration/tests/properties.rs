//! Property tests: verification is a pure function of claim and transaction,
//! and any single-field change to a good claim is reported specifically.

use claimcheck_core::{AccountAddress, ClaimRequest, FailureReason, VerificationResult};
use claimcheck_gateway::InMemoryGateway;
use claimcheck_integration_tests::*;
use claimcheck_verify::ClaimVerifier;
use proptest::prelude::*;
use std::sync::Arc;

fn offline_verifier() -> ClaimVerifier {
    verifier(Arc::new(InMemoryGateway::new()))
}

fn judge(claim: &ClaimRequest) -> VerificationResult {
    offline_verifier()
        .verify_transaction(claim, &woolly_transaction())
        .unwrap()
}

fn issuer_key() -> [u8; 32] {
    *AccountAddress::parse(ISSUER).unwrap().as_bytes()
}

proptest! {
    #[test]
    fn test_any_other_secret_is_a_mismatch(secret in any::<[u8; 32]>()) {
        let hex_secret = hex::encode(secret);
        prop_assume!(!hex_secret.eq_ignore_ascii_case(SECRET));

        let result = judge(&ClaimRequest::new(ISSUER, ASSET_CODE, hex_secret, TX_HASH));
        prop_assert!(!result.is_verified());
        prop_assert_eq!(result.failure_reason(), Some(FailureReason::SecretMismatch));
    }

    #[test]
    fn test_any_other_code_is_a_mismatch(code in "[A-Za-z0-9]{1,12}") {
        prop_assume!(code != ASSET_CODE);

        let result = judge(&ClaimRequest::new(ISSUER, code, SECRET, TX_HASH));
        prop_assert_eq!(result.failure_reason(), Some(FailureReason::AssetMismatch));
    }

    #[test]
    fn test_any_other_issuer_is_a_mismatch(key in any::<[u8; 32]>()) {
        prop_assume!(key != issuer_key());
        let issuer = AccountAddress::from_bytes(key).to_string();

        let result = judge(&ClaimRequest::new(issuer, ASSET_CODE, SECRET, TX_HASH));
        prop_assert_eq!(result.failure_reason(), Some(FailureReason::AssetMismatch));
    }

    #[test]
    fn test_verification_is_idempotent(
        code in "[A-Z]{1,12}",
        secret in any::<[u8; 32]>()
    ) {
        let claim = ClaimRequest::new(ISSUER, code, hex::encode(secret), TX_HASH);
        let verifier = offline_verifier();
        let tx = woolly_transaction();

        let first = verifier.verify_transaction(&claim, &tx).unwrap();
        let second = verifier.verify_transaction(&claim, &tx).unwrap();
        prop_assert_eq!(first, second);
    }
}

#[test]
fn test_good_claim_verifies() {
    assert_eq!(judge(&woolly_claim()), VerificationResult::verified(AMOUNT));
}
