//! Integration test: claims verified end to end, from ledger XDR through the
//! gateway, the verifier and the HTTP node.

use claimcheck_core::{
    AccountAddress, ClaimRequest, FailureReason, Memo, Operation, ResultStatus,
};
use claimcheck_gateway::{GatewayError, InMemoryGateway};
use claimcheck_integration_tests::*;
use claimcheck_verify::VerifyError;
use serde_json::{json, Value};
use std::sync::Arc;

fn claim_with(issuer: &str, code: &str, secret: &str) -> ClaimRequest {
    ClaimRequest::new(issuer, code, secret, TX_HASH)
}

// =========================================================================
// Verifier over the in-memory gateway
// =========================================================================

#[tokio::test]
async fn test_woolly_redemption_verifies() {
    let verifier = verifier(gateway_with([woolly_transaction()]));
    let result = verifier.verify(&woolly_claim()).await.unwrap();

    assert!(result.is_verified());
    assert_eq!(result.amount(), Some(AMOUNT));
    assert_eq!(result.failure_reason(), None);
}

#[tokio::test]
async fn test_lowercase_secret_verifies() {
    let verifier = verifier(gateway_with([woolly_transaction()]));
    let claim = claim_with(ISSUER, ASSET_CODE, &SECRET.to_ascii_lowercase());
    assert!(verifier.verify(&claim).await.unwrap().is_verified());
}

#[tokio::test]
async fn test_uppercase_reference_finds_transaction() {
    let verifier = verifier(gateway_with([woolly_transaction()]));
    let claim = ClaimRequest::new(ISSUER, ASSET_CODE, SECRET, TX_HASH.to_ascii_uppercase());
    assert!(verifier.verify(&claim).await.unwrap().is_verified());
}

#[tokio::test]
async fn test_issuer_last_character_altered() {
    let verifier = verifier(gateway_with([woolly_transaction()]));
    let mut altered = ISSUER.to_string();
    altered.replace_range(55.., "A");

    let result = verifier
        .verify(&claim_with(&altered, ASSET_CODE, SECRET))
        .await
        .unwrap();
    assert!(!result.is_verified());
    assert_eq!(result.failure_reason(), Some(FailureReason::InvalidIssuer));
}

#[tokio::test]
async fn test_other_valid_issuer() {
    let verifier = verifier(gateway_with([woolly_transaction()]));
    let result = verifier
        .verify(&claim_with(SOURCE, ASSET_CODE, SECRET))
        .await
        .unwrap();
    assert_eq!(result.failure_reason(), Some(FailureReason::AssetMismatch));
}

#[tokio::test]
async fn test_other_asset_code() {
    let verifier = verifier(gateway_with([woolly_transaction()]));
    for code in ["WOOL", "WOOLLYX", "woolly", "W"] {
        let result = verifier
            .verify(&claim_with(ISSUER, code, SECRET))
            .await
            .unwrap();
        assert_eq!(
            result.failure_reason(),
            Some(FailureReason::AssetMismatch),
            "code {}",
            code
        );
    }
}

#[tokio::test]
async fn test_secret_altered() {
    let verifier = verifier(gateway_with([woolly_transaction()]));
    let altered = format!("{}B", &SECRET[..63]);
    let result = verifier
        .verify(&claim_with(ISSUER, ASSET_CODE, &altered))
        .await
        .unwrap();
    assert_eq!(result.failure_reason(), Some(FailureReason::SecretMismatch));
}

#[tokio::test]
async fn test_secret_truncated_is_invalid_input() {
    let verifier = verifier(gateway_with([woolly_transaction()]));
    let err = verifier
        .verify(&claim_with(ISSUER, ASSET_CODE, &SECRET[..32]))
        .await
        .unwrap_err();
    assert!(matches!(err, VerifyError::InvalidInput(_)));
}

#[tokio::test]
async fn test_failed_transaction() {
    let gateway = InMemoryGateway::new();
    gateway
        .insert_encoded(TX_HASH, WOOLLY_ENVELOPE, FAILED_RESULT)
        .unwrap();
    let verifier = verifier(Arc::new(gateway));

    let result = verifier.verify(&woolly_claim()).await.unwrap();
    assert_eq!(
        result.failure_reason(),
        Some(FailureReason::TransactionNotSuccessful)
    );
}

#[tokio::test]
async fn test_two_operations_even_if_first_passes() {
    let mut tx = woolly_transaction();
    let first = tx.operations[0].clone();
    tx.operations.push(first);
    let verifier = verifier(gateway_with([tx]));

    let result = verifier.verify(&woolly_claim()).await.unwrap();
    assert_eq!(result.failure_reason(), Some(FailureReason::MultipleOperations));
}

#[tokio::test]
async fn test_text_memo() {
    let mut tx = woolly_transaction();
    tx.memo = Memo::Text(b"redeem".to_vec());
    let verifier = verifier(gateway_with([tx]));

    let result = verifier.verify(&woolly_claim()).await.unwrap();
    assert_eq!(result.failure_reason(), Some(FailureReason::MemoNotHash));
}

#[tokio::test]
async fn test_payment_not_back_to_issuer() {
    let mut tx = woolly_transaction();
    let mut payment = tx.operations[0].as_payment().unwrap().clone();
    payment.destination = AccountAddress::parse(SOURCE).unwrap();
    tx.operations[0] = Operation::payment(payment);
    let verifier = verifier(gateway_with([tx]));

    let result = verifier.verify(&woolly_claim()).await.unwrap();
    assert_eq!(result.failure_reason(), Some(FailureReason::NotARedemption));
}

#[tokio::test]
async fn test_unknown_transaction() {
    let verifier = verifier(Arc::new(InMemoryGateway::new()));
    let err = verifier.verify(&woolly_claim()).await.unwrap_err();
    assert!(matches!(
        err,
        VerifyError::TransactionUnavailable(GatewayError::NotFound(_))
    ));
}

#[test]
fn test_fixture_matches_ledger() {
    let tx = woolly_transaction();
    assert_eq!(tx.result, ResultStatus::Success);
    assert_eq!(tx.source_account.to_string(), SOURCE);
    assert_eq!(
        hex::encode(tx.memo.hash().unwrap()),
        "41795f20ea6a95df5e520d5859fc6f26c5140b31d913b5123de0ba77f4390834"
    );
    let payment = tx.operations[0].as_payment().unwrap();
    assert_eq!(payment.destination.to_string(), ISSUER);
    assert_eq!(payment.amount, AMOUNT);
}

// =========================================================================
// Over HTTP
// =========================================================================

#[tokio::test]
async fn test_http_claimcheck() {
    let base = spawn_node(test_config(), gateway_with([woolly_transaction()])).await;
    let client = reqwest::Client::new();

    let verified: Value = client
        .post(format!("{}/", base))
        .json(&json!({
            "asset_issuer": ISSUER,
            "asset_code": ASSET_CODE,
            "secret": SECRET,
            "transaction_hash": TX_HASH,
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(verified["verified"], true);
    assert_eq!(verified["amount"], "10000000");

    let rejected: Value = client
        .post(format!("{}/api/v1/claims/verify", base))
        .json(&json!({
            "asset_issuer": ISSUER,
            "asset_code": ASSET_CODE,
            "secret": "0".repeat(64),
            "transaction_hash": TX_HASH,
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(rejected["verified"], false);
    assert_eq!(rejected["failure_reason"], "SecretMismatch");
}

#[tokio::test]
async fn test_http_malformed_json() {
    let base = spawn_node(test_config(), gateway_with([woolly_transaction()])).await;
    let response = reqwest::Client::new()
        .post(format!("{}/", base))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}
