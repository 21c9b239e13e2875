//! Integration test: the node verifying claims against a Horizon server.

use claimcheck_core::FailureReason;
use claimcheck_gateway::{HorizonConfig, HorizonGateway, TransactionGateway};
use claimcheck_integration_tests::*;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;

async fn horizon_with(result_xdr: &str) -> String {
    let mut records = HashMap::new();
    records.insert(TX_HASH.to_string(), horizon_record(result_xdr));
    spawn_fake_horizon(records).await
}

fn horizon_gateway(url: String) -> Arc<HorizonGateway> {
    Arc::new(
        HorizonGateway::new(&HorizonConfig {
            url,
            timeout_ms: 2_000,
        })
        .unwrap(),
    )
}

#[tokio::test]
async fn test_horizon_transaction_carries_ledger_metadata() {
    let gateway = horizon_gateway(horizon_with(SUCCESS_RESULT).await);
    let tx = gateway.fetch(TX_HASH).await.unwrap();

    assert_eq!(tx.ledger, Some(7_228_195));
    assert!(tx.created_at.is_some());
    assert_eq!(tx.memo, woolly_transaction().memo);
    assert_eq!(tx.operations, woolly_transaction().operations);
}

#[tokio::test]
async fn test_verifier_over_horizon() {
    let verifier = verifier(horizon_gateway(horizon_with(SUCCESS_RESULT).await));
    let result = verifier.verify(&woolly_claim()).await.unwrap();
    assert!(result.is_verified());
    assert_eq!(result.amount(), Some(AMOUNT));
}

#[tokio::test]
async fn test_verifier_over_horizon_failed_result() {
    let verifier = verifier(horizon_gateway(horizon_with(FAILED_RESULT).await));
    let result = verifier.verify(&woolly_claim()).await.unwrap();
    assert_eq!(
        result.failure_reason(),
        Some(FailureReason::TransactionNotSuccessful)
    );
}

#[tokio::test]
async fn test_node_over_horizon() {
    let horizon = horizon_with(SUCCESS_RESULT).await;
    let base = spawn_node(test_config(), horizon_gateway(horizon)).await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/api/v1/claims/verify", base))
        .json(&json!({
            "asset_issuer": ISSUER,
            "asset_code": ASSET_CODE,
            "secret": SECRET,
            "transaction_hash": TX_HASH,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["verified"], true);
    assert_eq!(body["amount"], "10000000");

    let status: Value = client
        .get(format!("{}/api/v1/status", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["gateway"], "horizon");
}

#[tokio::test]
async fn test_node_over_horizon_unknown_transaction() {
    let horizon = spawn_fake_horizon(HashMap::new()).await;
    let base = spawn_node(test_config(), horizon_gateway(horizon)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/", base))
        .json(&json!({
            "asset_issuer": ISSUER,
            "asset_code": ASSET_CODE,
            "secret": SECRET,
            "transaction_hash": TX_HASH,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("transaction not found"));
}

#[tokio::test]
async fn test_node_with_unreachable_horizon() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let base = spawn_node(test_config(), horizon_gateway(dead)).await;
    let response = reqwest::Client::new()
        .post(format!("{}/", base))
        .json(&json!({
            "asset_issuer": ISSUER,
            "asset_code": ASSET_CODE,
            "secret": SECRET,
            "transaction_hash": TX_HASH,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 502);
}

#[tokio::test]
async fn test_node_refuses_transaction_it_did_not_ask_for() {
    // Horizon serves the WOOLLY record under a different hash.
    let other = "f".repeat(64);
    let mut records = HashMap::new();
    records.insert(other.clone(), horizon_record(SUCCESS_RESULT));
    let base = spawn_node(test_config(), horizon_gateway(spawn_fake_horizon(records).await)).await;

    let response = reqwest::Client::new()
        .post(format!("{}/api/v1/claims/verify", base))
        .json(&json!({
            "asset_issuer": ISSUER,
            "asset_code": ASSET_CODE,
            "secret": SECRET,
            "transaction_hash": other,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 502);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains(TX_HASH));
}
