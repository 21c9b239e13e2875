//! Shared fixtures for the cross-crate tests.
//!
//! Built around one real test-network redemption: 1 WOOLLY paid back to its
//! issuer with the SHA-256 of `SECRET` in a hash memo.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use claimcheck_core::{ClaimRequest, Transaction};
use claimcheck_gateway::{InMemoryGateway, TransactionGateway};
use claimcheck_node::{AppState, ClaimcheckConfig};
use claimcheck_verify::{ClaimValidator, ClaimVerifier};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const ISSUER: &str = "GAQ6EUNL46K4BYH5N7YG5VPOF6OD5FTSP5M3HYGLEGQ6SLYDU7OB4M45";
/// Account that submitted the redemption; a valid address that issues nothing.
pub const SOURCE: &str = "GCICTL4FMNDBOKYTCTETK25P5C3YV4Q6A6JZFTAFC7ISEENPPXXYLKXJ";
pub const ASSET_CODE: &str = "WOOLLY";
pub const SECRET: &str = "EC9CB7E10C0BDE144FFF36128EEE7B5B59E49A1BC7710FDAB583735880DB0ECA";
pub const TX_HASH: &str = "54913d4c6069240f983b8609160b0d5876c57e0e864eeb93f75872f3a798c910";
pub const AMOUNT: i64 = 10_000_000;

pub const WOOLLY_ENVELOPE: &str = "AAAAAJApr4VjRhcrExTJNWuv6LeK8h4Hk5LMBRfRIhGvfe+FAAAAZABumd0AAAAPAAAAAAAAAANBeV8g6mqV315SDVhZ/G8mxRQLMdkTtRI94Lp39DkINAAAAAEAAAAAAAAAAQAAAAAh4lGr55XA4P1v8G7V7i+cPpZyf1mz4MshoekvA6fcHgAAAAJXT09MTFkAAAAAAAAAAAAAIeJRq+eVwOD9b/Bu1e4vnD6Wcn9Zs+DLIaHpLwOn3B4AAAAAAJiWgAAAAAAAAAABr33vhQAAAECTODuhctoTJ0CMUxInyp6lwedWvpsQrEpt5kqQTK1zO3ZtOlXtEhJMnbtBlZN7Lkx+NhCDKgVh5fZlyp/KU2wD";
/// txSUCCESS with one successful payment result.
pub const SUCCESS_RESULT: &str = "AAAAAAAAAGQAAAAAAAAAAQAAAAAAAAABAAAAAAAAAAA=";
/// txFAILED with one failed payment result.
pub const FAILED_RESULT: &str = "AAAAAAAAAGT/////AAAAAQAAAAAAAAAB////+wAAAAA=";

pub fn woolly_claim() -> ClaimRequest {
    ClaimRequest::new(ISSUER, ASSET_CODE, SECRET, TX_HASH)
}

/// The redemption decoded from its ledger XDR.
pub fn woolly_transaction() -> Transaction {
    claimcheck_xdr::decode_transaction(TX_HASH, WOOLLY_ENVELOPE, SUCCESS_RESULT)
        .expect("fixture envelope decodes")
}

pub fn gateway_with(transactions: impl IntoIterator<Item = Transaction>) -> Arc<InMemoryGateway> {
    let gateway = InMemoryGateway::new();
    for tx in transactions {
        gateway.insert(tx);
    }
    Arc::new(gateway)
}

pub fn verifier(gateway: Arc<dyn TransactionGateway>) -> ClaimVerifier {
    ClaimVerifier::new(gateway, ClaimValidator::default())
}

/// Config with rate limiting off, so tests can fire requests back to back.
pub fn test_config() -> ClaimcheckConfig {
    let mut config = ClaimcheckConfig::default();
    config.rate_limit.enabled = false;
    config
}

async fn bind() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    (listener, format!("http://{}", addr))
}

/// Start a node on an ephemeral port and return its base URL.
pub async fn spawn_node(config: ClaimcheckConfig, gateway: Arc<dyn TransactionGateway>) -> String {
    let state = Arc::new(AppState::new(&config, gateway));
    let (listener, base) = bind().await;
    tokio::spawn(claimcheck_node::serve(
        listener,
        state,
        std::future::pending(),
    ));
    base
}

/// Horizon-style transaction resource for the fixture redemption.
pub fn horizon_record(result_xdr: &str) -> Value {
    json!({
        "id": TX_HASH,
        "hash": TX_HASH,
        "ledger": 7_228_195,
        "created_at": "2020-05-01T12:00:00Z",
        "source_account": SOURCE,
        "memo_type": "hash",
        "envelope_xdr": WOOLLY_ENVELOPE,
        "result_xdr": result_xdr,
    })
}

type Records = Arc<HashMap<String, Value>>;

async fn horizon_transaction(
    State(records): State<Records>,
    Path(hash): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    records.get(&hash).cloned().map(Json).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"title": "Resource Missing", "status": 404})),
        )
    })
}

/// Start a fake Horizon serving `records` keyed by hash; returns its base URL.
pub async fn spawn_fake_horizon(records: HashMap<String, Value>) -> String {
    let app = Router::new()
        .route("/transactions/{hash}", get(horizon_transaction))
        .with_state(Arc::new(records));
    let (listener, base) = bind().await;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    base
}
