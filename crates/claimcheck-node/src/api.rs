//! HTTP API server for the claimcheck node.
//!
//! Serves claim verification, readiness, health and status endpoints.

use axum::{
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use claimcheck_core::{ClaimRequest, FailureReason, VerificationResult};
use claimcheck_gateway::GatewayError;
use claimcheck_verify::VerifyError;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::middleware::{rate_limit_middleware, request_id_middleware};
use crate::state::AppState;

// --- Request / response types ---

/// Claim parameters as posted by clients. Missing fields read as empty and
/// are reported by validation.
#[derive(Deserialize)]
pub struct ClaimCheckRequest {
    #[serde(default)]
    pub asset_issuer: String,
    #[serde(default)]
    pub asset_code: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub transaction_hash: String,
}

#[derive(Debug, Serialize)]
pub struct ClaimCheckResponse {
    pub asset_issuer: String,
    pub asset_code: String,
    pub transaction_hash: String,
    pub verified: bool,
    /// Settled amount in the asset's smallest unit, as a decimal string.
    pub amount: Option<String>,
    pub failure_reason: Option<FailureReason>,
}

impl ClaimCheckResponse {
    fn new(claim: &ClaimRequest, result: &VerificationResult) -> Self {
        Self {
            asset_issuer: claim.issuer().to_string(),
            asset_code: claim.asset_code().to_string(),
            transaction_hash: claim.transaction_ref().to_string(),
            verified: result.is_verified(),
            amount: result.amount().map(|a| a.to_string()),
            failure_reason: result.failure_reason(),
        }
    }
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub version: String,
    pub gateway: String,
    pub started_at: DateTime<Utc>,
    pub uptime_secs: u64,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

// --- Handlers ---

async fn handle_ready() -> &'static str {
    "ready"
}

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

async fn handle_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        gateway: state.verifier.gateway_id().to_string(),
        started_at: state.started_at,
        uptime_secs: state.uptime_secs(),
    })
}

async fn handle_verify_claim(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ClaimCheckRequest>,
) -> Result<Json<ClaimCheckResponse>, (StatusCode, Json<ErrorResponse>)> {
    let claim = ClaimRequest::new(
        req.asset_issuer,
        req.asset_code,
        req.secret,
        req.transaction_hash,
    );

    match state.verifier.verify(&claim).await {
        Ok(result) => Ok(Json(ClaimCheckResponse::new(&claim, &result))),
        Err(e) => Err((
            error_status(&e),
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )),
    }
}

/// HTTP status for a claim that could not be evaluated.
pub fn error_status(err: &VerifyError) -> StatusCode {
    match err {
        VerifyError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        VerifyError::TransactionUnavailable(GatewayError::NotFound(_)) => StatusCode::NOT_FOUND,
        VerifyError::TransactionUnavailable(GatewayError::Timeout(_)) => {
            StatusCode::GATEWAY_TIMEOUT
        }
        VerifyError::TransactionUnavailable(_) | VerifyError::MalformedTransaction(_) => {
            StatusCode::BAD_GATEWAY
        }
    }
}

// --- Server ---

pub fn build_router(state: Arc<AppState>) -> Router {
    let rate_limited = axum::middleware::from_fn_with_state(state.clone(), rate_limit_middleware);

    Router::new()
        .route("/", get(handle_ready))
        .route("/", post(handle_verify_claim).route_layer(rate_limited.clone()))
        .route(
            "/api/v1/claims/verify",
            post(handle_verify_claim).route_layer(rate_limited),
        )
        .route("/api/v1/health", get(handle_health))
        .route("/api/v1/status", get(handle_status))
        .layer(DefaultBodyLimit::max(state.body_limit_bytes))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state)
}

/// Serve the API on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: Arc<AppState>, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listen_addr = listener.local_addr()?;
    let app = build_router(state);
    tracing::info!(%listen_addr, "HTTP API server started");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown)
    .await?;
    tracing::info!("HTTP API server stopped");
    Ok(())
}

pub async fn start_api_server<F>(
    listen_addr: SocketAddr,
    state: Arc<AppState>,
    shutdown: F,
) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = TcpListener::bind(listen_addr).await?;
    serve(listener, state, shutdown).await
}
