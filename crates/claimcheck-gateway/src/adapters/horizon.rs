//! Horizon REST adapter.
//!
//! Fetches `GET {url}/transactions/{hash}` and decodes the returned
//! `envelope_xdr` and `result_xdr`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use claimcheck_core::Transaction;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::GatewayError;
use crate::traits::TransactionGateway;

/// Public test network Horizon instance.
pub const TESTNET_URL: &str = "https://horizon-testnet.stellar.org";

/// Horizon connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizonConfig {
    /// Base URL of the Horizon instance.
    #[serde(default = "default_url")]
    pub url: String,
    /// Per-request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_url() -> String {
    TESTNET_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// The subset of Horizon's transaction resource we read.
#[derive(Debug, Deserialize)]
struct TransactionRecord {
    hash: String,
    #[serde(default)]
    ledger: Option<u32>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
    envelope_xdr: String,
    result_xdr: String,
}

/// Gateway backed by a Horizon server.
pub struct HorizonGateway {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HorizonGateway {
    pub fn new(config: &HorizonConfig) -> Result<Self, GatewayError> {
        let timeout = Duration::from_millis(config.timeout_ms);
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("claimcheck/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn transaction_url(&self, reference: &str) -> String {
        format!("{}/transactions/{}", self.base_url, reference)
    }

    fn map_error(&self, err: reqwest::Error) -> GatewayError {
        if err.is_timeout() {
            GatewayError::Timeout(self.timeout)
        } else if err.is_decode() {
            GatewayError::Transport(format!("invalid horizon response: {}", err))
        } else {
            GatewayError::Transport(err.to_string())
        }
    }
}

#[async_trait]
impl TransactionGateway for HorizonGateway {
    async fn fetch(&self, reference: &str) -> Result<Transaction, GatewayError> {
        // References go into the URL path verbatim.
        if reference.is_empty() || !reference.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(GatewayError::NotFound(reference.to_string()));
        }

        let url = self.transaction_url(reference);
        tracing::debug!(%url, "fetching transaction from horizon");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound(reference.to_string()));
        }
        if !status.is_success() {
            return Err(GatewayError::Transport(format!(
                "horizon returned HTTP {}",
                status
            )));
        }

        let record: TransactionRecord = response.json().await.map_err(|e| self.map_error(e))?;
        if !record.hash.eq_ignore_ascii_case(reference) {
            tracing::warn!(
                requested = reference,
                returned = %record.hash,
                "horizon returned a different transaction hash"
            );
            return Err(GatewayError::Transport(format!(
                "horizon returned transaction {} for {}",
                record.hash, reference
            )));
        }

        let mut transaction =
            claimcheck_xdr::decode_transaction(&record.hash, &record.envelope_xdr, &record.result_xdr)?;
        transaction.ledger = record.ledger;
        transaction.created_at = record.created_at;
        Ok(transaction)
    }

    fn gateway_id(&self) -> &str {
        "horizon"
    }
}
