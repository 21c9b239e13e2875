//! Shared state handed to every HTTP handler.

use chrono::{DateTime, Utc};
use claimcheck_gateway::{HorizonGateway, TransactionGateway};
use claimcheck_verify::{ClaimValidator, ClaimVerifier};
use std::sync::Arc;
use std::time::Instant;

use crate::config::{ClaimcheckConfig, RateLimitConfig};
use crate::middleware::RateLimiter;

pub struct AppState {
    pub verifier: ClaimVerifier,
    pub rate_limiter: RateLimiter,
    pub rate_limit: RateLimitConfig,
    pub body_limit_bytes: usize,
    pub started_at: DateTime<Utc>,
    start_instant: Instant,
}

impl AppState {
    /// Build state around an arbitrary gateway.
    pub fn new(config: &ClaimcheckConfig, gateway: Arc<dyn TransactionGateway>) -> Self {
        let validator = ClaimValidator::new(config.validation.clone());
        Self {
            verifier: ClaimVerifier::new(gateway, validator),
            rate_limiter: RateLimiter::new(),
            rate_limit: config.rate_limit.clone(),
            body_limit_bytes: config.api.body_limit_bytes,
            started_at: Utc::now(),
            start_instant: Instant::now(),
        }
    }

    /// Build state backed by the configured Horizon instance.
    pub fn with_horizon(config: &ClaimcheckConfig) -> anyhow::Result<Self> {
        let gateway = HorizonGateway::new(&config.horizon)?;
        tracing::info!(url = gateway.base_url(), "using horizon gateway");
        Ok(Self::new(config, Arc::new(gateway)))
    }

    pub fn uptime_secs(&self) -> u64 {
        self.start_instant.elapsed().as_secs()
    }
}
