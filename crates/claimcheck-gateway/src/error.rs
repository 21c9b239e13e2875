use claimcheck_xdr::XdrError;
use std::time::Duration;

/// Gateway errors.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("transaction not found: {0}")]
    NotFound(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("gateway timed out after {0:?}")]
    Timeout(Duration),

    #[error("malformed transaction: {0}")]
    Malformed(#[from] XdrError),
}

impl GatewayError {
    /// Whether asking again later could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }
}
