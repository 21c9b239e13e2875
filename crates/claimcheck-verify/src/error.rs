use claimcheck_gateway::GatewayError;
use claimcheck_xdr::XdrError;

/// Conditions under which a claim could not be evaluated at all.
///
/// A claim that was evaluated and found not to hold is not an error; it is
/// an `Ok(VerificationResult)` carrying a `FailureReason`.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("transaction unavailable: {0}")]
    TransactionUnavailable(#[source] GatewayError),

    #[error("malformed transaction: {0}")]
    MalformedTransaction(#[source] XdrError),
}

impl From<GatewayError> for VerifyError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Malformed(e) => Self::MalformedTransaction(e),
            other => Self::TransactionUnavailable(other),
        }
    }
}
