use async_trait::async_trait;
use claimcheck_core::Transaction;

use crate::error::GatewayError;

/// Source of settled ledger transactions.
///
/// Implementations return the transaction fully decoded, and must keep
/// "no such transaction" (`NotFound`) distinct from "could not reach or
/// decode it" (`Transport`, `Timeout`, `Malformed`).
#[async_trait]
pub trait TransactionGateway: Send + Sync {
    /// Fetch and decode the transaction identified by `reference`.
    async fn fetch(&self, reference: &str) -> Result<Transaction, GatewayError>;

    /// Unique identifier of this gateway (e.g. "horizon").
    fn gateway_id(&self) -> &str;
}
