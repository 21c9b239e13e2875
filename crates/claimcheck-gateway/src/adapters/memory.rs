use async_trait::async_trait;
use claimcheck_core::Transaction;
use dashmap::DashMap;

use crate::error::GatewayError;
use crate::traits::TransactionGateway;

/// In-memory transaction table.
///
/// Serves transactions that were inserted up front, keyed by lower-cased
/// hash. Used by tests and by nodes running against fixtures instead of a
/// live ledger.
pub struct InMemoryGateway {
    transactions: DashMap<String, Transaction>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self {
            transactions: DashMap::new(),
        }
    }

    fn key(reference: &str) -> String {
        reference.trim().to_ascii_lowercase()
    }

    /// Store a decoded transaction under its hash, replacing any previous one.
    pub fn insert(&self, transaction: Transaction) -> Option<Transaction> {
        let key = Self::key(&transaction.hash);
        self.transactions.insert(key, transaction)
    }

    /// Decode base64 envelope and result XDR and store the transaction.
    pub fn insert_encoded(
        &self,
        hash: &str,
        envelope_xdr: &str,
        result_xdr: &str,
    ) -> Result<(), GatewayError> {
        let transaction = claimcheck_xdr::decode_transaction(hash, envelope_xdr, result_xdr)?;
        self.insert(transaction);
        Ok(())
    }

    pub fn remove(&self, reference: &str) -> Option<Transaction> {
        self.transactions
            .remove(&Self::key(reference))
            .map(|(_, tx)| tx)
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionGateway for InMemoryGateway {
    async fn fetch(&self, reference: &str) -> Result<Transaction, GatewayError> {
        self.transactions
            .get(&Self::key(reference))
            .map(|entry| entry.value().clone())
            .ok_or_else(|| GatewayError::NotFound(reference.to_string()))
    }

    fn gateway_id(&self) -> &str {
        "memory"
    }
}
