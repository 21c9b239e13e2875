//! Claimcheck XDR: decoding of the ledger's binary transaction envelope and
//! transaction result formats into `claimcheck_core` types.
//!
//! Only the parts needed to judge a claim are decoded in full: memos, payment
//! operations and the result code. Other operation bodies are identified by
//! type and left opaque.

pub mod envelope;
pub mod error;
pub mod reader;
pub mod result;

#[cfg(test)]
pub(crate) mod writer;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use claimcheck_core::Transaction;

pub use envelope::{decode_envelope, decode_envelope_base64, EnvelopeKind, TransactionEnvelope};
pub use error::XdrError;
pub use reader::XdrReader;
pub use result::{decode_result, decode_result_base64, status_from_code};

/// Decode standard-alphabet base64, ignoring surrounding whitespace.
pub fn decode_base64(encoded: &str) -> Result<Vec<u8>, XdrError> {
    Ok(STANDARD.decode(encoded.trim())?)
}

/// Assemble a `Transaction` from its hash and base64 envelope and result XDR.
///
/// Ledger number and close time are left unset; gateways fill them in from
/// their own metadata.
pub fn decode_transaction(
    hash: &str,
    envelope_xdr: &str,
    result_xdr: &str,
) -> Result<Transaction, XdrError> {
    let envelope = decode_envelope_base64(envelope_xdr)?;
    let result = decode_result_base64(result_xdr)?;

    tracing::trace!(
        tx = hash,
        kind = ?envelope.kind,
        operations = envelope.operations.len(),
        %result,
        "decoded transaction"
    );

    Ok(Transaction {
        hash: hash.to_ascii_lowercase(),
        source_account: envelope.source_account,
        fee: envelope.fee,
        sequence: envelope.sequence,
        memo: envelope.memo,
        operations: envelope.operations,
        result,
        ledger: None,
        created_at: None,
    })
}
