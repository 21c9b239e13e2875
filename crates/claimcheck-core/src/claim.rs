//! Claim parameters supplied by the caller and the verdict returned for them.

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::Zeroize;

/// Caller-supplied parameters of a hash-locked claim.
///
/// Immutable once constructed; the secret is wiped from memory on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    issuer: String,
    asset_code: String,
    /// Hex-encoded pre-image.
    secret: String,
    transaction_ref: String,
}

impl ClaimRequest {
    pub fn new(
        issuer: impl Into<String>,
        asset_code: impl Into<String>,
        secret: impl Into<String>,
        transaction_ref: impl Into<String>,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            asset_code: asset_code.into(),
            secret: secret.into(),
            transaction_ref: transaction_ref.into(),
        }
    }

    /// Address of the account that issued the claimed asset.
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn asset_code(&self) -> &str {
        &self.asset_code
    }

    /// Hex-encoded pre-image of the memo hash.
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Reference used to look the transaction up (its hash).
    pub fn transaction_ref(&self) -> &str {
        &self.transaction_ref
    }
}

impl fmt::Debug for ClaimRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimRequest")
            .field("issuer", &self.issuer)
            .field("asset_code", &self.asset_code)
            .field("secret", &"<redacted>")
            .field("transaction_ref", &self.transaction_ref)
            .finish()
    }
}

impl Drop for ClaimRequest {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

/// Why a transaction does not satisfy a claim.
///
/// These are verdicts, not faults: the claim was evaluated and rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FailureReason {
    /// The transaction memo is not of type hash.
    MemoNotHash,
    /// The transaction has more (or fewer) than one operation.
    MultipleOperations,
    /// The ledger did not record the transaction as successful.
    TransactionNotSuccessful,
    /// The sole operation is not a payment.
    NotAPayment,
    /// The payment moved the native currency, which has no issuer.
    NativeAssetNotSupported,
    /// The payment did not send the asset back to its issuer.
    NotARedemption,
    /// The paid asset is not the claimed issuer + code.
    AssetMismatch,
    /// The claimed issuer is not a valid account address.
    InvalidIssuer,
    /// SHA-256 of the secret differs from the memo hash.
    SecretMismatch,
    /// The secret could not be decoded from hex.
    InvalidSecretEncoding,
}

impl FailureReason {
    /// Stable name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MemoNotHash => "MemoNotHash",
            Self::MultipleOperations => "MultipleOperations",
            Self::TransactionNotSuccessful => "TransactionNotSuccessful",
            Self::NotAPayment => "NotAPayment",
            Self::NativeAssetNotSupported => "NativeAssetNotSupported",
            Self::NotARedemption => "NotARedemption",
            Self::AssetMismatch => "AssetMismatch",
            Self::InvalidIssuer => "InvalidIssuer",
            Self::SecretMismatch => "SecretMismatch",
            Self::InvalidSecretEncoding => "InvalidSecretEncoding",
        }
    }

    /// Human-readable explanation.
    pub fn message(&self) -> &'static str {
        match self {
            Self::MemoNotHash => "the given transaction does not contain a memo of type 'hash'",
            Self::MultipleOperations => "the given transaction does not contain exactly one operation",
            Self::TransactionNotSuccessful => "the given transaction was not successful",
            Self::NotAPayment => "the given transaction does not contain a payment operation",
            Self::NativeAssetNotSupported => {
                "the given transaction contains a native payment operation"
            }
            Self::NotARedemption => {
                "the payment operation in the given transaction did not return the asset to its issuer"
            }
            Self::AssetMismatch => {
                "the given asset_code and asset_issuer do not match the asset contained in the given transaction"
            }
            Self::InvalidIssuer => "the given issuer public key is invalid",
            Self::SecretMismatch => "the transaction's memo is not an sha256 hash of the given secret",
            Self::InvalidSecretEncoding => "the given secret is not valid hex",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict for one claim against one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    verified: bool,
    amount: Option<i64>,
    failure_reason: Option<FailureReason>,
}

impl VerificationResult {
    /// The claim holds; `amount` is the settled payment in smallest units.
    pub fn verified(amount: i64) -> Self {
        Self {
            verified: true,
            amount: Some(amount),
            failure_reason: None,
        }
    }

    /// The claim was evaluated and does not hold.
    pub fn rejected(reason: FailureReason) -> Self {
        Self {
            verified: false,
            amount: None,
            failure_reason: Some(reason),
        }
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn amount(&self) -> Option<i64> {
        self.amount
    }

    pub fn failure_reason(&self) -> Option<FailureReason> {
        self.failure_reason
    }
}
