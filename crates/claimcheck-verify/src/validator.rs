//! Structural validation of claim requests.
//!
//! Runs before any lookup and only looks at lengths and character sets.
//! Whether the issuer checksum holds or the secret is valid hex is decided
//! later, as part of the verdict.

use claimcheck_core::ClaimRequest;
use serde::{Deserialize, Serialize};

use crate::error::VerifyError;

const BASE32_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Field rules applied by [`ClaimValidator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationRules {
    /// Exact length of an account address.
    #[serde(default = "default_issuer_len")]
    pub issuer_len: usize,
    #[serde(default = "default_asset_code_min_len")]
    pub asset_code_min_len: usize,
    #[serde(default = "default_asset_code_max_len")]
    pub asset_code_max_len: usize,
    /// Exact length of the hex-encoded secret.
    #[serde(default = "default_hex_len")]
    pub secret_hex_len: usize,
    /// Exact length of the hex transaction reference.
    #[serde(default = "default_hex_len")]
    pub reference_hex_len: usize,
}

fn default_issuer_len() -> usize {
    claimcheck_core::address::ADDRESS_LEN
}

fn default_asset_code_min_len() -> usize {
    1
}

fn default_asset_code_max_len() -> usize {
    claimcheck_core::asset::MAX_ASSET_CODE_LEN
}

fn default_hex_len() -> usize {
    64
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            issuer_len: default_issuer_len(),
            asset_code_min_len: default_asset_code_min_len(),
            asset_code_max_len: default_asset_code_max_len(),
            secret_hex_len: default_hex_len(),
            reference_hex_len: default_hex_len(),
        }
    }
}

/// Immutable request validator, built once from [`ValidationRules`].
#[derive(Debug, Clone, Default)]
pub struct ClaimValidator {
    rules: ValidationRules,
}

impl ClaimValidator {
    pub fn new(rules: ValidationRules) -> Self {
        Self { rules }
    }

    /// Check every field, reporting all violations at once.
    pub fn validate(&self, request: &ClaimRequest) -> Result<(), VerifyError> {
        let violations = self.violations(request);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(VerifyError::InvalidInput(violations.join("; ")))
        }
    }

    /// Violations in field order, named as the fields appear on the wire:
    /// asset_issuer, asset_code, secret, transaction_hash.
    pub fn violations(&self, request: &ClaimRequest) -> Vec<String> {
        let rules = &self.rules;
        let mut out = Vec::new();

        let issuer = request.issuer();
        if issuer.is_empty() {
            out.push("asset_issuer: required".to_string());
        } else {
            if issuer.len() != rules.issuer_len {
                out.push(format!(
                    "asset_issuer: must be {} characters, got {}",
                    rules.issuer_len,
                    issuer.len()
                ));
            }
            if !issuer.bytes().all(|b| BASE32_ALPHABET.contains(&b)) {
                out.push("asset_issuer: must contain only A-Z and 2-7".to_string());
            }
        }

        let code = request.asset_code();
        if code.is_empty() {
            out.push("asset_code: required".to_string());
        } else {
            if code.len() < rules.asset_code_min_len || code.len() > rules.asset_code_max_len {
                out.push(format!(
                    "asset_code: must be {}-{} characters, got {}",
                    rules.asset_code_min_len,
                    rules.asset_code_max_len,
                    code.len()
                ));
            }
            if !code.bytes().all(|b| b.is_ascii_graphic()) {
                out.push("asset_code: must contain only printable ASCII".to_string());
            }
        }

        let secret = request.secret();
        if secret.is_empty() {
            out.push("secret: required".to_string());
        } else if secret.len() != rules.secret_hex_len {
            // Never echo the secret itself.
            out.push(format!(
                "secret: must be {} hex characters, got {}",
                rules.secret_hex_len,
                secret.len()
            ));
        }

        let reference = request.transaction_ref();
        if reference.is_empty() {
            out.push("transaction_hash: required".to_string());
        } else {
            if reference.len() != rules.reference_hex_len {
                out.push(format!(
                    "transaction_hash: must be {} characters, got {}",
                    rules.reference_hex_len,
                    reference.len()
                ));
            }
            if !reference.bytes().all(|b| b.is_ascii_hexdigit()) {
                out.push("transaction_hash: must be hexadecimal".to_string());
            }
        }

        out
    }
}
