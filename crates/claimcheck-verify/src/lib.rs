//! Claimcheck Verify
//!
//! Judges one settled ledger transaction against a hash-locked claim. The
//! checks run in a fixed order and stop at the first failure:
//!
//! 1. structural validation of the request ([`ClaimValidator`])
//! 2. construction of the claimed asset identity
//! 3. gateway fetch and decode
//! 4. transaction invariants ([`invariants`])
//! 5. payment extraction and the native-asset check ([`payment`])
//! 6. redemption to the issuer ([`redemption`])
//! 7. asset match ([`asset_match`])
//! 8. secret proof ([`secret`])

pub mod asset_match;
pub mod error;
pub mod invariants;
pub mod payment;
pub mod redemption;
pub mod secret;
pub mod validator;
pub mod verifier;

pub use error::VerifyError;
pub use validator::{ClaimValidator, ValidationRules};
pub use verifier::ClaimVerifier;
