use claimcheck_core::{
    AssetCode, AssetIdentity, ClaimRequest, FailureReason, Transaction, VerificationResult,
};
use claimcheck_gateway::TransactionGateway;
use std::sync::Arc;

use crate::asset_match::{check_asset, claimed_issuer};
use crate::error::VerifyError;
use crate::invariants::check_invariants;
use crate::payment::{extract_payment, issued_asset};
use crate::redemption::check_redemption;
use crate::secret::check_secret;
use crate::validator::ClaimValidator;

/// Verifies hash-locked claims against settled ledger transactions.
///
/// Holds no per-request state; one instance serves any number of
/// concurrent verifications.
pub struct ClaimVerifier {
    gateway: Arc<dyn TransactionGateway>,
    validator: ClaimValidator,
}

impl ClaimVerifier {
    pub fn new(gateway: Arc<dyn TransactionGateway>, validator: ClaimValidator) -> Self {
        Self { gateway, validator }
    }

    pub fn gateway_id(&self) -> &str {
        self.gateway.gateway_id()
    }

    /// Fetch the referenced transaction and judge the claim against it.
    pub async fn verify(&self, request: &ClaimRequest) -> Result<VerificationResult, VerifyError> {
        let claimed = match self.claimed_asset(request)? {
            Ok(claimed) => claimed,
            Err(reason) => return Ok(rejected(request, reason)),
        };

        let tx = self
            .gateway
            .fetch(request.transaction_ref())
            .await
            .map_err(|e| {
                tracing::warn!(
                    tx = request.transaction_ref(),
                    gateway = self.gateway.gateway_id(),
                    error = %e,
                    "transaction lookup failed"
                );
                VerifyError::from(e)
            })?;

        Ok(evaluate(request, &claimed, &tx))
    }

    /// Judge the claim against an already fetched transaction.
    pub fn verify_transaction(
        &self,
        request: &ClaimRequest,
        tx: &Transaction,
    ) -> Result<VerificationResult, VerifyError> {
        Ok(match self.claimed_asset(request)? {
            Ok(claimed) => evaluate(request, &claimed, tx),
            Err(reason) => rejected(request, reason),
        })
    }

    /// Validate the request and build the asset identity it claims.
    ///
    /// The outer error means the request cannot be evaluated; the inner one
    /// is a verdict.
    fn claimed_asset(
        &self,
        request: &ClaimRequest,
    ) -> Result<Result<AssetIdentity, FailureReason>, VerifyError> {
        self.validator.validate(request)?;

        let issuer = match claimed_issuer(request.issuer()) {
            Ok(issuer) => issuer,
            Err(reason) => return Ok(Err(reason)),
        };
        let code = AssetCode::new(request.asset_code())
            .map_err(|e| VerifyError::InvalidInput(e.to_string()))?;

        Ok(Ok(AssetIdentity::new(issuer, code)))
    }
}

/// Run the transaction checks in order, stopping at the first failure.
pub fn evaluate(
    request: &ClaimRequest,
    claimed: &AssetIdentity,
    tx: &Transaction,
) -> VerificationResult {
    match judge(request, claimed, tx) {
        Ok(amount) => {
            tracing::info!(
                tx = %tx.hash,
                asset = %claimed,
                amount,
                "claim verified"
            );
            VerificationResult::verified(amount)
        }
        Err(reason) => rejected(request, reason),
    }
}

fn judge(
    request: &ClaimRequest,
    claimed: &AssetIdentity,
    tx: &Transaction,
) -> Result<i64, FailureReason> {
    let commitment = check_invariants(tx)?;
    let payment = extract_payment(tx)?;
    let paid = issued_asset(payment)?;
    check_redemption(payment, paid)?;
    check_asset(paid, claimed)?;
    check_secret(request.secret(), commitment)?;
    Ok(payment.amount)
}

fn rejected(request: &ClaimRequest, reason: FailureReason) -> VerificationResult {
    tracing::debug!(
        tx = request.transaction_ref(),
        reason = %reason,
        "claim rejected"
    );
    VerificationResult::rejected(reason)
}
