//! `claimcheck verify`: ask a node whether a transaction redeems a claim.

use claimcheck_core::FailureReason;
use clap::Args;
use serde::{Deserialize, Serialize};

/// Smallest units per display unit of a ledger asset.
const UNITS_PER_ASSET: i64 = 10_000_000;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Address of the account that issued the asset.
    #[arg(short, long)]
    pub issuer: String,

    /// Asset code (1-12 characters).
    #[arg(short, long)]
    pub asset_code: String,

    /// Hex-encoded secret whose SHA-256 is the transaction memo.
    #[arg(short, long)]
    pub secret: String,

    /// Hash of the redeeming transaction.
    #[arg(short, long)]
    pub tx: String,

    /// API endpoint of the node.
    #[arg(short, long, default_value = super::DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[derive(Serialize)]
struct VerifyRequest<'a> {
    asset_issuer: &'a str,
    asset_code: &'a str,
    secret: &'a str,
    transaction_hash: &'a str,
}

#[derive(Deserialize)]
struct VerifyResponse {
    asset_issuer: String,
    asset_code: String,
    transaction_hash: String,
    verified: bool,
    amount: Option<String>,
    failure_reason: Option<FailureReason>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Render a smallest-unit amount as a 7-decimal display amount.
fn display_amount(units: &str) -> String {
    match units.parse::<i64>() {
        Ok(v) => {
            let sign = if v < 0 { "-" } else { "" };
            let abs = v.unsigned_abs();
            let per = UNITS_PER_ASSET as u64;
            format!("{}{}.{:07}", sign, abs / per, abs % per)
        }
        Err(_) => units.to_string(),
    }
}

fn report(data: &VerifyResponse) -> String {
    let mut out = String::new();
    if data.verified {
        out.push_str("Claim is VERIFIED\n");
    } else {
        out.push_str("Claim is NOT VERIFIED\n");
    }
    out.push_str(&format!("  Asset:       {}:{}\n", data.asset_code, data.asset_issuer));
    out.push_str(&format!("  Transaction: {}\n", data.transaction_hash));
    if let Some(ref amount) = data.amount {
        out.push_str(&format!(
            "  Amount:      {} ({} units)\n",
            display_amount(amount),
            amount
        ));
    }
    if let Some(reason) = data.failure_reason {
        out.push_str(&format!("  Reason:      {}: {}\n", reason, reason.message()));
    }
    out
}

pub async fn run(args: &VerifyArgs) -> anyhow::Result<()> {
    let endpoint = args.endpoint.trim_end_matches('/');
    let url = format!("{}/api/v1/claims/verify", endpoint);
    let body = VerifyRequest {
        asset_issuer: &args.issuer,
        asset_code: &args.asset_code,
        secret: &args.secret,
        transaction_hash: &args.tx,
    };

    let client = reqwest::Client::new();
    let resp = client.post(&url).json(&body).send().await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let data: VerifyResponse = r.json().await?;
            print!("{}", report(&data));
        }
        Ok(r) => {
            let status = r.status();
            if let Ok(err) = r.json::<ErrorResponse>().await {
                anyhow::bail!("verification failed (HTTP {}): {}", status, err.error);
            } else {
                anyhow::bail!("verification failed (HTTP {})", status);
            }
        }
        Err(e) => {
            println!("Could not reach node at {}", endpoint);
            println!("  Error: {}", e);
            anyhow::bail!("node unreachable");
        }
    }

    Ok(())
}
