//! `claimcheck status`: query the status of a running node.

use clap::Args;
use serde::Deserialize;

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// API endpoint of the node.
    #[arg(short, long, default_value = super::DEFAULT_ENDPOINT)]
    pub endpoint: String,
}

#[derive(Deserialize)]
struct StatusResponse {
    version: String,
    gateway: String,
    started_at: String,
    uptime_secs: u64,
}

pub async fn run(args: &StatusArgs) -> anyhow::Result<()> {
    let endpoint = args.endpoint.trim_end_matches('/');
    let url = format!("{}/api/v1/status", endpoint);
    let resp = reqwest::get(&url).await;

    match resp {
        Ok(r) if r.status().is_success() => {
            let status: StatusResponse = r.json().await?;
            println!("Node Status: ready");
            println!("  Version:    {}", status.version);
            println!("  Gateway:    {}", status.gateway);
            println!("  Started:    {}", status.started_at);
            println!("  Uptime:     {}s", status.uptime_secs);
        }
        Ok(r) => {
            anyhow::bail!("node returned HTTP {}", r.status());
        }
        Err(e) => {
            println!("Could not reach node at {}", endpoint);
            println!("  Error: {}", e);
            println!();
            println!("Is the node running? Start it with: claimcheck-node");
            anyhow::bail!("node unreachable");
        }
    }

    Ok(())
}
