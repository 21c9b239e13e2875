//! Claimcheck CLI: command-line client for a running claimcheck node.
//!
//! Subcommands: verify, status.

mod commands;

use clap::{Parser, Subcommand};

/// Claimcheck: verify hash-locked asset redemptions.
#[derive(Parser, Debug)]
#[command(name = "claimcheck", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Verify that a transaction redeems a claim.
    Verify(commands::verify::VerifyArgs),
    /// Query the status of a running node.
    Status(commands::status::StatusArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Verify(args) => commands::verify::run(args).await,
        Commands::Status(args) => commands::status::run(args).await,
    }
}
