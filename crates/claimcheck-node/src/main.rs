//! Claimcheck Node entry point.
//!
//! Starts the verification service with configuration from a TOML file or defaults.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use claimcheck_node::config::LoggingConfig;
use claimcheck_node::{start_api_server, AppState, ClaimcheckConfig, LogFormat};

/// Claimcheck Node
#[derive(Parser, Debug)]
#[command(name = "claimcheck-node", version, about = "Claimcheck verification service")]
struct Args {
    /// Path to the configuration file (TOML).
    #[arg(short, long, default_value = "claimcheck.toml")]
    config: PathBuf,

    /// Override the API listen address.
    #[arg(long)]
    listen_addr: Option<String>,

    /// Override the API port.
    #[arg(long)]
    port: Option<u16>,

    /// Override the Horizon base URL.
    #[arg(long)]
    horizon_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Generate a default config file and exit.
    #[arg(long)]
    init: bool,
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Handle --init flag
    if args.init {
        let config = ClaimcheckConfig::default();
        init_tracing(&config.logging);
        config.save(&args.config)?;
        tracing::info!(path = %args.config.display(), "wrote default config");
        return Ok(());
    }

    // Load configuration
    let mut config = ClaimcheckConfig::load(&args.config)?;

    // Apply CLI overrides
    if let Some(listen_addr) = args.listen_addr {
        config.api.listen_addr = listen_addr;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }
    if let Some(url) = args.horizon_url {
        config.horizon.url = url;
    }
    if let Some(level) = args.log_level {
        config.logging.level = level;
    }

    init_tracing(&config.logging);
    tracing::info!("Claimcheck Node v{}", env!("CARGO_PKG_VERSION"));

    let listen_addr = config.api_addr()?;
    let state = Arc::new(AppState::with_horizon(&config)?);

    // Stop accepting connections on SIGINT and let in-flight requests finish.
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
        tracing::info!("received shutdown signal");
    };

    start_api_server(listen_addr, state, shutdown).await?;
    tracing::info!("Claimcheck node exited cleanly");
    Ok(())
}
