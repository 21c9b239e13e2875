//! Claimcheck Node: HTTP service answering whether a ledger transaction
//! redeems a hash-locked claim.

pub mod api;
pub mod config;
pub mod middleware;
pub mod state;

pub use api::{build_router, serve, start_api_server};
pub use config::{ClaimcheckConfig, LogFormat};
pub use state::AppState;
