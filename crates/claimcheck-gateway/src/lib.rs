//! Claimcheck Gateway
//!
//! Looks transactions up by reference and hands them to the verifier fully
//! decoded. Adapters bridge to a concrete source: the Horizon REST API or an
//! in-memory table.

pub mod adapters;
pub mod error;
pub mod traits;

pub use adapters::horizon::{HorizonConfig, HorizonGateway};
pub use adapters::memory::InMemoryGateway;
pub use error::GatewayError;
pub use traits::TransactionGateway;
