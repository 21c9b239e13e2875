//! Claimcheck Core: value types shared by the codec, the gateways and the
//! claim verification pipeline.

pub mod address;
pub mod asset;
pub mod claim;
pub mod error;
pub mod transaction;

pub use address::AccountAddress;
pub use asset::{Asset, AssetCode, AssetIdentity};
pub use claim::{ClaimRequest, FailureReason, VerificationResult};
pub use error::CoreError;
pub use transaction::{
    Memo, MemoKind, Operation, OperationBody, PaymentOp, ResultStatus, Transaction,
};
