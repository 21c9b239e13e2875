//! Decoded ledger transaction, as handed to the verification pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::AccountAddress;
use crate::asset::Asset;

/// Payment operation type code on the ledger.
pub const OPERATION_TYPE_PAYMENT: i32 = 1;

/// The kind of memo attached to a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MemoKind {
    None,
    Text,
    Id,
    Hash,
    Return,
}

impl fmt::Display for MemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Text => write!(f, "text"),
            Self::Id => write!(f, "id"),
            Self::Hash => write!(f, "hash"),
            Self::Return => write!(f, "return"),
        }
    }
}

/// Transaction memo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Memo {
    None,
    /// Up to 28 bytes; not required to be UTF-8.
    Text(Vec<u8>),
    Id(u64),
    Hash([u8; 32]),
    Return([u8; 32]),
}

impl Memo {
    pub fn kind(&self) -> MemoKind {
        match self {
            Self::None => MemoKind::None,
            Self::Text(_) => MemoKind::Text,
            Self::Id(_) => MemoKind::Id,
            Self::Hash(_) => MemoKind::Hash,
            Self::Return(_) => MemoKind::Return,
        }
    }

    /// The committed hash, if this is a hash memo.
    pub fn hash(&self) -> Option<&[u8; 32]> {
        match self {
            Self::Hash(hash) => Some(hash),
            _ => None,
        }
    }
}

impl fmt::Display for Memo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Text(text) => write!(f, "text:{}", String::from_utf8_lossy(text)),
            Self::Id(id) => write!(f, "id:{}", id),
            Self::Hash(hash) => write!(f, "hash:{}", hex::encode(hash)),
            Self::Return(hash) => write!(f, "return:{}", hex::encode(hash)),
        }
    }
}

/// Outcome the ledger recorded for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResultStatus {
    Success,
    Failed,
    /// Any other result code (bad sequence, insufficient fee, ...).
    Other(i32),
}

impl ResultStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for ResultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Failed => write!(f, "failed"),
            Self::Other(code) => write!(f, "other({})", code),
        }
    }
}

/// A payment of `amount` units of `asset` to `destination`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentOp {
    /// Receiving account. For a muxed destination this is the underlying account.
    pub destination: AccountAddress,
    /// Sub-account id when the destination was muxed.
    pub destination_muxed_id: Option<u64>,
    pub asset: Asset,
    /// Amount in the asset's smallest unit (1e-7 of a display unit).
    pub amount: i64,
}

/// Body of a single operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationBody {
    Payment(PaymentOp),
    /// A non-payment operation of the given ledger type code.
    Other { type_code: i32 },
    /// An operation whose body was not decoded because a preceding
    /// operation's layout is unknown to the codec.
    Opaque,
}

/// One operation inside a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    /// Per-operation source account override.
    pub source_account: Option<AccountAddress>,
    pub body: OperationBody,
}

impl Operation {
    pub fn payment(payment: PaymentOp) -> Self {
        Self {
            source_account: None,
            body: OperationBody::Payment(payment),
        }
    }

    pub fn as_payment(&self) -> Option<&PaymentOp> {
        match &self.body {
            OperationBody::Payment(payment) => Some(payment),
            _ => None,
        }
    }
}

/// A settled ledger transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Hex transaction hash (the lookup reference).
    pub hash: String,
    pub source_account: AccountAddress,
    pub fee: u32,
    pub sequence: i64,
    pub memo: Memo,
    pub operations: Vec<Operation>,
    pub result: ResultStatus,
    /// Ledger sequence the transaction was included in, when known.
    pub ledger: Option<u32>,
    /// Close time of that ledger, when known.
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }
}
