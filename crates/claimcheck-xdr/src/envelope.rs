//! Transaction envelope decoding.
//!
//! Supports the three envelope variants the ledger has produced: v0 (bare
//! ed25519 source, identical on the wire to the pre-protocol-13 layout), v1
//! (muxed source and preconditions) and fee-bump (an outer fee payer wrapping
//! a v1 transaction).

use claimcheck_core::transaction::OPERATION_TYPE_PAYMENT;
use claimcheck_core::{
    AccountAddress, Asset, AssetCode, AssetIdentity, Memo, Operation, OperationBody, PaymentOp,
};

use crate::error::XdrError;
use crate::reader::XdrReader;

const ENVELOPE_TYPE_TX_V0: i32 = 0;
const ENVELOPE_TYPE_TX: i32 = 2;
const ENVELOPE_TYPE_TX_FEE_BUMP: i32 = 5;

const KEY_TYPE_ED25519: i32 = 0;
const KEY_TYPE_MUXED_ED25519: i32 = 0x100;

const ASSET_TYPE_NATIVE: i32 = 0;
const ASSET_TYPE_CREDIT_ALPHANUM4: i32 = 1;
const ASSET_TYPE_CREDIT_ALPHANUM12: i32 = 2;

const MEMO_NONE: i32 = 0;
const MEMO_TEXT: i32 = 1;
const MEMO_ID: i32 = 2;
const MEMO_HASH: i32 = 3;
const MEMO_RETURN: i32 = 4;

const PRECOND_NONE: i32 = 0;
const PRECOND_TIME: i32 = 1;
const PRECOND_V2: i32 = 2;

const SIGNER_KEY_TYPE_ED25519: i32 = 0;
const SIGNER_KEY_TYPE_PRE_AUTH_TX: i32 = 1;
const SIGNER_KEY_TYPE_HASH_X: i32 = 2;
const SIGNER_KEY_TYPE_ED25519_SIGNED_PAYLOAD: i32 = 3;

const MAX_MEMO_TEXT: u32 = 28;
const MAX_OPERATIONS: u32 = 100;
const MAX_SIGNATURES: u32 = 20;
const MAX_EXTRA_SIGNERS: u32 = 2;
const MAX_SIGNED_PAYLOAD: u32 = 64;
const MAX_SIGNATURE: u32 = 64;

/// Which envelope variant carried the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeKind {
    V0,
    V1,
    FeeBump,
}

/// The fields of a decoded envelope. For fee-bump envelopes the source, fee,
/// memo and operations are those of the inner transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEnvelope {
    pub kind: EnvelopeKind,
    pub source_account: AccountAddress,
    pub fee: u32,
    pub sequence: i64,
    pub memo: Memo,
    pub operations: Vec<Operation>,
    /// Signatures on the outermost envelope. `None` when decoding stopped at an
    /// operation whose layout is not decoded.
    pub signature_count: Option<usize>,
}

struct TransactionBody {
    source_account: AccountAddress,
    fee: u32,
    sequence: i64,
    memo: Memo,
    operations: Vec<Operation>,
    /// Whether every operation was decoded, so the reader sits right after
    /// the operation list.
    complete: bool,
}

/// Decode base64 envelope XDR.
pub fn decode_envelope_base64(encoded: &str) -> Result<TransactionEnvelope, XdrError> {
    let bytes = crate::decode_base64(encoded)?;
    decode_envelope(&bytes)
}

/// Decode raw envelope XDR.
pub fn decode_envelope(bytes: &[u8]) -> Result<TransactionEnvelope, XdrError> {
    let mut r = XdrReader::new(bytes);

    let (kind, body) = match r.read_i32()? {
        ENVELOPE_TYPE_TX_V0 => (EnvelopeKind::V0, read_transaction_v0(&mut r)?),
        ENVELOPE_TYPE_TX => (EnvelopeKind::V1, read_transaction_v1(&mut r)?),
        ENVELOPE_TYPE_TX_FEE_BUMP => (EnvelopeKind::FeeBump, read_fee_bump(&mut r)?),
        other => {
            return Err(XdrError::UnknownDiscriminant {
                what: "envelope type",
                value: other,
            })
        }
    };

    let signature_count = if body.complete {
        let count = read_signatures(&mut r)?;
        r.finish()?;
        Some(count)
    } else {
        tracing::debug!(
            decoded_bytes = r.position(),
            "stopped decoding envelope at an undecoded operation"
        );
        None
    };

    Ok(TransactionEnvelope {
        kind,
        source_account: body.source_account,
        fee: body.fee,
        sequence: body.sequence,
        memo: body.memo,
        operations: body.operations,
        signature_count,
    })
}

fn read_transaction_v0(r: &mut XdrReader<'_>) -> Result<TransactionBody, XdrError> {
    let source_account = AccountAddress::from_bytes(r.read_fixed::<32>()?);
    let fee = r.read_u32()?;
    let sequence = r.read_i64()?;
    if r.read_bool()? {
        read_time_bounds(r)?;
    }
    let memo = read_memo(r)?;
    let (operations, complete) = read_operations(r)?;
    let complete = complete && read_ext(r)?;

    Ok(TransactionBody {
        source_account,
        fee,
        sequence,
        memo,
        operations,
        complete,
    })
}

fn read_transaction_v1(r: &mut XdrReader<'_>) -> Result<TransactionBody, XdrError> {
    let (source_account, _) = read_muxed_account(r)?;
    let fee = r.read_u32()?;
    let sequence = r.read_i64()?;
    read_preconditions(r)?;
    let memo = read_memo(r)?;
    let (operations, complete) = read_operations(r)?;
    let complete = complete && read_ext(r)?;

    Ok(TransactionBody {
        source_account,
        fee,
        sequence,
        memo,
        operations,
        complete,
    })
}

fn read_fee_bump(r: &mut XdrReader<'_>) -> Result<TransactionBody, XdrError> {
    let (fee_source, _) = read_muxed_account(r)?;
    let outer_fee = r.read_i64()?;

    match r.read_i32()? {
        ENVELOPE_TYPE_TX => {}
        other => {
            return Err(XdrError::UnknownDiscriminant {
                what: "fee bump inner transaction",
                value: other,
            })
        }
    }
    let mut inner = read_transaction_v1(r)?;
    tracing::trace!(%fee_source, outer_fee, "fee bump envelope");

    if inner.complete {
        read_signatures(r)?;
        inner.complete = read_ext(r)?;
    }
    Ok(inner)
}

/// Reads an extension point; returns whether decoding can continue past it.
fn read_ext(r: &mut XdrReader<'_>) -> Result<bool, XdrError> {
    Ok(r.read_i32()? == 0)
}

fn read_time_bounds(r: &mut XdrReader<'_>) -> Result<(), XdrError> {
    r.read_u64()?;
    r.read_u64()?;
    Ok(())
}

fn read_preconditions(r: &mut XdrReader<'_>) -> Result<(), XdrError> {
    match r.read_i32()? {
        PRECOND_NONE => Ok(()),
        PRECOND_TIME => read_time_bounds(r),
        PRECOND_V2 => {
            if r.read_bool()? {
                read_time_bounds(r)?;
            }
            if r.read_bool()? {
                // ledger bounds
                r.read_u32()?;
                r.read_u32()?;
            }
            if r.read_bool()? {
                // min sequence number
                r.read_i64()?;
            }
            r.read_u64()?; // min sequence age
            r.read_u32()?; // min sequence ledger gap
            let extra_signers = r.read_len("extra signers", MAX_EXTRA_SIGNERS)?;
            for _ in 0..extra_signers {
                read_signer_key(r)?;
            }
            Ok(())
        }
        other => Err(XdrError::UnknownDiscriminant {
            what: "preconditions",
            value: other,
        }),
    }
}

fn read_signer_key(r: &mut XdrReader<'_>) -> Result<(), XdrError> {
    match r.read_i32()? {
        SIGNER_KEY_TYPE_ED25519 | SIGNER_KEY_TYPE_PRE_AUTH_TX | SIGNER_KEY_TYPE_HASH_X => {
            r.read_fixed::<32>()?;
        }
        SIGNER_KEY_TYPE_ED25519_SIGNED_PAYLOAD => {
            r.read_fixed::<32>()?;
            r.read_var_opaque("signed payload", MAX_SIGNED_PAYLOAD)?;
        }
        other => {
            return Err(XdrError::UnknownDiscriminant {
                what: "signer key",
                value: other,
            })
        }
    }
    Ok(())
}

fn read_memo(r: &mut XdrReader<'_>) -> Result<Memo, XdrError> {
    match r.read_i32()? {
        MEMO_NONE => Ok(Memo::None),
        MEMO_TEXT => Ok(Memo::Text(
            r.read_var_opaque("memo text", MAX_MEMO_TEXT)?.to_vec(),
        )),
        MEMO_ID => Ok(Memo::Id(r.read_u64()?)),
        MEMO_HASH => Ok(Memo::Hash(r.read_fixed::<32>()?)),
        MEMO_RETURN => Ok(Memo::Return(r.read_fixed::<32>()?)),
        other => Err(XdrError::UnknownDiscriminant {
            what: "memo",
            value: other,
        }),
    }
}

fn read_account_id(r: &mut XdrReader<'_>) -> Result<AccountAddress, XdrError> {
    match r.read_i32()? {
        KEY_TYPE_ED25519 => Ok(AccountAddress::from_bytes(r.read_fixed::<32>()?)),
        other => Err(XdrError::UnknownDiscriminant {
            what: "public key",
            value: other,
        }),
    }
}

fn read_muxed_account(r: &mut XdrReader<'_>) -> Result<(AccountAddress, Option<u64>), XdrError> {
    match r.read_i32()? {
        KEY_TYPE_ED25519 => Ok((AccountAddress::from_bytes(r.read_fixed::<32>()?), None)),
        KEY_TYPE_MUXED_ED25519 => {
            let id = r.read_u64()?;
            let key = r.read_fixed::<32>()?;
            Ok((AccountAddress::from_bytes(key), Some(id)))
        }
        other => Err(XdrError::UnknownDiscriminant {
            what: "muxed account",
            value: other,
        }),
    }
}

fn read_asset(r: &mut XdrReader<'_>) -> Result<Asset, XdrError> {
    match r.read_i32()? {
        ASSET_TYPE_NATIVE => Ok(Asset::Native),
        ASSET_TYPE_CREDIT_ALPHANUM4 => {
            let code = AssetCode::AlphaNum4(r.read_fixed::<4>()?);
            let issuer = read_account_id(r)?;
            Ok(Asset::Issued(AssetIdentity::new(issuer, code)))
        }
        ASSET_TYPE_CREDIT_ALPHANUM12 => {
            let code = AssetCode::AlphaNum12(r.read_fixed::<12>()?);
            let issuer = read_account_id(r)?;
            Ok(Asset::Issued(AssetIdentity::new(issuer, code)))
        }
        other => Err(XdrError::UnknownDiscriminant {
            what: "asset",
            value: other,
        }),
    }
}

/// Reads the operation list. The returned flag is false when an operation
/// with an undecoded body was hit; that operation and all later ones are
/// recorded without their bodies.
fn read_operations(r: &mut XdrReader<'_>) -> Result<(Vec<Operation>, bool), XdrError> {
    let count = r.read_len("operations", MAX_OPERATIONS)?;
    let mut operations = Vec::with_capacity(count);
    let mut complete = true;

    for _ in 0..count {
        if !complete {
            operations.push(Operation {
                source_account: None,
                body: OperationBody::Opaque,
            });
            continue;
        }

        let source_account = if r.read_bool()? {
            Some(read_muxed_account(r)?.0)
        } else {
            None
        };

        let body = match r.read_i32()? {
            OPERATION_TYPE_PAYMENT => {
                let (destination, destination_muxed_id) = read_muxed_account(r)?;
                let asset = read_asset(r)?;
                let amount = r.read_i64()?;
                OperationBody::Payment(PaymentOp {
                    destination,
                    destination_muxed_id,
                    asset,
                    amount,
                })
            }
            type_code => {
                complete = false;
                OperationBody::Other { type_code }
            }
        };

        operations.push(Operation {
            source_account,
            body,
        });
    }

    Ok((operations, complete))
}

fn read_signatures(r: &mut XdrReader<'_>) -> Result<usize, XdrError> {
    let count = r.read_len("signatures", MAX_SIGNATURES)?;
    for _ in 0..count {
        r.read_fixed::<4>()?; // hint
        r.read_var_opaque("signature", MAX_SIGNATURE)?;
    }
    Ok(count)
}
