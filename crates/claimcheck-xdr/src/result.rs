//! Transaction result decoding.
//!
//! Only the fee and the top-level result code are read; per-operation results
//! that follow are ignored.

use claimcheck_core::ResultStatus;

use crate::error::XdrError;
use crate::reader::XdrReader;

const TX_FEE_BUMP_INNER_SUCCESS: i32 = 1;
const TX_SUCCESS: i32 = 0;
const TX_FAILED: i32 = -1;
const TX_FEE_BUMP_INNER_FAILED: i32 = -13;

/// Map a ledger result code onto a `ResultStatus`.
pub fn status_from_code(code: i32) -> ResultStatus {
    match code {
        TX_SUCCESS | TX_FEE_BUMP_INNER_SUCCESS => ResultStatus::Success,
        TX_FAILED | TX_FEE_BUMP_INNER_FAILED => ResultStatus::Failed,
        other => ResultStatus::Other(other),
    }
}

/// Decode raw transaction result XDR.
pub fn decode_result(bytes: &[u8]) -> Result<ResultStatus, XdrError> {
    let mut r = XdrReader::new(bytes);
    let _fee_charged = r.read_i64()?;
    let code = r.read_i32()?;
    Ok(status_from_code(code))
}

/// Decode base64 transaction result XDR.
pub fn decode_result_base64(encoded: &str) -> Result<ResultStatus, XdrError> {
    let bytes = crate::decode_base64(encoded)?;
    decode_result(&bytes)
}
