use serde::{Deserialize, Serialize};
use std::fmt;

use crate::address::AccountAddress;
use crate::error::CoreError;

/// Longest asset code the ledger can represent.
pub const MAX_ASSET_CODE_LEN: usize = 12;

/// An issued-asset code in its on-ledger, fixed-width form.
///
/// The ledger stores codes of 1-4 characters in a 4-byte field and codes of
/// 5-12 characters in a 12-byte field, right-padded with NUL bytes. Equality
/// compares the variant and every byte, so a code only matches the exact
/// padded value it was issued with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetCode {
    AlphaNum4([u8; 4]),
    AlphaNum12([u8; 12]),
}

impl AssetCode {
    /// Pad a caller-supplied code into the width its length selects.
    pub fn new(code: &str) -> Result<Self, CoreError> {
        let bytes = code.as_bytes();
        if let Some(bad) = bytes.iter().find(|b| !b.is_ascii_graphic()) {
            return Err(CoreError::InvalidAssetCode(format!(
                "{:?} contains non-printable byte 0x{:02x}",
                code, bad
            )));
        }

        match bytes.len() {
            1..=4 => {
                let mut raw = [0u8; 4];
                raw[..bytes.len()].copy_from_slice(bytes);
                Ok(Self::AlphaNum4(raw))
            }
            5..=MAX_ASSET_CODE_LEN => {
                let mut raw = [0u8; 12];
                raw[..bytes.len()].copy_from_slice(bytes);
                Ok(Self::AlphaNum12(raw))
            }
            len => Err(CoreError::InvalidAssetCode(format!(
                "length {} outside 1..={}",
                len, MAX_ASSET_CODE_LEN
            ))),
        }
    }

    /// The padded on-ledger bytes.
    pub fn raw(&self) -> &[u8] {
        match self {
            Self::AlphaNum4(raw) => raw,
            Self::AlphaNum12(raw) => raw,
        }
    }

    /// The code with trailing NUL padding removed.
    pub fn as_str(&self) -> String {
        let raw = self.raw();
        let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        String::from_utf8_lossy(&raw[..end]).into_owned()
    }
}

impl fmt::Display for AssetCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_str())
    }
}

/// An issued asset: the issuing account plus the asset code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetIdentity {
    pub issuer: AccountAddress,
    pub code: AssetCode,
}

impl AssetIdentity {
    pub fn new(issuer: AccountAddress, code: AssetCode) -> Self {
        Self { issuer, code }
    }

    /// Build from caller-supplied text fields.
    pub fn parse(issuer: &str, code: &str) -> Result<Self, CoreError> {
        Ok(Self {
            issuer: AccountAddress::parse(issuer)?,
            code: AssetCode::new(code)?,
        })
    }
}

impl fmt::Display for AssetIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.code, self.issuer)
    }
}

/// Any asset a payment can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Asset {
    /// The ledger's native currency. It has no issuer.
    Native,
    /// An issued asset.
    Issued(AssetIdentity),
}

impl Asset {
    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    pub fn identity(&self) -> Option<&AssetIdentity> {
        match self {
            Self::Native => None,
            Self::Issued(identity) => Some(identity),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Issued(identity) => write!(f, "{}", identity),
        }
    }
}
