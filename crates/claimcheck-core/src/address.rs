//! Ledger account addresses.
//!
//! An account address is the "strkey" text form of an ed25519 public key:
//! RFC 4648 base32 (no padding) over `version || key || crc16`, where the
//! version byte selects the `G` prefix and the CRC16-XModem checksum is
//! stored little-endian.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Version byte of an ed25519 account id (`G...`).
const VERSION_ACCOUNT_ID: u8 = 6 << 3;

/// Length of an encoded account address.
pub const ADDRESS_LEN: usize = 56;

const KEY_LEN: usize = 32;
const PAYLOAD_LEN: usize = 1 + KEY_LEN + 2;

/// An ed25519 ledger account, identified by its 32-byte public key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountAddress([u8; KEY_LEN]);

impl AccountAddress {
    /// Wrap a raw ed25519 public key.
    pub const fn from_bytes(key: [u8; KEY_LEN]) -> Self {
        Self(key)
    }

    /// The raw public key.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Parse a `G...` address, checking alphabet, length, version byte and checksum.
    pub fn parse(address: &str) -> Result<Self, CoreError> {
        if address.len() != ADDRESS_LEN {
            return Err(CoreError::InvalidAddress(format!(
                "expected {} characters, got {}",
                ADDRESS_LEN,
                address.len()
            )));
        }

        let payload = base32_decode(address)
            .ok_or_else(|| CoreError::InvalidAddress("not valid base32".into()))?;
        if payload.len() != PAYLOAD_LEN {
            return Err(CoreError::InvalidAddress(format!(
                "decoded to {} bytes, expected {}",
                payload.len(),
                PAYLOAD_LEN
            )));
        }

        if payload[0] != VERSION_ACCOUNT_ID {
            return Err(CoreError::InvalidAddress(format!(
                "unexpected version byte 0x{:02x}",
                payload[0]
            )));
        }

        let (body, checksum) = payload.split_at(1 + KEY_LEN);
        let expected = crc16_xmodem(body);
        let actual = u16::from_le_bytes([checksum[0], checksum[1]]);
        if expected != actual {
            return Err(CoreError::InvalidAddress("checksum mismatch".into()));
        }

        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(&body[1..]);
        Ok(Self(key))
    }
}

impl FromStr for AccountAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(VERSION_ACCOUNT_ID, &self.0))
    }
}

impl fmt::Debug for AccountAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountAddress({})", self)
    }
}

impl Serialize for AccountAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for AccountAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

fn encode(version: u8, key: &[u8; KEY_LEN]) -> String {
    let mut payload = Vec::with_capacity(PAYLOAD_LEN);
    payload.push(version);
    payload.extend_from_slice(key);
    let checksum = crc16_xmodem(&payload);
    payload.extend_from_slice(&checksum.to_le_bytes());
    base32_encode(&payload)
}

/// CRC-16/XMODEM (poly 0x1021, init 0).
fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity((data.len() * 8).div_ceil(5));
    let mut buffer: u32 = 0;
    let mut bits = 0u32;

    for &byte in data {
        buffer = (buffer << 8) | byte as u32;
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            out.push(ALPHABET[((buffer >> bits) & 0x1f) as usize] as char);
        }
    }
    if bits > 0 {
        out.push(ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize] as char);
    }
    out
}

/// Unpadded base32 decode. Rejects unknown symbols and non-zero trailing bits.
fn base32_decode(input: &str) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len() * 5 / 8);
    let mut buffer: u32 = 0;
    let mut bits = 0u32;

    for symbol in input.bytes() {
        let value = ALPHABET.iter().position(|&a| a == symbol)? as u32;
        buffer = (buffer << 5) | value;
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            out.push((buffer >> bits) as u8);
        }
    }

    if bits > 0 && buffer & ((1 << bits) - 1) != 0 {
        return None;
    }
    Some(out)
}
