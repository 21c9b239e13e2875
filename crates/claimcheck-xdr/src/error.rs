/// Ledger codec errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum XdrError {
    #[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },

    #[error("unknown {what} discriminant {value}")]
    UnknownDiscriminant { what: &'static str, value: i32 },

    #[error("{what} length {len} exceeds maximum {max}")]
    LengthExceeded {
        what: &'static str,
        len: u32,
        max: u32,
    },

    #[error("invalid boolean value {0}")]
    InvalidBool(u32),

    #[error("non-zero padding byte")]
    NonZeroPadding,

    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),

    #[error("base64 decoding failed: {0}")]
    Base64(#[from] base64::DecodeError),
}
