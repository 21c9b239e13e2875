/// Core value-type errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("invalid account address: {0}")]
    InvalidAddress(String),

    #[error("invalid asset code: {0}")]
    InvalidAssetCode(String),
}
