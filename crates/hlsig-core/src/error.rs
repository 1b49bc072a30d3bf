//! Error types for hlsig-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// The value cannot be represented at the required wire precision.
    #[error("precision loss: {value} is not representable with {decimals} decimals")]
    PrecisionLoss { value: f64, decimals: u32 },

    #[error("value is not finite: {0}")]
    NonFinite(f64),

    #[error("Invalid client order id: {0}")]
    InvalidCloid(String),

    #[error("Invalid time in force: {0}")]
    InvalidTif(String),

    #[error("Unknown network: {0}")]
    InvalidNetwork(String),

    #[error("{kind} index {index} is outside its asset id range")]
    AssetOutOfRange { kind: &'static str, index: u32 },

    #[error("Invalid slippage: {0}")]
    InvalidSlippage(f64),

    #[error("Decimal conversion failed: {0}")]
    Decimal(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
