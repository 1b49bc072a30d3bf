//! Signer error types.

use alloy::primitives::Address;
use thiserror::Error;

/// Errors raised while hashing, building typed data or signing.
#[derive(Debug, Error)]
pub enum SignerError {
    #[error("Invalid nonce: {0} (must be non-negative)")]
    InvalidNonce(i64),

    #[error("Invalid expiresAfter: {0} (must be non-negative)")]
    InvalidExpiry(i64),

    /// Canonical encoding of the action failed.
    #[error("Serialization failed at {step}: {reason}")]
    Serialization { step: &'static str, reason: String },

    /// A typed-data field is missing or has the wrong shape.
    #[error("Typed data field {field}: {reason}")]
    TypedData { field: String, reason: String },

    #[error("Signing failed: {0}")]
    SigningFailed(#[from] alloy::signers::Error),

    #[error("Signature recovery failed: {0}")]
    Recovery(String),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("{0} cannot be signed as a multi-sig inner action")]
    UnsupportedMultiSig(&'static str),

    #[error("Key error: {0}")]
    Key(#[from] KeyError),
}

pub type SignerResult<T> = Result<T, SignerError>;

/// Key management errors.
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),

    #[error("Failed to decode hex: {0}")]
    HexDecode(#[from] hex::FromHexError),

    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    #[error("Address mismatch: expected {expected}, got {actual}")]
    AddressMismatch { expected: Address, actual: Address },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error types for nonce management.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NonceError {
    /// Time drift between local and server clocks exceeds acceptable threshold.
    #[error("time drift too large: {0}ms")]
    TimeDriftTooLarge(i64),
}
