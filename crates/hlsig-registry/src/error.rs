//! Registry error types.

use hlsig_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("Unknown perp dex: {0}")]
    UnknownDex(String),

    #[error("Invalid metadata: {0}")]
    InvalidMetadata(String),

    #[error("Asset id error: {0}")]
    AssetId(#[from] CoreError),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RegistryResult<T> = Result<T, RegistryError>;
