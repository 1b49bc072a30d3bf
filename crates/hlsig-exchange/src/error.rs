//! Exchange error types.

use hlsig_core::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExchangeError {
    /// A float field could not be put on the wire.
    #[error("Failed to encode {field}: {source}")]
    Encode {
        field: &'static str,
        source: CoreError,
    },

    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("Registry error: {0}")]
    Registry(#[from] hlsig_registry::RegistryError),

    #[error("Signer error: {0}")]
    Signer(#[from] hlsig_signer::SignerError),

    #[error("Key error: {0}")]
    Key(#[from] hlsig_signer::KeyError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] hlsig_telemetry::TelemetryError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExchangeError {
    pub fn encode(field: &'static str) -> impl FnOnce(CoreError) -> Self {
        move |source| Self::Encode { field, source }
    }
}

pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// Failures talking to the exchange endpoint.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response body: {0}")]
    Decode(String),
}
