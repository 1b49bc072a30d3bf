//! Action builders, request submission and configuration for hlsig.
//!
//! [`Exchange`] turns business parameters into signed `/exchange` requests;
//! [`Transport`] posts them.

pub mod canonical;
pub mod config;
pub mod error;
pub mod exchange;
pub mod transport;

pub use config::AppConfig;
pub use error::{ExchangeError, ExchangeResult, TransportError};
pub use exchange::{AgentApproval, CancelByCloidRequest, CancelRequest, Exchange, ModifyRequest};
pub use transport::{HttpTransport, RecordingTransport, Transport};
