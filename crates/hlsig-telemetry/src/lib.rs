//! Prometheus metrics and structured logging for hlsig.
//!
//! - Structured logging with tracing (pretty for development, JSON for production)
//! - Prometheus counters for signed actions, signing failures and submissions
//! - Instrument table gauges (version, size)

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{init_logging, LogFormat};
pub use metrics::Metrics;
