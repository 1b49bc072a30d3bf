//! Prometheus metrics for hlsig.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. If registration fails,
//! it indicates a fatal configuration error (e.g., duplicate metric names)
//! that should cause an immediate crash at startup rather than silent failure.
//! These panics only occur during static initialization, never at runtime.

use crate::error::{TelemetryError, TelemetryResult};
use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, register_int_gauge, Encoder, HistogramVec,
    IntCounterVec, IntGauge, TextEncoder,
};

/// Actions signed, by action type.
pub static ACTIONS_SIGNED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "hlsig_actions_signed_total",
        "Total actions signed",
        &["action_type"]
    )
    .unwrap()
});

/// Signing failures, by pipeline step (encode/hash/sign/...).
pub static SIGNING_FAILURES_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "hlsig_signing_failures_total",
        "Total actions that failed to encode or sign",
        &["step"]
    )
    .unwrap()
});

/// Time from action construction to signed envelope.
pub static SIGNING_LATENCY_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "hlsig_signing_latency_seconds",
        "Signing latency in seconds",
        &["action_type"],
        vec![0.0001, 0.00025, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.05]
    )
    .unwrap()
});

/// Version of the published instrument table.
pub static INSTRUMENT_TABLE_VERSION: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "hlsig_instrument_table_version",
        "Version of the current instrument table"
    )
    .unwrap()
});

/// Number of instruments in the published table.
pub static INSTRUMENT_TABLE_SIZE: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "hlsig_instrument_table_size",
        "Number of instruments in the current table"
    )
    .unwrap()
});

/// Exchange submissions, by outcome (ok/rejected/transport_error).
pub static SUBMISSIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "hlsig_submissions_total",
        "Total requests posted to the exchange",
        &["outcome"]
    )
    .unwrap()
});

/// Metrics facade.
pub struct Metrics;

impl Metrics {
    pub fn action_signed(action_type: &str, latency_secs: f64) {
        ACTIONS_SIGNED_TOTAL.with_label_values(&[action_type]).inc();
        SIGNING_LATENCY_SECONDS
            .with_label_values(&[action_type])
            .observe(latency_secs);
    }

    pub fn signing_failed(step: &str) {
        SIGNING_FAILURES_TOTAL.with_label_values(&[step]).inc();
    }

    /// Record a newly published instrument table.
    pub fn instrument_table(version: u64, size: usize) {
        INSTRUMENT_TABLE_VERSION.set(i64::try_from(version).unwrap_or(i64::MAX));
        INSTRUMENT_TABLE_SIZE.set(i64::try_from(size).unwrap_or(i64::MAX));
    }

    pub fn submission(outcome: &str) {
        SUBMISSIONS_TOTAL.with_label_values(&[outcome]).inc();
    }

    /// Default registry in the Prometheus text exposition format.
    pub fn render() -> TelemetryResult<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&prometheus::gather(), &mut buffer)
            .map_err(|e| TelemetryError::Metrics(e.to_string()))?;
        String::from_utf8(buffer).map_err(|e| TelemetryError::Metrics(e.to_string()))
    }
}
