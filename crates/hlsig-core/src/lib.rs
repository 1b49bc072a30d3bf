//! Core domain types for hlsig.
//!
//! This crate has no signing or network code. It provides:
//! - `AssetId`, `Instrument`: asset id namespaces and price precision rules
//! - `OrderRequest`, `Cloid`, `TimeInForce`: caller-facing order shapes
//! - `Network`: mainnet / testnet selection
//! - `wire`: float to wire-string and scaled-integer conversion

pub mod error;
pub mod market;
pub mod network;
pub mod order;
pub mod wire;

pub use error::{CoreError, Result};
pub use market::{AssetId, Instrument, InstrumentKind, MAX_PRICE_SIG_FIGS};
pub use network::Network;
pub use order::{Cloid, Grouping, OrderKind, OrderRequest, TimeInForce, Tpsl};
pub use wire::{
    float_to_int, float_to_int_for_hashing, float_to_usd_int, float_to_wire, float_to_wire_with,
};
