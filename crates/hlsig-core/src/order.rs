//! Order-related business types.
//!
//! These are the caller-facing shapes; the signer crate turns them into the
//! exact wire structures that get hashed.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Time in force for limit orders.
///
/// Wire enums serialize through their string form so every format (JSON and
/// msgpack alike) sees a plain string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "&'static str")]
pub enum TimeInForce {
    /// Add-liquidity-only.
    #[serde(rename = "Alo")]
    AddLiquidityOnly,
    /// Immediate-or-cancel.
    #[serde(rename = "Ioc")]
    ImmediateOrCancel,
    /// Good-til-cancelled.
    #[default]
    #[serde(rename = "Gtc")]
    GoodTilCancelled,
}

impl TimeInForce {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddLiquidityOnly => "Alo",
            Self::ImmediateOrCancel => "Ioc",
            Self::GoodTilCancelled => "Gtc",
        }
    }
}

impl From<TimeInForce> for &'static str {
    fn from(tif: TimeInForce) -> Self {
        tif.as_str()
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeInForce {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "alo" => Ok(Self::AddLiquidityOnly),
            "ioc" => Ok(Self::ImmediateOrCancel),
            "gtc" => Ok(Self::GoodTilCancelled),
            other => Err(CoreError::InvalidTif(other.to_string())),
        }
    }
}

/// Take-profit or stop-loss flavour of a trigger order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", into = "&'static str")]
pub enum Tpsl {
    Tp,
    Sl,
}

impl From<Tpsl> for &'static str {
    fn from(tpsl: Tpsl) -> Self {
        match tpsl {
            Tpsl::Tp => "tp",
            Tpsl::Sl => "sl",
        }
    }
}

/// How the orders of a batch relate to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", into = "&'static str")]
pub enum Grouping {
    /// Independent orders.
    #[default]
    Na,
    /// Entry plus attached TP/SL.
    NormalTpsl,
    /// TP/SL attached to the whole position.
    PositionTpsl,
}

impl From<Grouping> for &'static str {
    fn from(grouping: Grouping) -> Self {
        match grouping {
            Grouping::Na => "na",
            Grouping::NormalTpsl => "normalTpsl",
            Grouping::PositionTpsl => "positionTpsl",
        }
    }
}

/// Client order id: 16 bytes, rendered as `0x` + 32 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cloid([u8; 16]);

impl Cloid {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    /// Cloid whose big-endian value is `value` (`0x0000…0001` for 1).
    pub fn from_u128(value: u128) -> Self {
        Self(value.to_be_bytes())
    }

    /// Fresh random cloid.
    pub fn random() -> Self {
        Self(*Uuid::new_v4().as_bytes())
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }

    /// Wire representation.
    pub fn to_raw(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for Cloid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_raw())
    }
}

impl FromStr for Cloid {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .ok_or_else(|| CoreError::InvalidCloid(format!("{s}: missing 0x prefix")))?;
        if digits.len() != 32 {
            return Err(CoreError::InvalidCloid(format!(
                "{s}: expected 32 hex digits, got {}",
                digits.len()
            )));
        }
        let mut bytes = [0u8; 16];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|e| CoreError::InvalidCloid(format!("{s}: {e}")))?;
        Ok(Self(bytes))
    }
}

impl Serialize for Cloid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_raw())
    }
}

impl<'de> Deserialize<'de> for Cloid {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Limit or trigger parameters of an order, still in float form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrderKind {
    Limit {
        tif: TimeInForce,
    },
    Trigger {
        trigger_px: f64,
        is_market: bool,
        tpsl: Tpsl,
    },
}

impl OrderKind {
    pub fn limit(tif: TimeInForce) -> Self {
        Self::Limit { tif }
    }
}

/// Business-level order: instrument by name, prices and sizes as floats.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub coin: String,
    pub is_buy: bool,
    pub sz: f64,
    pub limit_px: f64,
    pub kind: OrderKind,
    pub reduce_only: bool,
    pub cloid: Option<Cloid>,
}

impl OrderRequest {
    /// Plain limit order.
    pub fn limit(
        coin: impl Into<String>,
        is_buy: bool,
        sz: f64,
        limit_px: f64,
        tif: TimeInForce,
    ) -> Self {
        Self {
            coin: coin.into(),
            is_buy,
            sz,
            limit_px,
            kind: OrderKind::limit(tif),
            reduce_only: false,
            cloid: None,
        }
    }

    #[must_use]
    pub fn reduce_only(mut self, reduce_only: bool) -> Self {
        self.reduce_only = reduce_only;
        self
    }

    #[must_use]
    pub fn with_cloid(mut self, cloid: Option<Cloid>) -> Self {
        self.cloid = cloid;
        self
    }
}
