//! Instrument identifiers and per-instrument precision rules.

use crate::error::{CoreError, Result};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Significant figures allowed in an order price.
pub const MAX_PRICE_SIG_FIGS: usize = 5;
/// Decimal budget for perp prices (`6 - szDecimals`).
pub const PERP_MAX_DECIMALS: u32 = 6;
/// Decimal budget for spot prices (`8 - szDecimals`).
pub const SPOT_MAX_DECIMALS: u32 = 8;

/// Numeric asset id as used on the wire (`a` / `asset` fields).
///
/// Three namespaces share the u32 space:
/// - perps on the default dex: `index`, below 10000
/// - spot pairs: `10000 + index`
/// - builder-deployed perp dex `i` (0-based, default dex excluded):
///   `110000 + i * 10000 + index`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(pub u32);

impl AssetId {
    pub const SPOT_OFFSET: u32 = 10_000;
    pub const BUILDER_PERP_OFFSET: u32 = 110_000;
    pub const BUILDER_DEX_STRIDE: u32 = 10_000;

    /// Perp on the default dex.
    pub fn perp(index: u32) -> Result<Self> {
        if index >= Self::SPOT_OFFSET {
            return Err(CoreError::AssetOutOfRange {
                kind: "perp",
                index,
            });
        }
        Ok(Self(index))
    }

    /// Spot pair by its spot-universe index.
    pub fn spot(index: u32) -> Result<Self> {
        if index >= Self::BUILDER_PERP_OFFSET - Self::SPOT_OFFSET {
            return Err(CoreError::AssetOutOfRange {
                kind: "spot",
                index,
            });
        }
        Ok(Self(Self::SPOT_OFFSET + index))
    }

    /// Perp on builder dex number `dex` (0-based among non-default dexs).
    pub fn builder_perp(dex: u32, index: u32) -> Result<Self> {
        if index >= Self::BUILDER_DEX_STRIDE {
            return Err(CoreError::AssetOutOfRange {
                kind: "builder perp",
                index,
            });
        }
        dex.checked_mul(Self::BUILDER_DEX_STRIDE)
            .and_then(|base| base.checked_add(Self::BUILDER_PERP_OFFSET))
            .and_then(|base| base.checked_add(index))
            .map(Self)
            .ok_or(CoreError::AssetOutOfRange {
                kind: "builder dex",
                index: dex,
            })
    }

    pub fn index(&self) -> u32 {
        self.0
    }

    pub fn kind(&self) -> InstrumentKind {
        match self.0 {
            id if id < Self::SPOT_OFFSET => InstrumentKind::Perp,
            id if id < Self::BUILDER_PERP_OFFSET => InstrumentKind::Spot,
            id => InstrumentKind::BuilderPerp {
                dex: (id - Self::BUILDER_PERP_OFFSET) / Self::BUILDER_DEX_STRIDE,
            },
        }
    }

    pub fn is_spot(&self) -> bool {
        matches!(self.kind(), InstrumentKind::Spot)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Namespace an asset id belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstrumentKind {
    Perp,
    Spot,
    BuilderPerp { dex: u32 },
}

/// Tradable instrument as known to the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instrument {
    /// Exchange coin name (`BTC`, `@107`, `PURR/USDC`, `xyz:SILVER`).
    pub name: String,
    pub asset: AssetId,
    /// Size decimals (`szDecimals`); sizes are multiples of `10^-sz_decimals`.
    pub sz_decimals: u32,
}

impl Instrument {
    pub fn new(name: impl Into<String>, asset: AssetId, sz_decimals: u32) -> Self {
        Self {
            name: name.into(),
            asset,
            sz_decimals,
        }
    }

    pub fn kind(&self) -> InstrumentKind {
        self.asset.kind()
    }

    /// Maximum price decimals for this instrument.
    pub fn max_price_decimals(&self) -> u32 {
        let budget = match self.kind() {
            InstrumentKind::Spot => SPOT_MAX_DECIMALS,
            InstrumentKind::Perp | InstrumentKind::BuilderPerp { .. } => PERP_MAX_DECIMALS,
        };
        budget.saturating_sub(self.sz_decimals)
    }

    /// Aggressive limit price for a market-style order.
    ///
    /// Moves `reference_px` by `slippage` against the taker, keeps 5
    /// significant figures and rounds to [`Self::max_price_decimals`].
    pub fn slippage_price(&self, reference_px: f64, is_buy: bool, slippage: f64) -> Result<f64> {
        if !slippage.is_finite() || !(0.0..1.0).contains(&slippage) {
            return Err(CoreError::InvalidSlippage(slippage));
        }
        if !reference_px.is_finite() {
            return Err(CoreError::NonFinite(reference_px));
        }

        let moved = if is_buy {
            reference_px * (1.0 + slippage)
        } else {
            reference_px * (1.0 - slippage)
        };

        // {:.4e} keeps 5 significant figures
        let sig: f64 = format!("{:.*e}", MAX_PRICE_SIG_FIGS - 1, moved)
            .parse()
            .map_err(|e| CoreError::Decimal(format!("{moved}: {e}")))?;

        let rounded = Decimal::from_f64(sig)
            .ok_or_else(|| CoreError::Decimal(format!("{sig} is not representable")))?
            .round_dp_with_strategy(self.max_price_decimals(), RoundingStrategy::MidpointNearestEven);

        rounded
            .to_f64()
            .ok_or_else(|| CoreError::Decimal(format!("{rounded} does not fit in f64")))
    }
}
