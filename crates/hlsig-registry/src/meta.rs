//! Raw exchange metadata as returned by the info endpoint.
//!
//! Field names follow the API (`szDecimals`, `isCanonical`, ...). Only the
//! fields needed for asset resolution are modelled; unknown fields are
//! ignored on deserialization.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `{"type":"meta"}` response, optionally for a builder dex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerpMeta {
    pub universe: Vec<PerpAssetMeta>,
}

/// One perp in a `meta` universe. Position in the universe is its index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerpAssetMeta {
    pub name: String,
    pub sz_decimals: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_leverage: Option<u32>,
    #[serde(default)]
    pub only_isolated: bool,
}

/// `{"type":"spotMeta"}` response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpotMeta {
    pub universe: Vec<SpotPairMeta>,
    pub tokens: Vec<SpotTokenMeta>,
}

/// Spot pair. `tokens` holds `[base, quote]` indices into [`SpotMeta::tokens`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotPairMeta {
    pub name: String,
    pub tokens: Vec<usize>,
    pub index: u32,
    #[serde(default)]
    pub is_canonical: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotTokenMeta {
    pub name: String,
    pub sz_decimals: u32,
    #[serde(default)]
    pub wei_decimals: u32,
    pub index: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_id: Option<String>,
}

/// Entry of the `{"type":"perpDexs"}` array. The first element (the default
/// dex) is `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerpDexEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deployer: Option<String>,
}

/// Everything needed to build an instrument table.
///
/// Also the on-disk format of an offline metadata snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataSnapshot {
    pub meta: PerpMeta,
    pub spot_meta: SpotMeta,
    /// Raw `perpDexs` list; only needed when `dex_meta` is non-empty.
    #[serde(default)]
    pub perp_dexs: Vec<Option<PerpDexEntry>>,
    /// `meta` of each builder dex to load, by dex name.
    #[serde(default)]
    pub dex_meta: BTreeMap<String, PerpMeta>,
}

impl MetadataSnapshot {
    /// 0-based position of a builder dex among the non-default dexs.
    pub fn builder_dex_position(&self, name: &str) -> Option<u32> {
        self.perp_dexs
            .iter()
            .skip(1)
            .position(|entry| entry.as_ref().is_some_and(|e| e.name == name))
            .and_then(|pos| u32::try_from(pos).ok())
    }
}
