//! Immutable instrument table.
//!
//! Maps user-facing names to exchange coins and coins to instruments.
//! Insertion order matters: spot pairs first, then default-dex perps, then
//! builder dexs. A later coin with the same name replaces the earlier one;
//! a synthesized `BASE/QUOTE` spot alias never replaces anything.

use crate::error::{RegistryError, RegistryResult};
use crate::meta::{MetadataSnapshot, PerpMeta, SpotMeta};
use hlsig_core::{AssetId, Instrument};
use std::collections::HashMap;
use tracing::debug;

/// Snapshot of every resolvable instrument.
#[derive(Debug, Clone, Default)]
pub struct InstrumentTable {
    version: u64,
    /// Lookup name (coin or alias) to coin.
    names: HashMap<String, String>,
    /// Coin to instrument.
    coins: HashMap<String, Instrument>,
}

impl InstrumentTable {
    /// Build a table from a full metadata snapshot.
    pub fn from_snapshot(snapshot: &MetadataSnapshot) -> RegistryResult<Self> {
        let mut builder = InstrumentTableBuilder::new()
            .spot(&snapshot.spot_meta)?
            .perps(&snapshot.meta)?;

        for (dex, meta) in &snapshot.dex_meta {
            let position = snapshot
                .builder_dex_position(dex)
                .ok_or_else(|| RegistryError::UnknownDex(dex.clone()))?;
            builder = builder.builder_dex(position, meta)?;
        }

        Ok(builder.build())
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub(crate) fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    /// Number of distinct instruments (aliases not counted).
    pub fn len(&self) -> usize {
        self.coins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coins.is_empty()
    }

    /// Look up an instrument by coin name or alias.
    pub fn instrument(&self, name: &str) -> RegistryResult<&Instrument> {
        self.names
            .get(name)
            .and_then(|coin| self.coins.get(coin))
            .ok_or_else(|| RegistryError::UnknownInstrument(name.to_string()))
    }

    /// Resolve a name to its numeric asset id.
    pub fn resolve(&self, name: &str) -> RegistryResult<AssetId> {
        self.instrument(name).map(|i| i.asset)
    }

    /// Iterate over all instruments in no particular order.
    pub fn instruments(&self) -> impl Iterator<Item = &Instrument> {
        self.coins.values()
    }
}

/// Incremental construction of an [`InstrumentTable`].
#[derive(Debug, Default)]
pub struct InstrumentTableBuilder {
    table: InstrumentTable,
}

impl InstrumentTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add spot pairs with id `10000 + pair.index` and their
    /// `BASE/QUOTE` aliases. Size decimals come from the base token.
    pub fn spot(mut self, meta: &SpotMeta) -> RegistryResult<Self> {
        for pair in &meta.universe {
            let asset = AssetId::spot(pair.index)?;

            let (base, quote) = match pair.tokens.as_slice() {
                [base, quote] => (
                    meta.tokens.get(*base).ok_or_else(|| {
                        RegistryError::InvalidMetadata(format!(
                            "spot pair {} references unknown base token {base}",
                            pair.name
                        ))
                    })?,
                    meta.tokens.get(*quote).ok_or_else(|| {
                        RegistryError::InvalidMetadata(format!(
                            "spot pair {} references unknown quote token {quote}",
                            pair.name
                        ))
                    })?,
                ),
                other => {
                    return Err(RegistryError::InvalidMetadata(format!(
                        "spot pair {} has {} tokens, expected 2",
                        pair.name,
                        other.len()
                    )))
                }
            };

            self.insert(Instrument::new(&pair.name, asset, base.sz_decimals));

            let alias = format!("{}/{}", base.name, quote.name);
            if !self.table.names.contains_key(&alias) {
                self.table.names.insert(alias, pair.name.clone());
            }
        }
        debug!(pairs = meta.universe.len(), "Added spot instruments");
        Ok(self)
    }

    /// Add default-dex perps; the universe position is the asset id.
    pub fn perps(mut self, meta: &PerpMeta) -> RegistryResult<Self> {
        for (index, asset) in meta.universe.iter().enumerate() {
            let id = AssetId::perp(universe_index(index)?)?;
            self.insert(Instrument::new(&asset.name, id, asset.sz_decimals));
        }
        debug!(perps = meta.universe.len(), "Added perp instruments");
        Ok(self)
    }

    /// Add the perps of builder dex number `position` (0-based among the
    /// non-default dexs).
    pub fn builder_dex(mut self, position: u32, meta: &PerpMeta) -> RegistryResult<Self> {
        for (index, asset) in meta.universe.iter().enumerate() {
            let id = AssetId::builder_perp(position, universe_index(index)?)?;
            self.insert(Instrument::new(&asset.name, id, asset.sz_decimals));
        }
        debug!(
            position,
            perps = meta.universe.len(),
            "Added builder dex instruments"
        );
        Ok(self)
    }

    pub fn build(self) -> InstrumentTable {
        self.table
    }

    fn insert(&mut self, instrument: Instrument) {
        self.table
            .names
            .insert(instrument.name.clone(), instrument.name.clone());
        self.table
            .coins
            .insert(instrument.name.clone(), instrument);
    }
}

fn universe_index(index: usize) -> RegistryResult<u32> {
    u32::try_from(index)
        .map_err(|_| RegistryError::InvalidMetadata(format!("universe index {index} overflows")))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::meta::{PerpAssetMeta, PerpDexEntry, SpotPairMeta, SpotTokenMeta};
    use hlsig_core::InstrumentKind;

    fn perp(name: &str, sz_decimals: u32) -> PerpAssetMeta {
        PerpAssetMeta {
            name: name.to_string(),
            sz_decimals,
            max_leverage: None,
            only_isolated: false,
        }
    }

    fn token(name: &str, index: u32, sz_decimals: u32) -> SpotTokenMeta {
        SpotTokenMeta {
            name: name.to_string(),
            sz_decimals,
            wei_decimals: 8,
            index,
            token_id: None,
        }
    }

    /// Small but complete snapshot used across registry tests.
    pub(crate) fn sample_snapshot() -> MetadataSnapshot {
        let mut dex_meta = std::collections::BTreeMap::new();
        dex_meta.insert(
            "xyz".to_string(),
            PerpMeta {
                universe: vec![perp("xyz:GOLD", 3), perp("xyz:SILVER", 2)],
            },
        );

        MetadataSnapshot {
            meta: PerpMeta {
                universe: vec![
                    perp("BTC", 5),
                    perp("ETH", 4),
                    perp("ATOM", 2),
                    perp("MATIC", 1),
                    perp("DYDX", 1),
                ],
            },
            spot_meta: SpotMeta {
                universe: vec![
                    SpotPairMeta {
                        name: "PURR/USDC".to_string(),
                        tokens: vec![1, 0],
                        index: 0,
                        is_canonical: true,
                    },
                    SpotPairMeta {
                        name: "@107".to_string(),
                        tokens: vec![2, 0],
                        index: 107,
                        is_canonical: false,
                    },
                ],
                tokens: vec![token("USDC", 0, 8), token("PURR", 1, 0), token("HYPE", 2, 2)],
            },
            perp_dexs: vec![
                None,
                Some(PerpDexEntry {
                    name: "abc".to_string(),
                    full_name: None,
                    deployer: None,
                }),
                Some(PerpDexEntry {
                    name: "xyz".to_string(),
                    full_name: None,
                    deployer: None,
                }),
            ],
            dex_meta,
        }
    }

    #[test]
    fn test_perp_ids_are_universe_positions() {
        let table = InstrumentTable::from_snapshot(&sample_snapshot()).unwrap();
        assert_eq!(table.resolve("BTC").unwrap(), AssetId(0));
        assert_eq!(table.resolve("ETH").unwrap(), AssetId(1));
        assert_eq!(table.resolve("DYDX").unwrap(), AssetId(4));
        assert_eq!(table.instrument("ETH").unwrap().sz_decimals, 4);
    }

    #[test]
    fn test_spot_ids_and_aliases() {
        let table = InstrumentTable::from_snapshot(&sample_snapshot()).unwrap();
        assert_eq!(table.resolve("PURR/USDC").unwrap(), AssetId(10_000));
        assert_eq!(table.resolve("@107").unwrap(), AssetId(10_107));
        // synthesized alias for @107
        assert_eq!(table.resolve("HYPE/USDC").unwrap(), AssetId(10_107));

        let hype = table.instrument("HYPE/USDC").unwrap();
        assert_eq!(hype.name, "@107");
        assert_eq!(hype.sz_decimals, 2);
        assert_eq!(hype.kind(), InstrumentKind::Spot);
    }

    #[test]
    fn test_builder_dex_offset_uses_perp_dexs_position() {
        let table = InstrumentTable::from_snapshot(&sample_snapshot()).unwrap();
        // xyz is the second non-default dex
        assert_eq!(table.resolve("xyz:GOLD").unwrap(), AssetId(120_000));
        assert_eq!(table.resolve("xyz:SILVER").unwrap(), AssetId(120_001));
        assert_eq!(
            table.instrument("xyz:SILVER").unwrap().kind(),
            InstrumentKind::BuilderPerp { dex: 1 }
        );
    }

    #[test]
    fn test_unknown_instrument() {
        let table = InstrumentTable::from_snapshot(&sample_snapshot()).unwrap();
        assert!(matches!(
            table.resolve("DOGE"),
            Err(RegistryError::UnknownInstrument(name)) if name == "DOGE"
        ));
    }

    #[test]
    fn test_unknown_dex_rejected() {
        let mut snapshot = sample_snapshot();
        snapshot
            .dex_meta
            .insert("missing".to_string(), PerpMeta::default());
        assert!(matches!(
            InstrumentTable::from_snapshot(&snapshot),
            Err(RegistryError::UnknownDex(name)) if name == "missing"
        ));
    }

    #[test]
    fn test_alias_never_shadows_existing_name() {
        let spot = SpotMeta {
            universe: vec![
                SpotPairMeta {
                    name: "PURR/USDC".to_string(),
                    tokens: vec![1, 0],
                    index: 0,
                    is_canonical: true,
                },
                // would synthesize "PURR/USDC" again
                SpotPairMeta {
                    name: "@5".to_string(),
                    tokens: vec![1, 0],
                    index: 5,
                    is_canonical: false,
                },
            ],
            tokens: vec![token("USDC", 0, 8), token("PURR", 1, 0)],
        };
        let table = InstrumentTableBuilder::new().spot(&spot).unwrap().build();
        assert_eq!(table.resolve("PURR/USDC").unwrap(), AssetId(10_000));
        assert_eq!(table.resolve("@5").unwrap(), AssetId(10_005));
    }

    #[test]
    fn test_perp_replaces_spot_with_same_name() {
        let spot = SpotMeta {
            universe: vec![SpotPairMeta {
                name: "BTC".to_string(),
                tokens: vec![1, 0],
                index: 3,
                is_canonical: false,
            }],
            tokens: vec![token("USDC", 0, 8), token("UBTC", 1, 5)],
        };
        let perps = PerpMeta {
            universe: vec![perp("BTC", 5)],
        };
        let table = InstrumentTableBuilder::new()
            .spot(&spot)
            .unwrap()
            .perps(&perps)
            .unwrap()
            .build();
        assert_eq!(table.resolve("BTC").unwrap(), AssetId(0));
    }

    #[test]
    fn test_bad_token_reference() {
        let spot = SpotMeta {
            universe: vec![SpotPairMeta {
                name: "BAD".to_string(),
                tokens: vec![9, 0],
                index: 1,
                is_canonical: false,
            }],
            tokens: vec![token("USDC", 0, 8)],
        };
        assert!(matches!(
            InstrumentTableBuilder::new().spot(&spot),
            Err(RegistryError::InvalidMetadata(_))
        ));
    }

    #[test]
    fn test_spot_index_out_of_namespace() {
        let spot = SpotMeta {
            universe: vec![SpotPairMeta {
                name: "HUGE".to_string(),
                tokens: vec![0, 0],
                index: 100_000,
                is_canonical: false,
            }],
            tokens: vec![token("USDC", 0, 8)],
        };
        assert!(matches!(
            InstrumentTableBuilder::new().spot(&spot),
            Err(RegistryError::AssetId(_))
        ));
    }

    #[test]
    fn test_len_counts_coins_not_aliases() {
        let table = InstrumentTable::from_snapshot(&sample_snapshot()).unwrap();
        // 2 spot + 5 perps + 2 builder perps
        assert_eq!(table.len(), 9);
    }
}
