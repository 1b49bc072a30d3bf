//! Instrument metadata and asset id resolution for hlsig.
//!
//! Loads perp, spot and builder-dex metadata (over HTTP or from a snapshot
//! file), builds an immutable [`InstrumentTable`] and serves lookups through
//! the swappable [`AssetResolver`].

pub mod client;
pub mod error;
pub mod meta;
pub mod resolver;
pub mod source;
pub mod table;

pub use client::MetaClient;
pub use error::{RegistryError, RegistryResult};
pub use meta::{
    MetadataSnapshot, PerpAssetMeta, PerpDexEntry, PerpMeta, SpotMeta, SpotPairMeta,
    SpotTokenMeta,
};
pub use resolver::AssetResolver;
pub use source::{load_snapshot, BoxFuture, MetadataSource, StaticMetadataSource};
pub use table::{InstrumentTable, InstrumentTableBuilder};
