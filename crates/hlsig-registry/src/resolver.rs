//! Shared, refreshable asset resolver.
//!
//! Readers take an `Arc` snapshot of the current table and never observe a
//! partially built one. A refresh builds a complete table off to the side
//! and swaps it in with a bumped version.

use crate::error::RegistryResult;
use crate::meta::MetadataSnapshot;
use crate::source::{load_snapshot, MetadataSource};
use crate::table::InstrumentTable;
use hlsig_core::{AssetId, Instrument};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Name to asset id resolution over a swappable [`InstrumentTable`].
#[derive(Debug, Default)]
pub struct AssetResolver {
    current: RwLock<Arc<InstrumentTable>>,
}

impl AssetResolver {
    /// Start from a table; it becomes version 1.
    pub fn new(table: InstrumentTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table.with_version(1))),
        }
    }

    pub fn from_snapshot(snapshot: &MetadataSnapshot) -> RegistryResult<Self> {
        Ok(Self::new(InstrumentTable::from_snapshot(snapshot)?))
    }

    /// Fetch metadata and build the initial table.
    pub async fn load(source: &dyn MetadataSource, builder_dexs: &[String]) -> RegistryResult<Self> {
        let snapshot = load_snapshot(source, builder_dexs).await?;
        Self::from_snapshot(&snapshot)
    }

    /// Current table. Cheap; holds no lock after returning.
    pub fn snapshot(&self) -> Arc<InstrumentTable> {
        Arc::clone(&*self.current.read())
    }

    pub fn version(&self) -> u64 {
        self.current.read().version()
    }

    pub fn resolve(&self, name: &str) -> RegistryResult<AssetId> {
        self.snapshot().resolve(name)
    }

    pub fn instrument(&self, name: &str) -> RegistryResult<Instrument> {
        self.snapshot().instrument(name).cloned()
    }

    /// Replace the current table, returning the new version.
    pub fn publish(&self, table: InstrumentTable) -> u64 {
        let mut current = self.current.write();
        let version = current.version() + 1;
        let instruments = table.len();
        *current = Arc::new(table.with_version(version));
        info!(version, instruments, "Published instrument table");
        version
    }

    /// Re-fetch metadata and publish a new table.
    ///
    /// On failure the current table stays in place.
    pub async fn refresh(
        &self,
        source: &dyn MetadataSource,
        builder_dexs: &[String],
    ) -> RegistryResult<u64> {
        let snapshot = load_snapshot(source, builder_dexs).await?;
        let table = InstrumentTable::from_snapshot(&snapshot)?;
        Ok(self.publish(table))
    }
}
