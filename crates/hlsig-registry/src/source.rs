//! Metadata sources and snapshot loading.

use crate::error::{RegistryError, RegistryResult};
use crate::meta::{MetadataSnapshot, PerpDexEntry, PerpMeta, SpotMeta};
use futures_util::future::try_join_all;
use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use tracing::{debug, info};

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Where instrument metadata comes from.
pub trait MetadataSource: Send + Sync {
    /// `meta` of the default dex (`None`) or a builder dex.
    fn perp_meta<'a>(&'a self, dex: Option<&'a str>) -> BoxFuture<'a, RegistryResult<PerpMeta>>;

    fn spot_meta(&self) -> BoxFuture<'_, RegistryResult<SpotMeta>>;

    /// Raw `perpDexs` list, default dex first as `None`.
    fn perp_dexs(&self) -> BoxFuture<'_, RegistryResult<Vec<Option<PerpDexEntry>>>>;
}

/// Fetch everything needed to build a table.
///
/// `builder_dexs` names the builder dexs whose perps should be resolvable;
/// the `perpDexs` list is only fetched when it is non-empty.
pub async fn load_snapshot(
    source: &dyn MetadataSource,
    builder_dexs: &[String],
) -> RegistryResult<MetadataSnapshot> {
    let meta = source.perp_meta(None).await?;
    let spot_meta = source.spot_meta().await?;

    let mut snapshot = MetadataSnapshot {
        meta,
        spot_meta,
        ..Default::default()
    };

    if !builder_dexs.is_empty() {
        snapshot.perp_dexs = source.perp_dexs().await?;
        for dex in builder_dexs {
            if snapshot.builder_dex_position(dex).is_none() {
                return Err(RegistryError::UnknownDex(dex.clone()));
            }
        }

        let metas = try_join_all(
            builder_dexs
                .iter()
                .map(|dex| source.perp_meta(Some(dex.as_str()))),
        )
        .await?;
        snapshot.dex_meta = builder_dexs.iter().cloned().zip(metas).collect();
    }

    info!(
        perps = snapshot.meta.universe.len(),
        spot_pairs = snapshot.spot_meta.universe.len(),
        builder_dexs = snapshot.dex_meta.len(),
        "Loaded metadata snapshot"
    );
    Ok(snapshot)
}

/// In-memory metadata, typically read from a snapshot file for offline use.
#[derive(Debug, Clone, Default)]
pub struct StaticMetadataSource {
    snapshot: MetadataSnapshot,
}

impl StaticMetadataSource {
    pub fn new(snapshot: MetadataSnapshot) -> Self {
        Self { snapshot }
    }

    /// Load a JSON snapshot file (see [`MetadataSnapshot`]).
    pub fn from_file(path: impl AsRef<Path>) -> RegistryResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let snapshot: MetadataSnapshot = serde_json::from_str(&content)?;
        debug!(path = %path.display(), "Loaded metadata snapshot file");
        Ok(Self::new(snapshot))
    }

    pub fn snapshot(&self) -> &MetadataSnapshot {
        &self.snapshot
    }
}

impl MetadataSource for StaticMetadataSource {
    fn perp_meta<'a>(&'a self, dex: Option<&'a str>) -> BoxFuture<'a, RegistryResult<PerpMeta>> {
        Box::pin(async move {
            match dex {
                None | Some("") => Ok(self.snapshot.meta.clone()),
                Some(name) => self
                    .snapshot
                    .dex_meta
                    .get(name)
                    .cloned()
                    .ok_or_else(|| RegistryError::UnknownDex(name.to_string())),
            }
        })
    }

    fn spot_meta(&self) -> BoxFuture<'_, RegistryResult<SpotMeta>> {
        Box::pin(async move { Ok(self.snapshot.spot_meta.clone()) })
    }

    fn perp_dexs(&self) -> BoxFuture<'_, RegistryResult<Vec<Option<PerpDexEntry>>>> {
        Box::pin(async move { Ok(self.snapshot.perp_dexs.clone()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::tests::sample_snapshot;

    #[tokio::test]
    async fn test_load_snapshot_without_builder_dexs() {
        let source = StaticMetadataSource::new(sample_snapshot());
        let snapshot = load_snapshot(&source, &[]).await.unwrap();
        assert_eq!(snapshot.meta.universe.len(), 5);
        assert!(snapshot.perp_dexs.is_empty());
        assert!(snapshot.dex_meta.is_empty());
    }

    #[tokio::test]
    async fn test_load_snapshot_with_builder_dex() {
        let source = StaticMetadataSource::new(sample_snapshot());
        let snapshot = load_snapshot(&source, &["xyz".to_string()]).await.unwrap();
        assert_eq!(snapshot.dex_meta["xyz"].universe[1].name, "xyz:SILVER");
        assert_eq!(snapshot.builder_dex_position("xyz"), Some(1));
    }

    #[tokio::test]
    async fn test_load_snapshot_unknown_dex() {
        let source = StaticMetadataSource::new(sample_snapshot());
        let result = load_snapshot(&source, &["nope".to_string()]).await;
        assert!(matches!(result, Err(RegistryError::UnknownDex(name)) if name == "nope"));
    }

    #[test]
    fn test_from_file_round_trip() {
        let path = std::env::temp_dir().join(format!(
            "hlsig-registry-snapshot-{}.json",
            std::process::id()
        ));
        let snapshot = sample_snapshot();
        std::fs::write(&path, serde_json::to_string_pretty(&snapshot).unwrap()).unwrap();

        let source = StaticMetadataSource::from_file(&path).unwrap();
        assert_eq!(source.snapshot(), &snapshot);

        std::fs::remove_file(&path).ok();
    }
}
