//! Moka backend implementation.

use async_trait::async_trait;
use moka::future::Cache;
use ssibox_backend::{Backend, BackendResult, DeleteStatus, ValueFormat};
use ssibox_core::{BackendLabel, CacheKey, CacheValue, Raw};

/// In-memory shared tier powered by Moka.
///
/// Entries are evicted when the origin-declared expiry passes, so memory is
/// not held by content nobody may read any more. Readers still check the
/// expiry themselves, eviction is best-effort.
///
/// Cloning is cheap and every clone shares the same cache, so one backend
/// can serve all concurrently running invocations of a process.
///
/// # Caveats
///
/// - Data is **not persisted**, the cache is lost on process restart
/// - Data is **not shared** across processes
#[derive(Clone)]
pub struct MokaBackend {
    pub(crate) cache: Cache<CacheKey, CacheValue<Raw>>,
    pub(crate) format: ValueFormat,
    pub(crate) label: BackendLabel,
}

impl std::fmt::Debug for MokaBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaBackend")
            .field("label", &self.label)
            .field("entries", &self.cache.entry_count())
            .field("format", &self.format)
            .finish()
    }
}

impl MokaBackend {
    /// Creates a new builder. Capacity must be configured before building.
    pub fn builder() -> crate::builder::MokaBackendBuilder<crate::builder::NoCapacity> {
        crate::builder::MokaBackendBuilder::new()
    }

    /// The underlying Moka cache.
    pub fn cache(&self) -> &Cache<CacheKey, CacheValue<Raw>> {
        &self.cache
    }
}

#[async_trait]
impl Backend for MokaBackend {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        Ok(self.cache.get(key).await)
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        self.cache.insert(key.clone(), value).await;
        Ok(())
    }

    async fn remove(&self, key: &CacheKey) -> BackendResult<DeleteStatus> {
        Ok(match self.cache.remove(key).await {
            Some(_) => DeleteStatus::Deleted(1),
            None => DeleteStatus::Missing,
        })
    }

    fn label(&self) -> BackendLabel {
        self.label.clone()
    }

    fn value_format(&self) -> ValueFormat {
        self.format
    }
}
