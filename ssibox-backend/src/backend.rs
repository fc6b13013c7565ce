use std::sync::Arc;

use async_trait::async_trait;
use ssibox_core::{BackendLabel, CacheKey, CacheValue, Raw};

use crate::{BackendError, format::ValueFormat};

/// Result alias for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

/// Status of a remove operation.
#[derive(Debug, PartialEq, Eq)]
pub enum DeleteStatus {
    /// Record successfully deleted.
    Deleted(u32),
    /// Record already missing.
    Missing,
}

/// Shared-tier storage.
///
/// Backends store serialized values together with their expiry. Writes must
/// be atomic per key: a concurrent reader sees either no entry, the previous
/// entry or the new one, never a partial value.
#[async_trait]
pub trait Backend: Sync + Send {
    /// Reads the raw value stored under `key`.
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()>;

    /// Removes the value stored under `key`.
    async fn remove(&self, key: &CacheKey) -> BackendResult<DeleteStatus>;

    /// Label used in logs and metrics.
    fn label(&self) -> BackendLabel {
        BackendLabel::new_static("backend")
    }

    /// Format values are serialized with before they reach [`write`](Self::write).
    fn value_format(&self) -> ValueFormat {
        ValueFormat::Json
    }
}

#[async_trait]
impl Backend for Box<dyn Backend> {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        (**self).write(key, value).await
    }

    async fn remove(&self, key: &CacheKey) -> BackendResult<DeleteStatus> {
        (**self).remove(key).await
    }

    fn label(&self) -> BackendLabel {
        (**self).label()
    }

    fn value_format(&self) -> ValueFormat {
        (**self).value_format()
    }
}

#[async_trait]
impl<B> Backend for Arc<B>
where
    B: Backend + ?Sized,
{
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        (**self).read(key).await
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        (**self).write(key, value).await
    }

    async fn remove(&self, key: &CacheKey) -> BackendResult<DeleteStatus> {
        (**self).remove(key).await
    }

    fn label(&self) -> BackendLabel {
        (**self).label()
    }

    fn value_format(&self) -> ValueFormat {
        (**self).value_format()
    }
}
