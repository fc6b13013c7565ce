//! Simple in-memory test backend implementation using DashMap.

use async_trait::async_trait;
use dashmap::DashMap;
use ssibox_backend::{Backend, BackendError, BackendResult, DeleteStatus, ValueFormat};
use ssibox_core::{BackendLabel, CacheKey, CacheValue, Raw};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory backend for testing.
///
/// Cloning shares the underlying store. Expired entries are kept, so tests
/// can check that freshness is enforced by the reader.
#[derive(Clone, Default)]
pub struct TestBackend {
    store: Arc<DashMap<CacheKey, CacheValue<Raw>>>,
    failing: Arc<AtomicBool>,
    format: ValueFormat,
}

impl TestBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(format: ValueFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Makes every subsequent operation fail.
    pub fn fail(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn has(&self, key: &CacheKey) -> bool {
        self.store.contains_key(key)
    }

    pub fn get_raw(&self, key: &CacheKey) -> Option<CacheValue<Raw>> {
        self.store.get(key).map(|v| v.clone())
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    fn check(&self) -> BackendResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            Err(BackendError::ConnectionError(Box::new(
                std::io::Error::other("backend unavailable"),
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Backend for TestBackend {
    async fn read(&self, key: &CacheKey) -> BackendResult<Option<CacheValue<Raw>>> {
        self.check()?;
        Ok(self.store.get(key).map(|v| v.clone()))
    }

    async fn write(&self, key: &CacheKey, value: CacheValue<Raw>) -> BackendResult<()> {
        self.check()?;
        self.store.insert(key.clone(), value);
        Ok(())
    }

    async fn remove(&self, key: &CacheKey) -> BackendResult<DeleteStatus> {
        self.check()?;
        Ok(match self.store.remove(key) {
            Some(_) => DeleteStatus::Deleted(1),
            None => DeleteStatus::Missing,
        })
    }

    fn label(&self) -> BackendLabel {
        BackendLabel::new_static("test")
    }

    fn value_format(&self) -> ValueFormat {
        self.format
    }
}
