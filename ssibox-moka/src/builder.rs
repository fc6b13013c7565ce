//! Builder for configuring [`MokaBackend`].

use std::time::{Duration, Instant};

use chrono::Utc;
use moka::Expiry;
use moka::future::{Cache, CacheBuilder};
use moka::policy::EvictionPolicy;
use ssibox_backend::ValueFormat;
use ssibox_core::{BackendLabel, CacheKey, CacheValue, Raw};

use crate::backend::MokaBackend;

/// Expiration policy that derives each entry's lifetime from its
/// [`CacheValue::expire`] timestamp.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Expiration;

impl Expiry<CacheKey, CacheValue<Raw>> for Expiration {
    fn expire_after_create(
        &self,
        _key: &CacheKey,
        value: &CacheValue<Raw>,
        _created_at: Instant,
    ) -> Option<Duration> {
        Self::calculate_ttl(value)
    }

    fn expire_after_update(
        &self,
        _key: &CacheKey,
        value: &CacheValue<Raw>,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        // Always the new value's expiry. Moka's default keeps the old one.
        Self::calculate_ttl(value)
    }
}

impl Expiration {
    fn calculate_ttl(value: &CacheValue<Raw>) -> Option<Duration> {
        value.expire().map(|expiration| {
            let millis = (expiration - Utc::now()).num_milliseconds();
            if millis <= 0 {
                Duration::ZERO
            } else {
                Duration::from_millis(millis as u64)
            }
        })
    }
}

/// Marker type: capacity has not been configured yet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCapacity;

/// Marker type: entry-count capacity has been configured.
#[derive(Debug, Clone, Copy)]
pub struct EntryCapacity(pub(crate) u64);

/// Marker type: byte-based capacity has been configured.
#[derive(Debug, Clone, Copy)]
pub struct ByteCapacity(pub(crate) u64);

/// Builder for creating and configuring a [`MokaBackend`].
///
/// Capacity is required and set with exactly one of
/// [`max_entries`](Self::max_entries) or [`max_bytes`](Self::max_bytes);
/// `build()` only exists once it is set.
///
/// ```
/// use ssibox_backend::ValueFormat;
/// use ssibox_moka::MokaBackend;
///
/// let backend = MokaBackend::builder()
///     .label("includes")
///     .max_bytes(64 * 1024 * 1024)
///     .value_format(ValueFormat::Bincode)
///     .build();
/// ```
pub struct MokaBackendBuilder<Cap> {
    capacity: Cap,
    format: ValueFormat,
    label: BackendLabel,
    eviction_policy: Option<EvictionPolicy>,
}

impl MokaBackendBuilder<NoCapacity> {
    /// Creates a new builder with no capacity configured.
    pub fn new() -> Self {
        Self {
            capacity: NoCapacity,
            format: ValueFormat::default(),
            label: BackendLabel::new_static("moka"),
            eviction_policy: None,
        }
    }

    /// Sets the maximum number of entries the cache can hold.
    pub fn max_entries(self, capacity: u64) -> MokaBackendBuilder<EntryCapacity> {
        self.with_capacity(EntryCapacity(capacity))
    }

    /// Sets the approximate memory budget in bytes, counting keys, bodies
    /// and headers.
    pub fn max_bytes(self, bytes: u64) -> MokaBackendBuilder<ByteCapacity> {
        self.with_capacity(ByteCapacity(bytes))
    }

    fn with_capacity<Cap>(self, capacity: Cap) -> MokaBackendBuilder<Cap> {
        MokaBackendBuilder {
            capacity,
            format: self.format,
            label: self.label,
            eviction_policy: self.eviction_policy,
        }
    }
}

impl Default for MokaBackendBuilder<NoCapacity> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Cap> MokaBackendBuilder<Cap> {
    /// Sets the label used in logs and metrics. Defaults to `"moka"`.
    pub fn label(mut self, label: impl Into<BackendLabel>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the value serialization format. Defaults to JSON.
    pub fn value_format(mut self, format: ValueFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the eviction policy.
    ///
    /// Defaults to TinyLFU for entry-based capacity and LRU for byte-based
    /// capacity, where TinyLFU admission could reject large includes even
    /// when eviction would make room.
    pub fn eviction_policy(mut self, policy: EvictionPolicy) -> Self {
        self.eviction_policy = Some(policy);
        self
    }
}

impl MokaBackendBuilder<EntryCapacity> {
    /// Builds the backend with entry-count capacity.
    pub fn build(self) -> MokaBackend {
        let policy = self
            .eviction_policy
            .unwrap_or_else(EvictionPolicy::tiny_lfu);
        let cache: Cache<CacheKey, CacheValue<Raw>> = CacheBuilder::new(self.capacity.0)
            .eviction_policy(policy)
            .expire_after(Expiration)
            .build();

        MokaBackend {
            cache,
            format: self.format,
            label: self.label,
        }
    }
}

impl MokaBackendBuilder<ByteCapacity> {
    /// Builds the backend with byte-based capacity.
    pub fn build(self) -> MokaBackend {
        let policy = self.eviction_policy.unwrap_or_else(EvictionPolicy::lru);
        let cache: Cache<CacheKey, CacheValue<Raw>> = CacheBuilder::new(self.capacity.0)
            .weigher(Self::byte_weigher)
            .eviction_policy(policy)
            .expire_after(Expiration)
            .build();

        MokaBackend {
            cache,
            format: self.format,
            label: self.label,
        }
    }

    fn byte_weigher(key: &CacheKey, value: &CacheValue<Raw>) -> u32 {
        (key.memory_size() + value.memory_size()).min(u32::MAX as usize) as u32
    }
}
