//! Cached value type with expiration metadata.
//!
//! [`CacheValue`] wraps cached data with an optional expiry timestamp. Entries
//! of the shared tier always carry one, since they are only written when the
//! origin declared how long its content stays fresh.
//!
//! ```
//! use ssibox_core::CacheValue;
//! use chrono::{Duration, Utc};
//!
//! let now = Utc::now();
//! let value = CacheValue::new("cached data", Some(now + Duration::minutes(5)));
//!
//! assert!(value.is_fresh(now));
//! assert!(!value.is_fresh(now + Duration::minutes(6)));
//! ```

use chrono::{DateTime, Utc};
use std::mem::size_of;
use std::time::Duration;

use crate::Raw;

/// A cached value with expiration metadata.
///
/// # Type Parameter
///
/// * `T` - The cached data type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheValue<T> {
    data: T,
    expire: Option<DateTime<Utc>>,
}

impl<T> CacheValue<T> {
    /// Creates a new cache value with the given data and expiry.
    pub fn new(data: T, expire: Option<DateTime<Utc>>) -> Self {
        CacheValue { data, expire }
    }

    /// Returns a reference to the cached data.
    #[inline]
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Returns when the data expires.
    #[inline]
    pub fn expire(&self) -> Option<DateTime<Utc>> {
        self.expire
    }

    /// Consumes the cache value and returns the inner data.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Returns `true` while `now` is strictly before the expiry.
    ///
    /// A value without an expiry is never fresh: the shared tier has no
    /// notion of "cached forever".
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expire.is_some_and(|expire| now < expire)
    }

    /// Time left until expiry, measured from `now`.
    ///
    /// Returns `None` if there's no expire time or it's already expired.
    pub fn ttl(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.expire
            .and_then(|expire| expire.signed_duration_since(now).to_std().ok())
            .filter(|ttl| !ttl.is_zero())
    }
}

impl CacheValue<Raw> {
    /// Returns the estimated memory usage of this cache value in bytes.
    pub fn memory_size(&self) -> usize {
        size_of::<Self>() + self.data.len()
    }
}
