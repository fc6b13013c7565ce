//! Cache policy types.
//!
//! [`CachePolicy`] is the outcome of interpreting an origin's response
//! headers: whether the fetched content may be shared across invocations and
//! until when. It is computed per response and never persisted; the layered
//! store uses it to pick a tier and the host uses it to bound the lifetime of
//! the enclosing page.

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Whether a response may be stored in the shared tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cacheability {
    /// Headers did not settle the question. Treated as not cacheable.
    #[default]
    Unknown,
    /// Headers explicitly allow caching.
    Cacheable,
    /// Headers explicitly forbid caching (`private`, `no-cache`).
    NotCacheable,
}

/// Cache decision for a single fetched response.
///
/// # Example
///
/// ```
/// use chrono::{Duration, Utc};
/// use ssibox_core::{CachePolicy, Cacheability};
///
/// let now = Utc::now();
/// let policy = CachePolicy::new(Cacheability::Cacheable, Some(now + Duration::seconds(50)));
///
/// assert!(policy.is_shareable(now));
/// assert_eq!(policy.ttl(now).map(|ttl| ttl.as_secs()), Some(50));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CachePolicy {
    /// Cacheability determined from the headers.
    pub cacheable: Cacheability,
    /// Expiry determined from the headers, if any.
    pub expires_at: Option<DateTime<Utc>>,
}

impl CachePolicy {
    /// Creates a new policy.
    pub fn new(cacheable: Cacheability, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            cacheable,
            expires_at,
        }
    }

    /// A policy that forbids sharing.
    pub fn not_cacheable() -> Self {
        Self::new(Cacheability::NotCacheable, None)
    }

    /// Returns `true` only for an explicit [`Cacheability::Cacheable`].
    pub fn is_cacheable(&self) -> bool {
        self.cacheable == Cacheability::Cacheable
    }

    /// Returns `true` when the response may be written to the shared tier at
    /// `now`: it is cacheable and its expiry lies strictly in the future.
    pub fn is_shareable(&self, now: DateTime<Utc>) -> bool {
        self.is_cacheable() && self.expires_at.is_some_and(|expires_at| now < expires_at)
    }

    /// Remaining lifetime at `now`, in whole seconds.
    pub fn ttl(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.expires_at
            .map(|expires_at| (expires_at - now).num_seconds())
            .filter(|secs| *secs > 0)
            .map(|secs| Duration::from_secs(secs as u64))
    }
}
