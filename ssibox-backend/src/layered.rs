//! Two-tier lookup and write policy.
//!
//! ## Lookup
//!
//! 1. Request-local tier: any remembered result is returned, whatever its
//!    age, failures included. The enclosing page is marked uncacheable.
//! 2. Shared tier: returned while `now < expire`. The enclosing page's
//!    lifetime is bounded by the entry's remaining lifetime.
//! 3. Miss.
//!
//! ## Write
//!
//! | Fetch result | Policy | Tier | Host instruction |
//! |--------------|--------|------|------------------|
//! | success | cacheable, expiry in the future | shared | `set_page_max_age(expiry - now)` |
//! | success | anything else | local | `set_page_cacheable(false)` |
//! | failure | ignored | local | `set_page_cacheable(false)` |
//!
//! Shared-tier errors are logged and degrade to the local tier; they never
//! surface to the caller.

use std::time::Duration;

use chrono::{DateTime, Utc};
use ssibox_core::{CacheKey, CachePolicy, CacheValue, FetchResult, HostResponse};
use tracing::{debug, warn};

use crate::{Backend, CachedResponse, LocalBackend};

/// Tier a lookup was answered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Request-local tier.
    Local,
    /// Shared tier.
    Shared,
}

impl Tier {
    /// Short name used in logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Local => "local",
            Tier::Shared => "shared",
        }
    }
}

/// A cache hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    /// The remembered fetch result.
    pub result: FetchResult,
    /// Where it was found.
    pub tier: Tier,
}

/// Where a fetch result ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Written to the shared tier, fresh for `ttl`.
    Shared {
        /// Remaining lifetime at write time, in whole seconds.
        ttl: Duration,
    },
    /// Remembered for the current invocation only.
    Local,
}

/// View over both tiers for the duration of one invocation.
pub struct LayeredStore<'a, S: ?Sized> {
    local: &'a mut LocalBackend,
    shared: &'a S,
}

impl<'a, S> LayeredStore<'a, S>
where
    S: Backend + ?Sized,
{
    /// Combines an invocation's local tier with the shared tier.
    pub fn new(local: &'a mut LocalBackend, shared: &'a S) -> Self {
        Self { local, shared }
    }

    /// Looks `key` up, local tier first.
    pub async fn lookup<H>(
        &mut self,
        key: &CacheKey,
        now: DateTime<Utc>,
        host: &mut H,
    ) -> Option<Lookup>
    where
        H: HostResponse + ?Sized,
    {
        if let Some(result) = self.local.get(key) {
            debug!(%key, succeeded = result.succeeded(), "request-local hit");
            host.set_page_cacheable(false);
            return Some(Lookup {
                result: result.clone(),
                tier: Tier::Local,
            });
        }

        let value = match self.shared.read(key).await {
            Ok(Some(value)) if value.is_fresh(now) => value,
            Ok(_) => return None,
            Err(error) => {
                warn!(%key, backend = %self.shared.label(), ?error, "shared tier read failed");
                return None;
            }
        };

        let cached = match self
            .shared
            .value_format()
            .deserialize::<CachedResponse>(value.data())
        {
            Ok(cached) => cached,
            Err(error) => {
                warn!(%key, backend = %self.shared.label(), ?error, "shared tier value is unreadable");
                return None;
            }
        };

        debug!(%key, expire = ?value.expire(), "shared hit");
        if let Some(ttl) = value.ttl(now) {
            host.set_page_max_age(ttl);
        }
        Some(Lookup {
            result: cached.into_fetch(),
            tier: Tier::Shared,
        })
    }

    /// Stores a freshly fetched result according to `policy`.
    pub async fn store<H>(
        &mut self,
        key: CacheKey,
        result: FetchResult,
        policy: &CachePolicy,
        now: DateTime<Utc>,
        host: &mut H,
    ) -> Placement
    where
        H: HostResponse + ?Sized,
    {
        if policy.is_shareable(now)
            && let Some(cached) = CachedResponse::from_fetch(&result)
        {
            match self.write_shared(&key, &cached, policy.expires_at).await {
                Ok(()) => {
                    let ttl = policy.ttl(now).unwrap_or_default();
                    debug!(%key, ttl = ttl.as_secs(), "stored in shared tier");
                    host.set_page_max_age(ttl);
                    return Placement::Shared { ttl };
                }
                Err(error) => {
                    warn!(%key, backend = %self.shared.label(), ?error, "shared tier write failed");
                }
            }
        }

        debug!(%key, succeeded = result.succeeded(), "stored in request-local tier");
        self.local.insert(key, result);
        host.set_page_cacheable(false);
        Placement::Local
    }

    async fn write_shared(
        &self,
        key: &CacheKey,
        cached: &CachedResponse,
        expire: Option<DateTime<Utc>>,
    ) -> crate::BackendResult<()> {
        let raw = self.shared.value_format().serialize(cached)?;
        self.shared.write(key, CacheValue::new(raw, expire)).await
    }
}
