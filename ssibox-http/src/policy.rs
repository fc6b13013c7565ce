//! Cache policy from origin response headers.
//!
//! Only the headers that decide whether an include may be shared and for
//! how long are interpreted:
//!
//! 1. `Cache-Control: max-age=N` makes the response cacheable until
//!    `now + N - Age`, provided that lies in the future.
//! 2. `private` or `no-cache` anywhere in `Cache-Control` forbids caching,
//!    whatever `max-age` said.
//! 3. If `Cache-Control` settled nothing, an `Expires` date makes the
//!    response cacheable until that date.
//! 4. Otherwise the cacheability stays unknown, which callers treat as not
//!    cacheable.
//!
//! ```
//! use chrono::{Duration, Utc};
//! use http::{HeaderMap, HeaderValue};
//! use ssibox_http::cache_policy;
//!
//! let mut headers = HeaderMap::new();
//! headers.insert("cache-control", HeaderValue::from_static("public, max-age=60"));
//! headers.insert("age", HeaderValue::from_static("10"));
//!
//! let now = Utc::now();
//! let policy = cache_policy(&headers, now);
//! assert!(policy.is_cacheable());
//! assert_eq!(policy.expires_at, Some(now + Duration::seconds(50)));
//! ```

use chrono::{DateTime, Duration, Utc};
use http::HeaderMap;
use http::header::{AGE, CACHE_CONTROL, EXPIRES};
use ssibox_core::{CachePolicy, Cacheability};
use tracing::debug;

/// Computes the cache policy of a response received at `now`.
///
/// Header names are matched case-insensitively.
pub fn cache_policy(headers: &HeaderMap, now: DateTime<Utc>) -> CachePolicy {
    let mut policy = CachePolicy::default();

    if let Some(cache_control) = header_str(headers, CACHE_CONTROL.as_str()) {
        let cache_control = cache_control.to_ascii_lowercase();

        if let Some(max_age) = max_age(&cache_control) {
            let age = header_str(headers, AGE.as_str())
                .and_then(|age| age.trim().parse::<i64>().ok())
                .map_or(0, |age| age.clamp(0, MAX_AGE_CAP));
            let expires_at = now + Duration::seconds(max_age) - Duration::seconds(age);
            policy.expires_at = Some(expires_at);
            if expires_at > now {
                policy.cacheable = Cacheability::Cacheable;
            }
        }

        if cache_control.contains("private") || cache_control.contains("no-cache") {
            policy.cacheable = Cacheability::NotCacheable;
        }
    }

    if policy.cacheable == Cacheability::Unknown
        && let Some(expires) = header_str(headers, EXPIRES.as_str())
    {
        match DateTime::parse_from_rfc2822(expires.trim()) {
            Ok(expires_at) => {
                policy.cacheable = Cacheability::Cacheable;
                policy.expires_at = Some(expires_at.with_timezone(&Utc));
            }
            Err(error) => {
                debug!(expires, %error, "ignoring unparsable Expires header");
                policy.cacheable = Cacheability::NotCacheable;
            }
        }
    }

    policy
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}

/// First `max-age=<digits>` in a lower-cased `Cache-Control` value.
fn max_age(cache_control: &str) -> Option<i64> {
    cache_control.match_indices("max-age=").find_map(|(idx, needle)| {
        let rest = &cache_control[idx + needle.len()..];
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        let digits = &rest[..end];
        // Saturate absurdly large values instead of overflowing the timestamp.
        (!digits.is_empty()).then(|| digits.parse::<i64>().unwrap_or(i64::MAX).min(MAX_AGE_CAP))
    })
}

/// Upper bound for `max-age` and `Age`, one hundred years.
const MAX_AGE_CAP: i64 = 100 * 365 * 24 * 60 * 60;
