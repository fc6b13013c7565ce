//! Cache key types.
//!
//! Fetched content is cached under the absolute URL it was fetched from,
//! scoped within a fixed namespace so that several engines (or several
//! versions of one engine) can share a backend without colliding.
//!
//! ## Format
//!
//! When rendered as a string, keys follow `{prefix}:{url}`. The prefix is
//! omitted if empty.
//!
//! ```
//! use ssibox_core::CacheKey;
//!
//! let key = CacheKey::new("includes", "http://example.org/foo");
//! assert_eq!(key.to_string(), "includes:http://example.org/foo");
//!
//! let key = CacheKey::new("", "http://example.org/foo");
//! assert_eq!(key.to_string(), "http://example.org/foo");
//! ```
//!
//! ## Performance
//!
//! [`CacheKey`] uses `Arc` internally for cheap cloning, copying a key only
//! increments a reference count.

use smol_str::SmolStr;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Inner structure containing the actual cache key data.
/// Wrapped in Arc for cheap cloning.
#[derive(Debug, Eq, PartialEq, Hash)]
struct CacheKeyInner {
    prefix: SmolStr,
    url: String,
}

/// A cache key identifying a cached include.
///
/// # Example
///
/// ```
/// use ssibox_core::CacheKey;
///
/// let key = CacheKey::new("includes", "http://example.org/nav");
/// assert_eq!(key.prefix(), "includes");
/// assert_eq!(key.url(), "http://example.org/nav");
/// ```
#[derive(Clone, Debug)]
pub struct CacheKey {
    inner: Arc<CacheKeyInner>,
}

impl PartialEq for CacheKey {
    fn eq(&self, other: &Self) -> bool {
        // Fast path: same Arc pointer
        Arc::ptr_eq(&self.inner, &other.inner) || self.inner == other.inner
    }
}

impl Eq for CacheKey {}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.inner.hash(state);
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inner.prefix.is_empty() {
            write!(f, "{}", self.inner.url)
        } else {
            write!(f, "{}:{}", self.inner.prefix, self.inner.url)
        }
    }
}

impl CacheKey {
    /// Creates a new cache key for `url` within the `prefix` namespace.
    pub fn new(prefix: impl Into<SmolStr>, url: impl Into<String>) -> Self {
        CacheKey {
            inner: Arc::new(CacheKeyInner {
                prefix: prefix.into(),
                url: url.into(),
            }),
        }
    }

    /// Returns the namespace prefix.
    pub fn prefix(&self) -> &str {
        &self.inner.prefix
    }

    /// Returns the absolute URL this key identifies.
    pub fn url(&self) -> &str {
        &self.inner.url
    }

    /// Returns the estimated memory usage of this key in bytes.
    ///
    /// Used by byte-bounded backends to weigh entries.
    pub fn memory_size(&self) -> usize {
        // SmolStr stores up to 23 bytes inline.
        let prefix_heap = if self.inner.prefix.len() > 23 {
            self.inner.prefix.len()
        } else {
            0
        };
        std::mem::size_of::<Self>()
            + std::mem::size_of::<CacheKeyInner>()
            + prefix_heap
            + self.inner.url.len()
    }
}
