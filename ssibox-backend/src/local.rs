//! Request-local tier.

use std::collections::HashMap;

use ssibox_core::{CacheKey, FetchResult};

/// Memo of fetch results scoped to one rendering.
///
/// Entries have no expiry: they are valid for exactly as long as the value
/// lives, and the value is dropped together with the invocation that owns it.
/// Failed fetches are remembered too.
#[derive(Debug, Default)]
pub struct LocalBackend {
    entries: HashMap<CacheKey, FetchResult>,
}

impl LocalBackend {
    /// Creates an empty memo.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the result remembered for `key`.
    pub fn get(&self, key: &CacheKey) -> Option<&FetchResult> {
        self.entries.get(key)
    }

    /// Remembers `result` for `key`.
    pub fn insert(&mut self, key: CacheKey, result: FetchResult) {
        self.entries.insert(key, result);
    }

    /// Number of remembered URLs.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been remembered yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
