//! The fetch seam.
//!
//! [`Fetcher`] plays the role an upstream service plays in a caching proxy:
//! it is called on a cache miss, and its result is what gets cached. The
//! `ssibox-reqwest` crate provides the HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use http::HeaderMap;

use crate::Depth;

/// Outcome of fetching one include.
///
/// An absent body means the fetch failed (transport error, timeout or a
/// non-success status). Failures carry no headers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchResult {
    /// Response body, `None` on failure.
    pub body: Option<Bytes>,
    /// Response headers.
    pub headers: HeaderMap,
}

impl FetchResult {
    /// A successful fetch.
    pub fn success(body: impl Into<Bytes>, headers: HeaderMap) -> Self {
        Self {
            body: Some(body.into()),
            headers,
        }
    }

    /// A failed fetch.
    pub fn failure() -> Self {
        Self::default()
    }

    /// Returns `true` if a body was received.
    pub fn succeeded(&self) -> bool {
        self.body.is_some()
    }

    /// The body as text, lossily decoded. Empty for failed fetches.
    pub fn text(&self) -> String {
        self.body
            .as_deref()
            .map(|body| String::from_utf8_lossy(body).into_owned())
            .unwrap_or_default()
    }
}

/// Per-fetch options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchOptions {
    /// Depth to announce to the origin.
    pub depth: Depth,
    /// Overrides the fetcher's default timeout.
    pub timeout: Option<Duration>,
}

impl FetchOptions {
    /// Options for a fetch issued at `depth`.
    pub fn new(depth: Depth) -> Self {
        Self {
            depth,
            timeout: None,
        }
    }

    /// Overrides the timeout for this fetch.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Something that can retrieve the content behind an absolute URL.
///
/// Implementations never fail: every error is folded into
/// [`FetchResult::failure`].
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url`, announcing `options.depth` to the origin.
    async fn fetch(&self, url: &str, options: FetchOptions) -> FetchResult;
}

#[async_trait]
impl<F> Fetcher for std::sync::Arc<F>
where
    F: Fetcher + ?Sized,
{
    async fn fetch(&self, url: &str, options: FetchOptions) -> FetchResult {
        (**self).fetch(url, options).await
    }
}
