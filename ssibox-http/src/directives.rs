use std::time::Duration;

use http::header::CACHE_CONTROL;
use http::{HeaderMap, HeaderName, HeaderValue};
use ssibox_core::HostResponse;

/// Records what the engine asks of the enclosing page.
///
/// A fresh value describes a page with no constraints: cacheable, no
/// lifetime bound, no extra headers. Each include can only tighten that.
///
/// ```
/// use std::time::Duration;
/// use ssibox_core::HostResponse;
/// use ssibox_http::ResponseDirectives;
///
/// let mut directives = ResponseDirectives::new();
/// directives.set_page_max_age(Duration::from_secs(300));
/// directives.set_page_max_age(Duration::from_secs(50));
/// directives.set_page_max_age(Duration::from_secs(120));
///
/// assert_eq!(directives.max_age(), Some(Duration::from_secs(50)));
/// assert_eq!(directives.cache_control().unwrap(), "max-age=50");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseDirectives {
    uncacheable: bool,
    max_age: Option<Duration>,
    headers: HeaderMap,
}

impl ResponseDirectives {
    /// Directives of an unconstrained page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the page may still be cached.
    pub fn is_cacheable(&self) -> bool {
        !self.uncacheable
    }

    /// Shortest lifetime requested so far.
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }

    /// Headers the engine set.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// `Cache-Control` value reflecting the recorded constraints, or `None`
    /// if the page is unconstrained.
    pub fn cache_control(&self) -> Option<HeaderValue> {
        if self.uncacheable {
            Some(HeaderValue::from_static("no-cache, must-revalidate"))
        } else {
            self.max_age.and_then(|max_age| {
                HeaderValue::try_from(format!("max-age={}", max_age.as_secs())).ok()
            })
        }
    }

    /// Copies the recorded headers, and the `Cache-Control` value if any,
    /// onto an outbound response.
    pub fn apply(&self, headers: &mut HeaderMap) {
        for (name, value) in &self.headers {
            headers.insert(name.clone(), value.clone());
        }
        if let Some(cache_control) = self.cache_control() {
            headers.insert(CACHE_CONTROL, cache_control);
        }
    }
}

impl HostResponse for ResponseDirectives {
    fn set_page_cacheable(&mut self, cacheable: bool) {
        // Once uncacheable, always uncacheable.
        self.uncacheable |= !cacheable;
    }

    fn set_page_max_age(&mut self, max_age: Duration) {
        self.max_age = Some(match self.max_age {
            Some(current) => current.min(max_age),
            None => max_age,
        });
    }

    fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.insert(name, value);
    }
}
