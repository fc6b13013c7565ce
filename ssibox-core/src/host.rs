//! The host seam.
//!
//! Resolving includes has consequences for the page that contains them: a
//! page that embeds uncacheable content must not be cached, a page that
//! embeds content fresh for 50 seconds must not be cached for longer, and
//! the edge layer must be told when a page needs post-processing. The engine
//! reports all of this through [`HostResponse`] instead of touching any
//! global state.

use std::time::Duration;

use http::{HeaderName, HeaderValue};

/// Outbound response of the page being rendered.
pub trait HostResponse {
    /// Allows or forbids caching of the enclosing page.
    fn set_page_cacheable(&mut self, cacheable: bool);

    /// Bounds the lifetime of the enclosing page.
    ///
    /// Implementations keep the shorter of the current and the requested
    /// lifetime, so calling this for every include leaves the page bounded
    /// by its shortest-lived include.
    fn set_page_max_age(&mut self, max_age: Duration);

    /// Sets a header on the outbound response, replacing any previous value.
    fn insert_header(&mut self, name: HeaderName, value: HeaderValue);
}

impl<H> HostResponse for &mut H
where
    H: HostResponse + ?Sized,
{
    fn set_page_cacheable(&mut self, cacheable: bool) {
        (**self).set_page_cacheable(cacheable)
    }

    fn set_page_max_age(&mut self, max_age: Duration) {
        (**self).set_page_max_age(max_age)
    }

    fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        (**self).insert_header(name, value)
    }
}
