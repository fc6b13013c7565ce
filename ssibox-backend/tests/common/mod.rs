//! Shared helpers for backend tests.
#![allow(dead_code)]

mod test_backend;

pub use test_backend::TestBackend;

use std::time::Duration;

use http::{HeaderName, HeaderValue};
use ssibox_core::HostResponse;

/// Host double that records every instruction it receives.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub cacheable: Vec<bool>,
    pub max_ages: Vec<Duration>,
    pub headers: Vec<(HeaderName, HeaderValue)>,
}

impl HostResponse for RecordingHost {
    fn set_page_cacheable(&mut self, cacheable: bool) {
        self.cacheable.push(cacheable);
    }

    fn set_page_max_age(&mut self, max_age: Duration) {
        self.max_ages.push(max_age);
    }

    fn insert_header(&mut self, name: HeaderName, value: HeaderValue) {
        self.headers.push((name, value));
    }
}
