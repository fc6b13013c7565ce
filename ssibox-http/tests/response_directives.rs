//! Tests for the recording host response.

use std::time::Duration;

use http::header::CACHE_CONTROL;
use http::{HeaderMap, HeaderValue};
use ssibox_core::HostResponse;
use ssibox_http::ResponseDirectives;
use ssibox_http::headers::{DEPTH_ERROR_HEADER, DEPTH_LIMIT_MESSAGE, ESI_ENABLED, ESI_HEADER};

#[test]
fn test_unconstrained_page_sets_no_cache_control() {
    let directives = ResponseDirectives::new();
    assert!(directives.is_cacheable());
    assert_eq!(directives.cache_control(), None);

    let mut headers = HeaderMap::new();
    directives.apply(&mut headers);
    assert!(headers.is_empty());
}

#[test]
fn test_uncacheable_wins_over_max_age() {
    let mut directives = ResponseDirectives::new();
    directives.set_page_max_age(Duration::from_secs(60));
    directives.set_page_cacheable(false);
    directives.set_page_cacheable(true);

    assert!(!directives.is_cacheable());
    assert_eq!(
        directives.cache_control().unwrap(),
        "no-cache, must-revalidate"
    );
}

#[test]
fn test_apply_copies_headers_and_cache_control() {
    let mut directives = ResponseDirectives::new();
    directives.insert_header(ESI_HEADER, ESI_ENABLED);
    directives.insert_header(DEPTH_ERROR_HEADER, DEPTH_LIMIT_MESSAGE);
    directives.set_page_max_age(Duration::from_secs(30));

    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("max-age=3600"));
    directives.apply(&mut headers);

    assert_eq!(headers.get(ESI_HEADER).unwrap(), "yes");
    assert_eq!(headers.get(DEPTH_ERROR_HEADER).unwrap(), "Too deep!");
    assert_eq!(headers.get(CACHE_CONTROL).unwrap(), "max-age=30");
}
