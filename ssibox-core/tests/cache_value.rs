//! Tests for expiry handling on cache values and policies.

use chrono::{Duration, TimeZone, Utc};
use ssibox_core::{CacheKey, CachePolicy, CacheValue, Cacheability};

#[test]
fn test_value_without_expiry_is_never_fresh() {
    let value = CacheValue::new("body", None);
    assert!(!value.is_fresh(Utc::now()));
    assert_eq!(value.ttl(Utc::now()), None);
}

#[test]
fn test_value_expiry_boundary_is_exclusive() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    let value = CacheValue::new("body", Some(now + Duration::seconds(30)));

    assert!(value.is_fresh(now));
    assert!(value.is_fresh(now + Duration::seconds(29)));
    assert!(!value.is_fresh(now + Duration::seconds(30)));
    assert_eq!(value.ttl(now).map(|ttl| ttl.as_secs()), Some(30));
    assert_eq!(value.ttl(now + Duration::seconds(31)), None);
}

#[test]
fn test_unknown_policy_is_not_shareable() {
    let now = Utc::now();
    let policy = CachePolicy::new(Cacheability::Unknown, Some(now + Duration::seconds(60)));
    assert!(!policy.is_cacheable());
    assert!(!policy.is_shareable(now));
}

#[test]
fn test_cacheable_policy_in_the_past_is_not_shareable() {
    let now = Utc::now();
    let policy = CachePolicy::new(Cacheability::Cacheable, Some(now - Duration::seconds(1)));
    assert!(policy.is_cacheable());
    assert!(!policy.is_shareable(now));
    assert_eq!(policy.ttl(now), None);
}

#[test]
fn test_cache_key_equality_ignores_arc_identity() {
    let a = CacheKey::new("ns", "http://example.org/a");
    let b = CacheKey::new("ns", "http://example.org/a");
    let other_ns = CacheKey::new("other", "http://example.org/a");

    assert_eq!(a, b);
    assert_ne!(a, other_ns);
    assert!(a.memory_size() > "http://example.org/a".len());
}
