//! Tests for expiry-driven eviction and capacity limits.

use std::time::Duration;

use bytes::Bytes;
use chrono::Utc;
use ssibox_backend::{Backend, DeleteStatus};
use ssibox_core::{CacheKey, CacheValue};
use ssibox_moka::MokaBackend;

fn make_key(id: u32) -> CacheKey {
    CacheKey::new("test", format!("http://example.org/{id}"))
}

fn make_value(size: usize, ttl: chrono::Duration) -> CacheValue<Bytes> {
    CacheValue::new(Bytes::from(vec![b'x'; size]), Some(Utc::now() + ttl))
}

#[tokio::test]
async fn test_entry_disappears_after_its_expiry() {
    let backend = MokaBackend::builder().max_entries(100).build();
    let key = make_key(1);

    backend
        .write(&key, make_value(10, chrono::Duration::milliseconds(200)))
        .await
        .unwrap();
    assert!(backend.read(&key).await.unwrap().is_some());

    tokio::time::sleep(Duration::from_millis(400)).await;
    backend.cache().run_pending_tasks().await;

    assert!(backend.read(&key).await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_uses_new_expiry() {
    let backend = MokaBackend::builder().max_entries(100).build();
    let key = make_key(1);

    backend
        .write(&key, make_value(10, chrono::Duration::milliseconds(200)))
        .await
        .unwrap();
    backend
        .write(&key, make_value(10, chrono::Duration::hours(1)))
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(400)).await;
    backend.cache().run_pending_tasks().await;

    assert!(backend.read(&key).await.unwrap().is_some());
}

#[tokio::test]
async fn test_remove_reports_status() {
    let backend = MokaBackend::builder().max_entries(100).build();
    let key = make_key(7);

    assert_eq!(backend.remove(&key).await.unwrap(), DeleteStatus::Missing);
    backend
        .write(&key, make_value(10, chrono::Duration::hours(1)))
        .await
        .unwrap();
    assert_eq!(backend.remove(&key).await.unwrap(), DeleteStatus::Deleted(1));
}

#[tokio::test]
async fn test_max_bytes_evicts_beyond_budget() {
    let key = make_key(1);
    let value = make_value(100, chrono::Duration::hours(1));
    let single_entry_size = key.memory_size() + value.memory_size();

    let backend = MokaBackend::builder()
        .max_bytes((single_entry_size * 3) as u64)
        .build();

    for i in 1..=4 {
        backend
            .write(&make_key(i), make_value(100, chrono::Duration::hours(1)))
            .await
            .unwrap();
    }
    backend.cache().run_pending_tasks().await;

    let mut count = 0;
    for i in 1..=4 {
        if backend.read(&make_key(i)).await.unwrap().is_some() {
            count += 1;
        }
    }
    assert_eq!(count, 3, "Should have exactly 3 entries after eviction");
}

#[tokio::test]
async fn test_clones_share_entries() {
    let backend = MokaBackend::builder().label("includes").max_entries(10).build();
    let other = backend.clone();
    let key = make_key(3);

    backend
        .write(&key, make_value(5, chrono::Duration::hours(1)))
        .await
        .unwrap();

    assert!(other.read(&key).await.unwrap().is_some());
    assert_eq!(other.label().as_str(), "includes");
}
