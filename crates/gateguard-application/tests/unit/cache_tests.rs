//! Unit tests for the shared TTL cache

use crate::support::{FailingStore, StubStore};
use gateguard_application::domain_services::SharedCache;
use gateguard_domain::value_objects::Fingerprint;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

const STORE_TIMEOUT: Duration = Duration::from_millis(250);

fn cache() -> SharedCache {
    SharedCache::new(Arc::new(StubStore::new()), STORE_TIMEOUT, true)
}

#[tokio::test]
async fn test_get_after_put_returns_value_unchanged() {
    let cache = cache();
    let fp = Fingerprint::compute("search", &json!({"q": "errors"}));
    let value = json!({"rows": [1, 2, 3], "truncated": false});

    cache.put(&fp, &value, Duration::from_secs(10)).await;
    let fetched: Value = cache.get(&fp).await.unwrap();
    assert_eq!(fetched, value);
}

#[tokio::test]
async fn test_expired_entries_are_absent() {
    let cache = cache();
    let fp = Fingerprint::compute("health", &json!({"service": "checkout"}));

    cache
        .put(&fp, &json!({"score": 98}), Duration::from_millis(150))
        .await;
    assert!(cache.get::<Value>(&fp).await.is_some());

    tokio::time::sleep(Duration::from_millis(250)).await;
    assert!(cache.get::<Value>(&fp).await.is_none());
}

#[tokio::test]
async fn test_distinct_fingerprints_do_not_collide() {
    let cache = cache();
    let a = Fingerprint::compute("search", &json!({"q": "a"}));
    let b = Fingerprint::compute("search", &json!({"q": "b"}));

    cache.put(&a, &json!("alpha"), Duration::from_secs(10)).await;
    assert!(cache.get::<Value>(&b).await.is_none());
}

#[tokio::test]
async fn test_store_failure_degrades_to_miss() {
    let cache = SharedCache::new(Arc::new(FailingStore), STORE_TIMEOUT, true);
    let fp = Fingerprint::compute("search", &json!({"q": "errors"}));

    // Writes are swallowed, reads come back as misses, nothing errors.
    cache.put(&fp, &json!("ignored"), Duration::from_secs(10)).await;
    assert!(cache.get::<Value>(&fp).await.is_none());
}

#[tokio::test]
async fn test_disabled_cache_never_hits() {
    let cache = SharedCache::new(Arc::new(StubStore::new()), STORE_TIMEOUT, false);
    let fp = Fingerprint::compute("search", &json!({"q": "errors"}));

    cache.put(&fp, &json!("value"), Duration::from_secs(10)).await;
    assert!(cache.get::<Value>(&fp).await.is_none());
}

#[tokio::test]
async fn test_invalidate_exact_entry() {
    let cache = cache();
    let fp = Fingerprint::compute("search", &json!({"q": "errors"}));

    cache.put(&fp, &json!("value"), Duration::from_secs(10)).await;
    assert!(cache.invalidate(&fp).await.unwrap());
    assert!(cache.get::<Value>(&fp).await.is_none());
}

#[tokio::test]
async fn test_invalidate_operation_clears_only_that_operation() {
    let cache = cache();
    let search = Fingerprint::compute("search", &json!({"q": "errors"}));
    let health = Fingerprint::compute("health", &json!({}));

    cache.put(&search, &json!(1), Duration::from_secs(10)).await;
    cache.put(&health, &json!(2), Duration::from_secs(10)).await;

    let removed = cache.invalidate_operation("search").await.unwrap();
    assert_eq!(removed, 1);
    assert!(cache.get::<Value>(&search).await.is_none());
    assert!(cache.get::<Value>(&health).await.is_some());
}

#[tokio::test]
async fn test_stats_track_hits_and_misses() {
    let cache = cache();
    let fp = Fingerprint::compute("search", &json!({"q": "errors"}));

    assert!(cache.get::<Value>(&fp).await.is_none());
    cache.put(&fp, &json!("value"), Duration::from_secs(10)).await;
    assert!(cache.get::<Value>(&fp).await.is_some());

    let stats = cache.stats().await;
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
    assert!((stats.hit_rate - 0.5).abs() < f64::EPSILON);
    assert_eq!(stats.entries, 1);
}
