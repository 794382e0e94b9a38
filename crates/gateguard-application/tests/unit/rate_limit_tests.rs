//! Unit tests for sliding-window rate limiting

use crate::support::{FailingStore, StubStore};
use gateguard_application::domain_services::{RateLimitPolicy, RateLimiter};
use std::sync::Arc;
use std::time::Duration;

fn policy(limit: u64, window: Duration, fail_open: bool) -> RateLimitPolicy {
    RateLimitPolicy {
        limit,
        window,
        fail_open,
        store_timeout: Duration::from_millis(250),
    }
}

#[tokio::test]
async fn test_exactly_limit_calls_admitted_then_rejected() {
    let limiter = RateLimiter::new(
        Arc::new(StubStore::new()),
        policy(5, Duration::from_secs(60), true),
    );

    for expected_remaining in (0..5).rev() {
        let admission = limiter.admit("alice").await.unwrap();
        assert!(admission.allowed);
        assert_eq!(admission.remaining, expected_remaining);
    }

    let sixth = limiter.admit("alice").await.unwrap();
    assert!(!sixth.allowed);
    assert_eq!(sixth.remaining, 0);
    assert!(sixth.retry_after_secs.unwrap() >= 1);
}

#[tokio::test]
async fn test_window_slides_and_readmits() {
    let limiter = RateLimiter::new(
        Arc::new(StubStore::new()),
        policy(2, Duration::from_millis(400), true),
    );

    assert!(limiter.admit("bob").await.unwrap().allowed);
    assert!(limiter.admit("bob").await.unwrap().allowed);
    assert!(!limiter.admit("bob").await.unwrap().allowed);

    // Wait past the window measured from the first call.
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(limiter.admit("bob").await.unwrap().allowed);
}

#[tokio::test]
async fn test_identities_do_not_share_windows() {
    let limiter = RateLimiter::new(
        Arc::new(StubStore::new()),
        policy(1, Duration::from_secs(60), true),
    );

    assert!(limiter.admit("alice").await.unwrap().allowed);
    assert!(!limiter.admit("alice").await.unwrap().allowed);
    assert!(limiter.admit("bob").await.unwrap().allowed);
}

#[tokio::test]
async fn test_rejection_does_not_consume_a_slot() {
    let limiter = RateLimiter::new(
        Arc::new(StubStore::new()),
        policy(3, Duration::from_secs(60), true),
    );

    for _ in 0..3 {
        assert!(limiter.admit("carol").await.unwrap().allowed);
    }
    // Rejected attempts append nothing, so the live count stays at the limit.
    for _ in 0..4 {
        assert!(!limiter.admit("carol").await.unwrap().allowed);
    }
    assert_eq!(limiter.remaining("carol").await, 0);
}

#[tokio::test]
async fn test_remaining_reflects_consumption() {
    let limiter = RateLimiter::new(
        Arc::new(StubStore::new()),
        policy(5, Duration::from_secs(60), true),
    );

    assert_eq!(limiter.remaining("dave").await, 5);
    limiter.admit("dave").await.unwrap();
    limiter.admit("dave").await.unwrap();
    assert_eq!(limiter.remaining("dave").await, 3);
}

#[tokio::test]
async fn test_fail_open_admits_on_store_failure() {
    let limiter = RateLimiter::new(
        Arc::new(FailingStore),
        policy(5, Duration::from_secs(60), true),
    );

    let admission = limiter.admit("alice").await.unwrap();
    assert!(admission.allowed);
    assert_eq!(admission.remaining, 5);
}

#[tokio::test]
async fn test_fail_closed_denies_on_store_failure() {
    let limiter = RateLimiter::new(
        Arc::new(FailingStore),
        policy(5, Duration::from_secs(60), false),
    );

    let error = limiter.admit("alice").await.unwrap_err();
    assert_eq!(error.kind(), "store_unavailable");
}

#[tokio::test]
async fn test_concurrent_admits_never_overshoot() {
    let limiter = Arc::new(RateLimiter::new(
        Arc::new(StubStore::new()),
        policy(5, Duration::from_secs(60), true),
    ));

    let mut handles = Vec::new();
    for _ in 0..20 {
        let limiter = Arc::clone(&limiter);
        handles.push(tokio::spawn(
            async move { limiter.admit("swarm").await.unwrap() },
        ));
    }

    let mut admitted = 0;
    for handle in handles {
        if handle.await.unwrap().allowed {
            admitted += 1;
        }
    }
    assert_eq!(admitted, 5);
}
