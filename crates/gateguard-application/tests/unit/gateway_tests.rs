//! Unit tests for the gateway middleware pipeline

use crate::support::{
    default_roles, EchoExecutor, FailingExecutor, FailingStore, StaticTokenAuthority, StubStore,
};
use gateguard_application::domain_services::{
    InputValidator, RateLimitPolicy, RateLimiter, RoleTable, SharedCache,
};
use gateguard_application::use_cases::{CacheTtls, GatewayService, OperationTable};
use gateguard_domain::ports::{OperationExecutor, StoreProvider};
use gateguard_domain::value_objects::{CacheClass, InboundCall, OperationSpec, Permission};
use serde_json::{json, Value};
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

const STORE_TIMEOUT: Duration = Duration::from_millis(250);

fn operations() -> OperationTable {
    let mut table = OperationTable::new();
    table.declare(
        "search_events",
        OperationSpec::new(Permission::parse("read:search").unwrap(), CacheClass::Query),
    );
    table.declare(
        "get_service_health",
        OperationSpec::new(Permission::parse("read:itsi").unwrap(), CacheClass::Status),
    );
    table.declare(
        "delete_service",
        OperationSpec::new(
            Permission::parse("delete:itsi").unwrap(),
            CacheClass::Uncached,
        ),
    );
    table
}

fn authority() -> Arc<StaticTokenAuthority> {
    Arc::new(
        StaticTokenAuthority::new()
            .with_token("admin-token", "alice", &["admin"])
            .with_token("readonly-token", "bob", &["readonly"]),
    )
}

fn service_with(
    store: Arc<dyn StoreProvider>,
    executor: Arc<dyn OperationExecutor>,
    limit: u64,
    fail_open: bool,
) -> GatewayService {
    GatewayService::new(
        authority(),
        RoleTable::from_grants(&default_roles()).unwrap(),
        RateLimiter::new(
            Arc::clone(&store),
            RateLimitPolicy {
                limit,
                window: Duration::from_secs(60),
                fail_open,
                store_timeout: STORE_TIMEOUT,
            },
        ),
        SharedCache::new(store, STORE_TIMEOUT, true),
        executor,
        operations(),
        InputValidator::default(),
        CacheTtls {
            status: Duration::from_secs(30),
            query: Duration::from_secs(300),
        },
    )
}

fn service() -> GatewayService {
    service_with(
        Arc::new(StubStore::new()),
        Arc::new(EchoExecutor::default()),
        100,
        true,
    )
}

#[tokio::test]
async fn test_admin_runs_operation() {
    let gateway = service();
    let result = gateway
        .authorize_and_run(
            Some("admin-token"),
            "search_events",
            &json!({"q": "errors"}),
        )
        .await
        .unwrap();
    assert_eq!(result["operation"], "search_events");
}

#[tokio::test]
async fn test_bearer_prefix_is_stripped() {
    let gateway = service();
    assert!(gateway
        .authorize_and_run(
            Some("Bearer admin-token"),
            "search_events",
            &json!({"q": "errors"}),
        )
        .await
        .is_ok());
}

#[tokio::test]
async fn test_missing_credential_is_unauthenticated() {
    let gateway = service();
    let error = gateway
        .authorize_and_run(None, "search_events", &json!({}))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), "unauthenticated");
}

#[tokio::test]
async fn test_expired_and_tampered_tokens_map_to_the_same_kind() {
    let gateway = service();
    let expired = gateway
        .authorize_and_run(Some("expired-token"), "search_events", &json!({}))
        .await
        .unwrap_err();
    let tampered = gateway
        .authorize_and_run(Some("garbage-token"), "search_events", &json!({}))
        .await
        .unwrap_err();
    assert_eq!(expired.kind(), "unauthenticated");
    assert_eq!(expired.kind(), tampered.kind());
}

#[tokio::test]
async fn test_readonly_role_is_forbidden_beyond_its_grants() {
    let gateway = service();

    // readonly owns read:itsi and read:search
    assert!(gateway
        .authorize_and_run(Some("readonly-token"), "get_service_health", &json!({}))
        .await
        .is_ok());

    let error = gateway
        .authorize_and_run(Some("readonly-token"), "delete_service", &json!({}))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), "forbidden");
}

#[tokio::test]
async fn test_unknown_operation_is_not_found() {
    let gateway = service();
    let error = gateway
        .authorize_and_run(Some("admin-token"), "mystery_operation", &json!({}))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), "not_found");
}

#[tokio::test]
async fn test_rejections_never_reach_the_collaborator() {
    let executor = Arc::new(EchoExecutor::default());
    let gateway = service_with(
        Arc::new(StubStore::new()),
        Arc::clone(&executor) as Arc<dyn OperationExecutor>,
        100,
        true,
    );

    let _ = gateway
        .authorize_and_run(None, "search_events", &json!({}))
        .await;
    let _ = gateway
        .authorize_and_run(Some("readonly-token"), "delete_service", &json!({}))
        .await;

    assert_eq!(executor.invocations.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_rate_limit_rejection_carries_retry_after() {
    let gateway = service_with(
        Arc::new(StubStore::new()),
        Arc::new(EchoExecutor::default()),
        2,
        true,
    );

    for _ in 0..2 {
        gateway
            .authorize_and_run(Some("admin-token"), "delete_service", &json!({}))
            .await
            .unwrap();
    }

    let error = gateway
        .authorize_and_run(Some("admin-token"), "delete_service", &json!({}))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), "rate_limited");
    assert!(error.retry_after().unwrap() >= 1);
}

#[tokio::test]
async fn test_identical_calls_return_identical_cached_results() {
    let gateway = service();
    let args = json!({"q": "errors", "limit": 10});

    let first = gateway
        .authorize_and_run(Some("admin-token"), "search_events", &args)
        .await
        .unwrap();
    let second = gateway
        .authorize_and_run(Some("admin-token"), "search_events", &args)
        .await
        .unwrap();

    // De-duplication is best-effort, so assert on the values rather than
    // on collaborator invocation counts.
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_uncached_operations_always_execute() {
    let executor = Arc::new(EchoExecutor::default());
    let gateway = service_with(
        Arc::new(StubStore::new()),
        Arc::clone(&executor) as Arc<dyn OperationExecutor>,
        100,
        true,
    );

    for _ in 0..2 {
        gateway
            .authorize_and_run(Some("admin-token"), "delete_service", &json!({}))
            .await
            .unwrap();
    }
    assert_eq!(executor.invocations.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_upstream_failure_is_typed_and_not_cached() {
    let store: Arc<dyn StoreProvider> = Arc::new(StubStore::new());
    let failing = service_with(
        Arc::clone(&store),
        Arc::new(FailingExecutor),
        100,
        true,
    );

    let error = failing
        .authorize_and_run(Some("admin-token"), "search_events", &json!({"q": "x"}))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), "upstream_failure");

    // A healthy service sharing the same store must not see a cached error.
    let healthy = service_with(store, Arc::new(EchoExecutor::default()), 100, true);
    let result = healthy
        .authorize_and_run(Some("admin-token"), "search_events", &json!({"q": "x"}))
        .await
        .unwrap();
    assert_eq!(result["operation"], "search_events");
}

#[tokio::test]
async fn test_injection_shaped_arguments_are_rejected() {
    let gateway = service();
    let error = gateway
        .authorize_and_run(
            Some("admin-token"),
            "search_events",
            &json!({"q": "x'; DROP TABLE services --"}),
        )
        .await
        .unwrap_err();
    assert_eq!(error.kind(), "invalid_argument");
}

#[tokio::test]
async fn test_store_outage_with_fail_open_still_serves() {
    let gateway = service_with(
        Arc::new(FailingStore),
        Arc::new(EchoExecutor::default()),
        2,
        true,
    );

    // Limiter fails open and the cache degrades to a miss on every call.
    for _ in 0..5 {
        let result = gateway
            .authorize_and_run(Some("admin-token"), "search_events", &json!({}))
            .await
            .unwrap();
        assert_eq!(result["operation"], "search_events");
    }
}

#[tokio::test]
async fn test_handle_produces_contract_envelopes() {
    let gateway = service();

    let success = gateway
        .handle(InboundCall::new(
            Some("admin-token".to_string()),
            "search_events",
            json!({"q": "errors"}),
        ))
        .await;
    assert!(success.is_success());

    let failure = gateway
        .handle(InboundCall::new(None, "search_events", json!({})))
        .await;
    let json = serde_json::to_value(&failure).unwrap();
    assert_eq!(json["error_kind"], "unauthenticated");
}

#[tokio::test]
async fn test_permissions_for_introspection() {
    let gateway = service();
    let grants = gateway.permissions_for(&["readonly".to_string()]);
    let rendered: Vec<String> = grants.iter().map(ToString::to_string).collect();
    assert_eq!(rendered, vec!["read:itsi", "read:search"]);
}

#[tokio::test]
async fn test_role_snapshot_in_claims_governs_access() {
    // Claims carry the role snapshot from issuance; the gateway never
    // re-reads identity state, so whatever the token says is what counts.
    let authority = Arc::new(
        StaticTokenAuthority::new().with_token("stale-token", "carol", &["readonly"]),
    );
    let store: Arc<dyn StoreProvider> = Arc::new(StubStore::new());
    let gateway = GatewayService::new(
        authority,
        RoleTable::from_grants(&default_roles()).unwrap(),
        RateLimiter::new(
            Arc::clone(&store),
            RateLimitPolicy {
                limit: 100,
                window: Duration::from_secs(60),
                fail_open: true,
                store_timeout: STORE_TIMEOUT,
            },
        ),
        SharedCache::new(store, STORE_TIMEOUT, true),
        Arc::new(EchoExecutor::default()),
        operations(),
        InputValidator::default(),
        CacheTtls {
            status: Duration::from_secs(30),
            query: Duration::from_secs(300),
        },
    );

    let error = gateway
        .authorize_and_run(Some("stale-token"), "delete_service", &json!({}))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), "forbidden");

    let result: Value = gateway
        .authorize_and_run(Some("stale-token"), "get_service_health", &json!({}))
        .await
        .unwrap();
    assert_eq!(result["operation"], "get_service_health");
}
