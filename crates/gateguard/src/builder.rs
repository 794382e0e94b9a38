//! Gateway assembly
//!
//! Dependency-injected construction of the gateway: configuration plus an
//! executor and a declarative route table in, a wired [`Gateway`] out.
//! Every collaborator is an explicit instance owned by the returned
//! gateway; there are no process-wide singletons, so tests can build as
//! many isolated gateways as they need.

use gateguard_application::domain_services::{
    InputValidator, RateLimitPolicy, RateLimiter, RoleTable, SharedCache,
};
use gateguard_application::ports::registry::{resolve_store_provider, StoreProviderConfig};
use gateguard_application::use_cases::{CacheTtls, GatewayService, OperationTable};
use gateguard_domain::error::{Error, Result};
use gateguard_domain::ports::{OperationExecutor, StoreProvider, TokenAuthority};
use gateguard_domain::value_objects::{
    CacheClass, CallOutcome, Claims, Grant, Identity, InboundCall, OperationSpec, Permission,
};
use gateguard_infrastructure::auth::JwtTokenAuthority;
use gateguard_infrastructure::config::AppConfig;
use gateguard_infrastructure::health::{check_store, HealthReport};
use serde_json::Value;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

/// Builder for [`Gateway`] instances.
pub struct GatewayBuilder {
    config: AppConfig,
    executor: Option<Arc<dyn OperationExecutor>>,
    token_authority: Option<Arc<dyn TokenAuthority>>,
    operations: OperationTable,
}

impl GatewayBuilder {
    /// Start building a gateway from loaded configuration
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            executor: None,
            token_authority: None,
            operations: OperationTable::new(),
        }
    }

    /// Set the collaborator that performs protected operations
    pub fn with_executor(mut self, executor: Arc<dyn OperationExecutor>) -> Self {
        self.executor = Some(executor);
        self
    }

    /// Override the token authority.
    ///
    /// By default a JWT authority is built from `auth.jwt`; deployments
    /// that disable authentication must supply their own authority
    /// explicitly.
    pub fn with_token_authority(mut self, authority: Arc<dyn TokenAuthority>) -> Self {
        self.token_authority = Some(authority);
        self
    }

    /// Declare a routed operation: its required permission and cache class.
    pub fn route(
        mut self,
        operation: &str,
        permission: &str,
        cache_class: CacheClass,
    ) -> Result<Self> {
        let permission = Permission::parse(permission)?;
        self.operations
            .declare(operation, OperationSpec::new(permission, cache_class));
        Ok(self)
    }

    /// Declare a routed operation from a prebuilt spec.
    pub fn declare(mut self, operation: &str, spec: OperationSpec) -> Self {
        self.operations.declare(operation, spec);
        self
    }

    /// Assemble the gateway.
    pub fn build(self) -> Result<Gateway> {
        let config = self.config;

        let executor = self
            .executor
            .ok_or_else(|| Error::configuration("an operation executor is required"))?;

        let token_authority: Arc<dyn TokenAuthority> = match self.token_authority {
            Some(authority) => authority,
            None if config.auth.enabled => Arc::new(JwtTokenAuthority::from_config(&config.auth)?),
            None => {
                return Err(Error::configuration(
                    "auth.enabled is false; supply a token authority explicitly",
                ))
            }
        };

        let mut store_config = StoreProviderConfig::new(&config.store.provider);
        if let Some(redis_url) = &config.store.redis_url {
            store_config = store_config.with_uri(redis_url);
        }
        let store = resolve_store_provider(&store_config).map_err(Error::configuration)?;

        let store_timeout = Duration::from_millis(config.store.timeout_ms);
        let roles = RoleTable::from_grants(&config.roles)?;
        let limiter = RateLimiter::new(
            Arc::clone(&store),
            RateLimitPolicy {
                limit: config.rate_limit.limit,
                window: Duration::from_secs(config.rate_limit.window_secs),
                fail_open: config.rate_limit.fail_open,
                store_timeout,
            },
        );
        let cache = SharedCache::new(Arc::clone(&store), store_timeout, config.cache.enabled);
        let cache_ttls = CacheTtls {
            status: Duration::from_secs(config.cache.status_ttl_secs),
            query: Duration::from_secs(config.cache.query_ttl_secs),
        };

        let service = GatewayService::new(
            Arc::clone(&token_authority),
            roles,
            limiter,
            cache,
            executor,
            self.operations,
            InputValidator::new(config.validate_arguments),
            cache_ttls,
        );

        Ok(Gateway {
            service,
            token_authority,
            store,
            api_key_ttl: Duration::from_secs(config.auth.jwt.api_key_ttl_hours * 3600),
        })
    }
}

/// A fully wired gateway.
pub struct Gateway {
    service: GatewayService,
    token_authority: Arc<dyn TokenAuthority>,
    store: Arc<dyn StoreProvider>,
    api_key_ttl: Duration,
}

impl Gateway {
    /// Handle one inbound call, producing the wire-level outcome.
    pub async fn handle(&self, call: InboundCall) -> CallOutcome {
        self.service.handle(call).await
    }

    /// Run one authenticated, authorized, rate-limited, optionally-cached
    /// operation.
    pub async fn authorize_and_run(
        &self,
        bearer_token: Option<&str>,
        operation: &str,
        arguments: &Value,
    ) -> Result<Value> {
        self.service
            .authorize_and_run(bearer_token, operation, arguments)
            .await
    }

    /// Issue a token for a provisioned identity.
    pub fn issue_token(&self, identity: &Identity) -> Result<String> {
        self.token_authority.issue(identity)
    }

    /// Issue a long-lived API key for a provisioned identity.
    pub fn issue_api_key(&self, identity: &Identity) -> Result<String> {
        self.token_authority.issue_with_ttl(identity, self.api_key_ttl)
    }

    /// Refresh a valid token, extending its validity from its own
    /// subject and role snapshot.
    pub fn refresh_token(&self, token: &str) -> Result<String> {
        self.token_authority.refresh(token)
    }

    /// Verify a bearer credential without running an operation.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        self.token_authority.verify(token)
    }

    /// Union of grants held by a role set, for whoami responses.
    pub fn permissions_for(&self, role_set: &[String]) -> BTreeSet<Grant> {
        self.service.permissions_for(role_set)
    }

    /// Probe the store backend.
    pub async fn health(&self) -> HealthReport {
        check_store(&self.store).await
    }

    /// The underlying gateway service
    pub fn service(&self) -> &GatewayService {
        &self.service
    }

    /// The resolved store backend
    pub fn store(&self) -> &Arc<dyn StoreProvider> {
        &self.store
    }
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("service", &self.service)
            .field("store", &self.store.provider_name())
            .finish()
    }
}
