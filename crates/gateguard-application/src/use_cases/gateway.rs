//! Gateway Middleware Use Case
//!
//! Orchestrates one inbound call through the admission pipeline:
//! authenticate → authorize → rate-limit → validate → (cache | execute |
//! populate) → audit. The pipeline is terminal on the first failing
//! transition; rejections return before the collaborator is ever invoked.
//!
//! Authorization is driven by a declarative table mapping operation name to
//! its required permission and cache class, consulted once per call, so
//! permission logic cannot diverge per endpoint.

use crate::domain_services::{
    AuditLog, InputValidator, RateLimiter, RoleTable, SharedCache,
};
use gateguard_domain::error::{AuthRejection, Error, ErrorEnvelope, Result};
use gateguard_domain::ports::{OperationExecutor, TokenAuthority};
use gateguard_domain::value_objects::{
    CacheClass, CallOutcome, Claims, Fingerprint, Grant, InboundCall, OperationSpec, Permission,
};
use serde_json::Value;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Bearer scheme prefix accepted on inbound credentials
const BEARER_PREFIX: &str = "Bearer ";

/// Per-class cache lifetimes, resolved from configuration.
#[derive(Debug, Clone, Copy)]
pub struct CacheTtls {
    /// Lifetime for frequently-changing status data
    pub status: Duration,
    /// Lifetime for query results
    pub query: Duration,
}

impl CacheTtls {
    fn for_class(&self, class: CacheClass) -> Option<Duration> {
        match class {
            CacheClass::Uncached => None,
            CacheClass::Status => Some(self.status),
            CacheClass::Query => Some(self.query),
        }
    }
}

/// Declarative operation → requirement table.
///
/// Every operation the gateway fronts is declared here once; undeclared
/// operations are rejected without touching the store or the collaborator.
#[derive(Debug, Clone, Default)]
pub struct OperationTable {
    operations: HashMap<String, OperationSpec>,
}

impl OperationTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare an operation
    pub fn declare<O: Into<String>>(&mut self, operation: O, spec: OperationSpec) {
        self.operations.insert(operation.into(), spec);
    }

    /// Look up an operation's requirements
    pub fn get(&self, operation: &str) -> Option<&OperationSpec> {
        self.operations.get(operation)
    }

    /// Names of all declared operations
    pub fn operation_names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    /// Number of declared operations
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// The gateway middleware: the single entry point surrounding transport
/// code calls into.
///
/// All collaborators are injected; the service holds no global state, so
/// tests can substitute an in-memory store and stub executor per case.
pub struct GatewayService {
    token_authority: Arc<dyn TokenAuthority>,
    roles: RoleTable,
    limiter: RateLimiter,
    cache: SharedCache,
    executor: Arc<dyn OperationExecutor>,
    operations: OperationTable,
    validator: InputValidator,
    cache_ttls: CacheTtls,
    audit: AuditLog,
}

impl GatewayService {
    /// Create a gateway service with injected collaborators
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        token_authority: Arc<dyn TokenAuthority>,
        roles: RoleTable,
        limiter: RateLimiter,
        cache: SharedCache,
        executor: Arc<dyn OperationExecutor>,
        operations: OperationTable,
        validator: InputValidator,
        cache_ttls: CacheTtls,
    ) -> Self {
        Self {
            token_authority,
            roles,
            limiter,
            cache,
            executor,
            operations,
            validator,
            cache_ttls,
            audit: AuditLog::new(),
        }
    }

    /// Handle one inbound call, producing the wire-level outcome.
    pub async fn handle(&self, call: InboundCall) -> CallOutcome {
        match self
            .authorize_and_run(
                call.bearer_token.as_deref(),
                &call.operation,
                &call.arguments,
            )
            .await
        {
            Ok(result) => CallOutcome::Success { result },
            Err(error) => CallOutcome::Failure(ErrorEnvelope::from(&error)),
        }
    }

    /// Run one authenticated, authorized, rate-limited, optionally-cached
    /// operation. Terminal on the first failing transition.
    pub async fn authorize_and_run(
        &self,
        bearer_token: Option<&str>,
        operation: &str,
        arguments: &Value,
    ) -> Result<Value> {
        let claims = self.authenticate(bearer_token)?;

        let spec = self
            .operations
            .get(operation)
            .ok_or_else(|| Error::not_found(format!("operation '{operation}'")))?;

        self.authorize(&claims, &spec.permission)?;
        self.check_rate_limit(&claims.sub).await?;

        if let Err(error) = self.validator.validate(arguments) {
            self.audit
                .invalid_input(&claims.sub, operation, &error.to_string());
            return Err(error);
        }

        self.serve(operation, arguments, spec.cache_class).await
    }

    /// Union of grants held by a role set, for whoami-style introspection.
    pub fn permissions_for(&self, role_set: &[String]) -> BTreeSet<Grant> {
        self.roles.permissions_for(role_set)
    }

    /// The declared operation table
    pub fn operations(&self) -> &OperationTable {
        &self.operations
    }

    /// The shared cache, exposed for administrative invalidation
    pub fn cache(&self) -> &SharedCache {
        &self.cache
    }

    /// Verify the bearer credential and produce its claims.
    fn authenticate(&self, bearer_token: Option<&str>) -> Result<Claims> {
        let Some(raw) = bearer_token else {
            self.audit
                .authentication(None, Some(AuthRejection::Missing));
            return Err(Error::unauthenticated(
                AuthRejection::Missing,
                "authentication credentials required",
            ));
        };

        let token = raw.strip_prefix(BEARER_PREFIX).unwrap_or(raw);
        match self.token_authority.verify(token) {
            Ok(claims) => {
                self.audit.authentication(Some(&claims.sub), None);
                Ok(claims)
            }
            Err(error) => {
                let reason = match &error {
                    Error::Unauthenticated { reason, .. } => *reason,
                    _ => AuthRejection::Invalid,
                };
                self.audit.authentication(None, Some(reason));
                Err(error)
            }
        }
    }

    /// Evaluate the required permission against the claims' role snapshot.
    fn authorize(&self, claims: &Claims, permission: &Permission) -> Result<()> {
        let granted = self.roles.has_permission(&claims.roles, permission);
        self.audit.authorization(&claims.sub, permission, granted);
        if granted {
            Ok(())
        } else {
            Err(Error::forbidden(&claims.sub, permission.to_string()))
        }
    }

    /// Consume an admission slot keyed by subject id.
    async fn check_rate_limit(&self, subject: &str) -> Result<()> {
        let admission = self.limiter.admit(subject).await?;
        if admission.allowed {
            return Ok(());
        }
        let retry_after = admission.retry_after_secs.unwrap_or(1);
        self.audit.rate_limit_exceeded(subject, retry_after);
        Err(Error::rate_limited(admission.remaining, retry_after))
    }

    /// Serve from cache or execute and populate.
    async fn serve(
        &self,
        operation: &str,
        arguments: &Value,
        cache_class: CacheClass,
    ) -> Result<Value> {
        let ttl = self.cache_ttls.for_class(cache_class);

        let fingerprint = ttl
            .is_some()
            .then(|| Fingerprint::compute(operation, arguments));

        if let Some(fingerprint) = &fingerprint {
            if let Some(cached) = self.cache.get::<Value>(fingerprint).await {
                debug!(operation, "serving from cache");
                return Ok(cached);
            }
        }

        let result = self.executor.execute(operation, arguments).await?;

        if let (Some(fingerprint), Some(ttl)) = (&fingerprint, ttl) {
            self.cache.put(fingerprint, &result, ttl).await;
        }

        Ok(result)
    }
}

impl std::fmt::Debug for GatewayService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayService")
            .field("operations", &self.operations.len())
            .field("limiter", &self.limiter)
            .field("cache", &self.cache)
            .finish()
    }
}
