//! Shared test doubles for the application test suite

use async_trait::async_trait;
use gateguard_domain::error::{AuthRejection, Error, Result};
use gateguard_domain::ports::{OperationExecutor, StoreProvider, TokenAuthority, WindowAdmission};
use gateguard_domain::value_objects::{Claims, Identity};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct StoredValue {
    value: String,
    expires_at: Option<Instant>,
}

/// In-test store: a mutexed map plus window logs, good enough to exercise
/// every service path without pulling in a real backend.
#[derive(Default)]
pub struct StubStore {
    values: Mutex<HashMap<String, StoredValue>>,
    windows: Mutex<HashMap<String, Vec<i64>>>,
}

impl StubStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl std::fmt::Debug for StubStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StubStore").finish()
    }
}

#[async_trait]
impl StoreProvider for StubStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut values = self.values.lock().unwrap();
        if let Some(stored) = values.get(key) {
            if stored.expires_at.is_some_and(|at| Instant::now() > at) {
                values.remove(key);
                return Ok(None);
            }
            return Ok(Some(stored.value.clone()));
        }
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        self.values.lock().unwrap().insert(
            key.to_string(),
            StoredValue {
                value: value.to_string(),
                expires_at: ttl.map(|ttl| Instant::now() + ttl),
            },
        );
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        Ok(self.values.lock().unwrap().remove(key).is_some())
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<u64> {
        let mut values = self.values.lock().unwrap();
        let before = values.len();
        values.retain(|key, _| !key.starts_with(prefix));
        Ok((before - values.len()) as u64)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut values = self.values.lock().unwrap();
        let next = values
            .get(key)
            .and_then(|stored| stored.value.parse::<i64>().ok())
            .unwrap_or(0)
            + 1;
        values.insert(
            key.to_string(),
            StoredValue {
                value: next.to_string(),
                expires_at: None,
            },
        );
        Ok(next)
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let mut values = self.values.lock().unwrap();
        match values.get_mut(key) {
            Some(stored) => {
                stored.expires_at = Some(Instant::now() + ttl);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn window_admit(
        &self,
        key: &str,
        now_micros: i64,
        cutoff_micros: i64,
        limit: u64,
        _window: Duration,
    ) -> Result<WindowAdmission> {
        let mut windows = self.windows.lock().unwrap();
        let log = windows.entry(key.to_string()).or_default();
        log.retain(|&timestamp| timestamp > cutoff_micros);
        let count = log.len() as u64;
        let allowed = count < limit;
        if allowed {
            log.push(now_micros);
        }
        Ok(WindowAdmission { allowed, count })
    }

    async fn window_count(&self, key: &str, cutoff_micros: i64) -> Result<u64> {
        let windows = self.windows.lock().unwrap();
        Ok(windows
            .get(key)
            .map(|log| log.iter().filter(|&&ts| ts > cutoff_micros).count() as u64)
            .unwrap_or(0))
    }

    async fn window_oldest(&self, key: &str) -> Result<Option<i64>> {
        let windows = self.windows.lock().unwrap();
        Ok(windows.get(key).and_then(|log| log.iter().min().copied()))
    }

    async fn size(&self) -> Result<usize> {
        Ok(self.values.lock().unwrap().len())
    }

    async fn clear(&self) -> Result<()> {
        self.values.lock().unwrap().clear();
        self.windows.lock().unwrap().clear();
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}

/// A store whose every operation fails, for degradation-path tests.
#[derive(Debug, Default)]
pub struct FailingStore;

macro_rules! fail {
    () => {
        Err(Error::store("injected store failure"))
    };
}

#[async_trait]
impl StoreProvider for FailingStore {
    async fn get(&self, _key: &str) -> Result<Option<String>> {
        fail!()
    }
    async fn set(&self, _key: &str, _value: &str, _ttl: Option<Duration>) -> Result<()> {
        fail!()
    }
    async fn delete(&self, _key: &str) -> Result<bool> {
        fail!()
    }
    async fn delete_prefix(&self, _prefix: &str) -> Result<u64> {
        fail!()
    }
    async fn exists(&self, _key: &str) -> Result<bool> {
        fail!()
    }
    async fn incr(&self, _key: &str) -> Result<i64> {
        fail!()
    }
    async fn expire(&self, _key: &str, _ttl: Duration) -> Result<bool> {
        fail!()
    }
    async fn window_admit(
        &self,
        _key: &str,
        _now_micros: i64,
        _cutoff_micros: i64,
        _limit: u64,
        _window: Duration,
    ) -> Result<WindowAdmission> {
        fail!()
    }
    async fn window_count(&self, _key: &str, _cutoff_micros: i64) -> Result<u64> {
        fail!()
    }
    async fn window_oldest(&self, _key: &str) -> Result<Option<i64>> {
        fail!()
    }
    async fn size(&self) -> Result<usize> {
        fail!()
    }
    async fn clear(&self) -> Result<()> {
        fail!()
    }
    async fn ping(&self) -> Result<()> {
        fail!()
    }
    fn provider_name(&self) -> &str {
        "failing"
    }
}

/// Token authority resolving a fixed token → claims table.
#[derive(Default)]
pub struct StaticTokenAuthority {
    tokens: HashMap<String, Claims>,
}

impl StaticTokenAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: &str, subject: &str, roles: &[&str]) -> Self {
        self.tokens.insert(
            token.to_string(),
            Claims {
                sub: subject.to_string(),
                roles: roles.iter().map(|role| (*role).to_string()).collect(),
                iat: 1_000,
                exp: i64::MAX,
                jti: format!("jti-{subject}"),
            },
        );
        self
    }
}

impl TokenAuthority for StaticTokenAuthority {
    fn issue(&self, identity: &Identity) -> Result<String> {
        Ok(format!("issued-{}", identity.id))
    }

    fn issue_with_ttl(&self, identity: &Identity, _ttl: Duration) -> Result<String> {
        self.issue(identity)
    }

    fn verify(&self, token: &str) -> Result<Claims> {
        if token == "expired-token" {
            return Err(Error::unauthenticated(
                AuthRejection::Expired,
                "token expired",
            ));
        }
        self.tokens.get(token).cloned().ok_or_else(|| {
            Error::unauthenticated(AuthRejection::Invalid, "unknown or tampered token")
        })
    }

    fn refresh(&self, token: &str) -> Result<String> {
        let claims = self.verify(token)?;
        Ok(format!("refreshed-{}", claims.sub))
    }
}

/// Executor echoing its input, with an embedded sequence number so
/// re-execution is visible in the result.
#[derive(Default)]
pub struct EchoExecutor {
    pub invocations: AtomicUsize,
}

#[async_trait]
impl OperationExecutor for EchoExecutor {
    async fn execute(&self, operation: &str, arguments: &Value) -> Result<Value> {
        let sequence = self.invocations.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(json!({
            "operation": operation,
            "arguments": arguments,
            "sequence": sequence,
        }))
    }
}

/// Executor that always fails upstream.
#[derive(Default)]
pub struct FailingExecutor;

#[async_trait]
impl OperationExecutor for FailingExecutor {
    async fn execute(&self, _operation: &str, _arguments: &Value) -> Result<Value> {
        Err(Error::upstream("collaborator exploded"))
    }
}

/// The default role table used across the suite.
pub fn default_roles() -> HashMap<String, Vec<String>> {
    let to_strings = |grants: &[&str]| grants.iter().map(|g| (*g).to_string()).collect();
    HashMap::from([
        (
            "admin".to_string(),
            to_strings(gateguard_domain::constants::ADMIN_GRANTS),
        ),
        (
            "user".to_string(),
            to_strings(gateguard_domain::constants::USER_GRANTS),
        ),
        (
            "readonly".to_string(),
            to_strings(gateguard_domain::constants::READONLY_GRANTS),
        ),
    ])
}
