//! Redis store provider
//!
//! Distributed implementation of the store port using Redis, for
//! multi-instance deployments where rate-limit windows and cache entries
//! must be shared. Uses multiplexed connections for efficient connection
//! reuse.
//!
//! Sliding windows are sorted sets keyed by timestamp; the
//! discard-count-append admission sequence runs as a single server-side
//! Lua script, which makes it atomic per key without client-side locking.

use async_trait::async_trait;
use gateguard_domain::error::{Error, Result};
use gateguard_domain::ports::{StoreProvider, WindowAdmission};
use redis::{aio::MultiplexedConnection, AsyncCommands, Client, Script};
use std::sync::Arc;
use std::time::Duration;

/// Atomic sliding-window admission.
///
/// KEYS[1] window key; ARGV[1] cutoff, ARGV[2] now, ARGV[3] limit,
/// ARGV[4] window seconds. Returns {admitted, live count before append}.
const WINDOW_ADMIT_SCRIPT: &str = r"
redis.call('ZREMRANGEBYSCORE', KEYS[1], '-inf', ARGV[1])
local count = redis.call('ZCARD', KEYS[1])
if count < tonumber(ARGV[3]) then
    redis.call('ZADD', KEYS[1], ARGV[2], ARGV[2])
    redis.call('EXPIRE', KEYS[1], ARGV[4])
    return {1, count}
end
return {0, count}
";

/// Redis store provider
#[derive(Clone)]
pub struct RedisStoreProvider {
    client: Client,
}

impl RedisStoreProvider {
    /// Create a provider from a connection string
    ///
    /// # Arguments
    ///
    /// * `connection_string` - Redis connection URL (e.g. "redis://localhost:6379")
    pub fn new(connection_string: &str) -> Result<Self> {
        let client = Client::open(connection_string)
            .map_err(|e| Error::store_with_source("failed to create Redis client", e))?;
        Ok(Self { client })
    }

    /// Create a provider from host and port
    pub fn with_host_port(host: &str, port: u16) -> Result<Self> {
        Self::new(&format!("redis://{host}:{port}"))
    }

    async fn connection(&self) -> Result<MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| Error::store_with_source("failed to get Redis connection", e))
    }
}

fn command_error(command: &str) -> impl FnOnce(redis::RedisError) -> Error + '_ {
    move |e| Error::store_with_source(format!("Redis {command} failed"), e)
}

#[async_trait]
impl StoreProvider for RedisStoreProvider {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection().await?;
        conn.get(key).await.map_err(command_error("GET"))
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<()> {
        let mut conn = self.connection().await?;
        match ttl {
            Some(ttl) => conn
                .set_ex(key, value, ttl.as_secs().max(1))
                .await
                .map_err(command_error("SETEX")),
            None => conn.set(key, value).await.map_err(command_error("SET")),
        }
    }

    async fn delete(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let removed: i64 = conn.del(key).await.map_err(command_error("DEL"))?;
        Ok(removed > 0)
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<u64> {
        // KEYS is O(keyspace) but this path is administrative, not hot.
        let mut conn = self.connection().await?;
        let keys: Vec<String> = redis::cmd("KEYS")
            .arg(format!("{prefix}*"))
            .query_async(&mut conn)
            .await
            .map_err(command_error("KEYS"))?;
        if keys.is_empty() {
            return Ok(0);
        }
        let removed: u64 = conn.del(&keys).await.map_err(command_error("DEL"))?;
        Ok(removed)
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let mut conn = self.connection().await?;
        let found: i64 = conn.exists(key).await.map_err(command_error("EXISTS"))?;
        Ok(found > 0)
    }

    async fn incr(&self, key: &str) -> Result<i64> {
        let mut conn = self.connection().await?;
        conn.incr(key, 1).await.map_err(command_error("INCR"))
    }

    async fn expire(&self, key: &str, ttl: Duration) -> Result<bool> {
        let mut conn = self.connection().await?;
        let applied: bool = conn
            .expire(key, ttl.as_secs().max(1) as i64)
            .await
            .map_err(command_error("EXPIRE"))?;
        Ok(applied)
    }

    async fn window_admit(
        &self,
        key: &str,
        now_micros: i64,
        cutoff_micros: i64,
        limit: u64,
        window: Duration,
    ) -> Result<WindowAdmission> {
        let mut conn = self.connection().await?;
        let (admitted, count): (i64, u64) = Script::new(WINDOW_ADMIT_SCRIPT)
            .key(key)
            .arg(cutoff_micros)
            .arg(now_micros)
            .arg(limit)
            .arg(window.as_secs().max(1))
            .invoke_async(&mut conn)
            .await
            .map_err(command_error("EVALSHA"))?;
        Ok(WindowAdmission {
            allowed: admitted == 1,
            count,
        })
    }

    async fn window_count(&self, key: &str, cutoff_micros: i64) -> Result<u64> {
        let mut conn = self.connection().await?;
        conn.zcount(key, format!("({cutoff_micros}"), "+inf")
            .await
            .map_err(command_error("ZCOUNT"))
    }

    async fn window_oldest(&self, key: &str) -> Result<Option<i64>> {
        let mut conn = self.connection().await?;
        let oldest: Vec<(String, f64)> = conn
            .zrange_withscores(key, 0, 0)
            .await
            .map_err(command_error("ZRANGE"))?;
        Ok(oldest.first().map(|(_, score)| *score as i64))
    }

    async fn size(&self) -> Result<usize> {
        let mut conn = self.connection().await?;
        redis::cmd("DBSIZE")
            .query_async(&mut conn)
            .await
            .map_err(command_error("DBSIZE"))
    }

    async fn clear(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        redis::cmd("FLUSHDB")
            .query_async(&mut conn)
            .await
            .map_err(command_error("FLUSHDB"))
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(command_error("PING"))?;
        Ok(())
    }

    fn provider_name(&self) -> &str {
        "redis"
    }
}

impl std::fmt::Debug for RedisStoreProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStoreProvider").finish()
    }
}

// ============================================================================
// Auto-registration via linkme distributed slice
// ============================================================================

use gateguard_application::ports::registry::{
    StoreProviderConfig, StoreProviderEntry, STORE_PROVIDERS,
};

/// Factory function for creating Redis store provider instances.
fn redis_store_factory(
    config: &StoreProviderConfig,
) -> std::result::Result<Arc<dyn StoreProvider>, String> {
    let uri = config
        .uri
        .clone()
        .unwrap_or_else(|| "redis://localhost:6379".to_string());

    let provider = RedisStoreProvider::new(&uri)
        .map_err(|e| format!("Failed to create Redis provider: {e}"))?;

    Ok(Arc::new(provider))
}

#[linkme::distributed_slice(STORE_PROVIDERS)]
static REDIS_PROVIDER: StoreProviderEntry = StoreProviderEntry {
    name: "redis",
    description: "Redis distributed store",
    factory: redis_store_factory,
};
