//! Redis-backed cache store implementation

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use tokio::time::timeout;
use tracing::debug;

use tempocard_shared_config::RedisConfig;

use crate::error::{CacheError, CacheResult};
use crate::store::CacheStore;

/// Cache store backed by a Redis server
///
/// Holds a single multiplexed connection shared by all clones; every command
/// is bounded by the configured command timeout so a stalled server degrades
/// to a cache fault instead of blocking the request path.
#[derive(Clone)]
pub struct RedisCacheStore {
    conn: MultiplexedConnection,
    command_timeout_secs: u64,
}

impl RedisCacheStore {
    /// Connect to the Redis server described by `config`
    pub async fn connect(config: &RedisConfig) -> CacheResult<Self> {
        let client = redis::Client::open(config.connection_url())
            .map_err(|e| CacheError::Connect(e.to_string()))?;

        let conn = timeout(
            Duration::from_secs(config.connect_timeout_secs),
            client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| CacheError::Timeout(config.connect_timeout_secs))?
        .map_err(|e| CacheError::Connect(e.to_string()))?;

        debug!(url = %config.url, "Connected to Redis cache");

        Ok(Self {
            conn,
            command_timeout_secs: config.command_timeout_secs,
        })
    }

    async fn bounded<T>(
        &self,
        fut: impl std::future::Future<Output = redis::RedisResult<T>>,
    ) -> CacheResult<T> {
        timeout(Duration::from_secs(self.command_timeout_secs), fut)
            .await
            .map_err(|_| CacheError::Timeout(self.command_timeout_secs))?
            .map_err(CacheError::from)
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let mut conn = self.conn.clone();
        let value: Option<String> = self
            .bounded(redis::cmd("GET").arg(key).query_async(&mut conn))
            .await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String, ttl: Option<Duration>) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        match ttl {
            Some(ttl) => {
                // SETEX rejects a zero expiry; clamp to the smallest legal TTL
                let secs = ttl.as_secs().max(1);
                let _: () = self
                    .bounded(
                        redis::cmd("SETEX")
                            .arg(key)
                            .arg(secs)
                            .arg(value)
                            .query_async(&mut conn),
                    )
                    .await?;
            }
            None => {
                let _: () = self
                    .bounded(redis::cmd("SET").arg(key).arg(value).query_async(&mut conn))
                    .await?;
            }
        }
        Ok(())
    }
}
