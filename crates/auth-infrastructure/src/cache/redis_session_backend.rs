//! Redis-backed session storage. Expiry is Redis' own `EX`.

use async_trait::async_trait;
use deadpool_redis::redis::cmd;
use deadpool_redis::{Config, Connection, Pool, PoolConfig, Runtime};
use std::time::Duration;
use tracing::error;

use auth_core::repositories::{BackendError, SessionBackend};

pub fn create_redis_pool(url: &str, max_connections: usize) -> Result<Pool, BackendError> {
    let mut config = Config::from_url(url);
    config.pool = Some(PoolConfig::new(max_connections));
    config
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| BackendError(e.to_string()))
}

#[derive(Clone)]
pub struct RedisSessionBackend {
    pool: Pool,
}

impl RedisSessionBackend {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    async fn connection(&self) -> Result<Connection, BackendError> {
        self.pool.get().await.map_err(|e| {
            error!("Redis pool error: {}", e);
            BackendError(e.to_string())
        })
    }

    pub async fn ping(&self) -> Result<(), BackendError> {
        let mut conn = self.connection().await?;
        cmd("PING")
            .query_async::<String>(&mut conn)
            .await
            .map(|_| ())
            .map_err(|e| BackendError(e.to_string()))
    }
}

#[async_trait]
impl SessionBackend for RedisSessionBackend {
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), BackendError> {
        let mut conn = self.connection().await?;
        // EX rejects 0; sub-second TTLs round up.
        let seconds = ttl.as_secs().max(1);
        cmd("SET")
            .arg(key)
            .arg(value)
            .arg("EX")
            .arg(seconds)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| {
                error!("Redis SET failed: {}", e);
                BackendError(e.to_string())
            })
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, BackendError> {
        let mut conn = self.connection().await?;
        cmd("GET")
            .arg(key)
            .query_async::<Option<Vec<u8>>>(&mut conn)
            .await
            .map_err(|e| {
                error!("Redis GET failed: {}", e);
                BackendError(e.to_string())
            })
    }

    async fn delete(&self, key: &str) -> Result<bool, BackendError> {
        let mut conn = self.connection().await?;
        let removed = cmd("DEL")
            .arg(key)
            .query_async::<i64>(&mut conn)
            .await
            .map_err(|e| {
                error!("Redis DEL failed: {}", e);
                BackendError(e.to_string())
            })?;
        Ok(removed > 0)
    }
}
