//! Redis cache backend
//!
//! This module provides the Redis-backed [`CacheBackend`]
//! with lazy connection management and per-command timeouts.

use crate::backend::CacheBackend;
use crate::errors::CacheError;
use async_trait::async_trait;
use config::CacheConfig;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisResult};
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

const REDIS_SCHEMES: [&str; 4] = ["redis://", "rediss://", "unix://", "redis+unix://"];

/// Redis-based cache backend
#[derive(Clone)]
pub struct RedisCache {
    client: Arc<Client>,
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
    op_timeout: Duration,
    connect_timeout: Duration,
}

impl Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let connection_status = {
            match self.connection.try_read() {
                Ok(conn) => {
                    if conn.is_some() {
                        "connected"
                    } else {
                        "no_connection"
                    }
                }
                Err(_) => "lock_busy",
            }
        };

        f.debug_struct("RedisCache")
            .field("op_timeout", &self.op_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("connected", &connection_status)
            .finish()
    }
}

impl RedisCache {
    /// Create a new Redis backend; no connection is opened until first use.
    /// Urls the client cannot use fail with [`CacheError::UnsupportedUrl`].
    pub fn new(
        redis_url: &str,
        op_timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self, CacheError> {
        if !REDIS_SCHEMES.iter().any(|scheme| redis_url.starts_with(scheme)) {
            return Err(CacheError::UnsupportedUrl(redis_url.to_string()));
        }
        let client = Client::open(redis_url)
            .map_err(|e| CacheError::UnsupportedUrl(format!("{}: {}", redis_url, e)))?;

        Ok(Self {
            client: Arc::new(client),
            connection: Arc::new(RwLock::new(None)),
            op_timeout,
            connect_timeout,
        })
    }

    pub fn from_config(config: &CacheConfig) -> Result<Self, CacheError> {
        let url = config.url.as_deref().ok_or(CacheError::Disabled)?;
        Self::new(
            url,
            Duration::from_millis(config.timeout_ms),
            Duration::from_millis(config.connection_timeout_ms),
        )
    }

    /// Get or create Redis connection
    async fn get_connection(&self) -> Result<MultiplexedConnection, CacheError> {
        if let Some(conn) = self.connection.read().await.as_ref() {
            return Ok(conn.clone());
        }

        let mut slot = self.connection.write().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }

        let connection = tokio::time::timeout(
            self.connect_timeout,
            self.client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| CacheError::Timeout(self.connect_timeout))??;

        *slot = Some(connection.clone());
        Ok(connection)
    }

    /// Run a single command under the per-operation timeout
    async fn bounded<T, F>(&self, command: F) -> Result<T, CacheError>
    where
        F: Future<Output = RedisResult<T>>,
    {
        tokio::time::timeout(self.op_timeout, command)
            .await
            .map_err(|_| CacheError::Timeout(self.op_timeout))?
            .map_err(CacheError::from)
    }
}

#[async_trait]
impl CacheBackend for RedisCache {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.get_connection().await?;
        let cached: Option<String> = self.bounded(conn.get(key)).await?;
        Ok(cached)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.get_connection().await?;
        // Redis rejects EX 0
        let seconds = ttl.as_secs().max(1);
        let _: () = self.bounded(conn.set_ex(key, value, seconds)).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let mut conn = self.get_connection().await?;
        let deleted: i64 = self.bounded(conn.del(key)).await?;
        Ok(deleted > 0)
    }

    async fn ping(&self) -> Result<(), CacheError> {
        let mut conn = self.get_connection().await?;
        let cmd = redis::cmd("PING");
        let _pong: String = self.bounded(cmd.query_async(&mut conn)).await?;
        Ok(())
    }
}
