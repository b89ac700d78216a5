//! Core UserHaus functionality
//!
//! This module contains the UserHaus bootstrap coordinator: it owns the
//! database pool, the record store and the cache capability, and hands out
//! the [`CacheAsideService`] built from them.

use cache_system::{CacheHandle, CacheParams};
use sqlx::PgPool;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use store_object::{MemoryRecordStore, PgRecordStore, RecordStore};

use crate::errors::UserHausError;
use crate::service::CacheAsideService;
use config::{AppConfig, DatabaseConfig, Environment};

const MEMORY_STORE_SCHEME: &str = "memory://";

/// Main UserHaus coordinator, built once at startup
pub struct UserHaus {
    config: AppConfig,
    pool: Option<PgPool>,
    store: Arc<dyn RecordStore>,
    cache: CacheHandle,
    service: Arc<CacheAsideService>,
}

impl std::fmt::Debug for UserHaus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserHaus")
            .field("store", &self.store)
            .field("cache", &self.cache)
            .field("environment", &self.config.server.environment)
            .finish()
    }
}

impl UserHaus {
    /// Connect the store and the cache described by `config`.
    /// A database URL of `memory://` keeps records in process memory.
    pub async fn new(config: AppConfig) -> Result<Self, UserHausError> {
        let (pool, store) = if config
            .database
            .connection_string()
            .starts_with(MEMORY_STORE_SCHEME)
        {
            tracing::warn!("Using the in-memory record store, data will not survive a restart");
            let store: Arc<dyn RecordStore> = Arc::new(MemoryRecordStore::new());
            (None, store)
        } else {
            let pool = connect_pool(&config.database, config.server.environment).await?;
            let store: Arc<dyn RecordStore> =
                Arc::new(PgRecordStore::new(pool.clone(), &config.database.table)?);
            (Some(pool), store)
        };

        let cache = CacheHandle::connect(&config.cache).await;
        Ok(Self::from_parts(config, pool, store, cache))
    }

    /// Assemble from already constructed parts
    pub fn from_parts(
        config: AppConfig,
        pool: Option<PgPool>,
        store: Arc<dyn RecordStore>,
        cache: CacheHandle,
    ) -> Self {
        let params = CacheParams::from_config(&config.cache);
        let service = Arc::new(CacheAsideService::new(store.clone(), cache.clone(), params));

        Self {
            config,
            pool,
            store,
            cache,
            service,
        }
    }

    /// Get database pool reference, if records live in PostgreSQL
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.as_ref()
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn cache(&self) -> &CacheHandle {
        &self.cache
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Shared cache-aside service for handlers
    pub fn service(&self) -> Arc<CacheAsideService> {
        self.service.clone()
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), UserHausError> {
        self.store.health_check().await?;
        Ok(())
    }
}

async fn connect_pool(
    config: &DatabaseConfig,
    environment: Environment,
) -> Result<PgPool, UserHausError> {
    let mut options = PgConnectOptions::from_str(&config.connection_string())?;

    // Production databases are only reached over TLS
    if environment.is_production() {
        options = options.ssl_mode(PgSslMode::Require);
    }

    let mut pool_options = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds));

    // Set max lifetime if specified
    if config.max_lifetime_seconds > 0 {
        pool_options = pool_options.max_lifetime(Duration::from_secs(config.max_lifetime_seconds));
    }

    let pool = pool_options.connect_with(options).await?;
    tracing::info!(
        max_connections = config.max_connections,
        tls = environment.is_production(),
        "Database pool connected"
    );
    Ok(pool)
}
