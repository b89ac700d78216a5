//! Cache-aside coordination between the record store and the snapshot cache
//!
//! Reads check the cache, fall back to the store and refill the cache.
//! Writes go to the store and then drop the cached snapshot. The cache is
//! best-effort throughout: its failures are logged and never reach callers.
//!
//! Cache and store are not updated atomically. A read that lists the store
//! before a write commits can store its snapshot after that write's
//! invalidation, leaving a slightly stale snapshot in place until the TTL
//! runs out. Callers that need the current state pass `force_refresh`.

use cache_system::{CacheHandle, CacheParams};
use std::fmt::Debug;
use std::sync::Arc;
use store_object::{NewRecord, Record, RecordStore, StoreError};

/// Orchestrates reads and writes over a required store and an optional cache
#[derive(Clone)]
pub struct CacheAsideService {
    store: Arc<dyn RecordStore>,
    cache: CacheHandle,
    params: CacheParams,
}

impl Debug for CacheAsideService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheAsideService")
            .field("store", &self.store)
            .field("cache", &self.cache)
            .field("params", &self.params)
            .finish()
    }
}

impl CacheAsideService {
    pub fn new(store: Arc<dyn RecordStore>, cache: CacheHandle, params: CacheParams) -> Self {
        Self {
            store,
            cache,
            params,
        }
    }

    /// Service that always reads from the store
    pub fn without_cache(store: Arc<dyn RecordStore>) -> Self {
        Self::new(store, CacheHandle::disabled(), CacheParams::default())
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    pub fn cache(&self) -> &CacheHandle {
        &self.cache
    }

    pub fn params(&self) -> &CacheParams {
        &self.params
    }

    /// All records. A cached snapshot younger than the TTL is returned as-is
    /// without touching the store; `force_refresh` drops it and always reads
    /// the store.
    pub async fn fetch_all(&self, force_refresh: bool) -> Result<Vec<Record>, StoreError> {
        if force_refresh {
            self.invalidate("refresh").await;
        } else if let Some(records) = self.cached_snapshot().await {
            return Ok(records);
        }

        let records = self.store.list_all().await?;
        self.fill(&records).await;
        Ok(records)
    }

    /// Insert a record. Blank fields are rejected before the store is called.
    pub async fn create(&self, data: NewRecord) -> Result<Record, StoreError> {
        data.validate()?;
        let record = self.store.insert(&data).await?;
        self.invalidate("create").await;
        Ok(record)
    }

    /// Replace a record's fields. Returns `false` if `id` does not exist.
    pub async fn update(&self, id: i32, data: NewRecord) -> Result<bool, StoreError> {
        data.validate()?;
        let found = self.store.update(id, &data).await?;
        self.invalidate("update").await;
        Ok(found)
    }

    /// Delete a record. Returns `false` if `id` does not exist.
    pub async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let found = self.store.delete(id).await?;
        self.invalidate("delete").await;
        Ok(found)
    }

    async fn cached_snapshot(&self) -> Option<Vec<Record>> {
        let key = self.params.key.as_str();

        match self.cache.get_json::<Vec<Record>>(key).await {
            Ok(Some(records)) => {
                crate::debug_log!(key, records = records.len(), "Snapshot cache hit");
                Some(records)
            }
            Ok(None) => {
                crate::debug_log!(key, "Snapshot cache miss");
                None
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "Snapshot cache read failed, reading the store");
                None
            }
        }
    }

    async fn fill(&self, records: &[Record]) {
        let key = self.params.key.as_str();

        if let Err(e) = self.cache.set_json(key, records, self.params.ttl).await {
            tracing::warn!(key, error = %e, "Failed to store snapshot in cache");
        }
    }

    async fn invalidate(&self, reason: &'static str) {
        let key = self.params.key.as_str();

        match self.cache.delete(key).await {
            Ok(_) => {
                crate::debug_log!(key, reason, "Snapshot invalidated");
            }
            Err(e) => {
                tracing::warn!(
                    key,
                    reason,
                    error = %e,
                    "Snapshot invalidation failed, readers may see stale data until the entry expires"
                );
            }
        }
    }
}
