//! No-op cache backend

use crate::backend::CacheBackend;
use crate::errors::CacheError;
use async_trait::async_trait;
use std::time::Duration;

/// Backend used when no cache is configured or after the cache was disabled.
/// Every read misses and every write is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullCache;

#[async_trait]
impl CacheBackend for NullCache {
    fn name(&self) -> &'static str {
        "null"
    }

    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Ok(None)
    }

    async fn set(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Ok(())
    }

    async fn delete(&self, _key: &str) -> Result<bool, CacheError> {
        Ok(false)
    }

    async fn ping(&self) -> Result<(), CacheError> {
        Ok(())
    }

    fn is_null(&self) -> bool {
        true
    }
}
