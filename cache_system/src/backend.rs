//! Cache backend abstraction
//!
//! Every backend stores opaque string payloads under string keys with an
//! expiry. Serialization happens one level up, in [`crate::CacheHandle`].

use crate::errors::CacheError;
use async_trait::async_trait;
use std::fmt::Debug;
use std::time::Duration;

/// Key-value cache with per-entry expiry
#[async_trait]
pub trait CacheBackend: Send + Sync + Debug {
    /// Short backend name used in logs
    fn name(&self) -> &'static str;

    /// Fetch the payload stored under `key`, `None` on miss or expiry
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    /// Store `value` under `key`, replacing any previous entry
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;

    /// Remove `key`; returns whether an entry was removed
    async fn delete(&self, key: &str) -> Result<bool, CacheError>;

    /// Check connectivity
    async fn ping(&self) -> Result<(), CacheError>;

    /// Whether this backend caches nothing at all
    fn is_null(&self) -> bool {
        false
    }
}
