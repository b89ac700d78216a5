//! Cache parameter configuration
//!
//! This module defines the CacheParams struct
//! naming the snapshot key and its TTL.

use config::CacheConfig;
use std::time::Duration;

const DEFAULT_KEY: &str = "data";
const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Where the record snapshot lives and how long it stays valid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheParams {
    /// Key the snapshot is stored under
    pub key: String,
    /// Snapshot lifetime
    pub ttl: Duration,
}

impl CacheParams {
    pub fn new(key: &str, ttl: Duration) -> Self {
        Self {
            key: key.to_string(),
            ttl,
        }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(&config.key, Duration::from_secs(config.ttl_seconds))
    }
}

impl Default for CacheParams {
    fn default() -> Self {
        Self::new(DEFAULT_KEY, DEFAULT_TTL)
    }
}
