//! Error types for cache operations
//!
//! This module defines all error types that can occur
//! during cache operations and Redis interactions.

use std::time::Duration;
use thiserror::Error;

/// Cache system errors
#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Redis connection error: {0}")]
    Connection(redis::RedisError),

    #[error("Redis command error: {0}")]
    Command(redis::RedisError),

    #[error("Cache backend unavailable: {0}")]
    Unavailable(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Cache operation timeout after {0:?}")]
    Timeout(Duration),

    #[error("Unsupported cache url: {0}")]
    UnsupportedUrl(String),

    #[error("Cache is disabled")]
    Disabled,
}

impl From<redis::RedisError> for CacheError {
    /// Socket-level failures are `Connection`; error replies and
    /// undecodable responses from a live server are `Command`.
    fn from(e: redis::RedisError) -> Self {
        if e.is_io_error()
            || e.is_connection_dropped()
            || e.is_connection_refusal()
            || e.is_timeout()
        {
            CacheError::Connection(e)
        } else {
            CacheError::Command(e)
        }
    }
}

impl CacheError {
    /// Transport faults disable the cache for the rest of the process;
    /// everything else is reported and forgotten.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            CacheError::Connection(_) | CacheError::Unavailable(_) | CacheError::Timeout(_)
        )
    }
}
