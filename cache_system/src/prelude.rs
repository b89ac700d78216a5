//! Convenience re-exports for common cache-system usage

// Core cache system components
pub use crate::backend::CacheBackend;
pub use crate::errors::CacheError;
pub use crate::handle::CacheHandle;
pub use crate::memory::MemoryCache;
pub use crate::null::NullCache;
pub use crate::params::CacheParams;
pub use crate::redis_cache::RedisCache;

// Re-export centralized config
pub use config::CacheConfig;

// Common external dependencies
pub use async_trait::async_trait;
pub use redis;
