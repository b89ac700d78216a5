//! Cache system for the record snapshot
//!
//! This crate provides the optional cache capability: a backend trait with
//! Redis, in-memory and no-op implementations, and the fail-open
//! [`CacheHandle`] that callers talk to.

pub mod backend;
pub mod errors;
pub mod handle;
pub mod memory;
pub mod null;
pub mod params;
pub mod prelude;
pub mod redis_cache;

// Re-export centralized config
pub use config::CacheConfig;

pub use backend::CacheBackend;
pub use errors::CacheError;
pub use handle::CacheHandle;
pub use memory::MemoryCache;
pub use null::NullCache;
pub use params::CacheParams;
pub use redis_cache::RedisCache;
