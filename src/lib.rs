//! # UserHaus
//!
//! A small HTTP CRUD service over one PostgreSQL table, with an optional
//! cache-aside layer holding the full record list under a single key.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use userhaus::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!
//!     let userhaus = UserHaus::new(config).await?;
//!     userhaus.migrate().await?;
//!
//!     let service = userhaus.service();
//!     let created = service.create(NewRecord::new("Ana", "a@x.com")).await?;
//!     println!("Created record {}", created.id);
//!
//!     // Served from the store, then from the cache until a write or expiry
//!     let records = service.fetch_all(false).await?;
//!     println!("{} records", records.len());
//!
//!     Ok(())
//! }
//! ```

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub mod core;
pub mod errors;
pub mod http;
pub mod migration;
pub mod prelude;
pub mod service;
pub mod telemetry;

// Re-export the main public types for convenience
pub use crate::core::UserHaus;
pub use errors::UserHausError;
pub use service::CacheAsideService;

// Re-export centralized config
pub use config::{AppConfig, CacheConfig, DatabaseConfig, Environment, ServerConfig};

// Re-export internal crates used in the public API
pub use cache_system;
pub use store_object;

// Re-export external dependencies used in public API
pub use axum;
pub use sqlx;
