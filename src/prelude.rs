//! Convenience re-exports for common UserHaus usage
//!
//! # Example
//!
//! ```rust
//! use userhaus::prelude::*;
//! ```

// Core UserHaus components
pub use crate::core::UserHaus;
pub use crate::errors::UserHausError;
pub use crate::http::error::{ApiError, ApiResult, ErrorCode};
pub use crate::http::router;
pub use crate::service::CacheAsideService;

// Re-export centralized config
pub use config::{AppConfig, CacheConfig, DatabaseConfig, Environment, ServerConfig};

// Store and cache capabilities
pub use cache_system::prelude::*;
pub use store_object::prelude::*;

// Common external dependencies
pub use sqlx;
pub use tokio;
