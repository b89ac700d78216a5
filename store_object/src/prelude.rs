//! Convenience re-exports for common store-object usage

// Core traits
pub use crate::traits::RecordStore;

// Error types
pub use crate::errors::StoreError;

// Record model
pub use crate::model::{NewRecord, Record};

// Store implementations
pub use crate::memory_store::MemoryRecordStore;
pub use crate::pg_store::PgRecordStore;

// Validation
pub use crate::validation::{ValidatedTableName, ValidationError};

// Common external dependencies that are frequently used
pub use async_trait::async_trait;
pub use serde::{Deserialize, Serialize};
pub use sqlx::PgPool;
