//! Store Object - record storage layer for UserHaus
//!
//! This crate provides the record model, the [`RecordStore`] contract and its
//! PostgreSQL and in-memory implementations.

pub mod errors;
pub mod memory_store;
pub mod model;
pub mod pg_store;
pub mod prelude;
pub mod traits;
pub mod validation;

pub use errors::StoreError;
pub use memory_store::MemoryRecordStore;
pub use model::{NewRecord, Record};
pub use pg_store::PgRecordStore;
pub use traits::RecordStore;
pub use validation::{ValidatedTableName, ValidationError};

use sqlx::PgPool;

pub type DbPool = PgPool;
