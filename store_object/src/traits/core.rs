//! Trait definitions
//!
//! This module defines the store contract the service layer depends on.

use crate::model::{NewRecord, Record};
use crate::StoreError;
use async_trait::async_trait;
use std::fmt::Debug;

/// Durable record repository. Owns the canonical data and enforces email
/// uniqueness; violations come back as [`StoreError::ConstraintViolation`].
#[async_trait]
pub trait RecordStore: Send + Sync + Debug {
    /// Create the backing table if it does not exist. Never drops data.
    async fn ensure_schema(&self) -> Result<(), StoreError>;

    /// All records in insertion order
    async fn list_all(&self) -> Result<Vec<Record>, StoreError>;

    /// Insert a record and return it with its assigned id
    async fn insert(&self, data: &NewRecord) -> Result<Record, StoreError>;

    /// Replace name and email of record `id`.
    /// Returns `false` when no such record exists, which is not an error.
    async fn update(&self, id: i32, data: &NewRecord) -> Result<bool, StoreError>;

    /// Delete record `id`. Returns `false` when no such record exists.
    async fn delete(&self, id: i32) -> Result<bool, StoreError>;

    /// Check that the store answers queries
    async fn health_check(&self) -> Result<(), StoreError>;
}
