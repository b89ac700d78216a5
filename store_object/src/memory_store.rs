//! In-memory record store
//!
//! Mirrors the PostgreSQL store's semantics: serial ids starting at 1,
//! insertion order, and a unique email column.

use crate::errors::StoreError;
use crate::model::{NewRecord, Record};
use crate::traits::RecordStore;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

const TABLE: &str = "memory";

#[derive(Debug, Default)]
struct MemoryTable {
    rows: Vec<Record>,
    last_id: i32,
}

/// Record store kept in process memory, for tests and database-less runs
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    table: RwLock<MemoryTable>,
    list_calls: AtomicUsize,
    unavailable: AtomicBool,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `list_all` reached this store
    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.table.read().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Make every following call fail like a lost database connection
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self, operation: &'static str) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::database_operation(
                TABLE,
                operation,
                sqlx::Error::PoolTimedOut,
            ));
        }
        Ok(())
    }

    fn read(&self, operation: &'static str) -> Result<RwLockReadGuard<'_, MemoryTable>, StoreError> {
        self.check_available(operation)?;
        self.table.read().map_err(|_| poisoned(operation))
    }

    fn write(
        &self,
        operation: &'static str,
    ) -> Result<RwLockWriteGuard<'_, MemoryTable>, StoreError> {
        self.check_available(operation)?;
        self.table.write().map_err(|_| poisoned(operation))
    }
}

fn poisoned(operation: &'static str) -> StoreError {
    StoreError::database_operation(
        TABLE,
        operation,
        sqlx::Error::Protocol("memory store lock poisoned".to_string()),
    )
}

fn duplicate_email(email: &str) -> StoreError {
    StoreError::ConstraintViolation {
        constraint: "users_email_key".to_string(),
        message: format!("duplicate key value violates unique constraint: email {}", email),
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        self.check_available("ensure_schema")
    }

    async fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.read("list_all")?.rows.clone())
    }

    async fn insert(&self, data: &NewRecord) -> Result<Record, StoreError> {
        data.validate()?;
        let mut table = self.write("insert")?;

        if table.rows.iter().any(|r| r.email == data.email) {
            return Err(duplicate_email(&data.email));
        }

        // Like a SERIAL column, ids are never reused
        table.last_id += 1;
        let record = data.clone().into_record(table.last_id);
        table.rows.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: i32, data: &NewRecord) -> Result<bool, StoreError> {
        data.validate()?;
        let mut table = self.write("update")?;

        if table
            .rows
            .iter()
            .any(|r| r.id != id && r.email == data.email)
        {
            return Err(duplicate_email(&data.email));
        }

        match table.rows.iter_mut().find(|r| r.id == id) {
            Some(row) => {
                row.name = data.name.clone();
                row.email = data.email.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let mut table = self.write("delete")?;
        let before = table.rows.len();
        table.rows.retain(|r| r.id != id);
        Ok(table.rows.len() < before)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        self.check_available("health_check")
    }
}
