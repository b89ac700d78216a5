//! `RecordStore` over PostgreSQL
//!
//! Unique-key violations surface as `StoreError::ConstraintViolation`;
//! every other driver failure is `StoreError::Database`.

use super::core::PgRecordStore;
use crate::errors::StoreError;
use crate::model::{NewRecord, Record};
use crate::traits::RecordStore;
use async_trait::async_trait;

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(&self.sql.create_table)
            .execute(&self.db_pool)
            .await
            .map_err(|e| self.db_error("ensure_schema", e))?;

        tracing::info!(table = self.table_name(), "Record table ready");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Record>, StoreError> {
        sqlx::query_as::<_, Record>(&self.sql.list_all)
            .fetch_all(&self.db_pool)
            .await
            .map_err(|e| self.db_error("list_all", e))
    }

    async fn insert(&self, data: &NewRecord) -> Result<Record, StoreError> {
        data.validate()?;

        sqlx::query_as::<_, Record>(&self.sql.insert)
            .bind(&data.name)
            .bind(&data.email)
            .fetch_one(&self.db_pool)
            .await
            .map_err(|e| self.db_error("insert", e))
    }

    async fn update(&self, id: i32, data: &NewRecord) -> Result<bool, StoreError> {
        data.validate()?;

        let result = sqlx::query(&self.sql.update)
            .bind(&data.name)
            .bind(&data.email)
            .bind(id)
            .execute(&self.db_pool)
            .await
            .map_err(|e| self.db_error("update", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i32) -> Result<bool, StoreError> {
        let result = sqlx::query(&self.sql.delete)
            .bind(id)
            .execute(&self.db_pool)
            .await
            .map_err(|e| self.db_error("delete", e))?;

        Ok(result.rows_affected() > 0)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.db_pool)
            .await
            .map_err(|e| self.db_error("health_check", e))?;
        Ok(())
    }
}
