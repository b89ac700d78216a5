use crate::errors::StoreError;
use crate::validation::ValidatedTableName;
use crate::DbPool;
use std::sync::Arc;

/// SQL for one record table, rendered once from the validated table name
#[derive(Debug)]
pub(crate) struct RecordSql {
    pub(crate) create_table: String,
    pub(crate) list_all: String,
    pub(crate) insert: String,
    pub(crate) update: String,
    pub(crate) delete: String,
}

impl RecordSql {
    fn render(table: &ValidatedTableName) -> Self {
        Self {
            create_table: format!(
                "CREATE TABLE IF NOT EXISTS {} (\
                 id SERIAL PRIMARY KEY, \
                 name TEXT NOT NULL, \
                 email TEXT UNIQUE NOT NULL)",
                table
            ),
            list_all: format!("SELECT id, name, email FROM {} ORDER BY id", table),
            insert: format!(
                "INSERT INTO {} (name, email) VALUES ($1, $2) RETURNING id, name, email",
                table
            ),
            update: format!("UPDATE {} SET name = $1, email = $2 WHERE id = $3", table),
            delete: format!("DELETE FROM {} WHERE id = $1", table),
        }
    }
}

/// PostgreSQL-backed record store
#[derive(Clone)]
pub struct PgRecordStore {
    pub(crate) db_pool: DbPool,
    pub(crate) table: ValidatedTableName,
    pub(crate) sql: Arc<RecordSql>,
}

impl std::fmt::Debug for PgRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgRecordStore")
            .field("table", &self.table.as_str())
            .field("pool_size", &self.db_pool.size())
            .finish()
    }
}

impl PgRecordStore {
    /// Create a store over `table`; the name is validated before any SQL is built
    pub fn new(db_pool: DbPool, table: &str) -> Result<Self, StoreError> {
        let table = ValidatedTableName::new(table)?;
        let sql = Arc::new(RecordSql::render(&table));

        Ok(Self {
            db_pool,
            table,
            sql,
        })
    }

    pub fn table_name(&self) -> &str {
        self.table.as_str()
    }

    pub fn pool(&self) -> &DbPool {
        &self.db_pool
    }

    pub(crate) fn db_error(&self, operation: &'static str, source: sqlx::Error) -> StoreError {
        StoreError::database_operation(self.table.as_str(), operation, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rendered_sql() {
        let table = ValidatedTableName::new("users").unwrap();
        let sql = RecordSql::render(&table);

        assert_eq!(
            sql.create_table,
            "CREATE TABLE IF NOT EXISTS users (id SERIAL PRIMARY KEY, name TEXT NOT NULL, email TEXT UNIQUE NOT NULL)"
        );
        assert_eq!(sql.list_all, "SELECT id, name, email FROM users ORDER BY id");
        assert_eq!(
            sql.update,
            "UPDATE users SET name = $1, email = $2 WHERE id = $3"
        );
        assert_eq!(sql.delete, "DELETE FROM users WHERE id = $1");
    }

    #[tokio::test]
    async fn test_invalid_table_name_is_rejected() {
        // connect_lazy never touches the network
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();

        let result = PgRecordStore::new(pool.clone(), "users; DROP TABLE users");
        assert!(matches!(result, Err(StoreError::Validation(_))));

        let store = PgRecordStore::new(pool, "users").unwrap();
        assert_eq!(store.table_name(), "users");
        assert!(!store.pool().is_closed());
    }
}
