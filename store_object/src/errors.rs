use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Constraint violation ({constraint}): {message}")]
    ConstraintViolation { constraint: String, message: String },

    #[error("Database error in {operation} on {table}: {source}")]
    Database {
        table: String,
        operation: &'static str,
        #[source]
        source: sqlx::Error,
    },
}

impl StoreError {
    /// Wrap a driver error, splitting unique-key violations out as their own kind
    pub fn database_operation(table: &str, operation: &'static str, source: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_error) = &source {
            if db_error.is_unique_violation() {
                return StoreError::ConstraintViolation {
                    constraint: db_error.constraint().unwrap_or("unique").to_string(),
                    message: db_error.message().to_string(),
                };
            }
        }

        StoreError::Database {
            table: table.to_string(),
            operation,
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Validation(_))
    }

    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, StoreError::ConstraintViolation { .. })
    }
}
