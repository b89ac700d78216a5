//! Error types for the UserHaus crate
//!
//! Startup and wiring failures. Request-time failures are `StoreError`s,
//! translated to HTTP responses in [`crate::http::error`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UserHausError {
    #[error("Database connection error: {0}")]
    DatabaseConnection(#[from] sqlx::Error),

    #[error("Store error: {0}")]
    Store(#[from] store_object::StoreError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Telemetry initialization failed: {0}")]
    Telemetry(String),
}
