//! Traits for record storage
//!
//! This module contains the traits that define the interface for database operations.

pub mod core;

pub use self::core::RecordStore;
