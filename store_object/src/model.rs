//! Record types
//!
//! [`Record`] is a stored row; [`NewRecord`] is the validated payload for
//! inserts and updates.

use crate::validation::{require_field, ValidationError};
use serde::{Deserialize, Serialize};

/// A stored row. `id` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Record {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Field values for creating or replacing a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub name: String,
    pub email: String,
}

impl NewRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Build from optional request fields; both are required and non-blank
    pub fn from_parts(name: Option<String>, email: Option<String>) -> Result<Self, ValidationError> {
        require_field("name", name.as_deref())?;
        require_field("email", email.as_deref())?;

        Ok(Self {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
        })
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        require_field("name", Some(&self.name))?;
        require_field("email", Some(&self.email))
    }

    /// Attach a store-assigned id
    pub fn into_record(self, id: i32) -> Record {
        Record {
            id,
            name: self.name,
            email: self.email,
        }
    }
}
