//! Schema setup
//!
//! Runs once at startup before the server accepts requests.

use crate::core::UserHaus;
use crate::errors::UserHausError;

impl UserHaus {
    /// Create the record table if it is missing. Existing data is never touched.
    pub async fn migrate(&self) -> Result<(), UserHausError> {
        self.store().ensure_schema().await?;
        Ok(())
    }
}
