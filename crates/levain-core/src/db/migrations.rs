//! Database schema initialization.

use crate::error::{DatabaseResultExt, Result};

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    ///
    /// Every statement is `IF NOT EXISTS`, so opening an existing database
    /// leaves its data untouched.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Cascading deletes of steps and ingredients rely on this
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")
    }
}
