//! Database operations and SQLite management for recipes, steps and
//! ingredients.
//!
//! Steps form a forest inside one flat `steps` table: a substep points to its
//! parent through `super_step_id`, and `step_order` is the position among
//! siblings (the recipe's roots, or the substeps of one parent). Deleting a
//! recipe or a step cascades through foreign keys.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod ingredient_queries;
pub mod migrations;
pub mod recipe_queries;
pub mod settings_queries;
pub mod step_queries;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Opens a private in-memory database, used by tests and dry runs.
    pub fn in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// Parses a stored RFC 3339 timestamp column.
pub(crate) fn timestamp_column(
    row: &rusqlite::Row,
    index: usize,
) -> rusqlite::Result<jiff::Timestamp> {
    row.get::<_, String>(index)?
        .parse::<jiff::Timestamp>()
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                index,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}
