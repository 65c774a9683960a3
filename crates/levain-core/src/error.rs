//! Error types for the levain library.

use std::path::PathBuf;

use thiserror::Error;

/// Error type for every store, validation and facade operation.
///
/// The solvers in [`crate::solver`] never return errors; everything that can
/// go wrong is caught either by the store or by
/// [`RecipeTree::resolve`](crate::models::RecipeTree::resolve).
#[derive(Error, Debug)]
pub enum BakeryError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// Recipe not found for the given ID
    #[error("Recipe with ID {id} not found")]
    RecipeNotFound { id: u64 },
    /// Step not found for the given ID
    #[error("Step with ID {id} not found")]
    StepNotFound { id: u64 },
    /// Ingredient not found for the given ID
    #[error("Ingredient with ID {id} not found")]
    IngredientNotFound { id: u64 },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// The stored steps of a recipe do not form a valid forest
    #[error("Recipe {recipe_id} is malformed: {reason}")]
    MalformedRecipe { recipe_id: u64, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> BakeryError {
        BakeryError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> BakeryError {
        BakeryError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl BakeryError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Creates a malformed-recipe error for the given recipe.
    pub fn malformed(recipe_id: u64, reason: impl Into<String>) -> Self {
        Self::MalformedRecipe {
            recipe_id,
            reason: reason.into(),
        }
    }

    /// Wraps a `spawn_blocking` join failure.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        Self::Configuration {
            message: format!("Task join error: {error}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| BakeryError::database(message).with_source(e))
    }
}

/// Result type alias for levain operations
pub type Result<T> = std::result::Result<T, BakeryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_message_names_recipe() {
        let error = BakeryError::malformed(7, "step 3 has two parents");
        assert_eq!(
            error.to_string(),
            "Recipe 7 is malformed: step 3 has two parents"
        );
    }

    #[test]
    fn test_invalid_input_builder() {
        let error = BakeryError::invalid_input("duration").with_reason("must be positive");
        assert!(matches!(
            error,
            BakeryError::InvalidInput { ref field, .. } if field == "duration"
        ));
    }
}
