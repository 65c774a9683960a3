//! Result wrapper types for displaying operation outcomes.
//!
//! Create, update and delete results share one layout per resource kind, so
//! the wrappers are generic over [`Resource`].

use std::fmt;

use crate::models::{Ingredient, Recipe, Step};

/// A stored entity that operation results can talk about.
pub trait Resource {
    /// Lowercase noun used in messages ("recipe", "step")
    const KIND: &'static str;

    fn resource_id(&self) -> u64;

    /// Human readable name
    fn resource_name(&self) -> &str;
}

impl Resource for Recipe {
    const KIND: &'static str = "recipe";

    fn resource_id(&self) -> u64 {
        self.id
    }

    fn resource_name(&self) -> &str {
        self.display_name()
    }
}

impl Resource for Step {
    const KIND: &'static str = "step";

    fn resource_id(&self) -> u64 {
        self.id
    }

    fn resource_name(&self) -> &str {
        self.display_name()
    }
}

impl Resource for Ingredient {
    const KIND: &'static str = "ingredient";

    fn resource_id(&self) -> u64 {
        self.id
    }

    fn resource_name(&self) -> &str {
        self.display_name()
    }
}

/// Wrapper type for displaying the result of create operations.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use levain_core::{
///     display::CreateResult,
///     models::{Difficulty, Recipe},
/// };
///
/// let recipe = Recipe {
///     id: 1,
///     name: "Focaccia".to_string(),
///     info: String::new(),
///     is_favorite: false,
///     difficulty: Difficulty::Easy,
///     inverted: false,
///     times: None,
///     date: Timestamp::now(),
///     image_data: None,
///     order: 0,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     steps: vec![],
/// };
///
/// let result = CreateResult::new(recipe);
/// assert!(result.to_string().starts_with("Created recipe with ID: 1"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    /// Create a new CreateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Resource + fmt::Display> fmt::Display for CreateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Created {} with ID: {}",
            T::KIND,
            self.resource.resource_id()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of update operations, optionally
/// listing what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    /// Create a new UpdateResult wrapper.
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    /// Create an UpdateResult with a list of changes made.
    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: Resource + fmt::Display> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Updated {} with ID: {}",
            T::KIND,
            self.resource.resource_id()
        )?;

        if !self.changes.is_empty() {
            writeln!(f)?;
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
        }

        writeln!(f)?;
        write!(f, "{}", self.resource)
    }
}

/// Wrapper type for displaying the result of delete operations.
pub struct DeleteResult<T> {
    pub resource: T,
}

impl<T> DeleteResult<T> {
    /// Create a new DeleteResult wrapper.
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<T: Resource> fmt::Display for DeleteResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Deleted {} '{}' (ID: {})",
            T::KIND,
            self.resource.resource_name(),
            self.resource.resource_id()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::IngredientKind;

    fn water() -> Ingredient {
        Ingredient {
            id: 9,
            step_id: 3,
            name: "Water".to_string(),
            amount: 350.0,
            kind: IngredientKind::BulkLiquid,
            order: 0,
        }
    }

    #[test]
    fn test_create_result_display() {
        let output = CreateResult::new(water()).to_string();
        assert!(output.starts_with("Created ingredient with ID: 9\n"));
        assert!(output.contains("Water: 350 g (Bulk liquid)"));
    }

    #[test]
    fn test_update_result_lists_changes() {
        let output =
            UpdateResult::with_changes(water(), vec!["Updated amount".to_string()]).to_string();
        assert!(output.contains("Updated ingredient with ID: 9"));
        assert!(output.contains("Changes made:\n- Updated amount"));

        let output = UpdateResult::new(water()).to_string();
        assert!(!output.contains("Changes made:"));
    }

    #[test]
    fn test_delete_result_display() {
        let mut unnamed = water();
        unnamed.name = String::new();
        assert_eq!(
            DeleteResult::new(unnamed).to_string(),
            "Deleted ingredient 'unnamed ingredient' (ID: 9)\n"
        );
    }
}
