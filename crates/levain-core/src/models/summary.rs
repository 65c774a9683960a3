//! Recipe summary types and functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Difficulty, Recipe};

/// Summary information about a recipe with step and ingredient counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeSummary {
    /// Recipe ID
    pub id: u64,
    /// Name of the recipe
    pub name: String,
    /// Short free text about the recipe
    pub info: String,
    /// Favorite flag
    pub is_favorite: bool,
    /// Difficulty
    pub difficulty: Difficulty,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Number of steps, substeps included
    pub step_count: u32,
    /// Number of ingredients across all steps
    pub ingredient_count: u32,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        let ingredient_count = recipe
            .steps
            .iter()
            .map(|step| step.ingredients.len() as u32)
            .sum();

        Self {
            id: recipe.id,
            name: recipe.name.clone(),
            info: recipe.info.clone(),
            is_favorite: recipe.is_favorite,
            difficulty: recipe.difficulty,
            created_at: recipe.created_at,
            updated_at: recipe.updated_at,
            step_count: recipe.steps.len() as u32,
            ingredient_count,
        }
    }
}
