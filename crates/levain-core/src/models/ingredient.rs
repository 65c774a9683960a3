//! Ingredient model definition.

use serde::{Deserialize, Serialize};

use super::IngredientKind;

/// A named mass of something that goes into a step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    /// Unique identifier for the ingredient
    pub id: u64,

    /// ID of the step this ingredient is mixed into
    pub step_id: u64,

    /// Name of the ingredient
    pub name: String,

    /// Mass in grams (never negative)
    pub amount: f64,

    /// Category used by the temperature calculation
    #[serde(default)]
    pub kind: IngredientKind,

    /// Position of the ingredient within its step (0-indexed)
    #[serde(default)]
    pub order: u32,
}

impl Ingredient {
    /// Whether this ingredient is the liquid whose temperature is solved for.
    pub fn is_bulk_liquid(&self) -> bool {
        self.kind == IngredientKind::BulkLiquid
    }

    /// Name with a placeholder for blank names.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "unnamed ingredient"
        } else {
            &self.name
        }
    }
}
