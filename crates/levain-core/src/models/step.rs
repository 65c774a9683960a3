//! Step model definition and related functionality.

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use super::Ingredient;

/// One stage of a recipe: a duration, a target temperature, ingredients, and
/// optionally substeps that have to be ready before this step is mixed.
///
/// Substeps live in the same table as every other step and point back to
/// their parent through `super_step_id`; `substep_ids` is resolved from the
/// store when the step is loaded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Step {
    /// Unique identifier for the step
    pub id: u64,

    /// ID of the owning recipe
    pub recipe_id: u64,

    /// ID of the step this one is a substep of (`None` for root steps)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_step_id: Option<u64>,

    /// Name of the step
    pub name: String,

    /// How long the step takes (always positive)
    pub duration: SignedDuration,

    /// Target temperature of the mixture in degrees Celsius
    pub temperature: i32,

    /// Whether the temperature changes linearly over the step
    #[serde(default)]
    pub is_dynamic_temperature: bool,

    /// Temperature at the end of the step, used when the temperature is dynamic
    pub second_temperature: i32,

    /// Free text notes
    #[serde(default)]
    pub notes: String,

    /// Position among its siblings (0-indexed)
    pub order: u32,

    /// Ingredients mixed in this step, in display order
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    /// IDs of direct substeps, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub substep_ids: Vec<u64>,

    /// Timestamp when the step was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the step was last updated (UTC)
    pub updated_at: Timestamp,
}

impl Step {
    /// Whether the step is a root step of its recipe.
    pub fn is_root(&self) -> bool {
        self.super_step_id.is_none()
    }

    /// Temperature the step has reached once it is done.
    pub fn end_temperature(&self) -> i32 {
        if self.is_dynamic_temperature {
            self.second_temperature
        } else {
            self.temperature
        }
    }

    /// Sum of the step's own ingredient amounts.
    pub fn total_amount(&self) -> f64 {
        self.ingredients.iter().map(|i| i.amount).sum()
    }

    /// Name with a placeholder for blank names.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "unnamed step"
        } else {
            &self.name
        }
    }
}
