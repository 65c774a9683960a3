//! Recipe model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Difficulty, Step};

/// A recipe with its anchor date and (optionally loaded) steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    /// Unique identifier for the recipe
    pub id: u64,

    /// Name of the recipe
    pub name: String,

    /// Short free text about the recipe
    #[serde(default)]
    pub info: String,

    /// Whether the recipe is marked as favorite
    #[serde(default)]
    pub is_favorite: bool,

    /// How demanding the recipe is
    #[serde(default)]
    pub difficulty: Difficulty,

    /// When true `date` is the end of the schedule, otherwise its start
    #[serde(default)]
    pub inverted: bool,

    /// Number of pieces the amounts are written for (`None` means one)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub times: Option<f64>,

    /// Anchor date of the schedule
    pub date: Timestamp,

    /// Base64 encoded image payload
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,

    /// Position in the recipe list
    #[serde(default)]
    pub order: u32,

    /// Timestamp when the recipe was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the recipe was last modified (UTC)
    pub updated_at: Timestamp,

    /// All steps of the recipe, roots and substeps (loaded eagerly by the store)
    #[serde(default)]
    pub steps: Vec<Step>,
}

impl Recipe {
    /// Batch count, defaulting to one.
    pub fn times_or_default(&self) -> f64 {
        self.times.unwrap_or(1.0)
    }

    /// Name with a placeholder for blank names.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "unnamed recipe"
        } else {
            &self.name
        }
    }

    /// Copy of the recipe prepared for sharing: not inverted, not a favorite.
    pub fn neutralized_for_export(&self) -> Recipe {
        Recipe {
            inverted: false,
            is_favorite: false,
            ..self.clone()
        }
    }

    /// Root steps in stored order.
    pub fn root_steps(&self) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(|s| s.is_root())
    }
}
