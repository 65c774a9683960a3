//! Enumerations for ingredient categories and recipe difficulty.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Category of an ingredient as used by the dough temperature calculation.
///
/// Stored as a short lowercase string: `flour`, `bulk_liquid`, `other`, or
/// `ta<N>` for a starter culture at dough yield `N` (TA 150 is a stiff
/// starter with 50% hydration, TA 200 a liquid one with 100%).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(try_from = "String", into = "String")]
pub enum IngredientKind {
    /// Flour of any kind
    Flour,

    /// Starter culture at the given dough yield (TA)
    Starter { dough_yield: u16 },

    /// The liquid whose temperature gets adjusted (usually water)
    BulkLiquid,

    /// Anything else: salt, seeds, oil
    #[default]
    Other,
}

impl IngredientKind {
    /// Convert to the database string representation.
    pub fn as_string(&self) -> String {
        match self {
            IngredientKind::Flour => "flour".to_string(),
            IngredientKind::Starter { dough_yield } => format!("ta{dough_yield}"),
            IngredientKind::BulkLiquid => "bulk_liquid".to_string(),
            IngredientKind::Other => "other".to_string(),
        }
    }

    /// Human readable label.
    ///
    /// ```rust
    /// use levain_core::models::IngredientKind;
    ///
    /// assert_eq!(IngredientKind::Starter { dough_yield: 200 }.label(), "Starter TA 200");
    /// assert_eq!(IngredientKind::BulkLiquid.label(), "Bulk liquid");
    /// ```
    pub fn label(&self) -> String {
        match self {
            IngredientKind::Flour => "Flour".to_string(),
            IngredientKind::Starter { dough_yield } => format!("Starter TA {dough_yield}"),
            IngredientKind::BulkLiquid => "Bulk liquid".to_string(),
            IngredientKind::Other => "Other".to_string(),
        }
    }
}

impl FromStr for IngredientKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "flour" => Ok(IngredientKind::Flour),
            "bulk_liquid" | "bulkliquid" | "liquid" | "water" => Ok(IngredientKind::BulkLiquid),
            "other" => Ok(IngredientKind::Other),
            other => other
                .strip_prefix("ta")
                .map(|n| n.trim_start_matches('_'))
                .and_then(|n| n.parse::<u16>().ok())
                .filter(|dough_yield| *dough_yield >= 100)
                .map(|dough_yield| IngredientKind::Starter { dough_yield })
                .ok_or_else(|| format!("Invalid ingredient kind: {s}")),
        }
    }
}

impl TryFrom<String> for IngredientKind {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IngredientKind> for String {
    fn from(kind: IngredientKind) -> Self {
        kind.as_string()
    }
}

/// How demanding a recipe is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(format!("Invalid difficulty: {s}")),
        }
    }
}

impl Difficulty {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}
