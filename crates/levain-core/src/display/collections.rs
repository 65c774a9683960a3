//! Collection wrapper types for displaying groups of domain objects.
//!
//! This module provides wrapper types that format collections of domain objects
//! with consistent structure and empty collection handling.

use std::{fmt, ops::Index};

use crate::models::{RecipeSummary, Step};

/// Newtype wrapper for displaying a recipe list.
///
/// Formats each summary with its own Display implementation and prints a
/// placeholder line for an empty list. Titles are left to the caller.
///
/// # Examples
///
/// ```rust
/// use jiff::Timestamp;
/// use levain_core::{
///     display::RecipeSummaries,
///     models::{Difficulty, RecipeSummary},
/// };
///
/// let summary = RecipeSummary {
///     id: 1,
///     name: "Rye bread".to_string(),
///     info: "100% rye".to_string(),
///     is_favorite: true,
///     difficulty: Difficulty::Medium,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
///     step_count: 3,
///     ingredient_count: 7,
/// };
///
/// let summaries = RecipeSummaries(vec![summary]);
/// assert!(summaries.to_string().contains("Rye bread"));
/// ```
pub struct RecipeSummaries(pub Vec<RecipeSummary>);

impl RecipeSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of recipe summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the recipe summary at the given index.
    pub fn get(&self, index: usize) -> Option<&RecipeSummary> {
        self.0.get(index)
    }

    /// Get an iterator over the recipe summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, RecipeSummary> {
        self.0.iter()
    }
}

impl Index<usize> for RecipeSummaries {
    type Output = RecipeSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for RecipeSummaries {
    type Item = RecipeSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecipeSummaries {
    type Item = &'a RecipeSummary;
    type IntoIter = std::slice::Iter<'a, RecipeSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for RecipeSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No recipes found.")
        } else {
            for recipe in &self.0 {
                write!(f, "{recipe}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying a list of steps.
///
/// ```rust
/// use jiff::{SignedDuration, Timestamp};
/// use levain_core::{display::Steps, models::Step};
///
/// let step = Step {
///     id: 1,
///     recipe_id: 42,
///     super_step_id: None,
///     name: "Bulk ferment".to_string(),
///     duration: SignedDuration::from_hours(4),
///     temperature: 26,
///     is_dynamic_temperature: false,
///     second_temperature: 26,
///     notes: String::new(),
///     order: 0,
///     ingredients: vec![],
///     substep_ids: vec![],
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
/// let steps = Steps(vec![step]);
/// assert!(steps.to_string().contains("Bulk ferment"));
/// ```
pub struct Steps(pub Vec<Step>);

impl Steps {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of steps in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the step at the given index.
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.0.get(index)
    }

    /// Get an iterator over the steps.
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.0.iter()
    }
}

impl Index<usize> for Steps {
    type Output = Step;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for Steps {
    type Item = Step;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Steps {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Steps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No steps found.")
        } else {
            for step in &self.0 {
                writeln!(f, "{step}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};

    use super::*;
    use crate::models::Difficulty;

    fn create_test_summary() -> RecipeSummary {
        RecipeSummary {
            id: 1,
            name: "Test Recipe".to_string(),
            info: "A test recipe".to_string(),
            is_favorite: false,
            difficulty: Difficulty::Easy,
            created_at: Timestamp::from_second(1640995200).unwrap(), // 2022-01-01 00:00:00 UTC
            updated_at: Timestamp::from_second(1640995200).unwrap(),
            step_count: 3,
            ingredient_count: 5,
        }
    }

    fn create_test_step() -> Step {
        Step {
            id: 1,
            recipe_id: 1,
            super_step_id: None,
            name: "Test Step".to_string(),
            duration: SignedDuration::from_mins(45),
            temperature: 24,
            is_dynamic_temperature: false,
            second_temperature: 24,
            notes: "Keep covered".to_string(),
            order: 0,
            ingredients: vec![],
            substep_ids: vec![],
            created_at: Timestamp::from_second(1640995200).unwrap(),
            updated_at: Timestamp::from_second(1640995200).unwrap(),
        }
    }

    #[test]
    fn test_recipe_summaries_display() {
        let summaries = RecipeSummaries(vec![create_test_summary()]);
        let output = format!("{summaries}");
        assert!(output.contains("## Test Recipe (ID: 1)"));
        assert!(output.contains("**Steps**: 3, **Ingredients**: 5"));
        assert!(!output.contains("★"));

        let mut favorite = create_test_summary();
        favorite.id = 2;
        favorite.name = "Second Recipe".to_string();
        favorite.is_favorite = true;
        let summaries = RecipeSummaries(vec![create_test_summary(), favorite]);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[1].id, 2);
        let output = format!("{summaries}");
        assert!(output.contains("## Second Recipe (ID: 2) ★"));
        assert!(!output.starts_with("# "));
    }

    #[test]
    fn test_recipe_summaries_display_empty() {
        let summaries = RecipeSummaries(vec![]);
        assert!(summaries.is_empty());
        assert_eq!(format!("{summaries}"), "No recipes found.\n");
    }

    #[test]
    fn test_steps_display_empty() {
        assert_eq!(format!("{}", Steps(vec![])), "No steps found.\n");
    }

    #[test]
    fn test_steps_display_multiple_steps() {
        let mut second = create_test_step();
        second.id = 2;
        second.name = "Second Step".to_string();
        second.super_step_id = Some(1);
        second.is_dynamic_temperature = true;
        second.second_temperature = 28;

        let steps = Steps(vec![create_test_step(), second]);
        let output = format!("{steps}");

        assert!(output.contains("### 1. Test Step"));
        assert!(output.contains("- Duration: 45m"));
        assert!(output.contains("Keep covered"));
        assert!(output.contains("### 2. Second Step"));
        assert!(output.contains("- Substep of: 1"));
        assert!(output.contains("24 → 28 °C"));
        assert_eq!(steps.iter().count(), 2);
    }
}
