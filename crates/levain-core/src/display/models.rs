//! Display implementations for domain models.
//!
//! All output is markdown for the terminal renderer and the MCP server.

use std::fmt;

use super::{
    datetime::{FriendlyDuration, LocalDateTime},
    export::format_amount,
    rows::{recipe_rows, Row},
};
use crate::models::{Difficulty, Ingredient, IngredientKind, Recipe, RecipeSummary, Step};

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for IngredientKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

fn temperature_text(temperature: i32, end_temperature: Option<i32>) -> String {
    match end_temperature {
        Some(end) => format!("{temperature} → {end} °C"),
        None => format!("{temperature} °C"),
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &Row) -> fmt::Result {
    match row {
        Row::Detail { label, value } => writeln!(f, "- {label}: {value}"),
        Row::Text(text) => {
            writeln!(f)?;
            writeln!(f, "{text}")?;
            writeln!(f)
        }
        Row::Step {
            id,
            depth,
            name,
            duration,
            temperature,
            end_temperature,
        } => {
            let hashes = "#".repeat((depth + 3).min(6));
            writeln!(f)?;
            writeln!(
                f,
                "{hashes} {id}. {name} ({}, {})",
                FriendlyDuration(*duration),
                temperature_text(*temperature, *end_temperature)
            )?;
            writeln!(f)
        }
        Row::Ingredient { name, amount, kind } => {
            writeln!(f, "- {name}: {} ({kind})", format_amount(*amount))
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.display_name())?;
        writeln!(f)?;

        let anchor = if self.inverted { "End" } else { "Start" };
        writeln!(f, "- {anchor}: {}", LocalDateTime(&self.date))?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        let rows = recipe_rows(self);
        let first_step = rows
            .iter()
            .position(|row| matches!(row, Row::Step { .. }))
            .unwrap_or(rows.len());

        for row in &rows[..first_step] {
            write_row(f, row)?;
        }

        if first_step == rows.len() {
            writeln!(f, "\nNo steps in this recipe.")?;
        } else {
            writeln!(f, "\n## Steps")?;
            for row in &rows[first_step..] {
                write_row(f, row)?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "### {}. {}", self.id, self.display_name())?;
        writeln!(f)?;

        writeln!(f, "- Duration: {}", FriendlyDuration(self.duration))?;
        let end = self
            .is_dynamic_temperature
            .then_some(self.second_temperature);
        writeln!(f, "- Temperature: {}", temperature_text(self.temperature, end))?;
        match self.super_step_id {
            Some(parent) => writeln!(f, "- Substep of: {parent}")?,
            None => writeln!(f, "- Recipe: {}", self.recipe_id)?,
        }
        if !self.substep_ids.is_empty() {
            let ids: Vec<String> = self.substep_ids.iter().map(u64::to_string).collect();
            writeln!(f, "- Substeps: {}", ids.join(", "))?;
        }

        if !self.ingredients.is_empty() {
            writeln!(f)?;
            writeln!(f, "#### Ingredients")?;
            writeln!(f)?;
            for ingredient in &self.ingredients {
                write!(f, "{ingredient}")?;
            }
        }

        if !self.notes.trim().is_empty() {
            writeln!(f)?;
            writeln!(f, "#### Notes")?;
            writeln!(f)?;
            writeln!(f, "{}", self.notes)?;
        }

        Ok(())
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "- {}. {}: {} ({})",
            self.id,
            self.display_name(),
            format_amount(self.amount),
            self.kind
        )
    }
}

impl fmt::Display for RecipeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let star = if self.is_favorite { " ★" } else { "" };
        let name = if self.name.trim().is_empty() {
            "unnamed recipe"
        } else {
            &self.name
        };
        writeln!(f, "## {name} (ID: {}){star}", self.id)?;
        writeln!(f)?;

        if !self.info.trim().is_empty() {
            writeln!(f, "- **Info**: {}", self.info)?;
        }
        writeln!(f, "- **Difficulty**: {}", self.difficulty)?;
        writeln!(
            f,
            "- **Steps**: {}, **Ingredients**: {}",
            self.step_count, self.ingredient_count
        )?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;

        Ok(())
    }
}
