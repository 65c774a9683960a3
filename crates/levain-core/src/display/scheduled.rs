//! A recipe together with its computed schedule and liquid temperatures.

use std::fmt;

use jiff::tz::TimeZone;

use super::{
    datetime::{ShortDateTime, ZonedDateTime},
    export::{format_amount, Language, TextExport},
};
use crate::{
    models::{RecipeTree, ResolvedStep},
    params::ScheduleOptions,
    solver::{bulk_liquid_temperatures, CriticalPath, Schedule, Scheduler},
};

/// Outcome of scheduling a recipe; displays as a markdown timetable.
#[derive(Debug, Clone)]
pub struct ScheduledRecipe {
    pub tree: RecipeTree,
    pub schedule: Schedule,
    pub room_temperature: i32,
    pub scale_factor: f64,
    pub critical_path: CriticalPath,
    pub language: Language,
    pub time_zone: TimeZone,
}

impl ScheduledRecipe {
    /// Schedule `tree` with the given options.
    ///
    /// Without an explicit scale factor the amounts are multiplied by the
    /// recipe's batch count.
    pub fn new(tree: RecipeTree, room_temperature: i32, options: &ScheduleOptions) -> Self {
        let schedule = Scheduler::new(options.critical_path).schedule(&tree);
        let scale_factor = options
            .scale_factor
            .unwrap_or_else(|| tree.recipe.times_or_default());
        Self {
            tree,
            schedule,
            room_temperature,
            scale_factor,
            critical_path: options.critical_path,
            language: options.language,
            time_zone: options.time_zone.clone(),
        }
    }

    /// The plain-text export of this schedule.
    pub fn text(&self) -> String {
        TextExport::new()
            .room_temperature(self.room_temperature)
            .scale_factor(self.scale_factor)
            .critical_path(self.critical_path)
            .time_zone(self.time_zone.clone())
            .locale(self.language.locale())
            .render_schedule(&self.tree, &self.schedule)
    }

    fn write_step(
        &self,
        f: &mut fmt::Formatter<'_>,
        step: &ResolvedStep,
        depth: usize,
    ) -> fmt::Result {
        let indent = "  ".repeat(depth);
        let locale = self.language.locale();
        match (self.schedule.start_of(step.id()), self.schedule.end_of(step)) {
            (Some(start), Some(end)) => writeln!(
                f,
                "{indent}- {} → {}: **{}** ({})",
                ShortDateTime(&start, &self.time_zone),
                ShortDateTime(&end, &self.time_zone),
                step.step.display_name(),
                locale.duration(step.duration())
            )?,
            _ => writeln!(f, "{indent}- **{}**", step.step.display_name())?,
        }

        let temperatures = bulk_liquid_temperatures(step, self.room_temperature);
        for ingredient in step.step.ingredients.iter().filter(|i| i.is_bulk_liquid()) {
            if let Some((_, temperature)) =
                temperatures.iter().find(|(id, _)| *id == ingredient.id)
            {
                writeln!(
                    f,
                    "{indent}  - {}: {} {} {temperature} °C",
                    ingredient.display_name(),
                    format_amount(ingredient.amount * self.scale_factor),
                    locale.at_temperature()
                )?;
            }
        }

        for sub in &step.substeps {
            self.write_step(f, sub, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for ScheduledRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let locale = self.language.locale();
        writeln!(
            f,
            "# {}: {}",
            locale.schedule(),
            self.tree.recipe.display_name()
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "- {}: {}",
            locale.start(),
            ZonedDateTime(&self.schedule.start, &self.time_zone)
        )?;
        writeln!(
            f,
            "- {}: {}",
            locale.end(),
            ZonedDateTime(&self.schedule.end, &self.time_zone)
        )?;
        writeln!(
            f,
            "- {}: {}",
            locale.total(),
            locale.duration(self.schedule.total_duration)
        )?;
        writeln!(
            f,
            "- {}: {} °C",
            locale.room_temperature(),
            self.room_temperature
        )?;
        if self.scale_factor != 1.0 {
            writeln!(f, "- {}: ×{}", locale.scale(), self.scale_factor)?;
        }
        writeln!(f, "- {}: {}", locale.critical_path(), self.critical_path)?;

        if self.tree.roots.is_empty() {
            writeln!(f, "\n{}", locale.no_steps())?;
            return Ok(());
        }

        writeln!(f, "\n## {}", locale.steps())?;
        writeln!(f)?;
        for root in &self.tree.roots {
            self.write_step(f, root, 0)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::{SignedDuration, Timestamp};

    use super::*;
    use crate::models::{Difficulty, Ingredient, IngredientKind, Recipe, Step};

    fn options(language: Language) -> ScheduleOptions {
        ScheduleOptions {
            room_temperature: None,
            scale_factor: None,
            critical_path: CriticalPath::Longest,
            language,
            time_zone: TimeZone::UTC,
        }
    }

    fn tree() -> RecipeTree {
        let anchor: Timestamp = "2026-10-17T20:00:00Z".parse().unwrap();
        let step = Step {
            id: 1,
            recipe_id: 1,
            super_step_id: None,
            name: "Dough".to_string(),
            duration: SignedDuration::from_mins(90),
            temperature: 24,
            is_dynamic_temperature: false,
            second_temperature: 24,
            notes: String::new(),
            order: 0,
            ingredients: vec![
                Ingredient {
                    id: 1,
                    step_id: 1,
                    name: "Flour".to_string(),
                    amount: 500.0,
                    kind: IngredientKind::Flour,
                    order: 0,
                },
                Ingredient {
                    id: 2,
                    step_id: 1,
                    name: "Water".to_string(),
                    amount: 300.0,
                    kind: IngredientKind::BulkLiquid,
                    order: 1,
                },
            ],
            substep_ids: vec![],
            created_at: anchor,
            updated_at: anchor,
        };
        let recipe = Recipe {
            id: 1,
            name: "Baguette".to_string(),
            info: String::new(),
            is_favorite: false,
            difficulty: Difficulty::Hard,
            inverted: true,
            times: None,
            date: anchor,
            image_data: None,
            order: 0,
            created_at: anchor,
            updated_at: anchor,
            steps: vec![step],
        };
        RecipeTree::resolve(recipe).unwrap()
    }

    #[test]
    fn test_scheduled_recipe_markdown() {
        let scheduled = ScheduledRecipe::new(tree(), 20, &options(Language::English));
        let output = scheduled.to_string();

        assert!(output.contains("# Schedule: Baguette"));
        assert!(output.contains("- Start: 2026-10-17 18:30:00 UTC"));
        assert!(output.contains("- End: 2026-10-17 20:00:00 UTC"));
        assert!(output.contains("- Total: 1 hour 30 minutes"));
        assert!(output.contains("- 17.10.26, 18:30 → 17.10.26, 20:00: **Dough**"));
        assert!(output.contains("  - Water: 300 g at 30 °C"));
        assert!(!output.contains("Scale"));
    }

    #[test]
    fn test_scheduled_recipe_text_uses_language() {
        let scheduled = ScheduledRecipe::new(tree(), 20, &options(Language::German));
        assert_eq!(
            scheduled.text(),
            "Dough am 17.10.26, 18:30\nFlour: 500 g\nWater: 300 g 30° C\nFertig: 17.10.26, 20:00"
        );
        assert!(scheduled.to_string().contains("- Ende: 2026-10-17 20:00:00 UTC"));
    }

    #[test]
    fn test_scheduled_recipe_markdown_in_german() {
        let output = ScheduledRecipe::new(tree(), 20, &options(Language::German)).to_string();

        assert!(output.contains("# Zeitplan: Baguette"));
        assert!(output.contains("- Gesamt: 1 Stunde 30 Minuten"));
        assert!(output.contains("- Raumtemperatur: 20 °C"));
        assert!(output.contains("- Kritischer Pfad: longest"));
        assert!(output.contains("## Schritte"));
        assert!(output.contains("  - Water: 300 g bei 30 °C"));
        for english in ["Schedule", "Total", "Room temperature", "Critical path", " at "] {
            assert!(!output.contains(english), "unexpected {english:?} in {output}");
        }
    }

    #[test]
    fn test_batch_count_scales_amounts_by_default() {
        let mut tree = tree();
        tree.recipe.times = Some(2.0);

        let scheduled = ScheduledRecipe::new(tree.clone(), 20, &options(Language::English));
        assert_eq!(scheduled.scale_factor, 2.0);
        assert!(scheduled.text().contains("Flour: 1000 g"));
        assert!(scheduled.to_string().contains("- Scale: ×2"));

        let explicit = ScheduleOptions {
            scale_factor: Some(0.5),
            ..options(Language::English)
        };
        let scheduled = ScheduledRecipe::new(tree, 20, &explicit);
        assert!(scheduled.text().contains("Flour: 250 g"));
    }
}
