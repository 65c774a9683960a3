//! Plain-text plan export.
//!
//! Renders a scheduled recipe as the short text bakers paste into a message
//! or print next to the oven:
//!
//! ```text
//! Dough at 17.10.26, 18:00
//! Flour: 500 g
//! Water: 300 g 28° C
//! Levain: 200 g 28° C
//! Stretch and fold twice.
//! Finished: 17.10.26, 22:00
//! ```
//!
//! Only root steps get a block of their own; a substep shows up as a single
//! line of its total mass and end temperature. Wording comes from a
//! [`Locale`]; English and German are built in.

use std::{fmt, str::FromStr};

use jiff::{tz::TimeZone, SignedDuration};
use serde::{Deserialize, Serialize};

use super::datetime::ShortDateTime;
use crate::{
    models::{RecipeTree, ResolvedStep},
    solver::{required_temperature, CriticalPath, Schedule, Scheduler},
};

/// Words and unit formatting used by the text export.
pub trait Locale: Send + Sync {
    /// Joins a step name and its start date ("at")
    fn at(&self) -> &str;
    /// Label of the final line ("Finished")
    fn finished(&self) -> &str;
    fn start(&self) -> &str;
    fn end(&self) -> &str;
    /// Heading of the timetable ("Schedule")
    fn schedule(&self) -> &str;
    fn total(&self) -> &str;
    fn room_temperature(&self) -> &str;
    fn scale(&self) -> &str;
    fn critical_path(&self) -> &str;
    fn steps(&self) -> &str;
    fn no_steps(&self) -> &str;
    /// Joins a liquid amount and its temperature ("at")
    fn at_temperature(&self) -> &str;
    /// `n` minutes with the right plural
    fn minutes(&self, n: i64) -> String;
    /// `n` hours with the right plural
    fn hours(&self, n: i64) -> String;

    /// Whole hours and remaining minutes, e.g. "1 hour 30 minutes".
    fn duration(&self, duration: SignedDuration) -> String {
        let total = duration.as_mins();
        let (hours, minutes) = (total / 60, total % 60);
        match (hours, minutes) {
            (0, m) => self.minutes(m),
            (h, 0) => self.hours(h),
            (h, m) => format!("{} {}", self.hours(h), self.minutes(m)),
        }
    }
}

/// English wording.
#[derive(Debug, Clone, Copy, Default)]
pub struct English;

impl Locale for English {
    fn at(&self) -> &str {
        "at"
    }

    fn finished(&self) -> &str {
        "Finished"
    }

    fn start(&self) -> &str {
        "Start"
    }

    fn end(&self) -> &str {
        "End"
    }

    fn schedule(&self) -> &str {
        "Schedule"
    }

    fn total(&self) -> &str {
        "Total"
    }

    fn room_temperature(&self) -> &str {
        "Room temperature"
    }

    fn scale(&self) -> &str {
        "Scale"
    }

    fn critical_path(&self) -> &str {
        "Critical path"
    }

    fn steps(&self) -> &str {
        "Steps"
    }

    fn no_steps(&self) -> &str {
        "No steps in this recipe."
    }

    fn at_temperature(&self) -> &str {
        "at"
    }

    fn minutes(&self, n: i64) -> String {
        if n == 1 {
            "1 minute".to_string()
        } else {
            format!("{n} minutes")
        }
    }

    fn hours(&self, n: i64) -> String {
        if n == 1 {
            "1 hour".to_string()
        } else {
            format!("{n} hours")
        }
    }
}

/// German wording.
#[derive(Debug, Clone, Copy, Default)]
pub struct German;

impl Locale for German {
    fn at(&self) -> &str {
        "am"
    }

    fn finished(&self) -> &str {
        "Fertig"
    }

    fn start(&self) -> &str {
        "Start"
    }

    fn end(&self) -> &str {
        "Ende"
    }

    fn schedule(&self) -> &str {
        "Zeitplan"
    }

    fn total(&self) -> &str {
        "Gesamt"
    }

    fn room_temperature(&self) -> &str {
        "Raumtemperatur"
    }

    fn scale(&self) -> &str {
        "Faktor"
    }

    fn critical_path(&self) -> &str {
        "Kritischer Pfad"
    }

    fn steps(&self) -> &str {
        "Schritte"
    }

    fn no_steps(&self) -> &str {
        "Dieses Rezept hat keine Schritte."
    }

    fn at_temperature(&self) -> &str {
        "bei"
    }

    fn minutes(&self, n: i64) -> String {
        if n == 1 {
            "1 Minute".to_string()
        } else {
            format!("{n} Minuten")
        }
    }

    fn hours(&self, n: i64) -> String {
        if n == 1 {
            "1 Stunde".to_string()
        } else {
            format!("{n} Stunden")
        }
    }
}

/// Built-in locale selector, parsed from codes like `en` or `de`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    German,
}

impl Language {
    pub fn locale(&self) -> &'static dyn Locale {
        match self {
            Language::English => &English,
            Language::German => &German,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::German => "de",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" | "english" => Ok(Language::English),
            "de" | "german" | "deutsch" => Ok(Language::German),
            _ => Err(format!("Unsupported language: {s}. Must be 'en' or 'de'")),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Mass in grams with at most two decimals: `500 g`, `12.5 g`.
///
/// ```rust
/// use levain_core::display::export::format_amount;
///
/// assert_eq!(format_amount(500.0), "500 g");
/// assert_eq!(format_amount(12.5), "12.5 g");
/// assert_eq!(format_amount(1.0 / 3.0), "0.33 g");
/// ```
pub fn format_amount(grams: f64) -> String {
    let fixed = format!("{grams:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    let number = if trimmed == "-0" { "0" } else { trimmed };
    format!("{number} g")
}

/// Configurable renderer of the plain-text plan.
pub struct TextExport<'a> {
    room_temperature: i32,
    scale_factor: f64,
    locale: &'a dyn Locale,
    time_zone: TimeZone,
    critical_path: CriticalPath,
}

impl Default for TextExport<'static> {
    fn default() -> Self {
        Self {
            room_temperature: 20,
            scale_factor: 1.0,
            locale: &English,
            time_zone: TimeZone::system(),
            critical_path: CriticalPath::default(),
        }
    }
}

impl TextExport<'static> {
    /// English text, 20 °C room, unscaled, system time zone.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'a> TextExport<'a> {
    pub fn room_temperature(mut self, room_temperature: i32) -> Self {
        self.room_temperature = room_temperature;
        self
    }

    /// Factor every printed amount is multiplied with.
    pub fn scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    pub fn locale<'b>(self, locale: &'b dyn Locale) -> TextExport<'b> {
        TextExport {
            room_temperature: self.room_temperature,
            scale_factor: self.scale_factor,
            locale,
            time_zone: self.time_zone,
            critical_path: self.critical_path,
        }
    }

    pub fn time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    pub fn critical_path(mut self, critical_path: CriticalPath) -> Self {
        self.critical_path = critical_path;
        self
    }

    /// Schedule the tree and render it.
    pub fn render(&self, tree: &RecipeTree) -> String {
        let schedule = Scheduler::new(self.critical_path).schedule(tree);
        self.render_schedule(tree, &schedule)
    }

    /// Render with a schedule computed elsewhere.
    pub fn render_schedule(&self, tree: &RecipeTree, schedule: &Schedule) -> String {
        let mut text = String::new();
        for root in &tree.roots {
            self.write_root(&mut text, root, schedule);
        }
        text.push_str(&format!(
            "{}: {}",
            self.locale.finished(),
            ShortDateTime(&schedule.end, &self.time_zone)
        ));
        text
    }

    fn write_root(&self, text: &mut String, root: &ResolvedStep, schedule: &Schedule) {
        let start = schedule.start_of(root.id()).unwrap_or(schedule.start);
        text.push_str(&format!(
            "{} {} {}\n",
            root.step.display_name(),
            self.locale.at(),
            ShortDateTime(&start, &self.time_zone)
        ));

        for ingredient in &root.step.ingredients {
            let amount = format_amount(ingredient.amount * self.scale_factor);
            if ingredient.is_bulk_liquid() {
                let temperature = required_temperature(root, ingredient, self.room_temperature);
                text.push_str(&format!(
                    "{}: {amount} {temperature}° C\n",
                    ingredient.display_name()
                ));
            } else {
                text.push_str(&format!("{}: {amount}\n", ingredient.display_name()));
            }
        }

        for sub in &root.substeps {
            text.push_str(&format!(
                "{}: {} {}° C\n",
                sub.step.display_name(),
                format_amount(sub.total_amount() * self.scale_factor),
                sub.step.end_temperature()
            ));
        }

        if !root.step.notes.trim().is_empty() {
            text.push_str(root.step.notes.trim_end());
            text.push('\n');
        }
    }
}

/// Render the plain-text plan with English wording in the system time zone.
pub fn render_schedule_text(tree: &RecipeTree, room_temperature: i32, scale_factor: f64) -> String {
    TextExport::new()
        .room_temperature(room_temperature)
        .scale_factor(scale_factor)
        .render(tree)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::{Difficulty, Ingredient, IngredientKind, Recipe, Step};

    fn at(hour: i64) -> Timestamp {
        Timestamp::from_second(1_792_216_800 + hour * 3600).unwrap()
    }

    fn ingredient(
        id: u64,
        step_id: u64,
        name: &str,
        amount: f64,
        kind: IngredientKind,
    ) -> Ingredient {
        Ingredient {
            id,
            step_id,
            name: name.to_string(),
            amount,
            kind,
            order: id as u32,
        }
    }

    fn step(id: u64, name: &str, minutes: i64) -> Step {
        Step {
            id,
            recipe_id: 1,
            super_step_id: None,
            name: name.to_string(),
            duration: SignedDuration::from_mins(minutes),
            temperature: 24,
            is_dynamic_temperature: false,
            second_temperature: 24,
            notes: String::new(),
            order: 0,
            ingredients: Vec::new(),
            substep_ids: Vec::new(),
            created_at: at(0),
            updated_at: at(0),
        }
    }

    /// Levain (12 h, 24 → 28 °C) feeding a dough (4 h) that starts at 18:00 UTC.
    fn bread() -> RecipeTree {
        let mut levain = step(2, "Levain", 720);
        levain.super_step_id = Some(1);
        levain.is_dynamic_temperature = true;
        levain.second_temperature = 28;
        levain.ingredients = vec![
            ingredient(1, 2, "Rye flour", 100.0, IngredientKind::Flour),
            ingredient(2, 2, "Water", 100.0, IngredientKind::BulkLiquid),
        ];

        let mut dough = step(1, "Dough", 240);
        dough.substep_ids = vec![2];
        dough.notes = "Stretch and fold twice.".to_string();
        dough.ingredients = vec![
            ingredient(3, 1, "Flour", 500.0, IngredientKind::Flour),
            ingredient(4, 1, "Water", 300.0, IngredientKind::BulkLiquid),
        ];

        let recipe = Recipe {
            id: 1,
            name: "Country bread".to_string(),
            info: String::new(),
            is_favorite: false,
            difficulty: Difficulty::Medium,
            inverted: false,
            times: None,
            date: at(0),
            image_data: None,
            order: 0,
            created_at: at(0),
            updated_at: at(0),
            steps: vec![dough, levain],
        };
        RecipeTree::resolve(recipe).unwrap()
    }

    #[test]
    fn test_render_english() {
        let text = TextExport::new().time_zone(TimeZone::UTC).render(&bread());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Dough at 17.10.26, 18:00");
        assert_eq!(lines[1], "Flour: 500 g");
        // (24 × 1000 − 500 × 20 − 200 × 28) / 300
        assert_eq!(lines[2], "Water: 300 g 28° C");
        assert_eq!(lines[3], "Levain: 200 g 28° C");
        assert_eq!(lines[4], "Stretch and fold twice.");
        assert_eq!(lines[5], "Finished: 17.10.26, 22:00");
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_render_german_scaled() {
        let text = TextExport::new()
            .time_zone(TimeZone::UTC)
            .scale_factor(0.5)
            .room_temperature(22)
            .locale(&German)
            .render(&bread());

        assert!(text.starts_with("Dough am 17.10.26, 18:00\n"));
        assert!(text.contains("Flour: 250 g\n"));
        assert!(text.contains("Levain: 100 g 28° C\n"));
        assert!(text.ends_with("Fertig: 17.10.26, 22:00"));
    }

    #[test]
    fn test_render_schedule_text_convenience() {
        let text = render_schedule_text(&bread(), 20, 2.0);
        assert!(text.contains("Flour: 1000 g\n"));
        assert!(text.contains("Water: 600 g 28° C\n"));
    }

    #[test]
    fn test_render_empty_recipe() {
        let mut tree = bread();
        tree.roots.clear();
        let text = TextExport::new().time_zone(TimeZone::UTC).render(&tree);
        assert_eq!(text, "Finished: 17.10.26, 06:00");
    }

    #[test]
    fn test_locale_durations() {
        assert_eq!(English.duration(SignedDuration::from_mins(90)), "1 hour 30 minutes");
        assert_eq!(English.duration(SignedDuration::from_mins(1)), "1 minute");
        assert_eq!(German.duration(SignedDuration::from_mins(120)), "2 Stunden");
        assert_eq!(German.duration(SignedDuration::from_mins(61)), "1 Stunde 1 Minute");
    }

    #[test]
    fn test_language_parsing() {
        assert_eq!("DE".parse::<Language>(), Ok(Language::German));
        assert_eq!("english".parse::<Language>(), Ok(Language::English));
        assert!("fr".parse::<Language>().is_err());
        assert_eq!(Language::German.locale().finished(), "Fertig");
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.0), "0 g");
        assert_eq!(format_amount(12.346), "12.35 g");
        assert_eq!(format_amount(1000.10), "1000.1 g");
    }
}
