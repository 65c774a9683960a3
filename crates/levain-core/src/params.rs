//! Parameter structures for levain operations
//!
//! Shared parameter structures used by every interface (CLI, MCP) without
//! framework-specific derives. Interface layers wrap or convert into these
//! types; the optional `schema` feature adds `JsonSchema` derives for the MCP
//! server.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Values that need parsing (durations, dates, ingredient kinds) travel as
//! strings and are checked by each structure's `validate` method, so that the
//! same rules apply whichever interface the request came from.
//!
//! Durations accept a bare number of minutes (`"90"`), the friendly format
//! (`"1h 30m"`, `"45 minutes"`) and ISO 8601 (`"PT1H30M"`). Dates accept
//! RFC 3339 timestamps (`"2026-10-17T08:00:00Z"`) or a civil date time
//! (`"2026-10-17 08:00"`) interpreted in the system time zone.

use std::str::FromStr;

use jiff::{civil::DateTime, tz::TimeZone, SignedDuration, Timestamp};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    display::export::Language,
    models::{Difficulty, IngredientKind},
    solver::CriticalPath,
    BakeryError, Result,
};

/// Temperature used for new steps when none is given, in degrees Celsius.
pub const DEFAULT_STEP_TEMPERATURE: i32 = 20;

/// Generic parameters for operations requiring just an ID.
///
/// Used for operations like show_recipe, delete_recipe, show_step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new recipe.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CreateRecipe {
    /// Name of the recipe (required)
    pub name: String,
    /// Short free text about the recipe
    pub info: Option<String>,
    /// Difficulty ('easy', 'medium' or 'hard'), defaults to easy
    pub difficulty: Option<String>,
    /// When true the date is the time the bread should be finished
    #[serde(default)]
    pub inverted: bool,
    /// Number of pieces the amounts are written for
    pub times: Option<f64>,
    /// Anchor date (RFC 3339 or 'YYYY-MM-DD HH:MM'), defaults to now
    pub date: Option<String>,
}

impl CreateRecipe {
    /// Validate creation parameters and return the parsed difficulty and
    /// anchor date.
    ///
    /// # Errors
    ///
    /// * `BakeryError::InvalidInput` - blank name, unknown difficulty,
    ///   non-positive batch count or unparsable date
    pub fn validate(&self) -> Result<(Difficulty, Option<Timestamp>)> {
        if self.name.trim().is_empty() {
            return Err(
                BakeryError::invalid_input("name").with_reason("Recipe name cannot be empty")
            );
        }
        let difficulty = match &self.difficulty {
            Some(value) => parse_difficulty(value)?,
            None => Difficulty::default(),
        };
        if let Some(times) = self.times {
            check_positive("times", times)?;
        }
        let date = self.date.as_deref().map(parse_date).transpose()?;
        Ok((difficulty, date))
    }
}

/// Parameters for listing recipes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListRecipes {
    /// Only list recipes marked as favorite
    #[serde(default)]
    pub favorites: bool,
    /// Only list recipes whose name contains this text (case-insensitive)
    pub name: Option<String>,
}

/// Parameters for updating an existing recipe.
///
/// Every field except `id` is optional; only the given ones change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateRecipe {
    /// Recipe ID to update (required)
    pub id: u64,
    /// New name
    pub name: Option<String>,
    /// New info text
    pub info: Option<String>,
    /// Mark or unmark as favorite
    pub favorite: Option<bool>,
    /// New difficulty ('easy', 'medium' or 'hard')
    pub difficulty: Option<String>,
    /// Whether the date is the end instead of the start
    pub inverted: Option<bool>,
    /// New batch count
    pub times: Option<f64>,
    /// New anchor date (RFC 3339 or 'YYYY-MM-DD HH:MM')
    pub date: Option<String>,
    /// New base64 encoded image
    pub image_data: Option<String>,
    /// Remove the batch count
    #[serde(default)]
    pub clear_times: bool,
    /// Remove the image
    #[serde(default)]
    pub clear_image: bool,
}

impl UpdateRecipe {
    /// Validate update parameters and return parsed difficulty, date and
    /// batch count.
    ///
    /// # Errors
    ///
    /// * `BakeryError::InvalidInput` - blank name, unknown difficulty,
    ///   unparsable date, non-positive batch count, or a value given together
    ///   with the flag that clears it
    ///
    /// # Examples
    ///
    /// ```rust
    /// use levain_core::params::UpdateRecipe;
    ///
    /// let params = UpdateRecipe {
    ///     id: 1,
    ///     difficulty: Some("hard".to_string()),
    ///     ..Default::default()
    /// };
    /// let (difficulty, date, times) = params.validate()?;
    /// assert!(difficulty.is_some());
    /// assert!(date.is_none() && times.is_none());
    ///
    /// let params = UpdateRecipe {
    ///     id: 1,
    ///     times: Some(2.0),
    ///     clear_times: true,
    ///     ..Default::default()
    /// };
    /// assert!(params.validate().is_err());
    /// # use levain_core::Result;
    /// # Result::<()>::Ok(())
    /// ```
    #[allow(clippy::type_complexity)]
    pub fn validate(&self) -> Result<(Option<Difficulty>, Option<Timestamp>, Option<f64>)> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(
                    BakeryError::invalid_input("name").with_reason("Recipe name cannot be empty")
                );
            }
        }
        if self.clear_times && self.times.is_some() {
            return Err(BakeryError::invalid_input("times")
                .with_reason("Cannot set and clear the batch count at the same time"));
        }
        if self.clear_image && self.image_data.is_some() {
            return Err(BakeryError::invalid_input("image_data")
                .with_reason("Cannot set and clear the image at the same time"));
        }

        let difficulty = self.difficulty.as_deref().map(parse_difficulty).transpose()?;
        let date = self.date.as_deref().map(parse_date).transpose()?;
        if let Some(times) = self.times {
            check_positive("times", times)?;
        }

        Ok((difficulty, date, self.times))
    }
}

/// Parameters for deleting several recipes at once.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DeleteRecipes {
    /// IDs of the recipes to delete
    pub ids: Vec<u64>,
}

/// Parameters for exporting recipes as a JSON bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ExportRecipes {
    /// IDs of the recipes to export; empty exports every recipe
    #[serde(default)]
    pub ids: Vec<u64>,
}

/// Parameters for creating a step.
///
/// Without `super_step_id` the step is appended to the recipe's root steps;
/// with it, the step becomes the last substep of that step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StepCreate {
    /// ID of the recipe to add the step to
    pub recipe_id: u64,
    /// ID of the step this one should become a substep of
    pub super_step_id: Option<u64>,
    /// Name of the step
    pub name: String,
    /// Duration ('90' minutes, '1h 30m' or 'PT1H30M')
    pub duration: String,
    /// Target temperature in degrees Celsius, defaults to 20
    pub temperature: Option<i32>,
    /// Whether the temperature changes over the step
    #[serde(default)]
    pub dynamic_temperature: bool,
    /// Temperature at the end of a dynamic step, defaults to the temperature
    pub second_temperature: Option<i32>,
    /// Free text notes
    pub notes: Option<String>,
}

impl StepCreate {
    /// Validate the parameters and return the parsed duration.
    ///
    /// # Errors
    ///
    /// * `BakeryError::InvalidInput` - unparsable or non-positive duration
    pub fn validate(&self) -> Result<SignedDuration> {
        parse_duration("duration", &self.duration)
    }

    /// Target temperature with the default applied.
    pub fn temperature_or_default(&self) -> i32 {
        self.temperature.unwrap_or(DEFAULT_STEP_TEMPERATURE)
    }

    /// End temperature: the explicit second temperature, else the target.
    pub fn second_temperature_or_default(&self) -> i32 {
        self.second_temperature
            .unwrap_or_else(|| self.temperature_or_default())
    }
}

/// Parameters for updating an existing step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateStep {
    /// Step ID to update (required)
    pub id: u64,
    /// New name
    pub name: Option<String>,
    /// New duration ('90' minutes, '1h 30m' or 'PT1H30M')
    pub duration: Option<String>,
    /// New target temperature
    pub temperature: Option<i32>,
    /// Turn the temperature change over the step on or off
    pub dynamic_temperature: Option<bool>,
    /// New end temperature
    pub second_temperature: Option<i32>,
    /// New notes
    pub notes: Option<String>,
}

impl UpdateStep {
    /// Validate step update parameters and return the parsed duration.
    ///
    /// # Errors
    ///
    /// * `BakeryError::InvalidInput` - unparsable or non-positive duration
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jiff::SignedDuration;
    /// use levain_core::params::UpdateStep;
    ///
    /// let params = UpdateStep {
    ///     id: 1,
    ///     duration: Some("1h 30m".to_string()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(params.validate()?, Some(SignedDuration::from_mins(90)));
    ///
    /// let params = UpdateStep {
    ///     id: 1,
    ///     duration: Some("0".to_string()),
    ///     ..Default::default()
    /// };
    /// assert!(params.validate().is_err());
    /// # use levain_core::Result;
    /// # Result::<()>::Ok(())
    /// ```
    pub fn validate(&self) -> Result<Option<SignedDuration>> {
        self.duration
            .as_deref()
            .map(|d| parse_duration("duration", d))
            .transpose()
    }
}

/// Parameters for moving a step under another parent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct MoveStep {
    /// ID of the step to move
    pub id: u64,
    /// New super step; `None` turns the step into a root step
    pub super_step_id: Option<u64>,
}

/// Parameters for swapping the order of two sibling steps.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SwapSteps {
    /// ID of the first step to swap
    pub step1_id: u64,
    /// ID of the second step to swap
    pub step2_id: u64,
}

/// Parameters for adding an ingredient to a step.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct IngredientCreate {
    /// ID of the step the ingredient goes into
    pub step_id: u64,
    /// Name of the ingredient
    pub name: String,
    /// Mass in grams
    pub amount: f64,
    /// Kind ('flour', 'bulk_liquid', 'ta200', 'other'), defaults to other
    pub kind: Option<String>,
}

impl IngredientCreate {
    /// Validate the parameters and return the parsed kind.
    ///
    /// # Errors
    ///
    /// * `BakeryError::InvalidInput` - negative or non-finite amount, unknown kind
    pub fn validate(&self) -> Result<IngredientKind> {
        check_amount(self.amount)?;
        match &self.kind {
            Some(kind) => parse_kind(kind),
            None => Ok(IngredientKind::default()),
        }
    }
}

/// Parameters for updating an ingredient.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateIngredient {
    /// Ingredient ID to update (required)
    pub id: u64,
    /// New name
    pub name: Option<String>,
    /// New mass in grams
    pub amount: Option<f64>,
    /// New kind ('flour', 'bulk_liquid', 'ta200', 'other')
    pub kind: Option<String>,
}

impl UpdateIngredient {
    /// Validate the parameters and return the parsed kind.
    ///
    /// # Errors
    ///
    /// * `BakeryError::InvalidInput` - negative or non-finite amount, unknown kind
    pub fn validate(&self) -> Result<Option<IngredientKind>> {
        if let Some(amount) = self.amount {
            check_amount(amount)?;
        }
        self.kind.as_deref().map(parse_kind).transpose()
    }
}

/// Parameters for scheduling a recipe or exporting its text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ScheduleRecipe {
    /// ID of the recipe
    pub id: u64,
    /// Room temperature in degrees Celsius, defaults to the stored setting
    pub room_temperature: Option<i32>,
    /// Factor all amounts are multiplied with, defaults to the recipe's batch count
    pub scale_factor: Option<f64>,
    /// How the critical substep is chosen ('longest' or 'first')
    pub critical_path: Option<String>,
    /// Language of the text export ('en' or 'de')
    pub language: Option<String>,
    /// IANA time zone for dates, defaults to the system time zone
    pub time_zone: Option<String>,
}

/// Parsed form of [`ScheduleRecipe`].
#[derive(Debug, Clone)]
pub struct ScheduleOptions {
    pub room_temperature: Option<i32>,
    /// Explicit scale; `None` scales by the recipe's batch count
    pub scale_factor: Option<f64>,
    pub critical_path: CriticalPath,
    pub language: Language,
    pub time_zone: TimeZone,
}

impl ScheduleRecipe {
    /// Validate the parameters.
    ///
    /// # Errors
    ///
    /// * `BakeryError::InvalidInput` - non-positive scale factor, unknown
    ///   critical path policy, language or time zone
    pub fn validate(&self) -> Result<ScheduleOptions> {
        if let Some(scale_factor) = self.scale_factor {
            check_positive("scale_factor", scale_factor)?;
        }

        let critical_path = match &self.critical_path {
            Some(policy) => CriticalPath::from_str(policy).map_err(|reason| {
                BakeryError::invalid_input("critical_path").with_reason(reason)
            })?,
            None => CriticalPath::default(),
        };
        let language = match &self.language {
            Some(code) => Language::from_str(code)
                .map_err(|reason| BakeryError::invalid_input("language").with_reason(reason))?,
            None => Language::default(),
        };
        let time_zone = match &self.time_zone {
            Some(name) => TimeZone::get(name).map_err(|e| {
                BakeryError::invalid_input("time_zone")
                    .with_reason(format!("Unknown time zone {name}: {e}"))
            })?,
            None => TimeZone::system(),
        };

        Ok(ScheduleOptions {
            room_temperature: self.room_temperature,
            scale_factor: self.scale_factor,
            critical_path,
            language,
            time_zone,
        })
    }
}

/// Parameters for changing the stored room temperature.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetRoomTemperature {
    /// Room temperature in degrees Celsius
    pub temperature: i32,
}

impl SetRoomTemperature {
    /// Reject temperatures no kitchen has.
    ///
    /// # Errors
    ///
    /// * `BakeryError::InvalidInput` - temperature outside -20..=60 °C
    pub fn validate(&self) -> Result<i32> {
        if !(-20..=60).contains(&self.temperature) {
            return Err(BakeryError::invalid_input("temperature").with_reason(format!(
                "Room temperature {} °C is outside -20..=60 °C",
                self.temperature
            )));
        }
        Ok(self.temperature)
    }
}

/// Parse a step duration; see the module docs for accepted formats.
///
/// Durations are stored in whole seconds, so fractions of a second are
/// rejected rather than truncated.
pub fn parse_duration(field: &str, value: &str) -> Result<SignedDuration> {
    let trimmed = value.trim();
    let duration = match trimmed.parse::<i64>() {
        Ok(minutes) => minutes
            .checked_mul(60)
            .map(SignedDuration::from_secs)
            .ok_or_else(|| {
                BakeryError::invalid_input(field)
                    .with_reason(format!("Duration of {minutes} minutes is too long"))
            })?,
        Err(_) => trimmed.parse::<SignedDuration>().map_err(|e| {
            BakeryError::invalid_input(field)
                .with_reason(format!("Invalid duration '{value}': {e}"))
        })?,
    };
    if duration <= SignedDuration::ZERO {
        return Err(BakeryError::invalid_input(field).with_reason("Duration must be positive"));
    }
    if duration.subsec_nanos() != 0 {
        return Err(BakeryError::invalid_input(field)
            .with_reason(format!("Duration '{value}' must be a whole number of seconds")));
    }
    Ok(duration)
}

/// Parse an anchor date; see the module docs for accepted formats.
pub fn parse_date(value: &str) -> Result<Timestamp> {
    let trimmed = value.trim();
    if let Ok(timestamp) = trimmed.parse::<Timestamp>() {
        return Ok(timestamp);
    }
    let invalid = |e: jiff::Error| {
        BakeryError::invalid_input("date").with_reason(format!("Invalid date '{value}': {e}"))
    };
    let civil = trimmed.parse::<DateTime>().map_err(invalid)?;
    let zoned = civil.to_zoned(TimeZone::system()).map_err(invalid)?;
    Ok(zoned.timestamp())
}

fn parse_difficulty(value: &str) -> Result<Difficulty> {
    Difficulty::from_str(value).map_err(|_| {
        BakeryError::invalid_input("difficulty").with_reason(format!(
            "Invalid difficulty: {value}. Must be 'easy', 'medium', or 'hard'"
        ))
    })
}

fn parse_kind(value: &str) -> Result<IngredientKind> {
    IngredientKind::from_str(value).map_err(|_| {
        BakeryError::invalid_input("kind").with_reason(format!(
            "Invalid kind: {value}. Must be 'flour', 'bulk_liquid', 'other' or 'ta<yield>'"
        ))
    })
}

fn check_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(BakeryError::invalid_input("amount")
            .with_reason(format!("Amount must be a non-negative number of grams, got {amount}")));
    }
    Ok(())
}

fn check_positive(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(BakeryError::invalid_input(field)
            .with_reason(format!("Must be positive, got {value}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(error: BakeryError) -> String {
        match error {
            BakeryError::InvalidInput { field, .. } => field,
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_duration_formats() {
        assert_eq!(parse_duration("d", "90").unwrap(), SignedDuration::from_mins(90));
        assert_eq!(parse_duration("d", "1h 30m").unwrap(), SignedDuration::from_mins(90));
        assert_eq!(parse_duration("d", "PT1H30M").unwrap(), SignedDuration::from_mins(90));
        assert_eq!(parse_duration("d", " 45m ").unwrap(), SignedDuration::from_mins(45));
    }

    #[test]
    fn test_parse_duration_rejects_non_positive_and_garbage() {
        assert_eq!(field_of(parse_duration("duration", "0").unwrap_err()), "duration");
        assert!(parse_duration("duration", "-10").is_err());
        assert!(parse_duration("duration", "soon").is_err());
    }

    #[test]
    fn test_parse_duration_rejects_overflowing_minutes() {
        let error = parse_duration("duration", "999999999999999999").unwrap_err();
        assert_eq!(field_of(error), "duration");
        assert!(parse_duration("duration", &i64::MAX.to_string()).is_err());
        assert_eq!(
            parse_duration("duration", "153722867280912930").unwrap(),
            SignedDuration::from_secs(153_722_867_280_912_930 * 60)
        );
    }

    #[test]
    fn test_parse_duration_rejects_fractional_seconds() {
        assert_eq!(field_of(parse_duration("duration", "0.5s").unwrap_err()), "duration");
        assert_eq!(field_of(parse_duration("duration", "90.5s").unwrap_err()), "duration");
        assert_eq!(parse_duration("duration", "90s").unwrap(), SignedDuration::from_secs(90));
    }

    #[test]
    fn test_parse_date_rfc3339() {
        let date = parse_date("2026-10-17T08:00:00Z").unwrap();
        assert_eq!(date.to_string(), "2026-10-17T08:00:00Z");
    }

    #[test]
    fn test_parse_date_civil() {
        assert!(parse_date("2026-10-17 08:00").is_ok());
        assert_eq!(field_of(parse_date("tomorrow").unwrap_err()), "date");
    }

    #[test]
    fn test_create_recipe_validate() {
        let params = CreateRecipe {
            name: "Rye".to_string(),
            difficulty: Some("medium".to_string()),
            ..Default::default()
        };
        let (difficulty, date) = params.validate().unwrap();
        assert_eq!(difficulty, Difficulty::Medium);
        assert!(date.is_none());

        let blank = CreateRecipe {
            name: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(field_of(blank.validate().unwrap_err()), "name");

        let bad_times = CreateRecipe {
            name: "Rye".to_string(),
            times: Some(0.0),
            ..Default::default()
        };
        assert_eq!(field_of(bad_times.validate().unwrap_err()), "times");
    }

    #[test]
    fn test_update_recipe_conflicting_flags() {
        let params = UpdateRecipe {
            id: 1,
            image_data: Some("aGVsbG8=".to_string()),
            clear_image: true,
            ..Default::default()
        };
        assert_eq!(field_of(params.validate().unwrap_err()), "image_data");
    }

    #[test]
    fn test_update_recipe_invalid_difficulty() {
        let params = UpdateRecipe {
            id: 1,
            difficulty: Some("extreme".to_string()),
            ..Default::default()
        };
        match params.validate().unwrap_err() {
            BakeryError::InvalidInput { field, reason } => {
                assert_eq!(field, "difficulty");
                assert!(reason.contains("Invalid difficulty: extreme"));
            }
            other => panic!("Expected InvalidInput error, got {other:?}"),
        }
    }

    #[test]
    fn test_step_create_defaults() {
        let params = StepCreate {
            recipe_id: 1,
            name: "Mix".to_string(),
            duration: "15m".to_string(),
            ..Default::default()
        };
        assert_eq!(params.validate().unwrap(), SignedDuration::from_mins(15));
        assert_eq!(params.temperature_or_default(), DEFAULT_STEP_TEMPERATURE);
        assert_eq!(params.second_temperature_or_default(), DEFAULT_STEP_TEMPERATURE);

        let warm = StepCreate {
            temperature: Some(26),
            ..params
        };
        assert_eq!(warm.second_temperature_or_default(), 26);
    }

    #[test]
    fn test_update_step_no_changes() {
        assert_eq!(UpdateStep::default().validate().unwrap(), None);
    }

    #[test]
    fn test_ingredient_create_validate() {
        let params = IngredientCreate {
            step_id: 1,
            name: "Water".to_string(),
            amount: 300.0,
            kind: Some("water".to_string()),
        };
        assert_eq!(params.validate().unwrap(), IngredientKind::BulkLiquid);

        let negative = IngredientCreate {
            amount: -1.0,
            ..params.clone()
        };
        assert_eq!(field_of(negative.validate().unwrap_err()), "amount");

        let unknown = IngredientCreate {
            kind: Some("sugar".to_string()),
            ..params
        };
        assert_eq!(field_of(unknown.validate().unwrap_err()), "kind");
    }

    #[test]
    fn test_update_ingredient_rejects_nan() {
        let params = UpdateIngredient {
            id: 1,
            amount: Some(f64::NAN),
            ..Default::default()
        };
        assert_eq!(field_of(params.validate().unwrap_err()), "amount");
    }

    #[test]
    fn test_schedule_recipe_validate() {
        let params = ScheduleRecipe {
            id: 1,
            critical_path: Some("first".to_string()),
            language: Some("de".to_string()),
            time_zone: Some("UTC".to_string()),
            ..Default::default()
        };
        let options = params.validate().unwrap();
        assert_eq!(options.critical_path, CriticalPath::FirstInOrder);
        assert_eq!(options.language, Language::German);
        assert_eq!(options.scale_factor, None);

        let bad = ScheduleRecipe {
            id: 1,
            scale_factor: Some(-2.0),
            ..Default::default()
        };
        assert_eq!(field_of(bad.validate().unwrap_err()), "scale_factor");

        let bad_zone = ScheduleRecipe {
            id: 1,
            time_zone: Some("Mars/Olympus".to_string()),
            ..Default::default()
        };
        assert_eq!(field_of(bad_zone.validate().unwrap_err()), "time_zone");
    }

    #[test]
    fn test_set_room_temperature_range() {
        assert_eq!(SetRoomTemperature { temperature: 22 }.validate().unwrap(), 22);
        assert!(SetRoomTemperature { temperature: 90 }.validate().is_err());
    }
}
