//! Command-line argument definitions using clap
//!
//! Every command has a clap wrapper that converts into the matching core
//! parameter type, keeping clap attributes out of `levain-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Bakery
//! ```
//!
//! Validation of values (durations, dates, kinds) is left to the core
//! parameter types so the CLI and the MCP server reject the same input.

use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use levain_core::params::*;

/// Plan baking schedules and dough temperatures
///
/// Levain stores recipes made of steps (with optional substeps such as a
/// levain or a poolish) and ingredients. From a recipe's start or end date it
/// computes when every step begins and how warm the water must be for the
/// dough to reach its target temperature.
#[derive(Parser)]
#[command(version, about, name = "levain")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/levain/levain.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands. Without a command, recipes are listed.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage recipes
    #[command(alias = "r")]
    Recipe {
        #[command(subcommand)]
        command: RecipeCommands,
    },
    /// Manage steps within recipes
    #[command(alias = "s")]
    Step {
        #[command(subcommand)]
        command: StepCommands,
    },
    /// Manage ingredients within steps
    #[command(alias = "i")]
    Ingredient {
        #[command(subcommand)]
        command: IngredientCommands,
    },
    /// Show or change settings
    Settings {
        #[command(subcommand)]
        command: SettingsCommands,
    },
    /// Start the MCP server
    Serve,
}

// ============================================================================
// Recipes
// ============================================================================

/// Create a new recipe
#[derive(ClapArgs)]
pub struct CreateRecipeArgs {
    /// Name of the recipe
    pub name: String,
    #[arg(long, help = "Short free text about the recipe")]
    pub info: Option<String>,
    #[arg(short, long, value_enum, help = "Difficulty of the recipe")]
    pub difficulty: Option<DifficultyArg>,
    #[arg(long, help = "Treat the date as the time the bread should be finished")]
    pub inverted: bool,
    #[arg(long, help = "Number of pieces the amounts are written for")]
    pub times: Option<f64>,
    #[arg(
        long,
        help = "Start date, or end date with --inverted (RFC 3339 or 'YYYY-MM-DD HH:MM')"
    )]
    pub date: Option<String>,
}

impl From<CreateRecipeArgs> for CreateRecipe {
    fn from(val: CreateRecipeArgs) -> Self {
        CreateRecipe {
            name: val.name,
            info: val.info,
            difficulty: val.difficulty.map(|d| d.to_string()),
            inverted: val.inverted,
            times: val.times,
            date: val.date,
        }
    }
}

/// List recipes
#[derive(ClapArgs)]
pub struct ListRecipesArgs {
    #[arg(short, long, help = "Only list favorite recipes")]
    pub favorites: bool,
    #[arg(short, long, help = "Only list recipes whose name contains this text")]
    pub name: Option<String>,
}

impl From<ListRecipesArgs> for ListRecipes {
    fn from(val: ListRecipesArgs) -> Self {
        ListRecipes {
            favorites: val.favorites,
            name: val.name,
        }
    }
}

/// A command that only needs the ID of a recipe, step or ingredient
#[derive(ClapArgs)]
pub struct IdArgs {
    #[arg(help = "Unique identifier of the resource")]
    pub id: u64,
}

impl From<IdArgs> for Id {
    fn from(val: IdArgs) -> Self {
        Id { id: val.id }
    }
}

/// Update a recipe
#[derive(ClapArgs)]
pub struct UpdateRecipeArgs {
    #[arg(help = "Unique identifier of the recipe to update")]
    pub id: u64,
    #[arg(short, long, help = "New name")]
    pub name: Option<String>,
    #[arg(long, help = "New info text")]
    pub info: Option<String>,
    #[arg(short, long, value_enum, help = "New difficulty")]
    pub difficulty: Option<DifficultyArg>,
    #[arg(long, help = "Whether the date is the end instead of the start")]
    pub inverted: Option<bool>,
    #[arg(long, help = "New batch count", conflicts_with = "clear_times")]
    pub times: Option<f64>,
    #[arg(long, help = "Remove the batch count")]
    pub clear_times: bool,
    #[arg(long, help = "New date (RFC 3339 or 'YYYY-MM-DD HH:MM')")]
    pub date: Option<String>,
    #[arg(long, help = "Remove the image")]
    pub clear_image: bool,
}

impl From<UpdateRecipeArgs> for UpdateRecipe {
    fn from(val: UpdateRecipeArgs) -> Self {
        UpdateRecipe {
            id: val.id,
            name: val.name,
            info: val.info,
            favorite: None,
            difficulty: val.difficulty.map(|d| d.to_string()),
            inverted: val.inverted,
            times: val.times,
            date: val.date,
            image_data: None,
            clear_times: val.clear_times,
            clear_image: val.clear_image,
        }
    }
}

/// Delete one or more recipes with their steps and ingredients
#[derive(ClapArgs)]
pub struct DeleteRecipesArgs {
    #[arg(required = true, help = "Identifiers of the recipes to delete")]
    pub ids: Vec<u64>,
    /// Confirm the deletion (required to prevent accidental deletion)
    #[arg(long)]
    pub confirm: bool,
}

impl From<DeleteRecipesArgs> for DeleteRecipes {
    fn from(val: DeleteRecipesArgs) -> Self {
        DeleteRecipes { ids: val.ids }
    }
}

/// Options shared by `recipe schedule` and `recipe text`
#[derive(ClapArgs)]
pub struct ScheduleArgs {
    #[arg(help = "Unique identifier of the recipe")]
    pub id: u64,
    #[arg(
        short,
        long,
        help = "Room temperature in °C, defaults to the stored setting",
        allow_negative_numbers = true
    )]
    pub room_temperature: Option<i32>,
    #[arg(
        short,
        long,
        help = "Multiply every amount by this factor [default: the recipe's batch count]"
    )]
    pub scale: Option<f64>,
    #[arg(long, value_enum, help = "How the substep that ends last is chosen")]
    pub critical_path: Option<CriticalPathArg>,
    #[arg(short, long, value_enum, help = "Language of the text export")]
    pub language: Option<LanguageArg>,
    #[arg(long, help = "IANA time zone, defaults to the system time zone")]
    pub time_zone: Option<String>,
}

impl From<ScheduleArgs> for ScheduleRecipe {
    fn from(val: ScheduleArgs) -> Self {
        ScheduleRecipe {
            id: val.id,
            room_temperature: val.room_temperature,
            scale_factor: val.scale,
            critical_path: val.critical_path.map(|c| c.to_string()),
            language: val.language.map(|l| l.to_string()),
            time_zone: val.time_zone,
        }
    }
}

/// Export recipes as a JSON bundle
#[derive(ClapArgs)]
pub struct ExportArgs {
    #[arg(help = "Identifiers of the recipes to export; all recipes when omitted")]
    pub ids: Vec<u64>,
    #[arg(short, long, help = "Write the bundle to this file instead of stdout")]
    pub output: Option<PathBuf>,
}

impl From<&ExportArgs> for ExportRecipes {
    fn from(val: &ExportArgs) -> Self {
        ExportRecipes {
            ids: val.ids.clone(),
        }
    }
}

/// Import recipes from a JSON bundle
#[derive(ClapArgs)]
pub struct ImportArgs {
    #[arg(help = "Bundle file written by 'recipe export'")]
    pub file: PathBuf,
}

#[derive(Subcommand)]
pub enum RecipeCommands {
    /// Create a new recipe
    #[command(alias = "c")]
    Create(CreateRecipeArgs),
    /// List recipes
    #[command(aliases = ["l", "ls"])]
    List(ListRecipesArgs),
    /// Show a recipe with all its steps and ingredients
    #[command(alias = "s")]
    Show(IdArgs),
    /// Update a recipe
    #[command(alias = "u")]
    Update(UpdateRecipeArgs),
    /// Delete recipes permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteRecipesArgs),
    /// Mark or unmark a recipe as favorite
    #[command(alias = "f")]
    Favorite(IdArgs),
    /// Show when every step starts and how warm the water must be
    Schedule(ScheduleArgs),
    /// Print the plain-text plan
    #[command(alias = "t")]
    Text(ScheduleArgs),
    /// Export recipes as a JSON bundle
    Export(ExportArgs),
    /// Import recipes from a JSON bundle
    Import(ImportArgs),
}

// ============================================================================
// Steps
// ============================================================================

/// Add a step to a recipe, or a substep to a step
#[derive(ClapArgs)]
pub struct AddStepArgs {
    #[arg(help = "Unique identifier of the recipe to add this step to")]
    pub recipe_id: u64,
    /// Name of the step
    pub name: String,
    #[arg(short, long, help = "Duration ('90' minutes, '1h 30m' or 'PT1H30M')")]
    pub duration: String,
    #[arg(
        short,
        long,
        help = "Target temperature in °C (default 20)",
        allow_negative_numbers = true
    )]
    pub temperature: Option<i32>,
    #[arg(long, help = "The temperature changes over the step")]
    pub dynamic: bool,
    #[arg(long, help = "Temperature at the end of a dynamic step")]
    pub end_temperature: Option<i32>,
    #[arg(long, help = "Make the new step a substep of this step")]
    pub parent: Option<u64>,
    #[arg(short, long, help = "Free text notes")]
    pub notes: Option<String>,
}

impl From<AddStepArgs> for StepCreate {
    fn from(val: AddStepArgs) -> Self {
        StepCreate {
            recipe_id: val.recipe_id,
            super_step_id: val.parent,
            name: val.name,
            duration: val.duration,
            temperature: val.temperature,
            dynamic_temperature: val.dynamic,
            second_temperature: val.end_temperature,
            notes: val.notes,
        }
    }
}

/// Update a step
#[derive(ClapArgs)]
pub struct UpdateStepArgs {
    #[arg(help = "Unique identifier of the step to update")]
    pub id: u64,
    #[arg(short, long, help = "New name")]
    pub name: Option<String>,
    #[arg(short, long, help = "New duration ('90' minutes, '1h 30m' or 'PT1H30M')")]
    pub duration: Option<String>,
    #[arg(short, long, help = "New target temperature in °C", allow_negative_numbers = true)]
    pub temperature: Option<i32>,
    #[arg(long, help = "Turn the temperature change over the step on or off")]
    pub dynamic: Option<bool>,
    #[arg(long, help = "New temperature at the end of a dynamic step")]
    pub end_temperature: Option<i32>,
    #[arg(long, help = "New notes")]
    pub notes: Option<String>,
}

impl From<UpdateStepArgs> for UpdateStep {
    fn from(val: UpdateStepArgs) -> Self {
        UpdateStep {
            id: val.id,
            name: val.name,
            duration: val.duration,
            temperature: val.temperature,
            dynamic_temperature: val.dynamic,
            second_temperature: val.end_temperature,
            notes: val.notes,
        }
    }
}

/// Move a step under another step or back to the recipe's root steps
#[derive(ClapArgs)]
pub struct MoveStepArgs {
    #[arg(help = "Unique identifier of the step to move")]
    pub id: u64,
    #[arg(long, help = "New super step; omit to make it a root step")]
    pub parent: Option<u64>,
}

impl From<MoveStepArgs> for MoveStep {
    fn from(val: MoveStepArgs) -> Self {
        MoveStep {
            id: val.id,
            super_step_id: val.parent,
        }
    }
}

/// Swap the order of two sibling steps
#[derive(ClapArgs)]
pub struct SwapStepsArgs {
    #[arg(help = "Unique identifier of the first step to swap")]
    pub step1_id: u64,
    #[arg(help = "Unique identifier of the second step to swap")]
    pub step2_id: u64,
}

impl From<SwapStepsArgs> for SwapSteps {
    fn from(val: SwapStepsArgs) -> Self {
        SwapSteps {
            step1_id: val.step1_id,
            step2_id: val.step2_id,
        }
    }
}

#[derive(Subcommand)]
pub enum StepCommands {
    /// Add a step to a recipe
    #[command(alias = "a")]
    Add(AddStepArgs),
    /// Show a step with its ingredients
    #[command(alias = "s")]
    Show(IdArgs),
    /// Update a step
    #[command(alias = "u")]
    Update(UpdateStepArgs),
    /// Move a step under another parent
    #[command(alias = "m")]
    Move(MoveStepArgs),
    /// Swap the order of two sibling steps
    #[command(alias = "sw")]
    Swap(SwapStepsArgs),
    /// Remove a step with its substeps and ingredients
    #[command(aliases = ["d", "rm"])]
    Remove(IdArgs),
}

// ============================================================================
// Ingredients
// ============================================================================

/// Add an ingredient to a step
#[derive(ClapArgs)]
pub struct AddIngredientArgs {
    #[arg(help = "Unique identifier of the step to add the ingredient to")]
    pub step_id: u64,
    /// Name of the ingredient
    pub name: String,
    /// Mass in grams
    pub amount: f64,
    #[arg(
        short,
        long,
        help = "Kind: flour, bulk_liquid, other or ta<yield> such as ta200 (default other)"
    )]
    pub kind: Option<String>,
}

impl From<AddIngredientArgs> for IngredientCreate {
    fn from(val: AddIngredientArgs) -> Self {
        IngredientCreate {
            step_id: val.step_id,
            name: val.name,
            amount: val.amount,
            kind: val.kind,
        }
    }
}

/// Update an ingredient
#[derive(ClapArgs)]
pub struct UpdateIngredientArgs {
    #[arg(help = "Unique identifier of the ingredient to update")]
    pub id: u64,
    #[arg(short, long, help = "New name")]
    pub name: Option<String>,
    #[arg(short, long, help = "New mass in grams")]
    pub amount: Option<f64>,
    #[arg(short, long, help = "New kind")]
    pub kind: Option<String>,
}

impl From<UpdateIngredientArgs> for UpdateIngredient {
    fn from(val: UpdateIngredientArgs) -> Self {
        UpdateIngredient {
            id: val.id,
            name: val.name,
            amount: val.amount,
            kind: val.kind,
        }
    }
}

#[derive(Subcommand)]
pub enum IngredientCommands {
    /// Add an ingredient to a step
    #[command(alias = "a")]
    Add(AddIngredientArgs),
    /// Update an ingredient
    #[command(alias = "u")]
    Update(UpdateIngredientArgs),
    /// Remove an ingredient
    #[command(aliases = ["d", "rm"])]
    Remove(IdArgs),
}

// ============================================================================
// Settings
// ============================================================================

/// Store the room temperature used when none is given
#[derive(ClapArgs)]
pub struct RoomTemperatureArgs {
    #[arg(help = "Room temperature in °C", allow_negative_numbers = true)]
    pub temperature: i32,
}

impl From<RoomTemperatureArgs> for SetRoomTemperature {
    fn from(val: RoomTemperatureArgs) -> Self {
        SetRoomTemperature {
            temperature: val.temperature,
        }
    }
}

#[derive(Subcommand)]
pub enum SettingsCommands {
    /// Show the stored settings
    Show,
    /// Change the stored room temperature
    RoomTemperature(RoomTemperatureArgs),
}

// ============================================================================
// Value enums
// ============================================================================

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum DifficultyArg {
    Easy,
    Medium,
    Hard,
}

impl std::fmt::Display for DifficultyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DifficultyArg::Easy => write!(f, "easy"),
            DifficultyArg::Medium => write!(f, "medium"),
            DifficultyArg::Hard => write!(f, "hard"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum CriticalPathArg {
    /// The substep that takes longest
    Longest,
    /// The first substep in order
    First,
}

impl std::fmt::Display for CriticalPathArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CriticalPathArg::Longest => write!(f, "longest"),
            CriticalPathArg::First => write!(f, "first"),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LanguageArg {
    En,
    De,
}

impl std::fmt::Display for LanguageArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LanguageArg::En => write!(f, "en"),
            LanguageArg::De => write!(f, "de"),
        }
    }
}
