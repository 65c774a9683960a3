//! Core library for the Levain baking planner.
//!
//! Recipes are made of steps; a step carries ingredients and may have
//! substeps (a levain or a pre-dough) that must be ready before it starts.
//! This crate stores recipes in SQLite, resolves their steps into a validated
//! forest and computes from it
//!
//! - when every step starts, given the recipe's start or end date
//!   ([`solver::schedule_starts`]),
//! - how warm the water has to be so a dough reaches its target temperature
//!   ([`solver::required_temperature`]),
//! - a plain-text plan combining both ([`display::render_schedule_text`]).
//!
//! The solvers are pure functions over a [`models::RecipeTree`]; the
//! [`Bakery`] facade wraps the store for async callers and publishes change
//! events.
//!
//! # Display Architecture
//!
//! - **Domain Models** ([`models`]): implement [`std::fmt::Display`] as
//!   markdown
//! - **Display Wrappers** ([`display`]): collections, operation results and
//!   the scheduled recipe timetable
//! - **Text Export** ([`display::export`]): the plain-text plan in English or
//!   German
//!
//! # Quick Start
//!
//! ```rust
//! use levain_core::{
//!     params::{CreateRecipe, IngredientCreate, ScheduleRecipe, StepCreate},
//!     BakeryBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bakery = BakeryBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let recipe = bakery
//!     .create_recipe(&CreateRecipe {
//!         name: "Baguette".to_string(),
//!         date: Some("2026-10-17T06:00:00Z".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let dough = bakery
//!     .add_step(&StepCreate {
//!         recipe_id: recipe.id,
//!         name: "Dough".to_string(),
//!         duration: "90".to_string(),
//!         temperature: Some(26),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! bakery
//!     .add_ingredient(&IngredientCreate {
//!         step_id: dough.id,
//!         name: "Water".to_string(),
//!         amount: 350.0,
//!         kind: Some("bulk_liquid".to_string()),
//!     })
//!     .await?;
//!
//! let text = bakery
//!     .export_recipe_text(&ScheduleRecipe {
//!         id: recipe.id,
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod bakery;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod solver;

// Re-export commonly used types
pub use bakery::{Bakery, BakeryBuilder, BatchOptions, RecipeBundle, StoreEvent};
pub use db::Database;
pub use display::{
    CreateResult, DeleteResult, OperationStatus, RecipeSummaries, ScheduledRecipe, Steps,
    TextExport, UpdateResult,
};
pub use error::{BakeryError, Result};
pub use models::{
    Difficulty, Ingredient, IngredientKind, Recipe, RecipeFilter, RecipeSummary, RecipeTree,
    ResolvedStep, Step,
};
pub use params::{
    CreateRecipe, DeleteRecipes, ExportRecipes, Id, IngredientCreate, ListRecipes, MoveStep,
    ScheduleRecipe, SetRoomTemperature, StepCreate, SwapSteps, UpdateIngredient, UpdateRecipe,
    UpdateStep,
};
pub use solver::{CriticalPath, Schedule, Scheduler};
