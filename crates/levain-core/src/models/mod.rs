//! Data models for recipes, steps and ingredients.
//!
//! This module contains the domain models of the levain recipe planner.
//! Display implementations for these models live in
//! [`crate::display::models`] so data structures and presentation stay apart.
//!
//! # Relationships
//!
//! - A [`Recipe`] owns its [`Step`]s through `recipe_id`; deleting a recipe
//!   cascades to its steps and their ingredients.
//! - A [`Step`] owns its [`Ingredient`]s through `step_id`.
//! - A step may be a substep of exactly one other step (`super_step_id`).
//!   Substeps are references into the same step table, never embedded copies.
//! - [`RecipeTree`] is the validated, nested view of a recipe's steps that the
//!   solvers in [`crate::solver`] work on.
//!
//! # Examples
//!
//! ```rust
//! use jiff::{SignedDuration, Timestamp};
//! use levain_core::models::{Ingredient, IngredientKind, Step};
//!
//! let step = Step {
//!     id: 1,
//!     recipe_id: 1,
//!     super_step_id: None,
//!     name: "Mix".to_string(),
//!     duration: SignedDuration::from_mins(15),
//!     temperature: 24,
//!     is_dynamic_temperature: false,
//!     second_temperature: 24,
//!     notes: String::new(),
//!     order: 0,
//!     ingredients: vec![Ingredient {
//!         id: 1,
//!         step_id: 1,
//!         name: "Water".to_string(),
//!         amount: 300.0,
//!         kind: IngredientKind::BulkLiquid,
//!         order: 0,
//!     }],
//!     substep_ids: vec![],
//!     created_at: Timestamp::UNIX_EPOCH,
//!     updated_at: Timestamp::UNIX_EPOCH,
//! };
//! assert!(step.is_root());
//! assert_eq!(step.total_amount(), 300.0);
//! ```

pub mod filters;
pub mod ingredient;
pub mod kinds;
pub mod recipe;
pub mod requests;
pub mod step;
pub mod summary;
pub mod tree;


pub use filters::RecipeFilter;
pub use ingredient::Ingredient;
pub use kinds::{Difficulty, IngredientKind};
pub use recipe::Recipe;
pub use requests::{
    NewIngredient, NewRecipe, NewStep, UpdateIngredientRequest, UpdateRecipeRequest,
    UpdateStepRequest,
};
pub use step::Step;
pub use summary::RecipeSummary;
pub use tree::{RecipeTree, ResolvedStep};
