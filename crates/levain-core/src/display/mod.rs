//! Display formatting functions and result types.
//!
//! Domain models implement `Display` directly (see [`models`]); collections
//! and operation outcomes get newtype wrappers so every interface prints them
//! the same way.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers & Rows │    │   Formatted     │
//! │ (Recipe, Step)  │───▶│ Schedule, Text  │───▶│    Output       │
//! │                 │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: collection wrappers (RecipeSummaries, Steps)
//! - [`results`]: operation results (CreateResult, UpdateResult, DeleteResult)
//! - [`status`]: one-line status messages (OperationStatus)
//! - [`datetime`]: timestamp and duration formatting
//! - [`rows`]: the row list a recipe page is built from
//! - [`scheduled`]: a recipe with its schedule as a markdown timetable
//! - [`export`]: the plain-text plan and its locales
//! - [`models`]: Display implementations for domain models
//!
//! Everything except [`export`] produces markdown; the export is plain text
//! meant to be shared as is.
//!
//! ## Usage
//!
//! ```rust
//! use levain_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Deleted 3 recipes");
//! assert_eq!(status.to_string(), "Success: Deleted 3 recipes\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod export;
pub mod models;
pub mod results;
pub mod rows;
pub mod scheduled;
pub mod status;

pub use collections::{RecipeSummaries, Steps};
pub use datetime::{FriendlyDuration, LocalDateTime, ShortDateTime, ZonedDateTime};
pub use export::{render_schedule_text, English, German, Language, Locale, TextExport};
pub use results::{CreateResult, DeleteResult, Resource, UpdateResult};
pub use rows::{recipe_rows, Row};
pub use scheduled::ScheduledRecipe;
pub use status::OperationStatus;
