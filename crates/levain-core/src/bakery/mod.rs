//! High-level async API for recipes, steps, ingredients and schedules.
//!
//! [`Bakery`] is the entry point for every interface. It owns the path of the
//! SQLite database and opens a fresh [`Database`] connection on a blocking
//! thread for each call, so callers never block the async runtime.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI / MCP     │    │     Bakery      │    │    Database     │
//! │  (params, text) │───▶│ (ops, events,   │───▶│   (via db/)     │
//! │                 │    │  schedules)     │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: factory for [`Bakery`] instances
//! - [`recipe_ops`]: create, list, show, update and delete recipes
//! - [`step_ops`]: add, update, move, swap and remove steps
//! - [`ingredient_ops`]: add, update and remove ingredients
//! - [`schedule_ops`]: room temperature, schedules and the text export
//! - [`transfer`]: JSON export and import of recipe bundles
//!
//! ## Change notifications
//!
//! Every mutation publishes a [`StoreEvent`] on a broadcast channel; call
//! [`Bakery::subscribe`] to receive them. Bulk work goes through
//! [`Bakery::perform_batch`], which publishes a single
//! [`StoreEvent::BatchCompleted`] instead of one event per change, or nothing
//! at all when [`BatchOptions::suppress_notifications`] is set.
//!
//! # Usage Examples
//!
//! ```rust
//! use levain_core::{
//!     params::{CreateRecipe, StepCreate},
//!     BakeryBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let bakery = BakeryBuilder::new()
//!     .with_database_path(Some("/tmp/levain-example.db"))
//!     .build()
//!     .await?;
//!
//! let recipe = bakery
//!     .create_recipe(&CreateRecipe {
//!         name: "Country loaf".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! bakery
//!     .add_step(&StepCreate {
//!         recipe_id: recipe.id,
//!         name: "Bulk fermentation".to_string(),
//!         duration: "4h".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use log::debug;
use tokio::{sync::broadcast, task};

use crate::{
    db::Database,
    error::{BakeryError, Result},
};

pub mod builder;
pub mod ingredient_ops;
pub mod recipe_ops;
pub mod schedule_ops;
pub mod step_ops;
pub mod transfer;

#[cfg(test)]
mod tests;

pub use builder::BakeryBuilder;
pub use transfer::RecipeBundle;

/// Capacity of the change notification channel.
const EVENT_CAPACITY: usize = 64;

/// A change to the store, published after the change is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// A recipe was created
    RecipeCreated { id: u64 },
    /// A recipe or anything it owns (steps, ingredients) changed
    RecipeUpdated { id: u64 },
    /// A recipe was deleted
    RecipeDeleted { id: u64 },
    /// A stored setting changed
    SettingsChanged,
    /// A batch of changes finished
    BatchCompleted,
}

/// Options for [`Bakery::perform_batch`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Skip the final [`StoreEvent::BatchCompleted`] event
    pub suppress_notifications: bool,
}

/// Main interface for managing recipes and computing schedules.
#[derive(Debug, Clone)]
pub struct Bakery {
    pub(crate) db_path: PathBuf,
    events: broadcast::Sender<StoreEvent>,
}

impl Bakery {
    /// Creates a bakery over the database at `db_path`.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { db_path, events }
    }

    /// Path of the SQLite database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Subscribes to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub(crate) fn notify(&self, event: StoreEvent) {
        debug!("Store event: {event:?}");
        // Sending only fails when nobody is subscribed
        let _ = self.events.send(event);
    }

    /// Runs `f` with a fresh database connection on a blocking thread.
    pub(crate) async fn with_database<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            f(&mut db)
        })
        .await
        .map_err(BakeryError::join)?
    }

    /// Runs several store mutations on one connection.
    ///
    /// No per-operation events are published for work done inside `f`. When
    /// `f` succeeds a single [`StoreEvent::BatchCompleted`] follows, unless
    /// `options.suppress_notifications` is set.
    ///
    /// ```rust
    /// use levain_core::{bakery::BatchOptions, models::NewRecipe, BakeryBuilder};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let bakery = BakeryBuilder::new()
    ///     .with_database_path(Some("/tmp/levain-batch.db"))
    ///     .build()
    ///     .await?;
    ///
    /// let created = bakery
    ///     .perform_batch(BatchOptions::default(), |db| {
    ///         let mut ids = Vec::new();
    ///         for name in ["Rye", "Spelt"] {
    ///             let recipe = db.create_recipe(&NewRecipe {
    ///                 name: name.to_string(),
    ///                 info: String::new(),
    ///                 difficulty: Default::default(),
    ///                 inverted: false,
    ///                 times: None,
    ///                 date: jiff::Timestamp::now(),
    ///             })?;
    ///             ids.push(recipe.id);
    ///         }
    ///         Ok(ids)
    ///     })
    ///     .await?;
    /// assert_eq!(created.len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn perform_batch<T, F>(&self, options: BatchOptions, f: F) -> Result<T>
    where
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let value = self.with_database(f).await?;
        if !options.suppress_notifications {
            self.notify(StoreEvent::BatchCompleted);
        }
        Ok(value)
    }
}
