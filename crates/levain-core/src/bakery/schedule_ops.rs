//! Schedules, the text export and the room temperature setting.

use log::debug;

use super::{Bakery, StoreEvent};
use crate::{
    db::Database,
    display::ScheduledRecipe,
    error::{BakeryError, Result},
    models::RecipeTree,
    params::{Id, ScheduleRecipe, SetRoomTemperature},
};

/// Loads a recipe and resolves its steps into a validated forest.
fn load_tree(db: &Database, recipe_id: u64) -> Result<RecipeTree> {
    let recipe = db
        .get_recipe(recipe_id)?
        .ok_or(BakeryError::RecipeNotFound { id: recipe_id })?;
    RecipeTree::resolve(recipe)
}

impl Bakery {
    /// The stored room temperature in degrees Celsius.
    pub async fn room_temperature(&self) -> Result<i32> {
        self.with_database(|db| db.room_temperature()).await
    }

    /// Stores a new room temperature.
    pub async fn set_room_temperature(&self, params: &SetRoomTemperature) -> Result<i32> {
        let temperature = params.validate()?;

        self.with_database(move |db| db.set_room_temperature(temperature))
            .await?;

        self.notify(StoreEvent::SettingsChanged);
        Ok(temperature)
    }

    /// Loads a recipe as a validated step forest.
    ///
    /// # Errors
    ///
    /// * `BakeryError::RecipeNotFound` - no recipe with this ID
    /// * `BakeryError::MalformedRecipe` - the stored steps do not form a forest
    pub async fn load_recipe_tree(&self, params: &Id) -> Result<RecipeTree> {
        let recipe_id = params.id;
        self.with_database(move |db| load_tree(db, recipe_id)).await
    }

    /// Computes the schedule and liquid temperatures of a recipe.
    ///
    /// Without an explicit room temperature the stored setting is used.
    pub async fn schedule_recipe(&self, params: &ScheduleRecipe) -> Result<ScheduledRecipe> {
        let options = params.validate()?;
        let recipe_id = params.id;
        let explicit_room = options.room_temperature;

        let (tree, room_temperature) = self
            .with_database(move |db| {
                let tree = load_tree(db, recipe_id)?;
                let room = match explicit_room {
                    Some(room) => room,
                    None => db.room_temperature()?,
                };
                Ok((tree, room))
            })
            .await?;

        debug!(
            "Scheduling recipe {recipe_id} at {room_temperature} °C with {} policy",
            options.critical_path
        );
        Ok(ScheduledRecipe::new(tree, room_temperature, &options))
    }

    /// Renders the plain-text plan of a recipe, ready to be shared.
    pub async fn export_recipe_text(&self, params: &ScheduleRecipe) -> Result<String> {
        Ok(self.schedule_recipe(params).await?.text())
    }
}
