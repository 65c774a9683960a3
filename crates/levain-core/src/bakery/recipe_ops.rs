//! Recipe operations for the Bakery.

use log::debug;

use super::{Bakery, BatchOptions, StoreEvent};
use crate::{
    display::{DeleteResult, OperationStatus, RecipeSummaries, UpdateResult},
    error::{BakeryError, Result},
    models::{NewRecipe, Recipe, RecipeFilter, UpdateRecipeRequest},
    params::{CreateRecipe, DeleteRecipes, Id, ListRecipes, UpdateRecipe},
};

/// Human readable list of the fields an update request touches.
fn describe_changes(request: &UpdateRecipeRequest) -> Vec<String> {
    let mut changes = Vec::new();
    if let Some(name) = &request.name {
        changes.push(format!("Renamed to '{name}'"));
    }
    if request.info.is_some() {
        changes.push("Updated info".to_string());
    }
    if let Some(favorite) = request.is_favorite {
        changes.push(if favorite {
            "Marked as favorite".to_string()
        } else {
            "Removed from favorites".to_string()
        });
    }
    if let Some(difficulty) = request.difficulty {
        changes.push(format!("Difficulty set to {difficulty}"));
    }
    if let Some(inverted) = request.inverted {
        changes.push(if inverted {
            "Date is now the end of the schedule".to_string()
        } else {
            "Date is now the start of the schedule".to_string()
        });
    }
    match request.times {
        Some(Some(times)) => changes.push(format!("Batch count set to {times}")),
        Some(None) => changes.push("Cleared batch count".to_string()),
        None => {}
    }
    if let Some(date) = request.date {
        changes.push(format!("Date set to {date}"));
    }
    match &request.image_data {
        Some(Some(_)) => changes.push("Replaced image".to_string()),
        Some(None) => changes.push("Removed image".to_string()),
        None => {}
    }
    changes
}

impl Bakery {
    /// Creates a new recipe at the end of the recipe list.
    pub async fn create_recipe(&self, params: &CreateRecipe) -> Result<Recipe> {
        let new_recipe = NewRecipe::try_from(params)?;

        let recipe = self
            .with_database(move |db| db.create_recipe(&new_recipe))
            .await?;

        debug!("Created recipe {}", recipe.id);
        self.notify(StoreEvent::RecipeCreated { id: recipe.id });
        Ok(recipe)
    }

    /// Retrieves a recipe with all of its steps and ingredients.
    pub async fn get_recipe(&self, params: &Id) -> Result<Option<Recipe>> {
        let recipe_id = params.id;
        self.with_database(move |db| db.get_recipe(recipe_id)).await
    }

    /// Lists recipe summaries, optionally only favorites or matching a name.
    pub async fn list_recipes(&self, params: &ListRecipes) -> Result<RecipeSummaries> {
        let filter = RecipeFilter::from(params);
        let summaries = self
            .with_database(move |db| db.list_recipes(Some(&filter)))
            .await?;
        Ok(RecipeSummaries(summaries))
    }

    /// Updates the given fields of a recipe and reports what changed.
    pub async fn update_recipe(&self, params: UpdateRecipe) -> Result<UpdateResult<Recipe>> {
        let recipe_id = params.id;
        let request = UpdateRecipeRequest::try_from(params)?;
        if request.is_empty() {
            return Err(BakeryError::invalid_input("update")
                .with_reason("Nothing to update; give at least one field"));
        }
        let changes = describe_changes(&request);

        let recipe = self
            .with_database(move |db| db.update_recipe(recipe_id, &request))
            .await?;

        self.notify(StoreEvent::RecipeUpdated { id: recipe_id });
        Ok(UpdateResult::with_changes(recipe, changes))
    }

    /// Flips the favorite flag of a recipe.
    pub async fn toggle_favorite(&self, params: &Id) -> Result<Recipe> {
        let recipe_id = params.id;

        let recipe = self
            .with_database(move |db| {
                let current = db
                    .get_recipe(recipe_id)?
                    .ok_or(BakeryError::RecipeNotFound { id: recipe_id })?;
                let request = UpdateRecipeRequest {
                    is_favorite: Some(!current.is_favorite),
                    ..Default::default()
                };
                db.update_recipe(recipe_id, &request)
            })
            .await?;

        self.notify(StoreEvent::RecipeUpdated { id: recipe_id });
        Ok(recipe)
    }

    /// Permanently deletes a recipe with its steps and ingredients.
    ///
    /// The recipe is read before deletion so the result can name it.
    pub async fn delete_recipe(&self, params: &Id) -> Result<DeleteResult<Recipe>> {
        let recipe_id = params.id;

        let recipe = self
            .with_database(move |db| {
                let recipe = db
                    .get_recipe(recipe_id)?
                    .ok_or(BakeryError::RecipeNotFound { id: recipe_id })?;
                db.delete_recipe(recipe_id)?;
                Ok(recipe)
            })
            .await?;

        self.notify(StoreEvent::RecipeDeleted { id: recipe_id });
        Ok(DeleteResult::new(recipe))
    }

    /// Deletes several recipes as one batch; either all go or none.
    pub async fn delete_recipes(&self, params: &DeleteRecipes) -> Result<OperationStatus> {
        if params.ids.is_empty() {
            return Err(BakeryError::invalid_input("ids").with_reason("No recipe IDs given"));
        }
        let ids = params.ids.clone();

        let deleted = self
            .perform_batch(BatchOptions::default(), move |db| db.delete_recipes(&ids))
            .await?;

        Ok(OperationStatus::success(format!(
            "Deleted {deleted} recipe{}",
            if deleted == 1 { "" } else { "s" }
        )))
    }
}
