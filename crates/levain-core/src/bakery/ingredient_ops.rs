//! Ingredient operations for the Bakery.

use super::{Bakery, StoreEvent};
use crate::{
    db::Database,
    display::{DeleteResult, UpdateResult},
    error::{BakeryError, Result},
    models::{Ingredient, NewIngredient, UpdateIngredientRequest},
    params::{Id, IngredientCreate, UpdateIngredient},
};

fn recipe_of_step(db: &Database, step_id: u64) -> Result<u64> {
    db.get_step(step_id)?
        .map(|step| step.recipe_id)
        .ok_or(BakeryError::StepNotFound { id: step_id })
}

impl Bakery {
    /// Appends an ingredient to a step.
    pub async fn add_ingredient(&self, params: &IngredientCreate) -> Result<Ingredient> {
        let new_ingredient = NewIngredient::try_from(params)?;
        let step_id = params.step_id;

        let (ingredient, recipe_id) = self
            .with_database(move |db| {
                let ingredient = db.add_ingredient(step_id, &new_ingredient)?;
                Ok((ingredient, recipe_of_step(db, step_id)?))
            })
            .await?;

        self.notify(StoreEvent::RecipeUpdated { id: recipe_id });
        Ok(ingredient)
    }

    /// Retrieves a single ingredient.
    pub async fn get_ingredient(&self, params: &Id) -> Result<Option<Ingredient>> {
        let ingredient_id = params.id;
        self.with_database(move |db| db.get_ingredient(ingredient_id))
            .await
    }

    /// Updates the given fields of an ingredient.
    pub async fn update_ingredient(
        &self,
        params: UpdateIngredient,
    ) -> Result<UpdateResult<Ingredient>> {
        let ingredient_id = params.id;
        let request = UpdateIngredientRequest::try_from(params)?;

        let mut changes = Vec::new();
        if let Some(name) = &request.name {
            changes.push(format!("Renamed to '{name}'"));
        }
        if let Some(amount) = request.amount {
            changes.push(format!("Amount set to {amount} g"));
        }
        if let Some(kind) = request.kind {
            changes.push(format!("Kind set to {kind}"));
        }
        if changes.is_empty() {
            return Err(BakeryError::invalid_input("update")
                .with_reason("Nothing to update; give at least one field"));
        }

        let (ingredient, recipe_id) = self
            .with_database(move |db| {
                let ingredient = db.update_ingredient(ingredient_id, &request)?;
                let recipe_id = recipe_of_step(db, ingredient.step_id)?;
                Ok((ingredient, recipe_id))
            })
            .await?;

        self.notify(StoreEvent::RecipeUpdated { id: recipe_id });
        Ok(UpdateResult::with_changes(ingredient, changes))
    }

    /// Removes an ingredient from its step.
    pub async fn remove_ingredient(&self, params: &Id) -> Result<DeleteResult<Ingredient>> {
        let ingredient_id = params.id;

        let (ingredient, recipe_id) = self
            .with_database(move |db| {
                let ingredient = db
                    .get_ingredient(ingredient_id)?
                    .ok_or(BakeryError::IngredientNotFound { id: ingredient_id })?;
                let recipe_id = recipe_of_step(db, ingredient.step_id)?;
                db.remove_ingredient(ingredient_id)?;
                Ok((ingredient, recipe_id))
            })
            .await?;

        self.notify(StoreEvent::RecipeUpdated { id: recipe_id });
        Ok(DeleteResult::new(ingredient))
    }
}
