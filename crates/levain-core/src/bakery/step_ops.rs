//! Step operations for the Bakery.

use super::{Bakery, StoreEvent};
use crate::{
    display::{DeleteResult, Steps, UpdateResult},
    error::{BakeryError, Result},
    models::{NewStep, Step, UpdateStepRequest},
    params::{Id, MoveStep, StepCreate, SwapSteps, UpdateStep},
};

impl Bakery {
    /// Adds a step to a recipe, or as last substep of `super_step_id`.
    pub async fn add_step(&self, params: &StepCreate) -> Result<Step> {
        let new_step = NewStep::try_from(params)?;
        let recipe_id = params.recipe_id;
        let super_step_id = params.super_step_id;

        let step = self
            .with_database(move |db| db.add_step(recipe_id, super_step_id, &new_step))
            .await?;

        self.notify(StoreEvent::RecipeUpdated { id: recipe_id });
        Ok(step)
    }

    /// Retrieves a single step with its ingredients.
    pub async fn get_step(&self, params: &Id) -> Result<Option<Step>> {
        let step_id = params.id;
        self.with_database(move |db| db.get_step(step_id)).await
    }

    /// Retrieves every step of a recipe, substeps included.
    pub async fn get_steps(&self, params: &Id) -> Result<Steps> {
        let recipe_id = params.id;

        let steps = self
            .with_database(move |db| {
                if db.get_recipe(recipe_id)?.is_none() {
                    return Err(BakeryError::RecipeNotFound { id: recipe_id });
                }
                db.get_steps(recipe_id)
            })
            .await?;

        Ok(Steps(steps))
    }

    /// Updates the given fields of a step and reports what changed.
    pub async fn update_step(&self, params: UpdateStep) -> Result<UpdateResult<Step>> {
        let step_id = params.id;
        let request = UpdateStepRequest::try_from(params)?;

        let mut changes = Vec::new();
        if request.name.is_some() {
            changes.push("Updated name".to_string());
        }
        if request.duration.is_some() {
            changes.push("Updated duration".to_string());
        }
        if request.temperature.is_some() || request.second_temperature.is_some() {
            changes.push("Updated temperature".to_string());
        }
        if let Some(dynamic) = request.is_dynamic_temperature {
            changes.push(if dynamic {
                "Temperature now changes over the step".to_string()
            } else {
                "Temperature is now constant".to_string()
            });
        }
        if request.notes.is_some() {
            changes.push("Updated notes".to_string());
        }
        if changes.is_empty() {
            return Err(BakeryError::invalid_input("update")
                .with_reason("Nothing to update; give at least one field"));
        }

        let step = self
            .with_database(move |db| db.update_step(step_id, &request))
            .await?;

        self.notify(StoreEvent::RecipeUpdated { id: step.recipe_id });
        Ok(UpdateResult::with_changes(step, changes))
    }

    /// Moves a step under another super step, or to the root steps.
    pub async fn move_step(&self, params: &MoveStep) -> Result<Step> {
        let step_id = params.id;
        let super_step_id = params.super_step_id;

        let step = self
            .with_database(move |db| db.move_step(step_id, super_step_id))
            .await?;

        self.notify(StoreEvent::RecipeUpdated { id: step.recipe_id });
        Ok(step)
    }

    /// Swaps the order of two sibling steps.
    pub async fn swap_steps(&self, params: &SwapSteps) -> Result<()> {
        let step1_id = params.step1_id;
        let step2_id = params.step2_id;

        let recipe_id = self
            .with_database(move |db| {
                db.swap_steps(step1_id, step2_id)?;
                db.get_step(step1_id)?
                    .map(|step| step.recipe_id)
                    .ok_or(BakeryError::StepNotFound { id: step1_id })
            })
            .await?;

        self.notify(StoreEvent::RecipeUpdated { id: recipe_id });
        Ok(())
    }

    /// Removes a step along with its substeps and ingredients.
    pub async fn remove_step(&self, params: &Id) -> Result<DeleteResult<Step>> {
        let step_id = params.id;

        let step = self
            .with_database(move |db| {
                let step = db
                    .get_step(step_id)?
                    .ok_or(BakeryError::StepNotFound { id: step_id })?;
                db.remove_step(step_id)?;
                Ok(step)
            })
            .await?;

        self.notify(StoreEvent::RecipeUpdated { id: step.recipe_id });
        Ok(DeleteResult::new(step))
    }
}
