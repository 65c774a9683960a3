//! MCP tool handlers implementation

use levain_core::{display::CreateResult, params as core, Bakery, OperationStatus};
use log::debug;
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::errors::{not_found, to_mcp_error};

// ============================================================================
// Generic Parameter Wrapper
// ============================================================================
//
// Core parameter types carry `JsonSchema` only behind the `schema` feature.
// The transparent wrapper gives rmcp the `Deserialize + JsonSchema` type it
// needs while the tool sees the plain core type.

/// MCP wrapper for core parameter types
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

impl<T> McpParams<T>
where
    T: JsonSchema,
{
    pub fn into_inner(self) -> T {
        self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type CreateRecipe = McpParams<core::CreateRecipe>;
pub type ListRecipes = McpParams<core::ListRecipes>;
pub type UpdateRecipe = McpParams<core::UpdateRecipe>;
pub type StepCreate = McpParams<core::StepCreate>;
pub type UpdateStep = McpParams<core::UpdateStep>;
pub type MoveStep = McpParams<core::MoveStep>;
pub type SwapSteps = McpParams<core::SwapSteps>;
pub type IngredientCreate = McpParams<core::IngredientCreate>;
pub type UpdateIngredient = McpParams<core::UpdateIngredient>;
pub type ScheduleRecipe = McpParams<core::ScheduleRecipe>;
pub type SetRoomTemperature = McpParams<core::SetRoomTemperature>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(content: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(
        content.to_string(),
    )]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    bakery: Bakery,
}

impl McpHandlers {
    pub fn new(bakery: Bakery) -> Self {
        Self { bakery }
    }

    pub async fn list_recipes(&self, Parameters(params): Parameters<ListRecipes>) -> McpResult {
        debug!("list_recipes: {params:?}");

        let params = params.as_ref();
        let recipes = self
            .bakery
            .list_recipes(params)
            .await
            .map_err(|e| to_mcp_error("Failed to list recipes", &e))?;

        let title = match (recipes.is_empty(), params.favorites) {
            (true, true) => "No favorite recipes found",
            (true, false) => "No recipes found",
            (false, true) => "Favorite Recipes",
            (false, false) => "Recipes",
        };
        if recipes.is_empty() {
            return text(format!("# {title}\n"));
        }
        text(format!("# {title}\n\n{recipes}"))
    }

    pub async fn show_recipe(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_recipe: {params:?}");

        let id = params.as_ref().id;
        let recipe = self
            .bakery
            .get_recipe(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to get recipe", &e))?
            .ok_or_else(|| not_found("Recipe", id))?;

        text(recipe)
    }

    pub async fn create_recipe(&self, Parameters(params): Parameters<CreateRecipe>) -> McpResult {
        debug!("create_recipe: {params:?}");

        let recipe = self
            .bakery
            .create_recipe(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to create recipe", &e))?;

        text(CreateResult::new(recipe))
    }

    pub async fn update_recipe(&self, Parameters(params): Parameters<UpdateRecipe>) -> McpResult {
        debug!("update_recipe: {params:?}");

        let result = self
            .bakery
            .update_recipe(params.into_inner())
            .await
            .map_err(|e| to_mcp_error("Failed to update recipe", &e))?;

        text(result)
    }

    pub async fn delete_recipe(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("delete_recipe: {params:?}");

        let result = self
            .bakery
            .delete_recipe(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to delete recipe", &e))?;

        text(result)
    }

    pub async fn add_step(&self, Parameters(params): Parameters<StepCreate>) -> McpResult {
        debug!("add_step: {params:?}");

        let step = self
            .bakery
            .add_step(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add step", &e))?;

        text(CreateResult::new(step))
    }

    pub async fn update_step(&self, Parameters(params): Parameters<UpdateStep>) -> McpResult {
        debug!("update_step: {params:?}");

        let result = self
            .bakery
            .update_step(params.into_inner())
            .await
            .map_err(|e| to_mcp_error("Failed to update step", &e))?;

        text(result)
    }

    pub async fn move_step(&self, Parameters(params): Parameters<MoveStep>) -> McpResult {
        debug!("move_step: {params:?}");

        let step = self
            .bakery
            .move_step(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to move step", &e))?;

        let message = match step.super_step_id {
            Some(parent) => format!("Moved step {} under step {parent}", step.id),
            None => format!("Moved step {} to the root steps", step.id),
        };
        text(OperationStatus::success(message))
    }

    pub async fn swap_steps(&self, Parameters(params): Parameters<SwapSteps>) -> McpResult {
        debug!("swap_steps: {params:?}");

        let params = params.as_ref();
        self.bakery
            .swap_steps(params)
            .await
            .map_err(|e| to_mcp_error("Failed to swap steps", &e))?;

        text(OperationStatus::success(format!(
            "Swapped steps {} and {}",
            params.step1_id, params.step2_id
        )))
    }

    pub async fn remove_step(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("remove_step: {params:?}");

        let result = self
            .bakery
            .remove_step(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to remove step", &e))?;

        text(result)
    }

    pub async fn add_ingredient(
        &self,
        Parameters(params): Parameters<IngredientCreate>,
    ) -> McpResult {
        debug!("add_ingredient: {params:?}");

        let ingredient = self
            .bakery
            .add_ingredient(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to add ingredient", &e))?;

        text(CreateResult::new(ingredient))
    }

    pub async fn update_ingredient(
        &self,
        Parameters(params): Parameters<UpdateIngredient>,
    ) -> McpResult {
        debug!("update_ingredient: {params:?}");

        let result = self
            .bakery
            .update_ingredient(params.into_inner())
            .await
            .map_err(|e| to_mcp_error("Failed to update ingredient", &e))?;

        text(result)
    }

    pub async fn remove_ingredient(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("remove_ingredient: {params:?}");

        let result = self
            .bakery
            .remove_ingredient(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to remove ingredient", &e))?;

        text(result)
    }

    pub async fn schedule_recipe(
        &self,
        Parameters(params): Parameters<ScheduleRecipe>,
    ) -> McpResult {
        debug!("schedule_recipe: {params:?}");

        let scheduled = self
            .bakery
            .schedule_recipe(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to schedule recipe", &e))?;

        text(scheduled)
    }

    pub async fn export_recipe_text(
        &self,
        Parameters(params): Parameters<ScheduleRecipe>,
    ) -> McpResult {
        debug!("export_recipe_text: {params:?}");

        let plan = self
            .bakery
            .export_recipe_text(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to export recipe text", &e))?;

        text(plan)
    }

    pub async fn set_room_temperature(
        &self,
        Parameters(params): Parameters<SetRoomTemperature>,
    ) -> McpResult {
        debug!("set_room_temperature: {params:?}");

        let temperature = self
            .bakery
            .set_room_temperature(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to store room temperature", &e))?;

        text(OperationStatus::success(format!(
            "Room temperature set to {temperature} °C"
        )))
    }
}
