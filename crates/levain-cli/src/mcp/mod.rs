//! MCP server implementation for Levain
//!
//! Exposes the recipe store, the schedule solver and the text export to AI
//! assistants over the Model Context Protocol (stdio transport).

use anyhow::Result;
use levain_core::Bakery;
use log::{debug, error, info};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{
    CreateRecipe, Id, IngredientCreate, ListRecipes, McpResult, MoveStep, ScheduleRecipe,
    SetRoomTemperature, StepCreate, SwapSteps, UpdateIngredient, UpdateRecipe, UpdateStep,
};

const INSTRUCTIONS: &str = r#"Levain plans baking days. It stores recipes and computes when every step starts and how warm the water must be.

## Core Concepts
- **Recipes**: a name, a date and an `inverted` flag. Normally the date is when baking starts; with `inverted=true` it is when the bread should be finished.
- **Steps**: timed stages (levain, autolyse, bulk fermentation, bake) with a duration and a target temperature. A step may have substeps that must be ready when it starts, e.g. a levain feeding the main dough.
- **Ingredients**: belong to a step, measured in grams. Kinds are `flour`, `bulk_liquid` (the water whose temperature is computed), `ta<yield>` such as `ta200` for sourdough, and `other`.

## Workflow
1. `create_recipe` with a name and a date
2. `add_step` for each stage; pass `super_step_id` to make a substep
3. `add_ingredient` to each step
4. `schedule_recipe` to see start times and water temperatures, or `export_recipe_text` for the short plan to print

## Tool Categories
- **Recipes**: list_recipes, show_recipe, create_recipe, update_recipe, delete_recipe
- **Steps**: add_step, update_step, move_step, swap_steps, remove_step
- **Ingredients**: add_ingredient, update_ingredient, remove_ingredient
- **Planning**: schedule_recipe, export_recipe_text, set_room_temperature"#;

/// MCP server for Levain
#[derive(Clone)]
pub struct LevainMcpServer {
    bakery: Bakery,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl LevainMcpServer {
    pub fn new(bakery: Bakery) -> Self {
        Self {
            bakery,
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(self.bakery.clone())
    }

    #[tool(
        name = "list_recipes",
        description = "List stored recipes with their difficulty and number of steps and ingredients. Use favorites=true to only list favorites and name to filter by a part of the name (case-insensitive)."
    )]
    async fn list_recipes(&self, params: Parameters<ListRecipes>) -> McpResult {
        self.handlers().list_recipes(params).await
    }

    #[tool(
        name = "show_recipe",
        description = "Show a recipe with all its steps, substeps and ingredients. Use the recipe ID from list_recipes."
    )]
    async fn show_recipe(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_recipe(params).await
    }

    #[tool(
        name = "create_recipe",
        description = "Create a recipe. Requires a name. The date (RFC 3339 or 'YYYY-MM-DD HH:MM', default now) is the start of baking, or the time the bread should be finished when inverted=true. Difficulty is 'easy', 'medium' or 'hard'. Returns the new recipe ID for adding steps."
    )]
    async fn create_recipe(&self, params: Parameters<CreateRecipe>) -> McpResult {
        self.handlers().create_recipe(params).await
    }

    #[tool(
        name = "update_recipe",
        description = "Change a recipe's name, info, favorite flag, difficulty, inverted flag, batch count (times) or date. Only the given fields change; use clear_times or clear_image to remove those values."
    )]
    async fn update_recipe(&self, params: Parameters<UpdateRecipe>) -> McpResult {
        self.handlers().update_recipe(params).await
    }

    #[tool(
        name = "delete_recipe",
        description = "Permanently delete a recipe with all its steps and ingredients. This cannot be undone."
    )]
    async fn delete_recipe(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().delete_recipe(params).await
    }

    #[tool(
        name = "add_step",
        description = "Add a step to a recipe. Requires recipe_id, name and duration ('90' minutes, '1h 30m' or 'PT1H30M'). Temperature defaults to 20 °C. Set super_step_id to add the step as a substep that must be ready before that step starts. Set dynamic_temperature with second_temperature when the temperature changes over the step."
    )]
    async fn add_step(&self, params: Parameters<StepCreate>) -> McpResult {
        self.handlers().add_step(params).await
    }

    #[tool(
        name = "update_step",
        description = "Change a step's name, duration, temperature, dynamic temperature flag, end temperature or notes. Only the given fields change."
    )]
    async fn update_step(&self, params: Parameters<UpdateStep>) -> McpResult {
        self.handlers().update_step(params).await
    }

    #[tool(
        name = "move_step",
        description = "Move a step under another step of the same recipe (super_step_id), or make it a root step by omitting super_step_id. Moving a step under itself or its own substeps is rejected."
    )]
    async fn move_step(&self, params: Parameters<MoveStep>) -> McpResult {
        self.handlers().move_step(params).await
    }

    #[tool(
        name = "swap_steps",
        description = "Swap the order of two steps that share the same recipe and the same super step."
    )]
    async fn swap_steps(&self, params: Parameters<SwapSteps>) -> McpResult {
        self.handlers().swap_steps(params).await
    }

    #[tool(
        name = "remove_step",
        description = "Remove a step together with its substeps and ingredients."
    )]
    async fn remove_step(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().remove_step(params).await
    }

    #[tool(
        name = "add_ingredient",
        description = "Add an ingredient to a step. Requires step_id, name and amount in grams. Kind is 'flour', 'bulk_liquid' (the water whose temperature is computed), 'ta<yield>' such as 'ta200', or 'other' (default)."
    )]
    async fn add_ingredient(&self, params: Parameters<IngredientCreate>) -> McpResult {
        self.handlers().add_ingredient(params).await
    }

    #[tool(
        name = "update_ingredient",
        description = "Change an ingredient's name, amount in grams or kind."
    )]
    async fn update_ingredient(&self, params: Parameters<UpdateIngredient>) -> McpResult {
        self.handlers().update_ingredient(params).await
    }

    #[tool(name = "remove_ingredient", description = "Remove an ingredient from its step.")]
    async fn remove_ingredient(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().remove_ingredient(params).await
    }

    #[tool(
        name = "schedule_recipe",
        description = "Compute when every step of a recipe starts and ends, and the water temperature each bulk liquid needs. Optional: room_temperature (°C, defaults to the stored setting), scale_factor for the amounts (defaults to the recipe's batch count), critical_path ('longest' or 'first'), time_zone (IANA name)."
    )]
    async fn schedule_recipe(&self, params: Parameters<ScheduleRecipe>) -> McpResult {
        self.handlers().schedule_recipe(params).await
    }

    #[tool(
        name = "export_recipe_text",
        description = "Render the short plain-text plan of a recipe: each root step with its start time and ingredients (water with its temperature), then the finish time. Takes the same options as schedule_recipe plus language ('en' or 'de')."
    )]
    async fn export_recipe_text(&self, params: Parameters<ScheduleRecipe>) -> McpResult {
        self.handlers().export_recipe_text(params).await
    }

    #[tool(
        name = "set_room_temperature",
        description = "Store the room temperature (°C, -20 to 60) used when schedule_recipe or export_recipe_text get none."
    )]
    async fn set_room_temperature(&self, params: Parameters<SetRoomTemperature>) -> McpResult {
        self.handlers().set_room_temperature(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for LevainMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "levain".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport until the client disconnects or
/// the process receives SIGINT or SIGTERM.
pub async fn run_stdio_server(server: LevainMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Levain MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.map_err(|e| {
        error!("serving error: {e:?}");
        e
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
