//! Command handlers for the `levain` binary.
//!
//! Each handler converts clap arguments into core parameters, calls the
//! [`Bakery`] and renders the markdown the core types display as.

use anyhow::{bail, Context, Result};
use levain_core::{
    params::{DeleteRecipes, ExportRecipes, Id, ListRecipes, ScheduleRecipe},
    Bakery, CreateResult, OperationStatus, RecipeBundle,
};
use log::debug;

use crate::{
    args::{
        DeleteRecipesArgs, ExportArgs, ImportArgs, IngredientCommands, RecipeCommands,
        SettingsCommands, StepCommands,
    },
    renderer::TerminalRenderer,
};

pub struct Cli {
    bakery: Bakery,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(bakery: Bakery, renderer: TerminalRenderer) -> Self {
        Self { bakery, renderer }
    }

    pub async fn handle_recipe_command(&self, command: RecipeCommands) -> Result<()> {
        use RecipeCommands::*;

        match command {
            Create(args) => {
                let recipe = self
                    .bakery
                    .create_recipe(&args.into())
                    .await
                    .context("Failed to create recipe")?;
                self.renderer.render(&CreateResult::new(recipe).to_string())
            }
            List(args) => self.list_recipes(&args.into()).await,
            Show(args) => {
                let id: Id = args.into();
                let recipe = self
                    .bakery
                    .get_recipe(&id)
                    .await
                    .context("Failed to get recipe")?;
                match recipe {
                    Some(recipe) => self.renderer.render(&recipe.to_string()),
                    None => bail!("Recipe with ID {} not found", id.id),
                }
            }
            Update(args) => {
                let result = self
                    .bakery
                    .update_recipe(args.into())
                    .await
                    .context("Failed to update recipe")?;
                self.renderer.render(&result.to_string())
            }
            Delete(args) => self.delete_recipes(args).await,
            Favorite(args) => {
                let recipe = self
                    .bakery
                    .toggle_favorite(&args.into())
                    .await
                    .context("Failed to change favorite")?;
                let message = if recipe.is_favorite {
                    format!("Marked recipe {} as favorite", recipe.id)
                } else {
                    format!("Removed recipe {} from favorites", recipe.id)
                };
                self.renderer
                    .render(&OperationStatus::success(message).to_string())
            }
            Schedule(args) => {
                let params: ScheduleRecipe = args.into();
                let scheduled = self
                    .bakery
                    .schedule_recipe(&params)
                    .await
                    .context("Failed to schedule recipe")?;
                self.renderer.render(&scheduled.to_string())
            }
            Text(args) => {
                let params: ScheduleRecipe = args.into();
                let text = self
                    .bakery
                    .export_recipe_text(&params)
                    .await
                    .context("Failed to export recipe text")?;
                println!("{text}");
                Ok(())
            }
            Export(args) => self.export_recipes(&args).await,
            Import(args) => self.import_recipes(&args).await,
        }
    }

    pub async fn handle_step_command(&self, command: StepCommands) -> Result<()> {
        use StepCommands::*;

        match command {
            Add(args) => {
                let step = self
                    .bakery
                    .add_step(&args.into())
                    .await
                    .context("Failed to add step")?;
                self.renderer.render(&CreateResult::new(step).to_string())
            }
            Show(args) => {
                let id: Id = args.into();
                let step = self
                    .bakery
                    .get_step(&id)
                    .await
                    .context("Failed to get step")?;
                match step {
                    Some(step) => self.renderer.render(&step.to_string()),
                    None => bail!("Step with ID {} not found", id.id),
                }
            }
            Update(args) => {
                let result = self
                    .bakery
                    .update_step(args.into())
                    .await
                    .context("Failed to update step")?;
                self.renderer.render(&result.to_string())
            }
            Move(args) => {
                let step = self
                    .bakery
                    .move_step(&args.into())
                    .await
                    .context("Failed to move step")?;
                let message = match step.super_step_id {
                    Some(parent) => format!("Moved step {} under step {parent}", step.id),
                    None => format!("Moved step {} to the root steps", step.id),
                };
                self.renderer
                    .render(&OperationStatus::success(message).to_string())
            }
            Swap(args) => {
                let (first, second) = (args.step1_id, args.step2_id);
                self.bakery
                    .swap_steps(&args.into())
                    .await
                    .context("Failed to swap steps")?;
                let status =
                    OperationStatus::success(format!("Swapped steps {first} and {second}"));
                self.renderer.render(&status.to_string())
            }
            Remove(args) => {
                let result = self
                    .bakery
                    .remove_step(&args.into())
                    .await
                    .context("Failed to remove step")?;
                self.renderer.render(&result.to_string())
            }
        }
    }

    pub async fn handle_ingredient_command(&self, command: IngredientCommands) -> Result<()> {
        use IngredientCommands::*;

        match command {
            Add(args) => {
                let ingredient = self
                    .bakery
                    .add_ingredient(&args.into())
                    .await
                    .context("Failed to add ingredient")?;
                self.renderer
                    .render(&CreateResult::new(ingredient).to_string())
            }
            Update(args) => {
                let result = self
                    .bakery
                    .update_ingredient(args.into())
                    .await
                    .context("Failed to update ingredient")?;
                self.renderer.render(&result.to_string())
            }
            Remove(args) => {
                let result = self
                    .bakery
                    .remove_ingredient(&args.into())
                    .await
                    .context("Failed to remove ingredient")?;
                self.renderer.render(&result.to_string())
            }
        }
    }

    pub async fn handle_settings_command(&self, command: SettingsCommands) -> Result<()> {
        match command {
            SettingsCommands::Show => {
                let room_temperature = self
                    .bakery
                    .room_temperature()
                    .await
                    .context("Failed to read settings")?;
                let markdown = format!(
                    "# Settings\n\n- Room temperature: {room_temperature} °C\n- Database: {}\n",
                    self.bakery.database_path().display()
                );
                self.renderer.render(&markdown)
            }
            SettingsCommands::RoomTemperature(args) => {
                let temperature = self
                    .bakery
                    .set_room_temperature(&args.into())
                    .await
                    .context("Failed to store room temperature")?;
                let status =
                    OperationStatus::success(format!("Room temperature set to {temperature} °C"));
                self.renderer.render(&status.to_string())
            }
        }
    }

    pub async fn list_recipes(&self, params: &ListRecipes) -> Result<()> {
        let recipes = self
            .bakery
            .list_recipes(params)
            .await
            .context("Failed to list recipes")?;

        let title = if params.favorites {
            "Favorite Recipes"
        } else {
            "Recipes"
        };
        self.renderer.render(&format!("# {title}\n\n{recipes}"))
    }

    async fn delete_recipes(&self, args: DeleteRecipesArgs) -> Result<()> {
        if !args.confirm {
            bail!("Deleting recipes cannot be undone. Re-run with --confirm to proceed.");
        }

        if let [id] = args.ids.as_slice() {
            let result = self
                .bakery
                .delete_recipe(&Id { id: *id })
                .await
                .context("Failed to delete recipe")?;
            return self.renderer.render(&result.to_string());
        }

        let params: DeleteRecipes = args.into();
        let status = self
            .bakery
            .delete_recipes(&params)
            .await
            .context("Failed to delete recipes")?;
        self.renderer.render(&status.to_string())
    }

    async fn export_recipes(&self, args: &ExportArgs) -> Result<()> {
        let params: ExportRecipes = args.into();
        let bundle = self
            .bakery
            .export_recipes(&params)
            .await
            .context("Failed to export recipes")?;

        match &args.output {
            Some(path) => {
                bundle
                    .write_to(path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                let status = OperationStatus::success(format!(
                    "Exported {} recipe(s) to {}",
                    bundle.recipes.len(),
                    path.display()
                ));
                self.renderer.render(&status.to_string())
            }
            None => {
                println!("{}", bundle.to_json()?);
                Ok(())
            }
        }
    }

    async fn import_recipes(&self, args: &ImportArgs) -> Result<()> {
        let bundle = RecipeBundle::read_from(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?;
        debug!(
            "Importing {} recipes from {}",
            bundle.recipes.len(),
            args.file.display()
        );

        let recipes = self
            .bakery
            .import_recipes(bundle)
            .await
            .context("Failed to import recipes")?;

        let mut markdown =
            OperationStatus::success(format!("Imported {} recipe(s)", recipes.len())).to_string();
        for recipe in &recipes {
            markdown.push_str(&format!("- {} (ID: {})\n", recipe.display_name(), recipe.id));
        }
        self.renderer.render(&markdown)
    }
}
