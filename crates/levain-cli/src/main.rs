//! Levain CLI Application
//!
//! Command-line interface and MCP server for the levain baking planner.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use levain_core::{params::ListRecipes, BakeryBuilder};
use log::info;
use mcp::{run_stdio_server, LevainMcpServer};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let bakery = BakeryBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize bakery")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("Levain started");

    match command {
        Some(Recipe { command }) => {
            Cli::new(bakery, renderer)
                .handle_recipe_command(command)
                .await
        }
        Some(Step { command }) => Cli::new(bakery, renderer).handle_step_command(command).await,
        Some(Ingredient { command }) => {
            Cli::new(bakery, renderer)
                .handle_ingredient_command(command)
                .await
        }
        Some(Settings { command }) => {
            Cli::new(bakery, renderer)
                .handle_settings_command(command)
                .await
        }
        Some(Serve) => {
            info!("Starting Levain MCP server");
            run_stdio_server(LevainMcpServer::new(bakery))
                .await
                .context("MCP server failed")
        }
        None => {
            Cli::new(bakery, renderer)
                .list_recipes(&ListRecipes::default())
                .await
        }
    }
}
