//! Integration tests comparing CLI output with the core Display
//! implementations the MCP server returns.

use std::process::Command;

use levain_core::{
    display::CreateResult,
    params::{CreateRecipe, Id, ScheduleRecipe},
    Bakery, BakeryBuilder,
};
use tempfile::TempDir;

/// Helper function to create a test bakery with temporary database
async fn create_test_bakery() -> (Bakery, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let db_path = temp_dir.path().join("test.db");

    let bakery = BakeryBuilder::new()
        .with_database_path(Some(db_path))
        .build()
        .await
        .expect("Failed to create bakery");

    (bakery, temp_dir)
}

/// Run a CLI command and capture its output
fn run_cli_command(db_path: &str, args: &[&str]) -> String {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_levain"));
    cmd.arg("--no-color").arg("--database-file").arg(db_path);

    for arg in args {
        cmd.arg(arg);
    }

    let output = cmd.output().expect("Failed to run CLI command");
    String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output")
}

#[tokio::test]
async fn test_recipe_display_consistency() {
    let (bakery, temp_dir) = create_test_bakery().await;
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    let cli_output = run_cli_command(
        db_str,
        &["recipe", "create", "Ciabatta", "--info", "Very wet dough"],
    );

    let recipe = bakery
        .create_recipe(&CreateRecipe {
            name: "Ciabatta Direct".to_string(),
            info: Some("Very wet dough".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to create recipe");
    let direct_output = CreateResult::new(recipe).to_string();

    assert!(cli_output.starts_with("Created recipe with ID: 1"));
    assert!(direct_output.starts_with("Created recipe with ID: 2"));
    assert!(cli_output.contains("Very wet dough"));
    assert!(direct_output.contains("Very wet dough"));
}

#[tokio::test]
async fn test_cli_sees_changes_made_through_the_bakery() {
    let (bakery, temp_dir) = create_test_bakery().await;
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    run_cli_command(
        db_str,
        &["recipe", "create", "Pizza", "--date", "2026-10-17T16:00:00Z"],
    );
    run_cli_command(
        db_str,
        &["step", "add", "1", "Dough", "-d", "90", "-t", "24"],
    );
    run_cli_command(
        db_str,
        &["ingredient", "add", "1", "Flour", "600", "-k", "flour"],
    );
    run_cli_command(
        db_str,
        &["ingredient", "add", "1", "Water", "400", "-k", "bulk_liquid"],
    );

    let recipe = bakery
        .get_recipe(&Id { id: 1 })
        .await
        .expect("Failed to get recipe")
        .expect("Recipe created by the CLI should exist");
    assert_eq!(recipe.steps.len(), 1);
    assert_eq!(recipe.steps[0].ingredients.len(), 2);

    let params = ScheduleRecipe {
        id: 1,
        room_temperature: Some(20),
        time_zone: Some("UTC".to_string()),
        ..Default::default()
    };
    let direct_text = bakery
        .export_recipe_text(&params)
        .await
        .expect("Failed to export text");
    let cli_text = run_cli_command(
        db_str,
        &["recipe", "text", "1", "-r", "20", "--time-zone", "UTC"],
    );

    assert_eq!(cli_text, format!("{direct_text}\n"));
    assert!(direct_text.contains("Water: 400 g 30° C"));
    assert!(direct_text.ends_with("Finished: 17.10.26, 17:30"));
}

#[tokio::test]
async fn test_schedule_display_consistency() {
    let (bakery, temp_dir) = create_test_bakery().await;
    let db_path = temp_dir.path().join("test.db");
    let db_str = db_path.to_str().unwrap();

    run_cli_command(
        db_str,
        &["recipe", "create", "Rolls", "--date", "2026-10-17T07:00:00Z"],
    );
    run_cli_command(db_str, &["step", "add", "1", "Proof", "-d", "1h"]);

    let params = ScheduleRecipe {
        id: 1,
        room_temperature: Some(22),
        time_zone: Some("UTC".to_string()),
        ..Default::default()
    };
    let direct_output = bakery
        .schedule_recipe(&params)
        .await
        .expect("Failed to schedule")
        .to_string();
    let cli_output = run_cli_command(
        db_str,
        &["recipe", "schedule", "1", "-r", "22", "--time-zone", "UTC"],
    );

    assert_eq!(cli_output, direct_output);
    assert!(cli_output.contains("**Proof**"));
}
