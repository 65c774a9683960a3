//! Tests for the bakery module.

use tempfile::TempDir;
use tokio::sync::broadcast::error::TryRecvError;

use super::*;
use crate::{
    models::{NewRecipe, Recipe},
    params::{
        CreateRecipe, DeleteRecipes, ExportRecipes, Id, IngredientCreate, ListRecipes, MoveStep,
        ScheduleRecipe, SetRoomTemperature, StepCreate, UpdateRecipe,
    },
};

/// Helper function to create a test bakery
async fn create_test_bakery() -> (TempDir, Bakery) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let bakery = BakeryBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create bakery");
    (temp_dir, bakery)
}

async fn create_recipe(bakery: &Bakery, name: &str) -> Recipe {
    bakery
        .create_recipe(&CreateRecipe {
            name: name.to_string(),
            date: Some("2026-10-17T06:00:00Z".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to create recipe")
}

/// Country loaf: a 12 h levain (24 → 28 °C) feeding a 4 h dough at 28 °C.
async fn create_country_loaf(bakery: &Bakery) -> Recipe {
    let recipe = create_recipe(bakery, "Country loaf").await;

    let dough = bakery
        .add_step(&StepCreate {
            recipe_id: recipe.id,
            name: "Dough".to_string(),
            duration: "4h".to_string(),
            temperature: Some(28),
            ..Default::default()
        })
        .await
        .expect("Failed to add dough");
    let levain = bakery
        .add_step(&StepCreate {
            recipe_id: recipe.id,
            super_step_id: Some(dough.id),
            name: "Levain".to_string(),
            duration: "12h".to_string(),
            temperature: Some(24),
            dynamic_temperature: true,
            second_temperature: Some(28),
            notes: None,
        })
        .await
        .expect("Failed to add levain");

    for (step_id, name, amount, kind) in [
        (dough.id, "Flour", 500.0, "flour"),
        (dough.id, "Water", 300.0, "bulk_liquid"),
        (levain.id, "Rye flour", 100.0, "flour"),
        (levain.id, "Water", 100.0, "bulk_liquid"),
    ] {
        bakery
            .add_ingredient(&IngredientCreate {
                step_id,
                name: name.to_string(),
                amount,
                kind: Some(kind.to_string()),
            })
            .await
            .expect("Failed to add ingredient");
    }

    bakery
        .get_recipe(&Id { id: recipe.id })
        .await
        .expect("Failed to load recipe")
        .expect("Recipe should exist")
}

fn utc_schedule(id: u64) -> ScheduleRecipe {
    ScheduleRecipe {
        id,
        room_temperature: Some(20),
        time_zone: Some("UTC".to_string()),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_create_and_get_recipe() {
    let (_temp_dir, bakery) = create_test_bakery().await;

    let recipe = create_recipe(&bakery, "Focaccia").await;
    assert!(recipe.id > 0);
    assert!(!recipe.is_favorite);

    let loaded = bakery
        .get_recipe(&Id { id: recipe.id })
        .await
        .expect("Failed to get recipe")
        .expect("Recipe should exist");
    assert_eq!(loaded.name, "Focaccia");
    assert!(loaded.steps.is_empty());

    let missing = bakery.get_recipe(&Id { id: 999 }).await.expect("Query failed");
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_schedule_recipe_with_substep() {
    let (_temp_dir, bakery) = create_test_bakery().await;
    let recipe = create_country_loaf(&bakery).await;

    let scheduled = bakery
        .schedule_recipe(&utc_schedule(recipe.id))
        .await
        .expect("Failed to schedule recipe");

    let dough = &scheduled.tree.roots[0];
    let levain = &dough.substeps[0];
    assert_eq!(
        scheduled.schedule.start_of(levain.id()).map(|t| t.to_string()),
        Some("2026-10-17T06:00:00Z".to_string())
    );
    assert_eq!(
        scheduled.schedule.start_of(dough.id()).map(|t| t.to_string()),
        Some("2026-10-17T18:00:00Z".to_string())
    );
    assert_eq!(scheduled.schedule.end.to_string(), "2026-10-17T22:00:00Z");

    // (28 * 1000 - 500 * 20 - 200 * 28) / 300 = 41.33
    let output = scheduled.to_string();
    assert!(output.contains("Water: 300 g at 41 °C"), "{output}");
}

#[tokio::test]
async fn test_export_recipe_text() {
    let (_temp_dir, bakery) = create_test_bakery().await;
    let recipe = create_country_loaf(&bakery).await;

    let text = bakery
        .export_recipe_text(&utc_schedule(recipe.id))
        .await
        .expect("Failed to export text");

    assert!(text.starts_with("Dough at 17.10.26, 18:00\n"));
    assert!(text.contains("Water: 300 g 41° C"));
    assert!(text.contains("Levain: 200 g 28° C"));
    assert!(text.ends_with("Finished: 17.10.26, 22:00"));
}

#[tokio::test]
async fn test_schedule_uses_stored_room_temperature() {
    let (_temp_dir, bakery) = create_test_bakery().await;
    let recipe = create_country_loaf(&bakery).await;

    assert_eq!(bakery.room_temperature().await.expect("Failed to read"), 20);
    bakery
        .set_room_temperature(&SetRoomTemperature { temperature: 26 })
        .await
        .expect("Failed to store room temperature");

    let scheduled = bakery
        .schedule_recipe(&ScheduleRecipe {
            room_temperature: None,
            ..utc_schedule(recipe.id)
        })
        .await
        .expect("Failed to schedule recipe");
    assert_eq!(scheduled.room_temperature, 26);
}

#[tokio::test]
async fn test_mutations_publish_events() {
    let (_temp_dir, bakery) = create_test_bakery().await;
    let mut events = bakery.subscribe();

    let recipe = create_recipe(&bakery, "Rye").await;
    assert_eq!(
        events.try_recv(),
        Ok(StoreEvent::RecipeCreated { id: recipe.id })
    );

    bakery
        .add_step(&StepCreate {
            recipe_id: recipe.id,
            name: "Proof".to_string(),
            duration: "60".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to add step");
    assert_eq!(
        events.try_recv(),
        Ok(StoreEvent::RecipeUpdated { id: recipe.id })
    );

    bakery
        .delete_recipe(&Id { id: recipe.id })
        .await
        .expect("Failed to delete recipe");
    assert_eq!(
        events.try_recv(),
        Ok(StoreEvent::RecipeDeleted { id: recipe.id })
    );
}

#[tokio::test]
async fn test_perform_batch_emits_single_event() {
    let (_temp_dir, bakery) = create_test_bakery().await;
    let mut events = bakery.subscribe();

    let count = bakery
        .perform_batch(BatchOptions::default(), |db| {
            for name in ["Spelt", "Emmer", "Einkorn"] {
                db.create_recipe(&NewRecipe {
                    name: name.to_string(),
                    info: String::new(),
                    difficulty: Default::default(),
                    inverted: false,
                    times: None,
                    date: jiff::Timestamp::UNIX_EPOCH,
                })?;
            }
            Ok(3)
        })
        .await
        .expect("Batch failed");

    assert_eq!(count, 3);
    assert_eq!(events.try_recv(), Ok(StoreEvent::BatchCompleted));
    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn test_perform_batch_suppressed() {
    let (_temp_dir, bakery) = create_test_bakery().await;
    let recipe = create_recipe(&bakery, "Brioche").await;
    let mut events = bakery.subscribe();

    let options = BatchOptions {
        suppress_notifications: true,
    };
    bakery
        .perform_batch(options, move |db| db.delete_recipe(recipe.id))
        .await
        .expect("Batch failed");

    assert_eq!(events.try_recv(), Err(TryRecvError::Empty));
}

#[tokio::test]
async fn test_delete_recipes_is_all_or_nothing() {
    let (_temp_dir, bakery) = create_test_bakery().await;
    let first = create_recipe(&bakery, "One").await;
    let second = create_recipe(&bakery, "Two").await;

    let result = bakery
        .delete_recipes(&DeleteRecipes {
            ids: vec![first.id, 999],
        })
        .await;
    assert!(matches!(result, Err(BakeryError::RecipeNotFound { id: 999 })));

    let remaining = bakery
        .list_recipes(&ListRecipes::default())
        .await
        .expect("Failed to list");
    assert_eq!(remaining.0.len(), 2);

    let status = bakery
        .delete_recipes(&DeleteRecipes {
            ids: vec![first.id, second.id],
        })
        .await
        .expect("Failed to delete recipes");
    assert_eq!(status.to_string(), "Success: Deleted 2 recipes\n");
}

#[tokio::test]
async fn test_update_recipe_reports_changes() {
    let (_temp_dir, bakery) = create_test_bakery().await;
    let recipe = create_recipe(&bakery, "Ciabatta").await;

    let result = bakery
        .update_recipe(UpdateRecipe {
            id: recipe.id,
            favorite: Some(true),
            inverted: Some(true),
            ..Default::default()
        })
        .await
        .expect("Failed to update recipe");

    assert!(result.resource.is_favorite);
    assert!(result.resource.inverted);
    assert_eq!(result.changes.len(), 2);

    let empty = bakery
        .update_recipe(UpdateRecipe {
            id: recipe.id,
            ..Default::default()
        })
        .await;
    assert!(matches!(empty, Err(BakeryError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_toggle_favorite() {
    let (_temp_dir, bakery) = create_test_bakery().await;
    let recipe = create_recipe(&bakery, "Pretzel").await;

    let toggled = bakery
        .toggle_favorite(&Id { id: recipe.id })
        .await
        .expect("Failed to toggle");
    assert!(toggled.is_favorite);

    let favorites = bakery
        .list_recipes(&ListRecipes {
            favorites: true,
            name: None,
        })
        .await
        .expect("Failed to list");
    assert_eq!(favorites.0.len(), 1);
}

#[tokio::test]
async fn test_move_step_rejects_cycle() {
    let (_temp_dir, bakery) = create_test_bakery().await;
    let recipe = create_country_loaf(&bakery).await;
    let dough = recipe.root_steps().next().expect("Dough should exist").id;
    let levain = recipe.steps.iter().find(|s| !s.is_root()).expect("Levain").id;

    let result = bakery
        .move_step(&MoveStep {
            id: dough,
            super_step_id: Some(levain),
        })
        .await;
    assert!(matches!(result, Err(BakeryError::InvalidInput { .. })));

    let moved = bakery
        .move_step(&MoveStep {
            id: levain,
            super_step_id: None,
        })
        .await
        .expect("Failed to move levain to the roots");
    assert!(moved.is_root());
    assert_eq!(moved.order, 1);
}

#[tokio::test]
async fn test_export_import_round_trip() {
    let (_temp_dir, bakery) = create_test_bakery().await;
    let recipe = create_country_loaf(&bakery).await;
    bakery
        .update_recipe(UpdateRecipe {
            id: recipe.id,
            favorite: Some(true),
            inverted: Some(true),
            ..Default::default()
        })
        .await
        .expect("Failed to update recipe");

    let bundle = bakery
        .export_recipes(&ExportRecipes::default())
        .await
        .expect("Failed to export");
    assert_eq!(bundle.recipes.len(), 1);
    assert!(!bundle.recipes[0].inverted);
    assert!(!bundle.recipes[0].is_favorite);

    let json = bundle.to_json().expect("Failed to serialize");
    let parsed = RecipeBundle::from_json(&json).expect("Failed to parse");

    let mut events = bakery.subscribe();
    let imported = bakery
        .import_recipes(parsed)
        .await
        .expect("Failed to import");
    assert_eq!(events.try_recv(), Ok(StoreEvent::BatchCompleted));

    assert_eq!(imported.len(), 1);
    let copy = &imported[0];
    assert_ne!(copy.id, recipe.id);
    assert_eq!(copy.name, "Country loaf");
    assert_eq!(copy.steps.len(), 2);

    let tree = bakery
        .load_recipe_tree(&Id { id: copy.id })
        .await
        .expect("Imported recipe should resolve");
    assert_eq!(tree.roots.len(), 1);
    assert_eq!(tree.roots[0].substeps.len(), 1);
    assert_eq!(tree.roots[0].total_amount(), 1000.0);
}

#[tokio::test]
async fn test_import_rejects_malformed_recipe() {
    let (_temp_dir, bakery) = create_test_bakery().await;
    let recipe = create_country_loaf(&bakery).await;

    let mut bundle = bakery
        .export_recipes(&ExportRecipes {
            ids: vec![recipe.id],
        })
        .await
        .expect("Failed to export");
    for step in &mut bundle.recipes[0].steps {
        if step.super_step_id.is_some() {
            step.super_step_id = Some(4242);
        }
    }

    let result = bakery.import_recipes(bundle).await;
    assert!(matches!(result, Err(BakeryError::MalformedRecipe { .. })));

    let recipes = bakery
        .list_recipes(&ListRecipes::default())
        .await
        .expect("Failed to list");
    assert_eq!(recipes.0.len(), 1);
}
