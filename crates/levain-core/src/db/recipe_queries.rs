//! Recipe CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension, Transaction};

use super::{step_queries::load_recipe_steps, timestamp_column};
use crate::{
    error::{BakeryError, DatabaseResultExt, Result},
    models::{
        Difficulty, NewRecipe, Recipe, RecipeFilter, RecipeSummary, RecipeTree, ResolvedStep,
        UpdateRecipeRequest,
    },
};

const RECIPE_COLUMNS: &str = "id, name, info, is_favorite, difficulty, inverted, times, date, image_data, recipe_order, created_at, updated_at";
const GET_NEXT_RECIPE_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(recipe_order), -1) + 1 FROM recipes";
const INSERT_RECIPE_SQL: &str = "INSERT INTO recipes (name, info, is_favorite, difficulty, inverted, times, date, image_data, recipe_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const UPDATE_RECIPE_SQL: &str = "UPDATE recipes SET name = ?1, info = ?2, is_favorite = ?3, difficulty = ?4, inverted = ?5, times = ?6, date = ?7, image_data = ?8, updated_at = ?9 WHERE id = ?10";
const DELETE_RECIPE_SQL: &str = "DELETE FROM recipes WHERE id = ?1";
const INSERT_STEP_SQL: &str = "INSERT INTO steps (recipe_id, super_step_id, name, duration_secs, temperature, is_dynamic_temperature, second_temperature, notes, step_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const INSERT_INGREDIENT_SQL: &str = "INSERT INTO ingredients (step_id, name, amount, kind, ingredient_order) VALUES (?1, ?2, ?3, ?4, ?5)";

// Counts come from correlated subqueries so recipes without steps still show up
const SELECT_RECIPE_SUMMARIES_SQL: &str = "SELECT r.id, r.name, r.info, r.is_favorite, r.difficulty, r.created_at, r.updated_at, \
     (SELECT COUNT(*) FROM steps s WHERE s.recipe_id = r.id), \
     (SELECT COUNT(*) FROM ingredients i JOIN steps s ON s.id = i.step_id WHERE s.recipe_id = r.id) \
     FROM recipes r \
     WHERE (?1 = 0 OR r.is_favorite = 1) AND (?2 IS NULL OR r.name LIKE '%' || ?2 || '%') \
     ORDER BY r.recipe_order, r.id";

fn parse_difficulty(row: &rusqlite::Row, index: usize) -> rusqlite::Result<Difficulty> {
    let value: String = row.get(index)?;
    value.parse::<Difficulty>().map_err(|reason| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, reason.into())
    })
}

/// Inserts a resolved step, its ingredients and its substeps under `parent`.
fn insert_resolved_step(
    tx: &Transaction,
    recipe_id: i64,
    parent: Option<i64>,
    order: usize,
    step: &ResolvedStep,
    now: &str,
) -> rusqlite::Result<()> {
    let source = &step.step;
    tx.execute(
        INSERT_STEP_SQL,
        params![
            recipe_id,
            parent,
            &source.name,
            source.duration.as_secs(),
            source.temperature,
            source.is_dynamic_temperature,
            source.second_temperature,
            &source.notes,
            order as i64,
            now,
            now
        ],
    )?;
    let step_id = tx.last_insert_rowid();

    for (position, ingredient) in source.ingredients.iter().enumerate() {
        tx.execute(
            INSERT_INGREDIENT_SQL,
            params![
                step_id,
                &ingredient.name,
                ingredient.amount,
                ingredient.kind.as_string(),
                position as i64
            ],
        )?;
    }

    for (position, sub) in step.substeps.iter().enumerate() {
        insert_resolved_step(tx, recipe_id, Some(step_id), position, sub, now)?;
    }

    Ok(())
}

impl super::Database {
    /// Helper function to construct a Recipe (without steps) from a database row
    fn build_recipe_from_row(row: &rusqlite::Row) -> rusqlite::Result<Recipe> {
        Ok(Recipe {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            info: row.get(2)?,
            is_favorite: row.get(3)?,
            difficulty: parse_difficulty(row, 4)?,
            inverted: row.get(5)?,
            times: row.get(6)?,
            date: timestamp_column(row, 7)?,
            image_data: row.get(8)?,
            order: row.get::<_, i64>(9)? as u32,
            created_at: timestamp_column(row, 10)?,
            updated_at: timestamp_column(row, 11)?,
            steps: Vec::new(),
        })
    }

    fn build_summary_from_row(row: &rusqlite::Row) -> rusqlite::Result<RecipeSummary> {
        Ok(RecipeSummary {
            id: row.get::<_, i64>(0)? as u64,
            name: row.get(1)?,
            info: row.get(2)?,
            is_favorite: row.get(3)?,
            difficulty: parse_difficulty(row, 4)?,
            created_at: timestamp_column(row, 5)?,
            updated_at: timestamp_column(row, 6)?,
            step_count: row.get::<_, i64>(7)? as u32,
            ingredient_count: row.get::<_, i64>(8)? as u32,
        })
    }

    /// Creates a new recipe at the end of the recipe list.
    pub fn create_recipe(&mut self, recipe: &NewRecipe) -> Result<Recipe> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let order: i64 = tx
            .query_row(GET_NEXT_RECIPE_ORDER_SQL, [], |row| row.get(0))
            .db_context("Failed to get next recipe order")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_RECIPE_SQL,
            params![
                &recipe.name,
                &recipe.info,
                false,
                recipe.difficulty.as_str(),
                recipe.inverted,
                recipe.times,
                recipe.date.to_string(),
                None::<String>,
                order,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert recipe")?;

        let id = tx.last_insert_rowid() as u64;
        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Recipe {
            id,
            name: recipe.name.clone(),
            info: recipe.info.clone(),
            is_favorite: false,
            difficulty: recipe.difficulty,
            inverted: recipe.inverted,
            times: recipe.times,
            date: recipe.date,
            image_data: None,
            order: order as u32,
            created_at: now,
            updated_at: now,
            steps: Vec::new(),
        })
    }

    /// Gets a recipe with all of its steps and their ingredients.
    pub fn get_recipe(&self, id: u64) -> Result<Option<Recipe>> {
        let recipe = self
            .connection
            .query_row(
                &format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ?1"),
                params![id as i64],
                Self::build_recipe_from_row,
            )
            .optional()
            .db_context("Failed to query recipe")?;

        let Some(mut recipe) = recipe else {
            return Ok(None);
        };

        recipe.steps =
            load_recipe_steps(&self.connection, id).db_context("Failed to query recipe steps")?;

        Ok(Some(recipe))
    }

    /// Lists recipe summaries in list order, optionally filtered.
    pub fn list_recipes(&self, filter: Option<&RecipeFilter>) -> Result<Vec<RecipeSummary>> {
        let favorites_only = filter.is_some_and(|f| f.favorites_only);
        let name_contains = filter.and_then(|f| f.name_contains.as_deref());

        let mut stmt = self
            .connection
            .prepare(SELECT_RECIPE_SUMMARIES_SQL)
            .db_context("Failed to prepare recipe list query")?;

        let summaries = stmt
            .query_map(
                params![favorites_only, name_contains],
                Self::build_summary_from_row,
            )
            .db_context("Failed to query recipes")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read recipes")?;

        Ok(summaries)
    }

    /// Updates the given fields of a recipe.
    pub fn update_recipe(&mut self, id: u64, request: &UpdateRecipeRequest) -> Result<Recipe> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = tx
            .query_row(
                &format!("SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = ?1"),
                params![id as i64],
                Self::build_recipe_from_row,
            )
            .map_err(|e| {
                if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                    BakeryError::RecipeNotFound { id }
                } else {
                    BakeryError::database("Failed to query recipe").with_source(e)
                }
            })?;

        let name = request.name.as_deref().unwrap_or(&current.name);
        let info = request.info.as_deref().unwrap_or(&current.info);
        let is_favorite = request.is_favorite.unwrap_or(current.is_favorite);
        let difficulty = request.difficulty.unwrap_or(current.difficulty);
        let inverted = request.inverted.unwrap_or(current.inverted);
        let times = request.times.unwrap_or(current.times);
        let date = request.date.unwrap_or(current.date);
        let image_data = match &request.image_data {
            Some(image) => image.as_deref(),
            None => current.image_data.as_deref(),
        };

        tx.execute(
            UPDATE_RECIPE_SQL,
            params![
                name,
                info,
                is_favorite,
                difficulty.as_str(),
                inverted,
                times,
                date.to_string(),
                image_data,
                Timestamp::now().to_string(),
                id as i64
            ],
        )
        .db_context("Failed to update recipe")?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_recipe(id)?.ok_or(BakeryError::RecipeNotFound { id })
    }

    /// Deletes a recipe; its steps and ingredients go with it.
    pub fn delete_recipe(&mut self, id: u64) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_RECIPE_SQL, params![id as i64])
            .db_context("Failed to delete recipe")?;

        if deleted == 0 {
            return Err(BakeryError::RecipeNotFound { id });
        }
        Ok(())
    }

    /// Deletes several recipes in one transaction. Nothing is deleted when
    /// any of the IDs is unknown.
    pub fn delete_recipes(&mut self, ids: &[u64]) -> Result<usize> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        for &id in ids {
            let deleted = tx
                .execute(DELETE_RECIPE_SQL, params![id as i64])
                .db_context("Failed to delete recipe")?;
            if deleted == 0 {
                return Err(BakeryError::RecipeNotFound { id });
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(ids.len())
    }

    /// Stores a validated recipe tree as a new recipe with fresh IDs.
    ///
    /// Sibling order follows the tree, so gaps or duplicates in the source
    /// orders are normalized on the way in.
    pub fn import_recipe(&mut self, tree: &RecipeTree) -> Result<Recipe> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let order: i64 = tx
            .query_row(GET_NEXT_RECIPE_ORDER_SQL, [], |row| row.get(0))
            .db_context("Failed to get next recipe order")?;

        let now_str = Timestamp::now().to_string();
        let recipe = &tree.recipe;

        tx.execute(
            INSERT_RECIPE_SQL,
            params![
                &recipe.name,
                &recipe.info,
                recipe.is_favorite,
                recipe.difficulty.as_str(),
                recipe.inverted,
                recipe.times,
                recipe.date.to_string(),
                recipe.image_data.as_deref(),
                order,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert recipe")?;

        let id = tx.last_insert_rowid();

        for (position, root) in tree.roots.iter().enumerate() {
            insert_resolved_step(&tx, id, None, position, root, &now_str)
                .db_context("Failed to insert recipe steps")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_recipe(id as u64)?
            .ok_or(BakeryError::RecipeNotFound { id: id as u64 })
    }
}
