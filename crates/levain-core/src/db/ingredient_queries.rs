//! Ingredient CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type, Connection, OptionalExtension};

use crate::{
    error::{BakeryError, DatabaseResultExt, Result},
    models::{Ingredient, IngredientKind, NewIngredient, UpdateIngredientRequest},
};

const INGREDIENT_COLUMNS: &str = "id, step_id, name, amount, kind, ingredient_order";
const CHECK_STEP_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM steps WHERE id = ?1)";
const GET_NEXT_INGREDIENT_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(ingredient_order), -1) + 1 FROM ingredients WHERE step_id = ?1";
const INSERT_INGREDIENT_SQL: &str = "INSERT INTO ingredients (step_id, name, amount, kind, ingredient_order) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_RECIPE_INGREDIENTS_SQL: &str = "SELECT i.id, i.step_id, i.name, i.amount, i.kind, i.ingredient_order FROM ingredients i JOIN steps s ON s.id = i.step_id WHERE s.recipe_id = ?1 ORDER BY i.step_id, i.ingredient_order, i.id";
const UPDATE_INGREDIENT_SQL: &str =
    "UPDATE ingredients SET name = ?1, amount = ?2, kind = ?3 WHERE id = ?4";
const SELECT_INGREDIENT_ORDER_SQL: &str =
    "SELECT step_id, ingredient_order FROM ingredients WHERE id = ?1";
const DELETE_INGREDIENT_SQL: &str = "DELETE FROM ingredients WHERE id = ?1";
const UPDATE_INGREDIENT_ORDERS_DECREMENT_SQL: &str = "UPDATE ingredients SET ingredient_order = ingredient_order - 1 WHERE step_id = ?1 AND ingredient_order > ?2";
const UPDATE_RECIPE_TIMESTAMP_BY_STEP_SQL: &str =
    "UPDATE recipes SET updated_at = ?1 WHERE id = (SELECT recipe_id FROM steps WHERE id = ?2)";

/// Ingredients of every step of a recipe, grouped by step and in order.
pub(super) fn load_recipe_ingredients(
    conn: &Connection,
    recipe_id: u64,
) -> rusqlite::Result<Vec<Ingredient>> {
    let mut stmt = conn.prepare(SELECT_RECIPE_INGREDIENTS_SQL)?;
    let ingredients = stmt
        .query_map(
            params![recipe_id as i64],
            super::Database::build_ingredient_from_row,
        )?
        .collect();
    ingredients
}

impl super::Database {
    /// Helper function to construct an Ingredient from a database row
    pub(super) fn build_ingredient_from_row(row: &rusqlite::Row) -> rusqlite::Result<Ingredient> {
        let kind_str: String = row.get(4)?;
        let kind = kind_str.parse::<IngredientKind>().map_err(|reason| {
            rusqlite::Error::FromSqlConversionFailure(4, Type::Text, reason.into())
        })?;

        Ok(Ingredient {
            id: row.get::<_, i64>(0)? as u64,
            step_id: row.get::<_, i64>(1)? as u64,
            name: row.get(2)?,
            amount: row.get(3)?,
            kind,
            order: row.get::<_, i64>(5)? as u32,
        })
    }

    /// Appends an ingredient to a step.
    pub fn add_ingredient(
        &mut self,
        step_id: u64,
        ingredient: &NewIngredient,
    ) -> Result<Ingredient> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let step_exists: bool = tx
            .query_row(CHECK_STEP_EXISTS_SQL, params![step_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check step existence")?;
        if !step_exists {
            return Err(BakeryError::StepNotFound { id: step_id });
        }

        let order: i64 = tx
            .query_row(
                GET_NEXT_INGREDIENT_ORDER_SQL,
                params![step_id as i64],
                |row| row.get(0),
            )
            .db_context("Failed to get next ingredient order")?;

        tx.execute(
            INSERT_INGREDIENT_SQL,
            params![
                step_id as i64,
                &ingredient.name,
                ingredient.amount,
                ingredient.kind.as_string(),
                order
            ],
        )
        .db_context("Failed to insert ingredient")?;

        let id = tx.last_insert_rowid() as u64;

        let now_str = Timestamp::now().to_string();
        tx.execute(
            UPDATE_RECIPE_TIMESTAMP_BY_STEP_SQL,
            params![&now_str, step_id as i64],
        )
        .db_context("Failed to update recipe timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Ingredient {
            id,
            step_id,
            name: ingredient.name.clone(),
            amount: ingredient.amount,
            kind: ingredient.kind,
            order: order as u32,
        })
    }

    /// Gets a single ingredient by ID.
    pub fn get_ingredient(&self, id: u64) -> Result<Option<Ingredient>> {
        self.connection
            .query_row(
                &format!("SELECT {INGREDIENT_COLUMNS} FROM ingredients WHERE id = ?1"),
                params![id as i64],
                Self::build_ingredient_from_row,
            )
            .optional()
            .db_context("Failed to query ingredient")
    }

    /// Gets the ingredients of one step in order.
    pub fn get_ingredients(&self, step_id: u64) -> Result<Vec<Ingredient>> {
        let mut stmt = self
            .connection
            .prepare(&format!(
                "SELECT {INGREDIENT_COLUMNS} FROM ingredients WHERE step_id = ?1 ORDER BY ingredient_order, id"
            ))
            .db_context("Failed to prepare ingredient query")?;

        let ingredients = stmt
            .query_map(params![step_id as i64], Self::build_ingredient_from_row)
            .db_context("Failed to query ingredients")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read ingredients")?;

        Ok(ingredients)
    }

    /// Updates the given fields of an ingredient.
    pub fn update_ingredient(
        &mut self,
        id: u64,
        request: &UpdateIngredientRequest,
    ) -> Result<Ingredient> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = tx
            .query_row(
                &format!("SELECT {INGREDIENT_COLUMNS} FROM ingredients WHERE id = ?1"),
                params![id as i64],
                Self::build_ingredient_from_row,
            )
            .map_err(|e| {
                if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                    BakeryError::IngredientNotFound { id }
                } else {
                    BakeryError::database("Failed to query ingredient").with_source(e)
                }
            })?;

        let updated = Ingredient {
            name: request.name.clone().unwrap_or(current.name),
            amount: request.amount.unwrap_or(current.amount),
            kind: request.kind.unwrap_or(current.kind),
            ..current
        };

        tx.execute(
            UPDATE_INGREDIENT_SQL,
            params![
                &updated.name,
                updated.amount,
                updated.kind.as_string(),
                id as i64
            ],
        )
        .db_context("Failed to update ingredient")?;

        let now_str = Timestamp::now().to_string();
        tx.execute(
            UPDATE_RECIPE_TIMESTAMP_BY_STEP_SQL,
            params![&now_str, updated.step_id as i64],
        )
        .db_context("Failed to update recipe timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(updated)
    }

    /// Removes an ingredient and closes the gap in its step's order.
    pub fn remove_ingredient(&mut self, id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let (step_id, order): (i64, i64) = tx
            .query_row(SELECT_INGREDIENT_ORDER_SQL, params![id as i64], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })
            .map_err(|e| {
                if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                    BakeryError::IngredientNotFound { id }
                } else {
                    BakeryError::database("Failed to query ingredient").with_source(e)
                }
            })?;

        tx.execute(DELETE_INGREDIENT_SQL, params![id as i64])
            .db_context("Failed to delete ingredient")?;

        tx.execute(
            UPDATE_INGREDIENT_ORDERS_DECREMENT_SQL,
            params![step_id, order],
        )
        .db_context("Failed to update ingredient orders")?;

        let now_str = Timestamp::now().to_string();
        tx.execute(UPDATE_RECIPE_TIMESTAMP_BY_STEP_SQL, params![&now_str, step_id])
            .db_context("Failed to update recipe timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
