//! Step CRUD operations and queries.
//!
//! `step_order` is the position among siblings, so every order query is
//! scoped by `recipe_id` and `super_step_id IS ?` (which also matches the
//! NULL parent of root steps).

use std::collections::{HashMap, HashSet};

use jiff::{SignedDuration, Timestamp};
use rusqlite::{params, Connection, OptionalExtension};

use super::timestamp_column;
use crate::{
    error::{BakeryError, DatabaseResultExt, Result},
    models::{Ingredient, NewStep, Step, UpdateStepRequest},
};

const CHECK_RECIPE_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM recipes WHERE id = ?1)";
const STEP_COLUMNS: &str = "id, recipe_id, super_step_id, name, duration_secs, temperature, is_dynamic_temperature, second_temperature, notes, step_order, created_at, updated_at";
const SELECT_STEP_PLACEMENT_SQL: &str =
    "SELECT recipe_id, super_step_id, step_order FROM steps WHERE id = ?1";
const GET_NEXT_SIBLING_ORDER_SQL: &str = "SELECT COALESCE(MAX(step_order), -1) + 1 FROM steps WHERE recipe_id = ?1 AND super_step_id IS ?2";
const INSERT_STEP_SQL: &str = "INSERT INTO steps (recipe_id, super_step_id, name, duration_secs, temperature, is_dynamic_temperature, second_temperature, notes, step_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)";
const UPDATE_STEP_SQL: &str = "UPDATE steps SET name = ?1, duration_secs = ?2, temperature = ?3, is_dynamic_temperature = ?4, second_temperature = ?5, notes = ?6, updated_at = ?7 WHERE id = ?8";
const UPDATE_STEP_PLACEMENT_SQL: &str =
    "UPDATE steps SET super_step_id = ?1, step_order = ?2, updated_at = ?3 WHERE id = ?4";
const UPDATE_STEP_ORDER_SQL: &str =
    "UPDATE steps SET step_order = ?1, updated_at = ?2 WHERE id = ?3";
const UPDATE_SIBLING_ORDERS_DECREMENT_SQL: &str = "UPDATE steps SET step_order = step_order - 1 WHERE recipe_id = ?1 AND super_step_id IS ?2 AND step_order > ?3";
const SELECT_SUPER_STEP_SQL: &str = "SELECT super_step_id FROM steps WHERE id = ?1";
const SELECT_SUBSTEP_IDS_SQL: &str =
    "SELECT id FROM steps WHERE super_step_id = ?1 ORDER BY step_order, id";
const DELETE_STEP_SQL: &str = "DELETE FROM steps WHERE id = ?1";
const UPDATE_RECIPE_TIMESTAMP_SQL: &str = "UPDATE recipes SET updated_at = ?1 WHERE id = ?2";

/// Where a step sits: its recipe, its parent and its position among siblings.
struct Placement {
    recipe_id: i64,
    super_step_id: Option<i64>,
    order: i64,
}

fn placement(conn: &Connection, step_id: u64) -> Result<Placement> {
    conn.query_row(SELECT_STEP_PLACEMENT_SQL, params![step_id as i64], |row| {
        Ok(Placement {
            recipe_id: row.get(0)?,
            super_step_id: row.get(1)?,
            order: row.get(2)?,
        })
    })
    .map_err(|e| {
        if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
            BakeryError::StepNotFound { id: step_id }
        } else {
            BakeryError::database("Failed to query step").with_source(e)
        }
    })
}

fn next_sibling_order(
    conn: &Connection,
    recipe_id: i64,
    super_step_id: Option<i64>,
) -> Result<i64> {
    conn.query_row(
        GET_NEXT_SIBLING_ORDER_SQL,
        params![recipe_id, super_step_id],
        |row| row.get(0),
    )
    .db_context("Failed to get next step order")
}

/// Whether `ancestor` is `step_id` itself or one of its super steps.
fn is_ancestor_or_self(conn: &Connection, ancestor: u64, step_id: u64) -> Result<bool> {
    let mut current = Some(step_id as i64);
    let mut seen = HashSet::new();
    while let Some(id) = current {
        if id == ancestor as i64 {
            return Ok(true);
        }
        if !seen.insert(id) {
            break;
        }
        current = conn
            .query_row(SELECT_SUPER_STEP_SQL, params![id], |row| {
                row.get::<_, Option<i64>>(0)
            })
            .optional()
            .db_context("Failed to walk super steps")?
            .flatten();
    }
    Ok(false)
}

/// Loads every step of a recipe with ingredients and substep IDs, ordered by
/// sibling position.
pub(super) fn load_recipe_steps(conn: &Connection, recipe_id: u64) -> rusqlite::Result<Vec<Step>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {STEP_COLUMNS} FROM steps WHERE recipe_id = ?1 ORDER BY step_order, id"
    ))?;
    let mut steps = stmt
        .query_map(params![recipe_id as i64], super::Database::build_step_from_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let mut ingredients: HashMap<u64, Vec<Ingredient>> = HashMap::new();
    for ingredient in super::ingredient_queries::load_recipe_ingredients(conn, recipe_id)? {
        ingredients.entry(ingredient.step_id).or_default().push(ingredient);
    }

    let mut children: HashMap<u64, Vec<u64>> = HashMap::new();
    for step in &steps {
        if let Some(parent) = step.super_step_id {
            children.entry(parent).or_default().push(step.id);
        }
    }

    for step in &mut steps {
        step.ingredients = ingredients.remove(&step.id).unwrap_or_default();
        step.substep_ids = children.remove(&step.id).unwrap_or_default();
    }

    Ok(steps)
}

impl super::Database {
    /// Helper function to construct a Step from a database row
    pub(super) fn build_step_from_row(row: &rusqlite::Row) -> rusqlite::Result<Step> {
        Ok(Step {
            id: row.get::<_, i64>(0)? as u64,
            recipe_id: row.get::<_, i64>(1)? as u64,
            super_step_id: row.get::<_, Option<i64>>(2)?.map(|id| id as u64),
            name: row.get(3)?,
            duration: SignedDuration::from_secs(row.get(4)?),
            temperature: row.get(5)?,
            is_dynamic_temperature: row.get(6)?,
            second_temperature: row.get(7)?,
            notes: row.get(8)?,
            order: row.get::<_, i64>(9)? as u32,
            ingredients: Vec::new(),
            substep_ids: Vec::new(),
            created_at: timestamp_column(row, 10)?,
            updated_at: timestamp_column(row, 11)?,
        })
    }

    /// Adds a step to a recipe, after the last of its future siblings.
    ///
    /// With `super_step_id` the step becomes the last substep of that step,
    /// which must belong to the same recipe.
    pub fn add_step(
        &mut self,
        recipe_id: u64,
        super_step_id: Option<u64>,
        step: &NewStep,
    ) -> Result<Step> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let recipe_exists: bool = tx
            .query_row(CHECK_RECIPE_EXISTS_SQL, params![recipe_id as i64], |row| {
                row.get(0)
            })
            .db_context("Failed to check recipe existence")?;
        if !recipe_exists {
            return Err(BakeryError::RecipeNotFound { id: recipe_id });
        }

        if let Some(parent_id) = super_step_id {
            let parent = placement(&tx, parent_id)?;
            if parent.recipe_id != recipe_id as i64 {
                return Err(BakeryError::invalid_input("super_step_id").with_reason(format!(
                    "Step {parent_id} belongs to recipe {}, not {recipe_id}",
                    parent.recipe_id
                )));
            }
        }

        let parent = super_step_id.map(|id| id as i64);
        let order = next_sibling_order(&tx, recipe_id as i64, parent)?;
        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_STEP_SQL,
            params![
                recipe_id as i64,
                parent,
                &step.name,
                step.duration.as_secs(),
                step.temperature,
                step.is_dynamic_temperature,
                step.second_temperature,
                &step.notes,
                order,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert step")?;

        let id = tx.last_insert_rowid() as u64;

        tx.execute(UPDATE_RECIPE_TIMESTAMP_SQL, params![&now_str, recipe_id as i64])
            .db_context("Failed to update recipe timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Step {
            id,
            recipe_id,
            super_step_id,
            name: step.name.clone(),
            duration: step.duration,
            temperature: step.temperature,
            is_dynamic_temperature: step.is_dynamic_temperature,
            second_temperature: step.second_temperature,
            notes: step.notes.clone(),
            order: order as u32,
            ingredients: Vec::new(),
            substep_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Updates the given fields of a step.
    ///
    /// Turning the dynamic temperature on without a second temperature starts
    /// the change at the step's own temperature.
    pub fn update_step(&mut self, step_id: u64, request: &UpdateStepRequest) -> Result<Step> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = tx
            .query_row(
                &format!("SELECT {STEP_COLUMNS} FROM steps WHERE id = ?1"),
                params![step_id as i64],
                Self::build_step_from_row,
            )
            .map_err(|e| {
                if matches!(e, rusqlite::Error::QueryReturnedNoRows) {
                    BakeryError::StepNotFound { id: step_id }
                } else {
                    BakeryError::database("Failed to query step").with_source(e)
                }
            })?;

        let temperature = request.temperature.unwrap_or(current.temperature);
        let is_dynamic = request
            .is_dynamic_temperature
            .unwrap_or(current.is_dynamic_temperature);
        let second_temperature = match request.second_temperature {
            Some(second) => second,
            None if is_dynamic && !current.is_dynamic_temperature => temperature,
            None => current.second_temperature,
        };
        let name = request.name.as_deref().unwrap_or(&current.name);
        let duration = request.duration.unwrap_or(current.duration);
        let notes = request.notes.as_deref().unwrap_or(&current.notes);

        let now_str = Timestamp::now().to_string();
        tx.execute(
            UPDATE_STEP_SQL,
            params![
                name,
                duration.as_secs(),
                temperature,
                is_dynamic,
                second_temperature,
                notes,
                &now_str,
                step_id as i64
            ],
        )
        .db_context("Failed to update step")?;

        tx.execute(
            UPDATE_RECIPE_TIMESTAMP_SQL,
            params![&now_str, current.recipe_id as i64],
        )
        .db_context("Failed to update recipe timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_step(step_id)?
            .ok_or(BakeryError::StepNotFound { id: step_id })
    }

    /// Gets all steps of a recipe, substeps included, ordered by position.
    pub fn get_steps(&self, recipe_id: u64) -> Result<Vec<Step>> {
        load_recipe_steps(&self.connection, recipe_id).db_context("Failed to query steps")
    }

    /// Gets a single step with its ingredients and substep IDs.
    pub fn get_step(&self, step_id: u64) -> Result<Option<Step>> {
        let step = self
            .connection
            .query_row(
                &format!("SELECT {STEP_COLUMNS} FROM steps WHERE id = ?1"),
                params![step_id as i64],
                Self::build_step_from_row,
            )
            .optional()
            .db_context("Failed to query step")?;

        let Some(mut step) = step else {
            return Ok(None);
        };

        step.ingredients = self.get_ingredients(step_id)?;

        let mut stmt = self
            .connection
            .prepare(SELECT_SUBSTEP_IDS_SQL)
            .db_context("Failed to prepare substep query")?;
        step.substep_ids = stmt
            .query_map(params![step_id as i64], |row| {
                row.get::<_, i64>(0).map(|id| id as u64)
            })
            .db_context("Failed to query substeps")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read substeps")?;

        Ok(Some(step))
    }

    /// Re-parents a step: `None` makes it a root step, `Some(id)` the last
    /// substep of `id`. Its former siblings close the gap it leaves.
    ///
    /// # Errors
    ///
    /// * `BakeryError::InvalidInput` - the new parent is in another recipe, or
    ///   is the step itself or one of its substeps
    pub fn move_step(&mut self, step_id: u64, super_step_id: Option<u64>) -> Result<Step> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = placement(&tx, step_id)?;
        let new_parent = super_step_id.map(|id| id as i64);

        if current.super_step_id != new_parent {
            if let Some(parent_id) = super_step_id {
                let parent = placement(&tx, parent_id)?;
                if parent.recipe_id != current.recipe_id {
                    return Err(BakeryError::invalid_input("super_step_id").with_reason(
                        format!("Step {parent_id} belongs to another recipe"),
                    ));
                }
                if is_ancestor_or_self(&tx, step_id, parent_id)? {
                    return Err(BakeryError::invalid_input("super_step_id").with_reason(format!(
                        "Moving step {step_id} under step {parent_id} would create a cycle"
                    )));
                }
            }

            let order = next_sibling_order(&tx, current.recipe_id, new_parent)?;
            let now_str = Timestamp::now().to_string();

            tx.execute(
                UPDATE_STEP_PLACEMENT_SQL,
                params![new_parent, order, &now_str, step_id as i64],
            )
            .db_context("Failed to move step")?;

            tx.execute(
                UPDATE_SIBLING_ORDERS_DECREMENT_SQL,
                params![current.recipe_id, current.super_step_id, current.order],
            )
            .db_context("Failed to update step orders")?;

            tx.execute(
                UPDATE_RECIPE_TIMESTAMP_SQL,
                params![&now_str, current.recipe_id],
            )
            .db_context("Failed to update recipe timestamp")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        self.get_step(step_id)?
            .ok_or(BakeryError::StepNotFound { id: step_id })
    }

    /// Swaps the positions of two sibling steps.
    pub fn swap_steps(&mut self, step_id1: u64, step_id2: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let first = placement(&tx, step_id1)?;
        let second = placement(&tx, step_id2)?;

        if first.recipe_id != second.recipe_id || first.super_step_id != second.super_step_id {
            return Err(BakeryError::invalid_input("step_ids")
                .with_reason("Only steps with the same super step can be swapped"));
        }

        let now_str = Timestamp::now().to_string();

        tx.execute(
            UPDATE_STEP_ORDER_SQL,
            params![second.order, &now_str, step_id1 as i64],
        )
        .db_context("Failed to update first step order")?;

        tx.execute(
            UPDATE_STEP_ORDER_SQL,
            params![first.order, &now_str, step_id2 as i64],
        )
        .db_context("Failed to update second step order")?;

        tx.execute(UPDATE_RECIPE_TIMESTAMP_SQL, params![&now_str, first.recipe_id])
            .db_context("Failed to update recipe timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Removes a step together with its substeps and all their ingredients.
    pub fn remove_step(&mut self, step_id: u64) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let current = placement(&tx, step_id)?;

        // Substeps and ingredients go through ON DELETE CASCADE
        tx.execute(DELETE_STEP_SQL, params![step_id as i64])
            .db_context("Failed to delete step")?;

        tx.execute(
            UPDATE_SIBLING_ORDERS_DECREMENT_SQL,
            params![current.recipe_id, current.super_step_id, current.order],
        )
        .db_context("Failed to update step orders")?;

        let now_str = Timestamp::now().to_string();
        tx.execute(
            UPDATE_RECIPE_TIMESTAMP_SQL,
            params![&now_str, current.recipe_id],
        )
        .db_context("Failed to update recipe timestamp")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }
}
