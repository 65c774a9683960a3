//! Row model of a recipe detail page.
//!
//! A recipe page is a flat list of heterogeneous rows. Building the list is
//! separate from rendering it, so every renderer matches over [`Row`] and the
//! compiler points out renderers that miss a variant.

use std::collections::{HashMap, HashSet};

use jiff::SignedDuration;

use crate::models::{Ingredient, IngredientKind, Recipe, Step};

/// One line of a recipe page.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// A labelled value: difficulty, anchor date, batch count
    Detail { label: String, value: String },
    /// A paragraph of free text
    Text(String),
    /// A step heading, nested `depth` levels below the root steps
    Step {
        id: u64,
        depth: usize,
        name: String,
        duration: SignedDuration,
        temperature: i32,
        end_temperature: Option<i32>,
    },
    /// An ingredient of the step above it
    Ingredient {
        name: String,
        amount: f64,
        kind: IngredientKind,
    },
}

impl Row {
    fn detail(label: &str, value: impl Into<String>) -> Self {
        Row::Detail {
            label: label.to_string(),
            value: value.into(),
        }
    }

    fn for_step(step: &Step, depth: usize) -> Self {
        Row::Step {
            id: step.id,
            depth,
            name: step.display_name().to_string(),
            duration: step.duration,
            temperature: step.temperature,
            end_temperature: step
                .is_dynamic_temperature
                .then_some(step.second_temperature),
        }
    }

    fn for_ingredient(ingredient: &Ingredient) -> Self {
        Row::Ingredient {
            name: ingredient.display_name().to_string(),
            amount: ingredient.amount,
            kind: ingredient.kind,
        }
    }
}

/// Rows of a recipe page: details, info text, then every step reachable from
/// a root followed by its ingredients, notes and substeps.
///
/// Steps that cannot be reached from a root (a broken parent link) are
/// skipped here; [`RecipeTree::resolve`](crate::models::RecipeTree::resolve)
/// is the place that reports them.
pub fn recipe_rows(recipe: &Recipe) -> Vec<Row> {
    let mut rows = vec![Row::detail("Difficulty", recipe.difficulty.as_str())];
    if let Some(times) = recipe.times {
        rows.push(Row::detail("Pieces", format!("{times}")));
    }
    if recipe.is_favorite {
        rows.push(Row::detail("Favorite", "yes"));
    }
    if !recipe.info.trim().is_empty() {
        rows.push(Row::Text(recipe.info.clone()));
    }

    let mut children: HashMap<u64, Vec<&Step>> = HashMap::new();
    for step in &recipe.steps {
        if let Some(parent) = step.super_step_id {
            children.entry(parent).or_default().push(step);
        }
    }
    for siblings in children.values_mut() {
        siblings.sort_by_key(|s| (s.order, s.id));
    }

    let mut roots: Vec<&Step> = recipe.root_steps().collect();
    roots.sort_by_key(|s| (s.order, s.id));

    let mut visited = HashSet::new();
    for root in roots {
        push_step_rows(&mut rows, root, 0, &children, &mut visited);
    }
    rows
}

fn push_step_rows(
    rows: &mut Vec<Row>,
    step: &Step,
    depth: usize,
    children: &HashMap<u64, Vec<&Step>>,
    visited: &mut HashSet<u64>,
) {
    if !visited.insert(step.id) {
        return;
    }
    rows.push(Row::for_step(step, depth));
    rows.extend(step.ingredients.iter().map(Row::for_ingredient));
    if !step.notes.trim().is_empty() {
        rows.push(Row::Text(step.notes.clone()));
    }
    for sub in children.get(&step.id).into_iter().flatten() {
        push_step_rows(rows, sub, depth + 1, children, visited);
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use super::*;
    use crate::models::Difficulty;

    fn step(id: u64, super_step_id: Option<u64>, order: u32) -> Step {
        Step {
            id,
            recipe_id: 1,
            super_step_id,
            name: format!("Step {id}"),
            duration: SignedDuration::from_mins(30),
            temperature: 24,
            is_dynamic_temperature: false,
            second_temperature: 24,
            notes: String::new(),
            order,
            ingredients: Vec::new(),
            substep_ids: Vec::new(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn recipe(steps: Vec<Step>) -> Recipe {
        Recipe {
            id: 1,
            name: "Baguette".to_string(),
            info: "Crispy".to_string(),
            is_favorite: true,
            difficulty: Difficulty::Hard,
            inverted: false,
            times: Some(3.0),
            date: Timestamp::UNIX_EPOCH,
            image_data: None,
            order: 0,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
            steps,
        }
    }

    #[test]
    fn test_rows_nest_substeps_under_parent() {
        let mut poolish = step(2, Some(1), 0);
        poolish.notes = "Overnight".to_string();
        let rows = recipe_rows(&recipe(vec![step(3, None, 1), poolish, step(1, None, 0)]));

        let steps: Vec<(u64, usize)> = rows
            .iter()
            .filter_map(|row| match row {
                Row::Step { id, depth, .. } => Some((*id, *depth)),
                _ => None,
            })
            .collect();
        assert_eq!(steps, vec![(1, 0), (2, 1), (3, 0)]);
        assert!(rows.contains(&Row::Text("Overnight".to_string())));
        assert!(rows.contains(&Row::Text("Crispy".to_string())));
        assert_eq!(
            rows[0],
            Row::Detail {
                label: "Difficulty".to_string(),
                value: "hard".to_string()
            }
        );
    }

    #[test]
    fn test_rows_skip_unreachable_cycle() {
        let rows = recipe_rows(&recipe(vec![
            step(1, None, 0),
            step(2, Some(3), 0),
            step(3, Some(2), 0),
        ]));
        let step_count = rows.iter().filter(|r| matches!(r, Row::Step { .. })).count();
        assert_eq!(step_count, 1);
    }
}
