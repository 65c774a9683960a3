//! Validated step forest of a recipe.
//!
//! The store keeps steps in a flat table linked by `super_step_id`. Before
//! anything is scheduled the flat list is resolved into a forest here; this
//! is the only place where cycles, dangling parents, steps claimed by two
//! parents and non-positive durations are rejected. The solvers downstream
//! assume a well-formed [`RecipeTree`].

use std::collections::{HashMap, HashSet};

use jiff::SignedDuration;
use log::warn;

use super::{Recipe, Step};
use crate::error::{BakeryError, Result};

/// A step together with its resolved, ordered substeps.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStep {
    pub step: Step,
    pub substeps: Vec<ResolvedStep>,
}

impl ResolvedStep {
    /// Wrap a step without substeps.
    pub fn leaf(step: Step) -> Self {
        Self {
            step,
            substeps: Vec::new(),
        }
    }

    /// Attach substeps, keeping `substep_ids` in sync.
    pub fn with_substeps(mut step: Step, substeps: Vec<ResolvedStep>) -> Self {
        step.substep_ids = substeps.iter().map(ResolvedStep::id).collect();
        Self { step, substeps }
    }

    pub fn id(&self) -> u64 {
        self.step.id
    }

    pub fn duration(&self) -> SignedDuration {
        self.step.duration
    }

    /// Mass of the step's own ingredients plus everything its substeps bring.
    pub fn total_amount(&self) -> f64 {
        self.step.total_amount()
            + self
                .substeps
                .iter()
                .map(ResolvedStep::total_amount)
                .sum::<f64>()
    }

    /// Depth-first, pre-order walk over this step and all of its descendants.
    pub fn descendants(&self) -> Vec<&ResolvedStep> {
        let mut out = vec![self];
        for sub in &self.substeps {
            out.extend(sub.descendants());
        }
        out
    }
}

/// A recipe whose steps have been validated and arranged as a forest.
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeTree {
    /// The recipe itself; its `steps` list is empty, the steps live in `roots`
    pub recipe: Recipe,
    /// Root steps in stored order
    pub roots: Vec<ResolvedStep>,
}

impl RecipeTree {
    /// Validate the recipe's flat step list and build the forest.
    ///
    /// # Errors
    ///
    /// Returns `BakeryError::MalformedRecipe` when a step belongs to another
    /// recipe, has a non-positive duration or a negative ingredient amount,
    /// names a super step that does not exist, is claimed as substep by two
    /// different parents, or takes part in a substep cycle.
    pub fn resolve(mut recipe: Recipe) -> Result<Self> {
        let recipe_id = recipe.id;
        let steps = std::mem::take(&mut recipe.steps);

        let roots = resolve_forest(recipe_id, steps).map_err(|e| {
            warn!("Rejected steps of recipe {recipe_id}: {e}");
            e
        })?;

        Ok(Self { recipe, roots })
    }

    /// Every step of the tree, depth-first in schedule order.
    pub fn all_steps(&self) -> Vec<&ResolvedStep> {
        self.roots.iter().flat_map(ResolvedStep::descendants).collect()
    }

    /// Look up a resolved step by ID.
    pub fn find(&self, step_id: u64) -> Option<&ResolvedStep> {
        self.all_steps().into_iter().find(|s| s.id() == step_id)
    }
}

fn resolve_forest(recipe_id: u64, steps: Vec<Step>) -> Result<Vec<ResolvedStep>> {
    let mut by_id: HashMap<u64, Step> = HashMap::with_capacity(steps.len());
    for step in steps {
        validate_step(recipe_id, &step)?;
        if by_id.contains_key(&step.id) {
            return Err(BakeryError::malformed(
                recipe_id,
                format!("step {} appears more than once", step.id),
            ));
        }
        by_id.insert(step.id, step);
    }

    let listed_positions = check_parent_links(recipe_id, &by_id)?;

    let mut children: HashMap<u64, Vec<u64>> = HashMap::new();
    let mut root_ids = Vec::new();
    for step in by_id.values() {
        match step.super_step_id {
            Some(parent) => children.entry(parent).or_default().push(step.id),
            None => root_ids.push(step.id),
        }
    }

    let sort_key = |id: &u64| {
        let step = &by_id[id];
        let listed = listed_positions.get(id).copied().unwrap_or(usize::MAX);
        (listed, step.order, step.id)
    };
    root_ids.sort_by_key(sort_key);
    for ids in children.values_mut() {
        ids.sort_by_key(sort_key);
    }

    let mut roots = Vec::with_capacity(root_ids.len());
    for id in root_ids {
        roots.extend(build(id, &mut by_id, &children));
    }

    if !by_id.is_empty() {
        let mut stranded: Vec<u64> = by_id.into_keys().collect();
        stranded.sort_unstable();
        return Err(BakeryError::malformed(
            recipe_id,
            format!("steps {stranded:?} form a substep cycle"),
        ));
    }

    Ok(roots)
}

fn validate_step(recipe_id: u64, step: &Step) -> Result<()> {
    if step.recipe_id != recipe_id {
        return Err(BakeryError::malformed(
            recipe_id,
            format!("step {} belongs to recipe {}", step.id, step.recipe_id),
        ));
    }
    if step.duration <= SignedDuration::ZERO {
        return Err(BakeryError::malformed(
            recipe_id,
            format!("step {} has a non-positive duration", step.id),
        ));
    }
    if step.super_step_id == Some(step.id) {
        return Err(BakeryError::malformed(
            recipe_id,
            format!("step {} is its own super step", step.id),
        ));
    }
    if let Some(bad) = step
        .ingredients
        .iter()
        .find(|i| !i.amount.is_finite() || i.amount < 0.0)
    {
        return Err(BakeryError::malformed(
            recipe_id,
            format!("ingredient {} of step {} has amount {}", bad.id, step.id, bad.amount),
        ));
    }
    Ok(())
}

/// Checks that every parent pointer resolves and that the substep lists agree
/// with the pointers. Returns each listed step's position in its parent's list.
fn check_parent_links(recipe_id: u64, by_id: &HashMap<u64, Step>) -> Result<HashMap<u64, usize>> {
    for step in by_id.values() {
        if let Some(parent) = step.super_step_id {
            if !by_id.contains_key(&parent) {
                return Err(BakeryError::malformed(
                    recipe_id,
                    format!("step {} refers to unknown super step {parent}", step.id),
                ));
            }
        }
    }

    let mut listed_by: HashMap<u64, u64> = HashMap::new();
    let mut positions = HashMap::new();
    for parent in by_id.values() {
        let mut seen = HashSet::new();
        for (position, sub_id) in parent.substep_ids.iter().enumerate() {
            let Some(sub) = by_id.get(sub_id) else {
                return Err(BakeryError::malformed(
                    recipe_id,
                    format!("step {} lists unknown substep {sub_id}", parent.id),
                ));
            };
            if !seen.insert(*sub_id) {
                return Err(BakeryError::malformed(
                    recipe_id,
                    format!("step {} lists substep {sub_id} twice", parent.id),
                ));
            }
            if let Some(other) = listed_by.insert(*sub_id, parent.id) {
                return Err(BakeryError::malformed(
                    recipe_id,
                    format!("step {sub_id} is a substep of both {other} and {}", parent.id),
                ));
            }
            if sub.super_step_id != Some(parent.id) {
                return Err(BakeryError::malformed(
                    recipe_id,
                    format!(
                        "step {sub_id} is listed under step {} but points to {:?}",
                        parent.id, sub.super_step_id
                    ),
                ));
            }
            positions.insert(*sub_id, position);
        }
    }

    Ok(positions)
}

fn build(
    id: u64,
    by_id: &mut HashMap<u64, Step>,
    children: &HashMap<u64, Vec<u64>>,
) -> Option<ResolvedStep> {
    let step = by_id.remove(&id)?;
    let substeps = children
        .get(&id)
        .map(|ids| {
            ids.iter()
                .filter_map(|child| build(*child, by_id, children))
                .collect()
        })
        .unwrap_or_default();
    Some(ResolvedStep::with_substeps(step, substeps))
}
