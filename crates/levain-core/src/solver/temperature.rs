//! Bulk-liquid temperature from a mass-weighted temperature balance.
//!
//! Everything mixed into a step ends up at one temperature. Ingredients come
//! in at room temperature, substeps at the temperature they ended with, and
//! the bulk liquid makes up the difference:
//!
//! ```text
//! liquid = (target × total mass − Σ known mass × temperature) / liquid mass
//! ```

use crate::models::{Ingredient, ResolvedStep};

/// Temperature the given bulk liquid must have so that `step` reaches its
/// target temperature.
///
/// Substeps count as single ingredients of their total mass at their end
/// temperature. The result is truncated toward zero; a bulk liquid without
/// mass yields `0`.
///
/// `bulk_liquid` is expected to be one of the step's direct ingredients.
pub fn required_temperature(
    step: &ResolvedStep,
    bulk_liquid: &Ingredient,
    room_temperature: i32,
) -> i32 {
    if bulk_liquid.amount == 0.0 {
        return 0;
    }

    let room = f64::from(room_temperature);
    let mut known = 0.0;
    let mut total = 0.0;

    for ingredient in &step.step.ingredients {
        if !ingredient.is_bulk_liquid() {
            known += ingredient.amount * room;
        }
        total += ingredient.amount;
    }

    for sub in &step.substeps {
        let mass = sub.total_amount();
        known += mass * f64::from(sub.step.end_temperature());
        total += mass;
    }

    let balance = f64::from(step.step.temperature) * total - known;
    (balance / bulk_liquid.amount) as i32
}

/// Required temperature of every bulk liquid of `step`, keyed by ingredient
/// ID, in ingredient order.
pub fn bulk_liquid_temperatures(step: &ResolvedStep, room_temperature: i32) -> Vec<(u64, i32)> {
    step.step
        .ingredients
        .iter()
        .filter(|i| i.is_bulk_liquid())
        .map(|liquid| (liquid.id, required_temperature(step, liquid, room_temperature)))
        .collect()
}
