//! Pure computations over a validated [`RecipeTree`](crate::models::RecipeTree).
//!
//! - [`schedule`]: start timestamp of every step, critical path first
//! - [`temperature`]: temperature each bulk liquid must be prepared at
//!
//! Nothing in here touches the store or fails; malformed step sets are
//! rejected earlier by [`RecipeTree::resolve`](crate::models::RecipeTree::resolve).

pub mod schedule;
pub mod temperature;

#[cfg(test)]
mod tests;

pub use schedule::{schedule_starts, span, total_duration, CriticalPath, Schedule, Scheduler};
pub use temperature::{bulk_liquid_temperatures, required_temperature};
