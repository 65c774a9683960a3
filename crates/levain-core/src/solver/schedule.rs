//! Start-time computation for a recipe's step forest.

use std::{collections::BTreeMap, fmt, str::FromStr};

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use crate::models::{RecipeTree, ResolvedStep};

/// How the critical substep of a step is chosen.
///
/// The critical substep starts at the step's branch cursor; every other
/// substep is scheduled to finish together with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriticalPath {
    /// The substep whose branch takes longest; the first one on ties
    #[default]
    Longest,
    /// Always the first substep in stored order
    FirstInOrder,
}

impl CriticalPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            CriticalPath::Longest => "longest",
            CriticalPath::FirstInOrder => "first",
        }
    }

    /// Index of the critical substep among `substeps`, `None` if there are none.
    pub fn pick(&self, substeps: &[ResolvedStep]) -> Option<usize> {
        if substeps.is_empty() {
            return None;
        }
        match self {
            CriticalPath::FirstInOrder => Some(0),
            CriticalPath::Longest => {
                let mut best = 0;
                let mut best_span = span(&substeps[0], *self);
                for (index, sub) in substeps.iter().enumerate().skip(1) {
                    let sub_span = span(sub, *self);
                    if sub_span > best_span {
                        best = index;
                        best_span = sub_span;
                    }
                }
                Some(best)
            }
        }
    }
}

impl FromStr for CriticalPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "longest" => Ok(CriticalPath::Longest),
            "first" | "first_in_order" => Ok(CriticalPath::FirstInOrder),
            _ => Err(format!(
                "Invalid critical path policy: {s}. Must be 'longest' or 'first'"
            )),
        }
    }
}

impl fmt::Display for CriticalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Computed start times of every step plus the recipe's bounds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Start of every step, keyed by step ID
    pub starts: BTreeMap<u64, Timestamp>,
    /// When the first branch begins
    pub start: Timestamp,
    /// When the last root step is done
    pub end: Timestamp,
    /// `end - start`
    pub total_duration: SignedDuration,
}

impl Schedule {
    pub fn start_of(&self, step_id: u64) -> Option<Timestamp> {
        self.starts.get(&step_id).copied()
    }

    /// When the given step is done.
    pub fn end_of(&self, step: &ResolvedStep) -> Option<Timestamp> {
        self.start_of(step.id())
            .map(|start| shift(start, step.duration()))
    }
}

/// Schedules recipe trees with a fixed critical path policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scheduler {
    policy: CriticalPath,
}

impl Scheduler {
    pub fn new(policy: CriticalPath) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> CriticalPath {
        self.policy
    }

    /// Schedule a validated tree around the recipe's own anchor date.
    pub fn schedule(&self, tree: &RecipeTree) -> Schedule {
        schedule_starts(
            &tree.roots,
            tree.recipe.date,
            tree.recipe.inverted,
            self.policy,
        )
    }
}

/// Time from the moment a step's branch starts until the step is done: its
/// own duration plus the span of its critical substep.
pub fn span(step: &ResolvedStep, policy: CriticalPath) -> SignedDuration {
    let critical = policy
        .pick(&step.substeps)
        .map(|index| span(&step.substeps[index], policy))
        .unwrap_or(SignedDuration::ZERO);
    step.duration().saturating_add(critical)
}

/// Sum of the spans of all root steps.
pub fn total_duration(roots: &[ResolvedStep], policy: CriticalPath) -> SignedDuration {
    roots
        .iter()
        .fold(SignedDuration::ZERO, |acc, root| acc.saturating_add(span(root, policy)))
}

/// Compute the start timestamp of every step.
///
/// Roots run one after another. Within a step the critical substep starts at
/// the cursor, the remaining substeps end when the critical one ends, and the
/// step itself starts at that moment. With `inverted` the anchor is the end of
/// the whole recipe, otherwise its start.
///
/// ```rust
/// use jiff::{SignedDuration, Timestamp};
/// use levain_core::solver::{schedule_starts, CriticalPath};
///
/// let anchor: Timestamp = "2026-10-17T08:00:00Z".parse()?;
/// let schedule = schedule_starts(&[], anchor, true, CriticalPath::Longest);
/// assert_eq!(schedule.start, anchor);
/// assert_eq!(schedule.total_duration, SignedDuration::ZERO);
/// # Ok::<(), jiff::Error>(())
/// ```
pub fn schedule_starts(
    roots: &[ResolvedStep],
    anchor: Timestamp,
    inverted: bool,
    policy: CriticalPath,
) -> Schedule {
    let total = total_duration(roots, policy);
    let start = if inverted {
        shift(anchor, -total)
    } else {
        anchor
    };

    let mut starts = BTreeMap::new();
    let mut cursor = start;
    for root in roots {
        cursor = place(root, cursor, policy, &mut starts);
    }

    Schedule {
        starts,
        start,
        end: shift(start, total),
        total_duration: total,
    }
}

/// Schedule `step`'s branch beginning at `cursor`; returns when the step ends.
fn place(
    step: &ResolvedStep,
    cursor: Timestamp,
    policy: CriticalPath,
    starts: &mut BTreeMap<u64, Timestamp>,
) -> Timestamp {
    let own_start = match policy.pick(&step.substeps) {
        None => cursor,
        Some(critical) => {
            let sub_end = place(&step.substeps[critical], cursor, policy, starts);
            for (index, sub) in step.substeps.iter().enumerate() {
                if index != critical {
                    place(sub, shift(sub_end, -span(sub, policy)), policy, starts);
                }
            }
            sub_end
        }
    };
    starts.insert(step.id(), own_start);
    shift(own_start, step.duration())
}

/// `timestamp + duration`, clamped to the representable range.
pub(crate) fn shift(timestamp: Timestamp, duration: SignedDuration) -> Timestamp {
    timestamp.checked_add(duration).unwrap_or(if duration.is_negative() {
        Timestamp::MIN
    } else {
        Timestamp::MAX
    })
}
