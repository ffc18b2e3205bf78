//! Completion tallies and progress ratios.
//!
//! # Responsibility
//! - Count completed/total tasks per date and across the whole store.
//! - Derive the per-day progress percentage with a distinct no-data
//!   sentinel.
//!
//! # Invariants
//! - `completed <= total` holds structurally: completion is counted by
//!   matching stored task ids, never by raw set size.

use crate::model::date_key::DateKey;
use crate::model::planner::PlannerState;
use std::fmt::{Display, Formatter};

/// Completed/total counts for one date or the whole store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompletionTally {
    pub completed: usize,
    pub total: usize,
}

/// Progress of one day. `NoTasks` keeps "no tasks" distinguishable from
/// an honest 0%.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayProgress {
    NoTasks,
    Percent(u8),
}

impl Display for DayProgress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoTasks => write!(f, "—"),
            Self::Percent(value) => write!(f, "{value}%"),
        }
    }
}

/// Whether `date` holds at least one task.
pub fn day_has_tasks(state: &PlannerState, date: DateKey) -> bool {
    !state.tasks_for(date).is_empty()
}

/// Counts completed and total tasks for one date.
pub fn completion_tally(state: &PlannerState, date: DateKey) -> CompletionTally {
    let entries = state.tasks_for(date);
    let completed = entries
        .iter()
        .filter(|entry| state.is_completed(date, entry.id))
        .count();
    CompletionTally {
        completed,
        total: entries.len(),
    }
}

/// Rounded completion percentage for one date, or the no-data sentinel.
pub fn day_progress(state: &PlannerState, date: DateKey) -> DayProgress {
    let tally = completion_tally(state, date);
    if tally.total == 0 {
        return DayProgress::NoTasks;
    }
    let percent = (tally.completed as f64 / tally.total as f64 * 100.0).round() as u8;
    DayProgress::Percent(percent)
}

/// Sums tallies across every date with tasks.
pub fn overall_tally(state: &PlannerState) -> CompletionTally {
    state
        .dates()
        .fold(CompletionTally::default(), |mut acc, date| {
            let tally = completion_tally(state, date);
            acc.completed += tally.completed;
            acc.total += tally.total;
            acc
        })
}
