//! Planner aggregate state and task mutations.
//!
//! # Responsibility
//! - Hold the date-indexed task map and the per-date completion index.
//! - Apply every task, completion and selection mutation in one place.
//!
//! # Invariants
//! - A date present in the task map holds a non-empty sequence.
//! - Completion membership is keyed by stable `TaskId`, so deleting a task
//!   can never leave a dangling completion entry behind.
//! - Completion entries exist only for dates that still have tasks, and
//!   sets are never empty.
//! - A rejected mutation leaves the state untouched.

use crate::model::date_key::{DateKey, MonthCursor};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Stable identifier of one task, assigned at creation.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// One task line under a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    /// Stable identity; survives edits and unrelated deletes.
    pub id: TaskId,
    /// Task text as entered (trimmed on the mutation path).
    pub text: String,
}

impl TaskEntry {
    fn new(text: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.to_string(),
        }
    }
}

/// In-memory aggregate of tasks, completion marks and UI selection
/// cursors. Constructed once per process from a loaded snapshot and
/// owned by exactly one caller.
#[derive(Debug, Clone)]
pub struct PlannerState {
    selected_date: DateKey,
    displayed_month: MonthCursor,
    tasks: BTreeMap<DateKey, Vec<TaskEntry>>,
    completed: BTreeMap<DateKey, BTreeSet<TaskId>>,
    selected_task: Option<usize>,
}

impl PlannerState {
    /// Creates an empty planner opened on `today`.
    pub fn new(today: DateKey) -> Self {
        Self {
            selected_date: today,
            displayed_month: MonthCursor::containing(today),
            tasks: BTreeMap::new(),
            completed: BTreeMap::new(),
            selected_task: None,
        }
    }

    /// Rebuilds state from persisted maps, dropping whatever violates the
    /// model invariants: empty task sequences, completion indices with no
    /// task behind them, completion dates without tasks. Duplicate
    /// indices collapse into the set.
    pub fn restore(
        today: DateKey,
        tasks: BTreeMap<DateKey, Vec<String>>,
        completed: BTreeMap<DateKey, Vec<usize>>,
    ) -> Self {
        let mut state = Self::new(today);
        for (date, texts) in tasks {
            if texts.is_empty() {
                continue;
            }
            let entries = texts.iter().map(|text| TaskEntry::new(text)).collect();
            state.tasks.insert(date, entries);
        }
        for (date, indices) in completed {
            let Some(entries) = state.tasks.get(&date) else {
                continue;
            };
            let ids: BTreeSet<TaskId> = indices
                .into_iter()
                .filter_map(|index| entries.get(index).map(|entry| entry.id))
                .collect();
            if !ids.is_empty() {
                state.completed.insert(date, ids);
            }
        }
        state
    }

    pub fn selected_date(&self) -> DateKey {
        self.selected_date
    }

    pub fn displayed_month(&self) -> MonthCursor {
        self.displayed_month
    }

    pub fn selected_task(&self) -> Option<usize> {
        self.selected_task
    }

    /// Tasks under one date, empty when the date has none.
    pub fn tasks_for(&self, date: DateKey) -> &[TaskEntry] {
        self.tasks.get(&date).map_or(&[], Vec::as_slice)
    }

    /// Dates currently holding at least one task, chronological.
    pub fn dates(&self) -> impl Iterator<Item = DateKey> + '_ {
        self.tasks.keys().copied()
    }

    /// Whether the task identified by `id` is marked completed on `date`.
    pub fn is_completed(&self, date: DateKey, id: TaskId) -> bool {
        self.completed
            .get(&date)
            .is_some_and(|set| set.contains(&id))
    }

    /// Appends a task under `date` and returns its index, the new last
    /// position. Rejects text that trims to empty.
    pub fn add_task(&mut self, date: DateKey, text: &str) -> Option<usize> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let entries = self.tasks.entry(date).or_default();
        entries.push(TaskEntry::new(text));
        Some(entries.len() - 1)
    }

    /// Replaces the text at `index` in place. Identity and completion
    /// state of the task are untouched. Rejects out-of-range indices and
    /// text that trims to empty.
    pub fn edit_task(&mut self, date: DateKey, index: usize, new_text: &str) -> bool {
        let new_text = new_text.trim();
        if new_text.is_empty() {
            return false;
        }
        match self
            .tasks
            .get_mut(&date)
            .and_then(|entries| entries.get_mut(index))
        {
            Some(entry) => {
                entry.text = new_text.to_string();
                true
            }
            None => false,
        }
    }

    /// Removes the task at `index` together with its completion mark.
    /// An emptied date disappears from both maps. Deletion always clears
    /// the task selection, whichever index was removed.
    pub fn delete_task(&mut self, date: DateKey, index: usize) -> bool {
        let Some(entries) = self.tasks.get_mut(&date) else {
            return false;
        };
        if index >= entries.len() {
            return false;
        }
        let removed = entries.remove(index);
        let emptied = entries.is_empty();
        if emptied {
            self.tasks.remove(&date);
        }
        if let Some(set) = self.completed.get_mut(&date) {
            set.remove(&removed.id);
            if emptied || set.is_empty() {
                self.completed.remove(&date);
            }
        }
        self.selected_task = None;
        true
    }

    /// Flips the completion mark of the task at `index`. An index with no
    /// task behind it is rejected rather than recorded.
    pub fn toggle_completion(&mut self, date: DateKey, index: usize) -> bool {
        let Some(id) = self
            .tasks
            .get(&date)
            .and_then(|entries| entries.get(index))
            .map(|entry| entry.id)
        else {
            return false;
        };
        let set = self.completed.entry(date).or_default();
        if !set.insert(id) {
            set.remove(&id);
            if set.is_empty() {
                self.completed.remove(&date);
            }
        }
        true
    }

    /// Drops every task and completion mark.
    pub fn clear_all(&mut self) {
        self.tasks.clear();
        self.completed.clear();
        self.selected_task = None;
    }

    /// Moves the day selection. Any task selection belongs to the old day
    /// and is cleared.
    pub fn select_date(&mut self, date: DateKey) {
        self.selected_date = date;
        self.selected_task = None;
    }

    /// Selects the task at `index` on the selected day; selecting the
    /// same index again deselects it. An index with no task is ignored.
    pub fn select_task(&mut self, index: usize) {
        if self.selected_task == Some(index) {
            self.selected_task = None;
            return;
        }
        if index < self.tasks_for(self.selected_date).len() {
            self.selected_task = Some(index);
        }
    }

    /// Shifts the displayed month without touching the day selection.
    pub fn change_month(&mut self, delta: i32) {
        self.displayed_month = self.displayed_month.shift(delta);
    }

    /// Returns calendar and selection to today.
    pub fn go_to_today(&mut self, today: DateKey) {
        self.displayed_month = MonthCursor::containing(today);
        self.selected_date = today;
        self.selected_task = None;
    }
}
