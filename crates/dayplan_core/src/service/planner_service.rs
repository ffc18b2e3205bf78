//! Planner use-case service.
//!
//! # Responsibility
//! - Own the single live `PlannerState` and its backing store.
//! - Persist a full snapshot synchronously after every applied mutation.
//!
//! # Invariants
//! - A rejected mutation writes nothing.
//! - A failed write is reported, never rolled back: the in-memory change
//!   stands and the caller can warn that it may not survive a restart.
//! - Selection setters mutate cursors only and never touch the store.

use crate::model::date_key::DateKey;
use crate::model::planner::PlannerState;
use crate::store::kv::{KeyValueStore, StoreError, StoreResult};
use crate::store::snapshot::{load_snapshot, save_snapshot, PlannerSnapshot};
use log::error;

/// Result of one persisted mutation.
#[derive(Debug)]
pub enum MutationOutcome<T = ()> {
    /// Change applied and snapshot written.
    Saved(T),
    /// Change applied in memory; the snapshot write failed.
    Unsaved(T, StoreError),
    /// Input rejected; state and store untouched.
    Rejected,
}

impl<T> MutationOutcome<T> {
    /// Whether the in-memory state changed.
    pub fn applied(&self) -> bool {
        !matches!(self, Self::Rejected)
    }

    /// Applied value, when any.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Saved(value) | Self::Unsaved(value, _) => Some(value),
            Self::Rejected => None,
        }
    }
}

/// Facade owning planner state and persistence.
pub struct PlannerService<S: KeyValueStore> {
    state: PlannerState,
    store: S,
}

impl<S: KeyValueStore> PlannerService<S> {
    /// Loads the persisted snapshot and opens the planner on `today`.
    ///
    /// This is the sole initialization path; mutations never read the
    /// store again.
    pub fn open(store: S, today: DateKey) -> StoreResult<Self> {
        let snapshot = load_snapshot(&store)?;
        Ok(Self {
            state: PlannerState::restore(today, snapshot.tasks, snapshot.completed),
            store,
        })
    }

    /// Read access for projections and rendering.
    pub fn state(&self) -> &PlannerState {
        &self.state
    }

    /// Appends a task under `date`; `Saved(index)` carries its position.
    pub fn add_task(&mut self, date: DateKey, text: &str) -> MutationOutcome<usize> {
        match self.state.add_task(date, text) {
            Some(index) => self.persist(index),
            None => MutationOutcome::Rejected,
        }
    }

    /// Replaces the text of the task at `index`.
    pub fn edit_task(&mut self, date: DateKey, index: usize, new_text: &str) -> MutationOutcome {
        if self.state.edit_task(date, index, new_text) {
            self.persist(())
        } else {
            MutationOutcome::Rejected
        }
    }

    /// Removes the task at `index`.
    pub fn delete_task(&mut self, date: DateKey, index: usize) -> MutationOutcome {
        if self.state.delete_task(date, index) {
            self.persist(())
        } else {
            MutationOutcome::Rejected
        }
    }

    /// Flips the completion mark of the task at `index`.
    pub fn toggle_completion(&mut self, date: DateKey, index: usize) -> MutationOutcome {
        if self.state.toggle_completion(date, index) {
            self.persist(())
        } else {
            MutationOutcome::Rejected
        }
    }

    /// Drops every task and completion mark. Irreversible.
    pub fn clear_all(&mut self) -> MutationOutcome {
        self.state.clear_all();
        self.persist(())
    }

    pub fn select_date(&mut self, date: DateKey) {
        self.state.select_date(date);
    }

    pub fn select_task(&mut self, index: usize) {
        self.state.select_task(index);
    }

    pub fn change_month(&mut self, delta: i32) {
        self.state.change_month(delta);
    }

    pub fn go_to_today(&mut self) {
        self.state.go_to_today(DateKey::today());
    }

    fn persist<T>(&mut self, value: T) -> MutationOutcome<T> {
        let snapshot = PlannerSnapshot::capture(&self.state);
        match save_snapshot(&self.store, &snapshot) {
            Ok(()) => MutationOutcome::Saved(value),
            Err(err) => {
                error!("event=snapshot_save module=store status=error error={err}");
                MutationOutcome::Unsaved(value, err)
            }
        }
    }
}
