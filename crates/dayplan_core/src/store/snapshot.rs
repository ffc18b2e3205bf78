//! Two-blob snapshot codec over the key-value store.
//!
//! # Responsibility
//! - Serialize the task and completion maps into their wire keys.
//! - Decode each half tolerantly: corruption degrades to an empty half.
//!
//! # Invariants
//! - Completion is persisted as positional indices into the same save's
//!   task sequences, matching the original wire layout.
//! - Both keys are written through `put_many` in one visible step.

use crate::model::date_key::DateKey;
use crate::model::planner::PlannerState;
use crate::store::kv::{KeyValueStore, StoreResult};
use log::{info, warn};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;

/// Wire key of the task map blob.
pub const TASKS_KEY: &str = "plannerTasks";
/// Wire key of the completion map blob.
pub const COMPLETED_KEY: &str = "plannerCompleted";

/// Decoded persisted halves, not yet reconciled against model
/// invariants. `PlannerState::restore` does the reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannerSnapshot {
    pub tasks: BTreeMap<DateKey, Vec<String>>,
    pub completed: BTreeMap<DateKey, Vec<usize>>,
}

impl PlannerSnapshot {
    /// Projects live state into the wire maps. Completion ids become the
    /// positional indices of their tasks at capture time.
    pub fn capture(state: &PlannerState) -> Self {
        let mut tasks = BTreeMap::new();
        let mut completed = BTreeMap::new();
        for date in state.dates() {
            let entries = state.tasks_for(date);
            tasks.insert(
                date,
                entries.iter().map(|entry| entry.text.clone()).collect(),
            );

            let indices: Vec<usize> = entries
                .iter()
                .enumerate()
                .filter(|(_, entry)| state.is_completed(date, entry.id))
                .map(|(index, _)| index)
                .collect();
            if !indices.is_empty() {
                completed.insert(date, indices);
            }
        }
        Self { tasks, completed }
    }
}

/// Loads both halves. A half that is missing or unparseable comes back
/// empty while the other half still loads; only transport errors
/// propagate.
pub fn load_snapshot(store: &impl KeyValueStore) -> StoreResult<PlannerSnapshot> {
    let snapshot = PlannerSnapshot {
        tasks: decode_half(store.get(TASKS_KEY)?, TASKS_KEY),
        completed: decode_half(store.get(COMPLETED_KEY)?, COMPLETED_KEY),
    };
    info!(
        "event=snapshot_load module=store status=ok dates={}",
        snapshot.tasks.len()
    );
    Ok(snapshot)
}

/// Writes both halves in one visible step.
pub fn save_snapshot(store: &impl KeyValueStore, snapshot: &PlannerSnapshot) -> StoreResult<()> {
    let tasks_json = serde_json::to_string(&snapshot.tasks)?;
    let completed_json = serde_json::to_string(&snapshot.completed)?;
    store.put_many(&[
        (TASKS_KEY, tasks_json.as_str()),
        (COMPLETED_KEY, completed_json.as_str()),
    ])
}

fn decode_half<T: DeserializeOwned + Default>(raw: Option<String>, key: &str) -> T {
    let Some(text) = raw else {
        return T::default();
    };
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(err) => {
            warn!("event=snapshot_decode module=store status=recovered key={key} error={err}");
            T::default()
        }
    }
}
