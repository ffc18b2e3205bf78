//! Core domain logic for DayPlan.
//! This crate is the single source of truth for planner invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod projection;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date_key::{DateKey, MonthCursor};
pub use model::planner::{PlannerState, TaskEntry, TaskId};
pub use projection::calendar::{cell_marks, days_in_month, month_grid, CalendarCell, CellMarks};
pub use projection::progress::{
    completion_tally, day_has_tasks, day_progress, overall_tally, CompletionTally, DayProgress,
};
pub use service::planner_service::{MutationOutcome, PlannerService};
pub use store::kv::{KeyValueStore, SqliteKeyValueStore, StoreError, StoreResult};
pub use store::snapshot::{load_snapshot, save_snapshot, PlannerSnapshot, COMPLETED_KEY, TASKS_KEY};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
