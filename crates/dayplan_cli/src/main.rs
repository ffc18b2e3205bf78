//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `dayplan_core` linkage.
//! - Keep output deterministic enough for quick local sanity checks.

use dayplan_core::{month_grid, DateKey, MonthCursor};

fn main() {
    let today = DateKey::today();
    let cells = month_grid(MonthCursor::containing(today)).len();
    println!("dayplan_core version={}", dayplan_core::core_version());
    println!("dayplan_core today={today} month_cells={cells}");
}
