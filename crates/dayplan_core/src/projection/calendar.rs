//! Month grid layout and day-cell classification.
//!
//! # Responsibility
//! - Lay out one displayed month as alignment blanks plus day cells.
//! - Classify individual day cells for the rendering layer.
//!
//! # Invariants
//! - The grid week starts on Monday: leading blanks equal the first
//!   day's Monday-based weekday offset, so a month starting on Sunday
//!   gets six.
//! - Day cells cover the full Gregorian month, leap years included.

use crate::model::date_key::{DateKey, MonthCursor};
use crate::model::planner::PlannerState;
use crate::projection::progress::day_has_tasks;
use chrono::Datelike;

/// One slot of the rendered month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarCell {
    /// Alignment filler before the first day of the month.
    Blank,
    /// A day of the displayed month.
    Day(DateKey),
}

/// Render-facing classification of one day cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellMarks {
    pub is_today: bool,
    pub is_selected: bool,
    pub has_tasks: bool,
}

/// Lays out one month as leading blanks followed by one cell per day.
pub fn month_grid(cursor: MonthCursor) -> Vec<CalendarCell> {
    let leading = cursor.first_day().date().weekday().num_days_from_monday() as usize;
    let days = days_in_month(cursor);

    let mut cells = Vec::with_capacity(leading + days as usize);
    cells.extend(std::iter::repeat(CalendarCell::Blank).take(leading));
    for day in 1..=days {
        if let Some(date) = DateKey::from_ymd(cursor.year(), cursor.month(), day) {
            cells.push(CalendarCell::Day(date));
        }
    }
    cells
}

/// Gregorian day count of the cursor month.
pub fn days_in_month(cursor: MonthCursor) -> u32 {
    let first = cursor.first_day().date();
    let next = cursor.shift(1).first_day().date();
    next.signed_duration_since(first).num_days() as u32
}

/// Classifies one day cell against today, the selection and task load.
pub fn cell_marks(state: &PlannerState, date: DateKey, today: DateKey) -> CellMarks {
    CellMarks {
        is_today: date == today,
        is_selected: date == state.selected_date(),
        has_tasks: day_has_tasks(state, date),
    }
}
