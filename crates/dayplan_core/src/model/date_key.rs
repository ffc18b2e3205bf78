//! Calendar date key and displayed-month cursor.
//!
//! # Responsibility
//! - Define the canonical `YYYY-MM-DD` key joining tasks and completion.
//! - Provide month navigation arithmetic for the calendar cursor.
//!
//! # Invariants
//! - A `DateKey` always holds a valid Gregorian calendar date.
//! - Keys are built from local calendar fields, never from a UTC timestamp
//!   split that could shift the day near midnight.
//! - The string form is zero-padded, so lexicographic order is
//!   chronological order.

use chrono::{Datelike, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

static DATE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date key regex"));

/// Canonical calendar-date key, serialized as `YYYY-MM-DD`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Builds a key from calendar fields (1-based month).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Wraps an already-validated calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's key from the local calendar.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Parses the canonical zero-padded form only.
    ///
    /// Rejects unpadded (`2025-3-9`) and out-of-calendar (`2025-02-30`)
    /// input.
    pub fn parse(value: &str) -> Option<Self> {
        if !DATE_KEY_RE.is_match(value) {
            return None;
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d").ok().map(Self)
    }

    /// Underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Displayed calendar month. `month` stays in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    year: i32,
    month: u32,
}

impl MonthCursor {
    /// Creates a cursor when `month` is a calendar month.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Cursor of the month containing `date`.
    pub fn containing(date: DateKey) -> Self {
        Self {
            year: date.date().year(),
            month: date.date().month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Moves the cursor by `delta` months, carrying years in both
    /// directions.
    pub fn shift(self, delta: i32) -> Self {
        let total = i64::from(self.year) * 12 + i64::from(self.month) - 1 + i64::from(delta);
        Self {
            year: total.div_euclid(12) as i32,
            month: (total.rem_euclid(12) + 1) as u32,
        }
    }

    /// First day of this month.
    pub fn first_day(&self) -> DateKey {
        // month is validated on construction, so day 1 always exists
        DateKey::from_ymd(self.year, self.month, 1).expect("month cursor holds a valid month")
    }
}
