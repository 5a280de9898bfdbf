//! Date normalization for heterogeneous upstream date strings, plus the
//! calendar-month buckets used by month-on-month tables.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const MIN_PLAUSIBLE_YEAR: i32 = 1900;
const MAX_PLAUSIBLE_YEAR: i32 = 2100;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Parses one of the date formats seen in upstream exports into a calendar
/// date. Tries `DD/MM/YYYY` first, then `YYYY-MM-DD`, then a short list of
/// fallbacks including a month/day-swapped reading. Returns `None` for
/// anything unparseable; callers treat that as "exclude from date-bounded
/// operations", never as an error.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Timestamps like "04/01/2025 17:30:00" keep only the date token.
    let token = trimmed.split_whitespace().next().unwrap_or(trimmed);

    if let Some(date) = parse_day_month_year(token) {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(token, "%Y-%m-%d") {
        return checked(date, token);
    }
    for format in ["%d-%m-%Y", "%m/%d/%Y", "%Y/%m/%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(token, format) {
            if let Some(date) = checked(date, token) {
                return Some(date);
            }
        }
    }
    None
}

/// Fixed-width `DD/MM/YYYY` match: exactly three `/`-separated numeric
/// groups with a four-digit year.
fn parse_day_month_year(token: &str) -> Option<NaiveDate> {
    let mut parts = token.split('/');
    let day = parts.next()?;
    let month = parts.next()?;
    let year = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    if day.is_empty() || day.len() > 2 || month.is_empty() || month.len() > 2 || year.len() != 4 {
        return None;
    }
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = year.parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    checked(date, token)
}

/// Rejects implausible years and results whose year does not match the
/// four-digit year token in the input (guards against silent month/day
/// swap corruption in the fallback formats).
fn checked(date: NaiveDate, token: &str) -> Option<NaiveDate> {
    if !(MIN_PLAUSIBLE_YEAR..=MAX_PLAUSIBLE_YEAR).contains(&date.year()) {
        return None;
    }
    match year_token(token) {
        Some(year) if year != date.year() => None,
        _ => Some(date),
    }
}

fn year_token(token: &str) -> Option<i32> {
    token
        .split(|c: char| !c.is_ascii_digit())
        .find(|part| part.len() == 4)
        .and_then(|part| part.parse().ok())
}

/// One calendar month, the column bucket of month-on-month tables.
/// Ordering is chronological.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The month immediately before this one.
    pub fn pred(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Human-readable label, e.g. `"Jan 2025"`.
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Parses payroll-style month buckets: `"Jan-2025"`, `"2025-01"`, `"01/2025"`.
pub fn parse_month_year(raw: &str) -> Option<MonthKey> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let (first, second) = trimmed
        .split_once('-')
        .or_else(|| trimmed.split_once('/'))?;
    let (first, second) = (first.trim(), second.trim());

    if first.len() == 4 && first.chars().all(|c| c.is_ascii_digit()) {
        return MonthKey::new(first.parse().ok()?, second.parse().ok()?);
    }
    let year: i32 = second.parse().ok()?;
    if first.chars().all(|c| c.is_ascii_digit()) {
        return MonthKey::new(year, first.parse().ok()?);
    }
    let name = first.get(..3)?;
    let month = MONTH_NAMES
        .iter()
        .position(|m| m.eq_ignore_ascii_case(name))? as u32
        + 1;
    MonthKey::new(year, month)
}

/// Generates the declared month axis for month-on-month tables: every month
/// from `newest` down to `oldest` inclusive, independent of what the data
/// contains.
pub fn month_axis(newest: MonthKey, oldest: MonthKey) -> Vec<MonthKey> {
    let mut axis = Vec::new();
    let mut cursor = newest;
    while cursor >= oldest {
        axis.push(cursor);
        cursor = cursor.pred();
    }
    axis
}
