use serde::{Deserialize, Serialize};

use super::labels::{label_or, UNKNOWN};
use crate::dates::{parse_month_year, MonthKey};

/// Per-trainer-per-month aggregate supplied by the payroll export. The rate
/// fields arrive string-encoded, sometimes with a trailing `%`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayrollRecord {
    pub teacher_name: String,
    pub month_year: String,
    pub location: String,
    pub cycle_sessions: u32,
    pub empty_cycle_sessions: u32,
    pub barre_sessions: u32,
    pub empty_barre_sessions: u32,
    pub cycle_revenue: f64,
    pub barre_revenue: f64,
    pub new_members: u32,
    pub converted_members: u32,
    pub retained_members: u32,
    pub conversion_rate: String,
    pub retention_rate: String,
}

impl PayrollRecord {
    pub fn teacher_label(&self) -> String {
        label_or(&[&self.teacher_name], UNKNOWN)
    }

    pub fn location_label(&self) -> String {
        label_or(&[&self.location], UNKNOWN)
    }

    /// The month bucket this row belongs to, when its `month_year` parses.
    pub fn month(&self) -> Option<MonthKey> {
        parse_month_year(&self.month_year)
    }

    pub fn total_sessions(&self) -> u32 {
        self.cycle_sessions + self.barre_sessions
    }

    pub fn total_empty_sessions(&self) -> u32 {
        self.empty_cycle_sessions + self.empty_barre_sessions
    }

    pub fn total_revenue(&self) -> f64 {
        self.cycle_revenue + self.barre_revenue
    }

    /// Conversion rate as a number, stripping a trailing `%`; 0 on junk.
    pub fn conversion_pct(&self) -> f64 {
        parse_pct(&self.conversion_rate)
    }

    pub fn retention_pct(&self) -> f64 {
        parse_pct(&self.retention_rate)
    }
}

fn parse_pct(raw: &str) -> f64 {
    raw.trim()
        .trim_end_matches('%')
        .trim()
        .parse()
        .unwrap_or(0.0)
}
