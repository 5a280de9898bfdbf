//! Declarative record filtering: date bounds, dimension inclusion lists,
//! and amount bounds, applied as a pure function over a record slice.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::dates::parse_flexible_date;
use crate::errors::StudioError;
use crate::records::SalesRecord;

/// Optional date bounds; `None` on either side means unbounded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self, StudioError> {
        if let (Some(start), Some(end)) = (start, end) {
            if start > end {
                return Err(StudioError::InvalidDateRange(format!(
                    "start {start} is after end {end}"
                )));
            }
        }
        Ok(Self { start, end })
    }

    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(start) = self.start {
            if date < start {
                return false;
            }
        }
        if let Some(end) = self.end {
            if date > end {
                return false;
            }
        }
        true
    }
}

/// Tests a raw date string against a range. With no active bound every
/// record passes; with a bound active, unparseable dates are excluded.
pub fn in_date_range(raw: &str, range: &DateRange) -> bool {
    if range.is_unbounded() {
        return true;
    }
    match parse_flexible_date(raw) {
        Some(date) => range.contains(date),
        None => false,
    }
}

/// The filter selection coming from the dashboard chrome. Empty inclusion
/// lists mean "no filtering on that dimension".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterSpec {
    pub date_range: DateRange,
    pub locations: Vec<String>,
    pub categories: Vec<String>,
    pub products: Vec<String>,
    pub sold_by: Vec<String>,
    pub payment_methods: Vec<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
}

impl FilterSpec {
    /// Applies the spec to a record slice, producing the filtered subset.
    /// Pure: the source slice is never mutated, and applying the same spec
    /// to its own output returns an identical result.
    pub fn apply(&self, records: &[SalesRecord]) -> Vec<SalesRecord> {
        let filtered: Vec<SalesRecord> = records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();
        tracing::debug!(
            total = records.len(),
            kept = filtered.len(),
            "applied sales filter"
        );
        filtered
    }

    pub fn matches(&self, record: &SalesRecord) -> bool {
        in_date_range(&record.payment_date, &self.date_range)
            && matches_any(&self.locations, &record.location_label())
            && matches_any(&self.categories, &record.category_label())
            && matches_any(&self.products, &record.product_label())
            && matches_any(&self.sold_by, &record.seller_label())
            && matches_any(&self.payment_methods, &record.payment_method_label())
            && self.min_amount.map_or(true, |min| record.payment_value >= min)
            && self.max_amount.map_or(true, |max| record.payment_value <= max)
    }
}

/// Case-insensitive substring match against any configured filter value.
/// An empty list passes everything.
fn matches_any(values: &[String], label: &str) -> bool {
    if values.is_empty() {
        return true;
    }
    let label = label.to_lowercase();
    values
        .iter()
        .any(|value| label.contains(&value.to_lowercase()))
}
