use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::group::{group_refs, SalesDimension};
use super::metrics::{growth_pct, Metric, SalesMetric};
use crate::dates::parse_flexible_date;
use crate::filter::FilterSpec;
use crate::records::SalesRecord;

/// The two calendar years a year-on-year view compares. Always supplied by
/// the caller; the engine never derives years from the wall clock, so a
/// saved comparison keeps meaning the same thing as time passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonYears {
    pub current: i32,
    pub previous: i32,
}

impl ComparisonYears {
    pub fn new(current: i32, previous: i32) -> Self {
        Self { current, previous }
    }

    /// The common case: compare a year against the one before it.
    pub fn consecutive(current: i32) -> Self {
        Self {
            current,
            previous: current - 1,
        }
    }
}

/// One key's year-on-year comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct YoyRow {
    pub key: String,
    pub current: f64,
    pub previous: f64,
    pub growth_pct: f64,
}

/// A year-on-year table plus its totals row.
#[derive(Debug, Clone, PartialEq)]
pub struct YoyReport {
    pub rows: Vec<YoyRow>,
    pub totals: YoyRow,
}

/// Compares a filtered current year against an unfiltered previous-year
/// baseline, per dimension key.
///
/// The asymmetry is intentional: the dashboard filter narrows what "now"
/// means while the historical baseline stays the full record set, so the
/// comparison reads "this selection vs. everything we did last year".
/// Totals growth is recomputed from the summed sides, never from averaging
/// per-row growth percentages.
pub fn year_on_year_sales(
    records: &[SalesRecord],
    filter: &FilterSpec,
    dimension: SalesDimension,
    metric: SalesMetric,
    years: ComparisonYears,
) -> YoyReport {
    let filtered = filter.apply(records);
    let current_side: Vec<&SalesRecord> = filtered
        .iter()
        .filter(|r| payment_year(r) == Some(years.current))
        .collect();
    let previous_side: Vec<&SalesRecord> = records
        .iter()
        .filter(|r| payment_year(r) == Some(years.previous))
        .collect();

    let current_groups = group_refs(&current_side, |r| dimension.key_of(r));
    let previous_groups = group_refs(&previous_side, |r| dimension.key_of(r));

    let mut keys: Vec<String> = current_groups
        .keys()
        .chain(previous_groups.keys())
        .cloned()
        .collect();
    keys.sort();
    keys.dedup();

    let empty: Vec<&SalesRecord> = Vec::new();
    let mut rows: Vec<YoyRow> = keys
        .into_iter()
        .map(|key| {
            let current =
                metric.compute(current_groups.get(&key).unwrap_or(&empty));
            let previous =
                metric.compute(previous_groups.get(&key).unwrap_or(&empty));
            YoyRow {
                key,
                current,
                previous,
                growth_pct: growth_pct(current, previous),
            }
        })
        .collect();
    rows.sort_by(|a, b| {
        b.current
            .partial_cmp(&a.current)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });

    let total_current = metric.compute(&current_side);
    let total_previous = metric.compute(&previous_side);
    let totals = YoyRow {
        key: "Total".to_string(),
        current: total_current,
        previous: total_previous,
        growth_pct: growth_pct(total_current, total_previous),
    };
    tracing::debug!(
        current_records = current_side.len(),
        previous_records = previous_side.len(),
        "built year-on-year report"
    );
    YoyReport { rows, totals }
}

fn payment_year(record: &SalesRecord) -> Option<i32> {
    parse_flexible_date(&record.payment_date).map(|date| date.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::DateRange;
    use chrono::NaiveDate;

    fn sale(date: &str, category: &str, value: f64) -> SalesRecord {
        SalesRecord {
            payment_date: date.into(),
            category: category.into(),
            payment_value: value,
            ..SalesRecord::default()
        }
    }

    #[test]
    fn previous_year_baseline_ignores_the_filter() {
        let records = vec![
            // Current year, inside the filter window.
            sale("10/02/2025", "Membership", 300.0),
            // Current year, outside the filter window: excluded.
            sale("10/08/2025", "Membership", 999.0),
            // Previous year, outside the filter window: still counted.
            sale("31/12/2024", "Membership", 100.0),
        ];
        let filter = FilterSpec {
            date_range: DateRange::new(
                NaiveDate::from_ymd_opt(2025, 1, 1),
                NaiveDate::from_ymd_opt(2025, 5, 31),
            )
            .unwrap(),
            ..FilterSpec::default()
        };
        let report = year_on_year_sales(
            &records,
            &filter,
            SalesDimension::Category,
            SalesMetric::Revenue,
            ComparisonYears::consecutive(2025),
        );
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].current, 300.0);
        assert_eq!(report.rows[0].previous, 100.0);
        assert_eq!(report.rows[0].growth_pct, 200.0);
    }

    #[test]
    fn zero_prior_year_reports_zero_growth() {
        let records = vec![sale("10/02/2025", "Retail", 100.0)];
        let report = year_on_year_sales(
            &records,
            &FilterSpec::default(),
            SalesDimension::Category,
            SalesMetric::Revenue,
            ComparisonYears::consecutive(2025),
        );
        assert_eq!(report.rows[0].growth_pct, 0.0);
        assert_eq!(report.totals.growth_pct, 0.0);
    }

    #[test]
    fn keys_present_only_last_year_still_get_rows() {
        let records = vec![
            sale("10/02/2025", "Membership", 300.0),
            sale("10/03/2024", "Retail", 50.0),
        ];
        let report = year_on_year_sales(
            &records,
            &FilterSpec::default(),
            SalesDimension::Category,
            SalesMetric::Revenue,
            ComparisonYears::consecutive(2025),
        );
        let retail = report
            .rows
            .iter()
            .find(|r| r.key == "Retail")
            .expect("retail row");
        assert_eq!(retail.current, 0.0);
        assert_eq!(retail.previous, 50.0);
        assert_eq!(retail.growth_pct, -100.0);
    }

    #[test]
    fn totals_growth_recomputes_from_summed_sides() {
        let records = vec![
            sale("10/02/2025", "Membership", 200.0),
            sale("10/02/2025", "Retail", 100.0),
            sale("10/02/2024", "Membership", 100.0),
            sale("10/02/2024", "Retail", 200.0),
        ];
        let report = year_on_year_sales(
            &records,
            &FilterSpec::default(),
            SalesDimension::Category,
            SalesMetric::Revenue,
            ComparisonYears::consecutive(2025),
        );
        // Per-row growths are +100% and -50%; the summed sides are equal,
        // so total growth is 0%.
        assert_eq!(report.totals.current, 300.0);
        assert_eq!(report.totals.previous, 300.0);
        assert_eq!(report.totals.growth_pct, 0.0);
    }
}
