use super::group::{group_by, group_refs, SalesDimension};
use super::metrics::{LeadMetric, PayrollMetric, SalesMetric};
use super::pivot::{aligned_row, pivot_with_columns, PivotRow, PivotTable};
use crate::dates::{parse_flexible_date, MonthKey};
use crate::records::{LeadRecord, PayrollRecord, SalesRecord, UNKNOWN};

/// Month-on-month sales matrix: one row per dimension key, one column per
/// axis month. The axis is declared up front, so months without data appear
/// as zero columns.
pub fn month_on_month(
    records: &[SalesRecord],
    dimension: SalesDimension,
    metric: SalesMetric,
    axis: &[MonthKey],
) -> PivotTable {
    pivot_with_columns(
        records,
        |r| dimension.key_of(r),
        |r| SalesDimension::Month.key_of(r),
        axis_labels(axis),
        &metric,
    )
}

/// A parent pivot row with per-child rows nested beneath it. The parent is
/// computed over the whole group's records, not summed from the children.
#[derive(Debug, Clone)]
pub struct NestedPivotRow {
    pub row: PivotRow,
    pub children: Vec<PivotRow>,
}

/// A two-level month-on-month matrix (category → product).
#[derive(Debug, Clone)]
pub struct NestedPivotTable {
    pub columns: Vec<String>,
    pub groups: Vec<NestedPivotRow>,
    pub column_totals: Vec<f64>,
    pub grand_total: f64,
}

/// Category → product month-on-month breakdown over a declared month axis.
pub fn category_product_month_on_month(
    records: &[SalesRecord],
    metric: SalesMetric,
    axis: &[MonthKey],
) -> NestedPivotTable {
    let columns = axis_labels(axis);
    let month_of = |r: &SalesRecord| SalesDimension::Month.key_of(r);

    let outer = group_by(records, |r| r.category_label());
    let mut groups: Vec<NestedPivotRow> = outer
        .into_iter()
        .map(|(category, group)| {
            let row = aligned_row(category, &group, &month_of, &columns, &metric);
            let inner = group_refs(&group, |r| r.product_label());
            let mut children: Vec<PivotRow> = inner
                .into_iter()
                .map(|(product, sub)| aligned_row(product, &sub, &month_of, &columns, &metric))
                .collect();
            sort_rows(&mut children);
            NestedPivotRow { row, children }
        })
        .collect();
    groups.sort_by(|a, b| {
        b.row
            .total
            .partial_cmp(&a.row.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.row.key.cmp(&b.row.key))
    });

    let column_totals: Vec<f64> = (0..columns.len())
        .map(|col| groups.iter().map(|g| g.row.cells[col]).sum())
        .collect();
    let grand_total = column_totals.iter().sum();
    NestedPivotTable {
        columns,
        groups,
        column_totals,
        grand_total,
    }
}

/// Lead-source month-on-month matrix, bucketing by lead creation month.
pub fn lead_source_month_on_month(
    leads: &[LeadRecord],
    metric: LeadMetric,
    axis: &[MonthKey],
) -> PivotTable {
    pivot_with_columns(
        leads,
        |l| l.source_label(),
        |l| {
            parse_flexible_date(&l.created_at)
                .map(|date| MonthKey::from_date(date).to_string())
                .unwrap_or_else(|| UNKNOWN.to_string())
        },
        axis_labels(axis),
        &metric,
    )
}

/// Per-trainer month-on-month matrix over the payroll aggregates.
pub fn trainer_month_on_month(
    records: &[PayrollRecord],
    metric: PayrollMetric,
    axis: &[MonthKey],
) -> PivotTable {
    pivot_with_columns(
        records,
        |p| p.teacher_label(),
        |p| {
            p.month()
                .map(|month| month.to_string())
                .unwrap_or_else(|| UNKNOWN.to_string())
        },
        axis_labels(axis),
        &metric,
    )
}

fn axis_labels(axis: &[MonthKey]) -> Vec<String> {
    axis.iter().map(MonthKey::to_string).collect()
}

fn sort_rows(rows: &mut [PivotRow]) {
    rows.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });
}
