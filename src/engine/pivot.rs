use std::collections::{BTreeSet, HashMap};

use super::group::group_by;
use super::metrics::Metric;

/// One pivot row: cells positionally aligned with the table's column axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub key: String,
    pub cells: Vec<f64>,
    pub total: f64,
}

/// A pivot view: independently configurable row and column dimensions with
/// a metric computed per cell. Row totals, column totals, and the grand
/// total all derive from the same per-cell values.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotTable {
    pub columns: Vec<String>,
    pub rows: Vec<PivotRow>,
    pub column_totals: Vec<f64>,
    pub grand_total: f64,
}

impl PivotTable {
    /// Cell lookup by row key and column label; `None` when either axis
    /// value is absent.
    pub fn cell(&self, row_key: &str, column: &str) -> Option<f64> {
        let col = self.columns.iter().position(|c| c == column)?;
        let row = self.rows.iter().find(|r| r.key == row_key)?;
        row.cells.get(col).copied()
    }

    pub fn column_total(&self, column: &str) -> Option<f64> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.column_totals.get(col).copied()
    }
}

/// Builds a pivot whose column axis is derived from the data (sorted
/// ascending by label).
pub fn pivot<R, M, FR, FC>(records: &[R], row_key: FR, col_key: FC, metric: &M) -> PivotTable
where
    M: Metric<R>,
    FR: Fn(&R) -> String,
    FC: Fn(&R) -> String,
{
    let columns: Vec<String> = records
        .iter()
        .map(&col_key)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    pivot_with_columns(records, row_key, col_key, columns, metric)
}

/// Builds a pivot against a declared column axis. Buckets with no
/// contributing records yield 0 cells; records whose column key is not on
/// the axis are ignored.
pub fn pivot_with_columns<R, M, FR, FC>(
    records: &[R],
    row_key: FR,
    col_key: FC,
    columns: Vec<String>,
    metric: &M,
) -> PivotTable
where
    M: Metric<R>,
    FR: Fn(&R) -> String,
    FC: Fn(&R) -> String,
{
    let groups = group_by(records, |r| row_key(r));
    let mut rows: Vec<PivotRow> = groups
        .into_iter()
        .map(|(key, group)| aligned_row(key, &group, &col_key, &columns, metric))
        .collect();
    rows.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });

    let column_totals: Vec<f64> = (0..columns.len())
        .map(|col| rows.iter().map(|row| row.cells[col]).sum())
        .collect();
    let grand_total = column_totals.iter().sum();
    tracing::debug!(
        rows = rows.len(),
        columns = columns.len(),
        "built pivot table"
    );
    PivotTable {
        columns,
        rows,
        column_totals,
        grand_total,
    }
}

/// Computes one row's cells against the column axis. The row total sums the
/// cells, consistent with how column totals are derived.
pub(crate) fn aligned_row<R, M, FC>(
    key: String,
    records: &[&R],
    col_key: &FC,
    columns: &[String],
    metric: &M,
) -> PivotRow
where
    M: Metric<R>,
    FC: Fn(&R) -> String,
{
    let mut buckets: HashMap<usize, Vec<&R>> = HashMap::new();
    for &record in records {
        if let Some(col) = columns.iter().position(|c| *c == col_key(record)) {
            buckets.entry(col).or_default().push(record);
        }
    }
    let cells: Vec<f64> = (0..columns.len())
        .map(|col| {
            buckets
                .get(&col)
                .map(|group| metric.compute(group))
                .unwrap_or(0.0)
        })
        .collect();
    let total = cells.iter().sum();
    PivotRow { key, cells, total }
}
