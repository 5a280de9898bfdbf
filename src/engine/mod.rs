//! The aggregation engine: grouping, metric computation, flat and nested
//! breakdowns, pivot views, month-on-month matrices, and year-on-year
//! comparisons.

pub mod breakdown;
pub mod group;
pub mod metrics;
pub mod monthly;
pub mod pivot;
pub mod yoy;

pub use breakdown::{
    category_product_breakdown, sales_breakdown, sales_totals, NestedSalesRow, SalesRow,
};
pub use group::{group_by, SalesDimension};
pub use metrics::{
    growth_pct, ClientMetric, LeadMetric, Metric, PayrollMetric, SalesMetric, SessionMetric,
};
pub use monthly::{
    category_product_month_on_month, lead_source_month_on_month, month_on_month,
    trainer_month_on_month, NestedPivotRow, NestedPivotTable,
};
pub use pivot::{pivot, pivot_with_columns, PivotRow, PivotTable};
pub use yoy::{year_on_year_sales, ComparisonYears, YoyReport, YoyRow};
