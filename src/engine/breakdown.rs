use super::group::{group_by, group_refs, SalesDimension};
use super::metrics::{distinct_members, distinct_transactions, ratio};
use crate::records::SalesRecord;

/// One aggregated table row: a grouping key, the full sales metric set, and
/// the contributing raw records for drill-down.
#[derive(Debug, Clone)]
pub struct SalesRow<'a> {
    pub key: String,
    pub revenue: f64,
    pub vat: f64,
    pub net_revenue: f64,
    pub discount_amount: f64,
    pub units: usize,
    pub transactions: usize,
    pub members: usize,
    pub atv: f64,
    pub auv: f64,
    pub asv: f64,
    pub upt: f64,
    pub records: Vec<&'a SalesRecord>,
}

/// Aggregates one group of records into a row. Ratios come from this
/// group's own summed numerators and denominators, so folding several
/// groups' records through this same function yields valid totals.
pub fn summarize_sales<'a>(key: String, records: Vec<&'a SalesRecord>) -> SalesRow<'a> {
    let revenue: f64 = records.iter().map(|r| r.payment_value).sum();
    let vat: f64 = records.iter().map(|r| r.payment_vat).sum();
    let discount_amount: f64 = records.iter().map(|r| r.discount_amount).sum();
    let units = records.len();
    let transactions = records.len();
    let members = distinct_members(&records);
    SalesRow {
        atv: ratio(revenue, transactions as f64),
        auv: ratio(revenue, units as f64),
        asv: ratio(revenue, members as f64),
        upt: ratio(units as f64, distinct_transactions(&records) as f64),
        key,
        revenue,
        vat,
        net_revenue: revenue - vat,
        discount_amount,
        units,
        transactions,
        members,
        records,
    }
}

/// Flat breakdown of sales by one dimension, ordered revenue-descending
/// with the key as tie-breaker.
pub fn sales_breakdown<'a>(
    records: &'a [SalesRecord],
    dimension: SalesDimension,
) -> Vec<SalesRow<'a>> {
    let groups = group_by(records, |r| dimension.key_of(r));
    let mut rows: Vec<SalesRow> = groups
        .into_iter()
        .map(|(key, group)| summarize_sales(key, group))
        .collect();
    sort_by_revenue(&mut rows);
    rows
}

/// A category row with its per-product child rows. The parent is computed
/// over the category's whole record set, not summed from the children.
#[derive(Debug, Clone)]
pub struct NestedSalesRow<'a> {
    pub category: SalesRow<'a>,
    pub products: Vec<SalesRow<'a>>,
}

/// Two-level category → product breakdown.
pub fn category_product_breakdown(records: &[SalesRecord]) -> Vec<NestedSalesRow<'_>> {
    let outer = group_by(records, |r| r.category_label());
    let mut nested: Vec<NestedSalesRow> = outer
        .into_iter()
        .map(|(category, group)| {
            let inner = group_refs(&group, |r| r.product_label());
            let mut products: Vec<SalesRow> = inner
                .into_iter()
                .map(|(product, sub)| summarize_sales(product, sub))
                .collect();
            sort_by_revenue(&mut products);
            NestedSalesRow {
                category: summarize_sales(category, group),
                products,
            }
        })
        .collect();
    nested.sort_by(|a, b| {
        b.category
            .revenue
            .partial_cmp(&a.category.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.key.cmp(&b.category.key))
    });
    nested
}

/// The grand-total row: the same aggregation applied to every record, so
/// additive metrics equal the column sums and ratio metrics come from the
/// summed numerators and denominators rather than averaged row ratios.
pub fn sales_totals(records: &[SalesRecord]) -> SalesRow<'_> {
    summarize_sales("Total".to_string(), records.iter().collect())
}

fn sort_by_revenue(rows: &mut [SalesRow<'_>]) {
    rows.sort_by(|a, b| {
        b.revenue
            .partial_cmp(&a.revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: &str, product: &str, member: &str, value: f64) -> SalesRecord {
        SalesRecord {
            category: category.into(),
            product: product.into(),
            member_id: member.into(),
            payment_value: value,
            payment_vat: value * 0.2,
            ..SalesRecord::default()
        }
    }

    fn membership_and_retail() -> Vec<SalesRecord> {
        vec![
            record("Membership", "Annual", "A", 1000.0),
            record("Membership", "Annual", "A", 500.0),
            record("Retail", "Shirt", "B", 200.0),
        ]
    }

    #[test]
    fn category_breakdown_matches_reference_scenario() {
        let records = membership_and_retail();
        let rows = sales_breakdown(&records, SalesDimension::Category);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].key, "Membership");
        assert_eq!(rows[0].revenue, 1500.0);
        assert_eq!(rows[0].members, 1);
        assert_eq!(rows[1].key, "Retail");
        assert_eq!(rows[1].revenue, 200.0);

        let totals = sales_totals(&records);
        assert_eq!(totals.revenue, 1700.0);
        assert_eq!(totals.members, 2);
    }

    #[test]
    fn rows_keep_drilldown_backrefs() {
        let records = membership_and_retail();
        let rows = sales_breakdown(&records, SalesDimension::Category);
        assert_eq!(rows[0].records.len(), 2);
        assert!(rows[0].records.iter().all(|r| r.category == "Membership"));
    }

    #[test]
    fn totals_ratios_come_from_summed_parts() {
        let records = membership_and_retail();
        let rows = sales_breakdown(&records, SalesDimension::Category);
        let totals = sales_totals(&records);
        // Average of the two per-row ATVs would be 475; the valid total is
        // 1700 / 3.
        let average_of_averages: f64 =
            rows.iter().map(|r| r.atv).sum::<f64>() / rows.len() as f64;
        assert!((totals.atv - 1700.0 / 3.0).abs() < 1e-9);
        assert!((average_of_averages - totals.atv).abs() > 1.0);
    }

    #[test]
    fn additive_totals_equal_group_sums() {
        let records = membership_and_retail();
        let rows = sales_breakdown(&records, SalesDimension::Category);
        let totals = sales_totals(&records);
        let summed: f64 = rows.iter().map(|r| r.revenue).sum();
        assert_eq!(summed, totals.revenue);
        let summed_vat: f64 = rows.iter().map(|r| r.vat).sum();
        assert!((summed_vat - totals.vat).abs() < 1e-9);
    }

    #[test]
    fn nested_breakdown_parents_cover_their_products() {
        let mut records = membership_and_retail();
        records.push(record("Membership", "Monthly", "C", 300.0));
        let nested = category_product_breakdown(&records);
        assert_eq!(nested[0].category.key, "Membership");
        assert_eq!(nested[0].category.revenue, 1800.0);
        let products: Vec<&str> = nested[0]
            .products
            .iter()
            .map(|p| p.key.as_str())
            .collect();
        assert_eq!(products, ["Annual", "Monthly"]);
        // Parent members counted over the category's records, not summed
        // from children.
        assert_eq!(nested[0].category.members, 2);
    }
}
