use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::hash::Hash;

use crate::dates::{parse_flexible_date, MonthKey};
use crate::records::{SalesRecord, UNKNOWN};

/// Groups a record slice by a derived key. Grouping itself is key-derived
/// and unordered; display ordering is applied by the consumers.
pub fn group_by<'a, R, K, F>(rows: &'a [R], key_of: F) -> HashMap<K, Vec<&'a R>>
where
    K: Eq + Hash,
    F: Fn(&R) -> K,
{
    let mut groups: HashMap<K, Vec<&R>> = HashMap::new();
    for row in rows {
        groups.entry(key_of(row)).or_default().push(row);
    }
    groups
}

/// Same, but over an already-borrowed group (used for nested breakdowns).
pub fn group_refs<'a, R, K, F>(rows: &[&'a R], key_of: F) -> HashMap<K, Vec<&'a R>>
where
    K: Eq + Hash,
    F: Fn(&R) -> K,
{
    let mut groups: HashMap<K, Vec<&R>> = HashMap::new();
    for &row in rows {
        groups.entry(key_of(row)).or_default().push(row);
    }
    groups
}

/// The grouping dimensions a sales table can be keyed by. Every key
/// derivation substitutes a literal fallback label for missing values, so
/// grouping never produces an empty key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalesDimension {
    Category,
    Product,
    Seller,
    PaymentMethod,
    Location,
    Month,
}

impl SalesDimension {
    pub fn key_of(&self, record: &SalesRecord) -> String {
        match self {
            SalesDimension::Category => record.category_label(),
            SalesDimension::Product => record.product_label(),
            SalesDimension::Seller => record.seller_label(),
            SalesDimension::PaymentMethod => record.payment_method_label(),
            SalesDimension::Location => record.location_label(),
            SalesDimension::Month => parse_flexible_date(&record.payment_date)
                .map(|date| MonthKey::from_date(date).to_string())
                .unwrap_or_else(|| UNKNOWN.to_string()),
        }
    }
}
