use serde::{Deserialize, Serialize};

use super::labels::{label_or, UNCATEGORIZED, UNKNOWN};

/// One payment line from the sales export. Immutable once fetched; every
/// field defaults so a sparse upstream row degrades instead of failing the
/// whole load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SalesRecord {
    pub payment_date: String,
    pub payment_value: f64,
    pub payment_vat: f64,
    pub member_id: String,
    pub transaction_id: String,
    pub product: String,
    pub cleaned_product: String,
    pub category: String,
    pub cleaned_category: String,
    pub sold_by: String,
    pub payment_method: String,
    pub location: String,
    pub discount_amount: f64,
}

impl SalesRecord {
    /// Cleaned category when present, else the raw one, else `Uncategorized`.
    pub fn category_label(&self) -> String {
        label_or(&[&self.cleaned_category, &self.category], UNCATEGORIZED)
    }

    /// Cleaned product when present, else the raw one, else `Unknown`.
    pub fn product_label(&self) -> String {
        label_or(&[&self.cleaned_product, &self.product], UNKNOWN)
    }

    pub fn seller_label(&self) -> String {
        label_or(&[&self.sold_by], UNKNOWN)
    }

    pub fn payment_method_label(&self) -> String {
        label_or(&[&self.payment_method], UNKNOWN)
    }

    pub fn location_label(&self) -> String {
        label_or(&[&self.location], UNKNOWN)
    }

    /// Revenue net of VAT.
    pub fn net_value(&self) -> f64 {
        self.payment_value - self.payment_vat
    }
}
