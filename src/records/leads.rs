use serde::{Deserialize, Serialize};

use super::labels::{label_or, UNKNOWN};

/// Stage label marking a lead that finished its trial class.
pub const STAGE_TRIAL_COMPLETED: &str = "Trial Completed";
/// Conversion status label for a lead that became a member.
pub const STATUS_CONVERTED: &str = "Converted";
/// Retention status label for a client still active after conversion.
pub const STATUS_RETAINED: &str = "Retained";

/// One sales-funnel lead. Stage and status vocabularies are open; the
/// well-known values are the constants above.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeadRecord {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub source: String,
    pub stage: String,
    pub associate: String,
    pub center: String,
    pub created_at: String,
    pub conversion_status: String,
    pub retention_status: String,
    pub ltv: f64,
    pub visits: u32,
}

impl LeadRecord {
    pub fn source_label(&self) -> String {
        label_or(&[&self.source], UNKNOWN)
    }

    pub fn associate_label(&self) -> String {
        label_or(&[&self.associate], UNKNOWN)
    }

    pub fn center_label(&self) -> String {
        label_or(&[&self.center], UNKNOWN)
    }

    pub fn stage_label(&self) -> String {
        label_or(&[&self.stage], UNKNOWN)
    }

    pub fn completed_trial(&self) -> bool {
        self.stage.eq_ignore_ascii_case(STAGE_TRIAL_COMPLETED)
    }

    pub fn converted(&self) -> bool {
        self.conversion_status.eq_ignore_ascii_case(STATUS_CONVERTED)
    }
}
