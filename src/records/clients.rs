use serde::{Deserialize, Serialize};

use super::labels::{label_or, UNKNOWN};
use super::leads::{STATUS_CONVERTED, STATUS_RETAINED};

/// One client's first-visit/trial record from the new-client export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewClientRecord {
    pub member_id: String,
    pub first_visit_date: String,
    pub first_visit_location: String,
    pub home_location: String,
    pub trainer: String,
    pub is_new: bool,
    pub conversion_status: String,
    pub retention_status: String,
    pub ltv: f64,
    pub visits_post_trial: u32,
}

impl NewClientRecord {
    pub fn trainer_label(&self) -> String {
        label_or(&[&self.trainer], UNKNOWN)
    }

    pub fn location_label(&self) -> String {
        label_or(&[&self.first_visit_location, &self.home_location], UNKNOWN)
    }

    pub fn converted(&self) -> bool {
        self.conversion_status.eq_ignore_ascii_case(STATUS_CONVERTED)
    }

    pub fn retained(&self) -> bool {
        self.retention_status.eq_ignore_ascii_case(STATUS_RETAINED)
    }
}
