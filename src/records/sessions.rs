use serde::{Deserialize, Serialize};

use super::labels::{label_or, UNKNOWN};

/// One scheduled class occurrence from the sessions export.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SessionRecord {
    pub date: String,
    pub time: String,
    pub location: String,
    pub class_type: String,
    pub instructor: String,
    pub capacity: u32,
    pub booked: u32,
    pub checked_in: u32,
    pub late_cancelled: u32,
    pub total_paid: f64,
}

impl SessionRecord {
    pub fn class_label(&self) -> String {
        label_or(&[&self.class_type], UNKNOWN)
    }

    pub fn instructor_label(&self) -> String {
        label_or(&[&self.instructor], UNKNOWN)
    }

    pub fn location_label(&self) -> String {
        label_or(&[&self.location], UNKNOWN)
    }
}
