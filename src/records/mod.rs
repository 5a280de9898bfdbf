//! Record families supplied by the external data collaborators, plus the
//! label normalization shared by every grouping dimension.

pub mod clients;
pub mod labels;
pub mod leads;
pub mod payroll;
pub mod sales;
pub mod sessions;

pub use clients::NewClientRecord;
pub use labels::{normalize_label, UNCATEGORIZED, UNKNOWN};
pub use leads::{LeadRecord, STAGE_TRIAL_COMPLETED, STATUS_CONVERTED, STATUS_RETAINED};
pub use payroll::PayrollRecord;
pub use sales::SalesRecord;
pub use sessions::SessionRecord;
