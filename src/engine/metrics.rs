use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::records::{LeadRecord, NewClientRecord, PayrollRecord, SalesRecord, SessionRecord};

/// A derived scalar over a group of records. Implementations must be pure
/// and must never produce NaN or infinity; ratio metrics short-circuit to 0
/// on an empty or zero denominator.
pub trait Metric<R> {
    fn compute(&self, rows: &[&R]) -> f64;
}

/// `numerator / denominator`, defined as 0 when the denominator is 0.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// `part / whole` as a percentage, 0 when the whole is 0.
pub(crate) fn pct(part: f64, whole: f64) -> f64 {
    ratio(part, whole) * 100.0
}

/// Year-over-year growth in percent. Defined as 0 when the prior value is
/// 0 — "0 to nonzero" growth reports 0%, a deliberate policy.
pub fn growth_pct(current: f64, prior: f64) -> f64 {
    if prior == 0.0 {
        0.0
    } else {
        (current - prior) / prior * 100.0
    }
}

/// Metrics over sales records.
///
/// `Upt` divides by distinct transaction ids while `Atv`/`Auv` divide by
/// line-item counts; the two denominators only coincide when every
/// transaction has exactly one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SalesMetric {
    Revenue,
    Vat,
    NetRevenue,
    DiscountAmount,
    Units,
    Transactions,
    Members,
    Atv,
    Auv,
    Asv,
    Upt,
}

impl Metric<SalesRecord> for SalesMetric {
    fn compute(&self, rows: &[&SalesRecord]) -> f64 {
        match self {
            SalesMetric::Revenue => rows.iter().map(|r| r.payment_value).sum(),
            SalesMetric::Vat => rows.iter().map(|r| r.payment_vat).sum(),
            SalesMetric::NetRevenue => rows.iter().map(|r| r.net_value()).sum(),
            SalesMetric::DiscountAmount => rows.iter().map(|r| r.discount_amount).sum(),
            SalesMetric::Units => rows.len() as f64,
            SalesMetric::Transactions => rows.len() as f64,
            SalesMetric::Members => distinct_members(rows) as f64,
            SalesMetric::Atv => ratio(
                SalesMetric::Revenue.compute(rows),
                SalesMetric::Transactions.compute(rows),
            ),
            SalesMetric::Auv => ratio(
                SalesMetric::Revenue.compute(rows),
                SalesMetric::Units.compute(rows),
            ),
            SalesMetric::Asv => ratio(
                SalesMetric::Revenue.compute(rows),
                distinct_members(rows) as f64,
            ),
            SalesMetric::Upt => ratio(
                SalesMetric::Units.compute(rows),
                distinct_transactions(rows) as f64,
            ),
        }
    }
}

/// Distinct member ids across the group; the same member appearing in many
/// records counts once.
pub(crate) fn distinct_members(rows: &[&SalesRecord]) -> usize {
    rows.iter()
        .map(|r| r.member_id.as_str())
        .collect::<HashSet<_>>()
        .len()
}

/// Distinct transaction ids; a record with a blank id counts as its own
/// transaction.
pub(crate) fn distinct_transactions(rows: &[&SalesRecord]) -> usize {
    let mut ids = HashSet::new();
    let mut blank = 0usize;
    for row in rows {
        if row.transaction_id.is_empty() {
            blank += 1;
        } else {
            ids.insert(row.transaction_id.as_str());
        }
    }
    ids.len() + blank
}

/// Metrics over funnel leads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeadMetric {
    TotalLeads,
    TrialsCompleted,
    LeadToTrialRate,
    TrialToMemberRate,
    AverageLtv,
    TotalVisits,
}

impl Metric<LeadRecord> for LeadMetric {
    fn compute(&self, rows: &[&LeadRecord]) -> f64 {
        let trials = rows.iter().filter(|l| l.completed_trial()).count() as f64;
        match self {
            LeadMetric::TotalLeads => rows.len() as f64,
            LeadMetric::TrialsCompleted => trials,
            LeadMetric::LeadToTrialRate => pct(trials, rows.len() as f64),
            LeadMetric::TrialToMemberRate => {
                let converted_trials = rows
                    .iter()
                    .filter(|l| l.completed_trial() && l.converted())
                    .count() as f64;
                pct(converted_trials, trials)
            }
            LeadMetric::AverageLtv => {
                ratio(rows.iter().map(|l| l.ltv).sum(), rows.len() as f64)
            }
            LeadMetric::TotalVisits => rows.iter().map(|l| l.visits as f64).sum(),
        }
    }
}

/// Metrics over class sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionMetric {
    Sessions,
    Booked,
    CheckedIn,
    LateCancelled,
    Revenue,
    FillRate,
    AverageAttendance,
    LateCancelRate,
}

impl Metric<SessionRecord> for SessionMetric {
    fn compute(&self, rows: &[&SessionRecord]) -> f64 {
        let checked_in: f64 = rows.iter().map(|s| s.checked_in as f64).sum();
        match self {
            SessionMetric::Sessions => rows.len() as f64,
            SessionMetric::Booked => rows.iter().map(|s| s.booked as f64).sum(),
            SessionMetric::CheckedIn => checked_in,
            SessionMetric::LateCancelled => {
                rows.iter().map(|s| s.late_cancelled as f64).sum()
            }
            SessionMetric::Revenue => rows.iter().map(|s| s.total_paid).sum(),
            SessionMetric::FillRate => {
                pct(checked_in, rows.iter().map(|s| s.capacity as f64).sum())
            }
            SessionMetric::AverageAttendance => ratio(checked_in, rows.len() as f64),
            SessionMetric::LateCancelRate => pct(
                SessionMetric::LateCancelled.compute(rows),
                SessionMetric::Booked.compute(rows),
            ),
        }
    }
}

/// Metrics over new-client trial records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClientMetric {
    NewClients,
    ConversionRate,
    RetentionRate,
    AverageLtv,
}

impl Metric<NewClientRecord> for ClientMetric {
    fn compute(&self, rows: &[&NewClientRecord]) -> f64 {
        match self {
            ClientMetric::NewClients => rows.iter().filter(|c| c.is_new).count() as f64,
            ClientMetric::ConversionRate => pct(
                rows.iter().filter(|c| c.converted()).count() as f64,
                rows.len() as f64,
            ),
            ClientMetric::RetentionRate => pct(
                rows.iter().filter(|c| c.retained()).count() as f64,
                rows.len() as f64,
            ),
            ClientMetric::AverageLtv => {
                ratio(rows.iter().map(|c| c.ltv).sum(), rows.len() as f64)
            }
        }
    }
}

/// Metrics over payroll aggregates. Rate metrics recompute from summed
/// counts rather than averaging the upstream per-row percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayrollMetric {
    TotalSessions,
    EmptySessions,
    Revenue,
    NewMembers,
    Converted,
    Retained,
    ConversionRate,
    RetentionRate,
}

impl Metric<PayrollRecord> for PayrollMetric {
    fn compute(&self, rows: &[&PayrollRecord]) -> f64 {
        let new_members: f64 = rows.iter().map(|p| p.new_members as f64).sum();
        match self {
            PayrollMetric::TotalSessions => {
                rows.iter().map(|p| p.total_sessions() as f64).sum()
            }
            PayrollMetric::EmptySessions => {
                rows.iter().map(|p| p.total_empty_sessions() as f64).sum()
            }
            PayrollMetric::Revenue => rows.iter().map(|p| p.total_revenue()).sum(),
            PayrollMetric::NewMembers => new_members,
            PayrollMetric::Converted => {
                rows.iter().map(|p| p.converted_members as f64).sum()
            }
            PayrollMetric::Retained => {
                rows.iter().map(|p| p.retained_members as f64).sum()
            }
            PayrollMetric::ConversionRate => pct(
                rows.iter().map(|p| p.converted_members as f64).sum(),
                new_members,
            ),
            PayrollMetric::RetentionRate => pct(
                rows.iter().map(|p| p.retained_members as f64).sum(),
                new_members,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{STAGE_TRIAL_COMPLETED, STATUS_CONVERTED};

    fn sale(member: &str, txn: &str, value: f64) -> SalesRecord {
        SalesRecord {
            member_id: member.into(),
            transaction_id: txn.into(),
            payment_value: value,
            payment_vat: value * 0.1,
            ..SalesRecord::default()
        }
    }

    fn refs<R>(rows: &[R]) -> Vec<&R> {
        rows.iter().collect()
    }

    #[test]
    fn atv_times_transactions_recovers_revenue() {
        let rows = vec![sale("A", "t1", 1000.0), sale("A", "t2", 500.0)];
        let rows = refs(&rows);
        let revenue = SalesMetric::Revenue.compute(&rows);
        let atv = SalesMetric::Atv.compute(&rows);
        let transactions = SalesMetric::Transactions.compute(&rows);
        assert!((atv * transactions - revenue).abs() < 1e-9);
    }

    #[test]
    fn ratio_metrics_are_zero_for_empty_groups() {
        let rows: Vec<&SalesRecord> = Vec::new();
        for metric in [
            SalesMetric::Atv,
            SalesMetric::Auv,
            SalesMetric::Asv,
            SalesMetric::Upt,
        ] {
            let value = metric.compute(&rows);
            assert_eq!(value, 0.0);
            assert!(value.is_finite());
        }
    }

    #[test]
    fn duplicate_members_count_once() {
        let rows = vec![sale("A", "t1", 100.0), sale("A", "t2", 50.0), sale("B", "t3", 10.0)];
        let rows = refs(&rows);
        assert_eq!(SalesMetric::Members.compute(&rows), 2.0);
        let duplicated = vec![
            sale("A", "t1", 100.0),
            sale("A", "t2", 50.0),
            sale("A", "t4", 25.0),
            sale("B", "t3", 10.0),
        ];
        let duplicated = refs(&duplicated);
        assert_eq!(SalesMetric::Members.compute(&duplicated), 2.0);
    }

    #[test]
    fn upt_uses_distinct_transaction_ids() {
        // Two line items sharing one transaction id: 3 units over 2
        // transactions, while ATV still divides by 3 records.
        let rows = vec![
            sale("A", "t1", 100.0),
            sale("A", "t1", 50.0),
            sale("B", "t2", 10.0),
        ];
        let rows = refs(&rows);
        assert_eq!(SalesMetric::Upt.compute(&rows), 1.5);
        assert!((SalesMetric::Atv.compute(&rows) - 160.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn blank_transaction_ids_count_individually() {
        let rows = vec![sale("A", "", 100.0), sale("B", "", 50.0)];
        let rows = refs(&rows);
        assert_eq!(distinct_transactions(&rows), 2);
    }

    #[test]
    fn growth_is_zero_when_prior_is_zero() {
        assert_eq!(growth_pct(100.0, 0.0), 0.0);
        assert_eq!(growth_pct(150.0, 100.0), 50.0);
        assert_eq!(growth_pct(50.0, 100.0), -50.0);
    }

    #[test]
    fn lead_funnel_rates() {
        let lead = |stage: &str, status: &str| LeadRecord {
            stage: stage.into(),
            conversion_status: status.into(),
            ltv: 100.0,
            ..LeadRecord::default()
        };
        let rows = vec![
            lead(STAGE_TRIAL_COMPLETED, STATUS_CONVERTED),
            lead(STAGE_TRIAL_COMPLETED, "Lost"),
            lead("New Enquiry", ""),
            lead("New Enquiry", ""),
        ];
        let rows = refs(&rows);
        assert_eq!(LeadMetric::TotalLeads.compute(&rows), 4.0);
        assert_eq!(LeadMetric::LeadToTrialRate.compute(&rows), 50.0);
        assert_eq!(LeadMetric::TrialToMemberRate.compute(&rows), 50.0);
        assert_eq!(LeadMetric::AverageLtv.compute(&rows), 100.0);
    }

    #[test]
    fn payroll_rates_recompute_from_sums() {
        let row = |new: u32, converted: u32, rate: &str| PayrollRecord {
            new_members: new,
            converted_members: converted,
            conversion_rate: rate.into(),
            ..PayrollRecord::default()
        };
        // Per-row rates are 100% and 0%; the recomputed group rate is 25%,
        // not the 50% an average-of-averages would claim.
        let rows = vec![row(1, 1, "100%"), row(3, 0, "0%")];
        let rows = refs(&rows);
        assert_eq!(PayrollMetric::ConversionRate.compute(&rows), 25.0);
    }

    #[test]
    fn session_rates_guard_zero_denominators() {
        let rows: Vec<&SessionRecord> = Vec::new();
        assert_eq!(SessionMetric::FillRate.compute(&rows), 0.0);
        assert_eq!(SessionMetric::LateCancelRate.compute(&rows), 0.0);
        assert_eq!(SessionMetric::AverageAttendance.compute(&rows), 0.0);
    }

    #[test]
    fn session_utilization_rates() {
        let session = |capacity: u32, booked: u32, checked_in: u32, late: u32| SessionRecord {
            capacity,
            booked,
            checked_in,
            late_cancelled: late,
            total_paid: 300.0,
            ..SessionRecord::default()
        };
        let rows = vec![session(20, 18, 15, 2), session(20, 10, 5, 0)];
        let rows = refs(&rows);
        assert_eq!(SessionMetric::Sessions.compute(&rows), 2.0);
        assert_eq!(SessionMetric::FillRate.compute(&rows), 50.0);
        assert_eq!(SessionMetric::AverageAttendance.compute(&rows), 10.0);
        assert!((SessionMetric::LateCancelRate.compute(&rows) - 200.0 / 28.0).abs() < 1e-9);
        assert_eq!(SessionMetric::Revenue.compute(&rows), 600.0);
    }

    #[test]
    fn client_conversion_and_retention_rates() {
        let client = |is_new: bool, conversion: &str, retention: &str| NewClientRecord {
            is_new,
            conversion_status: conversion.into(),
            retention_status: retention.into(),
            ltv: 400.0,
            ..NewClientRecord::default()
        };
        let rows = vec![
            client(true, "Converted", "Retained"),
            client(true, "Lost", ""),
            client(false, "Converted", ""),
            client(true, "Lost", ""),
        ];
        let rows = refs(&rows);
        assert_eq!(ClientMetric::NewClients.compute(&rows), 3.0);
        assert_eq!(ClientMetric::ConversionRate.compute(&rows), 50.0);
        assert_eq!(ClientMetric::RetentionRate.compute(&rows), 25.0);
        assert_eq!(ClientMetric::AverageLtv.compute(&rows), 400.0);
    }
}
