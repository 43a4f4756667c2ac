//! Period aggregation of approved time entries.
//!
//! Selects the entries a payroll run may consume (approved, matching
//! employee, inside the period), decomposes each one and sums the
//! resulting buckets into period totals. A malformed entry is skipped and
//! reported; it never aborts the employee.

use serde::{Deserialize, Serialize};

use crate::calculation::decompose_day;
use crate::config::RateTable;
use crate::models::{DailyHourBucket, EngineWarning, PayrollPeriod, PeriodTotals, TimeEntry};

/// A time entry that could not be decomposed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedEntry {
    /// The ID of the skipped entry.
    pub entry_id: String,
    /// Why the entry was skipped.
    pub reason: String,
}

/// The result of aggregating one employee's entries over a period.
#[derive(Debug, Clone)]
pub struct Aggregation {
    /// Summed totals across all decomposed buckets.
    pub totals: PeriodTotals,
    /// The individual daily buckets, in entry order.
    pub buckets: Vec<DailyHourBucket>,
    /// Legal-limit warnings raised during decomposition.
    pub warnings: Vec<EngineWarning>,
    /// Entries rejected by decomposition.
    pub skipped: Vec<SkippedEntry>,
    /// IDs of the entries consumed by this aggregation. After a successful
    /// payroll run the orchestrator transitions exactly these entries to a
    /// locked state; the engine only requests the transition.
    pub consumed_entry_ids: Vec<String>,
}

/// Aggregates one employee's approved entries within a period.
///
/// Entries that are unapproved, belong to another employee or fall outside
/// the period are ignored entirely: they are neither summed nor listed for
/// locking. Entries the decomposition rejects are recorded in `skipped`.
pub fn aggregate_entries(
    employee_id: &str,
    period: PayrollPeriod,
    entries: &[TimeEntry],
    table: &RateTable,
) -> Aggregation {
    let mut totals = PeriodTotals::new(employee_id, period);
    let mut buckets = Vec::new();
    let mut warnings = Vec::new();
    let mut skipped = Vec::new();
    let mut consumed_entry_ids = Vec::new();

    let candidates = entries
        .iter()
        .filter(|e| e.approved && e.employee_id == employee_id && period.contains_date(e.date));

    for entry in candidates {
        match decompose_day(entry, table) {
            Ok(decomposition) => {
                totals.add_bucket(&decomposition.bucket);
                buckets.push(decomposition.bucket);
                warnings.extend(decomposition.warnings);
                consumed_entry_ids.push(entry.id.clone());
            }
            Err(error) => {
                skipped.push(SkippedEntry {
                    entry_id: entry.id.clone(),
                    reason: error.to_string(),
                });
            }
        }
    }

    Aggregation {
        totals,
        buckets,
        warnings,
        skipped,
        consumed_entry_ids,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_support::table_2024;
    use chrono::{NaiveDate, NaiveTime};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn march_period() -> PayrollPeriod {
        PayrollPeriod {
            start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        }
    }

    fn entry(id: &str, employee_id: &str, date: &str, arrival: &str, departure: &str) -> TimeEntry {
        TimeEntry {
            id: id.to_string(),
            employee_id: employee_id.to_string(),
            date: NaiveDate::from_str(date).unwrap(),
            arrival: NaiveTime::from_str(arrival).unwrap(),
            departure: NaiveTime::from_str(departure).unwrap(),
            lunch_deducted: true,
            scheduled_start: None,
            approved: true,
        }
    }

    #[test]
    fn test_sums_approved_entries_in_period() {
        let table = table_2024();
        let entries = vec![
            entry("e1", "emp_001", "2024-03-11", "07:00:00", "15:30:00"),
            entry("e2", "emp_001", "2024-03-12", "07:00:00", "15:30:00"),
        ];

        let aggregation = aggregate_entries("emp_001", march_period(), &entries, &table);

        assert_eq!(aggregation.totals.days_worked, 2);
        assert_eq!(aggregation.totals.elapsed_hours, dec("15"));
        assert_eq!(aggregation.totals.regular_hours, dec("14.6"));
        assert_eq!(aggregation.totals.overtime_hours, dec("0.4"));
        assert_eq!(aggregation.consumed_entry_ids, vec!["e1", "e2"]);
        assert!(aggregation.skipped.is_empty());
    }

    #[test]
    fn test_ignores_unapproved_entries() {
        let table = table_2024();
        let mut unapproved = entry("e1", "emp_001", "2024-03-11", "07:00:00", "15:30:00");
        unapproved.approved = false;

        let aggregation = aggregate_entries("emp_001", march_period(), &[unapproved], &table);

        assert_eq!(aggregation.totals.days_worked, 0);
        assert!(aggregation.consumed_entry_ids.is_empty());
        assert!(aggregation.skipped.is_empty());
    }

    #[test]
    fn test_ignores_other_employees_and_out_of_range_dates() {
        let table = table_2024();
        let entries = vec![
            entry("e1", "emp_002", "2024-03-11", "07:00:00", "15:30:00"),
            entry("e2", "emp_001", "2024-02-28", "07:00:00", "15:30:00"),
            entry("e3", "emp_001", "2024-03-16", "07:00:00", "15:30:00"),
        ];

        let aggregation = aggregate_entries("emp_001", march_period(), &entries, &table);

        assert_eq!(aggregation.totals.days_worked, 0);
        assert!(aggregation.consumed_entry_ids.is_empty());
    }

    #[test]
    fn test_invalid_entry_is_skipped_not_fatal() {
        let table = table_2024();
        let entries = vec![
            entry("e1", "emp_001", "2024-03-11", "09:00:00", "09:00:00"),
            entry("e2", "emp_001", "2024-03-12", "07:00:00", "15:30:00"),
        ];

        let aggregation = aggregate_entries("emp_001", march_period(), &entries, &table);

        assert_eq!(aggregation.totals.days_worked, 1);
        assert_eq!(aggregation.consumed_entry_ids, vec!["e2"]);
        assert_eq!(aggregation.skipped.len(), 1);
        assert_eq!(aggregation.skipped[0].entry_id, "e1");
        assert!(aggregation.skipped[0].reason.contains("zero-duration"));
    }

    #[test]
    fn test_long_day_warning_is_carried() {
        let table = table_2024();
        let entries = vec![entry("e1", "emp_001", "2024-03-11", "05:00:00", "19:30:00")];

        let aggregation = aggregate_entries("emp_001", march_period(), &entries, &table);

        assert_eq!(aggregation.warnings.len(), 1);
        assert_eq!(aggregation.warnings[0].code, "MAX_DAILY_HOURS");
        assert_eq!(aggregation.totals.days_worked, 1);
    }
}
