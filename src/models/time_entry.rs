//! Time entry and daily hour bucket models.
//!
//! A [`TimeEntry`] is the raw clock record as supplied by the external
//! time-entry store; a [`DailyHourBucket`] is the legally classified result
//! produced by time decomposition. Buckets are immutable once produced.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A raw clock-in/clock-out record for one employee and one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    /// Unique identifier for the entry.
    pub id: String,
    /// The employee who clocked the entry.
    pub employee_id: String,
    /// The working date (the day the shift started).
    pub date: NaiveDate,
    /// Clock-in time, local clock.
    pub arrival: NaiveTime,
    /// Clock-out time, local clock. A departure at or before the arrival
    /// is read as a shift crossing midnight.
    pub departure: NaiveTime,
    /// Whether an unpaid lunch hour is deducted from the elapsed time.
    pub lunch_deducted: bool,
    /// The scheduled start time, when a schedule exists. Absent means no
    /// lateness is computed (zero late minutes).
    #[serde(default)]
    pub scheduled_start: Option<NaiveTime>,
    /// Whether a supervisor approved the entry. Only approved entries are
    /// consumed by payroll runs.
    pub approved: bool,
}

/// The legally classified hours of one day, produced by time decomposition.
///
/// Night hours are an overlap subset of elapsed hours, carrying a pay
/// surcharge; they are never an additional time bucket, so
/// `regular_hours + overtime_hours == elapsed_hours` and
/// `night_hours <= elapsed_hours` always hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyHourBucket {
    /// The employee the bucket belongs to.
    pub employee_id: String,
    /// The working date.
    pub date: NaiveDate,
    /// Hours up to the legal daily limit.
    pub regular_hours: Decimal,
    /// Hours beyond the legal daily limit.
    pub overtime_hours: Decimal,
    /// Hours overlapping the legal night window.
    pub night_hours: Decimal,
    /// Total worked hours after any lunch deduction.
    pub elapsed_hours: Decimal,
    /// Minutes arrived after the scheduled start, zero when unscheduled.
    pub late_minutes: i64,
    /// Whether the shift crossed midnight.
    pub crosses_midnight: bool,
}
