//! Payroll period and period totals models.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::DailyHourBucket;

/// A payroll period with an inclusive date range.
///
/// # Example
///
/// ```
/// use nomina_engine::models::PayrollPeriod;
/// use chrono::NaiveDate;
///
/// let period = PayrollPeriod {
///     start_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
/// };
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()));
/// assert_eq!(period.year(), 2024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// The start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the period (inclusive).
    pub end_date: NaiveDate,
}

impl PayrollPeriod {
    /// Checks if a date falls within this period, inclusive on both ends.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// The calendar year whose rate table governs this period.
    pub fn year(&self) -> i32 {
        self.start_date.year()
    }
}

/// Summed hour buckets for one employee across one payroll period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodTotals {
    /// The employee the totals belong to.
    pub employee_id: String,
    /// The period the totals cover.
    pub period: PayrollPeriod,
    /// Sum of regular hours.
    pub regular_hours: Decimal,
    /// Sum of overtime hours.
    pub overtime_hours: Decimal,
    /// Sum of night hours.
    pub night_hours: Decimal,
    /// Sum of elapsed hours.
    pub elapsed_hours: Decimal,
    /// Sum of late minutes.
    pub late_minutes: i64,
    /// Number of days with an approved, decomposed entry.
    pub days_worked: u32,
}

impl PeriodTotals {
    /// Empty totals for an employee and period.
    pub fn new(employee_id: impl Into<String>, period: PayrollPeriod) -> Self {
        Self {
            employee_id: employee_id.into(),
            period,
            regular_hours: Decimal::ZERO,
            overtime_hours: Decimal::ZERO,
            night_hours: Decimal::ZERO,
            elapsed_hours: Decimal::ZERO,
            late_minutes: 0,
            days_worked: 0,
        }
    }

    /// Folds one daily bucket into the totals.
    pub fn add_bucket(&mut self, bucket: &DailyHourBucket) {
        self.regular_hours += bucket.regular_hours;
        self.overtime_hours += bucket.overtime_hours;
        self.night_hours += bucket.night_hours;
        self.elapsed_hours += bucket.elapsed_hours;
        self.late_minutes += bucket.late_minutes;
        self.days_worked += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    fn bucket(date: &str, regular: &str, overtime: &str, night: &str) -> DailyHourBucket {
        let regular_hours = dec(regular);
        let overtime_hours = dec(overtime);
        DailyHourBucket {
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_str(date).unwrap(),
            regular_hours,
            overtime_hours,
            night_hours: dec(night),
            elapsed_hours: regular_hours + overtime_hours,
            late_minutes: 0,
            crosses_midnight: false,
        }
    }

    #[test]
    fn test_contains_date_is_inclusive() {
        let period = march_period();

        assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert!(period.contains_date(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()));
        assert!(!period.contains_date(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
        assert!(!period.contains_date(NaiveDate::from_ymd_opt(2024, 3, 16).unwrap()));
    }

    #[test]
    fn test_year_comes_from_start_date() {
        assert_eq!(march_period().year(), 2024);
    }

    #[test]
    fn test_totals_sum_buckets() {
        let mut totals = PeriodTotals::new("emp_001", march_period());
        totals.add_bucket(&bucket("2024-03-11", "7.3", "0.2", "0"));
        totals.add_bucket(&bucket("2024-03-12", "7.3", "1.7", "7"));

        assert_eq!(totals.regular_hours, dec("14.6"));
        assert_eq!(totals.overtime_hours, dec("1.9"));
        assert_eq!(totals.night_hours, dec("7"));
        assert_eq!(totals.elapsed_hours, dec("16.5"));
        assert_eq!(totals.days_worked, 2);
    }

    #[test]
    fn test_totals_serialization_round_trip() {
        let mut totals = PeriodTotals::new("emp_001", march_period());
        totals.add_bucket(&bucket("2024-03-11", "7.3", "0", "0"));

        let json = serde_json::to_string(&totals).unwrap();
        let deserialized: PeriodTotals = serde_json::from_str(&json).unwrap();
        assert_eq!(totals, deserialized);
    }
}
