//! Time decomposition functionality.
//!
//! This module converts one day's arrival and departure times into legally
//! classified hour buckets: regular hours up to the legal daily limit,
//! overtime beyond it, and night hours overlapping the legal night window.
//! It is the single place where hour classification exists; every caller
//! (payroll runs, previews) goes through [`decompose_day`].

use chrono::{NaiveTime, Timelike};
use rust_decimal::Decimal;

use crate::config::RateTable;
use crate::error::{EngineError, EngineResult};
use crate::models::{DailyHourBucket, EngineWarning, Severity, TimeEntry};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Warning code for days exceeding the legal daily hour limit.
pub const MAX_DAILY_HOURS_CODE: &str = "MAX_DAILY_HOURS";

/// The result of decomposing one day's clock times.
#[derive(Debug, Clone)]
pub struct DayDecomposition {
    /// The classified hour bucket.
    pub bucket: DailyHourBucket,
    /// Non-fatal legal-limit warnings raised while decomposing.
    pub warnings: Vec<EngineWarning>,
}

/// Decomposes a time entry into legally classified hour buckets.
///
/// # Behavior
///
/// 1. A departure at or before the arrival is read as a shift crossing
///    midnight and 24 hours are added to the departure. Night shifts are
///    routine in this sector; this is policy, not an error.
/// 2. When the entry deducts lunch, one unpaid hour is subtracted from the
///    elapsed time, floored at zero.
/// 3. Hours up to the legal daily limit are regular; the excess is
///    overtime, so `regular + overtime == elapsed` exactly.
/// 4. Night hours are the overlap between the shift interval and the night
///    window, clipped to the elapsed hours. They are a surcharge-bearing
///    subset of elapsed time, never an additional bucket.
/// 5. A day longer than the legal maximum is computed anyway and flagged
///    with a high-severity warning for human review.
///
/// # Errors
///
/// Returns `InvalidTimeEntry` when arrival equals departure (a
/// zero-duration day). The error rejects this entry only.
///
/// # Examples
///
/// ```
/// use nomina_engine::calculation::decompose_day;
/// use nomina_engine::config::RateTableLoader;
/// use nomina_engine::models::TimeEntry;
/// use chrono::{NaiveDate, NaiveTime};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let loader = RateTableLoader::load("./config/colombia").unwrap();
/// let table = loader.table_for_year(2024).unwrap();
///
/// let entry = TimeEntry {
///     id: "entry_001".to_string(),
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2024, 3, 11).unwrap(),
///     arrival: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
///     departure: NaiveTime::from_hms_opt(15, 30, 0).unwrap(),
///     lunch_deducted: true,
///     scheduled_start: None,
///     approved: true,
/// };
///
/// let decomposition = decompose_day(&entry, table).unwrap();
/// assert_eq!(decomposition.bucket.elapsed_hours, Decimal::from_str("7.5").unwrap());
/// assert_eq!(decomposition.bucket.regular_hours, Decimal::from_str("7.3").unwrap());
/// assert_eq!(decomposition.bucket.overtime_hours, Decimal::from_str("0.2").unwrap());
/// ```
pub fn decompose_day(entry: &TimeEntry, table: &RateTable) -> EngineResult<DayDecomposition> {
    let arrival_min = minutes_from_midnight(entry.arrival);
    let mut departure_min = minutes_from_midnight(entry.departure);

    if departure_min == arrival_min {
        return Err(EngineError::InvalidTimeEntry {
            entry_id: entry.id.clone(),
            message: "arrival equals departure (zero-duration day)".to_string(),
        });
    }

    // Departure before arrival means the shift ran past midnight.
    let crosses_midnight = departure_min < arrival_min;
    if crosses_midnight {
        departure_min += MINUTES_PER_DAY;
    }

    let mut worked_minutes = departure_min - arrival_min;
    if entry.lunch_deducted {
        worked_minutes = (worked_minutes - 60).max(0);
    }

    let elapsed_hours = minutes_to_hours(worked_minutes);
    let legal_daily_hours = table.workday.legal_daily_hours;

    let regular_hours = elapsed_hours.min(legal_daily_hours);
    let overtime_hours = elapsed_hours - regular_hours;

    let night_minutes = night_overlap_minutes(
        arrival_min,
        departure_min,
        table.workday.night_start,
        table.workday.night_end,
    );
    let night_hours = minutes_to_hours(night_minutes).min(elapsed_hours);

    let late_minutes = entry
        .scheduled_start
        .map(|scheduled| (arrival_min - minutes_from_midnight(scheduled)).max(0))
        .unwrap_or(0);

    let mut warnings = Vec::new();
    if elapsed_hours > table.workday.max_daily_hours {
        warnings.push(EngineWarning {
            code: MAX_DAILY_HOURS_CODE.to_string(),
            message: format!(
                "{} hours worked on {} exceed the legal daily limit of {} hours",
                elapsed_hours.normalize(),
                entry.date,
                table.workday.max_daily_hours.normalize()
            ),
            severity: Severity::High,
        });
    }

    Ok(DayDecomposition {
        bucket: DailyHourBucket {
            employee_id: entry.employee_id.clone(),
            date: entry.date,
            regular_hours,
            overtime_hours,
            night_hours,
            elapsed_hours,
            late_minutes,
            crosses_midnight,
        },
        warnings,
    })
}

fn minutes_from_midnight(time: NaiveTime) -> i64 {
    i64::from(time.hour()) * 60 + i64::from(time.minute())
}

fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::new(minutes, 0) / Decimal::new(60, 0)
}

/// Computes the overlap in minutes between a shift and the night window.
///
/// The shift is an interval on an absolute minute axis starting at the
/// arrival day's midnight; a midnight-crossing shift has a departure past
/// minute 1440. The night window repeats every day, so its occurrences are
/// projected onto the same axis and each overlap is summed.
fn night_overlap_minutes(
    shift_start: i64,
    shift_end: i64,
    night_start: NaiveTime,
    night_end: NaiveTime,
) -> i64 {
    let ns = minutes_from_midnight(night_start);
    let ne = minutes_from_midnight(night_end);

    // A wrapping window (22:00 -> 06:00) projects onto the axis as the
    // previous night's tail, tonight's window, and tomorrow's window.
    let windows: Vec<(i64, i64)> = if ne <= ns {
        vec![
            (0, ne),
            (ns, MINUTES_PER_DAY + ne),
            (MINUTES_PER_DAY + ns, 2 * MINUTES_PER_DAY + ne),
        ]
    } else {
        vec![(ns, ne), (MINUTES_PER_DAY + ns, MINUTES_PER_DAY + ne)]
    };

    windows
        .into_iter()
        .map(|(lo, hi)| (shift_end.min(hi) - shift_start.max(lo)).max(0))
        .sum()
}
