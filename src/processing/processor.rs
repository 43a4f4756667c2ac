//! The period processor: fan-out over the employee roster.
//!
//! Each employee's computation is a pure, synchronous function of its
//! inputs with no shared mutable state, so employees are independent and
//! order-insensitive. A failure for one employee is caught, attributed by
//! identity and recorded; processing continues for everyone else. Lock
//! requests are emitted only for employees whose computation succeeded,
//! so a failed run never costs editability of its entries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::calculate_payroll;
use crate::config::{RateTable, RateTableLoader};
use crate::error::EngineResult;
use crate::models::{Bonus, Employee, EngineWarning, PayrollBreakdown, PayrollPeriod, TimeEntry};
use crate::validation::{ValidationResult, validate};

use super::aggregation::{SkippedEntry, aggregate_entries};

/// The computed payroll of one employee, with everything the orchestrator
/// needs to persist it and to lock the consumed entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePayroll {
    /// The employee the result belongs to.
    pub employee_id: String,
    /// The full payroll breakdown.
    pub breakdown: PayrollBreakdown,
    /// Advisory compliance annotations.
    pub validation: ValidationResult,
    /// Legal-limit warnings raised during decomposition.
    pub warnings: Vec<EngineWarning>,
    /// Entries rejected during aggregation, for human follow-up.
    pub skipped_entries: Vec<SkippedEntry>,
    /// IDs of consumed entries the orchestrator must transition to locked.
    pub entries_to_lock: Vec<String>,
}

/// A per-employee failure, attributed by identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFailure {
    /// The employee whose computation failed.
    pub employee_id: String,
    /// The failure description.
    pub message: String,
}

/// The report of one payroll run over a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRunReport {
    /// Correlation ID of this run, for logs and persistence.
    pub run_id: Uuid,
    /// The processed period.
    pub period: PayrollPeriod,
    /// One result per successfully computed employee, in roster order.
    pub results: Vec<EmployeePayroll>,
    /// IDs of employees skipped because they are inactive.
    pub skipped_inactive: Vec<String>,
    /// Per-employee failures; never aborts the rest of the roster.
    pub failures: Vec<EmployeeFailure>,
}

/// Runs payroll for a whole roster over one period.
///
/// The rate table for the period's year is resolved exactly once; a
/// missing table is fatal for the whole period and nothing is computed.
/// Inside the fan-out, every error is scoped to its employee.
///
/// # Arguments
///
/// * `employees` - The roster to process.
/// * `entries` - Time entries; only approved ones inside the period are
///   consumed.
/// * `bonuses` - Ad hoc bonuses per employee ID, passed through unchanged.
/// * `period` - The payroll period.
/// * `loader` - The rate table configuration.
///
/// # Errors
///
/// Returns `RateTableNotFound` when no table exists for the period's year.
/// Per-employee errors never surface here; they land in the report's
/// `failures` list.
pub fn process_period(
    employees: &[Employee],
    entries: &[TimeEntry],
    bonuses: &HashMap<String, Vec<Bonus>>,
    period: PayrollPeriod,
    loader: &RateTableLoader,
) -> EngineResult<PeriodRunReport> {
    let table = loader.table_for_year(period.year())?;
    let run_id = Uuid::new_v4();

    info!(
        run_id = %run_id,
        year = period.year(),
        start = %period.start_date,
        end = %period.end_date,
        roster_size = employees.len(),
        "Starting payroll run"
    );

    let mut results = Vec::new();
    let mut skipped_inactive = Vec::new();
    let mut failures = Vec::new();

    for employee in employees {
        if !employee.is_active() {
            info!(run_id = %run_id, employee_id = %employee.id, "Skipping inactive employee");
            skipped_inactive.push(employee.id.clone());
            continue;
        }

        let employee_bonuses = bonuses
            .get(&employee.id)
            .map(Vec::as_slice)
            .unwrap_or_default();

        match process_employee(employee, entries, employee_bonuses, period, table) {
            Ok(result) => {
                info!(
                    run_id = %run_id,
                    employee_id = %employee.id,
                    net_pay = %result.breakdown.net_pay,
                    violations = result.validation.violations.len(),
                    entries_to_lock = result.entries_to_lock.len(),
                    "Employee payroll computed"
                );
                results.push(result);
            }
            Err(error) => {
                warn!(
                    run_id = %run_id,
                    employee_id = %employee.id,
                    error = %error,
                    "Employee payroll failed"
                );
                failures.push(EmployeeFailure {
                    employee_id: employee.id.clone(),
                    message: error.to_string(),
                });
            }
        }
    }

    info!(
        run_id = %run_id,
        computed = results.len(),
        skipped_inactive = skipped_inactive.len(),
        failed = failures.len(),
        "Payroll run finished"
    );

    Ok(PeriodRunReport {
        run_id,
        period,
        results,
        skipped_inactive,
        failures,
    })
}

/// The single-employee pipeline: aggregate, calculate, validate.
fn process_employee(
    employee: &Employee,
    entries: &[TimeEntry],
    bonuses: &[Bonus],
    period: PayrollPeriod,
    table: &RateTable,
) -> EngineResult<EmployeePayroll> {
    let aggregation = aggregate_entries(&employee.id, period, entries, table);
    let breakdown = calculate_payroll(employee, &aggregation.totals, bonuses, table)?;
    let validation = validate(&breakdown, table);

    Ok(EmployeePayroll {
        employee_id: employee.id.clone(),
        breakdown,
        validation,
        warnings: aggregation.warnings,
        skipped_entries: aggregation.skipped,
        entries_to_lock: aggregation.consumed_entry_ids,
    })
}
