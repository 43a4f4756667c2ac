//! Legal validation of computed payroll breakdowns.
//!
//! The validator checks a [`PayrollBreakdown`] against the rate table's
//! thresholds and reports compliance violations. It is advisory: it never
//! blocks the calculator's output, it only annotates it. Whether to halt a
//! period on a violation is the orchestrator's decision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::RateTable;
use crate::models::{ContributionCategory, DeductionCategory, PayrollBreakdown};

const ONE_HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// The compliance rule a violation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRule {
    /// The compensation basis is below the legal minimum wage.
    MinimumWage,
    /// The employee health deduction is below the required percentage.
    HealthDeduction,
    /// The employee pension deduction is below the required percentage.
    PensionDeduction,
    /// Transport allowance owed but missing, or paid without eligibility.
    TransportAllowance,
    /// Solidarity contribution owed but missing, or charged below the
    /// threshold.
    SolidarityContribution,
    /// The employer health contribution is below the required percentage.
    EmployerHealth,
    /// The employer pension contribution is below the required percentage.
    EmployerPension,
}

/// A single compliance violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// The rule that was violated.
    pub rule: ValidationRule,
    /// A human-readable description of the violation.
    pub message: String,
}

/// The result of validating a payroll breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True when no violations were found.
    pub is_valid: bool,
    /// Violations in rule-check order.
    pub violations: Vec<Violation>,
}

/// Checks a computed breakdown against the rate table's thresholds.
///
/// Every rule is evaluated; the result lists all violations in check
/// order rather than stopping at the first.
///
/// # Example
///
/// ```no_run
/// use nomina_engine::config::RateTableLoader;
/// use nomina_engine::validation::validate;
/// # let breakdown: nomina_engine::models::PayrollBreakdown = unimplemented!();
///
/// let loader = RateTableLoader::load("./config/colombia").unwrap();
/// let table = loader.table_for_year(2024).unwrap();
/// let result = validate(&breakdown, table);
/// if !result.is_valid {
///     for violation in &result.violations {
///         eprintln!("{:?}: {}", violation.rule, violation.message);
///     }
/// }
/// ```
pub fn validate(breakdown: &PayrollBreakdown, table: &RateTable) -> ValidationResult {
    let mut violations = Vec::new();
    let monthly_equivalent = breakdown.basis.monthly_equivalent();

    check_minimum_wage(breakdown, table, monthly_equivalent, &mut violations);
    check_deduction(
        breakdown,
        DeductionCategory::Health,
        table.employee_deductions.health_pct,
        ValidationRule::HealthDeduction,
        &mut violations,
    );
    check_deduction(
        breakdown,
        DeductionCategory::Pension,
        table.employee_deductions.pension_pct,
        ValidationRule::PensionDeduction,
        &mut violations,
    );
    check_transport_allowance(breakdown, table, monthly_equivalent, &mut violations);
    check_solidarity(breakdown, table, monthly_equivalent, &mut violations);
    check_contribution(
        breakdown,
        ContributionCategory::Health,
        table.employer_contributions.health_pct,
        ValidationRule::EmployerHealth,
        &mut violations,
    );
    check_contribution(
        breakdown,
        ContributionCategory::Pension,
        table.employer_contributions.pension_pct,
        ValidationRule::EmployerPension,
        &mut violations,
    );

    ValidationResult {
        is_valid: violations.is_empty(),
        violations,
    }
}

fn check_minimum_wage(
    breakdown: &PayrollBreakdown,
    table: &RateTable,
    monthly_equivalent: Decimal,
    violations: &mut Vec<Violation>,
) {
    if monthly_equivalent < table.minimum_wage {
        violations.push(Violation {
            rule: ValidationRule::MinimumWage,
            message: format!(
                "compensation basis {} for employee '{}' is below the minimum wage {}",
                monthly_equivalent.normalize(),
                breakdown.employee_id,
                table.minimum_wage.normalize()
            ),
        });
    }
}

fn check_deduction(
    breakdown: &PayrollBreakdown,
    category: DeductionCategory,
    required_pct: Decimal,
    rule: ValidationRule,
    violations: &mut Vec<Violation>,
) {
    let Some(line) = breakdown.deduction(category) else {
        violations.push(Violation {
            rule,
            message: format!("{:?} deduction line is missing", category),
        });
        return;
    };

    let required = (line.base * required_pct / ONE_HUNDRED).round_dp(2);
    if line.amount < required {
        violations.push(Violation {
            rule,
            message: format!(
                "{:?} deduction {} is below the required {}% of {} ({})",
                category,
                line.amount.normalize(),
                required_pct.normalize(),
                line.base.normalize(),
                required.normalize()
            ),
        });
    }
}

fn check_transport_allowance(
    breakdown: &PayrollBreakdown,
    table: &RateTable,
    monthly_equivalent: Decimal,
    violations: &mut Vec<Violation>,
) {
    let eligible = monthly_equivalent <= table.transport_ceiling();
    let paid = breakdown.transport_allowance();

    if eligible && paid <= Decimal::ZERO {
        violations.push(Violation {
            rule: ValidationRule::TransportAllowance,
            message: format!(
                "transport allowance is owed (basis {} is within {}) but missing",
                monthly_equivalent.normalize(),
                table.transport_ceiling().normalize()
            ),
        });
    } else if !eligible && paid > Decimal::ZERO {
        violations.push(Violation {
            rule: ValidationRule::TransportAllowance,
            message: format!(
                "transport allowance {} paid although the basis {} exceeds the ceiling {}",
                paid.normalize(),
                monthly_equivalent.normalize(),
                table.transport_ceiling().normalize()
            ),
        });
    }
}

fn check_solidarity(
    breakdown: &PayrollBreakdown,
    table: &RateTable,
    monthly_equivalent: Decimal,
    violations: &mut Vec<Violation>,
) {
    let owed = monthly_equivalent > table.solidarity_threshold();
    let line = breakdown.deduction(DeductionCategory::Solidarity);

    if owed && line.is_none_or(|l| l.amount <= Decimal::ZERO) {
        violations.push(Violation {
            rule: ValidationRule::SolidarityContribution,
            message: format!(
                "missing solidarity contribution: basis {} exceeds the threshold {}",
                monthly_equivalent.normalize(),
                table.solidarity_threshold().normalize()
            ),
        });
    } else if !owed && line.is_some_and(|l| l.amount > Decimal::ZERO) {
        violations.push(Violation {
            rule: ValidationRule::SolidarityContribution,
            message: format!(
                "solidarity contribution charged although the basis {} is at or below the threshold {}",
                monthly_equivalent.normalize(),
                table.solidarity_threshold().normalize()
            ),
        });
    }
}

fn check_contribution(
    breakdown: &PayrollBreakdown,
    category: ContributionCategory,
    required_pct: Decimal,
    rule: ValidationRule,
    violations: &mut Vec<Violation>,
) {
    let Some(line) = breakdown.contribution(category) else {
        violations.push(Violation {
            rule,
            message: format!("employer {:?} contribution line is missing", category),
        });
        return;
    };

    let required = (line.base * required_pct / ONE_HUNDRED).round_dp(2);
    if line.amount < required {
        violations.push(Violation {
            rule,
            message: format!(
                "employer {:?} contribution {} is below the required {}% of {} ({})",
                category,
                line.amount.normalize(),
                required_pct.normalize(),
                line.base.normalize(),
                required.normalize()
            ),
        });
    }
}
