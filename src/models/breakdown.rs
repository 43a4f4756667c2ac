//! Payroll breakdown models.
//!
//! This module contains the [`PayrollBreakdown`] type and its line items:
//! income lines computed on realized hours, employee deduction lines, and
//! employer contribution lines computed on the compensation basis.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::employee::CompensationBasis;
use super::period::PayrollPeriod;

/// The category of an income line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeCategory {
    /// Pay for hours up to the legal daily limit.
    Regular,
    /// Pay for hours beyond the legal daily limit, at the overtime
    /// multiplier.
    Overtime,
    /// Surcharge for hours inside the night window, layered on top of the
    /// regular/overtime pay for the same hours.
    NightSurcharge,
    /// The flat statutory transport allowance.
    TransportAllowance,
    /// An ad hoc bonus passed through unchanged.
    Bonus,
}

/// A single income line.
///
/// Hour-based lines carry `hours` and `rate`; flat lines (transport
/// allowance, bonuses) carry neither.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeLine {
    /// The category of income.
    pub category: IncomeCategory,
    /// Hours paid by this line, absent for flat amounts.
    pub hours: Option<Decimal>,
    /// The effective hourly rate, absent for flat amounts.
    pub rate: Option<Decimal>,
    /// The line amount.
    pub amount: Decimal,
}

/// The category of an employee deduction line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeductionCategory {
    /// Employee health contribution.
    Health,
    /// Employee pension contribution.
    Pension,
    /// Pension solidarity fund, owed above the legal threshold.
    Solidarity,
}

/// A single employee deduction line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionLine {
    /// The category of deduction.
    pub category: DeductionCategory,
    /// The base the percentage was applied to.
    pub base: Decimal,
    /// The percentage applied (4 means 4%).
    pub percentage: Decimal,
    /// The deducted amount.
    pub amount: Decimal,
}

/// The category of an employer contribution line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionCategory {
    /// Employer health contribution.
    Health,
    /// Employer pension contribution.
    Pension,
    /// Workplace-risk insurance, rate by risk class.
    Arl,
    /// Severance accrual (cesantías).
    Severance,
    /// Statutory interest on the severance accrual.
    SeveranceInterest,
    /// Service bonus accrual (prima).
    ServiceBonus,
    /// Vacation accrual.
    Vacation,
    /// National training service levy.
    Sena,
    /// Family welfare institute levy.
    Icbf,
    /// Regional compensation fund levy.
    CompensationFund,
}

/// A single employer contribution line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionLine {
    /// The category of contribution.
    pub category: ContributionCategory,
    /// The base the percentage was applied to (the monthly-equivalent
    /// compensation basis, or the severance amount for its interest).
    pub base: Decimal,
    /// The percentage applied.
    pub percentage: Decimal,
    /// The contribution amount.
    pub amount: Decimal,
}

/// An ad hoc bonus supplied by the orchestrator, passed through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonus {
    /// Human-readable description of the bonus.
    pub description: String,
    /// The bonus amount.
    pub amount: Decimal,
}

/// The complete payroll breakdown for one employee and one period.
///
/// The breakdown is a pure function of its inputs: identical employee,
/// totals and rate table always produce a byte-identical serialized
/// breakdown. Identifiers and timestamps belong to the processing run
/// report, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollBreakdown {
    /// The employee the breakdown is for.
    pub employee_id: String,
    /// The payroll period.
    pub period: PayrollPeriod,
    /// The normalized compensation basis used.
    pub basis: CompensationBasis,
    /// The hourly rate derived from the basis.
    pub hourly_rate: Decimal,
    /// Income lines, in computation order.
    pub income: Vec<IncomeLine>,
    /// Sum of all income lines.
    pub total_income: Decimal,
    /// Employee deduction lines, in computation order.
    pub deductions: Vec<DeductionLine>,
    /// Sum of all deduction lines.
    pub total_deductions: Decimal,
    /// Employer contribution lines, in computation order.
    pub contributions: Vec<ContributionLine>,
    /// Sum of all contribution lines.
    pub total_contributions: Decimal,
    /// `total_income - total_deductions`, exactly.
    pub net_pay: Decimal,
    /// `total_income + total_contributions`, exactly.
    pub employer_total_cost: Decimal,
}

impl PayrollBreakdown {
    /// The amount of one income category, summed across its lines.
    pub fn income_amount(&self, category: IncomeCategory) -> Decimal {
        self.income
            .iter()
            .filter(|l| l.category == category)
            .map(|l| l.amount)
            .sum()
    }

    /// The transport allowance paid, zero when not eligible.
    pub fn transport_allowance(&self) -> Decimal {
        self.income_amount(IncomeCategory::TransportAllowance)
    }

    /// The deduction line for a category, if present.
    pub fn deduction(&self, category: DeductionCategory) -> Option<&DeductionLine> {
        self.deductions.iter().find(|l| l.category == category)
    }

    /// The contribution line for a category, if present.
    pub fn contribution(&self, category: ContributionCategory) -> Option<&ContributionLine> {
        self.contributions.iter().find(|l| l.category == category)
    }
}
