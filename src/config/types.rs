//! Rate table types.
//!
//! This module contains the strongly-typed rate table structures that are
//! deserialized from YAML configuration files, one file per calendar year.
//! The table is pure data; all interpretation happens in the calculation
//! and validation modules.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::models::RiskClass;

/// The statutory transport allowance and its eligibility rule.
#[derive(Debug, Clone, Deserialize)]
pub struct TransportAllowanceRule {
    /// The flat monthly allowance amount.
    pub amount: Decimal,
    /// Eligibility ceiling as a multiple of the minimum wage (2 by law:
    /// employees earning at most twice the minimum wage receive it).
    pub ceiling_multiple: Decimal,
}

/// Employee-side deduction percentages.
///
/// Percentages are expressed as percent values (4 means 4%).
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeDeductionRates {
    /// Health deduction percentage of the contribution base.
    pub health_pct: Decimal,
    /// Pension deduction percentage of the contribution base.
    pub pension_pct: Decimal,
    /// Solidarity fund percentage, owed above the threshold only.
    pub solidarity_pct: Decimal,
    /// Solidarity threshold as a multiple of the minimum wage.
    pub solidarity_threshold_multiple: Decimal,
    /// Cap on the contribution base as a multiple of the minimum wage.
    pub contribution_base_cap_multiple: Decimal,
}

/// Parafiscal levy percentages (training, family welfare, compensation fund).
#[derive(Debug, Clone, Deserialize)]
pub struct ParafiscalRates {
    /// National training service (SENA) percentage.
    pub sena_pct: Decimal,
    /// Family welfare institute (ICBF) percentage.
    pub icbf_pct: Decimal,
    /// Regional compensation fund percentage.
    pub compensation_fund_pct: Decimal,
}

/// Workplace-risk insurance (ARL) percentages by risk class.
///
/// Class I is the lowest risk; class V (typical for construction and
/// welding) the highest.
#[derive(Debug, Clone, Deserialize)]
pub struct ArlRates {
    /// Risk class I percentage.
    pub class_1: Decimal,
    /// Risk class II percentage.
    pub class_2: Decimal,
    /// Risk class III percentage.
    pub class_3: Decimal,
    /// Risk class IV percentage.
    pub class_4: Decimal,
    /// Risk class V percentage.
    pub class_5: Decimal,
}

impl ArlRates {
    /// Returns the ARL percentage for a risk class.
    pub fn rate_for(&self, class: RiskClass) -> Decimal {
        match class {
            RiskClass::I => self.class_1,
            RiskClass::II => self.class_2,
            RiskClass::III => self.class_3,
            RiskClass::IV => self.class_4,
            RiskClass::V => self.class_5,
        }
    }
}

/// Employer-side contribution percentages.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployerContributionRates {
    /// Employer health contribution percentage.
    pub health_pct: Decimal,
    /// Employer pension contribution percentage.
    pub pension_pct: Decimal,
    /// Severance (cesantías) accrual percentage.
    pub severance_pct: Decimal,
    /// Severance interest percentage, applied to the severance line amount.
    pub severance_interest_pct: Decimal,
    /// Service bonus (prima) accrual percentage.
    pub service_bonus_pct: Decimal,
    /// Vacation accrual percentage.
    pub vacation_pct: Decimal,
    /// Parafiscal levies.
    pub parafiscales: ParafiscalRates,
    /// Workplace-risk insurance rates by class.
    pub arl: ArlRates,
}

/// Legal workday rules: hour thresholds, the night window, and multipliers.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkdayRules {
    /// Legal ordinary hours per day; hours beyond this are overtime.
    pub legal_daily_hours: Decimal,
    /// Daily hour count above which a legal-limit warning is raised.
    pub max_daily_hours: Decimal,
    /// Start of the night window (inclusive).
    pub night_start: NaiveTime,
    /// End of the night window (exclusive).
    pub night_end: NaiveTime,
    /// Overtime pay multiplier (1.25 = 125% of the hourly rate).
    pub overtime_multiplier: Decimal,
    /// Night surcharge multiplier, additive on top of regular/overtime pay
    /// for the same hours (0.35 = 35% of the hourly rate).
    pub night_surcharge: Decimal,
}

/// The complete legal rate table for one calendar year.
///
/// # Example
///
/// ```no_run
/// use nomina_engine::config::RateTableLoader;
///
/// let loader = RateTableLoader::load("./config/colombia")?;
/// let table = loader.table_for_year(2025)?;
/// println!("Minimum wage: {}", table.minimum_wage);
/// # Ok::<(), nomina_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RateTable {
    /// The calendar year these rates are effective for.
    pub year: i32,
    /// The monthly legal minimum wage.
    pub minimum_wage: Decimal,
    /// Transport allowance amount and eligibility rule.
    pub transport_allowance: TransportAllowanceRule,
    /// Employee-side deduction percentages.
    pub employee_deductions: EmployeeDeductionRates,
    /// Employer-side contribution percentages.
    pub employer_contributions: EmployerContributionRates,
    /// Workday rules and multipliers.
    pub workday: WorkdayRules,
}

impl RateTable {
    /// The salary ceiling for transport-allowance eligibility.
    pub fn transport_ceiling(&self) -> Decimal {
        self.minimum_wage * self.transport_allowance.ceiling_multiple
    }

    /// The monthly-equivalent salary above which the solidarity
    /// contribution is owed.
    pub fn solidarity_threshold(&self) -> Decimal {
        self.minimum_wage * self.employee_deductions.solidarity_threshold_multiple
    }

    /// The legal cap on the employee contribution base.
    pub fn contribution_base_cap(&self) -> Decimal {
        self.minimum_wage * self.employee_deductions.contribution_base_cap_multiple
    }
}
