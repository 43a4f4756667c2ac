//! Employee model and compensation-basis types.
//!
//! This module defines the Employee struct, the ARL risk classes and the
//! compensation representations used to derive hourly rates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Hours divisor used to derive an hourly rate from a monthly salary.
pub const MONTHLY_HOURS_DIVISOR: Decimal = Decimal::from_parts(192, 0, 0, false, 0);

/// Days in the payroll month, used to derive the monthly equivalent of a
/// daily rate.
const DAYS_PER_MONTH: Decimal = Decimal::from_parts(30, 0, 0, false, 0);

/// Workplace-risk insurance (ARL) class.
///
/// Class I is the lowest risk. Construction and welding positions are
/// typically class IV or V.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskClass {
    /// Minimal risk (administrative work).
    I,
    /// Low risk.
    II,
    /// Medium risk.
    III,
    /// High risk.
    IV,
    /// Maximum risk (work at height, welding, heavy machinery).
    V,
}

/// Employment status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Currently employed; included in payroll runs.
    Active,
    /// No longer employed; skipped by payroll runs.
    Inactive,
}

/// The raw compensation fields as they arrive from the personnel system.
///
/// Two overlapping representations exist: the current pair (monthly salary
/// base or daily rate) and a legacy pair (monthly salary and hourly rate)
/// still present on older records. [`CompensationSpec::normalize`] resolves
/// them into a single [`CompensationBasis`] exactly once at the boundary;
/// nothing downstream ever looks at the raw fields again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationSpec {
    /// Current-style monthly salary base.
    #[serde(default)]
    pub salary_base: Option<Decimal>,
    /// Current-style daily rate.
    #[serde(default)]
    pub daily_rate: Option<Decimal>,
    /// Legacy monthly salary.
    #[serde(default)]
    pub monthly_salary: Option<Decimal>,
    /// Legacy hourly rate.
    #[serde(default)]
    pub hourly_rate: Option<Decimal>,
}

impl CompensationSpec {
    /// A spec carrying only a monthly salary base.
    pub fn from_salary(amount: Decimal) -> Self {
        Self {
            salary_base: Some(amount),
            daily_rate: None,
            monthly_salary: None,
            hourly_rate: None,
        }
    }

    /// A spec carrying only a daily rate.
    pub fn from_daily_rate(amount: Decimal) -> Self {
        Self {
            salary_base: None,
            daily_rate: Some(amount),
            monthly_salary: None,
            hourly_rate: None,
        }
    }

    /// Resolves the raw fields into a single compensation basis.
    ///
    /// Precedence: `salary_base`, then `daily_rate`, then the legacy
    /// `monthly_salary`, then the legacy `hourly_rate` converted to a
    /// monthly figure. The current pair always wins over the legacy pair.
    ///
    /// # Errors
    ///
    /// Returns `InvalidEmployee` when no usable field is present.
    pub fn normalize(&self) -> EngineResult<CompensationBasis> {
        if let Some(amount) = self.salary_base {
            return Ok(CompensationBasis::MonthlySalary { amount });
        }
        if let Some(amount) = self.daily_rate {
            return Ok(CompensationBasis::DailyRate { amount });
        }
        if let Some(amount) = self.monthly_salary {
            return Ok(CompensationBasis::MonthlySalary { amount });
        }
        if let Some(rate) = self.hourly_rate {
            return Ok(CompensationBasis::MonthlySalary {
                amount: rate * MONTHLY_HOURS_DIVISOR,
            });
        }
        Err(EngineError::InvalidEmployee {
            field: "compensation".to_string(),
            message: "no salary base, daily rate or legacy salary present".to_string(),
        })
    }
}

/// The normalized compensation basis of an employee.
///
/// Exactly one of the two variants survives normalization. Employer
/// contributions are always computed against this basis (via
/// [`CompensationBasis::monthly_equivalent`]), never against realized pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompensationBasis {
    /// A contractual monthly salary.
    MonthlySalary {
        /// The monthly amount.
        amount: Decimal,
    },
    /// A contractual daily rate.
    DailyRate {
        /// The per-day amount.
        amount: Decimal,
    },
}

impl CompensationBasis {
    /// Derives the hourly rate from the basis.
    ///
    /// A daily rate divides by the legal daily hours; a monthly salary
    /// divides by the 192-hour payroll month.
    ///
    /// # Examples
    ///
    /// ```
    /// use nomina_engine::models::CompensationBasis;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let basis = CompensationBasis::MonthlySalary {
    ///     amount: Decimal::from_str("1920000").unwrap(),
    /// };
    /// let legal_daily_hours = Decimal::from_str("7.3").unwrap();
    /// assert_eq!(
    ///     basis.hourly_rate(legal_daily_hours),
    ///     Decimal::from_str("10000").unwrap()
    /// );
    /// ```
    pub fn hourly_rate(&self, legal_daily_hours: Decimal) -> Decimal {
        match self {
            CompensationBasis::MonthlySalary { amount } => amount / MONTHLY_HOURS_DIVISOR,
            CompensationBasis::DailyRate { amount } => amount / legal_daily_hours,
        }
    }

    /// The monthly-equivalent amount of the basis.
    ///
    /// Used for every threshold comparison (minimum wage, transport
    /// allowance ceiling, solidarity threshold) and as the base for
    /// employer contributions.
    pub fn monthly_equivalent(&self) -> Decimal {
        match self {
            CompensationBasis::MonthlySalary { amount } => *amount,
            CompensationBasis::DailyRate { amount } => amount * DAYS_PER_MONTH,
        }
    }
}

/// Represents an employee subject to payroll computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's full name.
    pub name: String,
    /// The position held (e.g., "soldador", "oficial de obra").
    pub position: String,
    /// The department or crew.
    pub department: String,
    /// Raw compensation fields; normalized once per payroll run.
    pub compensation: CompensationSpec,
    /// Workplace-risk class for ARL contributions.
    pub risk_class: RiskClass,
    /// Whether the employee participates in payroll runs.
    pub status: EmploymentStatus,
}

impl Employee {
    /// Returns true if the employee is active.
    pub fn is_active(&self) -> bool {
        self.status == EmploymentStatus::Active
    }

    /// Resolves the employee's compensation basis.
    pub fn compensation_basis(&self) -> EngineResult<CompensationBasis> {
        self.compensation.normalize()
    }
}
