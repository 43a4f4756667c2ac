//! Rate table configuration for the payroll engine.
//!
//! Rate tables carry the year-versioned legal constants (minimum wage,
//! contribution percentages, night window, workday rules) that every
//! calculation depends on. They are pure data: loaded once, then passed
//! by reference into the calculator and validator.

mod loader;
mod types;

pub use loader::RateTableLoader;

#[cfg(test)]
pub(crate) use types::test_support;
pub use types::{
    ArlRates, EmployeeDeductionRates, EmployerContributionRates, ParafiscalRates, RateTable,
    TransportAllowanceRule, WorkdayRules,
};
