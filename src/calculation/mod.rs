//! Calculation logic for the payroll engine.
//!
//! This module contains the two computational cores: time decomposition
//! (raw clock times into legally classified hour buckets) and the payroll
//! calculator (period hour totals into a full breakdown of income,
//! deductions and employer contributions).

mod payroll;
mod time_decomposition;

pub use payroll::calculate_payroll;
pub use time_decomposition::{DayDecomposition, decompose_day};
