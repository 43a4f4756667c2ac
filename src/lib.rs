//! Payroll computation engine for Colombian labor law.
//!
//! This crate converts raw employee clock-in/clock-out records into legally
//! classified work hours and computes full payroll breakdowns (gross pay,
//! statutory deductions, employer contributions, net pay) for construction
//! and welding-sector employees.

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod processing;
pub mod validation;
