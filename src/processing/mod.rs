//! Period processing: aggregation and the per-employee payroll run.
//!
//! This module is the boundary with the external stores. It consumes
//! employee records and approved time entries, drives each employee
//! through decomposition, aggregation, calculation and validation, and
//! collects results and failures into a single run report. All I/O
//! (reading entries, persisting breakdowns, applying lock transitions)
//! stays with the caller.

mod aggregation;
mod processor;

pub use aggregation::{Aggregation, SkippedEntry, aggregate_entries};
pub use processor::{EmployeeFailure, EmployeePayroll, PeriodRunReport, process_period};
