//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during payroll computation.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use nomina_engine::error::EngineError;
///
/// let error = EngineError::RateTableNotFound { year: 2019 };
/// assert_eq!(error.to_string(), "No rate table configured for year 2019");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No rate table is configured for the requested year.
    ///
    /// This is fatal for the whole payroll period: without the year's legal
    /// constants no employee in the period can be computed.
    #[error("No rate table configured for year {year}")]
    RateTableNotFound {
        /// The payroll period's calendar year.
        year: i32,
    },

    /// A time entry was malformed or degenerate.
    ///
    /// Rejects that single day's entry only; it never aborts the employee
    /// or the period.
    #[error("Invalid time entry '{entry_id}': {message}")]
    InvalidTimeEntry {
        /// The ID of the invalid entry.
        entry_id: String,
        /// A description of what made the entry invalid.
        message: String,
    },

    /// An employee record was invalid or contained inconsistent data.
    #[error("Invalid employee field '{field}': {message}")]
    InvalidEmployee {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/file.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/file.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_rate_table_not_found_displays_year() {
        let error = EngineError::RateTableNotFound { year: 2019 };
        assert_eq!(error.to_string(), "No rate table configured for year 2019");
    }

    #[test]
    fn test_invalid_time_entry_displays_id_and_message() {
        let error = EngineError::InvalidTimeEntry {
            entry_id: "entry_001".to_string(),
            message: "arrival equals departure".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid time entry 'entry_001': arrival equals departure"
        );
    }

    #[test]
    fn test_invalid_employee_displays_field_and_message() {
        let error = EngineError::InvalidEmployee {
            field: "compensation".to_string(),
            message: "no salary base or daily rate present".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid employee field 'compensation': no salary base or daily rate present"
        );
    }

    #[test]
    fn test_calculation_error_displays_message() {
        let error = EngineError::CalculationError {
            message: "negative hours".to_string(),
        };
        assert_eq!(error.to_string(), "Calculation error: negative hours");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_rate_table_not_found() -> EngineResult<()> {
            Err(EngineError::RateTableNotFound { year: 1999 })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_rate_table_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
