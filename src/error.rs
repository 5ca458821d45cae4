//! Error types for the timekeeping engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while maintaining time records
//! and computing pay.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The main error type for the timekeeping engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use dtr_engine::error::EngineError;
///
/// let error = EngineError::EmployeeNotFound {
///     id: "emp_042".to_string(),
/// };
/// assert_eq!(error.to_string(), "Employee not found: emp_042");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// A clock-out timestamp was earlier than the clock-in timestamp.
    #[error("Invalid interval: {message}")]
    InvalidInterval {
        /// A description of the invalid interval.
        message: String,
    },

    /// No time record exists with the given id.
    #[error("Time record not found: {id}")]
    RecordNotFound {
        /// The time record id that was not found.
        id: Uuid,
    },

    /// No employee is registered with the given id.
    #[error("Employee not found: {id}")]
    EmployeeNotFound {
        /// The employee id that was not found.
        id: String,
    },

    /// A time record already exists for the employee on the given date.
    ///
    /// Surfaced only from administrative creation paths; the clock-in
    /// race resolves to the existing record instead.
    #[error("Time record already exists for employee '{employee_id}' on {date}")]
    DuplicateRecord {
        /// The employee the record belongs to.
        employee_id: String,
        /// The calendar date of the existing record.
        date: NaiveDate,
    },

    /// An operation was attempted from a state that does not permit it.
    ///
    /// Only returned under the strict transition policy; the lenient
    /// policy reports these as no-op outcomes.
    #[error("Invalid transition in {operation}: {message}")]
    InvalidTransition {
        /// The operation that was rejected (e.g., "clock_out").
        operation: String,
        /// A description of why the transition is invalid.
        message: String,
    },

    /// Policy configuration file was not found at the specified path.
    #[error("Policy file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Policy configuration file could not be parsed.
    #[error("Failed to parse policy file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_interval_displays_message() {
        let error = EngineError::InvalidInterval {
            message: "clock_out 08:00 is before clock_in 09:00".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid interval: clock_out 08:00 is before clock_in 09:00"
        );
    }

    #[test]
    fn test_record_not_found_displays_id() {
        let id = Uuid::nil();
        let error = EngineError::RecordNotFound { id };
        assert_eq!(
            error.to_string(),
            format!("Time record not found: {}", id)
        );
    }

    #[test]
    fn test_employee_not_found_displays_id() {
        let error = EngineError::EmployeeNotFound {
            id: "emp_042".to_string(),
        };
        assert_eq!(error.to_string(), "Employee not found: emp_042");
    }

    #[test]
    fn test_duplicate_record_displays_employee_and_date() {
        let error = EngineError::DuplicateRecord {
            employee_id: "emp_001".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 7, 25).unwrap(),
        };
        assert_eq!(
            error.to_string(),
            "Time record already exists for employee 'emp_001' on 2025-07-25"
        );
    }

    #[test]
    fn test_invalid_transition_displays_operation_and_message() {
        let error = EngineError::InvalidTransition {
            operation: "clock_out".to_string(),
            message: "record is not active".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid transition in clock_out: record is not active"
        );
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/policy.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Policy file not found: /missing/policy.yaml"
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
            "Failed to parse policy file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_employee_not_found() -> EngineResult<()> {
            Err(EngineError::EmployeeNotFound {
                id: "emp_x".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_employee_not_found()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
