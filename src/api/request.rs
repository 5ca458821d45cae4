//! Request types for the timekeeping API.
//!
//! This module defines the JSON bodies of the lifecycle endpoints and the
//! query strings of the report endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Employee, EmployeeStatus};

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterEmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// The department grouping key, if assigned.
    #[serde(default)]
    pub department: Option<String>,
    /// The employee's hourly pay rate.
    pub hourly_rate: Decimal,
    /// The employee's standing. Defaults to active.
    #[serde(default = "default_status")]
    pub status: EmployeeStatus,
    /// Preferred IANA timezone for display purposes.
    #[serde(default)]
    pub timezone: Option<String>,
}

fn default_status() -> EmployeeStatus {
    EmployeeStatus::Active
}

impl From<RegisterEmployeeRequest> for Employee {
    fn from(req: RegisterEmployeeRequest) -> Self {
        Employee {
            id: req.id,
            name: req.name,
            department: req.department,
            hourly_rate: req.hourly_rate,
            status: req.status,
            timezone: req.timezone,
        }
    }
}

/// Request body for `POST /time/clock-in`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockInRequest {
    /// The employee clocking in.
    pub employee_id: String,
    /// The calendar date of the record. Defaults to the current UTC day.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

/// Request body for `POST /time/clock-out`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockOutRequest {
    /// The record to close.
    pub time_record_id: Uuid,
    /// Optional note captured at clock-out.
    #[serde(default)]
    pub note: Option<String>,
}

/// Request body for `POST /time/breaks/start` and `POST /time/breaks/end`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakRequest {
    /// The record the break belongs to.
    pub time_record_id: Uuid,
}

/// Request body for `POST /time/absences`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkAbsentRequest {
    /// The employee who was absent.
    pub employee_id: String,
    /// The calendar date of the absence.
    pub date: NaiveDate,
}

/// Query string for `GET /reports/payroll`.
///
/// Either `month` + `year` or `from` + `to` must be supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollQuery {
    /// The employee the report covers.
    pub employee_id: String,
    /// Calendar month (1-12).
    #[serde(default)]
    pub month: Option<u32>,
    /// Calendar year.
    #[serde(default)]
    pub year: Option<i32>,
    /// Start of an explicit range (inclusive).
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// End of an explicit range (inclusive).
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

/// Query string for `GET /reports/attendance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceQuery {
    /// The employee the report covers.
    pub employee_id: String,
    /// Start of the range (inclusive).
    pub from: NaiveDate,
    /// End of the range (inclusive).
    pub to: NaiveDate,
}

/// Query string for `GET /reports/departments`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeQuery {
    /// Start of the range (inclusive).
    pub from: NaiveDate,
    /// End of the range (inclusive).
    pub to: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_register_employee_request() {
        let json = r#"{
            "id": "emp_001",
            "name": "Dana Cruz",
            "department": "Engineering",
            "hourly_rate": "25.00"
        }"#;

        let request: RegisterEmployeeRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.status, EmployeeStatus::Active);

        let employee: Employee = request.into();
        assert_eq!(employee.id, "emp_001");
        assert_eq!(employee.hourly_rate, Decimal::from_str("25.00").unwrap());
    }

    #[test]
    fn test_deserialize_clock_in_without_date() {
        let json = r#"{"employee_id": "emp_001"}"#;
        let request: ClockInRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.employee_id, "emp_001");
        assert!(request.date.is_none());
    }

    #[test]
    fn test_deserialize_clock_in_with_date() {
        let json = r#"{"employee_id": "emp_001", "date": "2025-07-25"}"#;
        let request: ClockInRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.date,
            Some(NaiveDate::from_ymd_opt(2025, 7, 25).unwrap())
        );
    }

    #[test]
    fn test_deserialize_clock_out_request() {
        let json = r#"{
            "time_record_id": "6f7c0f9e-4f76-4e7a-a6f5-0e6d36a5d1b4",
            "note": "heading home"
        }"#;
        let request: ClockOutRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.note.as_deref(), Some("heading home"));
    }

    #[test]
    fn test_deserialize_payroll_query_month_form() {
        let query: PayrollQuery =
            serde_json::from_str(r#"{"employee_id": "emp_001", "month": 7, "year": 2025}"#)
                .unwrap();
        assert_eq!(query.month, Some(7));
        assert_eq!(query.year, Some(2025));
        assert!(query.from.is_none());
    }
}
