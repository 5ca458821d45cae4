//! Derived report rows.
//!
//! This module contains the [`PayrollSummary`], [`AttendanceSummary`], and
//! [`DepartmentSummary`] types computed on demand from time records. None
//! of them is an independently owned entity; they are never persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pay totals for one employee over a date range.
///
/// # Example
///
/// ```
/// use dtr_engine::models::PayrollSummary;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let summary = PayrollSummary {
///     employee_id: "emp_001".to_string(),
///     from: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
///     to: NaiveDate::from_ymd_opt(2025, 7, 31).unwrap(),
///     hourly_rate: Decimal::from_str("25.00").unwrap(),
///     total_hours: Decimal::from_str("15.5").unwrap(),
///     regular_hours: Decimal::from_str("13.0").unwrap(),
///     overtime_hours: Decimal::from_str("2.5").unwrap(),
///     regular_pay: Decimal::from_str("325.00").unwrap(),
///     overtime_pay: Decimal::from_str("93.75").unwrap(),
///     total_pay: Decimal::from_str("418.75").unwrap(),
/// };
/// assert_eq!(summary.total_pay, summary.regular_pay + summary.overtime_pay);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// The employee the summary covers.
    pub employee_id: String,
    /// Start of the range (inclusive).
    pub from: NaiveDate,
    /// End of the range (inclusive).
    pub to: NaiveDate,
    /// The hourly rate used for the computation.
    pub hourly_rate: Decimal,
    /// Sum of per-day total hours.
    pub total_hours: Decimal,
    /// Total hours minus overtime hours.
    pub regular_hours: Decimal,
    /// Sum of per-day overtime hours (capped per day, never recomputed
    /// from the period total).
    pub overtime_hours: Decimal,
    /// Regular hours × hourly rate, rounded to 2 decimals.
    pub regular_pay: Decimal,
    /// Overtime hours × hourly rate × multiplier, rounded to 2 decimals.
    pub overtime_pay: Decimal,
    /// Regular pay + overtime pay.
    pub total_pay: Decimal,
}

/// Attendance figures for one employee over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// The employee the summary covers.
    pub employee_id: String,
    /// Start of the range (inclusive).
    pub from: NaiveDate,
    /// End of the range (inclusive).
    pub to: NaiveDate,
    /// Calendar days in the range.
    pub total_days: i64,
    /// Days with a non-absent time record.
    pub days_worked: i64,
    /// Calendar days minus days worked.
    pub days_absent: i64,
    /// Days worked / total days × 100, rounded to 2 decimals.
    pub attendance_rate: Decimal,
    /// Sum of finalized hours over the range.
    pub total_hours: Decimal,
    /// Total hours / days worked, rounded to 2 decimals (zero when no
    /// days were worked).
    pub average_hours_per_day: Decimal,
}

/// Payroll rollup for one department over a date range.
///
/// Departments are a grouping over the employee `department` string, not
/// an entity: the rollup re-runs the per-employee payroll computation and
/// sums the results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentSummary {
    /// The department grouping key.
    pub department: String,
    /// Number of employees in the department.
    pub employee_count: usize,
    /// Number of those employees in active standing.
    pub active_employees: usize,
    /// Sum of member total hours.
    pub total_hours: Decimal,
    /// Sum of member overtime hours.
    pub overtime_hours: Decimal,
    /// Sum of member total pay.
    pub total_pay: Decimal,
    /// Total hours / employee count, rounded to 2 decimals.
    pub average_hours_per_employee: Decimal,
}
