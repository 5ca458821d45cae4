//! Employee read model and related types.
//!
//! This module defines the Employee struct and EmployeeStatus enum. The
//! engine only reads `id`, `hourly_rate`, `department`, and `status`;
//! identity, credentials, and HR workflow live in an external subsystem.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Represents an employee's standing with the company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently employed and expected to clock in.
    Active,
    /// No longer employed or suspended.
    Inactive,
    /// On an approved leave of absence.
    OnLeave,
}

/// Represents an employee whose time records the engine maintains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's display name.
    pub name: String,
    /// The department grouping key, if assigned.
    ///
    /// Departments are a derived grouping over this string; there is no
    /// separate department entity.
    #[serde(default)]
    pub department: Option<String>,
    /// The employee's hourly pay rate (non-negative).
    pub hourly_rate: Decimal,
    /// The employee's standing.
    pub status: EmployeeStatus,
    /// Preferred IANA timezone for displaying timestamps.
    ///
    /// Presentation metadata only; hour calculations always use UTC
    /// instants.
    #[serde(default)]
    pub timezone: Option<String>,
}

impl Employee {
    /// Returns true if the employee is in active standing.
    ///
    /// # Examples
    ///
    /// ```
    /// use dtr_engine::models::{Employee, EmployeeStatus};
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Dana Cruz".to_string(),
    ///     department: Some("Engineering".to_string()),
    ///     hourly_rate: Decimal::new(2500, 2),
    ///     status: EmployeeStatus::Active,
    ///     timezone: None,
    /// };
    /// assert!(employee.is_active());
    /// ```
    pub fn is_active(&self) -> bool {
        self.status == EmployeeStatus::Active
    }
}
