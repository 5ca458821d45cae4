//! Core data models for the timekeeping engine.
//!
//! This module contains all the domain models used throughout the engine.

mod break_session;
mod employee;
mod summary;
mod time_record;

pub use break_session::{BreakSession, BreakState};
pub use employee::{Employee, EmployeeStatus};
pub use summary::{AttendanceSummary, DepartmentSummary, PayrollSummary};
pub use time_record::{RecordState, TimeRecord};
