//! HTTP API module for the timekeeping engine.
//!
//! This module provides the REST endpoints for the clock-in/clock-out/
//! break lifecycle and the payroll, attendance, and department reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    AttendanceQuery, BreakRequest, ClockInRequest, ClockOutRequest, MarkAbsentRequest,
    PayrollQuery, RangeQuery, RegisterEmployeeRequest,
};
pub use response::ApiError;
pub use state::AppState;
