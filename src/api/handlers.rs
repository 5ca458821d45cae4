//! HTTP request handlers for the timekeeping API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::models::Employee;

use super::request::{
    AttendanceQuery, BreakRequest, ClockInRequest, ClockOutRequest, MarkAbsentRequest,
    PayrollQuery, RangeQuery, RegisterEmployeeRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", post(register_employee_handler))
        .route("/time/clock-in", post(clock_in_handler))
        .route("/time/clock-out", post(clock_out_handler))
        .route("/time/breaks/start", post(start_break_handler))
        .route("/time/breaks/end", post(end_break_handler))
        .route("/time/absences", post(mark_absent_handler))
        .route("/time/records/:id", delete(delete_record_handler))
        .route("/reports/payroll", get(payroll_handler))
        .route("/reports/attendance", get(attendance_handler))
        .route("/reports/departments", get(departments_handler))
        .with_state(state)
}

/// Converts a JSON extraction rejection into a 400 response.
fn reject_payload(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries the detailed error from serde
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::new("VALIDATION_ERROR", body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => ApiError::new(
            "MISSING_CONTENT_TYPE",
            "Content-Type must be application/json",
        ),
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/json")],
        Json(error),
    )
        .into_response()
}

/// Converts an engine error into its HTTP response.
fn engine_error(correlation_id: Uuid, error: EngineError) -> Response {
    warn!(correlation_id = %correlation_id, error = %error, "Operation failed");
    let api_error: ApiErrorResponse = error.into();
    api_error.into_response()
}

/// Handler for POST /employees.
async fn register_employee_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterEmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject_payload(correlation_id, rejection),
    };

    let employee: Employee = request.into();
    info!(
        correlation_id = %correlation_id,
        employee_id = %employee.id,
        "Registering employee"
    );
    state.engine().register_employee(employee.clone());

    (StatusCode::CREATED, Json(employee)).into_response()
}

/// Handler for POST /time/clock-in.
async fn clock_in_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockInRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject_payload(correlation_id, rejection),
    };

    match state.engine().clock_in(&request.employee_id, request.date) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                outcome = ?result.outcome,
                record_id = %result.record.id,
                "Clock-in processed"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /time/clock-out.
async fn clock_out_handler(
    State(state): State<AppState>,
    payload: Result<Json<ClockOutRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject_payload(correlation_id, rejection),
    };

    match state.engine().clock_out(request.time_record_id, request.note) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                record_id = %request.time_record_id,
                outcome = ?result.outcome,
                "Clock-out processed"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /time/breaks/start.
async fn start_break_handler(
    State(state): State<AppState>,
    payload: Result<Json<BreakRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject_payload(correlation_id, rejection),
    };

    match state.engine().start_break(request.time_record_id) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                record_id = %request.time_record_id,
                outcome = ?result.outcome,
                "Break start processed"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /time/breaks/end.
async fn end_break_handler(
    State(state): State<AppState>,
    payload: Result<Json<BreakRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject_payload(correlation_id, rejection),
    };

    match state.engine().end_break(request.time_record_id) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                record_id = %request.time_record_id,
                outcome = ?result.outcome,
                "Break end processed"
            );
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for POST /time/absences.
async fn mark_absent_handler(
    State(state): State<AppState>,
    payload: Result<Json<MarkAbsentRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return reject_payload(correlation_id, rejection),
    };

    match state
        .engine()
        .mark_absent(&request.employee_id, request.date)
    {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %request.employee_id,
                date = %request.date,
                "Absence recorded"
            );
            (StatusCode::CREATED, Json(record)).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for DELETE /time/records/:id.
async fn delete_record_handler(
    State(state): State<AppState>,
    Path(record_id): Path<Uuid>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.engine().delete_record(record_id) {
        Ok(record) => {
            info!(
                correlation_id = %correlation_id,
                record_id = %record_id,
                "Time record deleted"
            );
            (StatusCode::OK, Json(record)).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /reports/payroll.
async fn payroll_handler(
    State(state): State<AppState>,
    Query(query): Query<PayrollQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let result = match (query.from, query.to, query.month, query.year) {
        (Some(from), Some(to), _, _) => {
            state.engine().payroll_for_range(&query.employee_id, from, to)
        }
        (None, None, Some(month), Some(year)) => {
            state.engine().monthly_payroll(&query.employee_id, month, year)
        }
        _ => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiError::validation_error(
                    "provide either month and year or from and to",
                )),
            )
                .into_response();
        }
    };

    match result {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %query.employee_id,
                total_pay = %summary.total_pay,
                "Payroll report generated"
            );
            (StatusCode::OK, Json(summary)).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /reports/attendance.
async fn attendance_handler(
    State(state): State<AppState>,
    Query(query): Query<AttendanceQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state
        .engine()
        .attendance(&query.employee_id, query.from, query.to)
    {
        Ok(summary) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %query.employee_id,
                attendance_rate = %summary.attendance_rate,
                "Attendance report generated"
            );
            (StatusCode::OK, Json(summary)).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}

/// Handler for GET /reports/departments.
async fn departments_handler(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    match state.engine().department_report(query.from, query.to) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                departments = report.len(),
                "Department report generated"
            );
            (StatusCode::OK, Json(report)).into_response()
        }
        Err(err) => engine_error(correlation_id, err),
    }
}
