//! Integration tests for the timekeeping engine and its HTTP API.
//!
//! This test suite covers the full clock-in/break/clock-out lifecycle,
//! the idempotency and uniqueness guarantees, and the payroll,
//! attendance, and department reports, driving the axum router the way
//! the CRUD collaborators would.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use dtr_engine::api::{AppState, create_router};
use dtr_engine::clock::ManualClock;
use dtr_engine::config::PayPolicy;
use dtr_engine::engine::TimeClock;

// =============================================================================
// Test Helpers
// =============================================================================

fn morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 7, 25, 9, 0, 0).unwrap()
}

/// Engine, clock, and router wired to the same state.
struct Harness {
    engine: Arc<TimeClock>,
    clock: Arc<ManualClock>,
}

impl Harness {
    fn new() -> Self {
        let clock = Arc::new(ManualClock::new(morning()));
        let engine = Arc::new(TimeClock::with_clock(PayPolicy::default(), clock.clone()));
        Self { engine, clock }
    }

    fn router(&self) -> Router {
        create_router(AppState::from_shared(self.engine.clone()))
    }
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

async fn post_json(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

async fn register_employee(harness: &Harness, id: &str, department: Option<&str>, rate: &str) {
    let (status, _) = post_json(
        harness.router(),
        "/employees",
        json!({
            "id": id,
            "name": format!("Employee {}", id),
            "department": department,
            "hourly_rate": rate,
            "status": "active"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn clock_in(harness: &Harness, employee_id: &str) -> Value {
    let (status, body) = post_json(
        harness.router(),
        "/time/clock-in",
        json!({"employee_id": employee_id}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "clock-in failed: {}", body);
    body
}

async fn clock_out(harness: &Harness, record_id: &str, note: Option<&str>) -> Value {
    let (status, body) = post_json(
        harness.router(),
        "/time/clock-out",
        json!({"time_record_id": record_id, "note": note}),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "clock-out failed: {}", body);
    body
}

fn record_id(clock_in_body: &Value) -> String {
    clock_in_body["record"]["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Lifecycle through the API
// =============================================================================

#[tokio::test]
async fn test_clock_in_creates_active_record() {
    let harness = Harness::new();
    register_employee(&harness, "emp_001", None, "25.00").await;

    let body = clock_in(&harness, "emp_001").await;

    assert_eq!(body["outcome"], "created");
    assert_eq!(body["record"]["status"], "active");
    assert_eq!(body["record"]["employee_id"], "emp_001");
    assert_eq!(body["record"]["date"], "2025-07-25");
    // Open records carry no materialized hours.
    assert!(body["record"]["total_hours"].is_null());
}

#[tokio::test]
async fn test_full_day_with_note() {
    let harness = Harness::new();
    register_employee(&harness, "emp_001", None, "25.00").await;

    let body = clock_in(&harness, "emp_001").await;
    let id = record_id(&body);

    harness.clock.advance(Duration::hours(8));
    let body = clock_out(&harness, &id, Some("end of shift")).await;

    assert_eq!(body["outcome"], "completed");
    assert_eq!(body["record"]["status"], "completed");
    assert_eq!(body["record"]["total_hours"], "8.00");
    assert_eq!(body["record"]["overtime_hours"], "0.00");
    assert_eq!(body["record"]["notes"], "end of shift");
}

#[tokio::test]
async fn test_day_with_break_subtracts_break_time() {
    let harness = Harness::new();
    register_employee(&harness, "emp_001", None, "25.00").await;

    let body = clock_in(&harness, "emp_001").await;
    let id = record_id(&body);

    harness.clock.advance(Duration::hours(3));
    let (status, body) = post_json(
        harness.router(),
        "/time/breaks/start",
        json!({"time_record_id": id}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "started");
    assert_eq!(body["session"]["status"], "active");

    harness.clock.advance(Duration::minutes(30));
    let (status, body) = post_json(
        harness.router(),
        "/time/breaks/end",
        json!({"time_record_id": id}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "ended");
    assert_eq!(body["session"]["total_break_time"], "0.50");

    harness.clock.advance(Duration::hours(4) + Duration::minutes(30));
    let body = clock_out(&harness, &id, None).await;

    assert_eq!(body["record"]["total_hours"], "7.50");
}

#[tokio::test]
async fn test_overtime_split_at_clock_out() {
    let harness = Harness::new();
    register_employee(&harness, "emp_001", None, "25.00").await;

    let body = clock_in(&harness, "emp_001").await;
    let id = record_id(&body);

    harness.clock.advance(Duration::hours(10));
    let body = clock_out(&harness, &id, None).await;

    assert_eq!(body["record"]["total_hours"], "10.00");
    assert_eq!(body["record"]["overtime_hours"], "2.00");
}

#[tokio::test]
async fn test_double_clock_in_is_idempotent() {
    let harness = Harness::new();
    register_employee(&harness, "emp_001", None, "25.00").await;

    let first = clock_in(&harness, "emp_001").await;
    harness.clock.advance(Duration::minutes(10));
    let second = clock_in(&harness, "emp_001").await;

    assert_eq!(second["outcome"], "already_active");
    assert_eq!(second["record"]["id"], first["record"]["id"]);
    // The clock-in instant is not reset by the second call.
    assert_eq!(second["record"]["clock_in"], first["record"]["clock_in"]);
}

#[tokio::test]
async fn test_clock_out_force_closes_open_break() {
    let harness = Harness::new();
    register_employee(&harness, "emp_001", None, "25.00").await;

    let body = clock_in(&harness, "emp_001").await;
    let id = record_id(&body);
    let record_uuid = uuid::Uuid::parse_str(&id).unwrap();

    harness.clock.advance(Duration::hours(3)); // 12:00
    post_json(
        harness.router(),
        "/time/breaks/start",
        json!({"time_record_id": id}),
    )
    .await;

    harness.clock.advance(Duration::hours(5)); // 17:00, break never ended
    let body = clock_out(&harness, &id, None).await;

    // 8h on the clock minus the 5h break closed at the clock-out instant.
    assert_eq!(body["record"]["total_hours"], "3.00");

    let breaks = harness.engine.breaks_for(record_uuid).unwrap();
    assert_eq!(breaks.len(), 1);
    assert!(!breaks[0].is_active());
    assert_eq!(breaks[0].total_break_time(), Some(decimal("5.00")));
}

#[tokio::test]
async fn test_reopen_clears_notes_and_hours() {
    let harness = Harness::new();
    register_employee(&harness, "emp_001", None, "25.00").await;

    let body = clock_in(&harness, "emp_001").await;
    let id = record_id(&body);

    harness.clock.advance(Duration::hours(10));
    clock_out(&harness, &id, Some("first shift")).await;

    harness.clock.advance(Duration::hours(1));
    let (status, body) = post_json(
        harness.router(),
        "/time/clock-in",
        json!({"employee_id": "emp_001", "date": "2025-07-25"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(body["outcome"], "reopened");
    assert_eq!(body["record"]["id"].as_str().unwrap(), id);
    assert!(body["record"]["notes"].is_null());
    assert!(body["record"]["total_hours"].is_null());
    assert!(body["record"]["overtime_hours"].is_null());
    assert_eq!(body["record"]["status"], "active");
}

#[tokio::test]
async fn test_clock_out_when_not_active_is_noop() {
    let harness = Harness::new();
    register_employee(&harness, "emp_001", None, "25.00").await;

    let body = clock_in(&harness, "emp_001").await;
    let id = record_id(&body);

    harness.clock.advance(Duration::hours(8));
    clock_out(&harness, &id, None).await;

    let body = clock_out(&harness, &id, Some("again")).await;
    assert_eq!(body["outcome"], "not_active");
    assert_eq!(body["record"]["total_hours"], "8.00");
    assert!(body["record"]["notes"].is_null());
}

#[tokio::test]
async fn test_second_break_start_returns_existing_session() {
    let harness = Harness::new();
    register_employee(&harness, "emp_001", None, "25.00").await;

    let body = clock_in(&harness, "emp_001").await;
    let id = record_id(&body);

    harness.clock.advance(Duration::hours(2));
    let (_, first) = post_json(
        harness.router(),
        "/time/breaks/start",
        json!({"time_record_id": id}),
    )
    .await;
    let (_, second) = post_json(
        harness.router(),
        "/time/breaks/start",
        json!({"time_record_id": id}),
    )
    .await;

    assert_eq!(second["outcome"], "already_on_break");
    assert_eq!(second["session"]["id"], first["session"]["id"]);
}

#[tokio::test]
async fn test_break_end_without_open_break_is_noop() {
    let harness = Harness::new();
    register_employee(&harness, "emp_001", None, "25.00").await;

    let body = clock_in(&harness, "emp_001").await;
    let id = record_id(&body);

    let (status, body) = post_json(
        harness.router(),
        "/time/breaks/end",
        json!({"time_record_id": id}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["outcome"], "no_active_break");
    assert!(body["session"].is_null());
}

// =============================================================================
// Absences and deletion
// =============================================================================

#[tokio::test]
async fn test_mark_absent_and_duplicate_conflict() {
    let harness = Harness::new();
    register_employee(&harness, "emp_001", None, "25.00").await;

    let (status, body) = post_json(
        harness.router(),
        "/time/absences",
        json!({"employee_id": "emp_001", "date": "2025-07-28"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "absent");

    let (status, body) = post_json(
        harness.router(),
        "/time/absences",
        json!({"employee_id": "emp_001", "date": "2025-07-28"}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_RECORD");
}

#[tokio::test]
async fn test_delete_record_frees_the_day() {
    let harness = Harness::new();
    register_employee(&harness, "emp_001", None, "25.00").await;

    let body = clock_in(&harness, "emp_001").await;
    let id = record_id(&body);

    let response = harness
        .router()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/time/records/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The day can be clocked in again from scratch.
    let body = clock_in(&harness, "emp_001").await;
    assert_eq!(body["outcome"], "created");
    assert_ne!(record_id(&body), id);
}

// =============================================================================
// Error responses
// =============================================================================

#[tokio::test]
async fn test_clock_in_unknown_employee_is_404() {
    let harness = Harness::new();

    let (status, body) = post_json(
        harness.router(),
        "/time/clock-in",
        json!({"employee_id": "emp_999"}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EMPLOYEE_NOT_FOUND");
}

#[tokio::test]
async fn test_clock_out_unknown_record_is_404() {
    let harness = Harness::new();

    let (status, body) = post_json(
        harness.router(),
        "/time/clock-out",
        json!({"time_record_id": "6f7c0f9e-4f76-4e7a-a6f5-0e6d36a5d1b4"}),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RECORD_NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let harness = Harness::new();

    let response = harness
        .router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/time/clock-in")
                .header("Content-Type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(body["code"], "MALFORMED_JSON");
}

#[tokio::test]
async fn test_missing_field_is_validation_error() {
    let harness = Harness::new();

    let (status, body) = post_json(harness.router(), "/time/clock-in", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Reports
// =============================================================================

#[tokio::test]
async fn test_monthly_payroll_report() {
    let harness = Harness::new();
    register_employee(&harness, "emp_001", None, "25.00").await;

    // Day 1: 10 hours (2 overtime).
    let body = clock_in(&harness, "emp_001").await;
    let id = record_id(&body);
    harness.clock.advance(Duration::hours(10));
    clock_out(&harness, &id, None).await;

    // Day 2: 8.5 hours (0.5 overtime).
    harness
        .clock
        .set(Utc.with_ymd_and_hms(2025, 7, 26, 9, 0, 0).unwrap());
    let body = clock_in(&harness, "emp_001").await;
    let id = record_id(&body);
    harness
        .clock
        .advance(Duration::hours(8) + Duration::minutes(30));
    clock_out(&harness, &id, None).await;

    let (status, body) = get_json(
        harness.router(),
        "/reports/payroll?employee_id=emp_001&month=7&year=2025",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_hours"], "18.50");
    assert_eq!(body["overtime_hours"], "2.50");
    assert_eq!(body["regular_hours"], "16.00");
    assert_eq!(body["regular_pay"], "400.00");
    assert_eq!(body["overtime_pay"], "93.75");
    assert_eq!(body["total_pay"], "493.75");
}

#[tokio::test]
async fn test_payroll_report_explicit_range() {
    let harness = Harness::new();
    register_employee(&harness, "emp_001", None, "20.00").await;

    let body = clock_in(&harness, "emp_001").await;
    let id = record_id(&body);
    harness.clock.advance(Duration::hours(8));
    clock_out(&harness, &id, None).await;

    let (status, body) = get_json(
        harness.router(),
        "/reports/payroll?employee_id=emp_001&from=2025-07-25&to=2025-07-25",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_hours"], "8.00");
    assert_eq!(body["total_pay"], "160.00");
}

#[tokio::test]
async fn test_payroll_report_requires_month_or_range() {
    let harness = Harness::new();
    register_employee(&harness, "emp_001", None, "20.00").await;

    let (status, body) = get_json(
        harness.router(),
        "/reports/payroll?employee_id=emp_001&month=7",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_attendance_report_five_of_seven_days() {
    let harness = Harness::new();
    register_employee(&harness, "emp_001", None, "25.00").await;

    for day in 21..=25 {
        harness
            .clock
            .set(Utc.with_ymd_and_hms(2025, 7, day, 9, 0, 0).unwrap());
        let body = clock_in(&harness, "emp_001").await;
        let id = record_id(&body);
        harness.clock.advance(Duration::hours(8));
        clock_out(&harness, &id, None).await;
    }

    let (status, body) = get_json(
        harness.router(),
        "/reports/attendance?employee_id=emp_001&from=2025-07-21&to=2025-07-27",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_days"], 7);
    assert_eq!(body["days_worked"], 5);
    assert_eq!(body["days_absent"], 2);
    assert_eq!(body["attendance_rate"], "71.43");
    assert_eq!(body["total_hours"], "40.00");
    assert_eq!(body["average_hours_per_day"], "8.00");
}

#[tokio::test]
async fn test_department_report_groups_employees() {
    let harness = Harness::new();
    register_employee(&harness, "emp_001", Some("Engineering"), "25.00").await;
    register_employee(&harness, "emp_002", Some("Engineering"), "20.00").await;
    register_employee(&harness, "emp_003", Some("Support"), "15.00").await;

    for id in ["emp_001", "emp_002", "emp_003"] {
        harness.clock.set(morning());
        let body = clock_in(&harness, id).await;
        let record = record_id(&body);
        harness.clock.advance(Duration::hours(8));
        clock_out(&harness, &record, None).await;
    }

    let (status, body) = get_json(
        harness.router(),
        "/reports/departments?from=2025-07-01&to=2025-07-31",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0]["department"], "Engineering");
    assert_eq!(rows[0]["employee_count"], 2);
    assert_eq!(rows[0]["total_hours"], "16.00");
    assert_eq!(rows[0]["total_pay"], "360.00");

    assert_eq!(rows[1]["department"], "Support");
    assert_eq!(rows[1]["total_pay"], "120.00");
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_concurrent_clock_ins_create_one_record() {
    let clock = Arc::new(ManualClock::new(morning()));
    let engine = Arc::new(TimeClock::with_clock(PayPolicy::default(), clock));
    engine.register_employee(dtr_engine::models::Employee {
        id: "emp_001".to_string(),
        name: "Dana Cruz".to_string(),
        department: None,
        hourly_rate: decimal("25.00"),
        status: dtr_engine::models::EmployeeStatus::Active,
        timezone: None,
    });

    let handles: Vec<_> = (0..32)
        .map(|_| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || engine.clock_in("emp_001", None).unwrap().record.id)
        })
        .collect();

    let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(ids.windows(2).all(|w| w[0] == w[1]));

    // Exactly one record exists for the day afterward.
    let record = engine.record_for("emp_001", morning().date_naive()).unwrap();
    assert_eq!(record.id, ids[0]);
}
