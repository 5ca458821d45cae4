//! Attendance aggregation.
//!
//! Read-only derivation of attendance figures from time records. A day
//! counts as worked when it has a non-absent record; administrative
//! absence markers land on the absent side of the rate.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AttendanceSummary, TimeRecord};

use super::round2;

const HUNDRED: Decimal = Decimal::from_parts(100, 0, 0, false, 0);

/// Aggregates time records into an attendance summary for one employee.
///
/// `attendance_rate = days_worked / total_calendar_days × 100`, rounded to
/// 2 decimals; `days_absent` covers both marked absences and days with no
/// record at all.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInterval`] when `to` is earlier than
/// `from`.
///
/// # Examples
///
/// ```
/// use dtr_engine::calculation::summarize_attendance;
/// use chrono::NaiveDate;
///
/// let summary = summarize_attendance(
///     "emp_001",
///     &[],
///     NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 7, 7).unwrap(),
/// ).unwrap();
/// assert_eq!(summary.total_days, 7);
/// assert_eq!(summary.days_absent, 7);
/// ```
pub fn summarize_attendance(
    employee_id: &str,
    records: &[TimeRecord],
    from: NaiveDate,
    to: NaiveDate,
) -> EngineResult<AttendanceSummary> {
    if to < from {
        return Err(EngineError::InvalidInterval {
            message: format!("range end {} is before range start {}", to, from),
        });
    }

    let total_days = (to - from).num_days() + 1;

    let in_range: Vec<&TimeRecord> = records
        .iter()
        .filter(|r| r.employee_id == employee_id && r.date >= from && r.date <= to)
        .collect();

    let days_worked = in_range.iter().filter(|r| !r.is_absent()).count() as i64;
    let total_hours: Decimal = in_range
        .iter()
        .filter_map(|r| r.total_hours())
        .sum();

    let attendance_rate = round2(Decimal::from(days_worked) / Decimal::from(total_days) * HUNDRED);
    let average_hours_per_day = if days_worked > 0 {
        round2(total_hours / Decimal::from(days_worked))
    } else {
        Decimal::ZERO
    };

    Ok(AttendanceSummary {
        employee_id: employee_id.to_string(),
        from,
        to,
        total_days,
        days_worked,
        days_absent: total_days - days_worked,
        attendance_rate,
        total_hours,
        average_hours_per_day,
    })
}
