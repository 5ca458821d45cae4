//! Payroll aggregation.
//!
//! Sums finalized time records over a calendar month or arbitrary date
//! range and prices the hours. Per-day overtime is summed as stored at
//! clock-out; it is never recomputed from the period total, so each day's
//! overtime stays independently capped at the daily threshold.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{PayrollSummary, TimeRecord};

use super::round2;

/// Returns the inclusive `[first, last]` day range of a calendar month.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInterval`] when `month` is not 1–12.
///
/// # Examples
///
/// ```
/// use dtr_engine::calculation::month_range;
/// use chrono::NaiveDate;
///
/// let (from, to) = month_range(7, 2025).unwrap();
/// assert_eq!(from, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
/// assert_eq!(to, NaiveDate::from_ymd_opt(2025, 7, 31).unwrap());
/// ```
pub fn month_range(month: u32, year: i32) -> EngineResult<(NaiveDate, NaiveDate)> {
    let from = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        EngineError::InvalidInterval {
            message: format!("{}-{:02} is not a calendar month", year, month),
        }
    })?;

    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let to = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| EngineError::InvalidInterval {
            message: format!("{}-{:02} is not a calendar month", year, month),
        })?;

    Ok((from, to))
}

/// Aggregates time records into a payroll summary for one employee.
///
/// Only records whose `date` falls in `[from, to]` contribute, and only
/// completed records carry hours; open and absent records contribute
/// nothing. Hours are summed first and multiplied by the rate once, with
/// each money value rounded to 2 decimals at the end.
///
/// # Examples
///
/// ```
/// use dtr_engine::calculation::summarize_payroll;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let summary = summarize_payroll(
///     "emp_001",
///     Decimal::from_str("25.00").unwrap(),
///     &[],
///     NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 7, 31).unwrap(),
///     Decimal::from_str("1.5").unwrap(),
/// );
/// assert_eq!(summary.total_pay, Decimal::ZERO);
/// ```
pub fn summarize_payroll(
    employee_id: &str,
    hourly_rate: Decimal,
    records: &[TimeRecord],
    from: NaiveDate,
    to: NaiveDate,
    overtime_multiplier: Decimal,
) -> PayrollSummary {
    let in_range = records
        .iter()
        .filter(|r| r.employee_id == employee_id && r.date >= from && r.date <= to);

    let mut total_hours = Decimal::ZERO;
    let mut overtime_hours = Decimal::ZERO;
    for record in in_range {
        total_hours += record.total_hours().unwrap_or(Decimal::ZERO);
        overtime_hours += record.overtime_hours().unwrap_or(Decimal::ZERO);
    }

    let regular_hours = total_hours - overtime_hours;
    let regular_pay = round2(regular_hours * hourly_rate);
    let overtime_pay = round2(overtime_hours * hourly_rate * overtime_multiplier);

    PayrollSummary {
        employee_id: employee_id.to_string(),
        from,
        to,
        hourly_rate,
        total_hours,
        regular_hours,
        overtime_hours,
        regular_pay,
        overtime_pay,
        total_pay: regular_pay + overtime_pay,
    }
}
