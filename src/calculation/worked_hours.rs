//! Time interval arithmetic.
//!
//! Pure functions converting a clock-in/clock-out pair and a set of
//! completed break intervals into worked hours. Callers must treat an open
//! record as a distinct state: these functions are only invoked once a
//! clock-out instant exists.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::BreakSession;

use super::round2;

const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Computes the worked hours for a closed clock pair.
///
/// `worked = max(0, round2(minutes(clock_out − clock_in) / 60 − break_hours))`.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInterval`] when `clock_out` is earlier
/// than `clock_in`; the caller must reject the write and keep prior state.
///
/// # Examples
///
/// ```
/// use dtr_engine::calculation::worked_hours;
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let clock_in = Utc.with_ymd_and_hms(2025, 7, 25, 9, 0, 0).unwrap();
/// let clock_out = Utc.with_ymd_and_hms(2025, 7, 25, 17, 0, 0).unwrap();
///
/// let hours = worked_hours(clock_in, clock_out, Decimal::ZERO).unwrap();
/// assert_eq!(hours, Decimal::from_str("8.00").unwrap());
///
/// let half_hour_break = Decimal::from_str("0.50").unwrap();
/// let hours = worked_hours(clock_in, clock_out, half_hour_break).unwrap();
/// assert_eq!(hours, Decimal::from_str("7.50").unwrap());
/// ```
pub fn worked_hours(
    clock_in: DateTime<Utc>,
    clock_out: DateTime<Utc>,
    break_hours: Decimal,
) -> EngineResult<Decimal> {
    if clock_out < clock_in {
        return Err(EngineError::InvalidInterval {
            message: format!("clock_out {} is before clock_in {}", clock_out, clock_in),
        });
    }

    let minutes = (clock_out - clock_in).num_minutes();
    let hours = Decimal::from(minutes) / MINUTES_PER_HOUR - break_hours;

    Ok(round2(hours).max(Decimal::ZERO))
}

/// Computes the elapsed hours between two instants, rounded to 2 decimals.
///
/// Used to finalize a break session's duration on close.
///
/// # Errors
///
/// Returns [`EngineError::InvalidInterval`] when `end` is earlier than
/// `start`.
pub fn elapsed_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> EngineResult<Decimal> {
    if end < start {
        return Err(EngineError::InvalidInterval {
            message: format!("end {} is before start {}", end, start),
        });
    }

    let minutes = (end - start).num_minutes();
    Ok(round2(Decimal::from(minutes) / MINUTES_PER_HOUR))
}

/// Sums the finalized durations of the given break sessions.
///
/// Only completed sessions contribute; an open break counts for nothing
/// until it closes. Clocking out while on break therefore force-closes the
/// break first.
pub fn completed_break_hours(sessions: &[BreakSession]) -> Decimal {
    sessions
        .iter()
        .filter_map(BreakSession::total_break_time)
        .sum()
}
