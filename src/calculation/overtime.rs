//! Daily overtime split.
//!
//! Splits a day's worked hours into regular and overtime portions at a
//! fixed daily threshold. The split happens once, at clock-out; period
//! aggregation sums the stored per-day values and never recomputes
//! overtime from a period total.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default daily overtime threshold in hours.
///
/// A regular work day is 8 hours; anything beyond that in a single day is
/// overtime.
pub const DAILY_OVERTIME_THRESHOLD: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// The split of one day's worked hours into regular and overtime portions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSplit {
    /// Hours up to the daily threshold.
    pub regular_hours: Decimal,
    /// Hours beyond the daily threshold (zero when under it).
    pub overtime_hours: Decimal,
}

/// Splits worked hours at the daily overtime threshold.
///
/// `overtime = max(0, worked − threshold)`; regular hours are capped at
/// the threshold. Overtime can never be negative or exceed the worked
/// hours.
///
/// # Examples
///
/// ```
/// use dtr_engine::calculation::{DAILY_OVERTIME_THRESHOLD, split_daily_overtime};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let split = split_daily_overtime(
///     Decimal::from_str("10.0").unwrap(),
///     DAILY_OVERTIME_THRESHOLD,
/// );
/// assert_eq!(split.regular_hours, Decimal::from_str("8.0").unwrap());
/// assert_eq!(split.overtime_hours, Decimal::from_str("2.0").unwrap());
/// ```
pub fn split_daily_overtime(worked_hours: Decimal, threshold: Decimal) -> OvertimeSplit {
    let overtime_hours = (worked_hours - threshold).max(Decimal::ZERO);

    OvertimeSplit {
        regular_hours: worked_hours - overtime_hours,
        overtime_hours,
    }
}
