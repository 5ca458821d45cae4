//! Calculation logic for the timekeeping engine.
//!
//! This module contains the pure functions for converting clock pairs and
//! break intervals into worked hours, splitting daily overtime, and
//! aggregating time records into payroll and attendance summaries.

mod attendance;
mod overtime;
mod payroll;
mod worked_hours;

use rust_decimal::{Decimal, RoundingStrategy};

pub use attendance::summarize_attendance;
pub use overtime::{DAILY_OVERTIME_THRESHOLD, OvertimeSplit, split_daily_overtime};
pub use payroll::{month_range, summarize_payroll};
pub use worked_hours::{completed_break_hours, elapsed_hours, worked_hours};

/// Rounds to exactly 2 decimal places, midpoint away from zero.
///
/// All hour and money values are rounded this way at the point of storage
/// or display, never mid-calculation. The scale is pinned to 2 so stored
/// values serialize uniformly ("8.00", not "8").
pub(crate) fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
