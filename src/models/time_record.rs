//! Daily time record model.
//!
//! A [`TimeRecord`] is one calendar day's attendance record for one
//! employee. Its lifecycle is encoded in [`RecordState`], a tagged enum, so
//! the impossible combinations of the nullable-column encoding (a completed
//! record without a clock-out, an open record with materialized hours) are
//! unrepresentable.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The lifecycle state of a time record.
///
/// Serialized with a `status` tag so the wire shape matches the
/// `active`/`completed`/`absent` status column of the persisted table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordState {
    /// Clocked in and not yet clocked out.
    Active {
        /// When the employee clocked in.
        clock_in: DateTime<Utc>,
    },
    /// Clocked out; hours are finalized.
    Completed {
        /// When the employee clocked in.
        clock_in: DateTime<Utc>,
        /// When the employee clocked out.
        clock_out: DateTime<Utc>,
        /// Worked hours net of completed breaks, 2-decimal precision.
        total_hours: Decimal,
        /// Hours beyond the daily threshold, 2-decimal precision.
        overtime_hours: Decimal,
    },
    /// No work occurred; recorded administratively.
    Absent,
}

impl RecordState {
    /// Returns the status label used by reports and the wire format.
    pub fn label(&self) -> &'static str {
        match self {
            RecordState::Active { .. } => "active",
            RecordState::Completed { .. } => "completed",
            RecordState::Absent => "absent",
        }
    }
}

/// One calendar day's attendance record for one employee.
///
/// At most one record exists per `(employee_id, date)` pair; the store
/// enforces this at creation.
///
/// # Example
///
/// ```
/// use dtr_engine::models::{RecordState, TimeRecord};
/// use chrono::{NaiveDate, TimeZone, Utc};
/// use uuid::Uuid;
///
/// let record = TimeRecord {
///     id: Uuid::new_v4(),
///     employee_id: "emp_001".to_string(),
///     date: NaiveDate::from_ymd_opt(2025, 7, 25).unwrap(),
///     state: RecordState::Active {
///         clock_in: Utc.with_ymd_and_hms(2025, 7, 25, 9, 0, 0).unwrap(),
///     },
///     notes: None,
/// };
/// assert!(record.is_active());
/// assert_eq!(record.total_hours(), None); // open, not zero
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The employee this record belongs to.
    pub employee_id: String,
    /// The calendar date the record covers.
    pub date: NaiveDate,
    /// The lifecycle state.
    #[serde(flatten)]
    pub state: RecordState,
    /// Free-text note captured at clock-out.
    #[serde(default)]
    pub notes: Option<String>,
}

impl TimeRecord {
    /// Returns true if the employee is currently clocked in.
    pub fn is_active(&self) -> bool {
        matches!(self.state, RecordState::Active { .. })
    }

    /// Returns true if the record is an administrative absence.
    pub fn is_absent(&self) -> bool {
        matches!(self.state, RecordState::Absent)
    }

    /// Returns the clock-in instant, if the employee has clocked in.
    pub fn clock_in_time(&self) -> Option<DateTime<Utc>> {
        match self.state {
            RecordState::Active { clock_in } => Some(clock_in),
            RecordState::Completed { clock_in, .. } => Some(clock_in),
            RecordState::Absent => None,
        }
    }

    /// Returns the clock-out instant, if the record is completed.
    pub fn clock_out_time(&self) -> Option<DateTime<Utc>> {
        match self.state {
            RecordState::Completed { clock_out, .. } => Some(clock_out),
            _ => None,
        }
    }

    /// Returns the finalized worked hours.
    ///
    /// `None` while the record is open or absent. An open record is a
    /// distinct state, never zero hours.
    pub fn total_hours(&self) -> Option<Decimal> {
        match self.state {
            RecordState::Completed { total_hours, .. } => Some(total_hours),
            _ => None,
        }
    }

    /// Returns the finalized overtime hours.
    pub fn overtime_hours(&self) -> Option<Decimal> {
        match self.state {
            RecordState::Completed { overtime_hours, .. } => Some(overtime_hours),
            _ => None,
        }
    }
}
