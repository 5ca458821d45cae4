//! Break session model.
//!
//! A [`BreakSession`] is one contiguous break interval within a time
//! record. A record has at most one session in the `Active` state at a
//! time; the engine returns the existing open session when a second start
//! arrives.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The lifecycle state of a break session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BreakState {
    /// Break in progress.
    Active {
        /// When the break started.
        break_start: DateTime<Utc>,
    },
    /// Break finished; duration is finalized.
    Completed {
        /// When the break started.
        break_start: DateTime<Utc>,
        /// When the break ended.
        break_end: DateTime<Utc>,
        /// Elapsed break time in hours, 2-decimal precision.
        total_break_time: Decimal,
    },
}

/// One contiguous break interval within a time record.
///
/// Owned exclusively by its parent record; deleting the record deletes its
/// sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakSession {
    /// Unique identifier for the session.
    pub id: Uuid,
    /// The time record this session belongs to.
    pub time_record_id: Uuid,
    /// The lifecycle state.
    #[serde(flatten)]
    pub state: BreakState,
}

impl BreakSession {
    /// Returns true while the break is in progress.
    pub fn is_active(&self) -> bool {
        matches!(self.state, BreakState::Active { .. })
    }

    /// Returns the finalized break duration in hours.
    ///
    /// `None` while the break is open; an open break contributes nothing
    /// to a record's break total until it closes.
    pub fn total_break_time(&self) -> Option<Decimal> {
        match self.state {
            BreakState::Completed {
                total_break_time, ..
            } => Some(total_break_time),
            BreakState::Active { .. } => None,
        }
    }
}
