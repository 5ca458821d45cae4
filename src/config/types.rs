//! Configuration types for the pay policy.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML policy file.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::DAILY_OVERTIME_THRESHOLD;

/// Overtime pay multiplier applied by default (time and a half).
const DEFAULT_OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);

/// How the engine treats operations attempted from a state that does not
/// permit them (double clock-in, clock-out when not clocked in, break-end
/// without an open break, break-start on a non-active record).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Invalid transitions are logged no-ops reported through outcome
    /// enums. Matches the historical behavior of the system this engine
    /// replaces.
    #[default]
    Lenient,
    /// Invalid transitions are `InvalidTransition` errors.
    Strict,
}

/// The pay policy governing hour and pay computation.
///
/// # Example
///
/// ```
/// use dtr_engine::config::{PayPolicy, TransitionPolicy};
/// use rust_decimal::Decimal;
///
/// let policy = PayPolicy::default();
/// assert_eq!(policy.daily_overtime_threshold, Decimal::from(8));
/// assert_eq!(policy.transition_policy, TransitionPolicy::Lenient);
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PayPolicy {
    /// Hours per day before overtime starts.
    #[serde(default = "default_threshold")]
    pub daily_overtime_threshold: Decimal,
    /// Multiplier applied to the hourly rate for overtime hours.
    #[serde(default = "default_multiplier")]
    pub overtime_multiplier: Decimal,
    /// Whether invalid transitions are no-ops or errors.
    #[serde(default)]
    pub transition_policy: TransitionPolicy,
}

fn default_threshold() -> Decimal {
    DAILY_OVERTIME_THRESHOLD
}

fn default_multiplier() -> Decimal {
    DEFAULT_OVERTIME_MULTIPLIER
}

impl Default for PayPolicy {
    fn default() -> Self {
        Self {
            daily_overtime_threshold: default_threshold(),
            overtime_multiplier: default_multiplier(),
            transition_policy: TransitionPolicy::default(),
        }
    }
}

impl PayPolicy {
    /// Returns a copy of the policy with the strict transition policy.
    pub fn strict(mut self) -> Self {
        self.transition_policy = TransitionPolicy::Strict;
        self
    }
}
