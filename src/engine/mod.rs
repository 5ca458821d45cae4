//! Time record lifecycle engine.
//!
//! [`TimeClock`] drives the daily attendance lifecycle — clock-in,
//! breaks, clock-out — and answers the payroll, attendance, and
//! department report queries derived from the same records. Timestamps
//! come from an injected [`Clock`]; behavior on invalid transitions is
//! governed by the configured [`TransitionPolicy`].
//!
//! Every mutation locks the store's ledger for its whole read-modify-write,
//! so requests for the same employee and date serialize and the
//! one-record-per-day invariant holds under concurrency.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::{
    completed_break_hours, elapsed_hours, round2, split_daily_overtime, summarize_attendance,
    summarize_payroll, worked_hours,
};
use crate::clock::{Clock, SystemClock};
use crate::config::{PayPolicy, TransitionPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceSummary, BreakSession, BreakState, DepartmentSummary, Employee, PayrollSummary,
    RecordState, TimeRecord,
};
use crate::store::MemoryStore;

/// What a clock-in call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockInOutcome {
    /// No record existed for the day; one was created.
    Created,
    /// A completed (or absent) record existed and was restarted for a
    /// new same-day session, clearing its prior notes and hours.
    Reopened,
    /// The employee was already clocked in; nothing changed.
    AlreadyActive,
}

/// What a clock-out call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClockOutOutcome {
    /// The record was closed and its hours finalized.
    Completed,
    /// The record was not active; nothing changed.
    NotActive,
}

/// What a break-start call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakStartOutcome {
    /// A new break session was opened.
    Started,
    /// A break was already open; the existing session is returned.
    AlreadyOnBreak,
    /// The record is not active, so no break can start.
    NotClockedIn,
}

/// What a break-end call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakEndOutcome {
    /// The open break session was closed and its duration finalized.
    Ended,
    /// No break was open; nothing changed.
    NoActiveBreak,
}

/// Result of a clock-in call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockIn {
    /// What the call did.
    pub outcome: ClockInOutcome,
    /// The record for the day after the call.
    pub record: TimeRecord,
}

/// Result of a clock-out call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClockOut {
    /// What the call did.
    pub outcome: ClockOutOutcome,
    /// The record after the call.
    pub record: TimeRecord,
}

/// Result of a break-start call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakStart {
    /// What the call did.
    pub outcome: BreakStartOutcome,
    /// The open session, when one exists after the call.
    pub session: Option<BreakSession>,
}

/// Result of a break-end call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakEnd {
    /// What the call did.
    pub outcome: BreakEndOutcome,
    /// The closed session, when the call closed one.
    pub session: Option<BreakSession>,
}

/// The timekeeping engine.
///
/// # Example
///
/// ```
/// use dtr_engine::clock::ManualClock;
/// use dtr_engine::config::PayPolicy;
/// use dtr_engine::engine::TimeClock;
/// use dtr_engine::models::{Employee, EmployeeStatus};
/// use chrono::{Duration, TimeZone, Utc};
/// use rust_decimal::Decimal;
/// use std::sync::Arc;
///
/// let clock = Arc::new(ManualClock::new(
///     Utc.with_ymd_and_hms(2025, 7, 25, 9, 0, 0).unwrap(),
/// ));
/// let engine = TimeClock::with_clock(PayPolicy::default(), clock.clone());
/// engine.register_employee(Employee {
///     id: "emp_001".to_string(),
///     name: "Dana Cruz".to_string(),
///     department: None,
///     hourly_rate: Decimal::new(2500, 2),
///     status: EmployeeStatus::Active,
///     timezone: None,
/// });
///
/// let clock_in = engine.clock_in("emp_001", None).unwrap();
/// clock.advance(Duration::hours(8));
/// let clock_out = engine.clock_out(clock_in.record.id, None).unwrap();
/// assert_eq!(clock_out.record.total_hours().unwrap(), Decimal::new(800, 2));
/// ```
pub struct TimeClock {
    store: MemoryStore,
    clock: Arc<dyn Clock>,
    policy: PayPolicy,
}

impl TimeClock {
    /// Creates an engine reading the system clock.
    pub fn new(policy: PayPolicy) -> Self {
        Self::with_clock(policy, Arc::new(SystemClock))
    }

    /// Creates an engine with an injected clock.
    pub fn with_clock(policy: PayPolicy, clock: Arc<dyn Clock>) -> Self {
        Self {
            store: MemoryStore::new(),
            clock,
            policy,
        }
    }

    /// Returns the policy the engine runs under.
    pub fn policy(&self) -> &PayPolicy {
        &self.policy
    }

    fn strict(&self) -> bool {
        self.policy.transition_policy == TransitionPolicy::Strict
    }

    /// Inserts or replaces an employee in the engine's read model.
    pub fn register_employee(&self, employee: Employee) {
        info!(employee_id = %employee.id, "Registering employee");
        self.store.lock().upsert_employee(employee);
    }

    /// Looks up a registered employee.
    pub fn employee(&self, id: &str) -> EngineResult<Employee> {
        self.store
            .lock()
            .employee(id)
            .cloned()
            .ok_or_else(|| EngineError::EmployeeNotFound { id: id.to_string() })
    }

    /// Clocks an employee in for a day.
    ///
    /// `date` defaults to the clock's current UTC day. Creates the day's
    /// record when none exists; reopens a completed or absent record
    /// (new clock-in instant, notes and hours cleared); and treats a
    /// second clock-in on an active record as an idempotent no-op under
    /// the lenient policy.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmployeeNotFound`] for an unregistered employee;
    /// [`EngineError::InvalidTransition`] for a double clock-in under the
    /// strict policy.
    pub fn clock_in(&self, employee_id: &str, date: Option<NaiveDate>) -> EngineResult<ClockIn> {
        let now = self.clock.now();
        let date = date.unwrap_or_else(|| now.date_naive());
        let mut ledger = self.store.lock();

        if ledger.employee(employee_id).is_none() {
            return Err(EngineError::EmployeeNotFound {
                id: employee_id.to_string(),
            });
        }

        match ledger.record_for_day(employee_id, date).cloned() {
            None => {
                let (record, _) = ledger.get_or_create_record(
                    employee_id,
                    date,
                    RecordState::Active { clock_in: now },
                );
                info!(employee_id, %date, record_id = %record.id, "Clocked in");
                Ok(ClockIn {
                    outcome: ClockInOutcome::Created,
                    record,
                })
            }
            Some(existing) if existing.is_active() => {
                if self.strict() {
                    return Err(EngineError::InvalidTransition {
                        operation: "clock_in".to_string(),
                        message: format!("employee '{}' is already clocked in", employee_id),
                    });
                }
                warn!(employee_id, %date, "Clock-in ignored: already clocked in");
                Ok(ClockIn {
                    outcome: ClockInOutcome::AlreadyActive,
                    record: existing,
                })
            }
            Some(mut existing) => {
                // New shift on the same day: reset, do not append.
                existing.state = RecordState::Active { clock_in: now };
                existing.notes = None;
                ledger.update_record(existing.clone())?;
                info!(employee_id, %date, record_id = %existing.id, "Reopened time record");
                Ok(ClockIn {
                    outcome: ClockInOutcome::Reopened,
                    record: existing,
                })
            }
        }
    }

    /// Clocks a record out, finalizing its hours.
    ///
    /// Any open break is force-closed at the clock-out instant first, so
    /// the break total is final before worked hours are computed. Worked
    /// hours are split at the daily overtime threshold and stored on the
    /// record together with the note.
    ///
    /// # Errors
    ///
    /// [`EngineError::RecordNotFound`] for an unknown record;
    /// [`EngineError::InvalidInterval`] when the clock-out instant is
    /// before the clock-in instant (nothing is written);
    /// [`EngineError::InvalidTransition`] under the strict policy when
    /// the record is not active.
    pub fn clock_out(&self, record_id: Uuid, note: Option<String>) -> EngineResult<ClockOut> {
        let now = self.clock.now();
        let mut ledger = self.store.lock();

        let mut record = ledger
            .record(record_id)
            .cloned()
            .ok_or(EngineError::RecordNotFound { id: record_id })?;

        let clock_in = match &record.state {
            RecordState::Active { clock_in } => *clock_in,
            _ => {
                if self.strict() {
                    return Err(EngineError::InvalidTransition {
                        operation: "clock_out".to_string(),
                        message: format!("record {} is not active", record_id),
                    });
                }
                warn!(%record_id, "Clock-out ignored: record is not active");
                return Ok(ClockOut {
                    outcome: ClockOutOutcome::NotActive,
                    record,
                });
            }
        };

        // Stage every change before writing anything, so a bad interval
        // rejects the whole clock-out and keeps prior state intact.
        let forced_close = match ledger.open_break_for_record(record_id) {
            Some(mut open) => {
                let break_start = match &open.state {
                    BreakState::Active { break_start } => *break_start,
                    BreakState::Completed { .. } => {
                        unreachable!("open break lookup returned a completed session")
                    }
                };
                open.state = BreakState::Completed {
                    break_start,
                    break_end: now,
                    total_break_time: elapsed_hours(break_start, now)?,
                };
                Some(open)
            }
            None => None,
        };

        let mut break_hours = completed_break_hours(&ledger.breaks_for_record(record_id));
        if let Some(closed) = &forced_close {
            break_hours += closed.total_break_time().unwrap_or(Decimal::ZERO);
        }

        let total_hours = worked_hours(clock_in, now, break_hours)?;
        let split = split_daily_overtime(total_hours, self.policy.daily_overtime_threshold);

        if let Some(closed) = forced_close {
            warn!(%record_id, session_id = %closed.id, "Force-closing open break at clock-out");
            ledger.update_break(closed);
        }

        record.state = RecordState::Completed {
            clock_in,
            clock_out: now,
            total_hours,
            overtime_hours: round2(split.overtime_hours),
        };
        record.notes = note;
        ledger.update_record(record.clone())?;

        info!(
            %record_id,
            total_hours = %total_hours,
            overtime_hours = %split.overtime_hours,
            "Clocked out"
        );
        Ok(ClockOut {
            outcome: ClockOutOutcome::Completed,
            record,
        })
    }

    /// Starts a break on an active record.
    ///
    /// Starting a break while one is already open returns the existing
    /// open session unchanged under either policy; that idempotency is
    /// the guard against duplicate starts from concurrent requests.
    ///
    /// # Errors
    ///
    /// [`EngineError::RecordNotFound`] for an unknown record;
    /// [`EngineError::InvalidTransition`] under the strict policy when
    /// the record is not active.
    pub fn start_break(&self, record_id: Uuid) -> EngineResult<BreakStart> {
        let now = self.clock.now();
        let mut ledger = self.store.lock();

        let record = ledger
            .record(record_id)
            .ok_or(EngineError::RecordNotFound { id: record_id })?;

        if !record.is_active() {
            if self.strict() {
                return Err(EngineError::InvalidTransition {
                    operation: "start_break".to_string(),
                    message: format!("record {} is not active", record_id),
                });
            }
            warn!(%record_id, "Break start ignored: record is not active");
            return Ok(BreakStart {
                outcome: BreakStartOutcome::NotClockedIn,
                session: None,
            });
        }

        if let Some(open) = ledger.open_break_for_record(record_id) {
            warn!(%record_id, session_id = %open.id, "Break start ignored: already on break");
            return Ok(BreakStart {
                outcome: BreakStartOutcome::AlreadyOnBreak,
                session: Some(open),
            });
        }

        let session = BreakSession {
            id: Uuid::new_v4(),
            time_record_id: record_id,
            state: BreakState::Active { break_start: now },
        };
        ledger.add_break(session.clone());
        info!(%record_id, session_id = %session.id, "Break started");
        Ok(BreakStart {
            outcome: BreakStartOutcome::Started,
            session: Some(session),
        })
    }

    /// Ends the open break on a record, finalizing its duration.
    ///
    /// # Errors
    ///
    /// [`EngineError::RecordNotFound`] for an unknown record;
    /// [`EngineError::InvalidTransition`] under the strict policy when no
    /// break is open.
    pub fn end_break(&self, record_id: Uuid) -> EngineResult<BreakEnd> {
        let now = self.clock.now();
        let mut ledger = self.store.lock();

        if ledger.record(record_id).is_none() {
            return Err(EngineError::RecordNotFound { id: record_id });
        }

        let Some(mut open) = ledger.open_break_for_record(record_id) else {
            if self.strict() {
                return Err(EngineError::InvalidTransition {
                    operation: "end_break".to_string(),
                    message: format!("record {} has no open break", record_id),
                });
            }
            warn!(%record_id, "Break end ignored: no open break");
            return Ok(BreakEnd {
                outcome: BreakEndOutcome::NoActiveBreak,
                session: None,
            });
        };

        let break_start = match &open.state {
            BreakState::Active { break_start } => *break_start,
            BreakState::Completed { .. } => {
                unreachable!("open break lookup returned a completed session")
            }
        };
        open.state = BreakState::Completed {
            break_start,
            break_end: now,
            total_break_time: elapsed_hours(break_start, now)?,
        };
        ledger.update_break(open.clone());
        info!(%record_id, session_id = %open.id, "Break ended");
        Ok(BreakEnd {
            outcome: BreakEndOutcome::Ended,
            session: Some(open),
        })
    }

    /// Records an administrative absence for a day.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmployeeNotFound`] for an unregistered employee;
    /// [`EngineError::DuplicateRecord`] when the day already has a
    /// record.
    pub fn mark_absent(&self, employee_id: &str, date: NaiveDate) -> EngineResult<TimeRecord> {
        let mut ledger = self.store.lock();

        if ledger.employee(employee_id).is_none() {
            return Err(EngineError::EmployeeNotFound {
                id: employee_id.to_string(),
            });
        }

        let record = TimeRecord {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            date,
            state: RecordState::Absent,
            notes: None,
        };
        ledger.insert_record(record.clone())?;
        info!(employee_id, %date, record_id = %record.id, "Marked absent");
        Ok(record)
    }

    /// Deletes a record and its break sessions.
    ///
    /// # Errors
    ///
    /// [`EngineError::RecordNotFound`] for an unknown record.
    pub fn delete_record(&self, record_id: Uuid) -> EngineResult<TimeRecord> {
        let record = self.store.lock().delete_record(record_id)?;
        info!(%record_id, employee_id = %record.employee_id, "Deleted time record");
        Ok(record)
    }

    /// Returns a record by id.
    pub fn get_record(&self, record_id: Uuid) -> EngineResult<TimeRecord> {
        self.store
            .lock()
            .record(record_id)
            .cloned()
            .ok_or(EngineError::RecordNotFound { id: record_id })
    }

    /// Returns the record for an employee on a date, if one exists.
    pub fn record_for(&self, employee_id: &str, date: NaiveDate) -> Option<TimeRecord> {
        self.store.lock().record_for_day(employee_id, date).cloned()
    }

    /// Returns the break sessions of a record, in creation order.
    pub fn breaks_for(&self, record_id: Uuid) -> EngineResult<Vec<BreakSession>> {
        let ledger = self.store.lock();
        if ledger.record(record_id).is_none() {
            return Err(EngineError::RecordNotFound { id: record_id });
        }
        Ok(ledger.breaks_for_record(record_id))
    }

    /// Computes the payroll summary for a calendar month.
    pub fn monthly_payroll(
        &self,
        employee_id: &str,
        month: u32,
        year: i32,
    ) -> EngineResult<PayrollSummary> {
        let (from, to) = crate::calculation::month_range(month, year)?;
        self.payroll_for_range(employee_id, from, to)
    }

    /// Computes the payroll summary for an inclusive date range.
    ///
    /// # Errors
    ///
    /// [`EngineError::EmployeeNotFound`] for an unregistered employee;
    /// [`EngineError::InvalidInterval`] when `to` is earlier than `from`.
    pub fn payroll_for_range(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<PayrollSummary> {
        if to < from {
            return Err(EngineError::InvalidInterval {
                message: format!("range end {} is before range start {}", to, from),
            });
        }

        let ledger = self.store.lock();
        let employee = ledger
            .employee(employee_id)
            .ok_or_else(|| EngineError::EmployeeNotFound {
                id: employee_id.to_string(),
            })?;
        let records = ledger.records_for_employee(employee_id);

        Ok(summarize_payroll(
            employee_id,
            employee.hourly_rate,
            &records,
            from,
            to,
            self.policy.overtime_multiplier,
        ))
    }

    /// Computes the attendance summary for an inclusive date range.
    pub fn attendance(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<AttendanceSummary> {
        let ledger = self.store.lock();
        if ledger.employee(employee_id).is_none() {
            return Err(EngineError::EmployeeNotFound {
                id: employee_id.to_string(),
            });
        }
        let records = ledger.records_for_employee(employee_id);

        summarize_attendance(employee_id, &records, from, to)
    }

    /// Computes per-department payroll rollups for a date range.
    ///
    /// Employees without a department are not reported. Rows come back
    /// sorted by department name.
    pub fn department_report(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<DepartmentSummary>> {
        if to < from {
            return Err(EngineError::InvalidInterval {
                message: format!("range end {} is before range start {}", to, from),
            });
        }

        let ledger = self.store.lock();

        let mut by_department: BTreeMap<String, Vec<Employee>> = BTreeMap::new();
        for employee in ledger.employees() {
            if let Some(department) = &employee.department {
                by_department
                    .entry(department.clone())
                    .or_default()
                    .push(employee.clone());
            }
        }

        let mut report = Vec::with_capacity(by_department.len());
        for (department, members) in by_department {
            let mut total_hours = Decimal::ZERO;
            let mut overtime_hours = Decimal::ZERO;
            let mut total_pay = Decimal::ZERO;

            for member in &members {
                let records = ledger.records_for_employee(&member.id);
                let summary = summarize_payroll(
                    &member.id,
                    member.hourly_rate,
                    &records,
                    from,
                    to,
                    self.policy.overtime_multiplier,
                );
                total_hours += summary.total_hours;
                overtime_hours += summary.overtime_hours;
                total_pay += summary.total_pay;
            }

            report.push(DepartmentSummary {
                employee_count: members.len(),
                active_employees: members.iter().filter(|m| m.is_active()).count(),
                average_hours_per_employee: round2(
                    total_hours / Decimal::from(members.len() as u64),
                ),
                department,
                total_hours,
                overtime_hours,
                total_pay,
            });
        }

        Ok(report)
    }
}
