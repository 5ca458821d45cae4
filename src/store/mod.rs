//! In-memory reference store for time records and break sessions.
//!
//! Persistence technology is a collaborator concern; this store is the
//! reference implementation of the two invariants any backing store must
//! provide: a unique index on `(employee_id, date)` and cascade deletion
//! of a record's break sessions. A database would enforce the same with a
//! unique constraint and a foreign key.
//!
//! All tables live behind a single mutex. Locking the ledger for the
//! whole of each mutation serializes concurrent writers, which covers the
//! one hard concurrency requirement: two simultaneous clock-ins for the
//! same employee and date observe one record, never two.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{BreakSession, Employee, RecordState, TimeRecord};

/// The tables of the store. Obtained through [`MemoryStore::lock`].
#[derive(Debug, Default)]
pub struct Ledger {
    employees: HashMap<String, Employee>,
    records: HashMap<Uuid, TimeRecord>,
    record_index: HashMap<(String, NaiveDate), Uuid>,
    breaks: HashMap<Uuid, BreakSession>,
    break_index: HashMap<Uuid, Vec<Uuid>>,
}

impl Ledger {
    /// Inserts or replaces an employee in the read model.
    pub fn upsert_employee(&mut self, employee: Employee) {
        self.employees.insert(employee.id.clone(), employee);
    }

    /// Looks up an employee by id.
    pub fn employee(&self, id: &str) -> Option<&Employee> {
        self.employees.get(id)
    }

    /// Returns all registered employees.
    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        self.employees.values()
    }

    /// Returns the existing record for `(employee_id, date)` or creates
    /// one with the given initial state.
    ///
    /// The boolean is `true` when a record was created. A caller that
    /// loses the creation race gets the winner's record back instead of
    /// an error; the unique index can never end up with two rows for the
    /// same day.
    pub fn get_or_create_record(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
        state: RecordState,
    ) -> (TimeRecord, bool) {
        let key = (employee_id.to_string(), date);

        if let Some(id) = self.record_index.get(&key) {
            return (self.records[id].clone(), false);
        }

        let record = TimeRecord {
            id: Uuid::new_v4(),
            employee_id: employee_id.to_string(),
            date,
            state,
            notes: None,
        };
        self.record_index.insert(key, record.id);
        self.records.insert(record.id, record.clone());
        (record, true)
    }

    /// Inserts a new record, failing when the day already has one.
    ///
    /// Administrative creation path; unlike [`Self::get_or_create_record`]
    /// a duplicate here surfaces as an error.
    pub fn insert_record(&mut self, record: TimeRecord) -> EngineResult<()> {
        let key = (record.employee_id.clone(), record.date);

        if self.record_index.contains_key(&key) {
            return Err(EngineError::DuplicateRecord {
                employee_id: record.employee_id,
                date: record.date,
            });
        }

        self.record_index.insert(key, record.id);
        self.records.insert(record.id, record);
        Ok(())
    }

    /// Looks up a record by id.
    pub fn record(&self, id: Uuid) -> Option<&TimeRecord> {
        self.records.get(&id)
    }

    /// Looks up the record for an employee on a date.
    pub fn record_for_day(&self, employee_id: &str, date: NaiveDate) -> Option<&TimeRecord> {
        self.record_index
            .get(&(employee_id.to_string(), date))
            .and_then(|id| self.records.get(id))
    }

    /// Returns all records belonging to an employee.
    pub fn records_for_employee(&self, employee_id: &str) -> Vec<TimeRecord> {
        self.records
            .values()
            .filter(|r| r.employee_id == employee_id)
            .cloned()
            .collect()
    }

    /// Replaces a stored record with an updated copy.
    ///
    /// The employee and date of a record never change, so the unique
    /// index needs no maintenance here.
    pub fn update_record(&mut self, record: TimeRecord) -> EngineResult<()> {
        match self.records.get_mut(&record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(EngineError::RecordNotFound { id: record.id }),
        }
    }

    /// Deletes a record and all of its break sessions.
    pub fn delete_record(&mut self, id: Uuid) -> EngineResult<TimeRecord> {
        let record = self
            .records
            .remove(&id)
            .ok_or(EngineError::RecordNotFound { id })?;

        self.record_index
            .remove(&(record.employee_id.clone(), record.date));

        if let Some(break_ids) = self.break_index.remove(&id) {
            for break_id in break_ids {
                self.breaks.remove(&break_id);
            }
        }

        Ok(record)
    }

    /// Adds a break session under its parent record.
    pub fn add_break(&mut self, session: BreakSession) {
        self.break_index
            .entry(session.time_record_id)
            .or_default()
            .push(session.id);
        self.breaks.insert(session.id, session);
    }

    /// Replaces a stored break session with an updated copy.
    pub fn update_break(&mut self, session: BreakSession) {
        self.breaks.insert(session.id, session);
    }

    /// Returns all break sessions of a record, in creation order.
    pub fn breaks_for_record(&self, record_id: Uuid) -> Vec<BreakSession> {
        self.break_index
            .get(&record_id)
            .map(|ids| ids.iter().map(|id| self.breaks[id].clone()).collect())
            .unwrap_or_default()
    }

    /// Returns the open break session of a record, if any.
    ///
    /// At most one session per record is ever open.
    pub fn open_break_for_record(&self, record_id: Uuid) -> Option<BreakSession> {
        self.breaks_for_record(record_id)
            .into_iter()
            .find(BreakSession::is_active)
    }
}

/// Thread-safe in-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Ledger>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Locks the ledger for a sequence of reads or writes.
    ///
    /// Engine operations hold the guard for the whole read-modify-write,
    /// which is what makes get-or-create atomic under concurrent calls.
    pub fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.inner.lock().expect("time ledger mutex poisoned")
    }
}
