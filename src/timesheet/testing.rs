//! In-memory collaborators for tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate};

use crate::error::TimesheetError;
use crate::model::attendance::DayRecord;
use crate::model::holiday::Holiday;
use crate::timesheet::store::{HolidayLookup, TimesheetStore, records_month};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[derive(Default)]
pub struct MemoryHolidays {
    by_entity: Mutex<HashMap<u64, Vec<Holiday>>>,
    failing: AtomicBool,
}

impl MemoryHolidays {
    pub fn add(&self, entity_id: u64, holiday: Holiday) {
        self.by_entity
            .lock()
            .unwrap()
            .entry(entity_id)
            .or_default()
            .push(holiday);
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl HolidayLookup for MemoryHolidays {
    async fn holidays(
        &self,
        year: i32,
        month: u32,
        entity_id: u64,
    ) -> Result<Vec<Holiday>, TimesheetError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TimesheetError::Storage(sqlx::Error::PoolTimedOut));
        }
        Ok(self
            .by_entity
            .lock()
            .unwrap()
            .get(&entity_id)
            .map(|all| {
                all.iter()
                    .filter(|h| h.date.year() == year && h.date.month() == month)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}

/// Keyed by `(employee_id, entity_id)`; saves replace the month like the MySQL store.
#[derive(Default)]
pub struct MemoryTimesheets {
    rows: Mutex<HashMap<(u64, u64), Vec<DayRecord>>>,
    failing: AtomicBool,
}

impl MemoryTimesheets {
    pub fn seed(&self, employee_id: u64, entity_id: u64, records: Vec<DayRecord>) {
        self.rows
            .lock()
            .unwrap()
            .entry((employee_id, entity_id))
            .or_default()
            .extend(records);
    }

    pub fn saved(&self, employee_id: u64, entity_id: u64) -> Vec<DayRecord> {
        self.rows
            .lock()
            .unwrap()
            .get(&(employee_id, entity_id))
            .cloned()
            .unwrap_or_default()
    }

    pub fn fail(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl TimesheetStore for MemoryTimesheets {
    async fn get_monthly(
        &self,
        employee_id: u64,
        year: i32,
        month: u32,
        entity_id: u64,
    ) -> Result<Vec<DayRecord>, TimesheetError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TimesheetError::Storage(sqlx::Error::PoolTimedOut));
        }
        Ok(self
            .saved(employee_id, entity_id)
            .into_iter()
            .filter(|r| r.date.year() == year && r.date.month() == month)
            .map(|mut r| {
                // storage never keeps derived fields
                r.holiday = None;
                r
            })
            .collect())
    }

    async fn save_monthly(
        &self,
        employee_id: u64,
        records: &[DayRecord],
        entity_id: u64,
    ) -> Result<(), TimesheetError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(TimesheetError::Storage(sqlx::Error::PoolTimedOut));
        }
        let (year, month) = records_month(records)?;

        let mut rows = self.rows.lock().unwrap();
        let stored = rows.entry((employee_id, entity_id)).or_default();
        stored.retain(|r| !(r.date.year() == year && r.date.month() == month));
        stored.extend(records.iter().filter(|r| !r.is_blank()).cloned());
        Ok(())
    }
}
