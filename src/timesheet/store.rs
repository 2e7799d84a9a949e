use async_trait::async_trait;
use chrono::Datelike;
use sqlx::MySqlPool;

use crate::error::TimesheetError;
use crate::model::attendance::{DayRecord, TimesheetRow};
use crate::model::holiday::Holiday;
use crate::timesheet::grid::month_bounds;

/// Public holidays of an entity.
#[async_trait]
pub trait HolidayLookup: Send + Sync {
    async fn holidays(
        &self,
        year: i32,
        month: u32,
        entity_id: u64,
    ) -> Result<Vec<Holiday>, TimesheetError>;
}

/// Persisted day records of one employee.
#[async_trait]
pub trait TimesheetStore: Send + Sync {
    /// Only dates with saved data come back, in no particular order.
    async fn get_monthly(
        &self,
        employee_id: u64,
        year: i32,
        month: u32,
        entity_id: u64,
    ) -> Result<Vec<DayRecord>, TimesheetError>;

    /// Replaces the whole month the records belong to. Dates missing from
    /// `records`, or blank in it, end up with nothing stored.
    async fn save_monthly(
        &self,
        employee_id: u64,
        records: &[DayRecord],
        entity_id: u64,
    ) -> Result<(), TimesheetError>;
}

/// The single `(year, month)` a batch of records belongs to.
pub fn records_month(records: &[DayRecord]) -> Result<(i32, u32), TimesheetError> {
    let first = records.first().ok_or(TimesheetError::EmptyGrid)?;
    let key = (first.date.year(), first.date.month());
    if records
        .iter()
        .any(|r| (r.date.year(), r.date.month()) != key)
    {
        return Err(TimesheetError::MixedMonths);
    }
    Ok(key)
}

pub struct MySqlHolidayLookup {
    pool: MySqlPool,
}

impl MySqlHolidayLookup {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HolidayLookup for MySqlHolidayLookup {
    async fn holidays(
        &self,
        year: i32,
        month: u32,
        entity_id: u64,
    ) -> Result<Vec<Holiday>, TimesheetError> {
        let (first, last) = month_bounds(year, month)?;

        let holidays = sqlx::query_as::<_, Holiday>(
            r#"
            SELECT date, name
            FROM holidays
            WHERE entity_id = ?
            AND date BETWEEN ? AND ?
            ORDER BY date
            "#,
        )
        .bind(entity_id)
        .bind(first)
        .bind(last)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, entity_id, year, month, "Failed to fetch holidays");
            e
        })?;

        Ok(holidays)
    }
}

pub struct MySqlTimesheetStore {
    pool: MySqlPool,
}

impl MySqlTimesheetStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimesheetStore for MySqlTimesheetStore {
    async fn get_monthly(
        &self,
        employee_id: u64,
        year: i32,
        month: u32,
        entity_id: u64,
    ) -> Result<Vec<DayRecord>, TimesheetError> {
        let (first, last) = month_bounds(year, month)?;

        let rows = sqlx::query_as::<_, TimesheetRow>(
            r#"
            SELECT date, in_time, out_time, shift,
                   normal_hours, ot_1_5_hours, ot_2_0_hours, ot_hours,
                   ph_hours, performance_credit, remarks
            FROM timesheets
            WHERE employee_id = ?
            AND entity_id = ?
            AND date BETWEEN ? AND ?
            "#,
        )
        .bind(employee_id)
        .bind(entity_id)
        .bind(first)
        .bind(last)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, employee_id, entity_id, year, month, "Failed to fetch timesheet");
            e
        })?;

        Ok(rows.into_iter().map(DayRecord::from).collect())
    }

    async fn save_monthly(
        &self,
        employee_id: u64,
        records: &[DayRecord],
        entity_id: u64,
    ) -> Result<(), TimesheetError> {
        let (year, month) = records_month(records)?;
        let (first, last) = month_bounds(year, month)?;

        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query(
            r#"
            DELETE FROM timesheets
            WHERE employee_id = ?
            AND entity_id = ?
            AND date BETWEEN ? AND ?
            "#,
        )
        .bind(employee_id)
        .bind(entity_id)
        .bind(first)
        .bind(last)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let mut written = 0usize;
        for record in records.iter().filter(|r| !r.is_blank()) {
            insert_record(&mut tx, employee_id, entity_id, record).await?;
            written += 1;
        }

        tx.commit().await?;

        tracing::info!(employee_id, entity_id, year, month, removed, written, "Timesheet month replaced");
        Ok(())
    }
}

async fn insert_record(
    tx: &mut sqlx::Transaction<'_, sqlx::MySql>,
    employee_id: u64,
    entity_id: u64,
    record: &DayRecord,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO timesheets
        (employee_id, entity_id, date, in_time, out_time, shift,
         normal_hours, ot_1_5_hours, ot_2_0_hours, ot_hours,
         ph_hours, performance_credit, remarks)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(employee_id)
    .bind(entity_id)
    .bind(record.date)
    .bind(record.in_time.as_deref())
    .bind(record.out_time.as_deref())
    .bind(record.shift.as_str())
    .bind(record.normal_hours)
    .bind(record.ot_1_5_hours)
    .bind(record.ot_2_0_hours)
    .bind(record.ot_hours)
    .bind(record.ph_hours)
    .bind(record.performance_credit)
    .bind(record.remarks.as_deref())
    .execute(&mut **tx)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> DayRecord {
        DayRecord::blank(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    #[test]
    fn records_month_requires_one_month() {
        assert!(matches!(records_month(&[]), Err(TimesheetError::EmptyGrid)));
        assert_eq!(
            records_month(&[day(2026, 2, 1), day(2026, 2, 28)]).unwrap(),
            (2026, 2)
        );
        assert!(matches!(
            records_month(&[day(2026, 2, 28), day(2026, 3, 1)]),
            Err(TimesheetError::MixedMonths)
        ));
        assert!(matches!(
            records_month(&[day(2025, 2, 1), day(2026, 2, 1)]),
            Err(TimesheetError::MixedMonths)
        ));
    }
}
