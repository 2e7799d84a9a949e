use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::TimesheetError;
use crate::model::attendance::DayRecord;
use crate::model::holiday::Holiday;
use crate::timesheet::categorizer::HoursCategorizer;

pub const STANDARD_IN_TIME: &str = "0800";
pub const STANDARD_OUT_TIME: &str = "1730";
pub const STANDARD_SHIFT: &str = "Day";
/// Widest `in_time`, `out_time` or `shift` the `timesheets` table holds.
pub const MAX_TEXT_FIELD_LEN: usize = 32;

/// First and last day of `year`-`month`.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), TimesheetError> {
    let invalid = || TimesheetError::InvalidMonth { year, month };
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
    let last = first
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .ok_or_else(invalid)?;
    Ok((first, last))
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32, TimesheetError> {
    let (_, last) = month_bounds(year, month)?;
    Ok(last.day())
}

/// One employee's month, one row per calendar day in date order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MonthlyGrid {
    #[schema(example = 1001)]
    pub employee_id: u64,
    #[schema(example = 1)]
    pub entity_id: u64,
    #[schema(example = 2026)]
    pub year: i32,
    #[schema(example = 1)]
    pub month: u32,
    pub days: Vec<DayRecord>,
}

/// Typed edit of a single grid cell, `{"field": "in_time", "value": "0800"}` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum DayFieldEdit {
    InTime(Option<String>),
    OutTime(Option<String>),
    Shift(String),
    NormalHours(Option<Decimal>),
    #[serde(rename = "ot_1_5_hours")]
    Ot15Hours(Option<Decimal>),
    #[serde(rename = "ot_2_0_hours")]
    Ot20Hours(Option<Decimal>),
    PhHours(Option<Decimal>),
    PerformanceCredit(Option<Decimal>),
    Remarks(Option<String>),
}

impl DayFieldEdit {
    /// Punch and shift edits re-derive the row's buckets.
    pub fn rederives(&self) -> bool {
        matches!(
            self,
            DayFieldEdit::InTime(_) | DayFieldEdit::OutTime(_) | DayFieldEdit::Shift(_)
        )
    }

    fn write(self, record: &mut DayRecord) {
        match self {
            DayFieldEdit::InTime(v) => record.in_time = v,
            DayFieldEdit::OutTime(v) => record.out_time = v,
            DayFieldEdit::Shift(v) => record.shift = v,
            DayFieldEdit::NormalHours(v) => record.normal_hours = v,
            DayFieldEdit::Ot15Hours(v) => record.ot_1_5_hours = v,
            DayFieldEdit::Ot20Hours(v) => record.ot_2_0_hours = v,
            DayFieldEdit::PhHours(v) => record.ph_hours = v,
            DayFieldEdit::PerformanceCredit(v) => record.performance_credit = v,
            DayFieldEdit::Remarks(v) => record.remarks = v,
        }
    }
}

/// Month totals used by payroll.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct MonthlySummary {
    #[schema(example = 22)]
    pub days_worked: u32,
    #[schema(value_type = f64)]
    pub normal_hours: Decimal,
    #[schema(value_type = f64)]
    pub ot_1_5_hours: Decimal,
    #[schema(value_type = f64)]
    pub ot_2_0_hours: Decimal,
    #[schema(value_type = f64)]
    pub ot_hours: Decimal,
    #[schema(value_type = f64)]
    pub ph_hours: Decimal,
    #[schema(value_type = f64)]
    pub performance_credit: Decimal,
}

impl MonthlyGrid {
    /// Merges persisted rows into a fresh day grid.
    ///
    /// Rows with both punches but no normal hours yet (or zero) are categorized;
    /// rows with non-zero normal hours keep whatever was saved.
    pub fn reconcile(
        employee_id: u64,
        entity_id: u64,
        year: i32,
        month: u32,
        holidays: &[Holiday],
        existing: Vec<DayRecord>,
        categorizer: &HoursCategorizer,
    ) -> Result<Self, TimesheetError> {
        let (first, last) = month_bounds(year, month)?;
        let mut existing = existing;

        let days = first
            .iter_days()
            .take_while(|date| *date <= last)
            .map(|date| {
                let mut record = match existing.iter().position(|r| r.date == date) {
                    Some(pos) => existing.swap_remove(pos),
                    None => DayRecord::blank(date),
                };
                record.date = date;
                record.day_of_week = date.weekday().num_days_from_sunday();
                record.holiday = holiday_name(holidays, date);

                let uncategorized = record
                    .normal_hours
                    .map(|h| h.is_zero())
                    .unwrap_or(true);
                if record.has_punches() && uncategorized {
                    categorizer.apply(&mut record);
                } else {
                    record.sync_ot_total();
                }
                record
            })
            .collect();

        Ok(Self {
            employee_id,
            entity_id,
            year,
            month,
            days,
        })
    }

    /// Checks a grid sent back by a client still has one row per day in order
    /// with text fields that fit storage, then re-derives `day_of_week` and
    /// `ot_hours` on each row.
    pub fn normalize(&mut self) -> Result<(), TimesheetError> {
        let (first, _) = month_bounds(self.year, self.month)?;
        let expected = days_in_month(self.year, self.month)? as usize;
        if self.days.len() != expected {
            return Err(TimesheetError::GridMismatch {
                reason: format!("expected {expected} days, got {}", self.days.len()),
            });
        }
        for (date, record) in first.iter_days().zip(self.days.iter_mut()) {
            if record.date != date {
                return Err(TimesheetError::GridMismatch {
                    reason: format!("expected {date}, got {}", record.date),
                });
            }
            check_field_len(date, "in_time", record.in_time.as_deref().unwrap_or(""))?;
            check_field_len(date, "out_time", record.out_time.as_deref().unwrap_or(""))?;
            check_field_len(date, "shift", &record.shift)?;
            record.day_of_week = date.weekday().num_days_from_sunday();
            record.sync_ot_total();
        }
        Ok(())
    }

    /// Replaces each row's holiday name with what `holidays` says for its date.
    pub fn mark_holidays(&mut self, holidays: &[Holiday]) {
        for record in &mut self.days {
            record.holiday = holiday_name(holidays, record.date);
        }
    }

    /// Sets one field on the row at `index`.
    pub fn edit(
        &mut self,
        index: usize,
        edit: DayFieldEdit,
        categorizer: &HoursCategorizer,
    ) -> Result<(), TimesheetError> {
        let len = self.days.len();
        let record = self
            .days
            .get_mut(index)
            .ok_or(TimesheetError::DayOutOfRange { index, len })?;

        let rederive = edit.rederives();
        edit.write(record);
        if rederive {
            categorizer.apply(record);
        } else {
            record.sync_ot_total();
        }
        Ok(())
    }

    /// Fills empty Monday-Friday rows with the standard 08:00-17:30 day shift.
    /// Returns how many rows were filled.
    pub fn apply_standard_pattern(&mut self, categorizer: &HoursCategorizer) -> usize {
        let mut filled = 0;
        for record in self
            .days
            .iter_mut()
            .filter(|r| (1..=5).contains(&r.day_of_week))
            .filter(|r| r.in_punch().is_empty() && r.out_punch().is_empty())
        {
            record.in_time = Some(STANDARD_IN_TIME.to_string());
            record.out_time = Some(STANDARD_OUT_TIME.to_string());
            record.shift = STANDARD_SHIFT.to_string();
            categorizer.apply(record);
            filled += 1;
        }
        filled
    }

    pub fn summary(&self) -> MonthlySummary {
        self.days
            .iter()
            .fold(MonthlySummary::default(), |mut total, day| {
                if day.has_punches() {
                    total.days_worked += 1;
                }
                total.normal_hours += day.normal_hours.unwrap_or_default();
                total.ot_1_5_hours += day.ot_1_5_hours.unwrap_or_default();
                total.ot_2_0_hours += day.ot_2_0_hours.unwrap_or_default();
                total.ph_hours += day.ph_hours.unwrap_or_default();
                total.performance_credit += day.performance_credit.unwrap_or_default();
                total.ot_hours = total.ot_1_5_hours + total.ot_2_0_hours;
                total
            })
    }
}

fn check_field_len(
    date: NaiveDate,
    field: &'static str,
    value: &str,
) -> Result<(), TimesheetError> {
    if value.chars().count() > MAX_TEXT_FIELD_LEN {
        return Err(TimesheetError::FieldTooLong {
            date,
            field,
            max: MAX_TEXT_FIELD_LEN,
        });
    }
    Ok(())
}

fn holiday_name(holidays: &[Holiday], date: NaiveDate) -> Option<String> {
    holidays
        .iter()
        .find(|h| h.date == date)
        .map(|h| h.name.clone())
}
