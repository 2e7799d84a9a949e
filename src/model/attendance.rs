use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One calendar day of an employee's timesheet.
///
/// Punches stay raw strings (`"0800"`, `"800"`, `"17:30"`) because biometric
/// imports feed the same shape and are not always well formed. Hour buckets
/// are `None` until categorized or entered, so a stored zero is not confused
/// with a blank cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DayRecord {
    #[schema(example = "2026-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,

    /// 0 = Sunday .. 6 = Saturday
    #[schema(example = 1)]
    #[serde(default)]
    pub day_of_week: u32,

    #[schema(example = "0800")]
    #[serde(default)]
    pub in_time: Option<String>,

    #[schema(example = "1730")]
    #[serde(default)]
    pub out_time: Option<String>,

    #[schema(example = "Day")]
    #[serde(default)]
    pub shift: String,

    #[schema(example = 8.0, value_type = Option<f64>)]
    #[serde(default)]
    pub normal_hours: Option<Decimal>,

    #[schema(example = 0.5, value_type = Option<f64>)]
    #[serde(default)]
    pub ot_1_5_hours: Option<Decimal>,

    #[schema(example = 0.0, value_type = Option<f64>)]
    #[serde(default)]
    pub ot_2_0_hours: Option<Decimal>,

    #[schema(example = 0.5, value_type = Option<f64>)]
    #[serde(default)]
    pub ot_hours: Option<Decimal>,

    #[schema(example = 0.0, value_type = Option<f64>)]
    #[serde(default)]
    pub ph_hours: Option<Decimal>,

    #[schema(value_type = Option<f64>)]
    #[serde(default)]
    pub performance_credit: Option<Decimal>,

    #[serde(default)]
    pub remarks: Option<String>,

    /// Holiday name when the date is a public holiday. Derived on load, never stored.
    #[schema(example = "New Year's Day")]
    #[serde(default)]
    pub holiday: Option<String>,
}

impl DayRecord {
    /// A blank row for `date`.
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            date,
            day_of_week: date.weekday().num_days_from_sunday(),
            in_time: None,
            out_time: None,
            shift: String::new(),
            normal_hours: None,
            ot_1_5_hours: None,
            ot_2_0_hours: None,
            ot_hours: None,
            ph_hours: None,
            performance_credit: None,
            remarks: None,
            holiday: None,
        }
    }

    pub fn in_punch(&self) -> &str {
        self.in_time.as_deref().unwrap_or("").trim()
    }

    pub fn out_punch(&self) -> &str {
        self.out_time.as_deref().unwrap_or("").trim()
    }

    pub fn has_punches(&self) -> bool {
        !self.in_punch().is_empty() && !self.out_punch().is_empty()
    }

    pub fn is_holiday(&self) -> bool {
        self.holiday.is_some()
    }

    /// Recomputes `ot_hours` from the two OT tiers. Left empty when both tiers are empty.
    pub fn sync_ot_total(&mut self) {
        self.ot_hours = match (self.ot_1_5_hours, self.ot_2_0_hours) {
            (None, None) => None,
            (a, b) => Some(a.unwrap_or_default() + b.unwrap_or_default()),
        };
    }

    /// True when nothing on the row carries data worth storing.
    pub fn is_blank(&self) -> bool {
        let remarks_empty = self
            .remarks
            .as_deref()
            .map(|r| r.trim().is_empty())
            .unwrap_or(true);

        self.in_punch().is_empty()
            && self.out_punch().is_empty()
            && self.shift.trim().is_empty()
            && self.normal_hours.is_none()
            && self.ot_1_5_hours.is_none()
            && self.ot_2_0_hours.is_none()
            && self.ph_hours.is_none()
            && self.performance_credit.is_none()
            && remarks_empty
    }
}

/// Row shape of the `timesheets` table.
#[derive(Debug, sqlx::FromRow)]
pub struct TimesheetRow {
    pub date: NaiveDate,
    pub in_time: Option<String>,
    pub out_time: Option<String>,
    pub shift: Option<String>,
    pub normal_hours: Option<Decimal>,
    pub ot_1_5_hours: Option<Decimal>,
    pub ot_2_0_hours: Option<Decimal>,
    pub ot_hours: Option<Decimal>,
    pub ph_hours: Option<Decimal>,
    pub performance_credit: Option<Decimal>,
    pub remarks: Option<String>,
}

impl From<TimesheetRow> for DayRecord {
    fn from(row: TimesheetRow) -> Self {
        let mut record = DayRecord::blank(row.date);
        record.in_time = row.in_time;
        record.out_time = row.out_time;
        record.shift = row.shift.unwrap_or_default();
        record.normal_hours = row.normal_hours;
        record.ot_1_5_hours = row.ot_1_5_hours;
        record.ot_2_0_hours = row.ot_2_0_hours;
        record.ot_hours = row.ot_hours;
        record.ph_hours = row.ph_hours;
        record.performance_credit = row.performance_credit;
        record.remarks = row.remarks;
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn blank_row_derives_day_of_week() {
        // 2026-01-04 is a Sunday, 2026-01-10 a Saturday
        assert_eq!(DayRecord::blank(date(2026, 1, 4)).day_of_week, 0);
        assert_eq!(DayRecord::blank(date(2026, 1, 10)).day_of_week, 6);
        assert!(DayRecord::blank(date(2026, 1, 10)).is_blank());
    }

    #[test]
    fn zero_is_not_blank() {
        let mut record = DayRecord::blank(date(2026, 1, 5));
        record.normal_hours = Some(dec!(0));
        assert!(!record.is_blank());

        let mut record = DayRecord::blank(date(2026, 1, 5));
        record.remarks = Some("   ".to_string());
        assert!(record.is_blank());
    }

    #[test]
    fn ot_total_follows_tiers() {
        let mut record = DayRecord::blank(date(2026, 1, 5));
        record.sync_ot_total();
        assert_eq!(record.ot_hours, None);

        record.ot_1_5_hours = Some(dec!(1.5));
        record.ot_2_0_hours = Some(dec!(2));
        record.sync_ot_total();
        assert_eq!(record.ot_hours, Some(dec!(3.5)));
    }

    #[test]
    fn serializes_with_storage_field_names() {
        let mut record = DayRecord::blank(date(2026, 1, 5));
        record.ot_1_5_hours = Some(dec!(2));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["date"], "2026-01-05");
        assert_eq!(json["ot_1_5_hours"], 2.0);
        assert!(json["ot_2_0_hours"].is_null());
        assert!(json.get("performance_credit").is_some());
    }
}
