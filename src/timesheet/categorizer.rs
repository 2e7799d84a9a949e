use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::attendance::DayRecord;
use crate::timesheet::policy::{MINUTES_PER_DAY, ShiftPolicy, ShiftRules, punch_minutes};

const LUNCH_MINUTES: i32 = 60;
const STANDARD_DAY_MINUTES: i32 = 8 * 60;
const SATURDAY_NORMAL_MINUTES: i32 = 4 * 60;
/// In-times from 16:40 onward with an earlier out-time are read as crossing midnight.
const OVERNIGHT_IN_THRESHOLD: i32 = 1000;

/// Raw inputs for one day.
#[derive(Debug, Clone, Copy)]
pub struct PunchInput<'a> {
    pub in_time: &'a str,
    pub out_time: &'a str,
    pub shift: &'a str,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: u32,
    pub is_holiday: bool,
}

impl<'a> From<&'a DayRecord> for PunchInput<'a> {
    fn from(record: &'a DayRecord) -> Self {
        Self {
            in_time: record.in_punch(),
            out_time: record.out_punch(),
            shift: &record.shift,
            day_of_week: record.day_of_week,
            is_holiday: record.is_holiday(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct HourBuckets {
    #[schema(value_type = f64)]
    pub normal_hours: Decimal,
    #[schema(value_type = f64)]
    pub ot_1_5_hours: Decimal,
    #[schema(value_type = f64)]
    pub ot_2_0_hours: Decimal,
    #[schema(value_type = f64)]
    pub ph_hours: Decimal,
    /// Always `ot_1_5_hours + ot_2_0_hours`
    #[schema(value_type = f64)]
    pub ot_hours: Decimal,
}

impl HourBuckets {
    fn new(normal: Decimal, ot_1_5: Decimal, ot_2_0: Decimal, ph: Decimal) -> Self {
        Self {
            normal_hours: normal,
            ot_1_5_hours: ot_1_5,
            ot_2_0_hours: ot_2_0,
            ph_hours: ph,
            ot_hours: ot_1_5 + ot_2_0,
        }
    }
}

/// Buckets plus the shift window they were resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Categorization {
    pub buckets: HourBuckets,
    pub window: ShiftPolicy,
}

/// Turns a punch pair into paid-hour buckets.
///
/// Total over its input: missing, malformed or reversed punches give all-zero
/// buckets instead of an error, so half-typed rows never block the grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct HoursCategorizer {
    rules: ShiftRules,
}

impl HoursCategorizer {
    pub fn new(rules: ShiftRules) -> Self {
        Self { rules }
    }

    pub fn categorize(&self, input: PunchInput<'_>) -> Categorization {
        let window = *self.rules.resolve(input.shift);
        let buckets = match worked_minutes(input.in_time, input.out_time) {
            Some(worked) => split_by_day_type(worked, input.day_of_week, input.is_holiday),
            None => HourBuckets::default(),
        };

        tracing::trace!(
            in_time = input.in_time,
            out_time = input.out_time,
            shift = input.shift,
            ot_start = window.ot_start_minutes,
            normal = %buckets.normal_hours,
            ot = %buckets.ot_hours,
            "Categorized punch"
        );

        Categorization { buckets, window }
    }

    /// Overwrites every bucket on `record` with freshly derived values.
    pub fn apply(&self, record: &mut DayRecord) {
        let buckets = self.categorize(PunchInput::from(&*record)).buckets;
        record.normal_hours = Some(buckets.normal_hours);
        record.ot_1_5_hours = Some(buckets.ot_1_5_hours);
        record.ot_2_0_hours = Some(buckets.ot_2_0_hours);
        record.ph_hours = Some(buckets.ph_hours);
        record.ot_hours = Some(buckets.ot_hours);
    }
}

/// Paid minutes after the lunch deduction, `None` when the pair is unusable.
fn worked_minutes(in_time: &str, out_time: &str) -> Option<i32> {
    let start = punch_minutes(in_time)?;
    let mut end = punch_minutes(out_time)?;

    // Known gap: only late starts are treated as overnight, so "0930" -> "0100" stays invalid.
    if end <= start && start >= OVERNIGHT_IN_THRESHOLD {
        end += MINUTES_PER_DAY;
    }
    if end <= start {
        return None;
    }

    Some((end - start - LUNCH_MINUTES).max(0))
}

/// Rounds the worked total once and splits that value, so the buckets never
/// add up to more than was actually worked.
fn split_by_day_type(worked: i32, day_of_week: u32, is_holiday: bool) -> HourBuckets {
    let worked = hours(worked);
    let zero = Decimal::ZERO;
    match day_of_week {
        6 => {
            let normal = worked.min(hours(SATURDAY_NORMAL_MINUTES));
            HourBuckets::new(normal, worked - normal, zero, zero)
        }
        0 => HourBuckets::new(zero, zero, worked, zero),
        _ if is_holiday => {
            let normal = worked.min(hours(STANDARD_DAY_MINUTES));
            HourBuckets::new(normal, zero, worked - normal, normal)
        }
        _ => {
            let normal = worked.min(hours(STANDARD_DAY_MINUTES));
            HourBuckets::new(normal, worked - normal, zero, zero)
        }
    }
}

/// Whole minutes to hours, truncated to two places.
fn hours(minutes: i32) -> Decimal {
    (Decimal::from(minutes) / dec!(60)).round_dp_with_strategy(2, RoundingStrategy::ToZero)
}
