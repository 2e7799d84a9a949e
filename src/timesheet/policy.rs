use serde::Serialize;
use utoipa::ToSchema;

pub const MINUTES_PER_DAY: i32 = 1440;

/// Shift window in minutes since midnight of the work day.
///
/// `end_minutes` runs past 1440 when the shift finishes the next morning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct ShiftPolicy {
    #[schema(example = 450)]
    pub start_minutes: i32,
    #[schema(example = 990)]
    pub end_minutes: i32,
    /// Overtime accrues from here
    #[schema(example = 990)]
    pub ot_start_minutes: i32,
}

impl ShiftPolicy {
    /// 07:30 - 16:30, OT from 16:30
    pub const DAY: ShiftPolicy = ShiftPolicy {
        start_minutes: 7 * 60 + 30,
        end_minutes: 16 * 60 + 30,
        ot_start_minutes: 16 * 60 + 30,
    };

    /// 18:30 - 04:30 next day, OT from shift end
    pub const NIGHT: ShiftPolicy = ShiftPolicy {
        start_minutes: 18 * 60 + 30,
        end_minutes: 4 * 60 + 30 + MINUTES_PER_DAY,
        ot_start_minutes: 4 * 60 + 30 + MINUTES_PER_DAY,
    };

    /// Parses a `HHmm-HHmm` window such as `"0730-1630"` or `"18:30-04:30"`.
    /// An end at or before the start is taken as the next day. OT starts at the end.
    pub fn parse_window(window: &str) -> Option<ShiftPolicy> {
        let (start, end) = window.split_once('-')?;
        let start = punch_minutes(start)?;
        let mut end = punch_minutes(end)?;
        if end <= start {
            end += MINUTES_PER_DAY;
        }
        Some(ShiftPolicy {
            start_minutes: start,
            end_minutes: end,
            ot_start_minutes: end,
        })
    }
}

/// Shift policies in force for a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftRules {
    pub day: ShiftPolicy,
    pub night: ShiftPolicy,
}

impl Default for ShiftRules {
    fn default() -> Self {
        Self {
            day: ShiftPolicy::DAY,
            night: ShiftPolicy::NIGHT,
        }
    }
}

impl ShiftRules {
    /// Any shift label containing "night" (any case) uses the night window,
    /// everything else (`""`, `"Day"`, `"Split"`) the day window.
    pub fn resolve(&self, shift: &str) -> &ShiftPolicy {
        if shift.to_ascii_lowercase().contains("night") {
            &self.night
        } else {
            &self.day
        }
    }
}

/// Minutes since midnight for a raw punch (`"0800"`, `"800"`, `"08:00"`).
///
/// `None` for fewer than three digits or anything non-numeric.
pub fn punch_minutes(raw: &str) -> Option<i32> {
    let digits: String = raw.trim().chars().filter(|c| *c != ':').collect();
    if digits.len() < 3 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let value: i32 = digits.parse().ok()?;
    Some(value / 100 * 60 + value % 100)
}
