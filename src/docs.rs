use crate::api::timesheet::{
    CategorizeRequest, EditRequest, GridResponse, MonthQuery, SaveGrid, StandardPatternResponse,
};
use crate::model::attendance::DayRecord;
use crate::model::holiday::Holiday;
use crate::timesheet::categorizer::{Categorization, HourBuckets};
use crate::timesheet::grid::{MonthlyGrid, MonthlySummary};
use crate::timesheet::policy::ShiftPolicy;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Timesheet Hours API",
        version = "1.0.0",
        description = r#"
## Attendance hours categorization

Turns raw clock-in / clock-out punches into paid-hour buckets and lets HR
reconcile an employee's month before payroll.

### Hour buckets
- **Normal**: first 8 worked hours on weekdays and holidays, first 4 on Saturdays
- **OT 1.5x**: weekday and Saturday hours beyond normal
- **OT 2.0x**: all Sunday hours, holiday hours beyond 8
- **PH**: holiday hours, mirroring normal up to 8
- A fixed 1 hour lunch is deducted from every punch pair

### Month grid
- `GET` builds one row per calendar day from saved data
- Edits to `in_time`, `out_time` or `shift` re-derive that day's hours
- `PUT` **replaces the whole month**: days sent blank erase saved data.
  Concurrent saves of the same month are last-save-wins.
"#,
    ),
    paths(
        crate::api::timesheet::get_month_grid,
        crate::api::timesheet::save_month_grid,
        crate::api::timesheet::categorize_day,
        crate::api::timesheet::edit_day,
        crate::api::timesheet::standard_pattern,

        crate::api::holiday::list_holidays
    ),
    components(
        schemas(
            DayRecord,
            Holiday,
            MonthlyGrid,
            MonthlySummary,
            GridResponse,
            SaveGrid,
            MonthQuery,
            CategorizeRequest,
            Categorization,
            HourBuckets,
            ShiftPolicy,
            EditRequest,
            StandardPatternResponse
        )
    ),
    tags(
        (name = "Timesheet", description = "Month grid and hours categorization APIs"),
        (name = "Holiday", description = "Public holiday lookup APIs"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for path in [
            "/api/timesheet/{employee_id}",
            "/api/timesheet/categorize",
            "/api/timesheet/edit",
            "/api/timesheet/standard-pattern",
            "/api/holiday",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == path), "missing {path}");
        }
    }
}
