use actix_web::{HttpResponse, web};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::{IntoParams, ToSchema};

use crate::error::TimesheetError;
use crate::model::attendance::DayRecord;
use crate::timesheet::builder::DayGridBuilder;
use crate::timesheet::categorizer::{Categorization, PunchInput};
use crate::timesheet::grid::{DayFieldEdit, MonthlyGrid, MonthlySummary};
use crate::timesheet::view::TimesheetView;

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MonthQuery {
    #[schema(example = 2026)]
    pub year: i32,
    #[schema(example = 1)]
    pub month: u32,
    #[schema(example = 1)]
    pub entity_id: u64,
}

#[derive(Serialize, ToSchema)]
pub struct GridResponse {
    pub grid: MonthlyGrid,
    pub summary: MonthlySummary,
}

impl From<MonthlyGrid> for GridResponse {
    fn from(grid: MonthlyGrid) -> Self {
        let summary = grid.summary();
        Self { grid, summary }
    }
}

#[derive(Deserialize, ToSchema)]
pub struct SaveGrid {
    #[schema(example = 1)]
    pub entity_id: u64,
    #[schema(example = 2026)]
    pub year: i32,
    #[schema(example = 1)]
    pub month: u32,
    /// Every day of the month, in order
    pub days: Vec<DayRecord>,
}

#[derive(Deserialize, ToSchema)]
pub struct CategorizeRequest {
    #[schema(example = "2026-01-06", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "0800")]
    pub in_time: Option<String>,
    #[schema(example = "1900")]
    pub out_time: Option<String>,
    #[schema(example = "Day")]
    #[serde(default)]
    pub shift: String,
    #[serde(default)]
    pub is_holiday: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct EditRequest {
    pub grid: MonthlyGrid,
    #[schema(example = 5)]
    pub index: usize,
    /// `{"field": "<day record field>", "value": ...}`
    #[schema(value_type = Object, example = json!({"field": "in_time", "value": "0800"}))]
    pub edit: DayFieldEdit,
}

#[derive(Serialize, ToSchema)]
pub struct StandardPatternResponse {
    #[schema(example = 21)]
    pub filled: usize,
    pub grid: MonthlyGrid,
    pub summary: MonthlySummary,
}

/// Month grid for one employee
#[utoipa::path(
    get,
    path = "/api/timesheet/{employee_id}",
    params(
        ("employee_id", description = "Employee ID"),
        MonthQuery
    ),
    responses(
        (status = 200, description = "One row per calendar day", body = GridResponse),
        (status = 400, description = "Invalid month", body = Object, example = json!({
            "message": "invalid month 2026-13"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Timesheet"
)]
#[instrument(name = "timesheet_get", skip(builder, path, query), fields(employee_id = *path))]
pub async fn get_month_grid(
    builder: web::Data<DayGridBuilder>,
    path: web::Path<u64>,
    query: web::Query<MonthQuery>,
) -> actix_web::Result<HttpResponse> {
    let employee_id = path.into_inner();

    let mut view = TimesheetView::new();
    view.load(&builder, employee_id, query.year, query.month, query.entity_id)
        .await?;

    debug!(
        days = view.grid().map_or(0, |g| g.days.len()),
        "Timesheet grid built"
    );
    let grid = view.into_grid().ok_or(TimesheetError::EmptyGrid)?;
    Ok(HttpResponse::Ok().json(GridResponse::from(grid)))
}

/// Replace the whole month
///
/// Full overwrite: days sent blank erase anything saved for them before.
/// Returns the month as stored.
#[utoipa::path(
    put,
    path = "/api/timesheet/{employee_id}",
    request_body = SaveGrid,
    params(
        ("employee_id", description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Saved month, re-read from storage", body = GridResponse),
        (status = 400, description = "Grid does not cover the month day by day"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Timesheet"
)]
#[instrument(name = "timesheet_save", skip(builder, path, body), fields(employee_id = *path))]
pub async fn save_month_grid(
    builder: web::Data<DayGridBuilder>,
    path: web::Path<u64>,
    body: web::Json<SaveGrid>,
) -> actix_web::Result<HttpResponse> {
    let body = body.into_inner();
    let mut grid = MonthlyGrid {
        employee_id: path.into_inner(),
        entity_id: body.entity_id,
        year: body.year,
        month: body.month,
        days: body.days,
    };
    grid.normalize()?;

    let mut view = TimesheetView::with_grid(grid);
    view.save(&builder).await?;
    info!("Timesheet month saved");

    let grid = view.into_grid().ok_or(TimesheetError::EmptyGrid)?;
    Ok(HttpResponse::Ok().json(GridResponse::from(grid)))
}

/// Categorize one punch pair
#[utoipa::path(
    post,
    path = "/api/timesheet/categorize",
    request_body = CategorizeRequest,
    responses(
        (status = 200, description = "Hour buckets and the shift window applied", body = Categorization)
    ),
    tag = "Timesheet"
)]
pub async fn categorize_day(
    builder: web::Data<DayGridBuilder>,
    body: web::Json<CategorizeRequest>,
) -> HttpResponse {
    let input = PunchInput {
        in_time: body.in_time.as_deref().unwrap_or(""),
        out_time: body.out_time.as_deref().unwrap_or(""),
        shift: &body.shift,
        day_of_week: body.date.weekday().num_days_from_sunday(),
        is_holiday: body.is_holiday,
    };
    HttpResponse::Ok().json(builder.categorizer().categorize(input))
}

/// Apply one field edit to a grid
///
/// Editing `in_time`, `out_time` or `shift` re-derives that day's hours and
/// discards hand-entered hour values on it. Holiday names on the posted grid
/// are ignored and looked up again.
#[utoipa::path(
    post,
    path = "/api/timesheet/edit",
    request_body = EditRequest,
    responses(
        (status = 200, description = "Grid with the edit applied", body = GridResponse),
        (status = 400, description = "Index outside the grid or malformed grid"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Timesheet"
)]
pub async fn edit_day(
    builder: web::Data<DayGridBuilder>,
    body: web::Json<EditRequest>,
) -> actix_web::Result<HttpResponse> {
    let EditRequest {
        mut grid,
        index,
        edit,
    } = body.into_inner();
    grid.normalize()?;
    builder.refresh_holidays(&mut grid).await?;

    let mut view = TimesheetView::with_grid(grid);
    view.edit(index, edit, &builder)?;

    let grid = view.into_grid().ok_or(TimesheetError::EmptyGrid)?;
    Ok(HttpResponse::Ok().json(GridResponse::from(grid)))
}

/// Fill empty weekdays with 08:00-17:30 day shifts
#[utoipa::path(
    post,
    path = "/api/timesheet/standard-pattern",
    request_body = MonthlyGrid,
    responses(
        (status = 200, description = "Grid with empty weekdays filled", body = StandardPatternResponse),
        (status = 400, description = "Malformed grid"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Timesheet"
)]
pub async fn standard_pattern(
    builder: web::Data<DayGridBuilder>,
    body: web::Json<MonthlyGrid>,
) -> actix_web::Result<HttpResponse> {
    let mut grid = body.into_inner();
    grid.normalize()?;
    builder.refresh_holidays(&mut grid).await?;

    let mut view = TimesheetView::with_grid(grid);
    let filled = view.apply_standard_pattern(&builder);

    let grid = view.into_grid().ok_or(TimesheetError::EmptyGrid)?;
    let summary = grid.summary();
    Ok(HttpResponse::Ok().json(StandardPatternResponse {
        filled,
        grid,
        summary,
    }))
}
