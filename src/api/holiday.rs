use actix_web::{HttpResponse, web};

use crate::api::timesheet::MonthQuery;
use crate::model::holiday::Holiday;
use crate::timesheet::builder::DayGridBuilder;
use crate::timesheet::store::HolidayLookup;

/// Public holidays of an entity for one month
#[utoipa::path(
    get,
    path = "/api/holiday",
    params(MonthQuery),
    responses(
        (status = 200, description = "Holidays in date order", body = Vec<Holiday>),
        (status = 400, description = "Invalid month"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Holiday"
)]
pub async fn list_holidays(
    builder: web::Data<DayGridBuilder>,
    query: web::Query<MonthQuery>,
) -> actix_web::Result<HttpResponse> {
    let holidays = builder
        .holiday_lookup()
        .holidays(query.year, query.month, query.entity_id)
        .await?;
    Ok(HttpResponse::Ok().json(holidays))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timesheet::categorizer::HoursCategorizer;
    use crate::timesheet::testing::{MemoryHolidays, MemoryTimesheets, date};
    use actix_web::{App, http::StatusCode, test};
    use std::sync::Arc;

    #[actix_web::test]
    async fn lists_only_the_requested_month() {
        let holidays = Arc::new(MemoryHolidays::default());
        for (d, name) in [(date(2026, 5, 1), "Labour Day"), (date(2026, 6, 1), "Other")] {
            holidays.add(
                3,
                Holiday {
                    date: d,
                    name: name.to_string(),
                },
            );
        }
        let builder = DayGridBuilder::new(
            holidays,
            Arc::new(MemoryTimesheets::default()),
            HoursCategorizer::default(),
        );
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(builder))
                .route("/holiday", web::get().to(list_holidays)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/holiday?year=2026&month=5&entity_id=3")
            .to_request();
        let body: Vec<Holiday> = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            vec![Holiday {
                date: date(2026, 5, 1),
                name: "Labour Day".to_string()
            }]
        );

        let req = test::TestRequest::get()
            .uri("/holiday?year=2026&month=5")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
