use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TimesheetError {
    #[error("invalid month {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("day index {index} is outside a {len}-day grid")]
    DayOutOfRange { index: usize, len: usize },

    #[error("grid does not match its month: {reason}")]
    GridMismatch { reason: String },

    #[error("{field} on {date} is longer than {max} characters")]
    FieldTooLong {
        date: chrono::NaiveDate,
        field: &'static str,
        max: usize,
    },

    #[error("no day records to save")]
    EmptyGrid,

    #[error("day records span more than one month")]
    MixedMonths,

    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

impl ResponseError for TimesheetError {
    fn status_code(&self) -> StatusCode {
        match self {
            TimesheetError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            TimesheetError::Storage(e) => {
                tracing::error!(error = %e, "Timesheet storage failure");
                HttpResponse::InternalServerError().json(json!({
                    "message": "Internal Server Error"
                }))
            }
            other => HttpResponse::build(self.status_code()).json(json!({
                "message": other.to_string()
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_are_bad_requests() {
        let err = TimesheetError::InvalidMonth { year: 2026, month: 13 };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "invalid month 2026-13");
        assert_eq!(TimesheetError::EmptyGrid.status_code(), StatusCode::BAD_REQUEST);

        let err = TimesheetError::FieldTooLong {
            date: chrono::NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(),
            field: "in_time",
            max: 32,
        };
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_string(),
            "in_time on 2026-01-06 is longer than 32 characters"
        );
    }

    #[test]
    fn storage_errors_hide_details() {
        let err = TimesheetError::from(sqlx::Error::PoolTimedOut);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            err.error_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
