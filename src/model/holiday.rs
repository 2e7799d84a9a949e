use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, sqlx::FromRow)]
pub struct Holiday {
    #[schema(example = "2026-05-01", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "Labour Day")]
    pub name: String,
}
