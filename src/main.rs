use std::sync::Arc;

use actix_web::middleware::NormalizePath;
use actix_web::web::Data;
use actix_web::{App, HttpServer, Responder, get};

mod api;
mod config;
mod db;
mod docs;
mod error;
mod model;
mod routes;
mod timesheet;

use config::Config;
use db::init_db;

use crate::docs::ApiDoc;
use crate::timesheet::builder::DayGridBuilder;
use crate::timesheet::categorizer::HoursCategorizer;
use crate::timesheet::store::{MySqlHolidayLookup, MySqlTimesheetStore};
use tracing::info;
use tracing_appender::rolling;
use utoipa::OpenApi; // ← needed for ApiDoc::openapi()
use utoipa_swagger_ui::SwaggerUi;

#[get("/")]
async fn index() -> impl Responder {
    "Timesheet hours service"
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Rolling daily log
    let file_appender = rolling::daily(&config.log_dir, "timesheet.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(config.log_level)
        .with_ansi(false)
        .with_target(false) // removes module path
        .with_level(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .pretty()
        .init();

    info!("Server starting...");

    let pool = init_db(&config.database_url).await?;

    let builder = Data::new(DayGridBuilder::new(
        Arc::new(MySqlHolidayLookup::new(pool.clone())),
        Arc::new(MySqlTimesheetStore::new(pool)),
        HoursCategorizer::new(config.shift_rules),
    ));
    info!(
        day_ot_start = config.shift_rules.day.ot_start_minutes,
        night_ot_start = config.shift_rules.night.ot_start_minutes,
        "Shift policy loaded"
    );

    let server_addr = config.server_addr.clone();
    let config_data = config.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(actix_web::middleware::Logger::default())
            .wrap(NormalizePath::trim())
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}") // ← important: wildcard {_:.*} to match JS/CSS files
                    .url("/api-doc/openapi.json", ApiDoc::openapi()),
            )
            .app_data(builder.clone())
            .service(index)
            .configure(|cfg| routes::configure(cfg, config_data.clone()))
    })
    .bind(server_addr)?
    .run()
    .await?;

    Ok(())
}
