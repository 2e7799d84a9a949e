use crate::{
    api::{holiday, timesheet},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-scope limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let per_ms = (60_000 / requests_per_min as u64).max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .expect("period and burst size are non-zero");
        Governor::new(&cfg)
    }

    let limiter = build_limiter(config.rate_timesheet_per_min);

    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(limiter)
            .service(
                web::scope("/timesheet")
                    // /timesheet/categorize
                    .service(
                        web::resource("/categorize")
                            .route(web::post().to(timesheet::categorize_day)),
                    )
                    // /timesheet/edit
                    .service(web::resource("/edit").route(web::post().to(timesheet::edit_day)))
                    // /timesheet/standard-pattern
                    .service(
                        web::resource("/standard-pattern")
                            .route(web::post().to(timesheet::standard_pattern)),
                    )
                    // /timesheet/{employee_id}
                    .service(
                        web::resource("/{employee_id}")
                            .route(web::get().to(timesheet::get_month_grid))
                            .route(web::put().to(timesheet::save_month_grid)),
                    ),
            )
            .service(
                web::scope("/holiday")
                    // /holiday
                    .service(web::resource("").route(web::get().to(holiday::list_holidays))),
            ),
    );
}

// GET  /timesheet/{employee_id}?year&month&entity_id   load month grid
//  ├─ POST /timesheet/edit                            operator edits
//  ├─ POST /timesheet/standard-pattern
//  └─ PUT  /timesheet/{employee_id}                   full-month overwrite, returns re-read grid
