use crate::{
    api::{employee, holiday, pto_request, stats},
    config::Config,
    error::ApiError,
    ui,
};
use actix_governor::{
    Governor, GovernorConfig, GovernorConfigBuilder, PeerIpKeyExtractor,
    governor::middleware::NoOpMiddleware,
};
use actix_web::{HttpResponse, Responder, get, web};
use serde_json::json;

pub type RateLimit = GovernorConfig<PeerIpKeyExtractor, NoOpMiddleware>;

/// Per-IP quota for the API scope; `None` when the quota is zero.
pub fn rate_limit(requests_per_min: u32) -> Option<RateLimit> {
    let per_ms = 60_000 / u64::from(requests_per_min.max(1));
    GovernorConfigBuilder::default()
        .per_millisecond(per_ms.max(1))
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish()
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config, limiter: &RateLimit) {
    // Public routes
    cfg.service(health).service(ui::index);

    // JSON API
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(Governor::new(limiter))
            .configure(api),
    );
}

/// The JSON API without prefix or rate limiting.
pub fn api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| ApiError::validation(format!("Invalid request body: {err}")).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| ApiError::validation(format!("Invalid query: {err}")).into()),
    )
    // /employees
    .service(
        web::resource("/employees")
            .route(web::get().to(employee::list_employees))
            .route(web::post().to(employee::create_employee))
            .route(web::put().to(employee::update_employee)),
    )
    // /holidays
    .service(
        web::resource("/holidays")
            .route(web::get().to(holiday::list_holidays))
            .route(web::post().to(holiday::create_holiday))
            .route(web::delete().to(holiday::delete_holiday)),
    )
    // /pto-requests
    .service(
        web::resource("/pto-requests")
            .route(web::get().to(pto_request::list_pto_requests))
            .route(web::post().to(pto_request::create_pto_request))
            .route(web::put().to(pto_request::update_pto_request))
            .route(web::delete().to(pto_request::delete_pto_request)),
    )
    // /stats
    .service(web::resource("/stats").route(web::get().to(stats::employee_stats)));
}
