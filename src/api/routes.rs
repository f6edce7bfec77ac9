// Route configuration.

use crate::api::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health_check))
        .route("/data/{steamid}", web::get().to(handlers::aggregate))
        .route(
            "/data/{steamid}/{lang}",
            web::get().to(handlers::aggregate_with_lang),
        );
}
