// API route configuration

use crate::api::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Health check
        .route("/health", web::get().to(handlers::health_check))
        // Catalog queries
        .route("/games/", web::get().to(handlers::list_games))
        .route("/games/{app_id}", web::get().to(handlers::get_game))
        .route("/stats/", web::get().to(handlers::get_stats))
        // On-demand storefront scrape
        .route("/scrape_game/", web::get().to(handlers::scrape_game));
}
