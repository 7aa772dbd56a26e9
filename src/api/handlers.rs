// HTTP request handlers for API endpoints

use crate::api::models::*;
use crate::catalog::{Catalog, GameFilter};
use crate::scrape::{self, GamePageExtractor, ScrapeError};
use actix_web::{web, HttpResponse, Result};

/// Health check endpoint
pub async fn health_check(catalog: web::Data<Catalog>) -> Result<HttpResponse> {
    let response = HealthResponse {
        status: "healthy".to_string(),
        games_loaded: catalog.len(),
    };
    Ok(HttpResponse::Ok().json(response))
}

/// Exact lookup by app_id: 200 with the record, 404 when absent.
pub async fn get_game(path: web::Path<i64>, catalog: web::Data<Catalog>) -> Result<HttpResponse> {
    let app_id = path.into_inner();
    match catalog.get(app_id) {
        Some(game) => Ok(HttpResponse::Ok().json(game)),
        None => {
            tracing::debug!(app_id, "lookup miss");
            Ok(HttpResponse::NotFound()
                .json(ErrorResponse::new(format!("game {app_id} not found"))))
        }
    }
}

/// Filtered listing with offset/limit pagination. An empty match set is a
/// normal 200 with `total: 0`.
pub async fn list_games(
    query: web::Query<GameFilter>,
    catalog: web::Data<Catalog>,
) -> Result<HttpResponse> {
    let page = catalog.query(&query);
    tracing::debug!(
        total = page.total,
        returned = page.games.len(),
        "games query served"
    );
    Ok(HttpResponse::Ok().json(page))
}

/// Aggregate catalog statistics.
pub async fn get_stats(catalog: web::Data<Catalog>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(catalog.stats()))
}

/// Fetch and extract a single store page on demand.
pub async fn scrape_game(
    query: web::Query<ScrapeQuery>,
    client: web::Data<reqwest::Client>,
    extractor: web::Data<GamePageExtractor>,
) -> Result<HttpResponse> {
    match scrape::scrape_game(&client, &extractor, &query.url).await {
        Ok(info) => Ok(HttpResponse::Ok().json(info)),
        Err(err @ ScrapeError::InvalidUrl) => {
            Ok(HttpResponse::BadRequest().json(ErrorResponse::new(err.to_string())))
        }
        Err(err @ ScrapeError::Fetch(_)) => {
            tracing::warn!(url = %query.url, error = %err, "scrape failed");
            Ok(HttpResponse::InternalServerError().json(ErrorResponse::new(err.to_string())))
        }
    }
}
