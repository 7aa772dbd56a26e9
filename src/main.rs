// HTTP API server binary for steam-games-api
// Loads the catalog once, then serves read-only queries and the scraper

use anyhow::{Context, Result};
use std::path::PathBuf;
use steam_games_api::api::ApiServer;
use steam_games_api::catalog::Catalog;
use steam_games_api::util::env as env_util;

#[actix_web::main]
async fn main() -> Result<()> {
    // Load dotenv/env before the subscriber so a RUST_LOG from .env is seen
    env_util::init_env();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    tracing::info!("Initializing steam-games-api server");

    // Load configuration from environment
    let server = ApiServer::from_env()?;

    // Load the catalog before binding; an unreadable table is fatal, and no
    // request is served against a partially loaded dataset.
    let csv_path = PathBuf::from(
        env_util::env_opt("GAMES_CSV").unwrap_or_else(|| "games.csv".to_string()),
    );
    let catalog = Catalog::load(&csv_path)
        .with_context(|| format!("failed to load catalog from {}", csv_path.display()))?;

    tracing::info!(games = catalog.len(), "Catalog ready");

    // Start HTTP server
    server.run(catalog).await?;

    Ok(())
}
