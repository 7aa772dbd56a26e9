// API server implementation using actix-web

use crate::api::{middleware, routes};
use crate::catalog::Catalog;
use crate::scrape::{self, GamePageExtractor};
use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

pub struct ApiServer {
    pub host: String,
    pub port: u16,
    pub allowed_origins: String,
    pub scrape_timeout: Duration,
}

impl ApiServer {
    /// Create server from environment variables
    pub fn from_env() -> Result<Self> {
        crate::util::env::init_env();

        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("API_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .context("Invalid API_PORT")?;

        let allowed_origins = env::var("ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string());

        let scrape_timeout = Duration::from_secs(crate::util::env::env_parse(
            "SCRAPE_TIMEOUT_SECS",
            scrape::DEFAULT_FETCH_TIMEOUT.as_secs(),
        ));

        Ok(Self {
            host,
            port,
            allowed_origins,
            scrape_timeout,
        })
    }

    /// Start the HTTP server over a fully loaded catalog.
    ///
    /// The catalog is wrapped in `web::Data` once here; handlers only ever
    /// see shared immutable references, so no locking is involved.
    pub async fn run(self, catalog: Catalog) -> Result<()> {
        let bind_addr = format!("{}:{}", self.host, self.port);

        tracing::info!(
            host = %self.host,
            port = %self.port,
            games = catalog.len(),
            "Starting steam-games-api server"
        );

        let catalog_data = web::Data::new(catalog);
        let client = scrape::build_client(self.scrape_timeout)
            .context("Failed to build scrape HTTP client")?;
        let client_data = web::Data::new(client);
        let extractor_data =
            web::Data::new(GamePageExtractor::new().context("Failed to compile page selectors")?);
        let allowed_origins = self.allowed_origins.clone();

        HttpServer::new(move || {
            let (logger, compress) = middleware::setup_middleware();
            let cors = middleware::setup_cors(&allowed_origins);

            App::new()
                .app_data(catalog_data.clone())
                .app_data(client_data.clone())
                .app_data(extractor_data.clone())
                .wrap(logger)
                .wrap(compress)
                .wrap(cors)
                .configure(routes::configure_routes)
        })
        .bind(&bind_addr)
        .with_context(|| format!("Failed to bind to {}", bind_addr))?
        .run()
        .await
        .context("HTTP server error")?;

        Ok(())
    }
}
