// API module for the steam-games-api HTTP server
// Read-only query surface over the catalog plus the on-demand scraper

pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

pub use server::ApiServer;
