// API request/response models (DTOs)

use serde::{Deserialize, Serialize};

/// Body for every non-2xx response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Query parameters for `/scrape_game/`.
#[derive(Debug, Deserialize)]
pub struct ScrapeQuery {
    pub url: String,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub games_loaded: usize,
}
