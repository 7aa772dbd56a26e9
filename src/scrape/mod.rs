// On-demand storefront scraping: URL validation, a single fetch, and
// structural extraction. Independent of the catalog; every invocation is a
// self-contained unit of work.

pub mod extractor;

pub use extractor::{GamePageExtractor, ScrapedGameInfo, SystemRequirements};

use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Host and path prefix a scrape target must live under.
pub const STORE_HOST: &str = "store.steampowered.com";
pub const STORE_PATH_PREFIX: &str = "/app/";

/// Storefronts tend to reject clients without a browser User-Agent.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

/// Default outbound fetch timeout; expiry is reported as a fetch failure.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The supplied URL is not a store app page; rejected before any I/O.
    #[error("url must point at https://store.steampowered.com/app/...")]
    InvalidUrl,
    /// Network failure, timeout, or non-2xx response from the storefront.
    #[error("fetch failed: {0}")]
    Fetch(String),
}

/// Reject anything that is not an app page on the storefront. Runs before
/// the fetch, so bad input never costs a network round trip.
pub fn validate_store_url(raw: &str) -> Result<(), ScrapeError> {
    let url = Url::parse(raw).map_err(|_| ScrapeError::InvalidUrl)?;
    let scheme_ok = matches!(url.scheme(), "http" | "https");
    if scheme_ok && url.host_str() == Some(STORE_HOST) && url.path().starts_with(STORE_PATH_PREFIX)
    {
        Ok(())
    } else {
        Err(ScrapeError::InvalidUrl)
    }
}

/// Shared HTTP client for scrape requests: browser User-Agent plus a hard
/// timeout on the whole request.
pub fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(BROWSER_USER_AGENT)
        .timeout(timeout)
        .build()
}

/// Fetch the raw HTML of a page. One GET, no retries; transport errors,
/// an elapsed timeout, and non-2xx responses all report as `Fetch`.
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String, ScrapeError> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|err| ScrapeError::Fetch(err.to_string()))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(ScrapeError::Fetch(format!(
            "storefront responded with status {status}"
        )));
    }
    resp.text()
        .await
        .map_err(|err| ScrapeError::Fetch(err.to_string()))
}

/// Fetch a store page and extract its details.
pub async fn scrape_game(
    client: &reqwest::Client,
    extractor: &GamePageExtractor,
    url: &str,
) -> Result<ScrapedGameInfo, ScrapeError> {
    validate_store_url(url)?;
    let body = fetch_page(client, url).await?;
    Ok(extractor.extract(&body))
}
