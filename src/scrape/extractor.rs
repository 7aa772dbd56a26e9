// Structural extraction of game details from a storefront page.
//
// Every field is anchored on a fixed selector and evaluated independently:
// a missing marker yields the "N/A" sentinel (single-valued fields) or an
// empty list, never an error. A page where no marker matches at all is a
// valid outcome and produces a fully sentinel-filled record.

use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

/// Sentinel for a single-valued field whose marker is absent.
pub const NOT_AVAILABLE: &str = "N/A";

/// One minimum/recommended requirements block from the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemRequirements {
    pub os: String,
    pub lines: Vec<String>,
}

/// Everything extracted from a single store page. Ephemeral: built per
/// scrape request, returned, discarded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedGameInfo {
    pub title: String,
    pub price: String,
    pub discounted_price: String,
    pub description: String,
    pub release_date: String,
    pub developer: String,
    pub publisher: String,
    pub tags: Vec<String>,
    pub review_summary: String,
    pub review_count: String,
    pub system_requirements: Vec<SystemRequirements>,
    pub features: Vec<String>,
    pub screenshots: Vec<String>,
    pub video_url: String,
    pub platforms: Vec<String>,
}

/// Compiled selector set for the store page layout.
///
/// The selectors are the extraction contract with the storefront: when the
/// page structure changes, this is the one place to update.
pub struct GamePageExtractor {
    title: Selector,
    price: Selector,
    discounted_price: Selector,
    description: Selector,
    release_date: Selector,
    developer: Selector,
    publisher: Selector,
    tags: Selector,
    review_summary: Selector,
    review_count: Selector,
    sys_req_blocks: Selector,
    sys_req_lines: Selector,
    features: Selector,
    screenshots: Selector,
    video: Selector,
    platforms: Selector,
}

impl GamePageExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: compile("#appHubAppName")?,
            price: compile(".game_purchase_price")?,
            discounted_price: compile(".discount_final_price")?,
            description: compile(".game_description_snippet")?,
            release_date: compile(".release_date .date")?,
            developer: compile("#developers_list a")?,
            publisher: compile(".dev_row .summary:not(#developers_list) a")?,
            tags: compile("a.app_tag")?,
            review_summary: compile(".game_review_summary")?,
            review_count: compile("meta[itemprop=\"reviewCount\"]")?,
            sys_req_blocks: compile(".game_area_sys_req")?,
            sys_req_lines: compile("li")?,
            features: compile(".game_area_details_specs_ctn .label")?,
            screenshots: compile("a.highlight_screenshot_link")?,
            video: compile(".highlight_movie")?,
            platforms: compile(".game_area_purchase_platform span.platform_img")?,
        })
    }

    /// Extract a full record from raw page HTML. Total: tolerates any
    /// combination of absent markers.
    pub fn extract(&self, html: &str) -> ScrapedGameInfo {
        let doc = Html::parse_document(html);

        ScrapedGameInfo {
            title: or_na(first_text(&doc, &self.title)),
            price: or_na(first_text(&doc, &self.price)),
            discounted_price: or_na(first_text(&doc, &self.discounted_price)),
            description: or_na(first_text(&doc, &self.description)),
            release_date: or_na(first_text(&doc, &self.release_date)),
            developer: or_na(first_text(&doc, &self.developer)),
            publisher: or_na(first_text(&doc, &self.publisher)),
            tags: all_texts(&doc, &self.tags),
            review_summary: or_na(first_text(&doc, &self.review_summary)),
            review_count: or_na(first_attr(&doc, &self.review_count, "content")),
            system_requirements: self.requirement_blocks(&doc),
            features: all_texts(&doc, &self.features),
            screenshots: all_attrs(&doc, &self.screenshots, "href"),
            video_url: or_na(first_attr(&doc, &self.video, "data-mp4-source")),
            platforms: self.platform_tokens(&doc),
        }
    }

    fn requirement_blocks(&self, doc: &Html) -> Vec<SystemRequirements> {
        doc.select(&self.sys_req_blocks)
            .map(|block| SystemRequirements {
                os: block
                    .value()
                    .attr("data-os")
                    .map(str::to_string)
                    .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                lines: block
                    .select(&self.sys_req_lines)
                    .map(element_text)
                    .filter(|line| !line.is_empty())
                    .collect(),
            })
            .collect()
    }

    /// Platform identifiers are carried as the second class token of the
    /// platform marker (`platform_img win`, `platform_img mac`, ...),
    /// repeated across every purchase-option block on the page.
    fn platform_tokens(&self, doc: &Html) -> Vec<String> {
        let mut platforms: Vec<String> = Vec::new();
        for marker in doc.select(&self.platforms) {
            if let Some(token) = marker.value().classes().nth(1) {
                if !platforms.iter().any(|p| p == token) {
                    platforms.push(token.to_string());
                }
            }
        }
        platforms
    }
}

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|err| anyhow!("invalid selector `{selector}`: {err}"))
}

/// Concatenated text content with whitespace collapsed.
fn element_text(el: ElementRef) -> String {
    el.text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn first_text(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .map(element_text)
        .find(|text| !text.is_empty())
}

fn first_attr(doc: &Html, selector: &Selector, attr: &str) -> Option<String> {
    doc.select(selector)
        .find_map(|el| el.value().attr(attr))
        .map(str::to_string)
}

fn all_texts(doc: &Html, selector: &Selector) -> Vec<String> {
    doc.select(selector)
        .map(element_text)
        .filter(|text| !text.is_empty())
        .collect()
}

fn all_attrs(doc: &Html, selector: &Selector, attr: &str) -> Vec<String> {
    doc.select(selector)
        .filter_map(|el| el.value().attr(attr))
        .map(str::to_string)
        .collect()
}

fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> GamePageExtractor {
        GamePageExtractor::new().unwrap()
    }

    #[test]
    fn empty_page_yields_sentinels_not_errors() {
        let info = extractor().extract("<html><body><p>nothing here</p></body></html>");
        assert_eq!(info.title, NOT_AVAILABLE);
        assert_eq!(info.price, NOT_AVAILABLE);
        assert_eq!(info.discounted_price, NOT_AVAILABLE);
        assert_eq!(info.description, NOT_AVAILABLE);
        assert_eq!(info.release_date, NOT_AVAILABLE);
        assert_eq!(info.developer, NOT_AVAILABLE);
        assert_eq!(info.publisher, NOT_AVAILABLE);
        assert_eq!(info.review_summary, NOT_AVAILABLE);
        assert_eq!(info.review_count, NOT_AVAILABLE);
        assert_eq!(info.video_url, NOT_AVAILABLE);
        assert!(info.tags.is_empty());
        assert!(info.system_requirements.is_empty());
        assert!(info.features.is_empty());
        assert!(info.screenshots.is_empty());
        assert!(info.platforms.is_empty());
    }

    #[test]
    fn extracts_single_valued_fields() {
        let html = r##"
            <div id="appHubAppName">Half-Life 3</div>
            <div class="game_purchase_price"> $59.99 </div>
            <div class="discount_final_price">$29.99</div>
            <div class="game_description_snippet">
                The long awaited
                sequel.
            </div>
            <div class="release_date"><div class="date">Mar 1, 2026</div></div>
            <div class="dev_row">
                <div id="developers_list" class="summary"><a href="#">Valve</a></div>
            </div>
            <div class="dev_row">
                <div class="summary"><a href="#">Valve Publishing</a></div>
            </div>
            <div class="game_review_summary">Overwhelmingly Positive</div>
            <meta itemprop="reviewCount" content="123456">
        "##;
        let info = extractor().extract(html);
        assert_eq!(info.title, "Half-Life 3");
        assert_eq!(info.price, "$59.99");
        assert_eq!(info.discounted_price, "$29.99");
        assert_eq!(info.description, "The long awaited sequel.");
        assert_eq!(info.release_date, "Mar 1, 2026");
        assert_eq!(info.developer, "Valve");
        assert_eq!(info.publisher, "Valve Publishing");
        assert_eq!(info.review_summary, "Overwhelmingly Positive");
        assert_eq!(info.review_count, "123456");
    }

    #[test]
    fn extracts_list_fields() {
        let html = r#"
            <a class="app_tag">FPS</a>
            <a class="app_tag">Sci-fi</a>
            <a class="game_area_details_specs_ctn"><div class="label">Single-player</div></a>
            <a class="highlight_screenshot_link" href="https://cdn.example/shot1.jpg"></a>
            <a class="highlight_screenshot_link" href="https://cdn.example/shot2.jpg"></a>
            <div class="highlight_movie" data-mp4-source="https://cdn.example/trailer.mp4"></div>
        "#;
        let info = extractor().extract(html);
        assert_eq!(info.tags, vec!["FPS", "Sci-fi"]);
        assert_eq!(info.features, vec!["Single-player"]);
        assert_eq!(
            info.screenshots,
            vec![
                "https://cdn.example/shot1.jpg",
                "https://cdn.example/shot2.jpg"
            ]
        );
        assert_eq!(info.video_url, "https://cdn.example/trailer.mp4");
    }

    #[test]
    fn requirement_blocks_keep_heading_and_lines() {
        let html = r#"
            <div class="game_area_sys_req" data-os="win">
                <ul><li>OS: Windows 10</li><li>RAM: 8 GB</li></ul>
            </div>
            <div class="game_area_sys_req" data-os="linux">
                <ul><li>OS: Ubuntu 22.04</li></ul>
            </div>
        "#;
        let info = extractor().extract(html);
        assert_eq!(info.system_requirements.len(), 2);
        assert_eq!(info.system_requirements[0].os, "win");
        assert_eq!(
            info.system_requirements[0].lines,
            vec!["OS: Windows 10", "RAM: 8 GB"]
        );
        assert_eq!(info.system_requirements[1].os, "linux");
    }

    #[test]
    fn platforms_come_from_second_class_token_across_blocks() {
        let html = r#"
            <div class="game_area_purchase_platform">
                <span class="platform_img win"></span>
                <span class="platform_img mac"></span>
            </div>
            <div class="game_area_purchase_platform">
                <span class="platform_img win"></span>
                <span class="platform_img linux"></span>
            </div>
        "#;
        let info = extractor().extract(html);
        assert_eq!(info.platforms, vec!["win", "mac", "linux"]);
    }
}
