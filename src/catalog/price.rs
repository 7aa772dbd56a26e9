// Price field normalization for catalog rows.
//
// The source table stores `price_overview` as a Python-style dict literal
// with single-quote delimiters (or the `\N` null sentinel). Normalization is
// a two-stage pure function: rewrite the quoting, then decode. Both stages
// are total; anything undecodable collapses to `None`.

use serde::{Deserialize, Serialize};

/// Null sentinel used by the source table for absent values.
pub const NULL_SENTINEL: &str = "\\N";

/// Structured price attached to a game. Amounts are in minor currency
/// units: `final` of 1999 means 19.99 in `currency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceOverview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial: Option<i64>,
    #[serde(rename = "final", default, skip_serializing_if = "Option::is_none")]
    pub final_amount: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_formatted: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_formatted: Option<String>,
}

/// Rewrite single-quote delimiters to standard JSON double quotes.
///
/// This mirrors how the price payload was written out by the upstream
/// exporter; apostrophes inside formatted strings will corrupt the payload,
/// in which case the decode stage falls back to `None`.
pub fn rewrite_quotes(raw: &str) -> String {
    raw.replace('\'', "\"")
}

/// Decode a rewritten payload, or `None` if it is not valid JSON.
pub fn decode(json_text: &str) -> Option<PriceOverview> {
    serde_json::from_str(json_text).ok()
}

/// Normalize a raw `price_overview` cell into a structured price.
///
/// Returns `None` for the `\N` sentinel, empty text, or any payload that
/// fails to decode. Price is best-effort metadata; this never errors.
pub fn normalize(raw: &str) -> Option<PriceOverview> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == NULL_SENTINEL {
        return None;
    }
    decode(&rewrite_quotes(trimmed))
}
