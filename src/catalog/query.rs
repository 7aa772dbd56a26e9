// Filtering and pagination over the in-memory catalog.

use crate::catalog::GameRecord;
use serde::{Deserialize, Serialize};

fn default_limit() -> usize {
    10
}

/// Composable filter over the catalog. Every predicate is optional; the
/// supplied ones are combined with logical AND. Pagination applies after
/// all predicates.
#[derive(Debug, Clone, Deserialize)]
pub struct GameFilter {
    pub name: Option<String>,
    pub is_free: Option<bool>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub language: Option<String>,
    pub max_price: Option<f64>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

impl Default for GameFilter {
    fn default() -> Self {
        Self {
            name: None,
            is_free: None,
            kind: None,
            language: None,
            max_price: None,
            limit: default_limit(),
            offset: 0,
        }
    }
}

/// One page of query results: the pre-pagination match count plus the
/// requested slice.
#[derive(Debug, Clone, Serialize)]
pub struct QueryPage {
    pub total: usize,
    pub games: Vec<GameRecord>,
}

/// Apply `filter` to `records` without mutating them.
///
/// An `offset` past the end of the match set yields an empty page, not an
/// error; `total` always reflects the full match count.
pub fn filter_games(records: &[GameRecord], filter: &GameFilter) -> QueryPage {
    let matched: Vec<&GameRecord> = records
        .iter()
        .filter(|game| matches(game, filter))
        .collect();
    let total = matched.len();
    let games = matched
        .into_iter()
        .skip(filter.offset)
        .take(filter.limit)
        .cloned()
        .collect();
    QueryPage { total, games }
}

fn matches(game: &GameRecord, filter: &GameFilter) -> bool {
    // Empty query strings behave as "not supplied".
    if let Some(needle) = non_empty(&filter.name) {
        // Records with an absent name never match a name filter.
        let Some(name) = game.name.as_deref() else {
            return false;
        };
        if !ci_contains(name, needle) {
            return false;
        }
    }
    if let Some(is_free) = filter.is_free {
        if game.is_free != is_free {
            return false;
        }
    }
    if let Some(kind) = non_empty(&filter.kind) {
        if !game
            .kind
            .as_deref()
            .is_some_and(|k| k.eq_ignore_ascii_case(kind))
        {
            return false;
        }
    }
    if let Some(language) = non_empty(&filter.language) {
        if !game
            .languages
            .as_deref()
            .is_some_and(|langs| ci_contains(langs, language))
        {
            return false;
        }
    }
    if let Some(max_price) = filter.max_price {
        // Absent price or missing `final` is excluded outright, never
        // treated as free.
        let Some(final_amount) = game
            .price_overview
            .as_ref()
            .and_then(|p| p.final_amount)
        else {
            return false;
        };
        if final_amount as f64 / 100.0 > max_price {
            return false;
        }
    }
    true
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn ci_contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::price;

    fn game(app_id: i64, name: &str, is_free: bool, price: Option<&str>) -> GameRecord {
        GameRecord {
            app_id,
            name: Some(name.to_string()),
            release_date: Some("Jan 1, 2020".to_string()),
            is_free,
            price_overview: price.and_then(price::normalize),
            languages: Some("English, German".to_string()),
            kind: Some("game".to_string()),
        }
    }

    fn sample() -> Vec<GameRecord> {
        vec![
            game(1, "Alpha", true, None),
            game(2, "Beta Game", false, Some("{'final': 1999}")),
            game(3, "Gamma", false, Some("{'currency': 'USD'}")),
        ]
    }

    #[test]
    fn name_filter_is_ci_substring() {
        let page = filter_games(
            &sample(),
            &GameFilter {
                name: Some("beta".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(page.total, 1);
        assert_eq!(page.games[0].app_id, 2);
    }

    #[test]
    fn absent_name_never_matches() {
        let mut records = sample();
        records[0].name = None;
        let page = filter_games(
            &records,
            &GameFilter {
                name: Some("a".to_string()),
                ..Default::default()
            },
        );
        assert!(page.games.iter().all(|g| g.app_id != 1));
    }

    #[test]
    fn max_price_excludes_missing_final() {
        // Gamma has a price struct but no `final`; it must not pass.
        let page = filter_games(
            &sample(),
            &GameFilter {
                max_price: Some(19.99),
                ..Default::default()
            },
        );
        assert_eq!(page.total, 1);
        assert_eq!(page.games[0].app_id, 2);
    }

    #[test]
    fn max_price_boundary_is_inclusive() {
        let page = filter_games(
            &sample(),
            &GameFilter {
                max_price: Some(19.98),
                ..Default::default()
            },
        );
        assert_eq!(page.total, 0);
    }

    #[test]
    fn predicates_compose_with_and() {
        let page = filter_games(
            &sample(),
            &GameFilter {
                name: Some("a".to_string()),
                is_free: Some(false),
                kind: Some("GAME".to_string()),
                language: Some("german".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(page.total, 2);
    }

    #[test]
    fn pagination_slices_after_filtering() {
        let filter = GameFilter {
            limit: 2,
            offset: 1,
            ..Default::default()
        };
        let page = filter_games(&sample(), &filter);
        assert_eq!(page.total, 3);
        assert_eq!(page.games.len(), 2);
        assert_eq!(page.games[0].app_id, 2);
    }

    #[test]
    fn offset_past_end_is_empty_not_an_error() {
        let filter = GameFilter {
            offset: 99,
            ..Default::default()
        };
        let page = filter_games(&sample(), &filter);
        assert_eq!(page.total, 3);
        assert!(page.games.is_empty());
    }

    #[test]
    fn empty_query_strings_are_ignored() {
        let page = filter_games(
            &sample(),
            &GameFilter {
                name: Some(String::new()),
                kind: Some("  ".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(page.total, 3);
    }
}
