// In-memory game catalog: loaded once at startup, immutable afterwards.
// Shared across request handlers without locking.

pub mod loader;
pub mod price;
pub mod query;

pub use price::PriceOverview;
pub use query::{GameFilter, QueryPage};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// One catalog row. Text fields carry `None` where the source table held
/// the `\N` null sentinel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub app_id: i64,
    pub name: Option<String>,
    pub release_date: Option<String>,
    pub is_free: bool,
    pub price_overview: Option<PriceOverview>,
    pub languages: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Aggregate counts over the whole catalog.
#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogStats {
    pub total_games: usize,
    pub free_games: usize,
    pub paid_games: usize,
    pub types: BTreeMap<String, usize>,
}

/// The immutable dataset plus an `app_id` index for exact lookup.
pub struct Catalog {
    records: Vec<GameRecord>,
    index: HashMap<i64, usize>,
}

impl Catalog {
    /// Build a catalog from already-coerced records.
    ///
    /// The loader does not deduplicate `app_id`; when duplicates exist, the
    /// first row in load order wins the index slot and later rows are only
    /// reachable through filtering.
    pub fn from_records(records: Vec<GameRecord>) -> Self {
        let mut index = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            index.entry(record.app_id).or_insert(pos);
        }
        Self { records, index }
    }

    /// Load and index the catalog table at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_records(loader::load_records(path)?))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact lookup by `app_id`.
    pub fn get(&self, app_id: i64) -> Option<&GameRecord> {
        self.index.get(&app_id).map(|&pos| &self.records[pos])
    }

    /// Run a filter query; never mutates the dataset.
    pub fn query(&self, filter: &GameFilter) -> QueryPage {
        query::filter_games(&self.records, filter)
    }

    /// Aggregate counts. Records without a `type` contribute to the totals
    /// but not to the per-type breakdown.
    pub fn stats(&self) -> CatalogStats {
        let free_games = self.records.iter().filter(|g| g.is_free).count();
        let mut types = BTreeMap::new();
        for game in &self.records {
            if let Some(kind) = &game.kind {
                *types.entry(kind.clone()).or_insert(0) += 1;
            }
        }
        CatalogStats {
            total_games: self.records.len(),
            free_games,
            paid_games: self.records.len() - free_games,
            types,
        }
    }
}
