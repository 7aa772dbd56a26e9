// Catalog loading: CSV rows into typed GameRecord values.
//
// The source table is quoted CSV with a backslash escape character and UTF-8
// text. A row that fails type coercion is logged and skipped; only a
// wholesale read failure (missing file, broken header) aborts startup.

use crate::catalog::price;
use crate::catalog::GameRecord;
use anyhow::{anyhow, Context, Result};
use csv::StringRecord;
use std::fs::File;
use std::path::Path;
use tracing::{info, warn};

const REQUIRED_COLUMNS: [&str; 7] = [
    "app_id",
    "name",
    "release_date",
    "is_free",
    "price_overview",
    "languages",
    "type",
];

/// Column positions resolved from the header row.
struct Columns {
    app_id: usize,
    name: usize,
    release_date: usize,
    is_free: usize,
    price_overview: usize,
    languages: usize,
    kind: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let pos = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| anyhow!("source table is missing required column `{name}`"))
        };
        Ok(Self {
            app_id: pos(REQUIRED_COLUMNS[0])?,
            name: pos(REQUIRED_COLUMNS[1])?,
            release_date: pos(REQUIRED_COLUMNS[2])?,
            is_free: pos(REQUIRED_COLUMNS[3])?,
            price_overview: pos(REQUIRED_COLUMNS[4])?,
            languages: pos(REQUIRED_COLUMNS[5])?,
            kind: pos(REQUIRED_COLUMNS[6])?,
        })
    }
}

/// Load the full catalog table from `path`.
///
/// Fatal only when the file cannot be read or the header lacks a required
/// column; individual malformed rows degrade coverage, not availability.
pub fn load_records(path: &Path) -> Result<Vec<GameRecord>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open catalog file {}", path.display()))?;
    let mut rdr = csv::ReaderBuilder::new()
        .escape(Some(b'\\'))
        .from_reader(file);

    let headers = rdr
        .headers()
        .context("failed to read catalog header row")?
        .clone();
    let cols = Columns::from_headers(&headers)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for (line, row) in rdr.records().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                warn!(line = line + 2, error = %err, "skipping unreadable catalog row");
                skipped += 1;
                continue;
            }
        };
        match coerce_row(&row, &cols) {
            Ok(record) => records.push(record),
            Err(err) => {
                warn!(line = line + 2, error = %err, "skipping malformed catalog row");
                skipped += 1;
            }
        }
    }

    info!(
        loaded = records.len(),
        skipped,
        path = %path.display(),
        "catalog loaded"
    );
    Ok(records)
}

fn coerce_row(row: &StringRecord, cols: &Columns) -> Result<GameRecord> {
    let cell = |idx: usize| row.get(idx).unwrap_or_default();

    let app_id: i64 = cell(cols.app_id)
        .trim()
        .parse()
        .with_context(|| format!("app_id `{}` is not an integer", cell(cols.app_id)))?;
    let is_free = parse_bool(cell(cols.is_free))
        .with_context(|| format!("is_free `{}` is not a boolean", cell(cols.is_free)))?;

    Ok(GameRecord {
        app_id,
        name: opt_text(cell(cols.name)),
        release_date: opt_text(cell(cols.release_date)),
        is_free,
        price_overview: price::normalize(cell(cols.price_overview)),
        languages: opt_text(cell(cols.languages)),
        kind: opt_text(cell(cols.kind)),
    })
}

/// Boolean coercion accepting pandas-style text (`True`/`False`) as well as
/// plain `true`/`false`/`1`/`0`.
fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(anyhow!("unrecognized boolean `{other}`")),
    }
}

/// Text cell with the `\N` sentinel and empty text mapped to `None`.
fn opt_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == price::NULL_SENTINEL {
        None
    } else {
        Some(trimmed.to_string())
    }
}
