//! In-memory record dataset loaded from CSV.
//!
//! The first CSV row supplies the column names. Each later row becomes a JSON object of
//! column name to string value, keeping column order. Rows may be ragged: missing trailing
//! cells are left out, and cells beyond the header are named `_<index>`. A repeated column
//! name keeps its first position and the value of its last occurrence.
//!
//! The file is decoded as UTF-8 with a leading byte-order mark removed and invalid bytes
//! replaced by U+FFFD.

use serde_json::{Map, Value};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Field that identifies a record in `/records/:id` lookups.
pub const RECORD_ID_FIELD: &str = "NAMC_ID";

pub type Row = Map<String, Value>;

/// Shared, lock-guarded record list.
pub type Dataset = Arc<RwLock<Vec<Row>>>;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read records CSV {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed records CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid record service configuration: {0}")]
    InvalidConfig(String),
}

/// Read and parse the CSV at `path`.
///
/// # Errors
///
/// Returns [`DatasetError::Read`] if the file cannot be read, or [`DatasetError::Csv`] if
/// it cannot be tokenised.
pub fn load_csv(path: &Path) -> Result<Vec<Row>, DatasetError> {
    let bytes = std::fs::read(path).map_err(|source| DatasetError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let rows = parse_csv(&bytes)?;
    tracing::info!("loaded {} records from {}", rows.len(), path.display());
    Ok(rows)
}

/// Parse raw CSV bytes into rows.
///
/// # Errors
///
/// Returns [`DatasetError::Csv`] if the input cannot be tokenised.
pub fn parse_csv(bytes: &[u8]) -> Result<Vec<Row>, DatasetError> {
    let decoded = String::from_utf8_lossy(bytes);
    let text = decoded.strip_prefix('\u{feff}').unwrap_or(&decoded);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = Row::new();
        for (i, cell) in record.iter().enumerate() {
            let name = headers
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("_{i}"));
            row.insert(name, Value::String(cell.to_string()));
        }
        rows.push(row);
    }

    Ok(rows)
}

/// Position of the first row whose id field is the string `id`.
pub(crate) fn position_of(rows: &[Row], id: &str) -> Option<usize> {
    rows.iter()
        .position(|row| row.get(RECORD_ID_FIELD).and_then(Value::as_str) == Some(id))
}
