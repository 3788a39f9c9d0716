//! Dataset loading
//!
//! Reads the log as a JSON array of entries, in the order written.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use thiserror::Error;

use crate::models::LogEntry;

/// Loading errors
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read food log: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed food log: {0}")]
    Json(#[from] serde_json::Error),

    #[error("food log contains no entries")]
    Empty,
}

/// Result type for loading
pub type LoadResult<T> = Result<T, LoadError>;

/// Parse entries from any reader
pub fn load_from_reader<R: Read>(reader: R) -> LoadResult<Vec<LogEntry>> {
    let entries: Vec<LogEntry> = serde_json::from_reader(reader)?;
    if entries.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(entries)
}

/// Parse entries from a JSON string
pub fn load_from_str(json: &str) -> LoadResult<Vec<LogEntry>> {
    load_from_reader(json.as_bytes())
}

/// Load entries from a file
pub fn load_from_path<P: AsRef<Path>>(path: P) -> LoadResult<Vec<LogEntry>> {
    let path = path.as_ref();
    tracing::debug!("Loading food log from {}", path.display());
    let file = File::open(path)?;
    let entries = load_from_reader(BufReader::new(file))?;
    tracing::info!("Loaded {} entries from {}", entries.len(), path.display());
    Ok(entries)
}
