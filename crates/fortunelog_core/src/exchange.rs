//! File-based import and export of the fortune collection.
//!
//! # Responsibility
//! - Serialize the full collection to a dated, human-readable JSON document.
//! - Parse user-supplied documents into entry records, rejecting anything
//!   that is not a sequence of entry-shaped records.
//!
//! # Invariants
//! - Malformed input yields [`ExchangeError::InvalidFormat`], never a panic.
//! - Export is pure with respect to the collection; it writes exactly the
//!   entries it is given.

use crate::model::entry::Entry;
use chrono::{DateTime, Utc};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

pub type ExchangeResult<T> = Result<T, ExchangeError>;

/// Import/export failure.
#[derive(Debug)]
pub enum ExchangeError {
    /// The document is not a JSON sequence of entry-shaped records.
    InvalidFormat(String),
    /// The collection could not be serialized for export.
    Serialize(String),
    /// Reading or writing the document failed.
    Io(std::io::Error),
}

impl Display for ExchangeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFormat(message) => write!(f, "invalid import format: {message}"),
            Self::Serialize(message) => write!(f, "export serialization failed: {message}"),
            Self::Io(err) => write!(f, "import/export io error: {err}"),
        }
    }
}

impl Error for ExchangeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidFormat(_) => None,
            Self::Serialize(_) => None,
            Self::Io(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ExchangeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Export file name for the given instant: `fortunes-YYYY-MM-DD.json`.
pub fn export_file_name(as_of: DateTime<Utc>) -> String {
    format!("fortunes-{}.json", as_of.format("%Y-%m-%d"))
}

/// Writes the collection as pretty-printed JSON under `dir` and returns the
/// path of the written file.
pub fn export_to_dir(
    entries: &[Entry],
    dir: &Path,
    as_of: DateTime<Utc>,
) -> ExchangeResult<PathBuf> {
    let path = dir.join(export_file_name(as_of));
    let json = serde_json::to_string_pretty(entries)
        .map_err(|err| ExchangeError::Serialize(err.to_string()))?;
    fs::write(&path, json)?;
    Ok(path)
}

/// Reads and parses an import document from disk.
pub fn import_from_path(path: &Path) -> ExchangeResult<Vec<Entry>> {
    let raw = fs::read_to_string(path)?;
    parse_import(&raw)
}

/// Parses an import document.
///
/// # Errors
/// - `InvalidFormat` when the text is not JSON, the top-level value is not
///   an array, or any element is not entry-shaped (id, text, ISO-8601 date,
///   optional author).
pub fn parse_import(raw: &str) -> ExchangeResult<Vec<Entry>> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|err| ExchangeError::InvalidFormat(err.to_string()))?;
    if !value.is_array() {
        return Err(ExchangeError::InvalidFormat(
            "expected a top-level array of entries".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|err| ExchangeError::InvalidFormat(err.to_string()))
}
