//! Fortune entry domain model.
//!
//! # Responsibility
//! - Define the canonical record stored locally and mirrored remotely.
//! - Provide normalization and identifier helpers used by every write path.
//!
//! # Invariants
//! - `id` is stable for the entry lifetime and unique within a collection
//!   as maintained at import time.
//! - `text` always ends in one of `.`, `!`, `?` after normalization.
//! - `date` is set at creation and never rewritten.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static TERMINAL_PUNCTUATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]$").expect("terminal punctuation pattern is valid"));

/// One recorded fortune.
///
/// The same shape is used for local state, the remote document payload and
/// the export/import interchange format, so `author` serializes as an
/// explicit `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Stable identifier, decimal epoch milliseconds at creation time.
    pub id: String,
    /// Canonical fortune text (see [`normalize_text`]).
    pub text: String,
    /// Creation instant; serialized as an RFC 3339 / ISO-8601 string.
    pub date: DateTime<Utc>,
    /// Optional display name of whoever recorded the entry.
    #[serde(default)]
    pub author: Option<String>,
}

impl Entry {
    /// Creates an entry from raw user text at the given instant.
    ///
    /// Returns `None` when the text is blank after trimming; blank input is
    /// silently ignored rather than treated as an error.
    pub fn from_raw_text(
        raw_text: &str,
        author_default: Option<&str>,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let text = normalize_text(raw_text);
        if text.is_empty() {
            return None;
        }
        Some(Self {
            id: generate_entry_id(now),
            text,
            date: now,
            author: author_default.map(str::to_string),
        })
    }
}

/// Normalizes raw fortune text to its canonical stored form.
///
/// # Contract
/// - Trims surrounding whitespace and uppercases the remainder.
/// - Appends `.` unless the text already ends in `.`, `!` or `?`.
/// - Blank input stays the empty string.
/// - Idempotent: `normalize_text(normalize_text(s)) == normalize_text(s)`.
pub fn normalize_text(raw_text: &str) -> String {
    let mut text = raw_text.trim().to_uppercase();
    if !text.is_empty() && !TERMINAL_PUNCTUATION.is_match(&text) {
        text.push('.');
    }
    text
}

/// Generates an entry identifier from the given instant.
///
/// Ids are decimal milliseconds since the Unix epoch. Two creations within
/// the same millisecond produce the same id; collisions are not resolved
/// here and duplicate ids are only filtered at import time.
pub fn generate_entry_id(now: DateTime<Utc>) -> String {
    now.timestamp_millis().to_string()
}

/// Health of the connection to the remote collection.
///
/// Ephemeral, derived per session; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncStatus {
    /// Waiting for the first remote snapshot.
    Loading,
    /// Live subscription healthy, local state mirrors the remote.
    Synced,
    /// Remote unreachable or the subscription broke; local state kept.
    Error,
}

/// Collection counters for the stats bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogStats {
    pub total: usize,
    pub this_month: usize,
    pub this_year: usize,
}
