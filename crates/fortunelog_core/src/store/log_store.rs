//! In-memory store for the session's fortune collection.
//!
//! # Responsibility
//! - Apply the four mutation requests: add, delete, import batch, replace.
//! - Compute derived reads without caching beyond a single call.
//!
//! # Invariants
//! - `import_batch` never introduces two entries with the same `id`,
//!   regardless of duplicates in the candidate input.
//! - `replace_all` trusts its caller; remote snapshots are authoritative.
//! - Display order is computed per read, never stored.

use crate::model::entry::{normalize_text, Entry, LogStats, SyncStatus};
use chrono::{DateTime, Datelike, Utc};
use log::{debug, info};
use std::collections::{HashMap, HashSet};

/// Sort order for [`LogStore::filtered_sorted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recent `date` first.
    #[default]
    Newest,
    /// Oldest `date` first.
    Oldest,
    /// Lexicographic by `text`, ascending.
    Alphabetical,
}

/// Canonical in-memory collection plus the session sync status signal.
#[derive(Debug)]
pub struct LogStore {
    entries: Vec<Entry>,
    status: SyncStatus,
}

impl Default for LogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LogStore {
    /// Creates an empty store; status starts at `Loading` until the first
    /// remote snapshot (or failure) arrives.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            status: SyncStatus::Loading,
        }
    }

    /// Current collection, in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    pub fn set_status(&mut self, status: SyncStatus) {
        self.status = status;
    }

    /// Appends a new entry built from raw user text.
    ///
    /// Blank input (after trimming) is silently ignored and returns `None`.
    /// The returned clone carries the normalized text and generated id.
    pub fn add(
        &mut self,
        raw_text: &str,
        author_default: Option<&str>,
        now: DateTime<Utc>,
    ) -> Option<Entry> {
        let entry = Entry::from_raw_text(raw_text, author_default, now)?;
        info!(
            "event=entry_added module=store id={} len={}",
            entry.id,
            entry.text.len()
        );
        self.entries.push(entry.clone());
        Some(entry)
    }

    /// Removes the entry with the given id; a missing id is a no-op.
    ///
    /// Returns whether an entry was actually removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        let removed = self.entries.len() < before;
        if removed {
            info!("event=entry_deleted module=store id={id}");
        } else {
            debug!("event=entry_delete_missing module=store id={id}");
        }
        removed
    }

    /// Merges imported candidates into the collection.
    ///
    /// # Contract
    /// - Candidates whose `id` already exists in the collection, or earlier
    ///   in the same batch, are silently dropped (no content merge).
    /// - Survivors get normalized text and, when `author` is absent, the
    ///   provided default.
    /// - Returns the number of entries appended.
    pub fn import_batch(&mut self, candidates: Vec<Entry>, author_default: Option<&str>) -> usize {
        let mut seen: HashSet<String> =
            self.entries.iter().map(|entry| entry.id.clone()).collect();
        let mut imported = 0;

        for mut candidate in candidates {
            if !seen.insert(candidate.id.clone()) {
                debug!(
                    "event=import_duplicate_skipped module=store id={}",
                    candidate.id
                );
                continue;
            }
            candidate.text = normalize_text(&candidate.text);
            if candidate.author.is_none() {
                candidate.author = author_default.map(str::to_string);
            }
            self.entries.push(candidate);
            imported += 1;
        }

        info!("event=import_merged module=store imported={imported}");
        imported
    }

    /// Unconditionally replaces the collection with a remote snapshot.
    ///
    /// No shape validation happens here; the sync boundary is trusted and
    /// every inbound snapshot is authoritative (last snapshot wins).
    pub fn replace_all(&mut self, new_entries: Vec<Entry>) {
        debug!(
            "event=collection_replaced module=store before={} after={}",
            self.entries.len(),
            new_entries.len()
        );
        self.entries = new_entries;
    }

    /// Collection counters relative to the given instant's calendar
    /// month and year. Pure; recomputed on every call.
    pub fn stats(&self, as_of: DateTime<Utc>) -> LogStats {
        let month = as_of.month();
        let year = as_of.year();
        let mut stats = LogStats {
            total: self.entries.len(),
            ..LogStats::default()
        };
        for entry in &self.entries {
            if entry.date.year() == year {
                stats.this_year += 1;
                if entry.date.month() == month {
                    stats.this_month += 1;
                }
            }
        }
        stats
    }

    /// Case-insensitive substring filter on `text`, then a stable sort.
    ///
    /// Ties keep insertion order (`sort_by` is stable).
    pub fn filtered_sorted(&self, search_term: &str, sort_key: SortKey) -> Vec<Entry> {
        let needle = search_term.to_lowercase();
        let mut filtered: Vec<Entry> = self
            .entries
            .iter()
            .filter(|entry| entry.text.to_lowercase().contains(&needle))
            .cloned()
            .collect();

        match sort_key {
            SortKey::Newest => filtered.sort_by(|a, b| b.date.cmp(&a.date)),
            SortKey::Oldest => filtered.sort_by(|a, b| a.date.cmp(&b.date)),
            SortKey::Alphabetical => filtered.sort_by(|a, b| a.text.cmp(&b.text)),
        }

        filtered
    }

    /// Occurrence count per lowercased trimmed text, for repeat-fortune
    /// badges in the presentation layer.
    pub fn duplicate_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for entry in &self.entries {
            *counts
                .entry(entry.text.trim().to_lowercase())
                .or_insert(0usize) += 1;
        }
        counts
    }
}
