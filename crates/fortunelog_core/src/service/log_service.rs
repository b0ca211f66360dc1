//! Fortune log use-case service.
//!
//! # Responsibility
//! - Apply user actions optimistically to the local store, then mirror the
//!   full collection to the remote store.
//! - Convert remote failures into status and notice signals; never panic
//!   and never roll back a local mutation.
//!
//! # Invariants
//! - Control flow per mutation: store first, persist second.
//! - Remote snapshots drained by `pump` replace local state wholesale and
//!   mark the session `Synced`.
//! - A subscription error marks the session `Error` but keeps the
//!   last-known collection.

use crate::exchange::{self, ExchangeResult};
use crate::model::entry::{Entry, LogStats, SyncStatus};
use crate::store::log_store::{LogStore, SortKey};
use crate::sync::engine::{EngineState, SyncEngine};
use crate::sync::remote::{RemoteError, RemoteEvent, RemoteSetup};
use chrono::Utc;
use log::warn;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

/// Signal for the presentation layer's transient/persistent notices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    EntryAdded,
    EntryDeleted,
    Imported(usize),
    NothingToImport,
    Exported(PathBuf),
    /// A mutation's remote write batch failed; local state kept.
    PersistFailed(String),
    /// Live updates stopped arriving; terminal for the session.
    SyncFailed(String),
    /// Backend not configured or unreachable at startup.
    RemoteUnavailable(String),
}

/// The core the presentation layer talks to: local store + sync engine.
pub struct FortuneLog {
    store: LogStore,
    engine: SyncEngine,
    notices: VecDeque<Notice>,
    display_name: Option<String>,
}

impl FortuneLog {
    /// Builds the service from the startup remote capability check.
    pub fn new(setup: RemoteSetup) -> Self {
        Self {
            store: LogStore::new(),
            engine: SyncEngine::new(setup),
            notices: VecDeque::new(),
            display_name: None,
        }
    }

    /// Starts the remote subscription for this session.
    ///
    /// Startup failures become status `Error` plus a persistent advisory
    /// notice; the session continues with local state only.
    pub fn start(&mut self) {
        match self.engine.start() {
            Ok(()) => {
                self.store.set_status(SyncStatus::Loading);
            }
            Err(RemoteError::Unavailable(message)) => {
                self.store.set_status(SyncStatus::Error);
                self.notices.push_back(Notice::RemoteUnavailable(message));
            }
            Err(err) => {
                self.store.set_status(SyncStatus::Error);
                self.notices.push_back(Notice::SyncFailed(err.to_string()));
            }
        }
    }

    /// Drains inbound subscription events and applies them to local state.
    ///
    /// Called from the session's event loop. Each snapshot replaces the
    /// collection and marks the session `Synced`; a subscription error
    /// marks it `Error` and leaves the collection untouched.
    pub fn pump(&mut self) {
        for event in self.engine.poll() {
            match event {
                RemoteEvent::Snapshot(docs) => {
                    self.store
                        .replace_all(docs.into_iter().map(Entry::from).collect());
                    self.store.set_status(SyncStatus::Synced);
                }
                RemoteEvent::SubscriptionError(message) => {
                    self.store.set_status(SyncStatus::Error);
                    self.notices.push_back(Notice::SyncFailed(message));
                }
            }
        }
    }

    /// Releases the subscription at session end.
    pub fn stop(&mut self) {
        self.engine.stop();
    }

    /// Records a new fortune from raw user text.
    ///
    /// Blank input is silently ignored. The mutation is optimistic: the
    /// entry stays in local state even when the remote write fails.
    pub fn add(&mut self, raw_text: &str) -> Option<Entry> {
        let entry = self
            .store
            .add(raw_text, self.display_name.as_deref(), Utc::now())?;
        self.notices.push_back(Notice::EntryAdded);
        self.persist_collection();
        Some(entry)
    }

    /// Deletes the entry with the given id; a missing id is a no-op.
    pub fn delete(&mut self, id: &str) {
        if self.store.delete(id) {
            self.notices.push_back(Notice::EntryDeleted);
        }
        self.persist_collection();
    }

    /// Merges already-parsed candidate entries into the collection.
    ///
    /// Duplicate ids are silently dropped; persists only when something was
    /// actually appended.
    pub fn import_entries(&mut self, candidates: Vec<Entry>) -> usize {
        let imported = self
            .store
            .import_batch(candidates, self.display_name.as_deref());
        if imported > 0 {
            self.notices.push_back(Notice::Imported(imported));
            self.persist_collection();
        } else {
            self.notices.push_back(Notice::NothingToImport);
        }
        imported
    }

    /// Imports entries from a JSON document on disk.
    ///
    /// # Errors
    /// - `ExchangeError::InvalidFormat` when the document is not a sequence
    ///   of entry-shaped records; no state changes in that case.
    pub fn import_from(&mut self, path: &Path) -> ExchangeResult<usize> {
        let candidates = exchange::import_from_path(path)?;
        Ok(self.import_entries(candidates))
    }

    /// Exports the full collection to `fortunes-YYYY-MM-DD.json` under the
    /// given directory and returns the written path.
    pub fn export_to(&mut self, dir: &Path) -> ExchangeResult<PathBuf> {
        let path = exchange::export_to_dir(self.store.entries(), dir, Utc::now())?;
        self.notices.push_back(Notice::Exported(path.clone()));
        Ok(path)
    }

    /// Sets the default author for entries created from now on; existing
    /// entries are not touched.
    pub fn set_display_name(&mut self, name: Option<String>) {
        self.display_name = name
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Drains queued notices, oldest first.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub fn entries(&self) -> &[Entry] {
        self.store.entries()
    }

    pub fn status(&self) -> SyncStatus {
        self.store.status()
    }

    pub fn engine_state(&self) -> EngineState {
        self.engine.state()
    }

    pub fn stats(&self) -> LogStats {
        self.store.stats(Utc::now())
    }

    pub fn filtered_sorted(&self, search_term: &str, sort_key: SortKey) -> Vec<Entry> {
        self.store.filtered_sorted(search_term, sort_key)
    }

    pub fn duplicate_counts(&self) -> HashMap<String, usize> {
        self.store.duplicate_counts()
    }

    fn persist_collection(&mut self) {
        match self.engine.persist(self.store.entries()) {
            Ok(()) => {}
            // No backend for this session; the startup advisory already
            // covers it, so mutations stay local without extra notices.
            Err(RemoteError::Unavailable(message)) => {
                warn!("event=persist_skipped module=service error={message}");
            }
            Err(err) => {
                warn!("event=persist_dropped module=service error={err}");
                self.notices
                    .push_back(Notice::PersistFailed(err.to_string()));
            }
        }
    }
}
