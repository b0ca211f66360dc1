//! Remote document store contract.
//!
//! # Responsibility
//! - Describe the backend capability set the engine depends on, without
//!   naming any concrete backend.
//! - Carry the wire shape of one remote document.
//!
//! # Invariants
//! - Documents are keyed by the entry id (string-coerced, opaque to the
//!   backend).
//! - Subscription events are drained from the single logical thread of
//!   control; backends deliver them into a poll queue, never by re-entrant
//!   callback.

use crate::model::entry::Entry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Failure at the remote boundary.
///
/// All variants are absorbed into status/notice signals by the service
/// layer; none are fatal to the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// Backend not configured or unreachable.
    Unavailable(String),
    /// The live subscription could not be established or broke.
    Subscription(String),
    /// A full-collection write batch failed.
    Persist(String),
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable(message) => write!(f, "remote store unavailable: {message}"),
            Self::Subscription(message) => write!(f, "remote subscription failed: {message}"),
            Self::Persist(message) => write!(f, "remote persist failed: {message}"),
        }
    }
}

impl Error for RemoteError {}

/// Wire shape of one remote document.
///
/// The remote collection stores `{text, date, author}` under a document key
/// equal to the entry id; the key travels in `id` on this side of the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteDoc {
    pub id: String,
    pub text: String,
    pub date: DateTime<Utc>,
    /// Missing or `null` in the document maps to `None`.
    #[serde(default)]
    pub author: Option<String>,
}

impl From<&Entry> for RemoteDoc {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id.clone(),
            text: entry.text.clone(),
            date: entry.date,
            author: entry.author.clone(),
        }
    }
}

impl From<RemoteDoc> for Entry {
    fn from(doc: RemoteDoc) -> Self {
        Self {
            id: doc.id,
            text: doc.text,
            date: doc.date,
            author: doc.author,
        }
    }
}

/// One inbound notification from the live subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteEvent {
    /// Full current document set; delivered on every remote change and
    /// once immediately after subscribing.
    Snapshot(Vec<RemoteDoc>),
    /// Live updates stopped arriving; terminal for the session.
    SubscriptionError(String),
}

/// Handle to a live subscription on the remote collection.
pub trait RemoteSubscription {
    /// Drains events delivered since the last poll, oldest first.
    fn poll(&mut self) -> Vec<RemoteEvent>;

    /// Releases the subscription. Events delivered afterwards are dropped.
    fn close(&mut self);
}

/// Capability contract for a shared remote document collection.
///
/// The engine depends only on this set: snapshot subscription, batched
/// delete-all + write-all, and a one-shot full read.
pub trait RemoteStore {
    /// Human-readable backend name for diagnostics (e.g. "memory").
    fn backend_name(&self) -> &str;

    /// One-shot read of the full current document set.
    fn fetch_all(&self) -> RemoteResult<Vec<RemoteDoc>>;

    /// Atomic-intent replacement of the remote collection: deletes every
    /// existing document, then writes every given document keyed by its id,
    /// as a single all-or-nothing batch.
    fn replace_all(&self, docs: &[RemoteDoc]) -> RemoteResult<()>;

    /// Establishes a live subscription delivering [`RemoteEvent`]s.
    fn subscribe(&self) -> RemoteResult<Box<dyn RemoteSubscription>>;
}

/// Startup capability check result: either a usable backend handle or an
/// explicit "not configured" marker. Constructed once at startup and
/// consumed by [`crate::sync::engine::SyncEngine::new`], replacing ad hoc
/// probing of ambient globals.
pub enum RemoteSetup {
    Configured(Box<dyn RemoteStore>),
    Unconfigured,
}
