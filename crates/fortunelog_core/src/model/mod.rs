//! Domain model for the fortune log.
//!
//! # Responsibility
//! - Define the canonical entry record shared by store, sync and exchange.
//! - Own text normalization and identifier generation rules.
//!
//! # Invariants
//! - Every entry is identified by a stable string `id`.
//! - Entry `text` is canonical: trimmed, uppercased, terminally punctuated.
//! - Entry `date` is immutable after creation.

pub mod entry;
