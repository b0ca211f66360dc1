//! Local state layer.
//!
//! # Responsibility
//! - Hold the canonical in-memory collection for the current session.
//! - Provide derived reads (stats, filtered/sorted views) for presentation.
//!
//! # Invariants
//! - The store is the single source of truth the presentation layer reads.
//! - The store never talks to the remote; persistence is orchestrated by
//!   the service layer.

pub mod log_store;
