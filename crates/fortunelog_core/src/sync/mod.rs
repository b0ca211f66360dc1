//! Remote synchronization layer.
//!
//! # Responsibility
//! - Define the capability contract a remote document backend must provide
//!   (one-shot read, batched replace, push subscription).
//! - Drive the session subscription lifecycle and full-overwrite persistence.
//!
//! # Invariants
//! - Every inbound snapshot is authoritative; local state is replaced, not
//!   diffed.
//! - Remote failures never clear local data and never propagate as panics.

pub mod engine;
pub mod memory;
pub mod remote;
