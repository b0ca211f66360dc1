//! Core domain logic for FortuneLog.
//! This crate is the single source of truth for the fortune collection and
//! its synchronization with a shared remote document store.

pub mod exchange;
pub mod logging;
pub mod model;
pub mod prefs;
pub mod service;
pub mod store;
pub mod sync;

pub use exchange::{ExchangeError, ExchangeResult};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::entry::{generate_entry_id, normalize_text, Entry, LogStats, SyncStatus};
pub use prefs::{Preferences, PrefsError, PrefsResult};
pub use service::log_service::{FortuneLog, Notice};
pub use store::log_store::{LogStore, SortKey};
pub use sync::engine::{EngineState, SyncEngine};
pub use sync::memory::MemoryRemoteStore;
pub use sync::remote::{
    RemoteDoc, RemoteError, RemoteEvent, RemoteResult, RemoteSetup, RemoteStore,
    RemoteSubscription,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
