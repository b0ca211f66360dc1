//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `fortunelog_core` linkage.
//! - Run one add through the full subscription loop against the in-process
//!   backend for quick local sanity checks.

use fortunelog_core::{FortuneLog, MemoryRemoteStore, RemoteSetup};

fn main() {
    println!("fortunelog_core version={}", fortunelog_core::core_version());

    let remote = MemoryRemoteStore::new();
    let mut journal = FortuneLog::new(RemoteSetup::Configured(Box::new(remote)));
    journal.start();
    journal.pump();
    journal.add("the smoke test will pass");
    journal.pump();

    println!(
        "entries={} status={:?} state={:?}",
        journal.entries().len(),
        journal.status(),
        journal.engine_state()
    );
    journal.stop();
}
