//! Session lifecycle for the remote subscription and persistence.
//!
//! # Responsibility
//! - Own the `Uninitialized -> Connecting -> {Subscribed, Failed}` state
//!   machine for one session.
//! - Translate local collections into full-overwrite remote batches.
//!
//! # Invariants
//! - `Failed` is terminal; there is no automatic retry or reconnect.
//! - The first snapshot moves `Connecting` to `Subscribed`; later snapshots
//!   keep it there.
//! - A failed persist is reported, never retried, and never rolls back the
//!   local mutation that triggered it.

use crate::model::entry::Entry;
use crate::sync::remote::{
    RemoteDoc, RemoteError, RemoteEvent, RemoteResult, RemoteSetup, RemoteStore,
    RemoteSubscription,
};
use log::{error, info, warn};

/// Connection lifecycle of the engine within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    /// Constructed, `start` not yet called.
    Uninitialized,
    /// Subscription established, waiting for the first snapshot.
    Connecting,
    /// Live; every inbound snapshot replaces local state.
    Subscribed,
    /// Terminal for the session: unconfigured backend, subscribe failure,
    /// or a broken subscription.
    Failed,
}

/// Bridges the local store to a remote shared document collection.
pub struct SyncEngine {
    remote: Option<Box<dyn RemoteStore>>,
    subscription: Option<Box<dyn RemoteSubscription>>,
    state: EngineState,
}

impl SyncEngine {
    /// Builds an engine from the startup capability check.
    pub fn new(setup: RemoteSetup) -> Self {
        let remote = match setup {
            RemoteSetup::Configured(store) => Some(store),
            RemoteSetup::Unconfigured => None,
        };
        Self {
            remote,
            subscription: None,
            state: EngineState::Uninitialized,
        }
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Establishes the live subscription. Called once per session.
    ///
    /// # Errors
    /// - `RemoteError::Unavailable` when no backend is configured.
    /// - `RemoteError::Subscription` when the backend rejects the
    ///   subscription. Both leave the engine in `Failed`.
    pub fn start(&mut self) -> RemoteResult<()> {
        let Some(remote) = self.remote.as_ref() else {
            self.state = EngineState::Failed;
            warn!("event=sync_start module=sync status=unconfigured");
            return Err(RemoteError::Unavailable(
                "no remote backend configured".to_string(),
            ));
        };

        match remote.subscribe() {
            Ok(subscription) => {
                info!(
                    "event=sync_start module=sync status=ok backend={}",
                    remote.backend_name()
                );
                self.subscription = Some(subscription);
                self.state = EngineState::Connecting;
                Ok(())
            }
            Err(err) => {
                error!("event=sync_start module=sync status=error error={err}");
                self.state = EngineState::Failed;
                Err(err)
            }
        }
    }

    /// Drains pending subscription events and advances the state machine.
    ///
    /// The caller applies returned snapshots to the local store; the engine
    /// only tracks connection state here. `Failed` is terminal: the first
    /// subscription error releases the subscription, events queued behind it
    /// are dropped, and every later poll returns nothing.
    pub fn poll(&mut self) -> Vec<RemoteEvent> {
        if self.state == EngineState::Failed {
            return Vec::new();
        }
        let Some(subscription) = self.subscription.as_mut() else {
            return Vec::new();
        };

        let mut delivered = Vec::new();
        for event in subscription.poll() {
            match &event {
                RemoteEvent::Snapshot(docs) => {
                    if self.state == EngineState::Connecting {
                        info!(
                            "event=sync_subscribed module=sync docs={}",
                            docs.len()
                        );
                    }
                    self.state = EngineState::Subscribed;
                    delivered.push(event);
                }
                RemoteEvent::SubscriptionError(message) => {
                    error!("event=sync_subscription_lost module=sync error={message}");
                    self.state = EngineState::Failed;
                    delivered.push(event);
                    break;
                }
            }
        }

        if self.state == EngineState::Failed {
            if let Some(mut subscription) = self.subscription.take() {
                subscription.close();
            }
        }
        delivered
    }

    /// Mirrors the full local collection to the remote store.
    ///
    /// Full clear-and-rewrite: O(collection size) writes per mutation, one
    /// all-or-nothing batch. The engine's own write echoes back through the
    /// subscription; a slow round-trip can transiently revert a newer local
    /// mutation until its own snapshot arrives (last snapshot wins).
    pub fn persist(&self, entries: &[Entry]) -> RemoteResult<()> {
        let Some(remote) = self.remote.as_ref() else {
            return Err(RemoteError::Unavailable(
                "no remote backend configured".to_string(),
            ));
        };

        let docs: Vec<RemoteDoc> = entries.iter().map(RemoteDoc::from).collect();
        match remote.replace_all(&docs) {
            Ok(()) => {
                info!("event=persist module=sync status=ok docs={}", docs.len());
                Ok(())
            }
            Err(err) => {
                error!("event=persist module=sync status=error error={err}");
                Err(err)
            }
        }
    }

    /// Releases the subscription at session end.
    ///
    /// In-flight persists are not cancelled; their echoes are simply never
    /// polled again.
    pub fn stop(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.close();
            info!("event=sync_stop module=sync status=ok");
        }
    }
}
