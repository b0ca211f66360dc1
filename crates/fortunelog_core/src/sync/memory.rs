//! In-process remote store backend.
//!
//! # Responsibility
//! - Provide a fully local [`RemoteStore`] for single-device use and tests.
//! - Echo every committed batch to all live subscriptions, including the
//!   writer's own, matching the shared-collection push model.
//!
//! # Invariants
//! - `subscribe` delivers an initial snapshot of the current document set
//!   before any further events.
//! - Cloned handles share one underlying collection; a write through one
//!   handle is observed by subscribers of every handle.

use crate::sync::remote::{
    RemoteDoc, RemoteError, RemoteEvent, RemoteResult, RemoteStore, RemoteSubscription,
};
use std::collections::BTreeMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex, MutexGuard};

struct Inner {
    docs: BTreeMap<String, RemoteDoc>,
    subscribers: Vec<Sender<RemoteEvent>>,
    fail_persist: bool,
    fail_subscribe: bool,
}

/// Shared in-memory document collection behind the [`RemoteStore`] contract.
///
/// Cloning yields another handle onto the same collection, which is how
/// tests simulate a second device on the shared store.
#[derive(Clone)]
pub struct MemoryRemoteStore {
    inner: Arc<Mutex<Inner>>,
}

impl Default for MemoryRemoteStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRemoteStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                docs: BTreeMap::new(),
                subscribers: Vec::new(),
                fail_persist: false,
                fail_subscribe: false,
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A poisoned lock still holds a coherent document map.
        self.inner.lock().unwrap_or_else(|err| err.into_inner())
    }

    /// Makes every following `replace_all` fail until cleared. Harness hook
    /// for exercising the persist-failure path.
    pub fn set_persist_failure(&self, fail: bool) {
        self.lock().fail_persist = fail;
    }

    /// Makes every following `subscribe` fail until cleared.
    pub fn set_subscribe_failure(&self, fail: bool) {
        self.lock().fail_subscribe = fail;
    }

    /// Pushes a subscription error to every live subscriber.
    pub fn inject_subscription_error(&self, message: &str) {
        let mut inner = self.lock();
        let event = RemoteEvent::SubscriptionError(message.to_string());
        inner
            .subscribers
            .retain(|subscriber| subscriber.send(event.clone()).is_ok());
    }

    /// Number of documents currently in the shared collection.
    pub fn doc_count(&self) -> usize {
        self.lock().docs.len()
    }
}

impl RemoteStore for MemoryRemoteStore {
    fn backend_name(&self) -> &str {
        "memory"
    }

    fn fetch_all(&self) -> RemoteResult<Vec<RemoteDoc>> {
        Ok(self.lock().docs.values().cloned().collect())
    }

    fn replace_all(&self, docs: &[RemoteDoc]) -> RemoteResult<()> {
        let mut inner = self.lock();
        if inner.fail_persist {
            return Err(RemoteError::Persist(
                "write batch rejected by backend".to_string(),
            ));
        }

        // Delete-all + write-all committed as one step.
        inner.docs = docs
            .iter()
            .map(|doc| (doc.id.clone(), doc.clone()))
            .collect();

        let snapshot = RemoteEvent::Snapshot(inner.docs.values().cloned().collect());
        inner
            .subscribers
            .retain(|subscriber| subscriber.send(snapshot.clone()).is_ok());
        Ok(())
    }

    fn subscribe(&self) -> RemoteResult<Box<dyn RemoteSubscription>> {
        let mut inner = self.lock();
        if inner.fail_subscribe {
            return Err(RemoteError::Subscription(
                "backend refused subscription".to_string(),
            ));
        }

        let (sender, receiver) = channel();
        let initial = RemoteEvent::Snapshot(inner.docs.values().cloned().collect());
        // The channel cannot be disconnected yet; ignore the send result.
        let _ = sender.send(initial);
        inner.subscribers.push(sender);

        Ok(Box::new(MemorySubscription {
            receiver: Some(receiver),
        }))
    }
}

struct MemorySubscription {
    receiver: Option<Receiver<RemoteEvent>>,
}

impl RemoteSubscription for MemorySubscription {
    fn poll(&mut self) -> Vec<RemoteEvent> {
        match self.receiver.as_ref() {
            Some(receiver) => receiver.try_iter().collect(),
            None => Vec::new(),
        }
    }

    fn close(&mut self) {
        // Dropping the receiver disconnects the sender; the store prunes it
        // on its next send attempt.
        self.receiver = None;
    }
}
