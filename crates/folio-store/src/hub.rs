//! Shared storage seen from several contexts
//!
//! A [`StorageHub`] wraps one backend and hands out a [`ContextStore`] per
//! open context, such as one browser tab. Writes through a
//! context that change a value are broadcast as [`StorageEvent`]s; every
//! *other* context can observe them, the writer never sees its own.
//!
//! ```text
//!   ContextStore(A) ──set──► backend
//!         │
//!         └──► broadcast ──► StorageEvents(B), StorageEvents(C)
//! ```

use crate::error::KvError;
use crate::kv::KeyValueStore;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::{debug, warn};

/// Capacity of the change-notification channel
const EVENT_CAPACITY: usize = 64;

/// Identifier of one context attached to a hub
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ctx-{}", self.0)
    }
}

/// Change notification for one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// Key that changed
    pub key: String,
    /// Value before the change
    pub old_value: Option<String>,
    /// Value after the change; `None` when removed
    pub new_value: Option<String>,
    /// Context that made the change
    pub origin: ContextId,
}

/// One storage backend shared by several contexts
pub struct StorageHub {
    backend: Arc<dyn KeyValueStore + Send + Sync>,
    events: broadcast::Sender<StorageEvent>,
    next_context: AtomicU64,
}

impl fmt::Debug for StorageHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageHub")
            .field("subscribers", &self.events.receiver_count())
            .field("next_context", &self.next_context)
            .finish_non_exhaustive()
    }
}

impl StorageHub {
    /// Create a hub over `backend`
    #[must_use]
    pub fn new<K>(backend: K) -> Arc<Self>
    where
        K: KeyValueStore + Send + Sync + 'static,
    {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Arc::new(Self {
            backend: Arc::new(backend),
            events,
            next_context: AtomicU64::new(1),
        })
    }

    /// Attach a new context
    #[must_use]
    pub fn open_context(self: &Arc<Self>) -> ContextStore {
        let id = ContextId(self.next_context.fetch_add(1, Ordering::Relaxed));
        debug!(context = %id, "opened storage context");
        ContextStore {
            id,
            hub: Arc::clone(self),
        }
    }

    fn publish(&self, event: StorageEvent) {
        // No subscribers is fine: nobody else is listening.
        let _ = self.events.send(event);
    }
}

/// A context's view of the shared storage
#[derive(Debug, Clone)]
pub struct ContextStore {
    id: ContextId,
    hub: Arc<StorageHub>,
}

impl ContextStore {
    /// This context's identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Listen for changes made by other contexts
    ///
    /// Only changes published after this call are observed.
    #[must_use]
    pub fn subscribe(&self) -> StorageEvents {
        StorageEvents {
            owner: self.id,
            rx: self.hub.events.subscribe(),
        }
    }
}

impl KeyValueStore for ContextStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        self.hub.backend.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let old_value = self.hub.backend.get(key)?;
        self.hub.backend.set(key, value)?;
        if old_value.as_deref() != Some(value) {
            self.hub.publish(StorageEvent {
                key: key.to_string(),
                old_value,
                new_value: Some(value.to_string()),
                origin: self.id,
            });
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        let old_value = self.hub.backend.get(key)?;
        self.hub.backend.remove(key)?;
        if old_value.is_some() {
            self.hub.publish(StorageEvent {
                key: key.to_string(),
                old_value,
                new_value: None,
                origin: self.id,
            });
        }
        Ok(())
    }
}

/// Stream of storage changes made by other contexts
#[derive(Debug)]
pub struct StorageEvents {
    owner: ContextId,
    rx: broadcast::Receiver<StorageEvent>,
}

impl StorageEvents {
    /// Next pending event, without waiting
    pub fn try_next(&mut self) -> Option<StorageEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) if event.origin == self.owner => continue,
                Ok(event) => return Some(event),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!(context = %self.owner, skipped, "storage events dropped");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Wait for the next event; `None` once the hub is gone
    pub async fn next(&mut self) -> Option<StorageEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) if event.origin == self.owner => continue,
                Ok(event) => return Some(event),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(context = %self.owner, skipped, "storage events dropped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Drain every pending event
    pub fn drain(&mut self) -> Vec<StorageEvent> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}
