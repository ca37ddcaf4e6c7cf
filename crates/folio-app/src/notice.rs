//! Self-clearing confirmation messages

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// A message that clears itself after a fixed lifetime
///
/// Showing a new message cancels the pending clear of the previous one, so a
/// message always stays visible for the full lifetime.
#[derive(Debug)]
pub struct Notice {
    ttl: Duration,
    message: Arc<Mutex<String>>,
    generation: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
}

impl Notice {
    /// Create an empty notice
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            message: Arc::default(),
            generation: Arc::new(AtomicU64::new(0)),
            pending: None,
        }
    }

    /// Message lifetime
    #[inline]
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Message currently shown; empty when none
    #[must_use]
    pub fn current(&self) -> String {
        self.message.lock().clone()
    }

    /// Check if nothing is shown
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.message.lock().is_empty()
    }

    /// Show `message` and schedule its removal
    ///
    /// Outside a tokio runtime the message stays until replaced or cleared.
    pub fn show(&mut self, message: impl Into<String>) {
        self.cancel_pending();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.message.lock() = message.into();

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("no runtime, notice will not clear itself");
            return;
        };
        let ttl = self.ttl;
        let shown = Arc::clone(&self.message);
        let latest = Arc::clone(&self.generation);
        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(ttl).await;
            if latest.load(Ordering::SeqCst) == generation {
                shown.lock().clear();
            }
        }));
    }

    /// Remove the message now
    pub fn clear_now(&mut self) {
        self.cancel_pending();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.message.lock().clear();
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Notice {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}
