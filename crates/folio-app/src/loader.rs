//! Load orchestration
//!
//! Decides where the displayed records come from and drives the renderer.
//!
//! ```text
//!   startup ──► store empty? ──yes──► seed.fetch ──► store.replace_all
//!
//!   load_local ──► store.list_all ──(empty)──► seed ──┐
//!                         │                           ▼
//!                         └──────────────► normalize ──► render ──► container
//!
//!   load_remote ──► remote.fetch ──► normalize ──► render ──► container
//! ```
//!
//! Every load publishes its progress as a [`LoadStatus`]. Loads are not
//! serialized: when two overlap, whichever finishes last owns the container
//! and the status.

use crate::error::FetchError;
use crate::source::ProjectSource;
use folio_model::{normalize_all, RawProjectRecord};
use folio_render::{render, Container, RenderOutcome};
use folio_store::{KeyValueStore, ProjectStore};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

/// Where a successful load took its records from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// The persisted store (possibly just seeded)
    Local,
    /// The configured remote endpoint
    Remote,
}

/// Progress of the most recent load
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    /// Nothing loaded yet
    #[default]
    Idle,
    /// A load is in flight
    Loading,
    /// Records were rendered
    Loaded { count: usize, origin: LoadOrigin },
    /// Remote load requested without a remote endpoint
    RemoteNotConfigured,
    /// The load failed; the container was left untouched
    Failed { reason: String },
}

impl LoadStatus {
    /// Check if this is a failure
    #[inline]
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => Ok(()),
            Self::Loading => f.write_str("Loading projects…"),
            Self::Loaded {
                count,
                origin: LoadOrigin::Local,
            } => write!(f, "Loaded {count} projects from local storage."),
            Self::Loaded {
                count,
                origin: LoadOrigin::Remote,
            } => write!(f, "Loaded {count} projects from remote."),
            Self::RemoteNotConfigured => f.write_str("Remote source not configured."),
            Self::Failed { reason } => write!(f, "Failed to load projects: {reason}"),
        }
    }
}

/// Drives loading records into a container
pub struct LoadOrchestrator<K, C> {
    store: ProjectStore<K>,
    seed: Arc<dyn ProjectSource>,
    remote: Option<Arc<dyn ProjectSource>>,
    container: Mutex<C>,
    status: watch::Sender<LoadStatus>,
}

impl<K, C> fmt::Debug for LoadOrchestrator<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOrchestrator")
            .field("seed", &self.seed.describe())
            .field("remote", &self.remote.as_ref().map(|r| r.describe()))
            .field("status", &*self.status.borrow())
            .finish_non_exhaustive()
    }
}

impl<K, C> LoadOrchestrator<K, C>
where
    K: KeyValueStore,
    C: Container,
{
    /// Create an orchestrator without a remote source
    pub fn new(store: ProjectStore<K>, seed: Arc<dyn ProjectSource>, container: C) -> Self {
        let (status, _) = watch::channel(LoadStatus::Idle);
        Self {
            store,
            seed,
            remote: None,
            container: Mutex::new(container),
            status,
        }
    }

    /// With remote source
    #[inline]
    #[must_use]
    pub fn with_remote(mut self, remote: Arc<dyn ProjectSource>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// With remote source, if one is configured
    #[inline]
    #[must_use]
    pub fn with_optional_remote(mut self, remote: Option<Arc<dyn ProjectSource>>) -> Self {
        self.remote = remote;
        self
    }

    /// Project store being loaded from
    #[inline]
    #[must_use]
    pub fn store(&self) -> &ProjectStore<K> {
        &self.store
    }

    /// Current status
    #[must_use]
    pub fn status(&self) -> LoadStatus {
        self.status.borrow().clone()
    }

    /// Watch status changes
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<LoadStatus> {
        self.status.subscribe()
    }

    /// Inspect the container
    pub fn with_container<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&self.container.lock())
    }

    /// Take the container back
    pub fn into_container(self) -> C {
        self.container.into_inner()
    }

    fn set_status(&self, status: LoadStatus) -> LoadStatus {
        debug!(status = %status, "load status");
        self.status.send_replace(status.clone());
        status
    }

    /// Fetch the seed and persist it verbatim
    async fn seed_store(&self) -> Result<Vec<RawProjectRecord>, FetchError> {
        let records = self.seed.fetch().await?;
        self.store.replace_all(&records);
        info!(
            source = %self.seed.describe(),
            count = records.len(),
            "seeded project store"
        );
        Ok(records)
    }

    fn show(&self, records: &[RawProjectRecord], origin: LoadOrigin) -> LoadStatus {
        let projects = normalize_all(records);
        let outcome = render(&mut *self.container.lock(), &projects);
        if outcome == RenderOutcome::Empty {
            debug!(?origin, "no projects to show");
        }
        info!(count = outcome.count(), ?origin, "loaded projects");
        self.set_status(LoadStatus::Loaded {
            count: outcome.count(),
            origin,
        })
    }

    /// Seed the store if it is empty
    ///
    /// Returns whether seeding happened. A non-empty store is never
    /// overwritten.
    ///
    /// # Errors
    /// The seed source could not be fetched; the store is left as it was.
    pub async fn startup(&self) -> Result<bool, FetchError> {
        if !self.store.is_empty() {
            debug!(key = %self.store.key(), "project store already populated");
            return Ok(false);
        }
        match self.seed_store().await {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!(source = %self.seed.describe(), error = %e, "could not seed project store");
                Err(e)
            }
        }
    }

    /// Render the persisted records, seeding first when the store is empty
    ///
    /// An unreadable store reads as empty, so it is reseeded.
    pub async fn load_local(&self) -> LoadStatus {
        self.set_status(LoadStatus::Loading);

        let mut records = self.store.list_all();
        if records.is_empty() {
            match self.seed_store().await {
                Ok(seeded) => records = seeded,
                Err(e) => {
                    error!(source = %self.seed.describe(), error = %e, "local load failed");
                    return self.set_status(LoadStatus::Failed {
                        reason: e.to_string(),
                    });
                }
            }
        }
        self.show(&records, LoadOrigin::Local)
    }

    /// Render the records served by the remote source
    ///
    /// Without a remote source this only reports
    /// [`LoadStatus::RemoteNotConfigured`]. On failure the container keeps its
    /// previous content.
    pub async fn load_remote(&self) -> LoadStatus {
        let Some(remote) = self.remote.clone() else {
            info!("remote load requested without a remote source");
            return self.set_status(LoadStatus::RemoteNotConfigured);
        };

        self.set_status(LoadStatus::Loading);
        match remote.fetch().await {
            Ok(records) => self.show(&records, LoadOrigin::Remote),
            Err(e) => {
                error!(source = %remote.describe(), error = %e, "remote load failed");
                self.set_status(LoadStatus::Failed {
                    reason: e.to_string(),
                })
            }
        }
    }
}
