//! Wiring from configuration to components

use crate::config::FolioConfig;
use crate::editor::ProjectEditor;
use crate::error::FolioResult;
use crate::loader::LoadOrchestrator;
use crate::preference::{PreferenceSync, ThemeController, ToggleGroup};
use crate::source::{source_from_location, ProjectSource};
use folio_render::Container;
use folio_store::{FileStore, KeyValueStore, ProjectStore};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Configured components sharing one key/value store
#[derive(Clone)]
pub struct FolioApp<K> {
    config: FolioConfig,
    kv: K,
    seed: Arc<dyn ProjectSource>,
    remote: Option<Arc<dyn ProjectSource>>,
}

impl<K: fmt::Debug> fmt::Debug for FolioApp<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FolioApp")
            .field("config", &self.config)
            .field("kv", &self.kv)
            .field("seed", &self.seed.describe())
            .field("remote", &self.remote.as_ref().map(|r| r.describe()))
            .finish()
    }
}

impl FolioApp<Arc<FileStore>> {
    /// Open the app with its file-backed store at `config.data_file`
    ///
    /// # Errors
    /// A configured HTTP source cannot be set up.
    pub fn open(config: FolioConfig) -> FolioResult<Self> {
        let kv = Arc::new(FileStore::open(&config.data_file));
        debug!(path = %config.data_file.display(), "opened data file");
        Self::with_store(config, kv)
    }
}

impl<K: KeyValueStore + Clone> FolioApp<K> {
    /// Build the app over an existing store
    ///
    /// # Errors
    /// A configured HTTP source cannot be set up.
    pub fn with_store(config: FolioConfig, kv: K) -> FolioResult<Self> {
        let timeout = config.fetch_timeout();
        let seed = source_from_location(&config.seed, timeout)?;
        let remote = config
            .remote_url
            .as_deref()
            .map(|url| source_from_location(url, timeout))
            .transpose()?;
        Ok(Self {
            config,
            kv,
            seed,
            remote,
        })
    }

    /// Replace the configured sources
    #[must_use]
    pub fn with_sources(
        mut self,
        seed: Arc<dyn ProjectSource>,
        remote: Option<Arc<dyn ProjectSource>>,
    ) -> Self {
        self.seed = seed;
        self.remote = remote;
        self
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &FolioConfig {
        &self.config
    }

    /// Shared key/value store
    #[inline]
    #[must_use]
    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Project list under the configured key
    #[must_use]
    pub fn project_store(&self) -> ProjectStore<K> {
        ProjectStore::new(self.kv.clone(), self.config.projects_key.clone())
    }

    /// Loader rendering into `container`
    #[must_use]
    pub fn orchestrator<C: Container>(&self, container: C) -> LoadOrchestrator<K, C> {
        LoadOrchestrator::new(self.project_store(), Arc::clone(&self.seed), container)
            .with_optional_remote(self.remote.clone())
    }

    /// Project editor
    #[must_use]
    pub fn editor(&self) -> ProjectEditor<K> {
        ProjectEditor::new(self.project_store(), self.config.confirmation_ttl())
    }

    /// Theme preference under the configured key
    #[must_use]
    pub fn preference(&self) -> PreferenceSync<K> {
        PreferenceSync::new(self.kv.clone(), self.config.theme_key.clone())
    }

    /// Theme controller for `toggles` toggles, with the stored preference applied
    #[must_use]
    pub fn theme(&self, toggles: usize) -> ThemeController<K> {
        let mut controller = ThemeController::new(self.preference(), ToggleGroup::with_toggles(toggles));
        controller.attach();
        controller
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::LoadStatus;
    use folio_render::ProjectGrid;
    use folio_store::MemoryStore;

    #[tokio::test]
    async fn file_seed_and_data_file() {
        let dir = tempfile::tempdir().unwrap();
        let seed = dir.path().join("projects.json");
        std::fs::write(&seed, r#"[{"title":"Seeded"}]"#).unwrap();

        let config = FolioConfig::new()
            .with_seed(seed.display().to_string())
            .with_data_file(dir.path().join("data.json"));
        let app = FolioApp::open(config).unwrap();

        let loader = app.orchestrator(ProjectGrid::default());
        assert_eq!(
            loader.load_local().await.to_string(),
            "Loaded 1 projects from local storage."
        );
        assert_eq!(loader.load_remote().await, LoadStatus::RemoteNotConfigured);

        let reopened = FolioApp::open(app.config().clone()).unwrap();
        assert_eq!(reopened.project_store().len(), 1);
    }

    #[test]
    fn components_share_the_store() {
        let kv = Arc::new(MemoryStore::new());
        let app = FolioApp::with_store(FolioConfig::new(), Arc::clone(&kv)).unwrap();

        app.preference().write(true);
        assert!(app.theme(2).group().all(true));

        app.project_store()
            .create(folio_model::RawProjectRecord::new().with_title("A"));
        assert_eq!(app.editor().select_options().len(), 2);
        assert_eq!(kv.len(), 2);
    }
}
