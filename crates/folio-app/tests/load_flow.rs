//! Functional tests for loading projects into a container.
//!
//! Core guarantees exercised here:
//! - An empty store is seeded exactly once; a populated store is never
//!   overwritten by the seed.
//! - A store holding garbage reads as empty and is reseeded on load.
//! - A failed load leaves the container exactly as it was.
//! - Overlapping loads are not serialized: the one finishing last wins.

use folio_app::{LoadOrchestrator, LoadOrigin, LoadStatus};
use folio_model::RawProjectRecord;
use folio_store::{KeyValueStore, MemoryStore, ProjectStore};
use folio_test_utils::{sample_records, titled, FixtureSource, RecordingContainer};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;

fn loader(
    kv: Arc<MemoryStore>,
    seed: &FixtureSource,
) -> LoadOrchestrator<Arc<MemoryStore>, RecordingContainer> {
    LoadOrchestrator::new(
        ProjectStore::with_default_key(kv),
        seed.shared(),
        RecordingContainer::default(),
    )
}

/// Startup followed by a local load fetches the seed once and renders it.
#[tokio::test]
async fn first_run_seeds_once_and_renders() {
    let kv = Arc::new(MemoryStore::new());
    let seed = FixtureSource::records("seed.json", sample_records());
    let loader = loader(Arc::clone(&kv), &seed);

    assert!(loader.startup().await.unwrap());
    let status = loader.load_local().await;

    assert_eq!(seed.fetches(), 1);
    assert_eq!(
        status,
        LoadStatus::Loaded {
            count: 3,
            origin: LoadOrigin::Local
        }
    );
    loader.with_container(|c| {
        assert_eq!(c.titles(), vec!["Kernel Tracer", "Folio", "Scratchpad"]);
        assert_eq!(c.clears, 1);
        assert_eq!(c.empty_signals, 0);
    });
}

/// The seed must never clobber edits the user already made.
#[tokio::test]
async fn populated_store_is_not_reseeded() {
    let kv = Arc::new(MemoryStore::new());
    ProjectStore::with_default_key(Arc::clone(&kv))
        .create(RawProjectRecord::new().with_title("Edited locally"));

    let seed = FixtureSource::records("seed.json", sample_records());
    let loader = loader(kv, &seed);

    assert!(!loader.startup().await.unwrap());
    loader.load_local().await;

    assert_eq!(seed.fetches(), 0);
    assert_eq!(loader.with_container(RecordingContainer::titles), vec!["Edited locally"]);
}

/// Decode failure reads as absent, so the seed takes over again.
#[tokio::test]
async fn corrupt_store_is_reseeded() {
    let kv = Arc::new(MemoryStore::new());
    kv.set(folio_store::DEFAULT_PROJECTS_KEY, "[{\"title\": ").unwrap();

    let seed = FixtureSource::records("seed.json", titled(&["Fresh"]));
    let loader = loader(Arc::clone(&kv), &seed);

    let status = loader.load_local().await;
    assert_eq!(status.to_string(), "Loaded 1 projects from local storage.");
    assert_eq!(loader.store().list_all(), titled(&["Fresh"]));
}

/// Unavailable storage still renders the seed, it just cannot keep it.
#[tokio::test]
async fn unavailable_storage_still_renders_seed() {
    let kv = Arc::new(MemoryStore::new());
    kv.set_available(false);

    let seed = FixtureSource::records("seed.json", titled(&["A", "B"]));
    let loader = loader(kv, &seed);

    let status = loader.load_local().await;
    assert_eq!(status.to_string(), "Loaded 2 projects from local storage.");
    assert_eq!(loader.with_container(RecordingContainer::titles), vec!["A", "B"]);
}

/// A failing remote must not wipe what the user is looking at.
#[tokio::test]
async fn remote_failures_leave_container_untouched() {
    let kv = Arc::new(MemoryStore::new());
    let seed = FixtureSource::records("seed.json", titled(&["Local"]));

    for remote in [
        FixtureSource::status("https://api/projects", 500),
        FixtureSource::malformed("https://api/projects"),
    ] {
        let loader = loader(Arc::clone(&kv), &seed).with_remote(remote.shared());
        loader.load_local().await;

        let status = loader.load_remote().await;
        assert!(status.is_failure(), "{status}");
        loader.with_container(|c| {
            assert_eq!(c.titles(), vec!["Local"]);
            assert_eq!(c.clears, 1);
        });
    }
}

/// An empty remote list is a success that shows the empty state.
#[tokio::test]
async fn empty_remote_shows_empty_state() {
    let kv = Arc::new(MemoryStore::new());
    let seed = FixtureSource::records("seed.json", titled(&["Local"]));
    let remote = FixtureSource::records("https://api/projects", Vec::new());
    let loader = loader(kv, &seed).with_remote(remote.shared());

    assert_eq!(
        loader.load_remote().await.to_string(),
        "Loaded 0 projects from remote."
    );
    loader.with_container(|c| {
        assert!(c.children.is_empty());
        assert_eq!(c.empty_signals, 1);
    });
}

/// Loads race; whichever resolves last owns the container and the status.
#[tokio::test(start_paused = true)]
async fn last_load_to_finish_wins() {
    let kv = Arc::new(MemoryStore::new());
    let seed = FixtureSource::records("seed.json", titled(&["Local"]));
    let remote = FixtureSource::records("https://api/projects", titled(&["Remote 1", "Remote 2"]))
        .delayed(Duration::from_millis(200));
    let loader = loader(kv, &seed).with_remote(remote.shared());
    loader.startup().await.unwrap();

    let (remote_status, local_status) = tokio::join!(loader.load_remote(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        loader.load_local().await
    });

    assert_eq!(local_status.to_string(), "Loaded 1 projects from local storage.");
    assert_eq!(remote_status.to_string(), "Loaded 2 projects from remote.");
    assert_eq!(loader.status(), remote_status);
    assert_eq!(
        loader.with_container(RecordingContainer::titles),
        vec!["Remote 1", "Remote 2"]
    );
}

/// Status watchers see the in-flight state before the outcome.
#[tokio::test(start_paused = true)]
async fn watchers_observe_loading_state() {
    let kv = Arc::new(MemoryStore::new());
    let seed = FixtureSource::records("seed.json", titled(&["A"])).delayed(Duration::from_millis(100));
    let loader = loader(kv, &seed);
    let mut watcher = loader.subscribe();

    let (status, seen_while_loading) = tokio::join!(loader.load_local(), async {
        watcher.changed().await.unwrap();
        watcher.borrow_and_update().clone()
    });

    assert_eq!(seen_while_loading.to_string(), "Loading projects…");
    assert_eq!(status, loader.status());
}

/// The seed shipped with the repository is a valid record list.
#[tokio::test]
async fn bundled_seed_file_loads() {
    use folio_app::{FileSource, ProjectSource};

    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/projects.json");
    let records = FileSource::new(path).fetch().await.unwrap();

    assert!(!records.is_empty());
    assert!(records.iter().all(|r| r.title_str().is_some()));
}
