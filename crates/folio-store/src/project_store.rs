//! Ordered project list persisted under a single key
//!
//! Every operation reads the whole list, modifies it, and writes it back.
//! There is no concurrency control across contexts: two contexts editing at
//! the same time can lose each other's updates.
//!
//! Each operation comes in two forms. The `try_*` form reports backend
//! failures; the plain form logs them and degrades to a no-op, so nothing
//! here can break the rendering path.

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;
use folio_model::RawProjectRecord;
use tracing::{debug, warn};

/// Default key holding the project list
pub const DEFAULT_PROJECTS_KEY: &str = "kc-projects-local-v1";

/// CRUD over the persisted project list
#[derive(Debug, Clone)]
pub struct ProjectStore<K> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> ProjectStore<K> {
    /// Create a store over `kv` using `key`
    #[inline]
    #[must_use]
    pub fn new(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    /// Create a store over `kv` using [`DEFAULT_PROJECTS_KEY`]
    #[inline]
    #[must_use]
    pub fn with_default_key(kv: K) -> Self {
        Self::new(kv, DEFAULT_PROJECTS_KEY)
    }

    /// Key the list is persisted under
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Underlying key/value store
    #[inline]
    #[must_use]
    pub fn kv(&self) -> &K {
        &self.kv
    }

    /// Read the list, reporting decode and backend failures
    ///
    /// # Errors
    /// - `StoreError::Kv` if the backend cannot be read
    /// - `StoreError::Decode` if the value is not a JSON array of records
    pub fn try_list_all(&self) -> StoreResult<Vec<RawProjectRecord>> {
        match self.kv.get(&self.key)? {
            None => Ok(Vec::new()),
            Some(json) => RawProjectRecord::list_from_json(&json).map_err(StoreError::Decode),
        }
    }

    /// Read the list; any failure reads as an empty list
    #[must_use]
    pub fn list_all(&self) -> Vec<RawProjectRecord> {
        self.try_list_all().unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "treating unreadable project list as empty");
            Vec::new()
        })
    }

    /// Number of stored records
    #[must_use]
    pub fn len(&self) -> usize {
        self.list_all().len()
    }

    /// Check if no records are stored (absent or unreadable counts as empty)
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.list_all().is_empty()
    }

    /// Record at `index`, if any
    #[must_use]
    pub fn get(&self, index: usize) -> Option<RawProjectRecord> {
        self.list_all().into_iter().nth(index)
    }

    fn persist(&self, records: &[RawProjectRecord]) -> StoreResult<()> {
        let json = RawProjectRecord::list_to_json(records).map_err(StoreError::Encode)?;
        self.kv.set(&self.key, &json)?;
        Ok(())
    }

    /// Append a record
    ///
    /// # Errors
    /// The list could not be written.
    pub fn try_create(&self, record: RawProjectRecord) -> StoreResult<()> {
        let mut records = self.list_all();
        records.push(record);
        self.persist(&records)?;
        debug!(key = %self.key, len = records.len(), "created project");
        Ok(())
    }

    /// Append a record; failures are logged
    pub fn create(&self, record: RawProjectRecord) {
        if let Err(e) = self.try_create(record) {
            warn!(key = %self.key, error = %e, "project not created");
        }
    }

    /// Replace the record at `index`
    ///
    /// Returns `false` without touching storage when `index` is out of range.
    ///
    /// # Errors
    /// The list could not be written.
    pub fn try_update(&self, index: usize, record: RawProjectRecord) -> StoreResult<bool> {
        let mut records = self.list_all();
        let Some(slot) = records.get_mut(index) else {
            return Ok(false);
        };
        *slot = record;
        self.persist(&records)?;
        debug!(key = %self.key, index, "updated project");
        Ok(true)
    }

    /// Replace the record at `index`; returns whether anything changed
    pub fn update(&self, index: usize, record: RawProjectRecord) -> bool {
        self.try_update(index, record).unwrap_or_else(|e| {
            warn!(key = %self.key, index, error = %e, "project not updated");
            false
        })
    }

    /// Remove and return the record at `index`
    ///
    /// Returns `None` without touching storage when `index` is out of range.
    ///
    /// # Errors
    /// The list could not be written.
    pub fn try_delete(&self, index: usize) -> StoreResult<Option<RawProjectRecord>> {
        let mut records = self.list_all();
        if index >= records.len() {
            return Ok(None);
        }
        let removed = records.remove(index);
        self.persist(&records)?;
        debug!(key = %self.key, index, len = records.len(), "deleted project");
        Ok(Some(removed))
    }

    /// Remove and return the record at `index`; failures are logged
    pub fn delete(&self, index: usize) -> Option<RawProjectRecord> {
        self.try_delete(index).unwrap_or_else(|e| {
            warn!(key = %self.key, index, error = %e, "project not deleted");
            None
        })
    }

    /// Overwrite the whole list, verbatim
    ///
    /// # Errors
    /// The list could not be written.
    pub fn try_replace_all(&self, records: &[RawProjectRecord]) -> StoreResult<()> {
        self.persist(records)?;
        debug!(key = %self.key, len = records.len(), "replaced project list");
        Ok(())
    }

    /// Overwrite the whole list; failures are logged
    pub fn replace_all(&self, records: &[RawProjectRecord]) {
        if let Err(e) = self.try_replace_all(records) {
            warn!(key = %self.key, error = %e, "project list not replaced");
        }
    }

    /// Drop the persisted list entirely
    ///
    /// Never called by the pipeline itself; this is the explicit external reset.
    ///
    /// # Errors
    /// The key could not be removed.
    pub fn clear(&self) -> StoreResult<()> {
        self.kv.remove(&self.key)?;
        debug!(key = %self.key, "cleared project list");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::KvError;
    use crate::kv::MemoryStore;
    use pretty_assertions::assert_eq;

    fn record(title: &str) -> RawProjectRecord {
        RawProjectRecord::new().with_title(title)
    }

    #[test]
    fn create_appends_in_order() {
        let store = ProjectStore::with_default_key(MemoryStore::new());
        store.create(record("A"));
        store.create(record("B"));

        assert_eq!(store.list_all(), vec![record("A"), record("B")]);
    }

    #[test]
    fn update_replaces_in_place() {
        let store = ProjectStore::with_default_key(MemoryStore::new());
        store.create(record("A"));
        store.create(record("B"));

        assert!(store.update(0, record("A2")));
        assert_eq!(store.list_all()[0], record("A2"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn update_out_of_range_is_noop() {
        let kv = MemoryStore::new();
        let store = ProjectStore::with_default_key(&kv);

        assert!(!store.update(0, record("A")));
        assert!(kv.is_empty());
    }

    #[test]
    fn delete_returns_removed_record() {
        let store = ProjectStore::with_default_key(MemoryStore::new());
        store.create(record("A2"));
        store.create(record("B"));

        assert_eq!(store.delete(0), Some(record("A2")));
        assert_eq!(store.list_all(), vec![record("B")]);
    }

    #[test]
    fn delete_out_of_range_is_noop() {
        let store = ProjectStore::with_default_key(MemoryStore::new());
        store.create(record("A"));

        assert_eq!(store.delete(99), None);
        assert_eq!(store.list_all(), vec![record("A")]);
    }

    #[test]
    fn corrupt_value_reads_empty() {
        let kv = MemoryStore::new();
        kv.set(DEFAULT_PROJECTS_KEY, "{definitely not json").unwrap();
        let store = ProjectStore::with_default_key(&kv);

        assert!(store.try_list_all().unwrap_err().is_decode());
        assert!(store.list_all().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn create_over_corrupt_value_starts_fresh() {
        let kv = MemoryStore::new();
        kv.set(DEFAULT_PROJECTS_KEY, "42").unwrap();
        let store = ProjectStore::with_default_key(&kv);

        store.create(record("A"));
        assert_eq!(store.list_all(), vec![record("A")]);
    }

    #[test]
    fn unavailable_storage_degrades_to_noop() {
        let kv = MemoryStore::new();
        let store = ProjectStore::with_default_key(&kv);
        store.create(record("A"));
        kv.set_available(false);

        store.create(record("B"));
        assert!(!store.update(0, record("A2")));
        assert_eq!(store.delete(0), None);
        assert!(store.list_all().is_empty());
        assert!(matches!(
            store.try_create(record("C")),
            Err(StoreError::Kv(KvError::Unavailable(_)))
        ));

        kv.set_available(true);
        assert_eq!(store.list_all(), vec![record("A")]);
    }

    #[test]
    fn quota_exceeded_keeps_previous_list() {
        let kv = MemoryStore::with_quota(64);
        let store = ProjectStore::with_default_key(&kv);
        store.create(record("A"));

        store.create(record(&"x".repeat(100)));
        assert_eq!(store.list_all(), vec![record("A")]);
    }

    #[test]
    fn replace_all_and_clear() {
        let kv = MemoryStore::new();
        let store = ProjectStore::new(&kv, "custom");
        store.replace_all(&[record("A"), record("B")]);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(1), Some(record("B")));
        assert_eq!(store.get(2), None);

        store.clear().unwrap();
        assert_eq!(kv.get("custom").unwrap(), None);
    }
}
