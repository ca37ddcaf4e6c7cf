//! File-backed key/value store
//!
//! All keys live in one JSON object on disk. Every write replaces the file
//! atomically (temp file in the same directory, then rename), so a crash never
//! leaves a half-written store behind.

use crate::error::KvError;
use crate::kv::KeyValueStore;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

type Entries = BTreeMap<String, String>;

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Temp file next to `target`, unique per write within the process
fn temp_path(dir: &Path, target: &Path) -> PathBuf {
    let stem = target
        .file_stem()
        .map_or_else(|| String::from("folio"), |s| s.to_string_lossy().into_owned());
    let n = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    dir.join(format!(".tmp-{stem}-{}-{n}.json", std::process::id()))
}

/// Key/value store persisted as a single JSON file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within the process
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store at `path`; the file is created on first write
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the backing file
    #[inline]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, KvError> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }
        let data = fs::read_to_string(&self.path).map_err(|e| KvError::io_error(&self.path, e))?;
        if data.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&data).map_err(|e| KvError::corrupt(&self.path, e.to_string()))
    }

    fn save(&self, entries: &Entries) -> Result<(), KvError> {
        let data = serde_json::to_vec_pretty(entries)
            .map_err(|e| KvError::corrupt(&self.path, e.to_string()))?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir).map_err(|e| KvError::io_error(&dir, e))?;
        let tmp = temp_path(&dir, &self.path);
        write_atomic(&tmp, &self.path, &data)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let _guard = self.write_lock.lock();
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)?;
        debug!(path = %self.path.display(), key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        let _guard = self.write_lock.lock();
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.save(&entries)?;
            debug!(path = %self.path.display(), key, "removed value");
        }
        Ok(())
    }
}

fn write_atomic(tmp: &Path, final_path: &Path, data: &[u8]) -> Result<(), KvError> {
    fs::write(tmp, data).map_err(|e| KvError::io_error(tmp, e))?;
    if let Err(e) = fs::rename(tmp, final_path) {
        let _ = fs::remove_file(tmp);
        return Err(KvError::io_error(final_path, e));
    }
    Ok(())
}
