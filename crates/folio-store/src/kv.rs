//! Key/value persistence seam
//!
//! [`KeyValueStore`] is the string-keyed, string-valued store the project list
//! and the theme preference live in. [`MemoryStore`] keeps everything in
//! process and can simulate disabled storage and quota limits.

use crate::error::KvError;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// String-keyed, string-valued persistence
///
/// Implementations synchronize internally; callers share them by reference.
pub trait KeyValueStore {
    /// Read a value
    ///
    /// # Errors
    /// Backend is unavailable or unreadable.
    fn get(&self, key: &str) -> Result<Option<String>, KvError>;

    /// Write a value, replacing any previous one
    ///
    /// # Errors
    /// Backend is unavailable, full, or unwritable.
    fn set(&self, key: &str, value: &str) -> Result<(), KvError>;

    /// Remove a value; removing a missing key is not an error
    ///
    /// # Errors
    /// Backend is unavailable or unwritable.
    fn remove(&self, key: &str) -> Result<(), KvError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        (**self).remove(key)
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, String>,
    disabled: bool,
}

/// In-process key/value store
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
    /// Maximum total bytes of keys plus values
    quota: Option<usize>,
}

impl MemoryStore {
    /// Create an empty, unlimited store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store limited to `quota` bytes of keys plus values
    #[inline]
    #[must_use]
    pub fn with_quota(quota: usize) -> Self {
        Self {
            state: RwLock::default(),
            quota: Some(quota),
        }
    }

    /// Enable or disable the store; a disabled store fails every call
    pub fn set_available(&self, available: bool) {
        self.state.write().disabled = !available;
    }

    /// Number of stored keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    /// Check if the store holds no keys
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    fn unavailable() -> KvError {
        KvError::Unavailable("storage is disabled".to_string())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, KvError> {
        let state = self.state.read();
        if state.disabled {
            return Err(Self::unavailable());
        }
        Ok(state.entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), KvError> {
        let mut state = self.state.write();
        if state.disabled {
            return Err(Self::unavailable());
        }
        if let Some(quota) = self.quota {
            let others: usize = state
                .entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = others + key.len() + value.len();
            if needed > quota {
                return Err(KvError::QuotaExceeded { needed, quota });
            }
        }
        state.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), KvError> {
        let mut state = self.state.write();
        if state.disabled {
            return Err(Self::unavailable());
        }
        state.entries.remove(key);
        Ok(())
    }
}
