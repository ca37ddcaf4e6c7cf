//! Theme preference sync
//!
//! One boolean preference lives under its own key as `"checked"` or
//! `"unchecked"`. Every context keeps a [`ToggleGroup`] of theme toggles in
//! step with it:
//!
//! ```text
//!   context A: on_toggle ──► write ──► StorageEvent ──► context B: apply_event
//!                  │                                           │
//!                  └──► sync A's toggles                       └──► sync B's toggles
//! ```
//!
//! Applying an event never writes, so a change cannot echo back and forth
//! between contexts.

use folio_store::{KeyValueStore, StorageEvent, StorageEvents};
use tracing::{debug, warn};

/// Default key holding the theme preference
pub const DEFAULT_THEME_KEY: &str = "kc-color-scheme-toggle";

/// Stored value for an enabled preference
pub const CHECKED: &str = "checked";

/// Stored value for a disabled preference
pub const UNCHECKED: &str = "unchecked";

/// Interpret a stored value; anything but `"checked"` is off
#[inline]
#[must_use]
pub fn is_checked_value(value: &str) -> bool {
    value == CHECKED
}

/// Read/write access to one boolean preference
#[derive(Debug, Clone)]
pub struct PreferenceSync<K> {
    kv: K,
    key: String,
}

impl<K: KeyValueStore> PreferenceSync<K> {
    /// Create a preference over `kv` stored under `key`
    #[inline]
    #[must_use]
    pub fn new(kv: K, key: impl Into<String>) -> Self {
        Self {
            kv,
            key: key.into(),
        }
    }

    /// Create a preference over `kv` stored under [`DEFAULT_THEME_KEY`]
    #[inline]
    #[must_use]
    pub fn with_default_key(kv: K) -> Self {
        Self::new(kv, DEFAULT_THEME_KEY)
    }

    /// Key the preference is stored under
    #[inline]
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Stored preference; `None` when never set or storage is unavailable
    #[must_use]
    pub fn read(&self) -> Option<bool> {
        match self.kv.get(&self.key) {
            Ok(value) => value.as_deref().map(is_checked_value),
            Err(e) => {
                warn!(key = %self.key, error = %e, "theme preference unreadable");
                None
            }
        }
    }

    /// Store the preference; failures are logged
    pub fn write(&self, checked: bool) {
        let value = if checked { CHECKED } else { UNCHECKED };
        match self.kv.set(&self.key, value) {
            Ok(()) => debug!(key = %self.key, value, "theme preference stored"),
            Err(e) => warn!(key = %self.key, error = %e, "theme preference not stored"),
        }
    }
}

/// One theme toggle control
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThemeToggle {
    checked: bool,
    updates: usize,
}

impl ThemeToggle {
    /// Create a toggle in the given state
    #[inline]
    #[must_use]
    pub fn new(checked: bool) -> Self {
        Self {
            checked,
            updates: 0,
        }
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// How many times the state was changed programmatically
    #[inline]
    #[must_use]
    pub fn updates(&self) -> usize {
        self.updates
    }

    /// Set the state; returns whether it changed
    pub fn set_checked(&mut self, checked: bool) -> bool {
        if self.checked == checked {
            return false;
        }
        self.checked = checked;
        self.updates += 1;
        true
    }
}

/// The theme toggles of one context
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToggleGroup {
    toggles: Vec<ThemeToggle>,
}

impl ToggleGroup {
    /// Create a group of `count` unchecked toggles
    #[must_use]
    pub fn with_toggles(count: usize) -> Self {
        Self {
            toggles: vec![ThemeToggle::default(); count],
        }
    }

    /// Toggles in this group
    #[inline]
    #[must_use]
    pub fn toggles(&self) -> &[ThemeToggle] {
        &self.toggles
    }

    /// Number of toggles
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.toggles.len()
    }

    /// Check if the group has no toggles
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.toggles.is_empty()
    }

    /// Check if every toggle is in `checked` state
    #[must_use]
    pub fn all(&self, checked: bool) -> bool {
        self.toggles.iter().all(|t| t.is_checked() == checked)
    }

    /// Bring every toggle to `checked`; returns how many changed
    pub fn sync(&mut self, checked: bool) -> usize {
        self.toggles
            .iter_mut()
            .map(|t| t.set_checked(checked))
            .filter(|changed| *changed)
            .count()
    }
}

/// Keeps one context's toggles and the stored preference in step
#[derive(Debug, Clone)]
pub struct ThemeController<K> {
    preference: PreferenceSync<K>,
    group: ToggleGroup,
}

impl<K: KeyValueStore> ThemeController<K> {
    /// Create a controller for `group`
    #[must_use]
    pub fn new(preference: PreferenceSync<K>, group: ToggleGroup) -> Self {
        Self { preference, group }
    }

    /// Stored preference access
    #[inline]
    #[must_use]
    pub fn preference(&self) -> &PreferenceSync<K> {
        &self.preference
    }

    /// Toggles controlled
    #[inline]
    #[must_use]
    pub fn group(&self) -> &ToggleGroup {
        &self.group
    }

    /// Apply the stored preference, if there is one
    pub fn attach(&mut self) -> Option<bool> {
        let stored = self.preference.read()?;
        self.group.sync(stored);
        Some(stored)
    }

    /// A user flipped a toggle: persist and sync the group
    pub fn on_toggle(&mut self, checked: bool) {
        self.preference.write(checked);
        let changed = self.group.sync(checked);
        debug!(checked, changed, "theme toggled");
    }

    /// Mirror another context's change without writing it back
    ///
    /// Returns whether the event concerned the preference key.
    pub fn apply_event(&mut self, event: &StorageEvent) -> bool {
        if event.key != self.preference.key() {
            return false;
        }
        let checked = event.new_value.as_deref().is_some_and(is_checked_value);
        let changed = self.group.sync(checked);
        debug!(origin = %event.origin, checked, changed, "theme synced from another context");
        true
    }

    /// Apply every pending event; returns how many concerned the preference
    pub fn pump(&mut self, events: &mut StorageEvents) -> usize {
        events
            .drain()
            .iter()
            .filter(|event| self.apply_event(event))
            .count()
    }
}
