//! Settings persistence.
//!
//! Only the four [`Settings`] fields are persisted; live session fields never
//! leave memory.

use alloc::string::String;

#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::error::PersistError;
use crate::options::Settings;

/// Default storage key.
pub const SETTINGS_KEY: &str = "baccaratAppSettings";

/// Backing storage for settings.
pub trait SettingsStore {
    /// Saves the settings, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be written.
    fn save(&mut self, settings: &Settings) -> Result<(), PersistError>;

    /// Loads previously saved settings, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read or decoded.
    fn load(&self) -> Result<Option<Settings>, PersistError>;
}

/// In-memory settings storage.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    key: String,
    entries: HashMap<String, Settings>,
}

impl MemoryStore {
    /// Creates an empty store using [`SETTINGS_KEY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_key(SETTINGS_KEY)
    }

    /// Creates an empty store using a custom key.
    #[must_use]
    pub fn with_key(key: &str) -> Self {
        Self {
            key: String::from(key),
            entries: HashMap::new(),
        }
    }

    /// Removes the saved settings. Returns whether anything was stored.
    pub fn remove(&mut self) -> bool {
        self.entries.remove(&self.key).is_some()
    }

    /// Returns whether settings are stored under this store's key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.entries.contains_key(&self.key)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore for MemoryStore {
    fn save(&mut self, settings: &Settings) -> Result<(), PersistError> {
        self.entries.insert(self.key.clone(), *settings);
        Ok(())
    }

    fn load(&self) -> Result<Option<Settings>, PersistError> {
        Ok(self.entries.get(&self.key).copied())
    }
}
