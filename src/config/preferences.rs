//! Key-value preference storage
//!
//! The page persists exactly one value across visits: the theme preference.
//! `PreferenceStore` abstracts the storage so the theme manager works the
//! same against a JSON file on disk or a purely in-memory map.

use crate::config::manager::write_atomic;
use crate::error::{FolioError, Result};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// String key-value storage that survives page reloads
pub trait PreferenceStore: Send + Sync {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Preferences kept only for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryPreferenceStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.entries.lock().insert(key.to_string(), value.to_string());
        store
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences stored as a flat JSON object in `preferences.json`
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FilePreferenceStore {
    /// Create a store backed by `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Create a store at `preferences.json` inside `dir`
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("preferences.json"))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let json = std::fs::read_to_string(&self.path)
            .map_err(|e| FolioError::StorageError(Box::new(e)))?;
        match serde_json::from_str(&json) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(
                    "Preference file {} is corrupt, starting empty: {}",
                    self.path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
        }
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());

        let json = serde_json::to_string_pretty(&entries)?;
        write_atomic(&self.path, json.as_bytes()).map_err(|e| match e {
            FolioError::IoError(io) => FolioError::StorageError(Box::new(io)),
            other => other,
        })?;
        debug!("Stored preference {} = {}", key, value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_dir;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryPreferenceStore::new();
        assert_eq!(store.get("theme").unwrap(), None);
        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let temp_dir = create_test_dir();
        let store = FilePreferenceStore::in_dir(temp_dir.path());
        store.set("theme", "light").unwrap();
        store.set("other", "value").unwrap();

        let reopened = FilePreferenceStore::in_dir(temp_dir.path());
        assert_eq!(reopened.get("theme").unwrap().as_deref(), Some("light"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("value"));
    }

    #[test]
    fn test_file_store_missing_file_reads_none() {
        let temp_dir = create_test_dir();
        let store = FilePreferenceStore::in_dir(temp_dir.path());
        assert_eq!(store.get("theme").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_store_corrupt_file_reads_none() {
        let temp_dir = create_test_dir();
        let store = FilePreferenceStore::in_dir(temp_dir.path());
        std::fs::write(store.path(), "[1, 2").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);

        // A write replaces the corrupt content
        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }
}
