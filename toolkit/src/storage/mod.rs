//! Durable client storage.
//!
//! The toolkit keeps two pieces of state between page loads (or CLI runs):
//! the last validation snapshot and the filename wizard fields. Both live
//! behind the [`KeyValueStore`] port so the browser can use `sessionStorage`,
//! the CLI a directory of JSON files, and tests an in-memory map.
//!
//! [`PersistedState`] layers typed JSON load/save on top of a store.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::error::StorageResult;

/// String entries addressed by key.
pub trait KeyValueStore {
    /// Read an entry. Missing entries and unreachable stores both yield `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Overwrite an entry.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Rc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }
}

// =============================================================================
// In-memory store
// =============================================================================

/// In-memory store. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// File-backed store
// =============================================================================

#[cfg(feature = "native")]
pub use file::FileStore;

#[cfg(feature = "native")]
mod file {
    use std::fs;
    use std::path::{Path, PathBuf};

    use super::KeyValueStore;
    use crate::config::DEFAULT_STATE_DIR;
    use crate::error::StorageResult;

    /// One `<key>.json` file per entry in a state directory.
    #[derive(Debug, Clone)]
    pub struct FileStore {
        dir: PathBuf,
    }

    impl FileStore {
        /// Store rooted at the default state directory
        pub fn new() -> Self {
            Self::with_dir(DEFAULT_STATE_DIR)
        }

        /// Store rooted at a custom directory
        pub fn with_dir(dir: impl AsRef<Path>) -> Self {
            Self {
                dir: PathBuf::from(dir.as_ref()),
            }
        }

        pub fn dir(&self) -> &Path {
            &self.dir
        }

        fn path_for(&self, key: &str) -> PathBuf {
            let name: String = key
                .chars()
                .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '-' })
                .collect();
            self.dir.join(format!("{}.json", name))
        }
    }

    impl Default for FileStore {
        fn default() -> Self {
            Self::new()
        }
    }

    impl KeyValueStore for FileStore {
        fn get(&self, key: &str) -> Option<String> {
            fs::read_to_string(self.path_for(key)).ok()
        }

        fn set(&self, key: &str, value: &str) -> StorageResult<()> {
            fs::create_dir_all(&self.dir)?;
            fs::write(self.path_for(key), value)?;
            Ok(())
        }
    }
}

// =============================================================================
// Typed persisted state
// =============================================================================

/// A JSON-serialized value kept under a fixed key.
pub struct PersistedState<T, S> {
    store: S,
    key: String,
    _marker: PhantomData<T>,
}

impl<T, S> PersistedState<T, S>
where
    T: Serialize + DeserializeOwned + Default,
    S: KeyValueStore,
{
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// The stored value if present and parsable.
    pub fn restore(&self) -> Option<T> {
        let raw = self.store.get(&self.key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring unparsable entry '{}': {}", self.key, e);
                None
            }
        }
    }

    /// The stored value, or `T::default()` when absent or unparsable.
    pub fn load(&self) -> T {
        self.restore().unwrap_or_default()
    }

    /// Overwrite the stored value.
    pub fn save(&self, value: &T) -> StorageResult<()> {
        let json = serde_json::to_string(value)?;
        self.store.set(&self.key, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Counter {
        value: u32,
    }

    #[test]
    fn test_memory_store_clones_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();
        store.set("k", "v").unwrap();

        assert_eq!(other.get("k").as_deref(), Some("v"));
        assert_eq!(other.len(), 1);
    }

    #[test]
    fn test_persisted_state_round_trip() {
        let store = MemoryStore::new();
        let state = PersistedState::<Counter, _>::new(store.clone(), "counter");
        state.save(&Counter { value: 7 }).unwrap();

        let reloaded = PersistedState::<Counter, _>::new(store, "counter");
        assert_eq!(reloaded.load(), Counter { value: 7 });
    }

    #[test]
    fn test_persisted_state_falls_back_to_default() {
        let store = MemoryStore::new();
        let state = PersistedState::<Counter, _>::new(&store, "counter");
        assert_eq!(state.load(), Counter::default());
        assert!(state.restore().is_none());

        store.set("counter", "{not json").unwrap();
        assert_eq!(state.load(), Counter::default());
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::with_dir(dir.path().join("state"));

        assert!(store.get("cms-hpt-validation-results").is_none());
        store.set("cms-hpt-validation-results", "{}").unwrap();
        assert_eq!(store.get("cms-hpt-validation-results").as_deref(), Some("{}"));
        assert!(dir.path().join("state/cms-hpt-validation-results.json").exists());
    }
}
