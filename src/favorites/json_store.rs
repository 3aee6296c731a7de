//! JSON file favorites store
//!
//! The whole mapping lives in one file, e.g. `{"123456": [120, 128, 140]}`.
//! Every mutation loads the file, changes the map and rewrites the file.
//! Mutations on one file run one at a time behind a writer lock shared by
//! every store in the process that opens that file. Each save goes to its own
//! temporary file in the same directory, which is then renamed over the
//! target.

use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{BpmError, Result};
use crate::favorites::record::{
    favorites_of, insert_favorite, remove_favorite, toggle_favorite, FavoritesMap, Toggle, UserId,
};
use crate::favorites::FavoritesRepository;

type WriterLock = Arc<Mutex<()>>;

/// Writer locks by absolute store path, shared across the process
static WRITERS: OnceLock<Mutex<HashMap<PathBuf, WriterLock>>> = OnceLock::new();

/// Absolute form of `path`, used to key the writer lock
fn lock_key(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    env::current_dir()
        .map(|cwd| cwd.join(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// The writer lock for `path`, created on first use
fn writer_for(path: &Path) -> WriterLock {
    let registry = WRITERS.get_or_init(|| Mutex::new(HashMap::new()));
    // The registry only holds Arcs, so a poisoned guard is still consistent
    let mut writers = registry.lock().unwrap_or_else(|e| e.into_inner());
    writers.entry(lock_key(path)).or_default().clone()
}

/// Favorites persisted to a single JSON file
#[derive(Debug)]
pub struct JsonFavoritesStore {
    /// Path to the JSON file
    path: PathBuf,
    /// Held across every load-mutate-save cycle on `path`
    writer: WriterLock,
}

impl JsonFavoritesStore {
    /// Create a store backed by `path`. The file is created on first save.
    ///
    /// Stores opened on the same path share one writer lock.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let writer = writer_for(&path);
        Self { path, writer }
    }

    /// Get the store path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Read the mapping, reporting why it could not be read.
    ///
    /// A missing file is an empty mapping, not an error.
    pub fn try_load(&self) -> Result<FavoritesMap> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(FavoritesMap::new()),
            Err(e) => {
                return Err(BpmError::StoreReadError {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        serde_json::from_str(&content).map_err(|e| BpmError::StoreCorrupt {
            path: self.path.clone(),
            source: e,
        })
    }

    /// Read the mapping; anything unreadable counts as empty.
    pub fn load(&self) -> FavoritesMap {
        self.try_load().unwrap_or_else(|e| {
            warn!(error = %e, "favorites store unreadable, starting empty");
            FavoritesMap::new()
        })
    }

    /// Write the whole mapping.
    ///
    /// A temporary file that fails to replace the target is removed when it
    /// is dropped.
    fn save(&self, map: &FavoritesMap) -> Result<()> {
        let dir = self.dir();
        let write_error = |source: io::Error| BpmError::StoreWriteError {
            path: dir.to_path_buf(),
            source,
        };

        fs::create_dir_all(dir).map_err(write_error)?;

        let content = serde_json::to_string(map)?;
        let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
        temp.write_all(content.as_bytes()).map_err(write_error)?;
        temp.as_file().sync_all().map_err(write_error)?;

        temp.persist(&self.path).map_err(|e| BpmError::StoreWriteError {
            path: self.path.clone(),
            source: e.error,
        })?;

        debug!(path = %self.path.display(), users = map.len(), "favorites saved");
        Ok(())
    }

    /// Run one load-mutate-save cycle under the writer lock.
    ///
    /// `apply` returns its result and whether the map changed; an unchanged
    /// map is not written back.
    fn mutate<T>(&self, apply: impl FnOnce(&mut FavoritesMap) -> (T, bool)) -> Result<T> {
        let _guard = self
            .writer
            .lock()
            .map_err(|_| BpmError::StoreLockPoisoned)?;

        let mut map = self.load();
        let (outcome, changed) = apply(&mut map);
        if changed {
            if let Err(e) = self.save(&map) {
                warn!(error = %e, "failed to save favorites");
                return Err(e);
            }
        }

        Ok(outcome)
    }
}

impl FavoritesRepository for JsonFavoritesStore {
    fn get(&self, user: &UserId) -> Vec<u32> {
        favorites_of(&self.load(), user)
    }

    fn add(&self, user: &UserId, bpm: u32) -> Result<bool> {
        self.mutate(|map| {
            let added = insert_favorite(map, user, bpm);
            (added, added)
        })
    }

    fn remove(&self, user: &UserId, bpm: u32) -> Result<bool> {
        self.mutate(|map| {
            let removed = remove_favorite(map, user, bpm);
            (removed, removed)
        })
    }

    fn toggle(&self, user: &UserId, bpm: u32) -> Result<Toggle> {
        self.mutate(|map| (toggle_favorite(map, user, bpm), true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, JsonFavoritesStore) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonFavoritesStore::new(temp_dir.path().join("favorites.json"));
        (temp_dir, store)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (_dir, store) = create_test_store();
        assert!(store.try_load().unwrap().is_empty());
        assert!(store.get(&UserId::from(1_i64)).is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_file_format() {
        let (_dir, store) = create_test_store();
        let user = UserId::from(123456_i64);
        store.add(&user, 140).unwrap();
        store.add(&user, 120).unwrap();
        store.add(&user, 128).unwrap();

        let content = fs::read_to_string(store.path()).unwrap();
        assert_eq!(content, r#"{"123456":[120,128,140]}"#);
        assert_eq!(fs::read_dir(store.dir()).unwrap().count(), 1);
    }

    #[test]
    fn test_corrupt_file_is_empty_and_rewritten() {
        let (_dir, store) = create_test_store();
        fs::write(store.path(), "{not json").unwrap();

        assert!(matches!(store.try_load(), Err(BpmError::StoreCorrupt { .. })));
        assert!(store.get(&UserId::from(1_i64)).is_empty());

        assert!(store.add(&UserId::from(1_i64), 90).unwrap());
        assert_eq!(store.get(&UserId::from(1_i64)), vec![90]);
    }

    #[test]
    fn test_creates_parent_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = JsonFavoritesStore::new(temp_dir.path().join("data").join("favorites.json"));
        assert!(store.add(&UserId::from(5_i64), 100).unwrap());
        assert!(store.path().exists());
    }

    #[test]
    fn test_noop_does_not_write() {
        let (_dir, store) = create_test_store();
        assert!(!store.remove(&UserId::from(1_i64), 120).unwrap());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_write_failure_is_reported() {
        let temp_dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the rename fail
        let path = temp_dir.path().join("favorites.json");
        fs::create_dir_all(path.join("occupied")).unwrap();
        let store = JsonFavoritesStore::new(&path);

        let err = store.add(&UserId::from(1_i64), 120).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Persistence);
        assert!(err.is_recoverable());

        // No temporary file is left behind
        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("favorites.json")]);
    }

    #[test]
    fn test_same_path_shares_writer() {
        let (dir, first) = create_test_store();
        let second = JsonFavoritesStore::new(dir.path().join("favorites.json"));
        let elsewhere = JsonFavoritesStore::new(dir.path().join("other.json"));

        assert!(Arc::ptr_eq(&first.writer, &second.writer));
        assert!(!Arc::ptr_eq(&first.writer, &elsewhere.writer));
    }

    #[test]
    fn test_relative_path_keys_absolute() {
        let key = lock_key(Path::new("favorites.json"));
        assert!(key.is_absolute());
        assert!(key.ends_with("favorites.json"));
    }
}
