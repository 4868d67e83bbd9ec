//! Key-value media backing the persistent store
//!
//! A medium stores plain text values under string keys, the same shape a
//! browser's `localStorage` exposes. [`JsonFileStore`] keeps them in one JSON
//! object on disk and writes through on every change; [`MemoryStore`] is the
//! volatile variant used in tests.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::error::{CalorieError, CalorieResult};

/// Minimal text key-value interface
pub trait KeyValueStore {
    /// Read a value, `None` if the key is absent
    fn get_item(&self, key: &str) -> CalorieResult<Option<String>>;

    /// Overwrite a value
    fn set_item(&mut self, key: &str, value: String) -> CalorieResult<()>;

    /// Overwrite several values as one write: either all land or none do
    fn set_items(&mut self, items: Vec<(&str, String)>) -> CalorieResult<()>;

    /// Delete a key; absent keys are ignored
    fn remove_item(&mut self, key: &str) -> CalorieResult<()>;

    /// Delete every key
    fn clear(&mut self) -> CalorieResult<()>;

    /// All keys currently stored, in sorted order
    fn keys(&self) -> CalorieResult<Vec<String>>;
}

/// Volatile store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> CalorieResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> CalorieResult<()> {
        self.items.insert(key.to_string(), value);
        Ok(())
    }

    fn set_items(&mut self, items: Vec<(&str, String)>) -> CalorieResult<()> {
        for (key, value) in items {
            self.items.insert(key.to_string(), value);
        }
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> CalorieResult<()> {
        self.items.remove(key);
        Ok(())
    }

    fn clear(&mut self) -> CalorieResult<()> {
        self.items.clear();
        Ok(())
    }

    fn keys(&self) -> CalorieResult<Vec<String>> {
        Ok(self.items.keys().cloned().collect())
    }
}

/// Store persisted as a single JSON object file
///
/// The whole map is cached in memory. Every mutation builds the next map,
/// replaces the file with it, and only then swaps it into the cache, so the
/// cache never holds a value the file does not.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    items: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open a store, loading existing contents if the file exists
    pub fn open(path: impl Into<PathBuf>) -> CalorieResult<Self> {
        let path = path.into();

        let items = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str::<BTreeMap<String, String>>(&raw).map_err(|e| {
                CalorieError::Storage(format!(
                    "Key-value store {} is not a JSON object of strings: {}",
                    path.display(),
                    e
                ))
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(CalorieError::Storage(format!(
                    "Failed to read key-value store {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        tracing::debug!(path = %path.display(), keys = items.len(), "opened key-value store");
        Ok(Self { path, items })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `next` to disk and adopt it as the cached map
    fn commit(&mut self, next: BTreeMap<String, String>) -> CalorieResult<()> {
        self.replace_file(&next).map_err(|e| {
            CalorieError::Storage(format!(
                "Failed to write key-value store {}: {}",
                self.path.display(),
                e
            ))
        })?;
        tracing::debug!(path = %self.path.display(), keys = next.len(), "wrote key-value store");
        self.items = next;
        Ok(())
    }

    /// Replace the backing file through a sibling temp file and a rename
    fn replace_file(&self, items: &BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let raw = serde_json::to_string_pretty(items)?;
        let temp_path = self.path.with_extension("json.partial");

        let written = File::create(&temp_path).and_then(|mut file| {
            file.write_all(raw.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|()| fs::rename(&temp_path, &self.path)) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get_item(&self, key: &str) -> CalorieResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> CalorieResult<()> {
        self.set_items(vec![(key, value)])
    }

    fn set_items(&mut self, items: Vec<(&str, String)>) -> CalorieResult<()> {
        let mut next = self.items.clone();
        for (key, value) in items {
            next.insert(key.to_string(), value);
        }
        self.commit(next)
    }

    fn remove_item(&mut self, key: &str) -> CalorieResult<()> {
        if !self.items.contains_key(key) {
            return Ok(());
        }
        let mut next = self.items.clone();
        next.remove(key);
        self.commit(next)
    }

    fn clear(&mut self) -> CalorieResult<()> {
        self.commit(BTreeMap::new())
    }

    fn keys(&self) -> CalorieResult<Vec<String>> {
        Ok(self.items.keys().cloned().collect())
    }
}
