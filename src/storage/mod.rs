//! Storage layer for the calorie tracker
//!
//! A text key-value medium (JSON file or memory) wrapped by a typed store
//! that knows the ledger's key layout.

pub mod medium;
pub mod persistent;

pub use medium::{JsonFileStore, KeyValueStore, MemoryStore};
pub use persistent::{PersistentStore, StorageKey};

use crate::config::paths::CaloriePaths;
use crate::error::CalorieError;

/// Open the on-disk store for a set of paths, creating directories as needed
pub fn open_file_store(paths: &CaloriePaths) -> Result<PersistentStore<JsonFileStore>, CalorieError> {
    paths.ensure_directories()?;
    let medium = JsonFileStore::open(paths.store_file())?;
    Ok(PersistentStore::new(medium))
}
