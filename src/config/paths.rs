//! Path management for the calorie tracker
//!
//! ## Path Resolution Order
//!
//! 1. `CALORIE_TRACKER_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/calorie-tracker` or `~/.config/calorie-tracker`
//! 3. Windows: `%APPDATA%\calorie-tracker`

use std::path::PathBuf;

use crate::error::CalorieError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "CALORIE_TRACKER_DATA_DIR";

/// Manages all paths used by the tracker
#[derive(Debug, Clone)]
pub struct CaloriePaths {
    base_dir: PathBuf,
}

impl CaloriePaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, CalorieError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Use a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the key-value store
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Path to the persisted key-value store
    pub fn store_file(&self) -> PathBuf {
        self.data_dir().join("store.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), CalorieError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CalorieError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| CalorieError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, CalorieError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("calorie-tracker"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| CalorieError::Config("Could not determine HOME directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("calorie-tracker"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, CalorieError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| CalorieError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("calorie-tracker"))
}
