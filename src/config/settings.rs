//! User settings for the calorie tracker
//!
//! Holds the default calorie limit for a fresh ledger and whether mutations
//! are recorded in the audit log.

use serde::{Deserialize, Serialize};

use super::paths::CaloriePaths;
use crate::error::CalorieError;
use crate::models::DEFAULT_CALORIE_LIMIT;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Limit applied when the store has none recorded
    #[serde(default = "default_calorie_limit")]
    pub default_calorie_limit: i64,

    /// Whether mutations are appended to the audit log
    #[serde(default = "default_audit_enabled")]
    pub audit_enabled: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_calorie_limit() -> i64 {
    DEFAULT_CALORIE_LIMIT
}

fn default_audit_enabled() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            default_calorie_limit: default_calorie_limit(),
            audit_enabled: default_audit_enabled(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &CaloriePaths) -> Result<Self, CalorieError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Not written until the caller asks
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| CalorieError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| CalorieError::Config(format!("Failed to parse settings file: {}", e)))?;

        if settings.default_calorie_limit < 0 {
            return Err(CalorieError::Config(format!(
                "default_calorie_limit must not be negative (got {})",
                settings.default_calorie_limit
            )));
        }

        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CaloriePaths) -> Result<(), CalorieError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| CalorieError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| CalorieError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}
