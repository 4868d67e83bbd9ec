//! Custom error types for the calorie tracker
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for calorie tracker operations
#[derive(Error, Debug)]
pub enum CalorieError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Rejected input (empty name, negative calories, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// More than one entity matched a short identifier
    #[error("Ambiguous {entity_type} identifier '{identifier}' matches {matches} entries")]
    Ambiguous {
        entity_type: &'static str,
        identifier: String,
        matches: usize,
    },

    /// Persistence medium errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CalorieError {
    /// Create a "not found" error for meals
    pub fn meal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Meal",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for workouts
    pub fn workout_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Workout",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error came from the persistence layer
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Io(_) | Self::Json(_))
    }
}

impl From<std::io::Error> for CalorieError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CalorieError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for calorie tracker operations
pub type CalorieResult<T> = Result<T, CalorieError>;
