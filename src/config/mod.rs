//! Configuration module for the calorie tracker
//!
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::CaloriePaths;
pub use settings::Settings;
