//! CLI command handlers
//!
//! Bridges clap argument parsing with the tracker service.

pub mod entries;
pub mod ledger;

pub use entries::{handle_meal_command, handle_workout_command, EntryCommands};
pub use ledger::{handle_limit_command, handle_log_command, handle_reset_command, handle_status_command};
