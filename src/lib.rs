//! Calorie tracker - log meals and workouts against a daily calorie limit
//!
//! This library provides the core functionality for the `calorie` command.
//! It keeps a small ledger of meals and workouts whose running total always
//! equals calories consumed minus calories burned, and mirrors that ledger
//! into a persistent key-value store on every change.
//!
//! # Architecture
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Entries, ids and the in-memory ledger
//! - `storage`: Key-value media and the typed persistent store
//! - `services`: The tracker service tying ledger and store together
//! - `audit`: Audit logging of every mutation
//! - `display`: Terminal formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use calorie::config::{CaloriePaths, Settings};
//! use calorie::models::RandomIdGenerator;
//! use calorie::services::TrackerService;
//!
//! let paths = CaloriePaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = calorie::storage::open_file_store(&paths)?;
//! let mut tracker = TrackerService::load(store, RandomIdGenerator, settings.default_calorie_limit)?;
//! tracker.add_meal("Eggs", 300)?;
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{CalorieError, CalorieResult};
