//! Core data models for the calorie tracker
//!
//! Entries, their ids, and the in-memory ledger that tallies them.

pub mod entry;
pub mod ids;
pub mod ledger;

pub use entry::{Entry, EntryValidationError, Meal, Workout, MAX_CALORIES};
pub use ids::{IdGenerator, MealId, RandomIdGenerator, SequentialIdGenerator, WorkoutId};
pub use ledger::{CalorieSummary, LedgerState, TotalOutOfRange, DEFAULT_CALORIE_LIMIT};
