//! Meal and workout entries
//!
//! Both kinds share one shape; the id type keeps them apart.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{IdGenerator, MealId, WorkoutId};

/// Maximum length of an entry name, in characters
pub const MAX_NAME_LEN: usize = 100;

/// Largest calorie value a single entry may carry
pub const MAX_CALORIES: i64 = 100_000;

/// A single logged meal or workout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry<I> {
    /// Unique identifier within its own list
    pub id: I,

    /// What was eaten or done
    pub name: String,

    /// Calories gained (meal) or burned (workout)
    pub calories: i64,
}

/// A meal adds to the running total
pub type Meal = Entry<MealId>;

/// A workout subtracts from the running total
pub type Workout = Entry<WorkoutId>;

impl<I> Entry<I> {
    /// Case-insensitive substring match on the name
    pub fn name_contains(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(&query.to_lowercase())
    }

    /// Validate the entry
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        validate_fields(&self.name, self.calories)
    }
}

impl Meal {
    /// Create a new meal with a freshly generated id
    pub fn new_meal(ids: &mut impl IdGenerator, name: impl Into<String>, calories: i64) -> Self {
        Self {
            id: MealId::generate(ids),
            name: name.into(),
            calories,
        }
    }
}

impl Workout {
    /// Create a new workout with a freshly generated id
    pub fn new_workout(
        ids: &mut impl IdGenerator,
        name: impl Into<String>,
        calories: i64,
    ) -> Self {
        Self {
            id: WorkoutId::generate(ids),
            name: name.into(),
            calories,
        }
    }
}

/// Check a prospective name and calorie value before an entry is built
pub fn validate_fields(name: &str, calories: i64) -> Result<(), EntryValidationError> {
    if name.trim().is_empty() {
        return Err(EntryValidationError::EmptyName);
    }

    let name_len = name.chars().count();
    if name_len > MAX_NAME_LEN {
        return Err(EntryValidationError::NameTooLong(name_len));
    }

    if calories < 0 {
        return Err(EntryValidationError::NegativeCalories(calories));
    }

    if calories > MAX_CALORIES {
        return Err(EntryValidationError::TooManyCalories(calories));
    }

    Ok(())
}

/// Validation errors for entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyName,
    NameTooLong(usize),
    NegativeCalories(i64),
    TooManyCalories(i64),
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
            Self::NegativeCalories(calories) => {
                write!(f, "Calories cannot be negative (got {})", calories)
            }
            Self::TooManyCalories(calories) => {
                write!(f, "Calories cannot exceed {} (got {})", MAX_CALORIES, calories)
            }
        }
    }
}

impl std::error::Error for EntryValidationError {}
