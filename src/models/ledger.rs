//! In-memory calorie ledger
//!
//! Holds the calorie limit, the running total and both entry lists. The
//! running total always equals consumed minus burned once a method returns;
//! persistence is layered on top by `TrackerService`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entry::{Meal, Workout};
use super::ids::{MealId, WorkoutId};

/// Calorie limit used when nothing has been stored yet
pub const DEFAULT_CALORIE_LIMIT: i64 = 2000;

/// Complete ledger state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    pub calorie_limit: i64,
    pub total_calories: i64,
    pub meals: Vec<Meal>,
    pub workouts: Vec<Workout>,
}

impl Default for LedgerState {
    fn default() -> Self {
        Self::with_limit(DEFAULT_CALORIE_LIMIT)
    }
}

impl LedgerState {
    /// Empty ledger with the given limit
    pub fn with_limit(calorie_limit: i64) -> Self {
        Self {
            calorie_limit,
            total_calories: 0,
            meals: Vec::new(),
            workouts: Vec::new(),
        }
    }

    /// Append a meal and raise the total
    pub fn push_meal(&mut self, meal: Meal) -> Result<(), TotalOutOfRange> {
        self.total_calories = self
            .total_calories
            .checked_add(meal.calories)
            .ok_or(TotalOutOfRange)?;
        self.meals.push(meal);
        Ok(())
    }

    /// Append a workout and lower the total
    pub fn push_workout(&mut self, workout: Workout) -> Result<(), TotalOutOfRange> {
        self.total_calories = self
            .total_calories
            .checked_sub(workout.calories)
            .ok_or(TotalOutOfRange)?;
        self.workouts.push(workout);
        Ok(())
    }

    /// Remove a meal by id, returning it if it was present
    pub fn take_meal(&mut self, id: MealId) -> Result<Option<Meal>, TotalOutOfRange> {
        let Some(index) = self.meals.iter().position(|m| m.id == id) else {
            return Ok(None);
        };
        self.total_calories = self
            .total_calories
            .checked_sub(self.meals[index].calories)
            .ok_or(TotalOutOfRange)?;
        Ok(Some(self.meals.remove(index)))
    }

    /// Remove a workout by id, returning it if it was present
    pub fn take_workout(&mut self, id: WorkoutId) -> Result<Option<Workout>, TotalOutOfRange> {
        let Some(index) = self.workouts.iter().position(|w| w.id == id) else {
            return Ok(None);
        };
        self.total_calories = self
            .total_calories
            .checked_add(self.workouts[index].calories)
            .ok_or(TotalOutOfRange)?;
        Ok(Some(self.workouts.remove(index)))
    }

    /// Sum of meal calories, saturating at the `i64` bounds
    pub fn consumed(&self) -> i64 {
        self.meals
            .iter()
            .fold(0i64, |sum, m| sum.saturating_add(m.calories))
    }

    /// Sum of workout calories, saturating at the `i64` bounds
    pub fn burned(&self) -> i64 {
        self.workouts
            .iter()
            .fold(0i64, |sum, w| sum.saturating_add(w.calories))
    }

    /// Consumed minus burned, `None` if it does not fit in an `i64`
    pub fn expected_total(&self) -> Option<i64> {
        let consumed = self
            .meals
            .iter()
            .try_fold(0i64, |sum, m| sum.checked_add(m.calories))?;
        self.workouts
            .iter()
            .try_fold(consumed, |sum, w| sum.checked_sub(w.calories))
    }

    /// Calories left before the limit is hit (negative when over)
    pub fn remaining(&self) -> i64 {
        self.calorie_limit.saturating_sub(self.total_calories)
    }

    /// Whether the running total exceeds the limit
    pub fn over_limit(&self) -> bool {
        self.remaining() < 0
    }

    /// Progress towards the limit, clamped to `0.0..=100.0`.
    ///
    /// A limit of zero or below has no meaningful ratio: any positive total
    /// counts as full progress, anything else as none.
    pub fn progress_percent(&self) -> f64 {
        if self.calorie_limit <= 0 {
            return if self.total_calories > 0 { 100.0 } else { 0.0 };
        }

        let percent = self.total_calories as f64 / self.calorie_limit as f64 * 100.0;
        percent.clamp(0.0, 100.0)
    }

    /// Check that the stored total agrees with the entry lists
    pub fn is_consistent(&self) -> bool {
        self.expected_total() == Some(self.total_calories)
    }

    /// Snapshot of the derived views
    pub fn summary(&self) -> CalorieSummary {
        CalorieSummary {
            calorie_limit: self.calorie_limit,
            total_calories: self.total_calories,
            consumed: self.consumed(),
            burned: self.burned(),
            remaining: self.remaining(),
            progress_percent: self.progress_percent(),
            over_limit: self.over_limit(),
        }
    }
}

/// A mutation would push the running total outside the `i64` range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalOutOfRange;

impl fmt::Display for TotalOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Running calorie total out of range")
    }
}

impl std::error::Error for TotalOutOfRange {}

/// Derived, read-only figures for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalorieSummary {
    pub calorie_limit: i64,
    pub total_calories: i64,
    pub consumed: i64,
    pub burned: i64,
    pub remaining: i64,
    pub progress_percent: f64,
    pub over_limit: bool,
}
