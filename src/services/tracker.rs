//! Tracker service
//!
//! Business logic for the calorie ledger. Every mutation is validated,
//! applied to a copy of the ledger, written through to the persistent store,
//! and only then committed in memory, so a failed write never leaves memory
//! ahead of storage.

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::{CalorieError, CalorieResult};
use crate::models::entry::validate_fields;
use crate::models::{
    CalorieSummary, IdGenerator, LedgerState, Meal, MealId, RandomIdGenerator, TotalOutOfRange,
    Workout, WorkoutId,
};
use crate::storage::{KeyValueStore, PersistentStore, StorageKey};

/// Service owning the ledger and its persistent mirror
pub struct TrackerService<S, G = RandomIdGenerator> {
    state: LedgerState,
    store: PersistentStore<S>,
    ids: G,
    default_limit: i64,
    audit: Option<AuditLogger>,
}

impl<S: KeyValueStore, G: IdGenerator> TrackerService<S, G> {
    /// Rebuild the ledger from the store.
    ///
    /// A stored total that disagrees with the stored entries is recomputed
    /// from the entries and written back.
    pub fn load(mut store: PersistentStore<S>, ids: G, default_limit: i64) -> CalorieResult<Self> {
        let mut state = store.load_state(default_limit)?;

        if !state.is_consistent() {
            let repaired = state.expected_total().ok_or_else(|| {
                CalorieError::Storage("Stored entries overflow the running total".into())
            })?;
            tracing::warn!(
                stored = state.total_calories,
                repaired,
                "stored total disagrees with entries, repairing"
            );
            store.set_number(StorageKey::TotalCalories, repaired)?;
            state.total_calories = repaired;
        }

        tracing::debug!(
            meals = state.meals.len(),
            workouts = state.workouts.len(),
            total = state.total_calories,
            limit = state.calorie_limit,
            "loaded ledger"
        );

        Ok(Self {
            state,
            store,
            ids,
            default_limit,
            audit: None,
        })
    }

    /// Record every mutation in an audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    pub fn store(&self) -> &PersistentStore<S> {
        &self.store
    }

    /// Derived totals for display
    pub fn summary(&self) -> CalorieSummary {
        self.state.summary()
    }

    // === Meal Operations ===

    /// Log a meal
    pub fn add_meal(&mut self, name: &str, calories: i64) -> CalorieResult<Meal> {
        let name = name.trim();
        validate_fields(name, calories).map_err(|e| CalorieError::Validation(e.to_string()))?;

        let meal = Meal::new_meal(&mut self.ids, name, calories);
        let mut next = self.state.clone();
        next.push_meal(meal.clone()).map_err(out_of_range)?;

        self.store
            .save_slots(&next, &[StorageKey::TotalCalories, StorageKey::Meals])?;
        self.state = next;

        tracing::info!(id = %meal.id, name = %meal.name, calories, "added meal");
        self.audit(AuditEntry::create(
            EntityType::Meal,
            meal.id.to_string(),
            Some(meal.name.clone()),
            &meal,
        ))?;

        Ok(meal)
    }

    /// Remove a meal; an unknown id is reported as `NotFound`
    pub fn remove_meal(&mut self, id: MealId) -> CalorieResult<Meal> {
        let mut next = self.state.clone();
        let meal = next
            .take_meal(id)
            .map_err(out_of_range)?
            .ok_or_else(|| CalorieError::meal_not_found(id.to_string()))?;

        self.store
            .save_slots(&next, &[StorageKey::TotalCalories, StorageKey::Meals])?;
        self.state = next;

        tracing::info!(id = %meal.id, name = %meal.name, "removed meal");
        self.audit(AuditEntry::delete(
            EntityType::Meal,
            meal.id.to_string(),
            Some(meal.name.clone()),
            &meal,
        ))?;

        Ok(meal)
    }

    /// Resolve a user-supplied identifier to a meal
    pub fn find_meal(&self, identifier: &str) -> CalorieResult<&Meal> {
        let matches: Vec<&Meal> = self
            .state
            .meals
            .iter()
            .filter(|m| m.id.matches(identifier))
            .collect();

        match matches.as_slice() {
            [meal] => Ok(*meal),
            [] => Err(CalorieError::meal_not_found(identifier)),
            many => Err(CalorieError::Ambiguous {
                entity_type: "Meal",
                identifier: identifier.to_string(),
                matches: many.len(),
            }),
        }
    }

    /// Meals whose name contains `query`, ignoring case
    pub fn filter_meals(&self, query: &str) -> Vec<&Meal> {
        self.state
            .meals
            .iter()
            .filter(|m| m.name_contains(query))
            .collect()
    }

    // === Workout Operations ===

    /// Log a workout
    pub fn add_workout(&mut self, name: &str, calories: i64) -> CalorieResult<Workout> {
        let name = name.trim();
        validate_fields(name, calories).map_err(|e| CalorieError::Validation(e.to_string()))?;

        let workout = Workout::new_workout(&mut self.ids, name, calories);
        let mut next = self.state.clone();
        next.push_workout(workout.clone()).map_err(out_of_range)?;

        self.store
            .save_slots(&next, &[StorageKey::TotalCalories, StorageKey::Workouts])?;
        self.state = next;

        tracing::info!(id = %workout.id, name = %workout.name, calories, "added workout");
        self.audit(AuditEntry::create(
            EntityType::Workout,
            workout.id.to_string(),
            Some(workout.name.clone()),
            &workout,
        ))?;

        Ok(workout)
    }

    /// Remove a workout; an unknown id is reported as `NotFound`
    pub fn remove_workout(&mut self, id: WorkoutId) -> CalorieResult<Workout> {
        let mut next = self.state.clone();
        let workout = next
            .take_workout(id)
            .map_err(out_of_range)?
            .ok_or_else(|| CalorieError::workout_not_found(id.to_string()))?;

        self.store
            .save_slots(&next, &[StorageKey::TotalCalories, StorageKey::Workouts])?;
        self.state = next;

        tracing::info!(id = %workout.id, name = %workout.name, "removed workout");
        self.audit(AuditEntry::delete(
            EntityType::Workout,
            workout.id.to_string(),
            Some(workout.name.clone()),
            &workout,
        ))?;

        Ok(workout)
    }

    /// Resolve a user-supplied identifier to a workout
    pub fn find_workout(&self, identifier: &str) -> CalorieResult<&Workout> {
        let matches: Vec<&Workout> = self
            .state
            .workouts
            .iter()
            .filter(|w| w.id.matches(identifier))
            .collect();

        match matches.as_slice() {
            [workout] => Ok(*workout),
            [] => Err(CalorieError::workout_not_found(identifier)),
            many => Err(CalorieError::Ambiguous {
                entity_type: "Workout",
                identifier: identifier.to_string(),
                matches: many.len(),
            }),
        }
    }

    /// Workouts whose name contains `query`, ignoring case
    pub fn filter_workouts(&self, query: &str) -> Vec<&Workout> {
        self.state
            .workouts
            .iter()
            .filter(|w| w.name_contains(query))
            .collect()
    }

    // === Ledger Operations ===

    /// Replace the calorie limit; totals and entries are untouched
    pub fn set_limit(&mut self, calorie_limit: i64) -> CalorieResult<()> {
        if calorie_limit < 0 {
            return Err(CalorieError::Validation(format!(
                "Calorie limit cannot be negative (got {})",
                calorie_limit
            )));
        }

        let before = self.state.calorie_limit;
        self.store
            .set_number(StorageKey::CalorieLimit, calorie_limit)?;
        self.state.calorie_limit = calorie_limit;

        tracing::info!(before, after = calorie_limit, "set calorie limit");
        self.audit(AuditEntry::update(
            EntityType::CalorieLimit,
            StorageKey::CalorieLimit.as_str(),
            &before,
            &calorie_limit,
            Some(format!("{} -> {}", before, calorie_limit)),
        ))
    }

    /// Clear every entry, the total, the limit and all persisted keys
    pub fn reset(&mut self) -> CalorieResult<()> {
        let before = self.state.clone();

        self.store.clear_all()?;
        self.state = LedgerState::with_limit(self.default_limit);

        tracing::info!(
            meals = before.meals.len(),
            workouts = before.workouts.len(),
            "reset ledger"
        );
        self.audit(AuditEntry::reset(
            &before,
            Some(format!(
                "{} meals, {} workouts, total {} cleared",
                before.meals.len(),
                before.workouts.len(),
                before.total_calories
            )),
        ))
    }

    fn audit(&self, entry: AuditEntry) -> CalorieResult<()> {
        match &self.audit {
            Some(logger) => logger.log(&entry),
            None => Ok(()),
        }
    }
}

fn out_of_range(err: TotalOutOfRange) -> CalorieError {
    CalorieError::Validation(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::models::{SequentialIdGenerator, MAX_CALORIES};
    use crate::storage::{JsonFileStore, MemoryStore};
    use tempfile::TempDir;

    type TestTracker = TrackerService<MemoryStore, SequentialIdGenerator>;

    fn create_tracker() -> TestTracker {
        let store = PersistentStore::new(MemoryStore::new());
        TrackerService::load(store, SequentialIdGenerator::default(), 2000).unwrap()
    }

    fn reload(tracker: &TestTracker) -> LedgerState {
        tracker.store().load_state(2000).unwrap()
    }

    /// Medium that refuses every write once its budget is spent
    struct LimitedWrites {
        inner: MemoryStore,
        writes_left: usize,
    }

    impl LimitedWrites {
        fn spend(&mut self) -> CalorieResult<()> {
            if self.writes_left == 0 {
                return Err(CalorieError::Storage("disk full".into()));
            }
            self.writes_left -= 1;
            Ok(())
        }
    }

    impl KeyValueStore for LimitedWrites {
        fn get_item(&self, key: &str) -> CalorieResult<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&mut self, key: &str, value: String) -> CalorieResult<()> {
            self.spend()?;
            self.inner.set_item(key, value)
        }

        fn set_items(&mut self, items: Vec<(&str, String)>) -> CalorieResult<()> {
            self.spend()?;
            self.inner.set_items(items)
        }

        fn remove_item(&mut self, key: &str) -> CalorieResult<()> {
            self.spend()?;
            self.inner.remove_item(key)
        }

        fn clear(&mut self) -> CalorieResult<()> {
            self.spend()?;
            self.inner.clear()
        }

        fn keys(&self) -> CalorieResult<Vec<String>> {
            self.inner.keys()
        }
    }

    #[test]
    fn test_defaults() {
        let tracker = create_tracker();
        let summary = tracker.summary();
        assert_eq!(summary.calorie_limit, 2000);
        assert_eq!(summary.total_calories, 0);
        assert_eq!(summary.remaining, 2000);
    }

    #[test]
    fn test_eggs_and_run_example() {
        let mut tracker = create_tracker();

        tracker.add_meal("Eggs", 300).unwrap();
        assert_eq!(tracker.summary().total_calories, 300);
        assert_eq!(tracker.summary().consumed, 300);

        tracker.add_workout("Run", 100).unwrap();
        let summary = tracker.summary();
        assert_eq!(summary.total_calories, 200);
        assert_eq!(summary.burned, 100);
        assert_eq!(summary.remaining, 1800);
    }

    #[test]
    fn test_add_then_remove_meal() {
        let mut tracker = create_tracker();

        let meal = tracker.add_meal("A", 500).unwrap();
        let removed = tracker.remove_meal(meal.id).unwrap();

        assert_eq!(removed, meal);
        assert_eq!(tracker.state().total_calories, 0);
        assert!(tracker.state().meals.is_empty());
        assert_eq!(reload(&tracker), *tracker.state());
    }

    #[test]
    fn test_remove_missing_is_not_found() {
        let mut tracker = create_tracker();
        tracker.add_meal("Soup", 150).unwrap();
        let before = tracker.state().clone();

        let err = tracker
            .remove_meal(MealId::from_uuid(uuid::Uuid::from_u128(999)))
            .unwrap_err();
        assert!(err.is_not_found());

        let err = tracker
            .remove_workout(WorkoutId::from_uuid(uuid::Uuid::from_u128(999)))
            .unwrap_err();
        assert!(err.is_not_found());

        assert_eq!(*tracker.state(), before);
        assert_eq!(reload(&tracker), before);
    }

    #[test]
    fn test_meal_and_workout_ids_are_independent() {
        let mut tracker = create_tracker();
        let meal = tracker.add_meal("Rice", 200).unwrap();

        // Same UUID as the meal, but in the workout namespace
        let err = tracker
            .remove_workout(WorkoutId::from_uuid(*meal.id.as_uuid()))
            .unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(tracker.state().meals.len(), 1);
    }

    #[test]
    fn test_total_invariant_over_mixed_sequence() {
        let mut tracker = create_tracker();
        let mut meal_ids = Vec::new();
        let mut workout_ids = Vec::new();

        for i in 0..6 {
            meal_ids.push(tracker.add_meal(&format!("meal {}", i), 100 + i * 37).unwrap().id);
            workout_ids.push(
                tracker
                    .add_workout(&format!("workout {}", i), 50 + i * 11)
                    .unwrap()
                    .id,
            );
            assert!(tracker.state().is_consistent());
        }

        for id in meal_ids.iter().step_by(2) {
            tracker.remove_meal(*id).unwrap();
            assert!(tracker.state().is_consistent());
        }
        for id in workout_ids.iter().skip(1).step_by(2) {
            tracker.remove_workout(*id).unwrap();
            assert!(tracker.state().is_consistent());
        }

        assert_eq!(tracker.state().meals.len(), 3);
        assert_eq!(tracker.state().workouts.len(), 3);
        assert_eq!(reload(&tracker), *tracker.state());
    }

    #[test]
    fn test_validation_rejects_bad_input() {
        let mut tracker = create_tracker();

        assert!(tracker.add_meal("   ", 100).unwrap_err().is_validation());
        assert!(tracker.add_workout("Run", -10).unwrap_err().is_validation());
        assert!(tracker.set_limit(-1).unwrap_err().is_validation());

        assert_eq!(*tracker.state(), LedgerState::default());
        assert!(tracker.store().medium().keys().unwrap().is_empty());
    }

    #[test]
    fn test_oversized_calories_rejected() {
        let mut tracker = create_tracker();
        tracker.add_meal("Feast", MAX_CALORIES).unwrap();
        let before = tracker.state().clone();

        assert!(tracker.add_meal("Big", i64::MAX).unwrap_err().is_validation());
        assert!(tracker.add_meal("Big2", 1).is_ok());
        assert!(tracker
            .add_workout("Ultra", MAX_CALORIES + 1)
            .unwrap_err()
            .is_validation());

        assert_eq!(tracker.state().meals.len(), before.meals.len() + 1);
        assert_eq!(tracker.state().total_calories, MAX_CALORIES + 1);
        assert_eq!(reload(&tracker), *tracker.state());
    }

    #[test]
    fn test_failed_write_keeps_memory_and_storage_in_step() {
        let medium = LimitedWrites {
            inner: MemoryStore::new(),
            writes_left: 1,
        };
        let mut tracker = TrackerService::load(
            PersistentStore::new(medium),
            SequentialIdGenerator::default(),
            2000,
        )
        .unwrap();

        let eggs = tracker.add_meal("Eggs", 300).unwrap();
        assert!(tracker.add_meal("Toast", 120).unwrap_err().is_storage());
        assert!(tracker.add_workout("Run", 100).unwrap_err().is_storage());
        assert!(tracker.remove_meal(eggs.id).unwrap_err().is_storage());
        assert!(tracker.set_limit(1500).unwrap_err().is_storage());

        assert_eq!(tracker.state().total_calories, 300);
        assert_eq!(tracker.state().calorie_limit, 2000);
        assert_eq!(tracker.state().meals, vec![eggs]);
        assert_eq!(tracker.store().load_state(2000).unwrap(), *tracker.state());
    }

    #[test]
    fn test_load_rejects_duplicate_ids() {
        let mut ids = SequentialIdGenerator::default();
        let mut store = PersistentStore::new(MemoryStore::new());
        let run = Workout::new_workout(&mut ids, "Run", 250);
        store
            .set_list(StorageKey::Workouts, &[run.clone(), run])
            .unwrap();
        store.set_number(StorageKey::TotalCalories, -500).unwrap();

        let err = TrackerService::load(store, ids, 2000).err().unwrap();
        assert!(err.is_storage());
    }

    #[test]
    fn test_names_are_trimmed() {
        let mut tracker = create_tracker();
        let meal = tracker.add_meal("  Bagel ", 250).unwrap();
        assert_eq!(meal.name, "Bagel");
    }

    #[test]
    fn test_set_limit_leaves_entries_alone() {
        let mut tracker = create_tracker();
        tracker.add_meal("Pasta", 700).unwrap();
        tracker.add_workout("Row", 200).unwrap();
        let before = tracker.state().clone();

        tracker.set_limit(1500).unwrap();

        let after = tracker.state();
        assert_eq!(after.calorie_limit, 1500);
        assert_eq!(after.total_calories, before.total_calories);
        assert_eq!(after.meals, before.meals);
        assert_eq!(after.workouts, before.workouts);
        assert_eq!(reload(&tracker).calorie_limit, 1500);
    }

    #[test]
    fn test_zero_limit_progress() {
        let mut tracker = create_tracker();
        tracker.set_limit(0).unwrap();
        tracker.add_meal("Cake", 400).unwrap();
        assert_eq!(tracker.summary().progress_percent, 100.0);
        assert!(tracker.summary().over_limit);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut tracker = create_tracker();
        tracker.set_limit(1800).unwrap();
        tracker.add_meal("Burger", 900).unwrap();
        tracker.add_workout("Walk", 150).unwrap();

        tracker.reset().unwrap();
        let once = tracker.state().clone();
        tracker.reset().unwrap();

        assert_eq!(*tracker.state(), once);
        assert_eq!(once, LedgerState::with_limit(2000));
        assert!(tracker.store().medium().keys().unwrap().is_empty());
        assert_eq!(reload(&tracker), once);
    }

    #[test]
    fn test_find_by_short_identifier() {
        let mut tracker = create_tracker();
        let meal = tracker.add_meal("Tea", 5).unwrap();

        let full = meal.id.as_uuid().to_string();
        assert_eq!(tracker.find_meal(&full).unwrap().id, meal.id);
        assert!(tracker.find_meal("meal-ffffffff").unwrap_err().is_not_found());

        // Sequential ids share a long zero prefix
        tracker.add_meal("Coffee", 10).unwrap();
        let err = tracker.find_meal("00000000").unwrap_err();
        assert!(matches!(err, CalorieError::Ambiguous { matches: 2, .. }));
    }

    #[test]
    fn test_filter_by_name() {
        let mut tracker = create_tracker();
        tracker.add_workout("Morning Run", 300).unwrap();
        tracker.add_workout("Evening Swim", 250).unwrap();
        tracker.add_workout("Trail run", 500).unwrap();

        let runs: Vec<_> = tracker
            .filter_workouts("RUN")
            .into_iter()
            .map(|w| w.name.as_str())
            .collect();
        assert_eq!(runs, vec!["Morning Run", "Trail run"]);
        assert_eq!(tracker.filter_workouts("").len(), 3);
        assert!(tracker.filter_meals("run").is_empty());
    }

    #[test]
    fn test_load_repairs_inconsistent_total() {
        let mut ids = SequentialIdGenerator::default();
        let mut store = PersistentStore::new(MemoryStore::new());
        let meal = Meal::new_meal(&mut ids, "Steak", 600);
        store.set_list(StorageKey::Meals, &[meal]).unwrap();
        store.set_number(StorageKey::TotalCalories, 42).unwrap();

        let tracker = TrackerService::load(store, ids, 2000).unwrap();
        assert_eq!(tracker.state().total_calories, 600);
        assert_eq!(
            tracker
                .store()
                .get_number(StorageKey::TotalCalories, 0)
                .unwrap(),
            600
        );
    }

    #[test]
    fn test_round_trip_through_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        let expected = {
            let store = PersistentStore::new(JsonFileStore::open(&path).unwrap());
            let mut tracker =
                TrackerService::load(store, SequentialIdGenerator::default(), 2000).unwrap();
            tracker.set_limit(2200).unwrap();
            tracker.add_meal("Porridge", 320).unwrap();
            tracker.add_meal("Banana", 105).unwrap();
            tracker.add_workout("Yoga", 180).unwrap();
            tracker.state().clone()
        };

        let store = PersistentStore::new(JsonFileStore::open(&path).unwrap());
        let reloaded = TrackerService::load(store, RandomIdGenerator, 2000).unwrap();
        assert_eq!(*reloaded.state(), expected);
    }

    #[test]
    fn test_mutations_are_audited() {
        let temp_dir = TempDir::new().unwrap();
        let log_path = temp_dir.path().join("audit.log");
        let mut tracker = create_tracker().with_audit(AuditLogger::new(log_path.clone()));

        let meal = tracker.add_meal("Eggs", 300).unwrap();
        tracker.remove_meal(meal.id).unwrap();
        tracker.set_limit(1900).unwrap();
        tracker.reset().unwrap();

        let entries = AuditLogger::new(log_path).read_all().unwrap();
        let ops: Vec<_> = entries.iter().map(|e| e.operation).collect();
        assert_eq!(
            ops,
            vec![
                Operation::Create,
                Operation::Delete,
                Operation::Update,
                Operation::Reset
            ]
        );
        assert_eq!(entries[0].entity_name.as_deref(), Some("Eggs"));
    }
}
