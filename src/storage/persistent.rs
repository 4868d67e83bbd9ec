//! Typed persistent mirror of the ledger
//!
//! Maps the ledger onto four fixed keys of a [`KeyValueStore`]. Numbers are
//! stored as decimal text and lists as JSON text. List mutations always
//! read, modify and rewrite the entire list.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::{CalorieError, CalorieResult};
use crate::models::{Entry, LedgerState};

use super::medium::KeyValueStore;

/// The fixed set of persisted slots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKey {
    CalorieLimit,
    TotalCalories,
    Meals,
    Workouts,
}

impl StorageKey {
    /// Every key, in a stable order
    pub const ALL: [StorageKey; 4] = [
        StorageKey::CalorieLimit,
        StorageKey::TotalCalories,
        StorageKey::Meals,
        StorageKey::Workouts,
    ];

    /// Key name used in the medium
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::CalorieLimit => "calorieLimit",
            StorageKey::TotalCalories => "totalCalories",
            StorageKey::Meals => "meals",
            StorageKey::Workouts => "workouts",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed accessors over a text key-value medium
#[derive(Debug)]
pub struct PersistentStore<S> {
    medium: S,
}

impl<S: KeyValueStore> PersistentStore<S> {
    /// Wrap a medium
    pub fn new(medium: S) -> Self {
        Self { medium }
    }

    /// Borrow the underlying medium
    pub fn medium(&self) -> &S {
        &self.medium
    }

    /// Read an integer slot, falling back to `default` when absent
    pub fn get_number(&self, key: StorageKey, default: i64) -> CalorieResult<i64> {
        match self.medium.get_item(key.as_str())? {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|_| {
                CalorieError::Storage(format!("Value for '{}' is not a number: {:?}", key, raw))
            }),
        }
    }

    /// Overwrite an integer slot
    pub fn set_number(&mut self, key: StorageKey, value: i64) -> CalorieResult<()> {
        self.medium.set_item(key.as_str(), value.to_string())
    }

    /// Read a list slot, empty when absent
    pub fn get_list<T: DeserializeOwned>(&self, key: StorageKey) -> CalorieResult<Vec<T>> {
        match self.medium.get_item(key.as_str())? {
            None => Ok(Vec::new()),
            Some(raw) => serde_json::from_str(&raw).map_err(|e| {
                CalorieError::Storage(format!("Value for '{}' is not a valid list: {}", key, e))
            }),
        }
    }

    /// Overwrite a list slot
    pub fn set_list<T: Serialize>(&mut self, key: StorageKey, items: &[T]) -> CalorieResult<()> {
        let raw = serde_json::to_string(items)?;
        self.medium.set_item(key.as_str(), raw)
    }

    /// Append one item to a list slot
    pub fn append_to_list<T>(&mut self, key: StorageKey, item: &T) -> CalorieResult<()>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let mut items: Vec<T> = self.get_list(key)?;
        items.push(item.clone());
        self.set_list(key, &items)
    }

    /// Drop every item matching `predicate` from a list slot.
    ///
    /// Returns how many items were removed.
    pub fn remove_from_list<T, F>(&mut self, key: StorageKey, predicate: F) -> CalorieResult<usize>
    where
        T: Serialize + DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        let mut items: Vec<T> = self.get_list(key)?;
        let before = items.len();
        items.retain(|item| !predicate(item));
        self.set_list(key, &items)?;
        Ok(before - items.len())
    }

    /// Remove every persisted key
    pub fn clear_all(&mut self) -> CalorieResult<()> {
        self.medium.clear()
    }

    /// Rebuild a ledger from the stored slots.
    ///
    /// Stored entries must pass validation and carry unique ids within
    /// their list; anything else is reported as a storage error.
    pub fn load_state(&self, default_limit: i64) -> CalorieResult<LedgerState> {
        let state = LedgerState {
            calorie_limit: self.get_number(StorageKey::CalorieLimit, default_limit)?,
            total_calories: self.get_number(StorageKey::TotalCalories, 0)?,
            meals: self.get_list(StorageKey::Meals)?,
            workouts: self.get_list(StorageKey::Workouts)?,
        };
        check_entries(StorageKey::Meals, &state.meals)?;
        check_entries(StorageKey::Workouts, &state.workouts)?;
        Ok(state)
    }

    /// Write the given slots of `state` as a single medium write
    pub fn save_slots(&mut self, state: &LedgerState, keys: &[StorageKey]) -> CalorieResult<()> {
        let mut items = Vec::with_capacity(keys.len());
        for &key in keys {
            items.push((key.as_str(), encode_slot(state, key)?));
        }
        self.medium.set_items(items)
    }

    /// Write every slot from a ledger
    pub fn save_state(&mut self, state: &LedgerState) -> CalorieResult<()> {
        self.save_slots(state, &StorageKey::ALL)
    }
}

fn encode_slot(state: &LedgerState, key: StorageKey) -> CalorieResult<String> {
    Ok(match key {
        StorageKey::CalorieLimit => state.calorie_limit.to_string(),
        StorageKey::TotalCalories => state.total_calories.to_string(),
        StorageKey::Meals => serde_json::to_string(&state.meals)?,
        StorageKey::Workouts => serde_json::to_string(&state.workouts)?,
    })
}

fn check_entries<I>(key: StorageKey, entries: &[Entry<I>]) -> CalorieResult<()>
where
    I: Copy + Eq + Hash + fmt::Display,
{
    let mut seen = HashSet::with_capacity(entries.len());
    for entry in entries {
        entry.validate().map_err(|e| {
            CalorieError::Storage(format!("Invalid entry {} in '{}': {}", entry.id, key, e))
        })?;
        if !seen.insert(entry.id) {
            return Err(CalorieError::Storage(format!(
                "Duplicate id {} in '{}'",
                entry.id, key
            )));
        }
    }
    Ok(())
}
