// ABOUTME: Food log holding today's entries plus a per-day history
// ABOUTME: Adds, edits, and removes entries and totals today's macros
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

use crate::errors::AppResult;
use crate::storage::LocalStorage;
use chrono::{NaiveDate, Utc};
use ketoflow_core::constants::storage_keys;
use ketoflow_core::models::{FoodEntry, FoodEntryUpdate, FoodMacros};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Logged foods for today and past days
///
/// `todays_foods` is the running list the dashboard totals; `history` keeps
/// every entry keyed by the UTC day it was logged on and survives
/// [`FoodLog::clear_todays_foods`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FoodLog {
    todays_foods: Vec<FoodEntry>,
    #[serde(rename = "foodHistory")]
    history: BTreeMap<NaiveDate, Vec<FoodEntry>>,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

impl FoodLog {
    /// Empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Today's entries in logging order
    #[must_use]
    pub fn todays_foods(&self) -> &[FoodEntry] {
        &self.todays_foods
    }

    /// Entries recorded for a day
    #[must_use]
    pub fn entries_on(&self, date: NaiveDate) -> &[FoodEntry] {
        self.history.get(&date).map(Vec::as_slice).unwrap_or_default()
    }

    /// Days with recorded entries, oldest first
    pub fn logged_days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.history.keys().copied()
    }

    /// Log a food under `date`
    pub fn add_entry_on(&mut self, date: NaiveDate, food: FoodEntry) {
        self.history.entry(date).or_default().push(food.clone());
        self.todays_foods.push(food);
    }

    /// Log a food under today's date
    pub fn add_entry(&mut self, food: FoodEntry) {
        self.add_entry_on(today(), food);
    }

    /// Remove an entry from today's list and from `date`; true if anything was removed
    pub fn remove_entry_on(&mut self, date: NaiveDate, food_id: &str) -> bool {
        let before = self.todays_foods.len();
        self.todays_foods.retain(|food| food.id != food_id);
        let mut removed = self.todays_foods.len() != before;

        if let Some(day) = self.history.get_mut(&date) {
            let before = day.len();
            day.retain(|food| food.id != food_id);
            removed |= day.len() != before;
        }
        removed
    }

    /// Remove an entry logged today
    pub fn remove_entry(&mut self, food_id: &str) -> bool {
        self.remove_entry_on(today(), food_id)
    }

    /// Apply an update to an entry in today's list and in `date`; true if anything matched
    pub fn update_entry_on(
        &mut self,
        date: NaiveDate,
        food_id: &str,
        update: &FoodEntryUpdate,
    ) -> bool {
        let history = self.history.get_mut(&date).into_iter().flatten();
        let mut updated = false;
        for food in self.todays_foods.iter_mut().chain(history) {
            if food.id == food_id {
                update.apply_to(food);
                updated = true;
            }
        }
        updated
    }

    /// Update an entry logged today
    pub fn update_entry(&mut self, food_id: &str, update: &FoodEntryUpdate) -> bool {
        self.update_entry_on(today(), food_id, update)
    }

    /// Sum of today's entries
    #[must_use]
    pub fn todays_macros(&self) -> FoodMacros {
        self.todays_foods
            .iter()
            .fold(FoodMacros::default(), |totals, food| totals + food.macros)
    }

    /// Sum of the entries recorded for a day
    #[must_use]
    pub fn macros_on(&self, date: NaiveDate) -> FoodMacros {
        self.entries_on(date)
            .iter()
            .fold(FoodMacros::default(), |totals, food| totals + food.macros)
    }

    /// Start a new day's list; history is kept
    pub fn clear_todays_foods(&mut self) {
        self.todays_foods.clear();
    }

    /// Save the log under the food storage key
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails
    pub async fn persist(&self, storage: &LocalStorage) -> AppResult<()> {
        storage.set_item(storage_keys::FOOD, self).await
    }

    /// Load a saved log, or an empty one if nothing was stored
    ///
    /// # Errors
    ///
    /// Returns an error if the stored log cannot be read or decoded
    pub async fn load(storage: &LocalStorage) -> AppResult<Self> {
        Ok(storage
            .get_item(storage_keys::FOOD)
            .await?
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ketoflow_core::models::MealType;

    fn entry(id: &str, calories: f64) -> FoodEntry {
        FoodEntry {
            id: id.into(),
            name: "Avocado".into(),
            brand: None,
            serving_size: 100.0,
            serving_unit: "g".into(),
            macros: FoodMacros {
                calories,
                carbs: 2.0,
                protein: 2.0,
                fat: 15.0,
            },
            meal_type: MealType::Lunch,
            timestamp: Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_history_serializes_with_date_keys() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut log = FoodLog::new();
        log.add_entry_on(date, entry("a", 160.0));

        let json = serde_json::to_value(&log).unwrap();
        assert_eq!(json["foodHistory"]["2025-03-01"][0]["id"], "a");
        assert_eq!(json["todaysFoods"][0]["macros"]["calories"], 160.0);
    }

    #[test]
    fn test_remove_unknown_id_reports_false() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut log = FoodLog::new();
        log.add_entry_on(date, entry("a", 160.0));
        assert!(!log.remove_entry_on(date, "zzz"));
        assert_eq!(log.todays_foods().len(), 1);
    }
}
