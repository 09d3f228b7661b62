// ABOUTME: Food log entry record with per-entry macros and meal type
// ABOUTME: Includes the typed partial update used when editing a logged food
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Meal slot a food was eaten in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    /// Breakfast
    Breakfast,
    /// Lunch
    Lunch,
    /// Dinner
    Dinner,
    /// Snack
    Snack,
}

/// Calories and macro grams for one entry, or a running total
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FoodMacros {
    /// Energy (kcal)
    pub calories: f64,
    /// Carbohydrates (g)
    pub carbs: f64,
    /// Protein (g)
    pub protein: f64,
    /// Fat (g)
    pub fat: f64,
}

impl Add for FoodMacros {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            calories: self.calories + rhs.calories,
            carbs: self.carbs + rhs.carbs,
            protein: self.protein + rhs.protein,
            fat: self.fat + rhs.fat,
        }
    }
}

/// One logged food
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntry {
    /// Entry identifier, unique within a day
    pub id: String,
    /// Food name
    pub name: String,
    /// Brand, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Serving size amount
    pub serving_size: f64,
    /// Serving size unit
    pub serving_unit: String,
    /// Macros for the logged serving
    pub macros: FoodMacros,
    /// Meal slot
    pub meal_type: MealType,
    /// When the food was logged
    pub timestamp: DateTime<Utc>,
}

/// Partial update of a logged food
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodEntryUpdate {
    /// New name
    pub name: Option<String>,
    /// New brand (`Some(None)` clears it)
    pub brand: Option<Option<String>>,
    /// New serving size
    pub serving_size: Option<f64>,
    /// New serving unit
    pub serving_unit: Option<String>,
    /// New macros
    pub macros: Option<FoodMacros>,
    /// New meal slot
    pub meal_type: Option<MealType>,
}

impl FoodEntryUpdate {
    /// Apply the set fields to an entry
    pub fn apply_to(&self, entry: &mut FoodEntry) {
        if let Some(name) = &self.name {
            entry.name.clone_from(name);
        }
        if let Some(brand) = &self.brand {
            entry.brand.clone_from(brand);
        }
        if let Some(size) = self.serving_size {
            entry.serving_size = size;
        }
        if let Some(unit) = &self.serving_unit {
            entry.serving_unit.clone_from(unit);
        }
        if let Some(macros) = self.macros {
            entry.macros = macros;
        }
        if let Some(meal_type) = self.meal_type {
            entry.meal_type = meal_type;
        }
    }
}
