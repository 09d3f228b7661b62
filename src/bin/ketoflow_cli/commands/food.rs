// ABOUTME: Food log commands for ketoflow-cli: add, today, remove, and clear
// ABOUTME: Reports today's totals next to the profile's macro targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

use super::{parse_wire, print_json};
use chrono::Utc;
use clap::Subcommand;
use ketoflow::{
    errors::{AppError, AppResult},
    models::{FoodEntry, FoodMacros, MealType},
    storage::LocalStorage,
    stores::{FoodLog, UserStore},
};
use serde_json::json;
use std::process::ExitCode;
use tracing::info;
use uuid::Uuid;

#[non_exhaustive]
#[derive(Subcommand)]
pub enum FoodCommand {
    /// Log a food for today
    Add {
        /// Food name
        #[arg(long)]
        name: String,

        /// Brand name
        #[arg(long)]
        brand: Option<String>,

        /// Calories per logged serving
        #[arg(long)]
        calories: f64,

        /// Carbohydrates in grams
        #[arg(long, default_value_t = 0.0)]
        carbs: f64,

        /// Protein in grams
        #[arg(long, default_value_t = 0.0)]
        protein: f64,

        /// Fat in grams
        #[arg(long, default_value_t = 0.0)]
        fat: f64,

        /// Meal (breakfast, lunch, dinner, snack)
        #[arg(long, default_value = "snack", value_parser = parse_wire::<MealType>)]
        meal: MealType,

        /// Serving size
        #[arg(long, default_value_t = 1.0)]
        serving_size: f64,

        /// Serving unit
        #[arg(long, default_value = "serving")]
        serving_unit: String,
    },

    /// Show today's foods and macro totals
    Today,

    /// Remove a logged food by id
    Remove {
        /// Food entry id
        id: String,
    },

    /// Clear today's list (history is kept)
    Clear,
}

/// Dispatch a food log command
pub async fn run(command: FoodCommand, storage: &LocalStorage) -> AppResult<ExitCode> {
    let mut log = FoodLog::load(storage).await?;

    match command {
        FoodCommand::Add {
            name,
            brand,
            calories,
            carbs,
            protein,
            fat,
            meal,
            serving_size,
            serving_unit,
        } => {
            let entry = FoodEntry {
                id: Uuid::new_v4().to_string(),
                name,
                brand,
                serving_size,
                serving_unit,
                macros: FoodMacros {
                    calories,
                    carbs,
                    protein,
                    fat,
                },
                meal_type: meal,
                timestamp: Utc::now(),
            };
            info!(food_id = %entry.id, "Logged {}", entry.name);
            print_json(&entry)?;
            log.add_entry(entry);
            log.persist(storage).await?;
        }
        FoodCommand::Today => {
            let mut user = UserStore::default();
            user.load(storage).await?;
            print_json(&json!({
                "foods": log.todays_foods(),
                "totals": log.todays_macros(),
                "targets": user.macro_targets(),
            }))?;
        }
        FoodCommand::Remove { id } => {
            if !log.remove_entry(&id) {
                return Err(AppError::not_found(format!("Food entry {id}")));
            }
            log.persist(storage).await?;
            info!(food_id = %id, "Removed food entry");
        }
        FoodCommand::Clear => {
            log.clear_todays_foods();
            log.persist(storage).await?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
