// ABOUTME: Application constants for nutrition formulas, validation ranges, and storage keys
// ABOUTME: Single source of truth for the numbers the metabolism engine and stores rely on
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

//! Application constants organized by domain

/// Service identity used in structured logs
pub mod service_names {
    /// Service name reported at startup
    pub const KETOFLOW: &str = "ketoflow";
}

/// Energy and body-composition constants
pub mod energy {
    /// Carbohydrate energy density (kcal/g)
    pub const KCAL_PER_GRAM_CARBS: f64 = 4.0;
    /// Protein energy density (kcal/g)
    pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;
    /// Fat energy density (kcal/g)
    pub const KCAL_PER_GRAM_FAT: f64 = 9.0;
    /// Approximate energy stored in 1 kg of body fat
    pub const KCAL_PER_KG_FAT: f64 = 7700.0;
    /// Days per week, used to spread a weekly deficit
    pub const DAYS_PER_WEEK: f64 = 7.0;
    /// Hard minimum for daily target calories on a weight-loss goal
    pub const MIN_DAILY_CALORIES: f64 = 1200.0;
    /// Fixed surplus added to TDEE on a muscle-gain goal
    pub const MUSCLE_GAIN_SURPLUS_KCAL: f64 = 400.0;
}

/// Ketogenic macro split, as fractions of total calories
pub mod keto_ratios {
    /// Carbohydrate share of calories
    pub const CARBS: f64 = 0.05;
    /// Protein share of calories
    pub const PROTEIN: f64 = 0.25;
    /// Fat share of calories
    pub const FAT: f64 = 0.70;
}

/// TDEE multipliers applied to BMR per activity level
pub mod activity_factors {
    /// Little or no exercise
    pub const SEDENTARY: f64 = 1.2;
    /// Light exercise 1-3 days a week
    pub const LIGHT: f64 = 1.375;
    /// Moderate exercise 3-5 days a week
    pub const MODERATE: f64 = 1.55;
    /// Hard exercise 6-7 days a week
    pub const ACTIVE: f64 = 1.725;
    /// Very hard exercise or a physical job
    pub const VERY_ACTIVE: f64 = 1.9;
    /// Used for unrecognized activity levels
    pub const FALLBACK: f64 = MODERATE;
}

/// Hydration baseline and activity multipliers
pub mod hydration {
    /// Baseline water intake per kilogram of body weight (ml)
    pub const ML_PER_KG: f64 = 35.0;
    /// Millilitres per litre
    pub const ML_PER_LITER: f64 = 1000.0;
    /// Sedentary water multiplier
    pub const SEDENTARY_MULTIPLIER: f64 = 1.0;
    /// Lightly active water multiplier
    pub const LIGHT_MULTIPLIER: f64 = 1.1;
    /// Moderately active water multiplier
    pub const MODERATE_MULTIPLIER: f64 = 1.2;
    /// Active water multiplier
    pub const ACTIVE_MULTIPLIER: f64 = 1.3;
    /// Very active water multiplier
    pub const VERY_ACTIVE_MULTIPLIER: f64 = 1.4;
    /// Unrecognized activity levels get the sedentary amount
    pub const FALLBACK_MULTIPLIER: f64 = SEDENTARY_MULTIPLIER;
}

/// Advisory biometric ranges checked before calculation
pub mod biometric_ranges {
    /// Minimum supported age (years)
    pub const AGE_MIN: f64 = 13.0;
    /// Maximum supported age (years)
    pub const AGE_MAX: f64 = 120.0;
    /// Minimum supported height (cm)
    pub const HEIGHT_MIN_CM: f64 = 100.0;
    /// Maximum supported height (cm)
    pub const HEIGHT_MAX_CM: f64 = 250.0;
    /// Minimum supported body weight (kg)
    pub const WEIGHT_MIN_KG: f64 = 30.0;
    /// Maximum supported body weight (kg)
    pub const WEIGHT_MAX_KG: f64 = 300.0;
}

/// Defaults applied to freshly registered profiles
pub mod profile_defaults {
    /// Default goal timeline in weeks
    pub const GOAL_TIMELINE_WEEKS: u32 = 12;
    /// Default weekly weight loss target (kg)
    pub const WEEKLY_WEIGHT_LOSS_TARGET_KG: f64 = 0.5;
}

/// Local storage keys for persisted client state
pub mod storage_keys {
    /// User profile, macro targets, and onboarding flag
    pub const USER: &str = "user-storage";
    /// Today's food list and per-day history
    pub const FOOD: &str = "food-storage";
    /// Current fasting session and history
    pub const FASTING: &str = "fasting-storage";
}
