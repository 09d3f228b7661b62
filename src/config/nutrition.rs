// ABOUTME: Nutrition configuration for BMR, TDEE, keto macro split, and hydration
// ABOUTME: Defaults reproduce the published formulas; env vars may override individual values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

//! Nutrition Configuration
//!
//! Every constant the metabolism engine uses lives here so a deployment can
//! tune it without touching the formulas.
//!
//! # Scientific References
//!
//! - BMR: Mifflin et al. (1990) DOI: 10.1093/ajcn/51.2.241
//! - Activity factors: `McArdle`, Katch & Katch (2010), Exercise Physiology
//! - Energy density of body fat: ~7700 kcal/kg (Wishnofsky, 1958)

use super::error::ConfigError;
use ketoflow_core::constants::{
    activity_factors, biometric_ranges, energy, hydration, keto_ratios,
};
use ketoflow_core::models::ActivityLevel;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// Tolerance for the macro ratio sum check
const RATIO_SUM_TOLERANCE: f64 = 1e-6;

/// Nutrition configuration consumed by the metabolism engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NutritionConfig {
    /// Mifflin-St Jeor coefficients and sex offsets
    pub bmr: BmrConfig,
    /// TDEE multipliers per activity level
    pub activity_factors: ActivityFactorsConfig,
    /// Calorie goal adjustments
    pub calorie_goals: CalorieGoalConfig,
    /// Keto macronutrient split
    pub keto_macros: KetoMacroConfig,
    /// Daily water intake settings
    pub hydration: HydrationConfig,
    /// Accepted biometric ranges
    pub biometric_ranges: BiometricRanges,
}

/// BMR (Basal Metabolic Rate) calculation configuration
///
/// Reference: Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
/// American Journal of Clinical Nutrition, 51(2), 241-247.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmrConfig {
    /// Weight coefficient (10.0)
    pub msj_weight_coef: f64,
    /// Height coefficient (6.25)
    pub msj_height_coef: f64,
    /// Age coefficient (-5.0)
    pub msj_age_coef: f64,
    /// Male constant (+5)
    pub msj_male_constant: f64,
    /// Female constant (-161)
    pub msj_female_constant: f64,
    /// Constant for `other` (-78, the midpoint of male and female)
    pub msj_other_constant: f64,
}

/// Activity factor multipliers for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActivityFactorsConfig {
    /// Sedentary: 1.2
    pub sedentary: f64,
    /// Light: 1.375
    pub light: f64,
    /// Moderate: 1.55
    pub moderate: f64,
    /// Active: 1.725
    pub active: f64,
    /// Very active: 1.9
    pub very_active: f64,
    /// Used for unrecognized levels: 1.55
    pub fallback: f64,
}

impl ActivityFactorsConfig {
    /// Multiplier for an activity level
    #[must_use]
    pub const fn factor(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::Light => self.light,
            ActivityLevel::Moderate => self.moderate,
            ActivityLevel::Active => self.active,
            ActivityLevel::VeryActive => self.very_active,
            ActivityLevel::Unrecognized => self.fallback,
        }
    }
}

/// Calorie target adjustments per goal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieGoalConfig {
    /// Energy stored in one kilogram of body fat (7700 kcal)
    pub kcal_per_kg_fat: f64,
    /// Floor applied to weight-loss targets (1200 kcal)
    pub min_daily_calories: f64,
    /// Surplus added for muscle gain (400 kcal)
    pub muscle_gain_surplus: f64,
}

/// Ketogenic macronutrient split and energy densities
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KetoMacroConfig {
    /// Share of calories from carbohydrates (0.05)
    pub carbs_ratio: f64,
    /// Share of calories from protein (0.25)
    pub protein_ratio: f64,
    /// Share of calories from fat (0.70)
    pub fat_ratio: f64,
    /// kcal per gram of carbohydrate (4)
    pub kcal_per_gram_carbs: f64,
    /// kcal per gram of protein (4)
    pub kcal_per_gram_protein: f64,
    /// kcal per gram of fat (9)
    pub kcal_per_gram_fat: f64,
}

/// Daily water intake configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HydrationConfig {
    /// Baseline millilitres per kilogram of body weight (35)
    pub ml_per_kg: f64,
    /// Sedentary multiplier: 1.0
    pub sedentary: f64,
    /// Light multiplier: 1.1
    pub light: f64,
    /// Moderate multiplier: 1.2
    pub moderate: f64,
    /// Active multiplier: 1.3
    pub active: f64,
    /// Very active multiplier: 1.4
    pub very_active: f64,
    /// Used for unrecognized levels: 1.0
    pub fallback: f64,
}

impl HydrationConfig {
    /// Multiplier for an activity level
    #[must_use]
    pub const fn multiplier(&self, level: ActivityLevel) -> f64 {
        match level {
            ActivityLevel::Sedentary => self.sedentary,
            ActivityLevel::Light => self.light,
            ActivityLevel::Moderate => self.moderate,
            ActivityLevel::Active => self.active,
            ActivityLevel::VeryActive => self.very_active,
            ActivityLevel::Unrecognized => self.fallback,
        }
    }
}

/// Inclusive ranges accepted by biometric validation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiometricRanges {
    /// Minimum age (13)
    pub age_min: f64,
    /// Maximum age (120)
    pub age_max: f64,
    /// Minimum height in cm (100)
    pub height_min_cm: f64,
    /// Maximum height in cm (250)
    pub height_max_cm: f64,
    /// Minimum weight in kg (30), current and target
    pub weight_min_kg: f64,
    /// Maximum weight in kg (300), current and target
    pub weight_max_kg: f64,
}

impl NutritionConfig {
    /// Built-in configuration matching the published formulas
    pub const DEFAULT: Self = Self {
        bmr: BmrConfig {
            msj_weight_coef: 10.0,
            msj_height_coef: 6.25,
            msj_age_coef: -5.0,
            msj_male_constant: 5.0,
            msj_female_constant: -161.0,
            msj_other_constant: -78.0,
        },
        activity_factors: ActivityFactorsConfig {
            sedentary: activity_factors::SEDENTARY,
            light: activity_factors::LIGHT,
            moderate: activity_factors::MODERATE,
            active: activity_factors::ACTIVE,
            very_active: activity_factors::VERY_ACTIVE,
            fallback: activity_factors::FALLBACK,
        },
        calorie_goals: CalorieGoalConfig {
            kcal_per_kg_fat: energy::KCAL_PER_KG_FAT,
            min_daily_calories: energy::MIN_DAILY_CALORIES,
            muscle_gain_surplus: energy::MUSCLE_GAIN_SURPLUS_KCAL,
        },
        keto_macros: KetoMacroConfig {
            carbs_ratio: keto_ratios::CARBS,
            protein_ratio: keto_ratios::PROTEIN,
            fat_ratio: keto_ratios::FAT,
            kcal_per_gram_carbs: energy::KCAL_PER_GRAM_CARBS,
            kcal_per_gram_protein: energy::KCAL_PER_GRAM_PROTEIN,
            kcal_per_gram_fat: energy::KCAL_PER_GRAM_FAT,
        },
        hydration: HydrationConfig {
            ml_per_kg: hydration::ML_PER_KG,
            sedentary: hydration::SEDENTARY_MULTIPLIER,
            light: hydration::LIGHT_MULTIPLIER,
            moderate: hydration::MODERATE_MULTIPLIER,
            active: hydration::ACTIVE_MULTIPLIER,
            very_active: hydration::VERY_ACTIVE_MULTIPLIER,
            fallback: hydration::FALLBACK_MULTIPLIER,
        },
        biometric_ranges: BiometricRanges {
            age_min: biometric_ranges::AGE_MIN,
            age_max: biometric_ranges::AGE_MAX,
            height_min_cm: biometric_ranges::HEIGHT_MIN_CM,
            height_max_cm: biometric_ranges::HEIGHT_MAX_CM,
            weight_min_kg: biometric_ranges::WEIGHT_MIN_KG,
            weight_max_kg: biometric_ranges::WEIGHT_MAX_KG,
        },
    };

    /// Load configuration from defaults plus environment overrides
    ///
    /// # Errors
    ///
    /// Returns an error if an override fails to parse or the result fails validation
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::default().apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error describing the first inconsistent value
    pub fn validate(&self) -> Result<(), ConfigError> {
        let macros = &self.keto_macros;
        let ratio_sum = macros.carbs_ratio + macros.protein_ratio + macros.fat_ratio;
        if (ratio_sum - 1.0).abs() > RATIO_SUM_TOLERANCE {
            return Err(ConfigError::InvalidWeights(
                "keto macro ratios must sum to 1.0",
            ));
        }
        if [macros.carbs_ratio, macros.protein_ratio, macros.fat_ratio]
            .iter()
            .any(|ratio| *ratio < 0.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "keto macro ratios must be non-negative",
            ));
        }
        if [
            macros.kcal_per_gram_carbs,
            macros.kcal_per_gram_protein,
            macros.kcal_per_gram_fat,
        ]
        .iter()
        .any(|density| *density <= 0.0)
        {
            return Err(ConfigError::ValueOutOfRange(
                "energy densities must be positive",
            ));
        }

        let factors = &self.activity_factors;
        if !(factors.sedentary < factors.light
            && factors.light < factors.moderate
            && factors.moderate < factors.active
            && factors.active < factors.very_active)
        {
            return Err(ConfigError::InvalidRange(
                "activity factors must increase from sedentary to very_active",
            ));
        }
        if factors.sedentary <= 0.0 || factors.fallback <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "activity factors must be positive",
            ));
        }

        let water = &self.hydration;
        if water.ml_per_kg <= 0.0 {
            return Err(ConfigError::ValueOutOfRange("ml_per_kg must be positive"));
        }
        if !(water.sedentary <= water.light
            && water.light <= water.moderate
            && water.moderate <= water.active
            && water.active <= water.very_active)
        {
            return Err(ConfigError::InvalidRange(
                "hydration multipliers must not decrease with activity",
            ));
        }

        let goals = &self.calorie_goals;
        if goals.kcal_per_kg_fat <= 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "kcal_per_kg_fat must be positive",
            ));
        }
        if goals.min_daily_calories < 0.0 {
            return Err(ConfigError::ValueOutOfRange(
                "min_daily_calories must be non-negative",
            ));
        }

        let ranges = &self.biometric_ranges;
        if ranges.age_min >= ranges.age_max {
            return Err(ConfigError::InvalidRange("age_min must be < age_max"));
        }
        if ranges.height_min_cm >= ranges.height_max_cm {
            return Err(ConfigError::InvalidRange(
                "height_min_cm must be < height_max_cm",
            ));
        }
        if ranges.weight_min_kg >= ranges.weight_max_kg {
            return Err(ConfigError::InvalidRange(
                "weight_min_kg must be < weight_max_kg",
            ));
        }

        Ok(())
    }

    fn apply_env_var<T: FromStr>(env_var_name: &str, target: &mut T) -> Result<(), ConfigError> {
        if let Ok(val) = env::var(env_var_name) {
            *target = val
                .parse()
                .map_err(|_| ConfigError::Parse(format!("Invalid {env_var_name}")))?;
        }
        Ok(())
    }

    fn apply_env_overrides(mut self) -> Result<Self, ConfigError> {
        Self::apply_env_var(
            "KETOFLOW_NUTRITION_MIN_DAILY_CALORIES",
            &mut self.calorie_goals.min_daily_calories,
        )?;
        Self::apply_env_var(
            "KETOFLOW_NUTRITION_MUSCLE_GAIN_SURPLUS",
            &mut self.calorie_goals.muscle_gain_surplus,
        )?;
        Self::apply_env_var(
            "KETOFLOW_NUTRITION_KCAL_PER_KG_FAT",
            &mut self.calorie_goals.kcal_per_kg_fat,
        )?;

        Self::apply_env_var(
            "KETOFLOW_NUTRITION_CARBS_RATIO",
            &mut self.keto_macros.carbs_ratio,
        )?;
        Self::apply_env_var(
            "KETOFLOW_NUTRITION_PROTEIN_RATIO",
            &mut self.keto_macros.protein_ratio,
        )?;
        Self::apply_env_var(
            "KETOFLOW_NUTRITION_FAT_RATIO",
            &mut self.keto_macros.fat_ratio,
        )?;

        Self::apply_env_var(
            "KETOFLOW_NUTRITION_ACTIVITY_FALLBACK",
            &mut self.activity_factors.fallback,
        )?;
        Self::apply_env_var(
            "KETOFLOW_NUTRITION_WATER_ML_PER_KG",
            &mut self.hydration.ml_per_kg,
        )?;

        Ok(self)
    }
}

impl Default for NutritionConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
