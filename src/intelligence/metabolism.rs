// ABOUTME: Metabolism engine computing BMR, TDEE, keto macro targets, and daily water intake
// ABOUTME: Pure functions with biometric range validation; no I/O and no shared state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

//! Metabolism Engine
//!
//! Deterministic nutrition formulas behind every calorie and macro target in
//! the app. Each operation comes in two forms: a plain function using the
//! built-in [`NutritionConfig::DEFAULT`], and a `_with` variant taking an
//! explicit configuration.
//!
//! None of these functions fail. Out-of-range biometrics still compute, and
//! `NaN` inputs propagate to `NaN` intermediates; callers run
//! [`validate_biometrics`] first. Rounded integer outputs convert `NaN` to 0.
//!
//! # Scientific References
//!
//! - Mifflin, M.D., et al. (1990). A new predictive equation for resting energy expenditure.
//!   *American Journal of Clinical Nutrition*, 51(2), 241-247.
//!   <https://doi.org/10.1093/ajcn/51.2.241>

use crate::config::nutrition::{BiometricRanges, NutritionConfig};
use ketoflow_core::constants::{energy, hydration, profile_defaults};
use ketoflow_core::models::{
    ActivityLevel, BiometricField, BiometricViolation, MacroTargets, MetabolismResult,
    PrimaryGoal, ProfileUpdate, Sex, UserBiometrics,
};

/// Round half toward positive infinity to an integer
///
/// `-2.5` rounds to `-2`, unlike [`f64::round`]. `NaN` becomes 0 and
/// infinities saturate.
fn round_to_i64(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Basal metabolic rate (kcal/day, unrounded) via Mifflin-St Jeor
#[must_use]
pub fn compute_bmr(weight_kg: f64, height_cm: f64, age_years: f64, sex: Sex) -> f64 {
    compute_bmr_with(weight_kg, height_cm, age_years, sex, &NutritionConfig::DEFAULT)
}

/// [`compute_bmr`] with explicit coefficients
// Fused multiply-add would change the last bit of published results
#[allow(clippy::suboptimal_flops)]
#[must_use]
pub fn compute_bmr_with(
    weight_kg: f64,
    height_cm: f64,
    age_years: f64,
    sex: Sex,
    config: &NutritionConfig,
) -> f64 {
    let bmr = &config.bmr;
    let base = bmr.msj_weight_coef * weight_kg + bmr.msj_height_coef * height_cm
        + bmr.msj_age_coef * age_years;

    match sex {
        Sex::Male => base + bmr.msj_male_constant,
        Sex::Female => base + bmr.msj_female_constant,
        Sex::Other => base + bmr.msj_other_constant,
    }
}

/// Total daily energy expenditure (kcal/day, unrounded)
///
/// Unrecognized activity levels use the moderate multiplier (1.55).
#[must_use]
pub fn compute_tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    compute_tdee_with(bmr, activity_level, &NutritionConfig::DEFAULT)
}

/// [`compute_tdee`] with explicit activity factors
#[must_use]
pub fn compute_tdee_with(bmr: f64, activity_level: ActivityLevel, config: &NutritionConfig) -> f64 {
    bmr * config.activity_factors.factor(activity_level)
}

/// Daily calorie and keto macro targets for a goal
///
/// `weekly_weight_loss_target_kg` only matters for weight loss and defaults
/// to 0.5 kg when `None`. Weight-loss targets never drop below 1200 kcal.
/// Each field is rounded on its own, so the macro calories may not sum to
/// `calories` exactly.
#[must_use]
pub fn compute_macro_targets(
    tdee: f64,
    goal: PrimaryGoal,
    weekly_weight_loss_target_kg: Option<f64>,
) -> MacroTargets {
    compute_macro_targets_with(
        tdee,
        goal,
        weekly_weight_loss_target_kg,
        &NutritionConfig::DEFAULT,
    )
}

/// [`compute_macro_targets`] with explicit goal adjustments and macro split
#[must_use]
pub fn compute_macro_targets_with(
    tdee: f64,
    goal: PrimaryGoal,
    weekly_weight_loss_target_kg: Option<f64>,
    config: &NutritionConfig,
) -> MacroTargets {
    let target_calories = target_calories(tdee, goal, weekly_weight_loss_target_kg, config);
    let split = &config.keto_macros;

    MacroTargets {
        calories: round_to_i64(target_calories),
        carbs_grams: round_to_i64(target_calories * split.carbs_ratio / split.kcal_per_gram_carbs),
        protein_grams: round_to_i64(
            target_calories * split.protein_ratio / split.kcal_per_gram_protein,
        ),
        fat_grams: round_to_i64(target_calories * split.fat_ratio / split.kcal_per_gram_fat),
    }
}

fn target_calories(
    tdee: f64,
    goal: PrimaryGoal,
    weekly_weight_loss_target_kg: Option<f64>,
    config: &NutritionConfig,
) -> f64 {
    let goals = &config.calorie_goals;
    match goal {
        PrimaryGoal::WeightLoss => {
            let weekly_kg = weekly_weight_loss_target_kg
                .unwrap_or(profile_defaults::WEEKLY_WEIGHT_LOSS_TARGET_KG);
            let daily_deficit = weekly_kg * goals.kcal_per_kg_fat / energy::DAYS_PER_WEEK;
            let target = tdee - daily_deficit;
            // f64::max would turn a NaN target into the floor
            if target < goals.min_daily_calories {
                goals.min_daily_calories
            } else {
                target
            }
        }
        PrimaryGoal::MuscleGain => tdee + goals.muscle_gain_surplus,
        PrimaryGoal::Maintenance => tdee,
    }
}

/// BMR, TDEE, and macro targets for a set of biometrics
///
/// BMR and TDEE are rounded in the result only; the unrounded TDEE feeds the
/// macro calculation.
#[must_use]
pub fn compute_user_metabolism(biometrics: &UserBiometrics) -> MetabolismResult {
    compute_user_metabolism_with(biometrics, &NutritionConfig::DEFAULT)
}

/// [`compute_user_metabolism`] with an explicit configuration
#[must_use]
pub fn compute_user_metabolism_with(
    biometrics: &UserBiometrics,
    config: &NutritionConfig,
) -> MetabolismResult {
    let bmr = compute_bmr_with(
        biometrics.weight_kg,
        biometrics.height_cm,
        biometrics.age_years,
        biometrics.sex,
        config,
    );
    let tdee = compute_tdee_with(bmr, biometrics.activity_level, config);
    let macro_targets = compute_macro_targets_with(
        tdee,
        biometrics.goal,
        Some(biometrics.weekly_weight_loss_target_kg),
        config,
    );

    MetabolismResult {
        bmr: round_to_i64(bmr),
        tdee: round_to_i64(tdee),
        macro_targets,
    }
}

/// Every biometric range the record violates
///
/// Checks age, height, current weight, and target weight independently and
/// returns all failures in that order. `NaN` counts as out of range.
#[must_use]
pub fn validate_biometrics(biometrics: &UserBiometrics) -> Vec<BiometricViolation> {
    validate_biometrics_with(biometrics, &NutritionConfig::DEFAULT.biometric_ranges)
}

/// [`validate_biometrics`] against explicit ranges
#[must_use]
pub fn validate_biometrics_with(
    biometrics: &UserBiometrics,
    ranges: &BiometricRanges,
) -> Vec<BiometricViolation> {
    [
        (BiometricField::Age, biometrics.age_years),
        (BiometricField::Height, biometrics.height_cm),
        (BiometricField::CurrentWeight, biometrics.weight_kg),
        (BiometricField::TargetWeight, biometrics.target_weight_kg),
    ]
    .into_iter()
    .filter_map(|(field, value)| check_range(field, value, ranges))
    .collect()
}

/// Range violations among the biometric fields a partial update sets
///
/// Fields the update leaves unset are not checked.
#[must_use]
pub fn validate_profile_update(
    update: &ProfileUpdate,
    ranges: &BiometricRanges,
) -> Vec<BiometricViolation> {
    let Some(info) = &update.personal_info else {
        return Vec::new();
    };

    [
        (BiometricField::Age, info.age.map(f64::from)),
        (BiometricField::Height, info.height),
        (BiometricField::CurrentWeight, info.current_weight),
        (BiometricField::TargetWeight, info.target_weight),
    ]
    .into_iter()
    .filter_map(|(field, value)| value.and_then(|v| check_range(field, v, ranges)))
    .collect()
}

fn check_range(
    field: BiometricField,
    value: f64,
    ranges: &BiometricRanges,
) -> Option<BiometricViolation> {
    let (min, max) = match field {
        BiometricField::Age => (ranges.age_min, ranges.age_max),
        BiometricField::Height => (ranges.height_min_cm, ranges.height_max_cm),
        BiometricField::CurrentWeight | BiometricField::TargetWeight => {
            (ranges.weight_min_kg, ranges.weight_max_kg)
        }
    };

    if (min..=max).contains(&value) {
        None
    } else {
        Some(BiometricViolation {
            field,
            value,
            min,
            max,
        })
    }
}

/// Recommended daily water intake in litres, rounded to one decimal
///
/// Unrecognized activity levels use the sedentary multiplier (1.0), unlike
/// [`compute_tdee`] which falls back to moderate.
#[must_use]
pub fn compute_water_intake_liters(weight_kg: f64, activity_level: ActivityLevel) -> f64 {
    compute_water_intake_liters_with(weight_kg, activity_level, &NutritionConfig::DEFAULT)
}

/// [`compute_water_intake_liters`] with explicit hydration settings
#[allow(clippy::suboptimal_flops)]
#[must_use]
pub fn compute_water_intake_liters_with(
    weight_kg: f64,
    activity_level: ActivityLevel,
    config: &NutritionConfig,
) -> f64 {
    let water = &config.hydration;
    let millilitres = weight_kg * water.ml_per_kg * water.multiplier(activity_level);
    (millilitres / hydration::ML_PER_LITER * 10.0 + 0.5).floor() / 10.0
}
