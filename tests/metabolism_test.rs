// ABOUTME: Integration tests for the metabolism engine
// ABOUTME: Covers BMR, TDEE, macro split, safety floor, hydration, and validation behavior
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use common::reference_biometrics;
use ketoflow::config::NutritionConfig;
use ketoflow::intelligence::metabolism::{
    compute_bmr, compute_macro_targets, compute_macro_targets_with, compute_tdee,
    compute_user_metabolism, compute_user_metabolism_with, compute_water_intake_liters,
    validate_biometrics,
};
use ketoflow::models::{ActivityLevel, BiometricField, MacroTargets, PrimaryGoal, Sex};

#[test]
fn test_bmr_reference_values() {
    assert_eq!(compute_bmr(80.0, 180.0, 30.0, Sex::Male), 1780.0);
    assert_eq!(compute_bmr(65.0, 165.0, 25.0, Sex::Female), 1395.25);
    assert_eq!(compute_bmr(70.0, 170.0, 28.0, Sex::Other), 1544.5);
}

#[test]
fn test_bmr_propagates_nan() {
    assert!(compute_bmr(f64::NAN, 180.0, 30.0, Sex::Male).is_nan());
}

#[test]
fn test_nan_tdee_zeroes_targets_for_every_goal() {
    let zero = MacroTargets::default();
    for goal in [
        PrimaryGoal::WeightLoss,
        PrimaryGoal::Maintenance,
        PrimaryGoal::MuscleGain,
    ] {
        assert_eq!(
            compute_macro_targets(f64::NAN, goal, Some(0.5)),
            zero,
            "goal {goal:?}"
        );
    }
}

#[test]
fn test_nan_weight_does_not_hit_calorie_floor() {
    let mut biometrics = reference_biometrics();
    biometrics.weight_kg = f64::NAN;

    for goal in [
        PrimaryGoal::WeightLoss,
        PrimaryGoal::Maintenance,
        PrimaryGoal::MuscleGain,
    ] {
        biometrics.goal = goal;
        let result = compute_user_metabolism(&biometrics);
        assert_eq!(result.bmr, 0);
        assert_eq!(result.tdee, 0);
        assert_eq!(result.macro_targets.calories, 0, "goal {goal:?}");
        assert_eq!(result.macro_targets.fat_grams, 0, "goal {goal:?}");
    }
}

#[test]
fn test_tdee_multipliers() {
    assert_eq!(compute_tdee(1780.0, ActivityLevel::Sedentary), 1780.0 * 1.2);
    assert_eq!(compute_tdee(1780.0, ActivityLevel::Light), 1780.0 * 1.375);
    assert_eq!(compute_tdee(1780.0, ActivityLevel::Moderate), 1780.0 * 1.55);
    assert_eq!(compute_tdee(1780.0, ActivityLevel::Active), 1780.0 * 1.725);
    assert_eq!(compute_tdee(1780.0, ActivityLevel::VeryActive), 1780.0 * 1.9);
}

#[test]
fn test_tdee_unknown_activity_uses_moderate() {
    let bogus = ActivityLevel::from("bogus");
    assert_eq!(bogus, ActivityLevel::Unrecognized);
    assert_eq!(compute_tdee(1780.0, bogus), 1780.0 * 1.55);

    // Unknown names in stored JSON take the same path
    let parsed: ActivityLevel = serde_json::from_str("\"couch_potato\"").unwrap();
    assert_eq!(compute_tdee(1780.0, parsed), 1780.0 * 1.55);
}

#[test]
fn test_weight_loss_split() {
    let targets = compute_macro_targets(2000.0, PrimaryGoal::WeightLoss, Some(0.5));
    assert_eq!(targets.calories, 1450);
    assert_eq!(targets.carbs_grams, (1450.0_f64 * 0.05 / 4.0).round() as i64);
    assert_eq!(targets.protein_grams, (1450.0_f64 * 0.25 / 4.0).round() as i64);
    assert_eq!(targets.fat_grams, (1450.0_f64 * 0.70 / 9.0).round() as i64);
    assert_eq!(
        (targets.carbs_grams, targets.protein_grams, targets.fat_grams),
        (18, 91, 113)
    );
}

#[test]
fn test_weekly_target_defaults_to_half_kilo() {
    assert_eq!(
        compute_macro_targets(2000.0, PrimaryGoal::WeightLoss, None),
        compute_macro_targets(2000.0, PrimaryGoal::WeightLoss, Some(0.5))
    );
}

#[test]
fn test_muscle_gain_surplus() {
    let targets = compute_macro_targets(2000.0, PrimaryGoal::MuscleGain, None);
    assert_eq!(targets.calories, 2400);
    assert_eq!(targets.carbs_grams, 30);
    assert_eq!(targets.protein_grams, 150);
    assert_eq!(targets.fat_grams, 187);
}

#[test]
fn test_maintenance_ignores_weekly_target() {
    let targets = compute_macro_targets(2000.0, PrimaryGoal::Maintenance, Some(1.0));
    assert_eq!(targets.calories, 2000);
    assert_eq!(
        (targets.carbs_grams, targets.protein_grams, targets.fat_grams),
        (25, 125, 156)
    );
}

#[test]
fn test_safety_floor_holds_for_aggressive_deficits() {
    let targets = compute_macro_targets(1400.0, PrimaryGoal::WeightLoss, Some(1.0));
    assert_eq!(targets.calories, 1200);
    assert_eq!(targets.protein_grams, 75);

    for tdee in (800..=1600).step_by(50) {
        for weekly in [0.25, 0.5, 0.75, 1.0, 1.5, 2.0] {
            let targets =
                compute_macro_targets(f64::from(tdee), PrimaryGoal::WeightLoss, Some(weekly));
            assert!(
                targets.calories >= 1200,
                "tdee {tdee} weekly {weekly} gave {}",
                targets.calories
            );
        }
    }
}

#[test]
fn test_independent_rounding_tolerance() {
    // Macro calories are not reconciled with the calorie total; each field
    // is off by at most half a unit
    for calories in 1200..=4000 {
        let targets = compute_macro_targets(f64::from(calories), PrimaryGoal::Maintenance, None);
        let from_macros =
            targets.carbs_grams * 4 + targets.protein_grams * 4 + targets.fat_grams * 9;
        assert!(
            (from_macros - targets.calories).abs() <= 9,
            "{calories} kcal drifted to {from_macros}"
        );
    }
}

#[test]
fn test_user_metabolism_reference_profile() {
    let result = compute_user_metabolism(&reference_biometrics());
    assert_eq!(result.bmr, 1780);
    assert_eq!(result.tdee, 2759);
    assert_eq!(result.macro_targets.calories, 2209);
}

#[test]
fn test_user_metabolism_uses_unrounded_tdee() {
    let mut biometrics = reference_biometrics();
    biometrics.goal = PrimaryGoal::Maintenance;
    biometrics.weight_kg = 80.1;

    let result = compute_user_metabolism(&biometrics);
    let unrounded_tdee = compute_tdee(
        compute_bmr(80.1, 180.0, 30.0, Sex::Male),
        ActivityLevel::Moderate,
    );
    assert_eq!(
        result.macro_targets,
        compute_macro_targets(unrounded_tdee, PrimaryGoal::Maintenance, None)
    );
}

#[test]
fn test_user_metabolism_is_idempotent() {
    let biometrics = reference_biometrics();
    assert_eq!(
        compute_user_metabolism(&biometrics),
        compute_user_metabolism(&biometrics)
    );
}

#[test]
fn test_custom_config_changes_floor() {
    let mut config = NutritionConfig::DEFAULT;
    config.calorie_goals.min_daily_calories = 1500.0;

    let targets = compute_macro_targets_with(1400.0, PrimaryGoal::WeightLoss, Some(1.0), &config);
    assert_eq!(targets.calories, 1500);

    let result = compute_user_metabolism_with(&reference_biometrics(), &NutritionConfig::DEFAULT);
    assert_eq!(result, compute_user_metabolism(&reference_biometrics()));
}

#[test]
fn test_water_intake_reference_values() {
    assert_eq!(compute_water_intake_liters(70.0, ActivityLevel::Sedentary), 2.5);
    assert_eq!(compute_water_intake_liters(80.0, ActivityLevel::Active), 3.6);
    assert_eq!(compute_water_intake_liters(75.0, ActivityLevel::VeryActive), 3.7);
}

#[test]
fn test_water_intake_unknown_activity_uses_sedentary() {
    let unknown = ActivityLevel::from("unknown");
    assert_eq!(compute_water_intake_liters(70.0, unknown), 2.5);
    assert_eq!(
        compute_water_intake_liters(70.0, unknown),
        compute_water_intake_liters(70.0, ActivityLevel::Sedentary)
    );
}

#[test]
fn test_validate_accepts_valid_profile() {
    assert!(validate_biometrics(&reference_biometrics()).is_empty());
}

#[test]
fn test_validate_reports_every_violation() {
    let mut biometrics = reference_biometrics();
    biometrics.age_years = 10.0;
    biometrics.height_cm = 50.0;

    let violations = validate_biometrics(&biometrics);
    assert_eq!(violations.len(), 2);
    assert_eq!(violations[0].field, BiometricField::Age);
    assert_eq!(violations[0].value, 10.0);
    assert_eq!(violations[1].field, BiometricField::Height);
    assert_eq!((violations[1].min, violations[1].max), (100.0, 250.0));
}

#[test]
fn test_validate_checks_target_weight_and_nan() {
    let mut biometrics = reference_biometrics();
    biometrics.target_weight_kg = 400.0;
    biometrics.weight_kg = f64::NAN;

    let fields: Vec<BiometricField> = validate_biometrics(&biometrics)
        .into_iter()
        .map(|v| v.field)
        .collect();
    assert_eq!(
        fields,
        vec![BiometricField::CurrentWeight, BiometricField::TargetWeight]
    );
}
