// ABOUTME: Stateless calculation commands: metabolism, water intake, and biometric validation
// ABOUTME: Reads biometrics from flags and prints JSON results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

use super::{print_json, BiometricArgs};
use ketoflow::{
    config::NutritionConfig,
    errors::AppResult,
    intelligence::metabolism::{
        compute_user_metabolism_with, compute_water_intake_liters_with, validate_biometrics_with,
    },
    models::ActivityLevel,
};
use serde_json::json;
use std::process::ExitCode;
use tracing::warn;

/// Print BMR, TDEE, and macro targets
pub fn metabolism(args: &BiometricArgs, config: &NutritionConfig) -> AppResult<ExitCode> {
    let biometrics = args.biometrics();
    for violation in validate_biometrics_with(&biometrics, &config.biometric_ranges) {
        warn!("{}", violation);
    }
    if biometrics.activity_level == ActivityLevel::Unrecognized {
        warn!("Unrecognized activity level, using the moderate multiplier");
    }

    print_json(&compute_user_metabolism_with(&biometrics, config))?;
    Ok(ExitCode::SUCCESS)
}

/// Print recommended water intake in litres
pub fn water(
    weight: f64,
    activity: ActivityLevel,
    config: &NutritionConfig,
) -> AppResult<ExitCode> {
    let liters = compute_water_intake_liters_with(weight, activity, config);
    print_json(&json!({ "liters": liters }))?;
    Ok(ExitCode::SUCCESS)
}

/// Print every violated range; exit code 1 when there is any
pub fn validate(args: &BiometricArgs, config: &NutritionConfig) -> ExitCode {
    let violations = validate_biometrics_with(&args.biometrics(), &config.biometric_ranges);
    if violations.is_empty() {
        println!("All biometrics are within range");
        return ExitCode::SUCCESS;
    }
    for violation in &violations {
        println!("{}: {} ({})", violation.field, violation, violation.value);
    }
    ExitCode::FAILURE
}
