// ABOUTME: Intelligence module grouping the nutrition and metabolism calculations
// ABOUTME: Re-exports the metabolism engine functions for callers outside the crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

/// BMR, TDEE, macro targets, hydration, and biometric validation
pub mod metabolism;

pub use metabolism::{
    compute_bmr, compute_bmr_with, compute_macro_targets, compute_macro_targets_with,
    compute_tdee, compute_tdee_with, compute_user_metabolism, compute_user_metabolism_with,
    compute_water_intake_liters, compute_water_intake_liters_with, validate_biometrics,
    validate_biometrics_with, validate_profile_update,
};
