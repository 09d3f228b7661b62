// ABOUTME: Shared test utilities and fixtures for integration tests
// ABOUTME: Provides quiet logging setup plus biometric and profile builders
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow
#![allow(
    dead_code,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions
)]
//! Shared test utilities for `ketoflow`

use ketoflow::models::{ActivityLevel, PrimaryGoal, Sex, UserBiometrics, UserProfile};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// 80 kg, 180 cm, 30 year old male, moderately active, losing 0.5 kg/week
pub fn reference_biometrics() -> UserBiometrics {
    UserBiometrics {
        weight_kg: 80.0,
        target_weight_kg: 70.0,
        height_cm: 180.0,
        age_years: 30.0,
        sex: Sex::Male,
        activity_level: ActivityLevel::Moderate,
        goal: PrimaryGoal::WeightLoss,
        weekly_weight_loss_target_kg: 0.5,
    }
}

/// Onboarding-complete profile matching [`reference_biometrics`]
pub fn reference_profile(id: &str) -> UserProfile {
    let mut profile = UserProfile::new_registered(id, format!("{id}@example.com"));
    profile.personal_info.age = 30;
    profile.personal_info.gender = Sex::Male;
    profile.personal_info.height = 180.0;
    profile.personal_info.current_weight = 80.0;
    profile.personal_info.target_weight = 70.0;
    profile.personal_info.activity_level = ActivityLevel::Moderate;
    profile.goals.primary = PrimaryGoal::WeightLoss;
    profile.goals.weekly_weight_loss_target = 0.5;
    profile
}
