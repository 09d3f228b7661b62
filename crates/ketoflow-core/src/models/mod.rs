// ABOUTME: Core data models for profiles, biometrics, food logging, and fasting
// ABOUTME: Re-exports the typed records shared by the engine, stores, and repositories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

/// Biometric inputs and metabolism outputs
pub mod biometrics;
/// Fasting sessions, protocols, and stages
pub mod fasting;
/// Food log entries and macro totals
pub mod food;
/// User profile and typed partial updates
pub mod profile;

pub use biometrics::{
    ActivityLevel, BiometricField, BiometricViolation, MacroTargets, MetabolismResult, Sex,
    UserBiometrics,
};
pub use fasting::{FastingProtocol, FastingSession, FastingSessionUpdate, FastingStage};
pub use food::{FoodEntry, FoodEntryUpdate, FoodMacros, MealType};
pub use profile::{
    FastingExperience, Goals, GoalsUpdate, PersonalInfo, PersonalInfoUpdate, Preferences,
    PreferencesUpdate, PrimaryGoal, ProfileUpdate, Subscription, SubscriptionTier, UserProfile,
};
