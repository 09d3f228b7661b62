// ABOUTME: Biometric input record and metabolism result types
// ABOUTME: Sex, activity level, macro targets, and validation descriptors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

use super::profile::PrimaryGoal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sex used to select the Mifflin-St Jeor offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    /// Male offset (+5)
    #[default]
    Male,
    /// Female offset (-161)
    Female,
    /// Mean of the male and female offsets (-78)
    Other,
}

/// Self-reported activity level
///
/// Strings outside the known set map to `Unrecognized` instead of failing,
/// so a stale or hand-edited profile still produces targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    Sedentary,
    /// Light exercise 1-3 days/week
    Light,
    /// Moderate exercise 3-5 days/week
    #[default]
    Moderate,
    /// Hard exercise 6-7 days/week
    Active,
    /// Very hard exercise or a physical job
    VeryActive,
    /// Any value outside the known set
    #[serde(other)]
    Unrecognized,
}

impl ActivityLevel {
    /// Wire name of this level
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sedentary => "sedentary",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Active => "active",
            Self::VeryActive => "very_active",
            Self::Unrecognized => "unrecognized",
        }
    }
}

impl From<&str> for ActivityLevel {
    fn from(value: &str) -> Self {
        match value {
            "sedentary" => Self::Sedentary,
            "light" => Self::Light,
            "moderate" => Self::Moderate,
            "active" => Self::Active,
            "very_active" => Self::VeryActive,
            _ => Self::Unrecognized,
        }
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Biometric inputs consumed by the metabolism engine
///
/// Ranges are advisory: the engine computes with whatever numbers it is
/// given, so callers run validation first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBiometrics {
    /// Current body weight (kg)
    pub weight_kg: f64,
    /// Target body weight (kg)
    pub target_weight_kg: f64,
    /// Height (cm)
    pub height_cm: f64,
    /// Age (years)
    pub age_years: f64,
    /// Sex for the BMR offset
    pub sex: Sex,
    /// Activity level for TDEE and hydration
    pub activity_level: ActivityLevel,
    /// Primary goal driving the calorie target
    pub goal: PrimaryGoal,
    /// Weekly loss target (kg), only used for weight loss
    pub weekly_weight_loss_target_kg: f64,
}

impl UserBiometrics {
    /// True when age, height, and current weight are all set
    #[must_use]
    pub fn has_required_measurements(&self) -> bool {
        self.age_years != 0.0 && self.height_cm != 0.0 && self.weight_kg != 0.0
    }
}

/// Daily calorie and macro targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroTargets {
    /// Target calories (kcal/day)
    pub calories: i64,
    /// Carbohydrates (g/day)
    pub carbs_grams: i64,
    /// Protein (g/day)
    pub protein_grams: i64,
    /// Fat (g/day)
    pub fat_grams: i64,
}

/// Full result of one metabolism computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetabolismResult {
    /// Basal metabolic rate (kcal/day, rounded)
    pub bmr: i64,
    /// Total daily energy expenditure (kcal/day, rounded)
    pub tdee: i64,
    /// Calorie and macro targets
    pub macro_targets: MacroTargets,
}

/// Biometric field checked by validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BiometricField {
    /// Age in years
    Age,
    /// Height in centimetres
    Height,
    /// Current body weight in kilograms
    CurrentWeight,
    /// Target body weight in kilograms
    TargetWeight,
}

impl BiometricField {
    /// Field name as reported to callers
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Age => "age",
            Self::Height => "height",
            Self::CurrentWeight => "currentWeight",
            Self::TargetWeight => "targetWeight",
        }
    }
}

impl fmt::Display for BiometricField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One violated biometric range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiometricViolation {
    /// Field that failed
    pub field: BiometricField,
    /// Value that was checked
    pub value: f64,
    /// Inclusive lower bound
    pub min: f64,
    /// Inclusive upper bound
    pub max: f64,
}

impl fmt::Display for BiometricViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (label, unit) = match self.field {
            BiometricField::Age => ("Age", "years"),
            BiometricField::Height => ("Height", "cm"),
            BiometricField::CurrentWeight => ("Current weight", "kg"),
            BiometricField::TargetWeight => ("Target weight", "kg"),
        };
        write!(
            f,
            "{label} must be between {} and {} {unit}",
            self.min, self.max
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_level_unknown_strings_are_unrecognized() {
        assert_eq!(ActivityLevel::from("very_active"), ActivityLevel::VeryActive);
        assert_eq!(ActivityLevel::from("bogus"), ActivityLevel::Unrecognized);
        assert_eq!(ActivityLevel::from(""), ActivityLevel::Unrecognized);

        let parsed: ActivityLevel = serde_json::from_str("\"couch\"").unwrap();
        assert_eq!(parsed, ActivityLevel::Unrecognized);
        let parsed: ActivityLevel = serde_json::from_str("\"light\"").unwrap();
        assert_eq!(parsed, ActivityLevel::Light);
    }

    #[test]
    fn test_violation_message_names_range() {
        let violation = BiometricViolation {
            field: BiometricField::Age,
            value: 10.0,
            min: 13.0,
            max: 120.0,
        };
        assert_eq!(violation.to_string(), "Age must be between 13 and 120 years");
    }
}
