// ABOUTME: Command handlers and shared argument types for ketoflow-cli
// ABOUTME: Provides wire-name value parsers and JSON output helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

pub mod calc;
pub mod fast;
pub mod food;
pub mod user;

pub use fast::FastCommand;
pub use food::FoodCommand;
pub use user::UserCommand;

use clap::Args;
use ketoflow::{
    errors::AppResult,
    models::{ActivityLevel, PrimaryGoal, Sex, UserBiometrics},
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

/// Biometric flags shared by the calculation commands
#[derive(Args, Debug, Clone)]
pub struct BiometricArgs {
    /// Current body weight in kilograms
    #[arg(long)]
    pub weight: f64,

    /// Target body weight in kilograms (defaults to current weight)
    #[arg(long)]
    pub target_weight: Option<f64>,

    /// Height in centimetres
    #[arg(long)]
    pub height: f64,

    /// Age in years
    #[arg(long)]
    pub age: f64,

    /// Sex (male, female, other)
    #[arg(long, default_value = "male", value_parser = parse_wire::<Sex>)]
    pub sex: Sex,

    /// Activity level (sedentary, light, moderate, active, `very_active`)
    #[arg(long, default_value = "moderate", value_parser = parse_activity)]
    pub activity: ActivityLevel,

    /// Goal (weightLoss, maintenance, muscleGain)
    #[arg(long, default_value = "weightLoss", value_parser = parse_wire::<PrimaryGoal>)]
    pub goal: PrimaryGoal,

    /// Weekly weight loss target in kilograms
    #[arg(long, default_value_t = 0.5)]
    pub weekly_loss: f64,
}

impl BiometricArgs {
    pub fn biometrics(&self) -> UserBiometrics {
        UserBiometrics {
            weight_kg: self.weight,
            target_weight_kg: self.target_weight.unwrap_or(self.weight),
            height_cm: self.height,
            age_years: self.age,
            sex: self.sex,
            activity_level: self.activity,
            goal: self.goal,
            weekly_weight_loss_target_kg: self.weekly_loss,
        }
    }
}

/// Parse a value by its serialized wire name
pub fn parse_wire<T: DeserializeOwned>(raw: &str) -> Result<T, String> {
    serde_json::from_value(Value::String(raw.to_owned()))
        .map_err(|_| format!("unrecognized value '{raw}'"))
}

/// Activity levels never fail to parse; unknown names fall back in the engine
#[allow(clippy::unnecessary_wraps)]
pub fn parse_activity(raw: &str) -> Result<ActivityLevel, String> {
    Ok(ActivityLevel::from(raw))
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
