// ABOUTME: Profile commands for ketoflow-cli: init, show, update, and clear
// ABOUTME: Drives the user store, syncing through the remote repository when configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

use super::{parse_activity, parse_wire, print_json, BiometricArgs};
use clap::Subcommand;
use ketoflow::{
    config::{AppConfig, NutritionConfig, ProfileBackendConfig},
    constants::storage_keys,
    errors::{AppError, AppResult},
    intelligence::metabolism::validate_biometrics_with,
    models::{
        ActivityLevel, GoalsUpdate, PersonalInfoUpdate, PrimaryGoal, ProfileUpdate, UserProfile,
    },
    repositories::ProfileStore,
    storage::LocalStorage,
    stores::UserStore,
};
use serde_json::json;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

#[non_exhaustive]
#[derive(Subcommand)]
pub enum UserCommand {
    /// Create the profile and compute its targets
    Init {
        /// Account email
        #[arg(long)]
        email: String,

        /// User id (generated if omitted)
        #[arg(long)]
        id: Option<String>,

        #[command(flatten)]
        biometrics: BiometricArgs,
    },

    /// Show the profile, targets, and water recommendation
    Show,

    /// Change biometrics or goals and recompute targets
    Update {
        /// New current weight in kilograms
        #[arg(long)]
        weight: Option<f64>,

        /// New target weight in kilograms
        #[arg(long)]
        target_weight: Option<f64>,

        /// New height in centimetres
        #[arg(long)]
        height: Option<f64>,

        /// New age in years
        #[arg(long)]
        age: Option<u32>,

        /// New activity level
        #[arg(long, value_parser = parse_activity)]
        activity: Option<ActivityLevel>,

        /// New goal
        #[arg(long, value_parser = parse_wire::<PrimaryGoal>)]
        goal: Option<PrimaryGoal>,

        /// New weekly weight loss target in kilograms
        #[arg(long)]
        weekly_loss: Option<f64>,
    },

    /// Delete the stored profile
    Clear,
}

/// Dispatch a profile command
pub async fn run(
    command: UserCommand,
    config: &AppConfig,
    nutrition: &NutritionConfig,
    storage: &LocalStorage,
) -> AppResult<ExitCode> {
    match command {
        UserCommand::Init {
            email,
            id,
            biometrics,
        } => init(config, nutrition, storage, email, id, &biometrics).await,
        UserCommand::Show => {
            let store = load_store(config, nutrition, storage).await?;
            show(&store)?;
            Ok(ExitCode::SUCCESS)
        }
        UserCommand::Update {
            weight,
            target_weight,
            height,
            age,
            activity,
            goal,
            weekly_loss,
        } => {
            let personal_info = PersonalInfoUpdate {
                age,
                height,
                current_weight: weight,
                target_weight,
                activity_level: activity,
                ..PersonalInfoUpdate::default()
            };
            let goals = GoalsUpdate {
                primary: goal,
                weekly_weight_loss_target: weekly_loss,
                ..GoalsUpdate::default()
            };
            let update = ProfileUpdate {
                personal_info: (personal_info != PersonalInfoUpdate::default())
                    .then_some(personal_info),
                goals: (goals != GoalsUpdate::default()).then_some(goals),
                ..ProfileUpdate::default()
            };

            let mut store = load_store(config, nutrition, storage).await?;
            if store.user().is_none() {
                return Err(AppError::not_found("Local profile (run `user init` first)"));
            }
            store.update_user(&update).await?;
            store.persist(storage).await?;
            show(&store)?;
            Ok(ExitCode::SUCCESS)
        }
        UserCommand::Clear => {
            storage.remove_item(storage_keys::USER).await?;
            info!("Removed local profile");
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn init(
    config: &AppConfig,
    nutrition: &NutritionConfig,
    storage: &LocalStorage,
    email: String,
    id: Option<String>,
    args: &BiometricArgs,
) -> AppResult<ExitCode> {
    let biometrics = args.biometrics();
    let violations = validate_biometrics_with(&biometrics, &nutrition.biometric_ranges);
    if !violations.is_empty() {
        for violation in &violations {
            println!("{violation}");
        }
        return Ok(ExitCode::FAILURE);
    }

    let mut profile =
        UserProfile::new_registered(id.unwrap_or_else(|| Uuid::new_v4().to_string()), email);
    // Age is whole years on the profile
    profile.personal_info.age = biometrics.age_years.round() as u32;
    profile.personal_info.gender = biometrics.sex;
    profile.personal_info.height = biometrics.height_cm;
    profile.personal_info.current_weight = biometrics.weight_kg;
    profile.personal_info.target_weight = biometrics.target_weight_kg;
    profile.personal_info.activity_level = biometrics.activity_level;
    profile.goals.primary = biometrics.goal;
    profile.goals.weekly_weight_loss_target = biometrics.weekly_weight_loss_target_kg;

    let mut store = new_store(config, nutrition)?;
    store.set_user(profile).await;
    store.set_onboarded(true).await;
    store.persist(storage).await?;
    info!("Saved profile to {}", storage.root().display());

    show(&store)?;
    Ok(ExitCode::SUCCESS)
}

fn new_store(config: &AppConfig, nutrition: &NutritionConfig) -> AppResult<UserStore> {
    match config.profile_backend {
        ProfileBackendConfig::Local => Ok(UserStore::local(*nutrition)),
        ProfileBackendConfig::Remote(_) => {
            let repository = ProfileStore::from_config(config)?;
            Ok(UserStore::synced(Arc::new(repository), *nutrition))
        }
    }
}

async fn load_store(
    config: &AppConfig,
    nutrition: &NutritionConfig,
    storage: &LocalStorage,
) -> AppResult<UserStore> {
    let mut store = new_store(config, nutrition)?;
    store.load(storage).await?;
    Ok(store)
}

fn show(store: &UserStore) -> AppResult<()> {
    print_json(&json!({
        "state": store.snapshot(),
        "metabolism": store.metabolism(),
        "waterLiters": store.water_intake_liters(),
        "synced": store.is_synced(),
    }))
}
