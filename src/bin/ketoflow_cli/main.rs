// ABOUTME: Ketoflow CLI - metabolism calculations plus profile, food, and fasting tracking
// ABOUTME: Parses commands, initializes logging and configuration, and dispatches to handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow
//!
//! Usage:
//! ```bash
//! # Daily targets for a set of biometrics
//! ketoflow-cli metabolism --weight 80 --height 180 --age 30 --sex male --activity moderate
//!
//! # Check biometrics against the accepted ranges (exit code 1 on violations)
//! ketoflow-cli validate --weight 80 --height 50 --age 10
//!
//! # Recommended water intake
//! ketoflow-cli water --weight 75 --activity very_active
//!
//! # Create the local profile and log food against its targets
//! ketoflow-cli user init --email me@example.com --weight 80 --height 180 --age 30
//! ketoflow-cli food add --name "Avocado" --calories 160 --carbs 2 --protein 2 --fat 15
//! ketoflow-cli food today
//!
//! # Track a 16:8 fast
//! ketoflow-cli fast start --protocol 16:8
//! ketoflow-cli fast status
//! ```

mod commands;

use clap::{Parser, Subcommand};
use commands::{BiometricArgs, FastCommand, FoodCommand, UserCommand};
use ketoflow::{
    config::{environment::LogLevel, AppConfig, NutritionConfig},
    logging::LoggingConfig,
    models::ActivityLevel,
    storage::LocalStorage,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, warn};

#[derive(Parser)]
#[command(
    name = "ketoflow-cli",
    about = "Ketoflow keto diet and fasting tracker",
    long_about = "Computes BMR, TDEE, and keto macro targets, and tracks a local profile, food log, and fasting sessions."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data directory override (defaults to `KETOFLOW_DATA_DIR` or .ketoflow)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Compute BMR, TDEE, and macro targets
    Metabolism(BiometricArgs),

    /// Compute recommended daily water intake
    Water {
        /// Body weight in kilograms
        #[arg(long)]
        weight: f64,

        /// Activity level (sedentary, light, moderate, active, `very_active`)
        #[arg(long, default_value = "moderate", value_parser = commands::parse_activity)]
        activity: ActivityLevel,
    },

    /// Validate biometrics against the accepted ranges
    Validate(BiometricArgs),

    /// Local profile commands
    User {
        #[command(subcommand)]
        action: UserCommand,
    },

    /// Food log commands
    Food {
        #[command(subcommand)]
        action: FoodCommand,
    },

    /// Fasting commands
    Fast {
        #[command(subcommand)]
        action: FastCommand,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.with_level(LogLevel::Debug);
    }
    logging.init()?;

    let mut config = AppConfig::from_env()?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    let nutrition = NutritionConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load nutrition config: {}, using defaults", e);
        NutritionConfig::default()
    });
    let storage = LocalStorage::new(&config.data_dir);
    debug!("Using data directory {}", storage.root().display());

    let exit = match cli.command {
        Command::Metabolism(args) => commands::calc::metabolism(&args, &nutrition)?,
        Command::Water { weight, activity } => {
            commands::calc::water(weight, activity, &nutrition)?
        }
        Command::Validate(args) => commands::calc::validate(&args, &nutrition),
        Command::User { action } => {
            commands::user::run(action, &config, &nutrition, &storage).await?
        }
        Command::Food { action } => commands::food::run(action, &storage).await?,
        Command::Fast { action } => commands::fast::run(action, &storage).await?,
    };
    Ok(exit)
}
