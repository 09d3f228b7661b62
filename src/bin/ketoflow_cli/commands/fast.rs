// ABOUTME: Fasting commands for ketoflow-cli: start, end, stage, and status
// ABOUTME: Maps protocols to their default fasting window lengths
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

use super::{parse_wire, print_json};
use clap::Subcommand;
use ketoflow::{
    errors::{AppError, AppResult},
    models::{FastingProtocol, FastingSessionUpdate, FastingStage},
    storage::LocalStorage,
    stores::FastingTracker,
};
use serde_json::json;
use std::process::ExitCode;
use tracing::info;

#[non_exhaustive]
#[derive(Subcommand)]
pub enum FastCommand {
    /// Start a fast, replacing any running one
    Start {
        /// Protocol (16:8, 18:6, OMAD, custom)
        #[arg(long, default_value = "16:8", value_parser = parse_wire::<FastingProtocol>)]
        protocol: FastingProtocol,

        /// Planned length in hours (required for custom)
        #[arg(long)]
        hours: Option<f64>,
    },

    /// End the running fast
    End,

    /// Record the stage the running fast has reached
    Stage {
        /// Stage (digestion, fatBurning, ketosis, autophagy)
        #[arg(value_parser = parse_wire::<FastingStage>)]
        stage: FastingStage,
    },

    /// Show the running fast, elapsed hours, and streak
    Status,
}

/// Fasting window implied by a protocol
const fn default_hours(protocol: FastingProtocol) -> Option<f64> {
    match protocol {
        FastingProtocol::SixteenEight => Some(16.0),
        FastingProtocol::EighteenSix => Some(18.0),
        FastingProtocol::Omad => Some(23.0),
        FastingProtocol::Custom => None,
    }
}

/// Dispatch a fasting command
pub async fn run(command: FastCommand, storage: &LocalStorage) -> AppResult<ExitCode> {
    let mut tracker = FastingTracker::load(storage).await?;

    match command {
        FastCommand::Start { protocol, hours } => {
            let hours = hours.or_else(|| default_hours(protocol)).ok_or_else(|| {
                AppError::invalid_input("Custom fasts need --hours")
            })?;
            let session = tracker.start_fasting(protocol, hours)?;
            info!(session_id = %session.id, "Started {hours}h fast");
            print_json(session)?;
        }
        FastCommand::End => {
            let Some(session) = tracker.end_fasting() else {
                println!("No fast is running");
                return Ok(ExitCode::FAILURE);
            };
            print_json(session)?;
        }
        FastCommand::Stage { stage } => {
            let update = FastingSessionUpdate {
                current_stage: Some(stage),
                ..FastingSessionUpdate::default()
            };
            if !tracker.update_current_session(&update) {
                println!("No fast is running");
                return Ok(ExitCode::FAILURE);
            }
        }
        FastCommand::Status => {
            print_json(&json!({
                "session": tracker.current_session(),
                "elapsedHours": tracker.current_duration_hours(),
                "streakDays": tracker.fasting_streak(),
                "completedFasts": tracker.history().len(),
            }))?;
            return Ok(ExitCode::SUCCESS);
        }
    }

    tracker.persist(storage).await?;
    Ok(ExitCode::SUCCESS)
}
