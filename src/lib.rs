// ABOUTME: Main library entry point for the Ketoflow keto diet and fasting engine
// ABOUTME: Exposes the metabolism engine, profile repositories, and client-side stores
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

#![deny(unsafe_code)]

//! # Ketoflow
//!
//! Metabolism engine and client-side state for a ketogenic diet and
//! intermittent fasting tracker.
//!
//! ## Architecture
//!
//! - **Intelligence**: pure BMR, TDEE, macro target, hydration, and validation functions
//! - **Repositories**: the `ProfileRepository` seam with in-memory and remote backends
//! - **Stores**: user profile, food log, and fasting tracker state
//! - **Storage**: JSON snapshots of store state on disk
//! - **Config**: nutrition constants and environment settings
//!
//! ## Example Usage
//!
//! ```rust
//! use ketoflow::intelligence::metabolism::compute_user_metabolism;
//! use ketoflow::models::{ActivityLevel, PrimaryGoal, Sex, UserBiometrics};
//!
//! let result = compute_user_metabolism(&UserBiometrics {
//!     weight_kg: 80.0,
//!     target_weight_kg: 70.0,
//!     height_cm: 180.0,
//!     age_years: 30.0,
//!     sex: Sex::Male,
//!     activity_level: ActivityLevel::Moderate,
//!     goal: PrimaryGoal::WeightLoss,
//!     weekly_weight_loss_target_kg: 0.5,
//! });
//! assert_eq!(result.bmr, 1780);
//! assert_eq!(result.macro_targets.calories, 2209);
//! ```

/// Configuration management
pub mod config;

/// Application error types
pub mod errors;

/// Metabolism engine
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// Profile persistence backends
pub mod repositories;

/// On-disk JSON storage for store snapshots
pub mod storage;

/// Client-side state stores
pub mod stores;

pub use ketoflow_core::{constants, models};
