// ABOUTME: Configuration management module for nutrition constants and runtime settings
// ABOUTME: Handles environment configs, metabolism formula parameters, and config errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

//! Configuration module for Ketoflow
//!
//! - **Environment**: deployment mode, logging, storage directory, and profile backend
//! - **Nutrition**: formula coefficients, macro split, hydration, and biometric ranges

/// Environment and backend configuration
pub mod environment;
/// Configuration error types
pub mod error;
/// Metabolism formula configuration
pub mod nutrition;

pub use environment::{AppConfig, Environment, LogLevel, ProfileBackendConfig, RemoteBackendConfig};
pub use error::ConfigError;
pub use nutrition::{
    ActivityFactorsConfig, BiometricRanges, BmrConfig, CalorieGoalConfig, HydrationConfig,
    KetoMacroConfig, NutritionConfig,
};
