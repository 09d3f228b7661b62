// ABOUTME: Core types and constants for the Ketoflow diet and fasting tracker
// ABOUTME: Foundation crate with error handling, domain models, and nutrition constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

#![deny(unsafe_code)]

//! # Ketoflow Core
//!
//! Foundation crate providing shared types and constants for the Ketoflow
//! tracker. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Nutrition constants, validation ranges, and storage keys
//! - **models**: User profile, biometrics, food log, and fasting session records

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models (profile, biometrics, food entries, fasting sessions)
pub mod models;
