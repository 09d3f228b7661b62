// ABOUTME: Client-side state stores for the user profile, food log, and fasting sessions
// ABOUTME: Each store persists a JSON snapshot through LocalStorage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

/// Running fast and fasting history
pub mod fasting;
/// Today's foods and per-day history
pub mod food;
/// Active profile and macro targets
pub mod user;

pub use fasting::FastingTracker;
pub use food::FoodLog;
pub use user::{UserState, UserStore};
