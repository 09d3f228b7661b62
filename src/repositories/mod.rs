// ABOUTME: Profile repository abstraction over local and remote profile backends
// ABOUTME: Defines the ProfileRepository trait and the macro target sync helper built on it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

//! Profile persistence
//!
//! Stores and the CLI depend on the [`ProfileRepository`] trait only. The
//! concrete backend is picked once at startup by [`factory::ProfileStore`].

/// Backend selection from configuration
pub mod factory;
/// Process-local backend
pub mod memory;
/// Hosted REST database backend
pub mod remote;

pub use factory::ProfileStore;
pub use memory::InMemoryProfileRepository;
pub use remote::RemoteProfileRepository;

use crate::config::nutrition::NutritionConfig;
use crate::errors::{AppError, AppResult};
use crate::intelligence::metabolism::compute_user_metabolism_with;
use async_trait::async_trait;
use ketoflow_core::models::{MacroTargets, MetabolismResult, ProfileUpdate, UserProfile};
use tracing::{debug, info};

/// Persistence for user profiles, onboarding state, and macro targets
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;

    /// Fetch a profile, `None` if the user has none
    async fn get_profile(&self, user_id: &str) -> AppResult<Option<UserProfile>>;

    /// Create or fully replace a profile
    async fn upsert_profile(&self, profile: &UserProfile) -> AppResult<()>;

    /// Apply a partial update and return the stored result
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no profile
    async fn update_profile(&self, user_id: &str, update: &ProfileUpdate)
        -> AppResult<UserProfile>;

    /// Record whether the user finished onboarding
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if the user has no profile
    async fn set_onboarded(&self, user_id: &str, onboarded: bool) -> AppResult<()>;

    /// Whether the user finished onboarding; false for unknown users
    async fn is_onboarded(&self, user_id: &str) -> AppResult<bool>;

    /// Fetch stored macro targets
    async fn get_macro_targets(&self, user_id: &str) -> AppResult<Option<MacroTargets>>;

    /// Create or replace stored macro targets
    async fn set_macro_targets(&self, user_id: &str, targets: &MacroTargets) -> AppResult<()>;
}

/// Recompute a user's targets from the stored profile and write them back
///
/// Returns `Ok(None)` without writing when the profile lacks age, height,
/// or weight.
///
/// # Errors
///
/// Returns `ResourceNotFound` for unknown users, or the backend's error if
/// the read or write fails
pub async fn calculate_and_sync_macro_targets<R>(
    repository: &R,
    user_id: &str,
    config: &NutritionConfig,
) -> AppResult<Option<MetabolismResult>>
where
    R: ProfileRepository + ?Sized,
{
    let profile = repository
        .get_profile(user_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Profile for user {user_id}")))?;

    let biometrics = profile.biometrics();
    if !biometrics.has_required_measurements() {
        debug!(
            user_id,
            "Skipping macro target sync: profile is missing measurements"
        );
        return Ok(None);
    }

    let result = compute_user_metabolism_with(&biometrics, config);
    repository
        .set_macro_targets(user_id, &result.macro_targets)
        .await?;
    info!(
        user_id,
        backend = repository.backend_name(),
        calories = result.macro_targets.calories,
        "Synced macro targets"
    );
    Ok(Some(result))
}
