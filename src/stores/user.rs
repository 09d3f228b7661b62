// ABOUTME: User store holding the active profile, macro targets, and onboarding flag
// ABOUTME: Recomputes targets on biometric changes, locally or through a profile repository
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

use crate::config::nutrition::NutritionConfig;
use crate::errors::{AppError, AppResult};
use crate::intelligence::metabolism::{
    compute_user_metabolism_with, compute_water_intake_liters_with, validate_profile_update,
};
use crate::repositories::{calculate_and_sync_macro_targets, ProfileRepository};
use crate::storage::LocalStorage;
use ketoflow_core::constants::storage_keys;
use ketoflow_core::models::{MacroTargets, MetabolismResult, ProfileUpdate, UserProfile};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Persisted portion of the user store
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserState {
    /// Active profile
    pub user: Option<UserProfile>,
    /// Current daily targets
    pub macro_targets: Option<MacroTargets>,
    /// Whether onboarding finished
    pub is_onboarded: bool,
}

/// Active user's profile and derived targets
///
/// A local store computes targets in process. A synced store writes profile
/// changes to its repository and takes targets from the repository sync;
/// sync failures are logged and the previous targets are kept.
pub struct UserStore {
    state: UserState,
    repository: Option<Arc<dyn ProfileRepository>>,
    config: NutritionConfig,
}

impl fmt::Debug for UserStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserStore")
            .field("state", &self.state)
            .field(
                "repository",
                &self.repository.as_ref().map(|repo| repo.backend_name()),
            )
            .finish_non_exhaustive()
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::local(NutritionConfig::DEFAULT)
    }
}

impl UserStore {
    /// Store that computes targets locally
    #[must_use]
    pub fn local(config: NutritionConfig) -> Self {
        Self {
            state: UserState::default(),
            repository: None,
            config,
        }
    }

    /// Store that mirrors changes to a profile repository
    #[must_use]
    pub fn synced(repository: Arc<dyn ProfileRepository>, config: NutritionConfig) -> Self {
        Self {
            state: UserState::default(),
            repository: Some(repository),
            config,
        }
    }

    /// True when changes go through a repository
    #[must_use]
    pub const fn is_synced(&self) -> bool {
        self.repository.is_some()
    }

    /// Active profile
    #[must_use]
    pub const fn user(&self) -> Option<&UserProfile> {
        self.state.user.as_ref()
    }

    /// Current targets
    #[must_use]
    pub const fn macro_targets(&self) -> Option<MacroTargets> {
        self.state.macro_targets
    }

    /// Whether onboarding finished
    #[must_use]
    pub const fn is_onboarded(&self) -> bool {
        self.state.is_onboarded
    }

    /// Replace the active profile and recompute targets
    pub async fn set_user(&mut self, user: UserProfile) {
        if let Some(repo) = &self.repository {
            if let Err(e) = repo.upsert_profile(&user).await {
                warn!(user_id = %user.id, "Failed to sync profile: {}", e);
            }
        }
        self.state.user = Some(user);
        self.recalculate_macros().await;
    }

    /// Apply a typed partial update to the active profile
    ///
    /// Does nothing without an active profile. Targets are recomputed only
    /// when the update touches personal info or goals.
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` listing every violated range; the profile is
    /// left unchanged
    pub async fn update_user(&mut self, update: &ProfileUpdate) -> AppResult<()> {
        let Some(user) = self.state.user.as_mut() else {
            debug!("Ignoring profile update without an active user");
            return Ok(());
        };

        let violations = validate_profile_update(update, &self.config.biometric_ranges);
        if !violations.is_empty() {
            let details: Vec<String> = violations.iter().map(ToString::to_string).collect();
            return Err(AppError::value_out_of_range(details.join("; ")));
        }
        user.apply_update(update);

        if let Some(repo) = &self.repository {
            if let Err(e) = repo.update_profile(&user.id, update).await {
                warn!(user_id = %user.id, "Failed to sync profile update: {}", e);
            }
        }

        if update.touches_metabolism() {
            self.recalculate_macros().await;
        }
        Ok(())
    }

    /// Overwrite the current targets
    pub fn set_macro_targets(&mut self, targets: MacroTargets) {
        self.state.macro_targets = Some(targets);
    }

    /// Record onboarding state, mirroring it to the repository when synced
    pub async fn set_onboarded(&mut self, onboarded: bool) {
        self.state.is_onboarded = onboarded;
        if let (Some(repo), Some(user)) = (&self.repository, &self.state.user) {
            if let Err(e) = repo.set_onboarded(&user.id, onboarded).await {
                warn!(user_id = %user.id, "Failed to sync onboarding state: {}", e);
            }
        }
    }

    /// Forget the active profile, targets, and onboarding state
    pub fn clear_user(&mut self) {
        self.state = UserState::default();
    }

    /// Recompute targets from the active profile
    ///
    /// Skipped when there is no profile or it lacks age, height, or weight.
    pub async fn recalculate_macros(&mut self) {
        let Some(user) = &self.state.user else {
            return;
        };
        let biometrics = user.biometrics();
        if !biometrics.has_required_measurements() {
            debug!(user_id = %user.id, "Skipping target recomputation: missing measurements");
            return;
        }

        match &self.repository {
            None => {
                let result = compute_user_metabolism_with(&biometrics, &self.config);
                debug!(
                    user_id = %user.id,
                    calories = result.macro_targets.calories,
                    "Recomputed macro targets"
                );
                self.state.macro_targets = Some(result.macro_targets);
            }
            Some(repo) => {
                match calculate_and_sync_macro_targets(repo.as_ref(), &user.id, &self.config).await
                {
                    Ok(Some(result)) => self.state.macro_targets = Some(result.macro_targets),
                    Ok(None) => {}
                    Err(e) => {
                        warn!(user_id = %user.id, "Macro target sync failed, keeping previous targets: {}", e);
                    }
                }
            }
        }
    }

    /// Full metabolism result for the active profile
    #[must_use]
    pub fn metabolism(&self) -> Option<MetabolismResult> {
        let biometrics = self.state.user.as_ref()?.biometrics();
        biometrics
            .has_required_measurements()
            .then(|| compute_user_metabolism_with(&biometrics, &self.config))
    }

    /// Recommended daily water intake for the active profile
    #[must_use]
    pub fn water_intake_liters(&self) -> Option<f64> {
        let info = &self.state.user.as_ref()?.personal_info;
        (info.current_weight != 0.0).then(|| {
            compute_water_intake_liters_with(info.current_weight, info.activity_level, &self.config)
        })
    }

    /// Copy of the persisted state
    #[must_use]
    pub fn snapshot(&self) -> UserState {
        self.state.clone()
    }

    /// Replace the state wholesale, without recomputation
    pub fn restore(&mut self, state: UserState) {
        self.state = state;
    }

    /// Save the state under the user storage key
    ///
    /// # Errors
    ///
    /// Returns an error if the storage write fails
    pub async fn persist(&self, storage: &LocalStorage) -> AppResult<()> {
        storage.set_item(storage_keys::USER, &self.state).await
    }

    /// Load previously saved state; returns false when nothing was stored
    ///
    /// # Errors
    ///
    /// Returns an error if the stored state cannot be read or decoded
    pub async fn load(&mut self, storage: &LocalStorage) -> AppResult<bool> {
        match storage.get_item::<UserState>(storage_keys::USER).await? {
            Some(state) => {
                self.state = state;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
