// ABOUTME: Profile repository factory for configuration-based backend selection
// ABOUTME: Wraps the in-memory and remote backends behind one ProfileRepository value
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

use super::{InMemoryProfileRepository, ProfileRepository, RemoteProfileRepository};
use crate::config::environment::{AppConfig, ProfileBackendConfig};
use crate::errors::AppResult;
use async_trait::async_trait;
use ketoflow_core::models::{MacroTargets, ProfileUpdate, UserProfile};
use tracing::info;

/// Profile backend chosen at startup
#[derive(Clone)]
pub enum ProfileStore {
    /// Process-local profiles
    Memory(InMemoryProfileRepository),
    /// Hosted REST database
    Remote(RemoteProfileRepository),
}

impl ProfileStore {
    /// Build the backend named by the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the remote HTTP client cannot be built
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        match &config.profile_backend {
            ProfileBackendConfig::Local => {
                info!("Using in-memory profile repository");
                Ok(Self::Memory(InMemoryProfileRepository::new()))
            }
            ProfileBackendConfig::Remote(remote) => {
                info!("Using remote profile repository at {}", remote.base_url);
                Ok(Self::Remote(RemoteProfileRepository::new(remote.clone())?))
            }
        }
    }

    fn inner(&self) -> &dyn ProfileRepository {
        match self {
            Self::Memory(repo) => repo,
            Self::Remote(repo) => repo,
        }
    }
}

#[async_trait]
impl ProfileRepository for ProfileStore {
    fn backend_name(&self) -> &'static str {
        self.inner().backend_name()
    }

    async fn get_profile(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        self.inner().get_profile(user_id).await
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> AppResult<()> {
        self.inner().upsert_profile(profile).await
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> AppResult<UserProfile> {
        self.inner().update_profile(user_id, update).await
    }

    async fn set_onboarded(&self, user_id: &str, onboarded: bool) -> AppResult<()> {
        self.inner().set_onboarded(user_id, onboarded).await
    }

    async fn is_onboarded(&self, user_id: &str) -> AppResult<bool> {
        self.inner().is_onboarded(user_id).await
    }

    async fn get_macro_targets(&self, user_id: &str) -> AppResult<Option<MacroTargets>> {
        self.inner().get_macro_targets(user_id).await
    }

    async fn set_macro_targets(&self, user_id: &str, targets: &MacroTargets) -> AppResult<()> {
        self.inner().set_macro_targets(user_id, targets).await
    }
}
