// ABOUTME: In-memory profile repository for local mode and tests
// ABOUTME: Concurrent map of user id to profile, onboarding flag, and macro targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

use super::ProfileRepository;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use dashmap::DashMap;
use ketoflow_core::models::{MacroTargets, ProfileUpdate, UserProfile};
use std::sync::Arc;

#[derive(Debug, Clone)]
struct StoredUser {
    profile: UserProfile,
    onboarded: bool,
    macro_targets: Option<MacroTargets>,
}

/// Profile repository held entirely in process memory
///
/// Clones share the same underlying map, so one instance can be handed to
/// several stores.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    users: Arc<DashMap<String, StoredUser>>,
}

impl InMemoryProfileRepository {
    /// Create an empty repository
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles
    #[must_use]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    /// True when no profiles are stored
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn get_profile(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        Ok(self.users.get(user_id).map(|user| user.profile.clone()))
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> AppResult<()> {
        self.users
            .entry(profile.id.clone())
            .and_modify(|user| user.profile = profile.clone())
            .or_insert_with(|| StoredUser {
                profile: profile.clone(),
                onboarded: false,
                macro_targets: None,
            });
        Ok(())
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> AppResult<UserProfile> {
        let mut user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| AppError::not_found(format!("Profile for user {user_id}")))?;
        user.profile.apply_update(update);
        Ok(user.profile.clone())
    }

    async fn set_onboarded(&self, user_id: &str, onboarded: bool) -> AppResult<()> {
        let mut user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| AppError::not_found(format!("Profile for user {user_id}")))?;
        user.onboarded = onboarded;
        Ok(())
    }

    async fn is_onboarded(&self, user_id: &str) -> AppResult<bool> {
        Ok(self.users.get(user_id).is_some_and(|user| user.onboarded))
    }

    async fn get_macro_targets(&self, user_id: &str) -> AppResult<Option<MacroTargets>> {
        Ok(self.users.get(user_id).and_then(|user| user.macro_targets))
    }

    async fn set_macro_targets(&self, user_id: &str, targets: &MacroTargets) -> AppResult<()> {
        let mut user = self
            .users
            .get_mut(user_id)
            .ok_or_else(|| AppError::not_found(format!("Profile for user {user_id}")))?;
        user.macro_targets = Some(*targets);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ketoflow_core::errors::ErrorCode;

    #[tokio::test]
    async fn test_upsert_keeps_onboarding_flag() {
        let repo = InMemoryProfileRepository::new();
        let mut profile = UserProfile::new_registered("user_1", "a@example.com");
        repo.upsert_profile(&profile).await.unwrap();
        repo.set_onboarded("user_1", true).await.unwrap();

        profile.email = "b@example.com".into();
        repo.upsert_profile(&profile).await.unwrap();

        assert!(repo.is_onboarded("user_1").await.unwrap());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_user_errors_on_write() {
        let repo = InMemoryProfileRepository::new();
        let err = repo.set_onboarded("ghost", true).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ResourceNotFound);
        assert!(!repo.is_onboarded("ghost").await.unwrap());
    }
}
