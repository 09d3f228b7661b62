// ABOUTME: Remote profile repository speaking to a hosted PostgREST-style database over HTTP
// ABOUTME: Maps snake_case table rows for profiles and macro_targets onto domain models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

use super::ProfileRepository;
use crate::config::environment::RemoteBackendConfig;
use crate::errors::{AppError, AppResult, ErrorCode};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ketoflow_core::models::{
    ActivityLevel, FastingExperience, Goals, MacroTargets, PersonalInfo, Preferences,
    PrimaryGoal, ProfileUpdate, Sex, Subscription, SubscriptionTier, UserProfile,
};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

const SERVICE_NAME: &str = "profile database";
const PROFILES_TABLE: &str = "profiles";
const MACRO_TARGETS_TABLE: &str = "macro_targets";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct PersonalInfoRow {
    age: u32,
    gender: Sex,
    height: f64,
    current_weight: f64,
    target_weight: f64,
    activity_level: ActivityLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct GoalsRow {
    primary: PrimaryGoal,
    timeline: u32,
    weekly_weight_loss_target: f64,
}

impl Default for GoalsRow {
    fn default() -> Self {
        Self::from(&Goals::default())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct PreferencesRow {
    dietary_restrictions: Vec<String>,
    disliked_foods: Vec<String>,
    preferred_meal_times: Vec<String>,
    fasting_experience: FastingExperience,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct SubscriptionRow {
    tier: SubscriptionTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,
    features: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProfileRow {
    id: String,
    email: String,
    #[serde(default)]
    personal_info: PersonalInfoRow,
    #[serde(default)]
    goals: GoalsRow,
    #[serde(default)]
    preferences: PreferencesRow,
    #[serde(default)]
    subscription: SubscriptionRow,
}

#[derive(Debug, Deserialize)]
struct OnboardedRow {
    #[serde(default)]
    is_onboarded: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct MacroTargetsRow {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    user_id: Option<String>,
    calories: i64,
    carbs: i64,
    protein: i64,
    fat: i64,
}

impl From<&PersonalInfo> for PersonalInfoRow {
    fn from(info: &PersonalInfo) -> Self {
        Self {
            age: info.age,
            gender: info.gender,
            height: info.height,
            current_weight: info.current_weight,
            target_weight: info.target_weight,
            activity_level: info.activity_level,
        }
    }
}

impl From<PersonalInfoRow> for PersonalInfo {
    fn from(row: PersonalInfoRow) -> Self {
        Self {
            age: row.age,
            gender: row.gender,
            height: row.height,
            current_weight: row.current_weight,
            target_weight: row.target_weight,
            activity_level: row.activity_level,
        }
    }
}

impl From<&Goals> for GoalsRow {
    fn from(goals: &Goals) -> Self {
        Self {
            primary: goals.primary,
            timeline: goals.timeline_weeks,
            weekly_weight_loss_target: goals.weekly_weight_loss_target,
        }
    }
}

impl From<GoalsRow> for Goals {
    fn from(row: GoalsRow) -> Self {
        Self {
            primary: row.primary,
            timeline_weeks: row.timeline,
            weekly_weight_loss_target: row.weekly_weight_loss_target,
        }
    }
}

impl From<&Preferences> for PreferencesRow {
    fn from(preferences: &Preferences) -> Self {
        Self {
            dietary_restrictions: preferences.dietary_restrictions.clone(),
            disliked_foods: preferences.disliked_foods.clone(),
            preferred_meal_times: preferences.preferred_meal_times.clone(),
            fasting_experience: preferences.fasting_experience,
        }
    }
}

impl From<PreferencesRow> for Preferences {
    fn from(row: PreferencesRow) -> Self {
        Self {
            dietary_restrictions: row.dietary_restrictions,
            disliked_foods: row.disliked_foods,
            preferred_meal_times: row.preferred_meal_times,
            fasting_experience: row.fasting_experience,
        }
    }
}

impl From<&Subscription> for SubscriptionRow {
    fn from(subscription: &Subscription) -> Self {
        Self {
            tier: subscription.tier,
            expires_at: subscription.expires_at,
            features: subscription.features.clone(),
        }
    }
}

impl From<SubscriptionRow> for Subscription {
    fn from(row: SubscriptionRow) -> Self {
        Self {
            tier: row.tier,
            expires_at: row.expires_at,
            features: row.features,
        }
    }
}

impl From<&UserProfile> for ProfileRow {
    fn from(profile: &UserProfile) -> Self {
        Self {
            id: profile.id.clone(),
            email: profile.email.clone(),
            personal_info: (&profile.personal_info).into(),
            goals: (&profile.goals).into(),
            preferences: (&profile.preferences).into(),
            subscription: (&profile.subscription).into(),
        }
    }
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            personal_info: row.personal_info.into(),
            goals: row.goals.into(),
            preferences: row.preferences.into(),
            subscription: row.subscription.into(),
        }
    }
}

impl From<MacroTargetsRow> for MacroTargets {
    fn from(row: MacroTargetsRow) -> Self {
        Self {
            calories: row.calories,
            carbs_grams: row.carbs,
            protein_grams: row.protein,
            fat_grams: row.fat,
        }
    }
}

/// Profile repository backed by a hosted REST database
///
/// Talks to the `profiles` and `macro_targets` tables under `/rest/v1`,
/// authenticating with the project API key.
#[derive(Clone)]
pub struct RemoteProfileRepository {
    client: Client,
    config: RemoteBackendConfig,
}

impl RemoteProfileRepository {
    /// Create a repository for the configured endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(config: RemoteBackendConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                AppError::config(format!("Failed to build HTTP client: {e}")).with_source(e)
            })?;
        Ok(Self { client, config })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.config.base_url)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
    }

    async fn send(request: RequestBuilder) -> AppResult<Response> {
        let response = request.send().await.map_err(|e| {
            let code = if e.is_timeout() || e.is_connect() {
                ErrorCode::ExternalServiceUnavailable
            } else {
                ErrorCode::ExternalServiceError
            };
            AppError::new(code, format!("{SERVICE_NAME}: request failed: {e}")).with_source(e)
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        warn!("{} request failed with status {}: {}", SERVICE_NAME, status, text);
        let code = if status.is_server_error() {
            ErrorCode::ExternalServiceUnavailable
        } else {
            ErrorCode::ExternalServiceError
        };
        Err(AppError::new(
            code,
            format!("{SERVICE_NAME}: request failed with status {status}: {text}"),
        ))
    }

    async fn rows<T: DeserializeOwned>(response: Response) -> AppResult<Vec<T>> {
        response.json().await.map_err(|e| {
            AppError::external_service(SERVICE_NAME, format!("Failed to parse response: {e}"))
                .with_source(e)
        })
    }

    async fn fetch_profile_row(&self, user_id: &str) -> AppResult<Option<ProfileRow>> {
        let request = self
            .client
            .get(self.table_url(PROFILES_TABLE))
            .query(&[("id", format!("eq.{user_id}")), ("select", "*".to_owned())]);
        let response = Self::send(self.authorized(request)).await?;
        Ok(Self::rows::<ProfileRow>(response).await?.into_iter().next())
    }

    async fn patch_profile(&self, user_id: &str, body: Value) -> AppResult<Option<ProfileRow>> {
        let request = self
            .client
            .patch(self.table_url(PROFILES_TABLE))
            .query(&[("id", format!("eq.{user_id}"))])
            .header("Prefer", "return=representation")
            .json(&body);
        let response = Self::send(self.authorized(request)).await?;
        Ok(Self::rows::<ProfileRow>(response).await?.into_iter().next())
    }
}

#[async_trait]
impl ProfileRepository for RemoteProfileRepository {
    fn backend_name(&self) -> &'static str {
        "remote"
    }

    async fn get_profile(&self, user_id: &str) -> AppResult<Option<UserProfile>> {
        debug!(user_id, "Fetching remote profile");
        Ok(self.fetch_profile_row(user_id).await?.map(UserProfile::from))
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> AppResult<()> {
        let request = self
            .client
            .post(self.table_url(PROFILES_TABLE))
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&[ProfileRow::from(profile)]);
        Self::send(self.authorized(request)).await?;
        Ok(())
    }

    async fn update_profile(
        &self,
        user_id: &str,
        update: &ProfileUpdate,
    ) -> AppResult<UserProfile> {
        // Sections are stored as whole JSON columns, so merge locally first
        let mut profile = self
            .get_profile(user_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Profile for user {user_id}")))?;
        profile.apply_update(update);

        let mut body = Map::new();
        if update.personal_info.is_some() {
            body.insert(
                "personal_info".into(),
                serde_json::to_value(PersonalInfoRow::from(&profile.personal_info))?,
            );
        }
        if update.goals.is_some() {
            body.insert(
                "goals".into(),
                serde_json::to_value(GoalsRow::from(&profile.goals))?,
            );
        }
        if update.preferences.is_some() {
            body.insert(
                "preferences".into(),
                serde_json::to_value(PreferencesRow::from(&profile.preferences))?,
            );
        }
        if update.subscription.is_some() {
            body.insert(
                "subscription".into(),
                serde_json::to_value(SubscriptionRow::from(&profile.subscription))?,
            );
        }
        if body.is_empty() {
            return Ok(profile);
        }
        body.insert("updated_at".into(), json!(Utc::now()));

        self.patch_profile(user_id, Value::Object(body))
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| AppError::not_found(format!("Profile for user {user_id}")))
    }

    async fn set_onboarded(&self, user_id: &str, onboarded: bool) -> AppResult<()> {
        self.patch_profile(user_id, json!({ "is_onboarded": onboarded }))
            .await?
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Profile for user {user_id}")))
    }

    async fn is_onboarded(&self, user_id: &str) -> AppResult<bool> {
        let request = self.client.get(self.table_url(PROFILES_TABLE)).query(&[
            ("id", format!("eq.{user_id}")),
            ("select", "is_onboarded".to_owned()),
        ]);
        let response = Self::send(self.authorized(request)).await?;
        Ok(Self::rows::<OnboardedRow>(response)
            .await?
            .first()
            .is_some_and(|row| row.is_onboarded))
    }

    async fn get_macro_targets(&self, user_id: &str) -> AppResult<Option<MacroTargets>> {
        let request = self.client.get(self.table_url(MACRO_TARGETS_TABLE)).query(&[
            ("user_id", format!("eq.{user_id}")),
            ("select", "calories,carbs,protein,fat".to_owned()),
        ]);
        let response = Self::send(self.authorized(request)).await?;
        Ok(Self::rows::<MacroTargetsRow>(response)
            .await?
            .into_iter()
            .next()
            .map(MacroTargets::from))
    }

    async fn set_macro_targets(&self, user_id: &str, targets: &MacroTargets) -> AppResult<()> {
        let row = MacroTargetsRow {
            user_id: Some(user_id.to_owned()),
            calories: targets.calories,
            carbs: targets.carbs_grams,
            protein: targets.protein_grams,
            fat: targets.fat_grams,
        };
        let request = self
            .client
            .post(self.table_url(MACRO_TARGETS_TABLE))
            .query(&[("on_conflict", "user_id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&[row]);
        Self::send(self.authorized(request)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_row_uses_snake_case_columns() {
        let mut profile = UserProfile::new_registered("user_1", "a@example.com");
        profile.personal_info.current_weight = 82.5;
        let row = serde_json::to_value(ProfileRow::from(&profile)).unwrap();

        assert_eq!(row["personal_info"]["current_weight"], 82.5);
        assert_eq!(row["goals"]["weekly_weight_loss_target"], 0.5);
        assert_eq!(row["goals"]["timeline"], 12);
        assert!(row.get("is_onboarded").is_none());
    }

    #[test]
    fn test_sparse_row_fills_defaults() {
        let row: ProfileRow =
            serde_json::from_value(json!({ "id": "user_1", "email": "a@example.com" })).unwrap();
        let profile = UserProfile::from(row);
        assert_eq!(profile, UserProfile::new_registered("user_1", "a@example.com"));
    }
}
