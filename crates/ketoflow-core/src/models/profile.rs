// ABOUTME: User profile record with personal info, goals, preferences, and subscription
// ABOUTME: Typed per-section partial updates replace free-form field patching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

use super::biometrics::{ActivityLevel, Sex, UserBiometrics};
use crate::constants::profile_defaults;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Primary dietary goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PrimaryGoal {
    /// Calorie deficit sized from the weekly loss target
    #[default]
    WeightLoss,
    /// Eat at TDEE
    Maintenance,
    /// Fixed calorie surplus
    MuscleGain,
}

/// Self-reported fasting experience
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FastingExperience {
    /// New to fasting
    #[default]
    Beginner,
    /// Some fasting experience
    Intermediate,
    /// Regular faster
    Advanced,
}

/// Subscription tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    /// Free tier
    #[default]
    Free,
    /// Premium tier
    Premium,
    /// Elite tier
    Elite,
}

/// Biometric section of the profile
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    /// Age in years (0 until onboarding sets it)
    pub age: u32,
    /// Sex for the BMR offset
    pub gender: Sex,
    /// Height in centimetres
    pub height: f64,
    /// Current weight in kilograms
    pub current_weight: f64,
    /// Target weight in kilograms
    pub target_weight: f64,
    /// Activity level
    pub activity_level: ActivityLevel,
}

/// Goal section of the profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goals {
    /// Primary goal
    pub primary: PrimaryGoal,
    /// Timeline in weeks
    #[serde(rename = "timeline")]
    pub timeline_weeks: u32,
    /// Weekly weight loss target in kilograms
    pub weekly_weight_loss_target: f64,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            primary: PrimaryGoal::WeightLoss,
            timeline_weeks: profile_defaults::GOAL_TIMELINE_WEEKS,
            weekly_weight_loss_target: profile_defaults::WEEKLY_WEIGHT_LOSS_TARGET_KG,
        }
    }
}

/// Dietary preference section of the profile
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Dietary restrictions (free text tags)
    pub dietary_restrictions: Vec<String>,
    /// Foods the user dislikes
    pub disliked_foods: Vec<String>,
    /// Preferred meal times
    pub preferred_meal_times: Vec<String>,
    /// Fasting experience
    pub fasting_experience: FastingExperience,
}

/// Subscription section of the profile
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Tier
    pub tier: SubscriptionTier,
    /// Expiry, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Enabled feature flags
    pub features: Vec<String>,
}

/// Complete user profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Stable user identifier
    pub id: String,
    /// Account email
    pub email: String,
    /// Biometrics
    pub personal_info: PersonalInfo,
    /// Goals
    pub goals: Goals,
    /// Preferences
    pub preferences: Preferences,
    /// Subscription
    pub subscription: Subscription,
}

impl UserProfile {
    /// Profile a freshly registered account starts with
    ///
    /// Biometrics are zeroed until onboarding fills them in, so the stores
    /// skip target computation for it.
    pub fn new_registered(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            personal_info: PersonalInfo::default(),
            goals: Goals::default(),
            preferences: Preferences::default(),
            subscription: Subscription::default(),
        }
    }

    /// Biometric inputs for the metabolism engine
    #[must_use]
    pub fn biometrics(&self) -> UserBiometrics {
        UserBiometrics {
            weight_kg: self.personal_info.current_weight,
            target_weight_kg: self.personal_info.target_weight,
            height_cm: self.personal_info.height,
            age_years: f64::from(self.personal_info.age),
            sex: self.personal_info.gender,
            activity_level: self.personal_info.activity_level,
            goal: self.goals.primary,
            weekly_weight_loss_target_kg: self.goals.weekly_weight_loss_target,
        }
    }

    /// Apply a typed partial update in place
    ///
    /// Only fields set on the update change. Range checks happen before this
    /// call, at the store boundary.
    pub fn apply_update(&mut self, update: &ProfileUpdate) {
        if let Some(info) = &update.personal_info {
            info.apply_to(&mut self.personal_info);
        }
        if let Some(goals) = &update.goals {
            goals.apply_to(&mut self.goals);
        }
        if let Some(preferences) = &update.preferences {
            preferences.apply_to(&mut self.preferences);
        }
        if let Some(subscription) = &update.subscription {
            self.subscription = subscription.clone();
        }
    }
}

/// Partial update of `PersonalInfo`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoUpdate {
    /// New age
    pub age: Option<u32>,
    /// New sex
    pub gender: Option<Sex>,
    /// New height
    pub height: Option<f64>,
    /// New current weight
    pub current_weight: Option<f64>,
    /// New target weight
    pub target_weight: Option<f64>,
    /// New activity level
    pub activity_level: Option<ActivityLevel>,
}

impl PersonalInfoUpdate {
    fn apply_to(&self, info: &mut PersonalInfo) {
        if let Some(age) = self.age {
            info.age = age;
        }
        if let Some(gender) = self.gender {
            info.gender = gender;
        }
        if let Some(height) = self.height {
            info.height = height;
        }
        if let Some(weight) = self.current_weight {
            info.current_weight = weight;
        }
        if let Some(weight) = self.target_weight {
            info.target_weight = weight;
        }
        if let Some(level) = self.activity_level {
            info.activity_level = level;
        }
    }
}

/// Partial update of `Goals`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsUpdate {
    /// New primary goal
    pub primary: Option<PrimaryGoal>,
    /// New timeline in weeks
    pub timeline_weeks: Option<u32>,
    /// New weekly loss target
    pub weekly_weight_loss_target: Option<f64>,
}

impl GoalsUpdate {
    fn apply_to(&self, goals: &mut Goals) {
        if let Some(primary) = self.primary {
            goals.primary = primary;
        }
        if let Some(weeks) = self.timeline_weeks {
            goals.timeline_weeks = weeks;
        }
        if let Some(target) = self.weekly_weight_loss_target {
            goals.weekly_weight_loss_target = target;
        }
    }
}

/// Partial update of `Preferences`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesUpdate {
    /// Replacement dietary restrictions
    pub dietary_restrictions: Option<Vec<String>>,
    /// Replacement disliked foods
    pub disliked_foods: Option<Vec<String>>,
    /// Replacement preferred meal times
    pub preferred_meal_times: Option<Vec<String>>,
    /// New fasting experience
    pub fasting_experience: Option<FastingExperience>,
}

impl PreferencesUpdate {
    fn apply_to(&self, preferences: &mut Preferences) {
        if let Some(restrictions) = &self.dietary_restrictions {
            preferences.dietary_restrictions.clone_from(restrictions);
        }
        if let Some(disliked) = &self.disliked_foods {
            preferences.disliked_foods.clone_from(disliked);
        }
        if let Some(times) = &self.preferred_meal_times {
            preferences.preferred_meal_times.clone_from(times);
        }
        if let Some(experience) = self.fasting_experience {
            preferences.fasting_experience = experience;
        }
    }
}

/// Typed partial update across profile sections
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// Biometric changes
    pub personal_info: Option<PersonalInfoUpdate>,
    /// Goal changes
    pub goals: Option<GoalsUpdate>,
    /// Preference changes
    pub preferences: Option<PreferencesUpdate>,
    /// Replacement subscription
    pub subscription: Option<Subscription>,
}

impl ProfileUpdate {
    /// True when the update can change metabolism targets
    #[must_use]
    pub const fn touches_metabolism(&self) -> bool {
        self.personal_info.is_some() || self.goals.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registered_profile_defaults() {
        let profile = UserProfile::new_registered("user_1", "a@example.com");
        assert_eq!(profile.personal_info.age, 0);
        assert_eq!(profile.personal_info.gender, Sex::Male);
        assert_eq!(profile.personal_info.activity_level, ActivityLevel::Moderate);
        assert_eq!(profile.goals.primary, PrimaryGoal::WeightLoss);
        assert_eq!(profile.goals.timeline_weeks, 12);
        assert!((profile.goals.weekly_weight_loss_target - 0.5).abs() < f64::EPSILON);
        assert!(!profile.biometrics().has_required_measurements());
    }

    #[test]
    fn test_apply_update_only_touches_set_fields() {
        let mut profile = UserProfile::new_registered("user_1", "a@example.com");
        profile.personal_info.height = 170.0;

        let update = ProfileUpdate {
            personal_info: Some(PersonalInfoUpdate {
                age: Some(40),
                ..PersonalInfoUpdate::default()
            }),
            ..ProfileUpdate::default()
        };
        profile.apply_update(&update);

        assert_eq!(profile.personal_info.age, 40);
        assert!((profile.personal_info.height - 170.0).abs() < f64::EPSILON);
        assert!(update.touches_metabolism());
    }

    #[test]
    fn test_preferences_update_does_not_touch_metabolism() {
        let update = ProfileUpdate {
            preferences: Some(PreferencesUpdate {
                fasting_experience: Some(FastingExperience::Advanced),
                ..PreferencesUpdate::default()
            }),
            ..ProfileUpdate::default()
        };
        assert!(!update.touches_metabolism());
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let profile = UserProfile::new_registered("user_1", "a@example.com");
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json["personalInfo"]["currentWeight"].is_number());
        assert_eq!(json["goals"]["primary"], "weightLoss");
        assert_eq!(json["goals"]["timeline"], 12);
        assert_eq!(json["personalInfo"]["activityLevel"], "moderate");
    }
}
