// ABOUTME: Integration tests for profile repositories and macro target sync
// ABOUTME: Exercises the in-memory backend directly and the remote backend against a mock server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(clippy::float_cmp)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use common::{init_test_logging, reference_profile};
use ketoflow::config::{AppConfig, NutritionConfig, ProfileBackendConfig, RemoteBackendConfig};
use ketoflow::errors::ErrorCode;
use ketoflow::models::{
    ActivityLevel, MacroTargets, PersonalInfoUpdate, ProfileUpdate, UserProfile,
};
use ketoflow::repositories::{
    calculate_and_sync_macro_targets, InMemoryProfileRepository, ProfileRepository, ProfileStore,
    RemoteProfileRepository,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "anon-test-key";

fn remote_config(base_url: &str) -> RemoteBackendConfig {
    RemoteBackendConfig {
        base_url: base_url.to_owned(),
        api_key: API_KEY.to_owned(),
        timeout_secs: 5,
    }
}

fn profile_row(id: &str) -> serde_json::Value {
    json!({
        "id": id,
        "email": format!("{id}@example.com"),
        "personal_info": {
            "age": 30,
            "gender": "male",
            "height": 180.0,
            "current_weight": 80.0,
            "target_weight": 70.0,
            "activity_level": "moderate"
        },
        "goals": {
            "primary": "weightLoss",
            "timeline": 12,
            "weekly_weight_loss_target": 0.5
        },
        "preferences": {
            "dietary_restrictions": [],
            "disliked_foods": [],
            "preferred_meal_times": [],
            "fasting_experience": "beginner"
        },
        "subscription": { "tier": "free", "features": [] },
        "is_onboarded": true,
        "created_at": "2025-01-01T00:00:00Z"
    })
}

// In-memory backend

#[tokio::test]
async fn test_memory_profile_lifecycle() -> Result<()> {
    let repo = InMemoryProfileRepository::new();
    assert!(repo.is_empty());
    assert!(repo.get_profile("user_1").await?.is_none());

    let profile = reference_profile("user_1");
    repo.upsert_profile(&profile).await?;
    assert_eq!(repo.get_profile("user_1").await?, Some(profile));
    assert!(!repo.is_onboarded("user_1").await?);

    repo.set_onboarded("user_1", true).await?;
    assert!(repo.is_onboarded("user_1").await?);
    Ok(())
}

#[tokio::test]
async fn test_memory_update_unknown_user_is_not_found() {
    let repo = InMemoryProfileRepository::new();
    let err = repo
        .update_profile("ghost", &ProfileUpdate::default())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_memory_clones_share_state() -> Result<()> {
    let repo = InMemoryProfileRepository::new();
    let other = repo.clone();
    repo.upsert_profile(&reference_profile("user_1")).await?;
    assert_eq!(other.len(), 1);
    Ok(())
}

// Macro target sync

#[tokio::test]
async fn test_sync_writes_targets() -> Result<()> {
    init_test_logging();
    let repo = InMemoryProfileRepository::new();
    repo.upsert_profile(&reference_profile("user_1")).await?;

    let result = calculate_and_sync_macro_targets(&repo, "user_1", &NutritionConfig::DEFAULT)
        .await?
        .expect("profile has measurements");

    assert_eq!(result.bmr, 1780);
    assert_eq!(result.macro_targets.calories, 2209);
    assert_eq!(
        repo.get_macro_targets("user_1").await?,
        Some(result.macro_targets)
    );
    Ok(())
}

#[tokio::test]
async fn test_sync_skips_incomplete_profile() -> Result<()> {
    let repo = InMemoryProfileRepository::new();
    repo.upsert_profile(&UserProfile::new_registered("user_1", "a@example.com"))
        .await?;

    let result =
        calculate_and_sync_macro_targets(&repo, "user_1", &NutritionConfig::DEFAULT).await?;
    assert!(result.is_none());
    assert!(repo.get_macro_targets("user_1").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_sync_unknown_user_is_not_found() {
    let repo = InMemoryProfileRepository::new();
    let err = calculate_and_sync_macro_targets(&repo, "ghost", &NutritionConfig::DEFAULT)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_sync_through_trait_object() -> Result<()> {
    let repo: Box<dyn ProfileRepository> = Box::new(InMemoryProfileRepository::new());
    repo.upsert_profile(&reference_profile("user_1")).await?;
    let result =
        calculate_and_sync_macro_targets(repo.as_ref(), "user_1", &NutritionConfig::DEFAULT)
            .await?;
    assert!(result.is_some());
    Ok(())
}

// Factory

#[tokio::test]
async fn test_factory_defaults_to_memory() {
    let store = ProfileStore::from_config(&AppConfig::default()).unwrap();
    assert_eq!(store.backend_name(), "memory");
}

#[tokio::test]
async fn test_factory_builds_remote_backend() {
    let config = AppConfig {
        profile_backend: ProfileBackendConfig::Remote(remote_config("http://localhost:54321")),
        ..AppConfig::default()
    };
    let store = ProfileStore::from_config(&config).unwrap();
    assert_eq!(store.backend_name(), "remote");
}

// Remote backend

#[tokio::test]
async fn test_remote_get_profile_sends_credentials() -> Result<()> {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("id", "eq.user_1"))
        .and(header("apikey", API_KEY))
        .and(header("authorization", "Bearer anon-test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile_row("user_1")])))
        .expect(1)
        .mount(&server)
        .await;

    let repo = RemoteProfileRepository::new(remote_config(&server.uri()))?;
    let profile = repo.get_profile("user_1").await?.expect("row returned");
    assert_eq!(profile, reference_profile("user_1"));
    Ok(())
}

#[tokio::test]
async fn test_remote_missing_row_is_none() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let repo = RemoteProfileRepository::new(remote_config(&server.uri()))?;
    assert!(repo.get_profile("ghost").await?.is_none());
    assert!(!repo.is_onboarded("ghost").await?);
    Ok(())
}

#[tokio::test]
async fn test_remote_server_error_is_unavailable() -> Result<()> {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database is down"))
        .mount(&server)
        .await;

    let repo = RemoteProfileRepository::new(remote_config(&server.uri()))?;
    let err = repo.get_profile("user_1").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    assert!(err.message.contains("database is down"));
    Ok(())
}

#[tokio::test]
async fn test_remote_client_error_is_service_error() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let repo = RemoteProfileRepository::new(remote_config(&server.uri()))?;
    let err = repo
        .upsert_profile(&reference_profile("user_1"))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceError);
    Ok(())
}

#[tokio::test]
async fn test_remote_unreachable_host_is_unavailable() -> Result<()> {
    let repo = RemoteProfileRepository::new(remote_config("http://127.0.0.1:1"))?;
    let err = repo.get_profile("user_1").await.unwrap_err();
    assert_eq!(err.code, ErrorCode::ExternalServiceUnavailable);
    Ok(())
}

#[tokio::test]
async fn test_remote_upsert_merges_duplicates() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/profiles"))
        .and(header("prefer", "resolution=merge-duplicates,return=minimal"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let repo = RemoteProfileRepository::new(remote_config(&server.uri()))?;
    repo.upsert_profile(&reference_profile("user_1")).await?;
    Ok(())
}

#[tokio::test]
async fn test_remote_update_patches_touched_sections() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile_row("user_1")])))
        .mount(&server)
        .await;

    let mut updated_row = profile_row("user_1");
    updated_row["personal_info"]["current_weight"] = json!(78.0);
    updated_row["personal_info"]["activity_level"] = json!("active");
    Mock::given(method("PATCH"))
        .and(path("/rest/v1/profiles"))
        .and(query_param("id", "eq.user_1"))
        .and(body_partial_json(json!({
            "personal_info": { "current_weight": 78.0, "activity_level": "active", "age": 30 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([updated_row])))
        .expect(1)
        .mount(&server)
        .await;

    let repo = RemoteProfileRepository::new(remote_config(&server.uri()))?;
    let update = ProfileUpdate {
        personal_info: Some(PersonalInfoUpdate {
            current_weight: Some(78.0),
            activity_level: Some(ActivityLevel::Active),
            ..PersonalInfoUpdate::default()
        }),
        ..ProfileUpdate::default()
    };
    let profile = repo.update_profile("user_1", &update).await?;
    assert_eq!(profile.personal_info.current_weight, 78.0);
    assert_eq!(profile.personal_info.activity_level, ActivityLevel::Active);
    Ok(())
}

#[tokio::test]
async fn test_remote_sync_upserts_macro_targets() -> Result<()> {
    init_test_logging();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/profiles"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([profile_row("user_1")])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/macro_targets"))
        .and(query_param("on_conflict", "user_id"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/macro_targets"))
        .and(query_param("user_id", "eq.user_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "calories": 2209, "carbs": 28, "protein": 138, "fat": 172 }
        ])))
        .mount(&server)
        .await;

    let repo = RemoteProfileRepository::new(remote_config(&server.uri()))?;
    let result = calculate_and_sync_macro_targets(&repo, "user_1", &NutritionConfig::DEFAULT)
        .await?
        .expect("profile has measurements");
    assert_eq!(result.macro_targets.calories, 2209);

    let stored = repo.get_macro_targets("user_1").await?;
    assert_eq!(
        stored,
        Some(MacroTargets {
            calories: 2209,
            carbs_grams: 28,
            protein_grams: 138,
            fat_grams: 172,
        })
    );
    Ok(())
}
