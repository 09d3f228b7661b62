// ABOUTME: Tests for the JSON file key-value storage used to persist stores
// ABOUTME: Covers round trips, missing keys, key validation, and removal
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use ketoflow::errors::ErrorCode;
use ketoflow::storage::LocalStorage;
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Snapshot {
    name: String,
    count: u32,
}

#[tokio::test]
async fn test_set_then_get() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = LocalStorage::new(dir.path());
    let value = Snapshot {
        name: "avocado".into(),
        count: 2,
    };

    storage.set_item("food-storage", &value).await?;
    assert_eq!(
        storage.get_item::<Snapshot>("food-storage").await?,
        Some(value)
    );
    assert!(dir.path().join("food-storage.json").exists());
    Ok(())
}

#[tokio::test]
async fn test_missing_key_is_none() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = LocalStorage::new(dir.path().join("not-created-yet"));
    assert!(storage.get_item::<Snapshot>("user-storage").await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_set_creates_root_directory() -> Result<()> {
    let dir = TempDir::new()?;
    let root = dir.path().join("nested").join("data");
    let storage = LocalStorage::new(&root);

    storage.set_item("fasting-storage", &vec![1, 2, 3]).await?;
    assert!(root.join("fasting-storage.json").exists());
    assert!(!root.join("fasting-storage.json.tmp").exists());
    Ok(())
}

#[tokio::test]
async fn test_overwrite_replaces_value() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = LocalStorage::new(dir.path());
    storage.set_item("counter", &1_u32).await?;
    storage.set_item("counter", &2_u32).await?;
    assert_eq!(storage.get_item::<u32>("counter").await?, Some(2));
    Ok(())
}

#[tokio::test]
async fn test_remove_item() -> Result<()> {
    let dir = TempDir::new()?;
    let storage = LocalStorage::new(dir.path());
    storage.set_item("user-storage", &"x").await?;

    storage.remove_item("user-storage").await?;
    assert!(storage.get_item::<String>("user-storage").await?.is_none());
    // Removing again is fine
    storage.remove_item("user-storage").await?;
    Ok(())
}

#[tokio::test]
async fn test_rejects_path_like_keys() {
    let dir = TempDir::new().unwrap();
    let storage = LocalStorage::new(dir.path());

    for key in ["", "../escape", "a/b", "dotted.key"] {
        let err = storage.set_item(key, &1_u32).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput, "key {key:?}");
    }
}

#[tokio::test]
async fn test_corrupt_file_is_serialization_error() -> Result<()> {
    let dir = TempDir::new()?;
    std::fs::write(dir.path().join("user-storage.json"), "{not json")?;
    let storage = LocalStorage::new(dir.path());

    let err = storage
        .get_item::<Snapshot>("user-storage")
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::SerializationError);
    Ok(())
}
