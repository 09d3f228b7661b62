// ABOUTME: Key-value JSON file storage used to persist store snapshots between runs
// ABOUTME: One file per key under a data directory, written atomically via rename
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

use crate::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Directory-backed JSON key-value storage
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Storage rooted at `root`; the directory is created on first write
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the stored files
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> AppResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(AppError::invalid_input(format!(
                "Storage key '{key}' may only contain ASCII letters, digits, '-' and '_'"
            )));
        }
        Ok(self.root.join(format!("{key}.json")))
    }

    /// Read and decode the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns an error for invalid keys, unreadable files, or JSON that does
    /// not decode as `T`
    pub async fn get_item<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let path = self.path_for(key)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(
                    AppError::storage(format!("Failed to read {}", path.display())).with_source(e),
                )
            }
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Encode and store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error for invalid keys or if the file cannot be written
    pub async fn set_item<T: Serialize + Sync>(&self, key: &str, value: &T) -> AppResult<()> {
        let path = self.path_for(key)?;
        let bytes = serde_json::to_vec_pretty(value)?;

        fs::create_dir_all(&self.root).await.map_err(|e| {
            AppError::storage(format!("Failed to create {}", self.root.display())).with_source(e)
        })?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, &bytes).await.map_err(|e| {
            AppError::storage(format!("Failed to write {}", tmp_path.display())).with_source(e)
        })?;
        fs::rename(&tmp_path, &path).await.map_err(|e| {
            AppError::storage(format!("Failed to replace {}", path.display())).with_source(e)
        })?;

        debug!(key, bytes = bytes.len(), "Stored item");
        Ok(())
    }

    /// Delete the value stored under `key`; missing keys are not an error
    ///
    /// # Errors
    ///
    /// Returns an error for invalid keys or if the file cannot be removed
    pub async fn remove_item(&self, key: &str) -> AppResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(AppError::storage(format!("Failed to remove {}", path.display())).with_source(e))
            }
        }
    }
}
