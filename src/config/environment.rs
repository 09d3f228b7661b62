// ABOUTME: Environment configuration for deployment mode, logging, storage, and profile backend
// ABOUTME: Parses environment variables into a typed AppConfig with lenient fallbacks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Ketoflow

//! Environment-based application configuration

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Default directory for persisted store snapshots
const DEFAULT_DATA_DIR: &str = ".ketoflow";

/// Default timeout for remote profile requests
const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 10;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Informational messages
    #[default]
    Info,
    /// Debug output
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Error => tracing::Level::ERROR,
            Self::Warn => tracing::Level::WARN,
            Self::Info => tracing::Level::INFO,
            Self::Debug => tracing::Level::DEBUG,
            Self::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        };
        f.write_str(name)
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if this is a development environment
    #[must_use]
    pub const fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        };
        f.write_str(name)
    }
}

/// Connection settings for the hosted profile database
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RemoteBackendConfig {
    /// Base URL of the REST endpoint, without a trailing slash
    pub base_url: String,
    /// Anonymous API key sent with every request
    pub api_key: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RemoteBackendConfig {
    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for RemoteBackendConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteBackendConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Where user profiles and macro targets live
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ProfileBackendConfig {
    /// In-process map, lost on exit
    #[default]
    Local,
    /// Hosted REST database
    Remote(RemoteBackendConfig),
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Log level
    pub log_level: LogLevel,
    /// Extra diagnostics
    pub debug_mode: bool,
    /// Directory for persisted store snapshots
    pub data_dir: PathBuf,
    /// Profile backend
    pub profile_backend: ProfileBackendConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            log_level: LogLevel::default(),
            debug_mode: false,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            profile_backend: ProfileBackendConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the remote backend is selected without its URL or
    /// key, or a numeric variable fails to parse
    pub fn from_env() -> Result<Self> {
        let environment =
            Environment::from_str_or_default(&env::var("APP_ENV").unwrap_or_default());
        let log_level = LogLevel::from_str_or_default(&env::var("LOG_LEVEL").unwrap_or_default());
        let debug_mode = env::var("DEBUG_MODE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);
        let data_dir = env::var("KETOFLOW_DATA_DIR")
            .map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from);

        let profile_backend = match env::var("KETOFLOW_BACKEND")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "remote" => ProfileBackendConfig::Remote(Self::remote_from_env()?),
            "" | "local" => ProfileBackendConfig::Local,
            other => {
                warn!("Unknown KETOFLOW_BACKEND '{}', using local profiles", other);
                ProfileBackendConfig::Local
            }
        };

        let config = Self {
            environment,
            log_level,
            debug_mode,
            data_dir,
            profile_backend,
        };
        info!(
            "Loaded configuration: environment={}, log_level={}, data_dir={}",
            config.environment,
            config.log_level,
            config.data_dir.display()
        );
        Ok(config)
    }

    fn remote_from_env() -> Result<RemoteBackendConfig> {
        let base_url = env::var("KETOFLOW_REMOTE_URL")
            .context("KETOFLOW_REMOTE_URL is required when KETOFLOW_BACKEND=remote")?;
        let api_key = env::var("KETOFLOW_REMOTE_API_KEY")
            .context("KETOFLOW_REMOTE_API_KEY is required when KETOFLOW_BACKEND=remote")?;
        if base_url.trim().is_empty() {
            bail!("KETOFLOW_REMOTE_URL must not be empty");
        }
        let timeout_secs = match env::var("KETOFLOW_REMOTE_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid KETOFLOW_REMOTE_TIMEOUT_SECS: {raw}"))?,
            Err(_) => DEFAULT_REMOTE_TIMEOUT_SECS,
        };

        Ok(RemoteBackendConfig {
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
            timeout_secs,
        })
    }
}
