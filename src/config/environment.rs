// ABOUTME: Environment-based configuration for store selection and the feedback relay
// ABOUTME: Type-safe parsing of store URLs, environment names, and timeouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{defaults, env_config};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production
    Production,
    /// Automated tests
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
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe document store location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreUrl {
    /// Process-local map, nothing persisted
    InMemory,
    /// SQLite database file
    Sqlite {
        /// Database file path
        path: PathBuf,
    },
    /// In-memory SQLite database
    SqliteMemory,
}

impl StoreUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error for an empty URL or an unsupported scheme
    pub fn parse_url(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            anyhow::bail!("store URL must not be empty");
        }
        if s == "memory://" || s == "memory" {
            return Ok(Self::InMemory);
        }
        if let Some(path) = s.strip_prefix("sqlite:") {
            let path = path.strip_prefix("//").unwrap_or(path);
            return if path == ":memory:" {
                Ok(Self::SqliteMemory)
            } else if path.is_empty() {
                anyhow::bail!("sqlite store URL is missing a path")
            } else {
                Ok(Self::Sqlite {
                    path: PathBuf::from(path),
                })
            };
        }
        if s.contains("://") {
            anyhow::bail!("unsupported store URL scheme: {s}");
        }
        Ok(Self::Sqlite {
            path: PathBuf::from(s),
        })
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::InMemory => "memory://".to_owned(),
            Self::Sqlite { path } => format!("sqlite:{}", path.display()),
            Self::SqliteMemory => "sqlite::memory:".to_owned(),
        }
    }

    /// Whether nothing outlives the process
    #[must_use]
    pub const fn is_ephemeral(&self) -> bool {
        matches!(self, Self::InMemory | Self::SqliteMemory)
    }
}

impl Default for StoreUrl {
    fn default() -> Self {
        Self::Sqlite {
            path: PathBuf::from(defaults::STORE_URL.trim_start_matches("sqlite:")),
        }
    }
}

/// Feedback relay settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackConfig {
    /// Endpoint receiving `{email, message}` posts
    pub endpoint: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            endpoint: defaults::FEEDBACK_URL.to_owned(),
            timeout: Duration::from_secs(defaults::FEEDBACK_TIMEOUT_SECS),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Document store location
    pub store: StoreUrl,
    /// Feedback relay
    pub feedback: FeedbackConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let environment =
            Environment::from_str_or_default(&env_var_or(env_config::ENVIRONMENT, "development"));
        let store_url = env_var_or(env_config::STORE_URL, defaults::STORE_URL);
        let store = StoreUrl::parse_url(&store_url)
            .with_context(|| format!("Invalid {}", env_config::STORE_URL))?;

        let endpoint = env_var_or(env_config::FEEDBACK_URL, defaults::FEEDBACK_URL);
        if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
            anyhow::bail!(
                "{} must be an http(s) URL, got {endpoint}",
                env_config::FEEDBACK_URL
            );
        }
        let timeout_secs = env_var_or(
            env_config::FEEDBACK_TIMEOUT_SECS,
            &defaults::FEEDBACK_TIMEOUT_SECS.to_string(),
        )
        .parse::<u64>()
        .with_context(|| format!("Invalid {}", env_config::FEEDBACK_TIMEOUT_SECS))?;

        let config = Self {
            environment,
            store,
            feedback: FeedbackConfig {
                endpoint,
                timeout: Duration::from_secs(timeout_secs),
            },
        };

        info!(
            environment = %config.environment,
            store = %config.store.to_connection_string(),
            "Configuration loaded"
        );
        Ok(config)
    }

    /// Configuration for tests: in-memory store, default relay
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            environment: Environment::Testing,
            store: StoreUrl::InMemory,
            feedback: FeedbackConfig::default(),
        }
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_store_urls() {
        assert_eq!(StoreUrl::parse_url("memory://").unwrap(), StoreUrl::InMemory);
        assert_eq!(
            StoreUrl::parse_url("sqlite::memory:").unwrap(),
            StoreUrl::SqliteMemory
        );
        assert_eq!(
            StoreUrl::parse_url("sqlite:./data/app.db").unwrap(),
            StoreUrl::Sqlite {
                path: PathBuf::from("./data/app.db")
            }
        );
        assert!(StoreUrl::parse_url("postgres://localhost/db").is_err());
        assert!(StoreUrl::parse_url("").is_err());
    }

    #[test]
    fn test_connection_string_round_trip() {
        for url in ["memory://", "sqlite::memory:", "sqlite:/tmp/ironlog.db"] {
            let parsed = StoreUrl::parse_url(url).unwrap();
            assert_eq!(parsed.to_connection_string(), url);
        }
    }

    #[test]
    fn test_environment_parse() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("whatever"),
            Environment::Development
        );
    }
}
