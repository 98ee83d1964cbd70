// ABOUTME: Logging configuration and structured logging setup for the sync layer
// ABOUTME: Configures log levels, formatters, and output for store and repository events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Structured logging configuration

use crate::constants::{env_config, service_names};
use anyhow::Result;
use serde_json::json;
use std::env;
use std::io;
use tracing::{debug, info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Output format (json, pretty, compact)
    pub format: LogFormat,
    /// Include source file and line numbers
    pub include_location: bool,
    /// Include thread information
    pub include_thread: bool,
    /// Include span open/close events
    pub include_spans: bool,
    /// Service name for structured logging
    pub service_name: String,
    /// Service version
    pub service_version: String,
    /// Environment (development, staging, production)
    pub environment: String,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for the CLI
    Compact,
}

impl LogFormat {
    /// Parse a `LOG_FORMAT` value, falling back to pretty
    #[must_use]
    pub fn from_str_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
            include_location: false,
            include_thread: false,
            include_spans: false,
            service_name: service_names::IRONLOG.into(),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment: "development".into(),
        }
    }
}

impl LoggingConfig {
    /// Create logging configuration from environment variables
    #[must_use]
    pub fn from_env() -> Self {
        let level = env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
        let format = env::var("LOG_FORMAT")
            .map_or(LogFormat::Pretty, |value| LogFormat::from_str_or_default(&value));
        let environment =
            env::var(env_config::ENVIRONMENT).unwrap_or_else(|_| "development".into());

        let is_production = environment == "production";

        Self {
            level,
            format,
            include_location: is_production || env::var("LOG_INCLUDE_LOCATION").is_ok(),
            include_thread: is_production || env::var("LOG_INCLUDE_THREAD").is_ok(),
            include_spans: env::var("LOG_INCLUDE_SPANS").is_ok(),
            service_name: env::var("SERVICE_NAME")
                .unwrap_or_else(|_| service_names::IRONLOG.into()),
            service_version: env!("CARGO_PKG_VERSION").to_owned(),
            environment,
        }
    }

    /// Compact, quiet configuration used by the CLI unless `RUST_LOG` says otherwise
    #[must_use]
    pub fn for_cli() -> Self {
        let mut config = Self::from_env();
        if env::var("RUST_LOG").is_err() {
            config.level = "warn".into();
        }
        if env::var("LOG_FORMAT").is_err() {
            config.format = LogFormat::Compact;
        }
        config.service_name = service_names::IRONLOG_CLI.into();
        config
    }

    /// Initialize the global tracing subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        let env_filter = env::var("RUST_LOG")
            .map_or_else(
                |_| EnvFilter::new(&self.level),
                |env_directive| EnvFilter::new(&env_directive),
            )
            .add_directive(
                "hyper=warn"
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::WARN.into()),
            )
            .add_directive(
                "reqwest=warn"
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::WARN.into()),
            )
            .add_directive(
                "sqlx::query=warn"
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::WARN.into()),
            )
            .add_directive(
                format!("ironlog={}", self.level)
                    .parse()
                    .unwrap_or_else(|_| tracing::Level::INFO.into()),
            );

        let registry = tracing_subscriber::registry().with(env_filter);
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };

        match self.format {
            LogFormat::Json => {
                let json_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(span_events)
                    .json();

                registry.with(json_layer).try_init()?;
            }
            LogFormat::Pretty => {
                let pretty_layer = fmt::layer()
                    .with_file(self.include_location)
                    .with_line_number(self.include_location)
                    .with_thread_ids(self.include_thread)
                    .with_thread_names(self.include_thread)
                    .with_target(true)
                    .with_writer(io::stderr)
                    .with_span_events(span_events);

                registry.with(pretty_layer).try_init()?;
            }
            LogFormat::Compact => {
                let compact_layer = fmt::layer()
                    .compact()
                    .with_file(false)
                    .with_line_number(false)
                    .with_thread_ids(false)
                    .with_thread_names(false)
                    .with_target(false)
                    .with_writer(io::stderr)
                    .with_span_events(FmtSpan::NONE);

                registry.with(compact_layer).try_init()?;
            }
        }

        self.log_startup_info();
        Ok(())
    }

    fn log_startup_info(&self) {
        let config_summary = json!({
            "service": {
                "name": self.service_name,
                "version": self.service_version,
                "environment": self.environment
            },
            "logging": {
                "level": self.level,
                "format": format!("{:?}", self.format),
                "features": {
                    "location": self.include_location,
                    "thread": self.include_thread,
                    "spans": self.include_spans
                }
            }
        });

        info!(
            service.name = %self.service_name,
            service.version = %self.service_version,
            environment = %self.environment,
            "Logging initialized: {}",
            config_summary
        );
    }
}

/// Application-specific logging helpers
pub struct AppLogger;

impl AppLogger {
    /// Log a document store operation
    pub fn log_store_operation(operation: &str, path: &str, success: bool, duration_ms: u64) {
        if success {
            debug!(
                store.operation = %operation,
                store.path = %path,
                store.success = true,
                store.duration_ms = %duration_ms,
                "Store operation"
            );
        } else {
            warn!(
                store.operation = %operation,
                store.path = %path,
                store.success = false,
                store.duration_ms = %duration_ms,
                "Store operation failed"
            );
        }
    }

    /// Log a sign-in or sign-out
    pub fn log_auth_event(user_id: &str, event: &str) {
        info!(user.id = %user_id, auth.event = %event, "Authentication event");
    }

    /// Log a workout cursor movement
    pub fn log_cursor_move(user_id: &str, from: u32, to: u32, total_days: u32) {
        info!(
            user.id = %user_id,
            cursor.from = from,
            cursor.to = to,
            schedule.days = total_days,
            "Workout day cursor moved"
        );
    }
}
