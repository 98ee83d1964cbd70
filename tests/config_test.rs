// ABOUTME: Tests for environment-driven configuration and CLI logging defaults
// ABOUTME: Store URL selection, feedback relay validation and timeout parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use ironlog::config::{AppConfig, Environment, StoreUrl};
use ironlog::logging::{LogFormat, LoggingConfig};
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const VARS: [&str; 6] = [
    "IRONLOG_STORE_URL",
    "IRONLOG_FEEDBACK_URL",
    "IRONLOG_FEEDBACK_TIMEOUT_SECS",
    "IRONLOG_ENVIRONMENT",
    "RUST_LOG",
    "LOG_FORMAT",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_without_environment() {
    clear_env();
    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.environment, Environment::Development);
    assert_eq!(
        config.store,
        StoreUrl::Sqlite {
            path: PathBuf::from("./data/ironlog.db")
        }
    );
    assert!(config.feedback.endpoint.starts_with("https://"));
    assert_eq!(config.feedback.timeout, Duration::from_secs(10));
}

#[test]
#[serial]
fn test_store_url_and_environment_overrides() {
    clear_env();
    env::set_var("IRONLOG_STORE_URL", "sqlite::memory:");
    env::set_var("IRONLOG_ENVIRONMENT", "prod");
    env::set_var("IRONLOG_FEEDBACK_TIMEOUT_SECS", "3");

    let config = AppConfig::from_env().unwrap();
    assert_eq!(config.store, StoreUrl::SqliteMemory);
    assert!(config.store.is_ephemeral());
    assert!(config.environment.is_production());
    assert_eq!(config.feedback.timeout, Duration::from_secs(3));
    clear_env();
}

#[test]
#[serial]
fn test_invalid_values_are_rejected() {
    clear_env();
    env::set_var("IRONLOG_STORE_URL", "postgres://localhost/ironlog");
    assert!(AppConfig::from_env().is_err());

    clear_env();
    env::set_var("IRONLOG_FEEDBACK_URL", "ftp://relay.example.com");
    assert!(AppConfig::from_env().is_err());

    clear_env();
    env::set_var("IRONLOG_FEEDBACK_TIMEOUT_SECS", "soon");
    assert!(AppConfig::from_env().is_err());
    clear_env();
}

#[test]
#[serial]
fn test_cli_logging_is_quiet_and_compact() {
    clear_env();
    let config = LoggingConfig::for_cli();
    assert_eq!(config.level, "warn");
    assert_eq!(config.format, LogFormat::Compact);
    assert_eq!(config.service_name, "ironlog-cli");

    env::set_var("RUST_LOG", "debug");
    env::set_var("LOG_FORMAT", "json");
    let config = LoggingConfig::for_cli();
    assert_eq!(config.level, "debug");
    assert_eq!(config.format, LogFormat::Json);
    clear_env();
}

#[test]
fn test_testing_config_is_ephemeral() {
    let config = AppConfig::for_testing();
    assert_eq!(config.environment, Environment::Testing);
    assert_eq!(config.store, StoreUrl::InMemory);
}
