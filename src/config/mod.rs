// ABOUTME: Configuration module for store selection, feedback relay, and environment
// ABOUTME: Loaded once from environment variables at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! All settings come from environment variables:
//!
//! - `IRONLOG_STORE_URL`: `memory://`, `sqlite:<path>` or `sqlite::memory:`
//! - `IRONLOG_FEEDBACK_URL`: feedback relay endpoint
//! - `IRONLOG_FEEDBACK_TIMEOUT_SECS`: feedback request timeout
//! - `IRONLOG_ENVIRONMENT`: development, production or testing
//! - `RUST_LOG` / `LOG_FORMAT`: see [`crate::logging`]

/// Environment variable parsing
pub mod environment;

pub use environment::{AppConfig, Environment, FeedbackConfig, StoreUrl};
