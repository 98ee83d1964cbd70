// ABOUTME: Main library entry point for the ironlog workout tracker sync layer
// ABOUTME: Client-side stores over a hierarchical document store with repository traits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Ironlog
//!
//! State and synchronization layer for a personal strength-training tracker.
//! Each signed-in user owns a profile, an exercise catalog, a weekly
//! muscle-tag schedule and date-keyed workout records with per-exercise set
//! tracking, all stored as JSON documents under `users/{uid}`.
//!
//! ## Architecture
//!
//! - **Store**: document store trait with in-memory and `SQLite` backends
//! - **Repositories**: one trait per entity, owning the path layout
//! - **State**: one store per entity plus the [`state::AppState`] container
//! - **Normalizer**: pure grouping, set editing and cursor arithmetic
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use ironlog::auth::AuthUser;
//! use ironlog::config::AppConfig;
//! use ironlog::errors::AppResult;
//! use ironlog::state::AppState;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = AppConfig::for_testing();
//!     let mut state = AppState::from_config(&config).await?;
//!     let route = state.sign_in(AuthUser::new("uid-1", None)).await?;
//!     println!("signed in, route: {route:?}");
//!     Ok(())
//! }
//! ```

pub use ironlog_core::{constants, errors, models, validation};

/// Signed-in user session
pub mod auth;

/// Environment-driven configuration
pub mod config;

/// Feedback relay client
pub mod feedback;

/// Structured logging setup
pub mod logging;

/// Grouping, set editing and workout-day cursor arithmetic
pub mod normalizer;

/// Per-entity repository traits and implementations
pub mod repositories;

/// Client-side stores and the application state container
pub mod state;

/// Document store trait and backends
pub mod store;
