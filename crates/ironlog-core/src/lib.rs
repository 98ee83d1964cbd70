// ABOUTME: Core types and constants for the ironlog workout sync layer
// ABOUTME: Foundation crate with error handling, domain models, validation, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Ironlog Core
//!
//! Foundation crate providing shared types and constants for the ironlog
//! synchronization layer. This crate is designed to change infrequently, enabling
//! incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `StoreError`
//! - **constants**: Schedule limits, cardio defaults, muscle categories, collection names
//! - **models**: Profile, exercise, workout record, tracking entry, and schedule documents
//! - **validation**: Input checks that run before any store dispatch

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Document models and their legacy-shape normalization
pub mod models;

/// Synchronous input validation
pub mod validation;
