// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants for schedules, workouts, muscle categories, and storage layout
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! This module organizes application constants by domain for better maintainability.

/// Starter catalog seeded into an empty library
pub mod default_exercises;
/// Muscle-group labels and the tag → category table
pub mod muscles;

/// Weekly schedule limits
pub mod schedule {
    /// Fewest workout days a schedule can hold
    pub const MIN_WORKOUT_DAYS: u8 = 1;
    /// Most workout days a schedule can hold
    pub const MAX_WORKOUT_DAYS: u8 = 7;
    /// Cursor value for a freshly created profile
    pub const FIRST_WORKOUT_DAY: u32 = 1;
}

/// Cardio defaults and bounds used by the warm-up panel
pub mod cardio {
    /// Minutes pre-filled on a blank workout record
    pub const DEFAULT_MINUTES: u32 = 10;
    /// Shortest selectable cardio session
    pub const MIN_MINUTES: u32 = 1;
    /// Longest selectable cardio session
    pub const MAX_MINUTES: u32 = 60;
}

/// Workout record bounds
pub mod workout {
    /// Highest star rating
    pub const MAX_RATING: u8 = 5;
    /// Lowest rating a user can submit (0 means unrated)
    pub const MIN_USER_RATING: u8 = 1;
    /// Calendar date format used as the workout document id
    pub const DATE_FORMAT: &str = "%Y-%m-%d";
}

/// Onboarding input bounds
pub mod profile {
    /// Largest accepted height in feet
    pub const MAX_HEIGHT_FEET: u8 = 8;
    /// Largest accepted inches component
    pub const MAX_HEIGHT_INCHES: u8 = 11;
}

/// Document store collection names and schema version
pub mod collections {
    /// Schema version of the path layout below
    pub const SCHEMA_VERSION: u32 = 1;
    /// Root collection, one document per user holding the profile
    pub const USERS: &str = "users";
    /// Per-user exercise catalog
    pub const EXERCISES: &str = "exercises";
    /// Per-user workout records keyed by date
    pub const WORKOUTS: &str = "workouts";
    /// Per-workout set logs
    pub const EXERCISE_TRACKING: &str = "exerciseTracking";
    /// Per-user schedule, one document per day index
    pub const MUSCLE_TAGS: &str = "muscleTags";
}

/// Service identity used in structured logs
pub mod service_names {
    /// Library/service name
    pub const IRONLOG: &str = "ironlog";
    /// CLI binary name
    pub const IRONLOG_CLI: &str = "ironlog-cli";
}

/// Environment variable names
pub mod env_config {
    /// Document store URL (`memory://`, `sqlite:<path>`)
    pub const STORE_URL: &str = "IRONLOG_STORE_URL";
    /// Feedback relay endpoint
    pub const FEEDBACK_URL: &str = "IRONLOG_FEEDBACK_URL";
    /// Deployment environment name
    pub const ENVIRONMENT: &str = "IRONLOG_ENVIRONMENT";
    /// Feedback request timeout in seconds
    pub const FEEDBACK_TIMEOUT_SECS: &str = "IRONLOG_FEEDBACK_TIMEOUT_SECS";
}

/// Fallback configuration values
pub mod defaults {
    /// Store used when no URL is configured
    pub const STORE_URL: &str = "sqlite:./data/ironlog.db";
    /// Feedback relay used when none is configured
    pub const FEEDBACK_URL: &str = "https://formspree.io/f/mqakpgbo";
    /// Feedback request timeout
    pub const FEEDBACK_TIMEOUT_SECS: u64 = 10;
}
