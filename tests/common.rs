// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides quiet logging, signed-in application state and store helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `ironlog`

use anyhow::Result;
use chrono::NaiveDate;
use ironlog::{
    auth::AuthUser,
    models::{MuscleTagSchedule, ProfileUpdate},
    state::AppState,
    store::Store,
};
use std::path::Path;
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// `SQLite` store in a file under `dir`
pub async fn sqlite_store(dir: &Path) -> Result<Store> {
    init_test_logging();
    let url = format!("sqlite:{}", dir.join("ironlog.db").display());
    Ok(Store::new(&url).await?)
}

/// In-memory application state with `uid` signed in
pub async fn signed_in_state(uid: &str) -> Result<AppState> {
    signed_in_state_over(Store::memory(), uid).await
}

/// Application state over `store` with `uid` signed in
pub async fn signed_in_state_over(store: Store, uid: &str) -> Result<AppState> {
    init_test_logging();
    let mut state = AppState::new(store);
    state
        .sign_in(AuthUser::new(uid, Some(format!("{uid}@example.com"))))
        .await?;
    Ok(state)
}

/// Replace the held schedule with `days` and save it together with the cursor
pub async fn install_schedule(state: &mut AppState, days: &[&[&str]]) -> Result<()> {
    while state.schedule.schedule().day_count() > 1 {
        state.schedule.decrement_days();
    }
    for (index, tags) in days.iter().enumerate() {
        if index > 0 {
            state.schedule.increment_days();
        }
        let day = u8::try_from(index + 1)?;
        for tag in *tags {
            state.schedule.toggle_selection(tag);
        }
        state.schedule.drop_on_day(day);
    }
    state.save_schedule().await?;
    Ok(())
}

/// Move the cursor directly
pub async fn set_cursor(state: &mut AppState, day: u32) -> Result<()> {
    state
        .profile
        .update_profile(&ProfileUpdate::workout_day(day))
        .await?;
    Ok(())
}

/// Tags for every day of a schedule, as owned strings
pub fn schedule_tags(schedule: &MuscleTagSchedule) -> Vec<(u8, Vec<String>)> {
    schedule
        .iter()
        .map(|(day, tags)| (day, tags.to_vec()))
        .collect()
}

/// Calendar date shorthand
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}
