// ABOUTME: Helper modules for ironlog-cli
// ABOUTME: Output formatting, date arguments and store directory preparation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod display;

use chrono::{Local, NaiveDate};
use ironlog::config::StoreUrl;
use ironlog::errors::AppResult;
use ironlog::validation::parse_workout_date;

/// Parse a `YYYY-MM-DD` argument, defaulting to the local date
pub fn resolve_date(date: Option<&str>) -> AppResult<NaiveDate> {
    date.map_or_else(|| Ok(Local::now().date_naive()), parse_workout_date)
}

/// Create the parent directory of a `SQLite` file
pub async fn prepare_store_dir(store: &StoreUrl) -> std::io::Result<()> {
    if let StoreUrl::Sqlite { path } = store {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}
