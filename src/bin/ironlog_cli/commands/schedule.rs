// ABOUTME: Schedule commands for ironlog-cli
// ABOUTME: Day add/remove and tag assignment, saved together with the profile cursor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use ironlog::{
    errors::{AppError, AppResult},
    state::AppState,
};
use tracing::warn;

use crate::helpers::display::display_schedule;

type Result<T> = AppResult<T>;

/// Print every day with its tags
pub fn show(state: &AppState) {
    display_schedule(state.schedule.schedule(), state.profile.workout_day());
}

/// Append an empty day and save
pub async fn add_day(state: &mut AppState) -> Result<()> {
    if !state.schedule.increment_days() {
        warn!("Schedule already has the maximum number of days");
        println!("Schedule already has 7 days.");
        return Ok(());
    }
    state.save_schedule().await?;
    show(state);
    Ok(())
}

/// Drop the last day and save
pub async fn remove_day(state: &mut AppState) -> Result<()> {
    if !state.schedule.decrement_days() {
        println!("Schedule must keep at least one day.");
        return Ok(());
    }
    state.save_schedule().await?;
    show(state);
    Ok(())
}

fn require_day(state: &AppState, day: u8) -> Result<()> {
    if state.schedule.schedule().contains_day(day) {
        Ok(())
    } else {
        Err(AppError::out_of_range(format!(
            "Day {day} does not exist; the schedule has {} days.",
            state.schedule.schedule().day_count()
        )))
    }
}

/// Add tags to a day and save
pub async fn assign(state: &mut AppState, day: u8, tags: &[String]) -> Result<()> {
    require_day(state, day)?;
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !state.schedule.selection().iter().any(|held| held == tag) {
            state.schedule.toggle_selection(tag);
        }
    }
    let added = state.schedule.drop_on_day(day);
    state.save_schedule_if_changed().await?;
    println!("Added {added} muscle group(s) to day {day}.");
    show(state);
    Ok(())
}

/// Remove a tag from a day and save
pub async fn unassign(state: &mut AppState, day: u8, tag: &str) -> Result<()> {
    require_day(state, day)?;
    if state.schedule.remove_from_day(day, tag) {
        state.save_schedule().await?;
        println!("Removed {tag} from day {day}.");
    } else {
        println!("Day {day} does not include {tag}.");
    }
    show(state);
    Ok(())
}
