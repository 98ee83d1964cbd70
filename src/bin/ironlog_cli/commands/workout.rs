// ABOUTME: Workout commands for ironlog-cli
// ABOUTME: Show, start, finish and undo a dated workout, and list history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use ironlog::{errors::AppResult, state::AppState};

use crate::helpers::{
    display::{display_history, display_workout},
    resolve_date,
};

type Result<T> = AppResult<T>;

/// Print a record, loading (and creating) it if needed
pub async fn show(state: &mut AppState, date: Option<&str>) -> Result<()> {
    let date = resolve_date(date)?;
    let record = state.workouts.load_by_date(date).await?;
    state.tracking.load(date).await?;
    display_workout(&record, state.tracking.entries());
    Ok(())
}

/// Mark a record started
pub async fn start(state: &mut AppState, date: Option<&str>) -> Result<()> {
    let date = resolve_date(date)?;
    state.workouts.load_by_date(date).await?;
    state.workouts.start(date).await?;
    println!("Workout {date} started.");
    Ok(())
}

/// Finish a record and advance the cursor
pub async fn finish(
    state: &mut AppState,
    date: Option<&str>,
    rating: u8,
    notes: String,
) -> Result<()> {
    let date = resolve_date(date)?;
    if state.finish_workout(date, rating, notes).await? {
        println!(
            "Workout {date} finished. Next workout day: {}.",
            state.profile.workout_day()
        );
    } else {
        println!("Workout {date} was already finished.");
    }
    Ok(())
}

/// Undo a finish and rewind the cursor
pub async fn undo(state: &mut AppState, date: Option<&str>) -> Result<()> {
    let date = resolve_date(date)?;
    if state.undo_finish(date).await? {
        println!(
            "Workout {date} reopened. Workout day: {}.",
            state.profile.workout_day()
        );
    } else {
        println!("Workout {date} is not finished.");
    }
    Ok(())
}

/// Print every record, newest first
pub async fn history(state: &mut AppState) -> Result<()> {
    state.workouts.load_all().await?;
    display_history(&state.workouts.history());
    Ok(())
}
