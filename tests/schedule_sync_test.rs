// ABOUTME: Integration tests for muscle-tag schedule persistence
// ABOUTME: Round trips, stale-day deletion, profile day count and tolerant loading
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use anyhow::Result;
use ironlog::repositories::{ScheduleRepository, ScheduleRepositoryImpl};
use ironlog::store::{paths, DocumentStore, Store, WriteMode};
use serde_json::json;
use tempfile::TempDir;

#[tokio::test]
async fn test_schedule_round_trip_over_sqlite() -> Result<()> {
    let dir = TempDir::new()?;
    let store = common::sqlite_store(dir.path()).await?;
    let mut state = common::signed_in_state_over(store.clone(), "u1").await?;

    common::install_schedule(
        &mut state,
        &[
            &["Chest", "Triceps"],
            &["Lower Back", "Lats", "Biceps"],
            &[],
        ],
    )
    .await?;
    let saved = common::schedule_tags(state.schedule.schedule());

    let mut reloaded = common::signed_in_state_over(store, "u1").await?;
    reloaded.bootstrap().await?;
    assert_eq!(common::schedule_tags(reloaded.schedule.schedule()), saved);
    assert_eq!(
        reloaded.schedule.schedule().tags_for(2).unwrap(),
        ["Lower Back", "Lats", "Biceps"]
    );
    assert_eq!(reloaded.profile.profile().unwrap().workout_days, Some(3));
    Ok(())
}

#[tokio::test]
async fn test_shrinking_schedule_deletes_days_and_clamps_cursor() -> Result<()> {
    let store = Store::memory();
    let mut state = common::signed_in_state_over(store.clone(), "u1").await?;
    common::install_schedule(&mut state, &[&["Chest"], &["Quads"], &["Abs"], &["Lats"]]).await?;
    common::set_cursor(&mut state, 4).await?;

    assert!(state.schedule.decrement_days());
    assert!(state.schedule.decrement_days());
    state.save_schedule().await?;

    let ids: Vec<String> = store
        .list(&paths::muscle_tags("u1")?)
        .await?
        .into_iter()
        .map(|doc| doc.id)
        .collect();
    assert_eq!(ids, vec!["1", "2"]);

    let profile = store.get(&paths::user_doc("u1")?).await?.unwrap();
    assert_eq!(profile["workoutDays"], 2);
    assert_eq!(profile["workoutDay"], 2);
    assert_eq!(state.profile.workout_day(), 2);
    Ok(())
}

#[tokio::test]
async fn test_load_skips_invalid_day_keys() -> Result<()> {
    common::init_test_logging();
    let store = Store::memory();
    let collection = paths::muscle_tags("u1")?;
    for (key, tags) in [("1", json!(["Chest"])), ("legs", json!(["Quads"])), ("3", json!(["Abs"]))] {
        store
            .set(&collection.doc(key)?, json!({ "tags": tags }), WriteMode::Replace)
            .await?;
    }

    let repository = ScheduleRepositoryImpl::new(store.clone());
    let schedule = repository.load("u1").await?;
    assert_eq!(schedule.day_keys(), vec!["1", "2"]);
    assert_eq!(schedule.tags_for(2).unwrap(), ["Abs"]);

    repository.save_with_profile("u1", &schedule, 1).await?;
    let ids: Vec<String> = store
        .list(&collection)
        .await?
        .into_iter()
        .map(|doc| doc.id)
        .collect();
    assert_eq!(ids, vec!["1", "2"]);
    Ok(())
}

#[tokio::test]
async fn test_empty_schedule_is_not_persisted_on_load() -> Result<()> {
    let store = Store::memory();
    let state = common::signed_in_state_over(store.clone(), "u1").await?;
    assert_eq!(state.schedule.schedule().day_count(), 1);
    assert!(store.list(&paths::muscle_tags("u1")?).await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_save_if_changed_keeps_profile_in_step() -> Result<()> {
    let store = Store::memory();
    let mut state = common::signed_in_state_over(store.clone(), "u1").await?;
    common::install_schedule(&mut state, &[&["Chest"], &["Back"], &["Quads"]]).await?;
    common::set_cursor(&mut state, 3).await?;
    assert!(!state.save_schedule_if_changed().await?);

    assert!(state.schedule.decrement_days());
    assert!(state.save_schedule_if_changed().await?);
    assert!(!state.save_schedule_if_changed().await?);

    let profile = store.get(&paths::user_doc("u1")?).await?.unwrap();
    assert_eq!(profile["workoutDays"], 2);
    assert_eq!(profile["workoutDay"], 2);
    assert_eq!(state.profile.workout_day(), 2);
    assert_eq!(store.list(&paths::muscle_tags("u1")?).await?.len(), 2);
    Ok(())
}
