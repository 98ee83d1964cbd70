// ABOUTME: Workout record repository implementation
// ABOUTME: Date-keyed records, cascade delete, and atomic completion + cursor commits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::WorkoutRepository;
use crate::errors::AppResult;
use crate::models::{CompletionPatch, WorkoutRecord};
use crate::store::{paths, DocumentStore, Store, WriteBatch, WriteMode};
use async_trait::async_trait;
use serde_json::json;
use std::cmp::Reverse;
use tracing::{debug, info, warn};

/// Store-backed implementation of `WorkoutRepository`
pub struct WorkoutRepositoryImpl {
    store: Store,
}

impl WorkoutRepositoryImpl {
    /// Create a new `WorkoutRepository` over the given store
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl WorkoutRepository for WorkoutRepositoryImpl {
    async fn get(&self, uid: &str, date: &str) -> AppResult<Option<WorkoutRecord>> {
        let path = paths::workout(uid, date)?;
        match self.store.get(&path).await? {
            Some(data) => Ok(Some(WorkoutRecord::from_document(date, data)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, uid: &str, record: &WorkoutRecord) -> AppResult<()> {
        let path = paths::workout(uid, &record.date)?;
        self.store
            .set(&path, serde_json::to_value(record)?, WriteMode::Merge)
            .await?;
        debug!(user.id = %uid, workout.date = %record.date, "Workout record saved");
        Ok(())
    }

    async fn set_started(&self, uid: &str, date: &str) -> AppResult<()> {
        let path = paths::workout(uid, date)?;
        self.store
            .set(&path, json!({ "isStarted": true }), WriteMode::Merge)
            .await?;
        Ok(())
    }

    async fn set_rating(&self, uid: &str, date: &str, rating: u8) -> AppResult<()> {
        let path = paths::workout(uid, date)?;
        self.store
            .set(&path, json!({ "rating": rating }), WriteMode::Merge)
            .await?;
        Ok(())
    }

    async fn list(&self, uid: &str) -> AppResult<Vec<WorkoutRecord>> {
        let documents = self.store.list(&paths::workouts(uid)?).await?;
        let mut records = Vec::with_capacity(documents.len());
        for document in documents {
            match WorkoutRecord::from_document(&document.id, document.data) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!(workout.date = %document.id, error = %e, "Skipping unreadable workout record");
                }
            }
        }
        records.sort_by_key(|record| Reverse(record.date.clone()));
        Ok(records)
    }

    async fn delete(&self, uid: &str, date: &str) -> AppResult<()> {
        let workout = paths::workout(uid, date)?;
        let tracking = paths::tracking(uid, date)?;
        let entries = self.store.list(&tracking).await?;

        let mut batch = WriteBatch::new();
        for entry in &entries {
            batch.delete(tracking.doc(&entry.id)?);
        }
        batch.delete(workout);
        self.store.commit(batch).await?;

        info!(
            user.id = %uid,
            workout.date = %date,
            tracking_entries = entries.len(),
            "Workout record deleted"
        );
        Ok(())
    }

    async fn commit_completion(
        &self,
        uid: &str,
        date: &str,
        patch: &CompletionPatch,
        workout_day: u32,
    ) -> AppResult<()> {
        let mut batch = WriteBatch::new();
        batch
            .set(
                paths::workout(uid, date)?,
                serde_json::to_value(patch)?,
                WriteMode::Merge,
            )
            .set(
                paths::user_doc(uid)?,
                json!({ "workoutDay": workout_day }),
                WriteMode::Merge,
            );
        self.store.commit(batch).await?;
        Ok(())
    }
}
