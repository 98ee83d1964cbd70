// ABOUTME: Muscle-tag schedule repository implementation
// ABOUTME: One document per day, saved as a diff batch that deletes removed days
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ScheduleRepository;
use crate::errors::AppResult;
use crate::models::MuscleTagSchedule;
use crate::store::{paths, DocumentStore, Store, WriteBatch, WriteMode};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use tracing::debug;

/// Store-backed implementation of `ScheduleRepository`
pub struct ScheduleRepositoryImpl {
    store: Store,
}

impl ScheduleRepositoryImpl {
    /// Create a new `ScheduleRepository` over the given store
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    async fn diff_batch(&self, uid: &str, schedule: &MuscleTagSchedule) -> AppResult<WriteBatch> {
        let collection = paths::muscle_tags(uid)?;
        let existing = self.store.list(&collection).await?;
        let keep: BTreeSet<String> = schedule.day_keys().into_iter().collect();

        let mut batch = WriteBatch::new();
        for document in existing.iter().filter(|doc| !keep.contains(&doc.id)) {
            batch.delete(collection.doc(&document.id)?);
        }
        for (day, tags) in schedule.iter() {
            batch.set(
                paths::muscle_tag_day(uid, day)?,
                json!({ "tags": tags }),
                WriteMode::Replace,
            );
        }
        Ok(batch)
    }
}

fn stored_tags(data: &Value) -> Vec<String> {
    data.get("tags")
        .and_then(Value::as_array)
        .map(|tags| {
            tags.iter()
                .filter_map(Value::as_str)
                .map(ToOwned::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl ScheduleRepository for ScheduleRepositoryImpl {
    async fn load(&self, uid: &str) -> AppResult<MuscleTagSchedule> {
        let documents = self.store.list(&paths::muscle_tags(uid)?).await?;
        Ok(MuscleTagSchedule::from_stored(
            documents
                .into_iter()
                .map(|doc| {
                    let tags = stored_tags(&doc.data);
                    (doc.id, tags)
                }),
        ))
    }

    async fn save_with_profile(
        &self,
        uid: &str,
        schedule: &MuscleTagSchedule,
        workout_day: u32,
    ) -> AppResult<()> {
        let mut batch = self.diff_batch(uid, schedule).await?;
        batch.set(
            paths::user_doc(uid)?,
            json!({
                "workoutDays": schedule.day_count(),
                "workoutDay": workout_day,
            }),
            WriteMode::Merge,
        );
        let op_count = batch.len();
        self.store.commit(batch).await?;
        debug!(
            user.id = %uid,
            days = schedule.day_count(),
            workout_day,
            op_count,
            "Schedule saved with profile"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|label| (*label).to_owned()).collect()
    }

    #[tokio::test]
    async fn test_empty_load_is_single_day() {
        let repo = ScheduleRepositoryImpl::new(Store::memory());
        let schedule = repo.load("u1").await.unwrap();
        assert_eq!(schedule, MuscleTagSchedule::default());
    }

    #[tokio::test]
    async fn test_save_deletes_removed_days() {
        let store = Store::memory();
        let repo = ScheduleRepositoryImpl::new(store.clone());

        let mut schedule = MuscleTagSchedule::with_days(3);
        schedule.assign(3, &tags(&["Calves"]));
        repo.save_with_profile("u1", &schedule, 1).await.unwrap();

        schedule.remove_last_day();
        schedule.assign(1, &tags(&["Lower Back", "Lats"]));
        repo.save_with_profile("u1", &schedule, 1).await.unwrap();

        let stored = store.list(&paths::muscle_tags("u1").unwrap()).await.unwrap();
        let ids: Vec<_> = stored.iter().map(|doc| doc.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(repo.load("u1").await.unwrap(), schedule);
    }

    #[tokio::test]
    async fn test_save_with_profile_syncs_day_count() {
        let store = Store::memory();
        let repo = ScheduleRepositoryImpl::new(store.clone());
        repo.save_with_profile("u1", &MuscleTagSchedule::with_days(4), 2)
            .await
            .unwrap();

        let profile = store.get(&paths::user_doc("u1").unwrap()).await.unwrap().unwrap();
        assert_eq!(profile["workoutDays"], 4);
        assert_eq!(profile["workoutDay"], 2);
    }
}
