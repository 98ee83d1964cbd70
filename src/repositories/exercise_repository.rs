// ABOUTME: Exercise catalog repository implementation
// ABOUTME: Normalizes legacy catalog documents on read and batches bulk writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ExerciseRepository;
use crate::errors::{AppError, AppResult};
use crate::models::{Exercise, NormalizedExercise};
use crate::store::{paths, DocumentStore, Store, WriteBatch, WriteMode};
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

/// Store-backed implementation of `ExerciseRepository`
pub struct ExerciseRepositoryImpl {
    store: Store,
}

impl ExerciseRepositoryImpl {
    /// Create a new `ExerciseRepository` over the given store
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ExerciseRepository for ExerciseRepositoryImpl {
    async fn list(&self, uid: &str) -> AppResult<Vec<NormalizedExercise>> {
        let documents = self.store.list(&paths::exercises(uid)?).await?;
        let mut exercises = Vec::with_capacity(documents.len());
        for document in documents {
            match Exercise::from_document(&document.id, document.data) {
                Ok(normalized) => exercises.push(normalized),
                Err(e) => {
                    warn!(exercise.id = %document.id, error = %e, "Skipping unreadable catalog entry");
                }
            }
        }
        Ok(exercises)
    }

    async fn get(&self, uid: &str, id: &str) -> AppResult<Option<Exercise>> {
        let path = paths::exercise(uid, id)?;
        match self.store.get(&path).await? {
            Some(data) => Ok(Some(Exercise::from_document(id, data)?.exercise)),
            None => Ok(None),
        }
    }

    async fn upsert(&self, uid: &str, exercise: &Exercise) -> AppResult<()> {
        let path = paths::exercise(uid, &exercise.id)?;
        self.store
            .set(&path, serde_json::to_value(exercise)?, WriteMode::Merge)
            .await?;
        Ok(())
    }

    async fn replace_many(&self, uid: &str, exercises: &[Exercise]) -> AppResult<()> {
        if exercises.is_empty() {
            return Ok(());
        }
        let mut batch = WriteBatch::new();
        for exercise in exercises {
            batch.set(
                paths::exercise(uid, &exercise.id)?,
                serde_json::to_value(exercise)?,
                WriteMode::Replace,
            );
        }
        self.store.commit(batch).await?;
        debug!(user.id = %uid, count = exercises.len(), "Catalog entries replaced");
        Ok(())
    }

    async fn update_last_used(
        &self,
        uid: &str,
        id: &str,
        weight: u32,
        reps: u32,
    ) -> AppResult<()> {
        let path = paths::exercise(uid, id)?;
        self.store
            .set(
                &path,
                json!({ "lastUsedWeight": weight, "lastUsedReps": reps }),
                WriteMode::Update,
            )
            .await
            .map_err(|e| AppError::from(e).with_resource_id(id))?;
        Ok(())
    }

    async fn delete(&self, uid: &str, id: &str) -> AppResult<()> {
        self.store.delete(&paths::exercise(uid, id)?).await?;
        Ok(())
    }

    async fn delete_all(&self, uid: &str) -> AppResult<usize> {
        let collection = paths::exercises(uid)?;
        let documents = self.store.list(&collection).await?;
        let mut batch = WriteBatch::new();
        for document in &documents {
            batch.delete(collection.doc(&document.id)?);
        }
        self.store.commit(batch).await?;
        Ok(documents.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExercise;
    use serde_json::json;

    #[tokio::test]
    async fn test_list_normalizes_legacy_documents() {
        let store = Store::memory();
        store
            .set(
                &paths::exercise("u1", "legacy").unwrap(),
                json!({ "title": "Bench", "muscleGroup": "Chest" }),
                WriteMode::Replace,
            )
            .await
            .unwrap();

        let repo = ExerciseRepositoryImpl::new(store);
        let listed = repo.list("u1").await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].migrated);
        assert_eq!(listed[0].exercise.muscle_tags, vec!["Chest".to_owned()]);
    }

    #[tokio::test]
    async fn test_update_last_used_requires_existing_entry() {
        let repo = ExerciseRepositoryImpl::new(Store::memory());
        assert!(repo.update_last_used("u1", "missing", 100, 5).await.is_err());

        let exercise = NewExercise::new("Rows", &["Lats"]).into_exercise("rows".to_owned());
        repo.upsert("u1", &exercise).await.unwrap();
        repo.update_last_used("u1", "rows", 100, 5).await.unwrap();

        let stored = repo.get("u1", "rows").await.unwrap().unwrap();
        assert_eq!((stored.last_used_weight, stored.last_used_reps), (100, 5));
    }

    #[tokio::test]
    async fn test_delete_all() {
        let repo = ExerciseRepositoryImpl::new(Store::memory());
        let entries = vec![
            NewExercise::new("A", &["Abs"]).into_exercise("a".to_owned()),
            NewExercise::new("B", &["Abs"]).into_exercise("b".to_owned()),
        ];
        repo.replace_many("u1", &entries).await.unwrap();

        assert_eq!(repo.delete_all("u1").await.unwrap(), 2);
        assert!(repo.list("u1").await.unwrap().is_empty());
    }
}
