// ABOUTME: Catalog store holding the user's exercise library
// ABOUTME: Legacy migration on load, validated add/update, default seeding and grouped views
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::OperationState;
use crate::auth::{AuthSession, SessionHandle};
use crate::constants::default_exercises::DEFAULT_EXERCISES;
use crate::constants::workout::DATE_FORMAT;
use crate::errors::AppResult;
use crate::models::{Exercise, NewExercise};
use crate::normalizer::{group_by_category, partition_for_day, CategoryGroup, DayPartition};
use crate::repositories::{ExerciseRepository, ExerciseRepositoryImpl};
use crate::validation::validate_exercise_input;
use chrono::Local;
use tracing::{debug, info};
use uuid::Uuid;

fn today_stamp() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Client-side view of `users/{uid}/exercises`
pub struct CatalogStore {
    session: SessionHandle,
    repository: ExerciseRepositoryImpl,
    exercises: Vec<Exercise>,
    state: OperationState,
}

impl CatalogStore {
    /// Empty store over the given repository
    #[must_use]
    pub const fn new(session: SessionHandle, repository: ExerciseRepositoryImpl) -> Self {
        Self {
            session,
            repository,
            exercises: Vec::new(),
            state: OperationState::new(),
        }
    }

    /// Held entries in store order
    #[must_use]
    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Held entry by id
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|exercise| exercise.id == id)
    }

    /// Outcome of the last operation
    #[must_use]
    pub const fn state(&self) -> &OperationState {
        &self.state
    }

    /// Entries grouped by muscle category
    #[must_use]
    pub fn grouped(&self) -> Vec<CategoryGroup<'_>> {
        group_by_category(&self.exercises)
    }

    /// Picker view split around today's tags
    #[must_use]
    pub fn partition(&self, today_tags: &[String]) -> DayPartition<'_> {
        partition_for_day(&self.exercises, today_tags)
    }

    /// Read every entry, writing legacy shapes back in normalized form
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the store error
    pub async fn load(&mut self) -> AppResult<usize> {
        self.state.begin();
        let result = self.read_and_migrate().await;
        self.exercises = self.state.settle(result)?;
        Ok(self.exercises.len())
    }

    async fn read_and_migrate(&self) -> AppResult<Vec<Exercise>> {
        let user = self.session.require_user()?;
        let normalized = self.repository.list(&user.uid).await?;

        let migrated: Vec<Exercise> = normalized
            .iter()
            .filter(|entry| entry.migrated)
            .map(|entry| entry.exercise.clone())
            .collect();
        if !migrated.is_empty() {
            self.repository.replace_many(&user.uid, &migrated).await?;
            info!(
                user.id = %user.uid,
                migrated = migrated.len(),
                "Legacy catalog entries migrated"
            );
        }

        Ok(normalized.into_iter().map(|entry| entry.exercise).collect())
    }

    /// Validate and store a new entry, generating its id when absent
    ///
    /// # Errors
    ///
    /// Returns a validation error without touching the store, `AuthRequired`
    /// without a session, or the store error
    pub async fn add_exercise(&mut self, input: NewExercise) -> AppResult<Exercise> {
        if let Err(e) = validate_exercise_input(&input.title, &input.muscle_tags) {
            return self.state.settle(Err(e));
        }
        let id = input.id.clone().unwrap_or_else(new_id);
        let mut exercise = input.into_exercise(id);
        exercise.last_used = Some(today_stamp());

        self.state.begin();
        let result = self.upsert(&exercise).await;
        self.state.settle(result)?;
        self.put_local(exercise.clone());
        Ok(exercise)
    }

    /// Validate and merge changes into an existing entry
    ///
    /// # Errors
    ///
    /// Returns a validation error without touching the store, `AuthRequired`
    /// without a session, or the store error
    pub async fn update_exercise(&mut self, mut exercise: Exercise) -> AppResult<Exercise> {
        if let Err(e) = validate_exercise_input(&exercise.title, &exercise.muscle_tags) {
            return self.state.settle(Err(e));
        }
        exercise.last_used = Some(today_stamp());

        self.state.begin();
        let result = self.upsert(&exercise).await;
        self.state.settle(result)?;
        self.put_local(exercise.clone());
        Ok(exercise)
    }

    async fn upsert(&self, exercise: &Exercise) -> AppResult<()> {
        let user = self.session.require_user()?;
        self.repository.upsert(&user.uid, exercise).await?;
        debug!(user.id = %user.uid, exercise.id = %exercise.id, "Catalog entry saved");
        Ok(())
    }

    fn put_local(&mut self, exercise: Exercise) {
        match self.exercises.iter_mut().find(|held| held.id == exercise.id) {
            Some(held) => *held = exercise,
            None => self.exercises.push(exercise),
        }
    }

    /// Remove one entry
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the store error
    pub async fn delete_exercise(&mut self, id: &str) -> AppResult<()> {
        self.state.begin();
        let result = match self.session.require_user() {
            Ok(user) => self.repository.delete(&user.uid, id).await,
            Err(e) => Err(e),
        };
        self.state.settle(result)?;
        self.exercises.retain(|exercise| exercise.id != id);
        Ok(())
    }

    /// Remove every entry; returns how many were removed remotely
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the batch commit error
    pub async fn delete_all(&mut self) -> AppResult<usize> {
        self.state.begin();
        let result = match self.session.require_user() {
            Ok(user) => self.repository.delete_all(&user.uid).await,
            Err(e) => Err(e),
        };
        let removed = self.state.settle(result)?;
        self.exercises.clear();
        Ok(removed)
    }

    /// Seed the default library when the stored catalog is empty
    ///
    /// Returns the number of seeded entries, zero when the catalog already
    /// had entries.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the batch commit error
    pub async fn seed_defaults(&mut self) -> AppResult<usize> {
        self.state.begin();
        let result = self.seed().await;
        let seeded = self.state.settle(result)?;
        let count = seeded.len();
        if !seeded.is_empty() {
            self.exercises = seeded;
        }
        Ok(count)
    }

    async fn seed(&self) -> AppResult<Vec<Exercise>> {
        let user = self.session.require_user()?;
        if !self.repository.list(&user.uid).await?.is_empty() {
            debug!(user.id = %user.uid, "Catalog not empty, skipping seed");
            return Ok(Vec::new());
        }

        let defaults: Vec<Exercise> = DEFAULT_EXERCISES
            .iter()
            .map(|(title, tags)| NewExercise::new(title, tags).into_exercise(new_id()))
            .collect();
        self.repository.replace_many(&user.uid, &defaults).await?;
        info!(user.id = %user.uid, count = defaults.len(), "Default catalog seeded");
        Ok(defaults)
    }

    /// Record a last-used write-back already persisted elsewhere
    pub fn apply_last_used(&mut self, id: &str, weight: u32, reps: u32) {
        if let Some(exercise) = self.exercises.iter_mut().find(|held| held.id == id) {
            exercise.last_used_weight = weight;
            exercise.last_used_reps = reps;
        }
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.exercises.clear();
        self.state.reset();
    }
}
