// ABOUTME: Tracking store holding the exercise entries logged under one workout date
// ABOUTME: Set edits save immediately except field edits, which wait for an explicit commit
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::OperationState;
use crate::auth::{AuthSession, SessionHandle};
use crate::errors::{AppError, AppResult};
use crate::models::{Exercise, SetEntry, SetField, TrackingEntry, WorkoutRecord};
use crate::normalizer;
use crate::repositories::{
    tracking_repository::sort_by_order, ExerciseRepository, ExerciseRepositoryImpl,
    TrackingRepository, TrackingRepositoryImpl,
};
use chrono::NaiveDate;
use tracing::{debug, warn};
use uuid::Uuid;

/// Client-side view of `users/{uid}/workouts/{date}/exerciseTracking`
pub struct TrackingStore {
    session: SessionHandle,
    tracking: TrackingRepositoryImpl,
    exercises: ExerciseRepositoryImpl,
    entries: Vec<TrackingEntry>,
    state: OperationState,
}

impl TrackingStore {
    /// Empty store over the tracking and catalog repositories
    #[must_use]
    pub const fn new(
        session: SessionHandle,
        tracking: TrackingRepositoryImpl,
        exercises: ExerciseRepositoryImpl,
    ) -> Self {
        Self {
            session,
            tracking,
            exercises,
            entries: Vec::new(),
            state: OperationState::new(),
        }
    }

    /// Held entries in display order
    #[must_use]
    pub fn entries(&self) -> &[TrackingEntry] {
        &self.entries
    }

    /// Held entry by id
    #[must_use]
    pub fn entry(&self, entry_id: &str) -> Option<&TrackingEntry> {
        self.entries.iter().find(|entry| entry.id == entry_id)
    }

    /// Outcome of the last operation
    #[must_use]
    pub const fn state(&self) -> &OperationState {
        &self.state
    }

    fn position(&self, entry_id: &str) -> AppResult<usize> {
        self.entries
            .iter()
            .position(|entry| entry.id == entry_id)
            .ok_or_else(|| {
                AppError::not_found(format!("Tracking entry {entry_id}")).with_resource_id(entry_id)
            })
    }

    /// Read every entry under the workout for `date`
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the store error
    pub async fn load(&mut self, date: NaiveDate) -> AppResult<usize> {
        self.state.begin();
        let result = match self.session.require_user() {
            Ok(user) => {
                self.tracking
                    .list(&user.uid, &WorkoutRecord::key_for(date))
                    .await
            }
            Err(e) => Err(e),
        };
        self.entries = self.state.settle(result)?;
        Ok(self.entries.len())
    }

    /// Start tracking a catalog exercise with one empty set
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the store error
    pub async fn add_entry(
        &mut self,
        date: NaiveDate,
        exercise: &Exercise,
    ) -> AppResult<TrackingEntry> {
        let mut entry = TrackingEntry::from_exercise(Uuid::new_v4().to_string(), exercise);
        entry.order = u32::try_from(self.entries.len()).ok();

        self.state.begin();
        let result = self.persist(date, &entry).await;
        self.state.settle(result)?;
        self.entries.push(entry.clone());
        Ok(entry)
    }

    async fn persist(&self, date: NaiveDate, entry: &TrackingEntry) -> AppResult<()> {
        let user = self.session.require_user()?;
        self.tracking
            .save(&user.uid, &WorkoutRecord::key_for(date), entry)
            .await
    }

    /// Save the full entry, then copy its last set to the catalog's last-used fields
    ///
    /// Returns the set written back. `None` when the entry has no sets or the
    /// write-back failed; a failed write-back is logged and does not undo the
    /// saved entry.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the store error from
    /// saving the entry
    pub async fn update_entry(
        &mut self,
        date: NaiveDate,
        entry: TrackingEntry,
    ) -> AppResult<Option<SetEntry>> {
        self.state.begin();
        let result = self.persist(date, &entry).await;
        self.state.settle(result)?;

        let last = entry.last_set().copied();
        let exercise_id = entry.exercise_id.clone();
        match self.entries.iter_mut().find(|held| held.id == entry.id) {
            Some(held) => *held = entry,
            None => self.entries.push(entry),
        }

        match last {
            Some(last) => Ok(self.write_back_last_used(&exercise_id, last).await),
            None => Ok(None),
        }
    }

    async fn write_back_last_used(&self, exercise_id: &str, last: SetEntry) -> Option<SetEntry> {
        let result = match self.session.require_user() {
            Ok(user) => {
                self.exercises
                    .update_last_used(&user.uid, exercise_id, last.weight, last.reps)
                    .await
            }
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => {
                debug!(
                    exercise.id = %exercise_id,
                    weight = last.weight,
                    reps = last.reps,
                    "Last-used values written back"
                );
                Some(last)
            }
            Err(e) => {
                warn!(exercise.id = %exercise_id, error = %e, "Last-used write-back skipped");
                None
            }
        }
    }

    /// Stop tracking an entry
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the store error
    pub async fn delete_entry(&mut self, date: NaiveDate, entry_id: &str) -> AppResult<()> {
        self.state.begin();
        let result = match self.session.require_user() {
            Ok(user) => {
                self.tracking
                    .delete(&user.uid, &WorkoutRecord::key_for(date), entry_id)
                    .await
            }
            Err(e) => Err(e),
        };
        self.state.settle(result)?;
        self.entries.retain(|entry| entry.id != entry_id);
        Ok(())
    }

    /// Persist a new display order; every id must already exist
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the batch commit error
    pub async fn reorder(&mut self, date: NaiveDate, entry_ids: &[String]) -> AppResult<()> {
        self.state.begin();
        let result = match self.session.require_user() {
            Ok(user) => {
                self.tracking
                    .reorder(&user.uid, &WorkoutRecord::key_for(date), entry_ids)
                    .await
            }
            Err(e) => Err(e),
        };
        self.state.settle(result)?;
        for entry in &mut self.entries {
            entry.order = entry_ids
                .iter()
                .position(|id| *id == entry.id)
                .and_then(|position| u32::try_from(position).ok());
        }
        sort_by_order(&mut self.entries);
        Ok(())
    }

    /// Append an empty set and save the entry
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown entry, or the store error
    pub async fn add_set(&mut self, date: NaiveDate, entry_id: &str) -> AppResult<SetEntry> {
        let found = self.position(entry_id);
        let index = self.state.settle(found)?;
        let mut entry = self.entries[index].clone();
        let set = normalizer::add_set(&mut entry);

        self.state.begin();
        let result = self.persist(date, &entry).await;
        self.state.settle(result)?;
        self.entries[index] = entry;
        Ok(set)
    }

    /// Remove a set, renumber the rest and save the entry
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown entry, `ValueOutOfRange` for
    /// a bad index, or the store error
    pub async fn remove_set(
        &mut self,
        date: NaiveDate,
        entry_id: &str,
        index: usize,
    ) -> AppResult<SetEntry> {
        let found = self.position(entry_id);
        let position = self.state.settle(found)?;
        let mut entry = self.entries[position].clone();
        let removed = normalizer::remove_set(&mut entry, index);
        let removed = self.state.settle(removed)?;

        self.state.begin();
        let result = self.persist(date, &entry).await;
        self.state.settle(result)?;
        self.entries[position] = entry;
        Ok(removed)
    }

    /// Change one field of one set locally; nothing is written until [`TrackingStore::commit_sets`]
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown entry or `ValueOutOfRange`
    /// for a bad index
    pub fn edit_set(
        &mut self,
        entry_id: &str,
        index: usize,
        field: SetField,
        value: u32,
    ) -> AppResult<()> {
        let position = self.position(entry_id)?;
        normalizer::edit_set(&mut self.entries[position], index, field, value)
    }

    /// Persist an entry's draft sets and fire the last-used write-back
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown entry, or the
    /// [`TrackingStore::update_entry`] error
    pub async fn commit_sets(
        &mut self,
        date: NaiveDate,
        entry_id: &str,
    ) -> AppResult<Option<SetEntry>> {
        let found = self.position(entry_id);
        let position = self.state.settle(found)?;
        let entry = self.entries[position].clone();
        self.update_entry(date, entry).await
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.entries.clear();
        self.state.reset();
    }
}
