// ABOUTME: Schedule store holding the weekly muscle-tag plan and the drag selection
// ABOUTME: Local day/tag edits, diffed saves with the profile cursor, and a changed-since-save check
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::OperationState;
use crate::auth::{AuthSession, SessionHandle};
use crate::errors::AppResult;
use crate::models::MuscleTagSchedule;
use crate::repositories::{ScheduleRepository, ScheduleRepositoryImpl};
use tracing::{debug, warn};

/// Client-side view of `users/{uid}/muscleTags`
pub struct ScheduleStore {
    session: SessionHandle,
    repository: ScheduleRepositoryImpl,
    schedule: MuscleTagSchedule,
    saved: Option<MuscleTagSchedule>,
    selection: Vec<String>,
    state: OperationState,
}

impl ScheduleStore {
    /// Store holding the single empty day 1
    #[must_use]
    pub fn new(session: SessionHandle, repository: ScheduleRepositoryImpl) -> Self {
        Self {
            session,
            repository,
            schedule: MuscleTagSchedule::default(),
            saved: None,
            selection: Vec::new(),
            state: OperationState::new(),
        }
    }

    /// Held schedule
    #[must_use]
    pub const fn schedule(&self) -> &MuscleTagSchedule {
        &self.schedule
    }

    /// Tags picked for the next drop
    #[must_use]
    pub fn selection(&self) -> &[String] {
        &self.selection
    }

    /// Outcome of the last operation
    #[must_use]
    pub const fn state(&self) -> &OperationState {
        &self.state
    }

    /// Tags for the cursor day, empty when the day does not exist
    #[must_use]
    pub fn today_tags(&self, workout_day: u32) -> &[String] {
        u8::try_from(workout_day)
            .ok()
            .and_then(|day| self.schedule.tags_for(day))
            .unwrap_or_default()
    }

    /// Read every stored day
    ///
    /// Failures are kept in [`ScheduleStore::state`] and leave the held
    /// schedule untouched.
    pub async fn load(&mut self) {
        self.state.begin();
        let result = match self.session.require_user() {
            Ok(user) => self.repository.load(&user.uid).await,
            Err(e) => Err(e),
        };
        match self.state.settle(result) {
            Ok(schedule) => {
                debug!(days = schedule.day_count(), "Schedule loaded");
                self.saved = Some(schedule.clone());
                self.schedule = schedule;
            }
            Err(e) => warn!(error = %e, "Schedule load failed"),
        }
    }

    /// Persist the held schedule with the profile's day count and cursor in one batch
    ///
    /// Days that no longer exist are deleted. Callers pass a cursor already
    /// clamped to the new day count; see `AppState::save_schedule`.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the batch commit error
    pub(crate) async fn save_with_cursor(&mut self, workout_day: u32) -> AppResult<()> {
        self.state.begin();
        let result = match self.session.require_user() {
            Ok(user) => {
                self.repository
                    .save_with_profile(&user.uid, &self.schedule, workout_day)
                    .await
            }
            Err(e) => Err(e),
        };
        self.state.settle(result)?;
        self.saved = Some(self.schedule.clone());
        Ok(())
    }

    /// Whether the held schedule reflects the stored one, from a load or a save
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.saved.is_some()
    }

    /// Whether the held schedule differs from the last loaded or saved one
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.saved.as_ref() != Some(&self.schedule)
    }

    /// Append an empty day; no-op at seven days
    pub fn increment_days(&mut self) -> bool {
        self.schedule.add_day()
    }

    /// Drop the last day; no-op at one day
    pub fn decrement_days(&mut self) -> bool {
        self.schedule.remove_last_day()
    }

    /// Select or deselect a tag; returns whether it is now selected
    pub fn toggle_selection(&mut self, tag: &str) -> bool {
        if let Some(position) = self.selection.iter().position(|selected| selected == tag) {
            self.selection.remove(position);
            false
        } else {
            self.selection.push(tag.to_owned());
            true
        }
    }

    /// Add the selected tags to `day`, then clear the selection
    ///
    /// Returns how many tags were new to the day.
    pub fn drop_on_day(&mut self, day: u8) -> usize {
        let added = self.schedule.assign(day, &self.selection);
        self.selection.clear();
        added
    }

    /// Remove one tag from a day
    pub fn remove_from_day(&mut self, day: u8, tag: &str) -> bool {
        self.schedule.remove_tag(day, tag)
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.schedule = MuscleTagSchedule::default();
        self.saved = None;
        self.selection.clear();
        self.state.reset();
    }
}
