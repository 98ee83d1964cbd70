// ABOUTME: Explicit application state container owning one store per entity
// ABOUTME: Cross-store flows (sign-in, finish/undo, schedule + cursor) live here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Application State
//!
//! Every store holds the client-side view of one entity and mutates it
//! through `&mut self`, so each has a single writer. Stores record the
//! outcome of their last operation in an [`OperationState`] and also return
//! the result, letting callers either observe or ignore failures.

/// Exercise catalog store
pub mod catalog;
/// Profile store
pub mod profile;
/// Muscle-tag schedule store
pub mod schedule;
/// Tracking entry store
pub mod tracking;
/// Warm-up panel
pub mod warmup;
/// Workout record store
pub mod workouts;

pub use catalog::CatalogStore;
pub use profile::ProfileStore;
pub use schedule::ScheduleStore;
pub use tracking::TrackingStore;
pub use warmup::{WarmupPanel, WarmupStep};
pub use workouts::WorkoutStore;

use crate::auth::{AuthSession, AuthUser, SessionHandle};
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::feedback::FeedbackClient;
use crate::logging::AppLogger;
use crate::models::{CompletionPatch, SetEntry};
use crate::normalizer::{next_workout_day, previous_workout_day};
use crate::repositories::Repositories;
use crate::store::Store;
use crate::validation::validate_rating;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Lifecycle of a store's most recent remote operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    /// Nothing dispatched yet
    #[default]
    Idle,
    /// Operation in flight
    Loading,
    /// Last operation succeeded
    Succeeded,
    /// Last operation failed; see [`OperationState::error`]
    Failed,
}

/// Status and error message of a store's most recent operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationState {
    /// Current status
    pub status: RequestStatus,
    /// Message of the last failure, cleared on the next dispatch
    pub error: Option<String>,
}

impl OperationState {
    /// Idle state with no error
    #[must_use]
    pub const fn new() -> Self {
        Self {
            status: RequestStatus::Idle,
            error: None,
        }
    }

    /// Mark an operation as in flight
    pub fn begin(&mut self) {
        self.status = RequestStatus::Loading;
        self.error = None;
    }

    /// Record the outcome of an operation and pass it through
    ///
    /// # Errors
    ///
    /// Returns `result` unchanged
    pub fn settle<T>(&mut self, result: AppResult<T>) -> AppResult<T> {
        match &result {
            Ok(_) => {
                self.status = RequestStatus::Succeeded;
                self.error = None;
            }
            Err(e) => {
                self.status = RequestStatus::Failed;
                self.error = Some(e.message.clone());
            }
        }
        result
    }

    /// Back to idle
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Screen the navigation gate sends the user to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Route {
    /// Nobody signed in
    SignIn,
    /// Signed in, onboarding not completed
    Onboarding,
    /// Signed in and onboarded
    Home,
}

/// Root container passed to every screen
pub struct AppState {
    session: SessionHandle,
    store: Store,
    /// Profile and workout-day cursor
    pub profile: ProfileStore,
    /// Muscle-tag schedule
    pub schedule: ScheduleStore,
    /// Exercise catalog
    pub catalog: CatalogStore,
    /// Workout records by date
    pub workouts: WorkoutStore,
    /// Tracking entries for the open workout
    pub tracking: TrackingStore,
    feedback: Option<FeedbackClient>,
}

impl AppState {
    /// State over `store` with nobody signed in and no feedback relay
    #[must_use]
    pub fn new(store: Store) -> Self {
        Self::with_session(store, SessionHandle::new(), None)
    }

    /// State over `store` sharing an existing session
    #[must_use]
    pub fn with_session(
        store: Store,
        session: SessionHandle,
        feedback: Option<FeedbackClient>,
    ) -> Self {
        let repositories = Repositories::new(store.clone());
        Self {
            profile: ProfileStore::new(session.clone(), repositories.profiles()),
            schedule: ScheduleStore::new(session.clone(), repositories.schedules()),
            catalog: CatalogStore::new(session.clone(), repositories.exercises()),
            workouts: WorkoutStore::new(session.clone(), repositories.workouts()),
            tracking: TrackingStore::new(
                session.clone(),
                repositories.tracking(),
                repositories.exercises(),
            ),
            session,
            store,
            feedback,
        }
    }

    /// Open the configured store and build the feedback client
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be opened or the HTTP client built
    pub async fn from_config(config: &AppConfig) -> AppResult<Self> {
        let store = Store::from_url(&config.store).await?;
        let feedback = FeedbackClient::new(&config.feedback)?;
        info!(backend = store.backend_info(), "Application state ready");
        Ok(Self::with_session(store, SessionHandle::new(), Some(feedback)))
    }

    /// Shared session handle
    #[must_use]
    pub const fn session(&self) -> &SessionHandle {
        &self.session
    }

    /// Underlying document store
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Where the navigation gate sends the user
    #[must_use]
    pub fn route(&self) -> Route {
        if self.session.current_user().is_none() {
            return Route::SignIn;
        }
        match self.profile.profile() {
            Some(profile) if profile.intro_complete => Route::Home,
            _ => Route::Onboarding,
        }
    }

    /// Establish the session and load profile, schedule and catalog
    ///
    /// # Errors
    ///
    /// Returns an error if the profile or catalog cannot be loaded
    pub async fn sign_in(&mut self, user: AuthUser) -> AppResult<Route> {
        self.session.establish(user);
        self.bootstrap().await?;
        Ok(self.route())
    }

    /// Load everything the home screen needs for the signed-in user
    ///
    /// The schedule fails soft; its error stays in its operation state.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the profile/catalog error
    pub async fn bootstrap(&mut self) -> AppResult<()> {
        self.profile.fetch_profile().await?;
        self.schedule.load().await;
        self.catalog.load().await?;
        debug!(
            schedule_days = self.schedule.schedule().day_count(),
            catalog_entries = self.catalog.exercises().len(),
            "Bootstrap complete"
        );
        Ok(())
    }

    /// Sign out and clear every store
    pub fn sign_out(&mut self) -> Option<AuthUser> {
        let previous = self.session.sign_out();
        self.profile.clear();
        self.schedule.clear();
        self.catalog.clear();
        self.workouts.clear();
        self.tracking.clear();
        previous
    }

    /// Muscle tags scheduled for the current cursor day
    #[must_use]
    pub fn today_tags(&self) -> &[String] {
        self.schedule.today_tags(self.profile.workout_day())
    }

    /// Day count of the stored schedule, reloading it once if the last load failed
    ///
    /// # Errors
    ///
    /// Returns `RemoteReadFailed` when the schedule still cannot be read
    async fn scheduled_days(&mut self) -> AppResult<u32> {
        if !self.schedule.is_loaded() {
            self.schedule.load().await;
        }
        if self.schedule.is_loaded() {
            return Ok(u32::from(self.schedule.schedule().day_count()));
        }
        let reason = self.schedule.state().error.clone().unwrap_or_default();
        Err(AppError::remote_read(format!(
            "Schedule could not be read, workout day left unchanged: {reason}"
        )))
    }

    /// Finish the record for `date`, storing the rating and advancing the cursor
    ///
    /// Returns `false` without writing when the record is already finished.
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for a rating outside 1-5, `AuthRequired`
    /// without a session, `RemoteReadFailed` when the schedule cannot be
    /// read, or the batch commit error
    pub async fn finish_workout(
        &mut self,
        date: NaiveDate,
        rating: u8,
        notes: String,
    ) -> AppResult<bool> {
        validate_rating(rating)?;
        let user = self.session.require_user()?;
        let total = self.scheduled_days().await?;
        let record = self.workouts.load_by_date(date).await?;
        if record.is_finished {
            debug!(workout.date = %record.date, "Workout already finished");
            return Ok(false);
        }

        let from = self.profile.workout_day();
        let to = next_workout_day(from, total);
        self.workouts
            .commit_completion(date, CompletionPatch::finish(rating, notes), to)
            .await?;
        self.profile.set_local_workout_day(to);
        AppLogger::log_cursor_move(&user.uid, from, to, total);
        Ok(true)
    }

    /// Reverse a finish, clearing the flags and rewinding the cursor
    ///
    /// Returns `false` without writing when the record is not finished.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, `RemoteReadFailed` when the
    /// schedule cannot be read, or the batch commit error
    pub async fn undo_finish(&mut self, date: NaiveDate) -> AppResult<bool> {
        let user = self.session.require_user()?;
        let total = self.scheduled_days().await?;
        let record = self.workouts.load_by_date(date).await?;
        if !record.is_finished {
            debug!(workout.date = %record.date, "Workout not finished, nothing to undo");
            return Ok(false);
        }

        let from = self.profile.workout_day();
        let to = previous_workout_day(from, total);
        self.workouts
            .commit_completion(date, CompletionPatch::undo(), to)
            .await?;
        self.profile.set_local_workout_day(to);
        AppLogger::log_cursor_move(&user.uid, from, to, total);
        Ok(true)
    }

    /// Persist the held schedule with the profile's day count and a clamped cursor
    ///
    /// # Errors
    ///
    /// Returns `RemoteReadFailed` when the schedule was never read (saving
    /// would delete the stored days), `AuthRequired` without a session, or
    /// the batch commit error
    pub async fn save_schedule(&mut self) -> AppResult<()> {
        if !self.schedule.is_loaded() {
            return Err(AppError::remote_read(
                "Schedule was not loaded; refusing to overwrite the stored days",
            ));
        }
        let total = u32::from(self.schedule.schedule().day_count());
        let mut cursor = self.profile.profile().cloned().unwrap_or_default();
        cursor.clamp_workout_day(total);
        self.schedule.save_with_cursor(cursor.workout_day).await?;
        self.profile.set_local_schedule_size(total, cursor.workout_day);
        Ok(())
    }

    /// [`AppState::save_schedule`] only when the held schedule changed since
    /// the last load or save; returns whether a save ran
    ///
    /// # Errors
    ///
    /// Returns the [`AppState::save_schedule`] error
    pub async fn save_schedule_if_changed(&mut self) -> AppResult<bool> {
        if !self.schedule.is_dirty() {
            return Ok(false);
        }
        self.save_schedule().await?;
        Ok(true)
    }

    /// Persist a tracking entry's draft sets and copy the last set to the catalog
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown entry, `AuthRequired`
    /// without a session, or the write error
    pub async fn commit_sets(
        &mut self,
        date: NaiveDate,
        entry_id: &str,
    ) -> AppResult<Option<SetEntry>> {
        let last = self.tracking.commit_sets(date, entry_id).await?;
        if let (Some(set), Some(entry)) = (last, self.tracking.entry(entry_id)) {
            let exercise_id = entry.exercise_id.clone();
            self.catalog.apply_last_used(&exercise_id, set.weight, set.reps);
        }
        Ok(last)
    }

    /// Send feedback to the relay under the signed-in email
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` without a relay, `MissingRequiredField` for a
    /// blank message, or the relay error
    pub async fn submit_feedback(&self, message: &str) -> AppResult<()> {
        let client = self
            .feedback
            .as_ref()
            .ok_or_else(|| AppError::config("Feedback relay is not configured"))?;
        let email = self.session.current_user().and_then(|user| user.email);
        client.submit(email.as_deref(), message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_operation_state_records_failures() {
        let mut state = OperationState::default();
        state.begin();
        assert_eq!(state.status, RequestStatus::Loading);

        let result: AppResult<()> = state.settle(Err(AppError::remote_read("offline")));
        assert_eq!(result.unwrap_err().code, ErrorCode::RemoteReadFailed);
        assert_eq!(state.status, RequestStatus::Failed);
        assert_eq!(state.error.as_deref(), Some("offline"));

        state.begin();
        assert!(state.error.is_none());
        state.settle(Ok(())).unwrap();
        assert_eq!(state.status, RequestStatus::Succeeded);
    }

    #[tokio::test]
    async fn test_route_gate() {
        let mut state = AppState::new(Store::memory());
        assert_eq!(state.route(), Route::SignIn);

        let route = state
            .sign_in(AuthUser::new("u1", Some("u1@example.com".to_owned())))
            .await
            .unwrap();
        assert_eq!(route, Route::Onboarding);

        state.sign_out();
        assert_eq!(state.route(), Route::SignIn);
        assert!(state.profile.profile().is_none());
    }

    #[tokio::test]
    async fn test_feedback_requires_relay() {
        let state = AppState::new(Store::memory());
        let err = state.submit_feedback("hello").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
    }
}
