// ABOUTME: Profile store holding the signed-in user's profile and workout-day cursor
// ABOUTME: Fetch-or-create, partial updates over the held profile, onboarding and manual day selection
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::OperationState;
use crate::auth::{AuthSession, SessionHandle};
use crate::constants::schedule::FIRST_WORKOUT_DAY;
use crate::errors::{AppError, AppResult};
use crate::models::{MuscleTagSchedule, Profile, ProfileUpdate};
use crate::repositories::{ProfileRepository, ProfileRepositoryImpl};
use crate::validation::{validate_onboarding, OnboardingInput};
use tracing::{debug, info};

/// Client-side view of `users/{uid}`
pub struct ProfileStore {
    session: SessionHandle,
    repository: ProfileRepositoryImpl,
    profile: Option<Profile>,
    state: OperationState,
}

impl ProfileStore {
    /// Empty store over the given repository
    #[must_use]
    pub const fn new(session: SessionHandle, repository: ProfileRepositoryImpl) -> Self {
        Self {
            session,
            repository,
            profile: None,
            state: OperationState::new(),
        }
    }

    /// Held profile, if fetched
    #[must_use]
    pub const fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    /// Current cursor, day 1 before the profile is fetched
    #[must_use]
    pub fn workout_day(&self) -> u32 {
        self.profile
            .as_ref()
            .map_or(FIRST_WORKOUT_DAY, |profile| profile.workout_day)
    }

    /// Outcome of the last operation
    #[must_use]
    pub const fn state(&self) -> &OperationState {
        &self.state
    }

    /// Read the profile, writing the default one on first sign-in
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the store error
    pub async fn fetch_profile(&mut self) -> AppResult<Profile> {
        self.state.begin();
        let result = self.read_or_create().await;
        let profile = self.state.settle(result)?;
        self.profile = Some(profile.clone());
        Ok(profile)
    }

    async fn read_or_create(&self) -> AppResult<Profile> {
        let user = self.session.require_user()?;
        let mut profile = if let Some(profile) = self.repository.get(&user.uid).await? {
            profile
        } else {
            let profile = Profile::new_for(user.email.clone());
            self.repository.create(&user.uid, &profile).await?;
            info!(user.id = %user.uid, "Default profile created");
            profile
        };
        profile.email.clone_from(&user.email);
        Ok(profile)
    }

    /// Overlay `update` on the held profile and merge it into the stored document
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the store error
    pub async fn update_profile(&mut self, update: &ProfileUpdate) -> AppResult<Profile> {
        self.state.begin();
        let result = self.write_update(update).await;
        let profile = self.state.settle(result)?;
        self.profile = Some(profile.clone());
        Ok(profile)
    }

    async fn write_update(&self, update: &ProfileUpdate) -> AppResult<Profile> {
        let user = self.session.require_user()?;
        let base = self.profile.clone().unwrap_or_default();
        let mut merged = update.apply(&base);
        merged.email.clone_from(&user.email);
        self.repository.merge(&user.uid, &merged).await?;
        debug!(user.id = %user.uid, "Profile updated");
        Ok(merged)
    }

    /// Delete the stored profile and reset the held one to the defaults
    ///
    /// The reset profile keeps the account email and is not written back.
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the store error
    pub async fn delete_profile(&mut self) -> AppResult<()> {
        self.state.begin();
        let result = match self.session.require_user() {
            Ok(user) => self
                .repository
                .delete(&user.uid)
                .await
                .map(|()| user.email.clone()),
            Err(e) => Err(e),
        };
        let email = self.state.settle(result)?;
        self.profile = Some(Profile::new_for(email));
        Ok(())
    }

    /// Validate onboarding answers, then persist them and reset the cursor
    ///
    /// # Errors
    ///
    /// Returns a validation error without touching the store, or the
    /// [`ProfileStore::update_profile`] error
    pub async fn complete_onboarding(&mut self, input: &OnboardingInput) -> AppResult<Profile> {
        let update = match validate_onboarding(input) {
            Ok(update) => update,
            Err(e) => return self.state.settle(Err(e)),
        };
        self.update_profile(&update).await
    }

    /// Move the cursor to a day that exists and carries tags
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` for a day without tags, or the store error
    pub async fn select_workout_day(
        &mut self,
        day: u32,
        schedule: &MuscleTagSchedule,
    ) -> AppResult<Profile> {
        let selectable = u8::try_from(day)
            .is_ok_and(|day| schedule.days_with_tags().contains(&day));
        if !selectable {
            return self.state.settle(Err(AppError::out_of_range(format!(
                "Day {day} has no muscle groups scheduled."
            ))));
        }
        self.update_profile(&ProfileUpdate::workout_day(day)).await
    }

    /// Record a cursor already written by a batch elsewhere
    pub fn set_local_workout_day(&mut self, day: u32) {
        if let Some(profile) = self.profile.as_mut() {
            profile.workout_day = day;
        }
    }

    /// Record a schedule size and cursor already written by a batch elsewhere
    pub fn set_local_schedule_size(&mut self, workout_days: u32, workout_day: u32) {
        if let Some(profile) = self.profile.as_mut() {
            profile.workout_days = Some(workout_days);
            profile.workout_day = workout_day;
        }
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.profile = None;
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthUser;
    use crate::errors::ErrorCode;
    use crate::state::RequestStatus;
    use crate::store::Store;

    fn signed_in_store() -> (ProfileStore, Store) {
        let store = Store::memory();
        let session =
            SessionHandle::signed_in(AuthUser::new("u1", Some("u1@example.com".to_owned())));
        (
            ProfileStore::new(session, ProfileRepositoryImpl::new(store.clone())),
            store,
        )
    }

    #[tokio::test]
    async fn test_fetch_without_session_fails() {
        let mut profiles =
            ProfileStore::new(SessionHandle::new(), ProfileRepositoryImpl::new(Store::memory()));
        let err = profiles.fetch_profile().await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthRequired);
        assert_eq!(profiles.state().status, RequestStatus::Failed);
    }

    #[tokio::test]
    async fn test_fetch_creates_default_with_email() {
        let (mut profiles, store) = signed_in_store();
        let profile = profiles.fetch_profile().await.unwrap();
        assert_eq!(profile.workout_day, 1);
        assert!(!profile.intro_complete);
        assert_eq!(profile.email.as_deref(), Some("u1@example.com"));

        let stored = ProfileRepositoryImpl::new(store).get("u1").await.unwrap();
        assert!(stored.is_some());
    }

    #[tokio::test]
    async fn test_update_merges_over_held_profile() {
        let (mut profiles, _store) = signed_in_store();
        profiles.fetch_profile().await.unwrap();
        profiles
            .update_profile(&ProfileUpdate {
                weight: Some(180),
                ..ProfileUpdate::default()
            })
            .await
            .unwrap();
        let profile = profiles
            .update_profile(&ProfileUpdate {
                first_name: Some("Sam".to_owned()),
                ..ProfileUpdate::default()
            })
            .await
            .unwrap();
        assert_eq!(profile.weight, Some(180));
        assert_eq!(profile.first_name.as_deref(), Some("Sam"));
    }

    #[tokio::test]
    async fn test_invalid_onboarding_never_writes() {
        let (mut profiles, store) = signed_in_store();
        let err = profiles
            .complete_onboarding(&OnboardingInput::default())
            .await
            .unwrap_err();
        assert!(err.code.is_validation());
        assert_eq!(profiles.state().error.as_deref(), Some("First name is required."));
        assert!(ProfileRepositoryImpl::new(store).get("u1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_select_day_requires_tags() {
        let (mut profiles, _store) = signed_in_store();
        profiles.fetch_profile().await.unwrap();
        let mut schedule = MuscleTagSchedule::with_days(3);
        schedule.assign(2, &["Chest".to_owned()]);

        assert!(profiles.select_workout_day(3, &schedule).await.is_err());
        let profile = profiles.select_workout_day(2, &schedule).await.unwrap();
        assert_eq!(profile.workout_day, 2);
    }

    #[tokio::test]
    async fn test_delete_resets_held_profile_to_defaults() {
        let (mut profiles, store) = signed_in_store();
        profiles.fetch_profile().await.unwrap();
        profiles
            .update_profile(&ProfileUpdate {
                first_name: Some("Sam".to_owned()),
                workout_day: Some(3),
                intro_complete: Some(true),
                ..ProfileUpdate::default()
            })
            .await
            .unwrap();

        profiles.delete_profile().await.unwrap();

        let held = profiles.profile().unwrap();
        assert_eq!(held.workout_day, 1);
        assert!(!held.intro_complete);
        assert!(held.first_name.is_none());
        assert_eq!(held.email.as_deref(), Some("u1@example.com"));
        assert_eq!(profiles.workout_day(), 1);
        assert!(ProfileRepositoryImpl::new(store).get("u1").await.unwrap().is_none());
    }
}
