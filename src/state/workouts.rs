// ABOUTME: Workout store holding date-keyed workout records
// ABOUTME: Fetch-or-create-blank loads, flag updates, history and atomic completion commits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::OperationState;
use crate::auth::{AuthSession, SessionHandle};
use crate::errors::AppResult;
use crate::models::{CompletionPatch, WorkoutRecord};
use crate::repositories::{WorkoutRepository, WorkoutRepositoryImpl};
use crate::validation::validate_rating;
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// Client-side view of `users/{uid}/workouts`
pub struct WorkoutStore {
    session: SessionHandle,
    repository: WorkoutRepositoryImpl,
    records: BTreeMap<String, WorkoutRecord>,
    state: OperationState,
}

impl WorkoutStore {
    /// Empty store over the given repository
    #[must_use]
    pub const fn new(session: SessionHandle, repository: WorkoutRepositoryImpl) -> Self {
        Self {
            session,
            repository,
            records: BTreeMap::new(),
            state: OperationState::new(),
        }
    }

    /// Held record for `date`
    #[must_use]
    pub fn record(&self, date: NaiveDate) -> Option<&WorkoutRecord> {
        self.records.get(&WorkoutRecord::key_for(date))
    }

    /// Held records, newest first
    #[must_use]
    pub fn history(&self) -> Vec<&WorkoutRecord> {
        let mut records: Vec<&WorkoutRecord> = self.records.values().collect();
        records.sort_by(|a, b| b.date.cmp(&a.date));
        records
    }

    /// Outcome of the last operation
    #[must_use]
    pub const fn state(&self) -> &OperationState {
        &self.state
    }

    /// Read the record for `date`, creating and persisting a blank one if absent
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the store error
    pub async fn load_by_date(&mut self, date: NaiveDate) -> AppResult<WorkoutRecord> {
        self.state.begin();
        let result = self.fetch_or_create(date).await;
        let record = self.state.settle(result)?;
        self.records.insert(record.date.clone(), record.clone());
        Ok(record)
    }

    async fn fetch_or_create(&self, date: NaiveDate) -> AppResult<WorkoutRecord> {
        let user = self.session.require_user()?;
        let key = WorkoutRecord::key_for(date);
        if let Some(record) = self.repository.get(&user.uid, &key).await? {
            return Ok(record);
        }
        let blank = WorkoutRecord::blank(date);
        self.repository.save(&user.uid, &blank).await?;
        debug!(user.id = %user.uid, workout.date = %key, "Blank workout record created");
        Ok(blank)
    }

    /// [`WorkoutStore::load_by_date`] for the local calendar date
    ///
    /// # Errors
    ///
    /// Returns the [`WorkoutStore::load_by_date`] error
    pub async fn load_today(&mut self) -> AppResult<WorkoutRecord> {
        self.load_by_date(Local::now().date_naive()).await
    }

    /// Merge the whole record into its date document
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the store error
    pub async fn save(&mut self, record: &WorkoutRecord) -> AppResult<()> {
        self.state.begin();
        let result = match self.session.require_user() {
            Ok(user) => self.repository.save(&user.uid, record).await,
            Err(e) => Err(e),
        };
        self.state.settle(result)?;
        self.records.insert(record.date.clone(), record.clone());
        Ok(())
    }

    /// Mark the record started
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the store error
    pub async fn start(&mut self, date: NaiveDate) -> AppResult<()> {
        let key = WorkoutRecord::key_for(date);
        self.state.begin();
        let result = match self.session.require_user() {
            Ok(user) => self.repository.set_started(&user.uid, &key).await,
            Err(e) => Err(e),
        };
        self.state.settle(result)?;
        if let Some(record) = self.records.get_mut(&key) {
            record.is_started = true;
        }
        info!(workout.date = %key, "Workout started");
        Ok(())
    }

    /// Store a 1-5 rating
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` without touching the store, `AuthRequired`
    /// without a session, or the store error
    pub async fn set_rating(&mut self, date: NaiveDate, rating: u8) -> AppResult<()> {
        if let Err(e) = validate_rating(rating) {
            return self.state.settle(Err(e));
        }
        let key = WorkoutRecord::key_for(date);
        self.state.begin();
        let result = match self.session.require_user() {
            Ok(user) => self.repository.set_rating(&user.uid, &key, rating).await,
            Err(e) => Err(e),
        };
        self.state.settle(result)?;
        if let Some(record) = self.records.get_mut(&key) {
            record.rating = rating;
        }
        Ok(())
    }

    /// Read every record, newest first
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the store error
    pub async fn load_all(&mut self) -> AppResult<Vec<WorkoutRecord>> {
        self.state.begin();
        let result = match self.session.require_user() {
            Ok(user) => self.repository.list(&user.uid).await,
            Err(e) => Err(e),
        };
        let records = self.state.settle(result)?;
        self.records = records
            .iter()
            .map(|record| (record.date.clone(), record.clone()))
            .collect();
        Ok(records)
    }

    /// Remove a record and its tracking entries
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the batch commit error
    pub async fn delete(&mut self, date: NaiveDate) -> AppResult<()> {
        let key = WorkoutRecord::key_for(date);
        self.state.begin();
        let result = match self.session.require_user() {
            Ok(user) => self.repository.delete(&user.uid, &key).await,
            Err(e) => Err(e),
        };
        self.state.settle(result)?;
        self.records.remove(&key);
        Ok(())
    }

    /// Write completion flags and the profile cursor in one batch
    ///
    /// # Errors
    ///
    /// Returns `AuthRequired` without a session, or the batch commit error
    pub async fn commit_completion(
        &mut self,
        date: NaiveDate,
        patch: CompletionPatch,
        workout_day: u32,
    ) -> AppResult<()> {
        let key = WorkoutRecord::key_for(date);
        self.state.begin();
        let result = match self.session.require_user() {
            Ok(user) => {
                self.repository
                    .commit_completion(&user.uid, &key, &patch, workout_day)
                    .await
            }
            Err(e) => Err(e),
        };
        self.state.settle(result)?;
        if let Some(record) = self.records.get_mut(&key) {
            patch.apply(record);
        }
        Ok(())
    }

    /// Forget everything
    pub fn clear(&mut self) {
        self.records.clear();
        self.state.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthUser;
    use crate::errors::ErrorCode;
    use crate::models::CardioType;
    use crate::store::Store;

    fn workouts(store: &Store) -> WorkoutStore {
        WorkoutStore::new(
            SessionHandle::signed_in(AuthUser::new("u1", None)),
            WorkoutRepositoryImpl::new(store.clone()),
        )
    }

    fn new_year() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[tokio::test]
    async fn test_missing_date_yields_persisted_blank() {
        let backend = Store::memory();
        let mut store = workouts(&backend);
        let record = store.load_by_date(new_year()).await.unwrap();
        assert_eq!(record.id, "2024-01-01");
        assert!(!record.is_started && !record.stretch);
        assert_eq!(record.cardio.kind, CardioType::Treadmill);
        assert_eq!(record.cardio.time, 10);

        let stored = WorkoutRepositoryImpl::new(backend)
            .get("u1", "2024-01-01")
            .await
            .unwrap();
        assert_eq!(stored, Some(record));
    }

    #[tokio::test]
    async fn test_start_and_rate() {
        let backend = Store::memory();
        let mut store = workouts(&backend);
        store.load_by_date(new_year()).await.unwrap();
        store.start(new_year()).await.unwrap();
        assert_eq!(
            store.set_rating(new_year(), 9).await.unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
        store.set_rating(new_year(), 4).await.unwrap();

        let record = store.load_by_date(new_year()).await.unwrap();
        assert!(record.is_started);
        assert_eq!(record.rating, 4);
    }

    #[tokio::test]
    async fn test_history_newest_first() {
        let backend = Store::memory();
        let mut store = workouts(&backend);
        for day in [3, 1, 2] {
            store
                .load_by_date(NaiveDate::from_ymd_opt(2024, 2, day).unwrap())
                .await
                .unwrap();
        }
        store.clear();
        let all = store.load_all().await.unwrap();
        assert_eq!(all.len(), 3);
        let dates: Vec<&str> = store.history().iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-02-03", "2024-02-02", "2024-02-01"]);

        store
            .delete(NaiveDate::from_ymd_opt(2024, 2, 2).unwrap())
            .await
            .unwrap();
        assert_eq!(store.history().len(), 2);
    }
}
