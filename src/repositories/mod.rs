// ABOUTME: Repository traits, one per entity, over the document store
// ABOUTME: Own the path layout and the mapping between documents and models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Repositories
//!
//! Each trait covers one entity and is scoped by uid on every call. The `*Impl`
//! types work against any [`Store`] backend, so tests use the in-memory store
//! in place of a fake.

/// Exercise catalog persistence
pub mod exercise_repository;
/// Profile persistence
pub mod profile_repository;
/// Muscle-tag schedule persistence
pub mod schedule_repository;
/// Tracking entry persistence
pub mod tracking_repository;
/// Workout record persistence
pub mod workout_repository;

pub use exercise_repository::ExerciseRepositoryImpl;
pub use profile_repository::ProfileRepositoryImpl;
pub use schedule_repository::ScheduleRepositoryImpl;
pub use tracking_repository::TrackingRepositoryImpl;
pub use workout_repository::WorkoutRepositoryImpl;

use crate::errors::AppResult;
use crate::models::{
    CompletionPatch, Exercise, MuscleTagSchedule, NormalizedExercise, Profile, TrackingEntry,
    WorkoutRecord,
};
use crate::store::Store;
use async_trait::async_trait;

/// Profile document at `users/{uid}`
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Read the profile
    async fn get(&self, uid: &str) -> AppResult<Option<Profile>>;

    /// Write the whole profile
    async fn create(&self, uid: &str, profile: &Profile) -> AppResult<()>;

    /// Merge the profile into the stored document
    async fn merge(&self, uid: &str, profile: &Profile) -> AppResult<()>;

    /// Remove the profile document
    async fn delete(&self, uid: &str) -> AppResult<()>;
}

/// Catalog documents at `users/{uid}/exercises/{id}`
#[async_trait]
pub trait ExerciseRepository: Send + Sync {
    /// Read and normalize every catalog entry
    async fn list(&self, uid: &str) -> AppResult<Vec<NormalizedExercise>>;

    /// Read and normalize one entry
    async fn get(&self, uid: &str, id: &str) -> AppResult<Option<Exercise>>;

    /// Merge-upsert one entry
    async fn upsert(&self, uid: &str, exercise: &Exercise) -> AppResult<()>;

    /// Overwrite many entries in one atomic batch
    async fn replace_many(&self, uid: &str, exercises: &[Exercise]) -> AppResult<()>;

    /// Record the last logged weight and reps; the entry must exist
    async fn update_last_used(&self, uid: &str, id: &str, weight: u32, reps: u32)
        -> AppResult<()>;

    /// Remove one entry
    async fn delete(&self, uid: &str, id: &str) -> AppResult<()>;

    /// Remove every entry; returns how many were removed
    async fn delete_all(&self, uid: &str) -> AppResult<usize>;
}

/// Workout records at `users/{uid}/workouts/{date}`
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Read and normalize one record
    async fn get(&self, uid: &str, date: &str) -> AppResult<Option<WorkoutRecord>>;

    /// Merge-upsert a record under its date
    async fn save(&self, uid: &str, record: &WorkoutRecord) -> AppResult<()>;

    /// Mark a record started
    async fn set_started(&self, uid: &str, date: &str) -> AppResult<()>;

    /// Store a rating
    async fn set_rating(&self, uid: &str, date: &str, rating: u8) -> AppResult<()>;

    /// Every record, newest first
    async fn list(&self, uid: &str) -> AppResult<Vec<WorkoutRecord>>;

    /// Remove a record and its tracking entries
    async fn delete(&self, uid: &str, date: &str) -> AppResult<()>;

    /// Write the completion flags and the profile cursor in one atomic batch
    async fn commit_completion(
        &self,
        uid: &str,
        date: &str,
        patch: &CompletionPatch,
        workout_day: u32,
    ) -> AppResult<()>;
}

/// Schedule days at `users/{uid}/muscleTags/{day}`
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Read every day; an empty collection yields the single empty day 1
    async fn load(&self, uid: &str) -> AppResult<MuscleTagSchedule>;

    /// Replace the stored schedule, deleting days that no longer exist, and
    /// write `workoutDays` and the cursor to the profile in the same batch
    async fn save_with_profile(
        &self,
        uid: &str,
        schedule: &MuscleTagSchedule,
        workout_day: u32,
    ) -> AppResult<()>;
}

/// Tracking entries at `users/{uid}/workouts/{date}/exerciseTracking/{id}`
#[async_trait]
pub trait TrackingRepository: Send + Sync {
    /// Every entry under a workout, by `order` then id
    async fn list(&self, uid: &str, date: &str) -> AppResult<Vec<TrackingEntry>>;

    /// Merge-upsert one entry
    async fn save(&self, uid: &str, date: &str, entry: &TrackingEntry) -> AppResult<()>;

    /// Remove one entry
    async fn delete(&self, uid: &str, date: &str, entry_id: &str) -> AppResult<()>;

    /// Write `order` = position for each id in one batch
    async fn reorder(&self, uid: &str, date: &str, entry_ids: &[String]) -> AppResult<()>;
}

/// Every repository over one store
#[derive(Clone)]
pub struct Repositories {
    store: Store,
}

impl Repositories {
    /// Bundle repositories over `store`
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    /// Underlying store
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Profile repository
    #[must_use]
    pub fn profiles(&self) -> ProfileRepositoryImpl {
        ProfileRepositoryImpl::new(self.store.clone())
    }

    /// Catalog repository
    #[must_use]
    pub fn exercises(&self) -> ExerciseRepositoryImpl {
        ExerciseRepositoryImpl::new(self.store.clone())
    }

    /// Workout repository
    #[must_use]
    pub fn workouts(&self) -> WorkoutRepositoryImpl {
        WorkoutRepositoryImpl::new(self.store.clone())
    }

    /// Schedule repository
    #[must_use]
    pub fn schedules(&self) -> ScheduleRepositoryImpl {
        ScheduleRepositoryImpl::new(self.store.clone())
    }

    /// Tracking repository
    #[must_use]
    pub fn tracking(&self) -> TrackingRepositoryImpl {
        TrackingRepositoryImpl::new(self.store.clone())
    }
}
