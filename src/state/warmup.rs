// ABOUTME: Warm-up panel for one workout date: stretch and cardio toggles plus cardio settings
// ABOUTME: Every change saves the full record; the last completed toggle can be undone once
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::WorkoutStore;
use crate::errors::AppResult;
use crate::models::{CardioType, WorkoutRecord};
use crate::validation::validate_cardio_minutes;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Warm-up step that can be completed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarmupStep {
    /// Stretching
    Stretch,
    /// Cardio session
    Cardio,
}

/// Warm-up controls bound to one date's record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WarmupPanel {
    date: NaiveDate,
    last_completed: Option<WarmupStep>,
}

impl WarmupPanel {
    /// Panel for `date` with nothing to undo
    #[must_use]
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            date,
            last_completed: None,
        }
    }

    /// Step the next [`WarmupPanel::undo_last`] would revert
    #[must_use]
    pub const fn last_completed(&self) -> Option<WarmupStep> {
        self.last_completed
    }

    /// Both stretch and cardio are done
    #[must_use]
    pub fn is_complete(&self, workouts: &WorkoutStore) -> bool {
        workouts
            .record(self.date)
            .is_some_and(WorkoutRecord::warmup_complete)
    }

    async fn current(&self, workouts: &mut WorkoutStore) -> AppResult<WorkoutRecord> {
        match workouts.record(self.date) {
            Some(record) => Ok(record.clone()),
            None => workouts.load_by_date(self.date).await,
        }
    }

    fn flag(record: &mut WorkoutRecord, step: WarmupStep) -> &mut bool {
        match step {
            WarmupStep::Stretch => &mut record.stretch,
            WarmupStep::Cardio => &mut record.cardio_completed,
        }
    }

    async fn toggle(&mut self, workouts: &mut WorkoutStore, step: WarmupStep) -> AppResult<bool> {
        let mut record = self.current(workouts).await?;
        let flag = Self::flag(&mut record, step);
        *flag = !*flag;
        let done = *flag;
        workouts.save(&record).await?;

        if done {
            self.last_completed = Some(step);
        } else if self.last_completed == Some(step) {
            self.last_completed = None;
        }
        debug!(workout.date = %record.date, step = ?step, done, "Warm-up toggled");
        Ok(done)
    }

    /// Flip the stretch toggle; returns the new value
    ///
    /// # Errors
    ///
    /// Returns the load or save error
    pub async fn toggle_stretch(&mut self, workouts: &mut WorkoutStore) -> AppResult<bool> {
        self.toggle(workouts, WarmupStep::Stretch).await
    }

    /// Flip the cardio toggle; returns the new value
    ///
    /// # Errors
    ///
    /// Returns the load or save error
    pub async fn toggle_cardio(&mut self, workouts: &mut WorkoutStore) -> AppResult<bool> {
        self.toggle(workouts, WarmupStep::Cardio).await
    }

    /// Choose the cardio machine
    ///
    /// # Errors
    ///
    /// Returns the load or save error
    pub async fn set_cardio_type(
        &self,
        workouts: &mut WorkoutStore,
        kind: CardioType,
    ) -> AppResult<()> {
        let mut record = self.current(workouts).await?;
        record.cardio.kind = kind;
        workouts.save(&record).await
    }

    /// Set planned cardio minutes, 1-60
    ///
    /// # Errors
    ///
    /// Returns `ValueOutOfRange` without touching the store, or the load or
    /// save error
    pub async fn set_cardio_minutes(
        &self,
        workouts: &mut WorkoutStore,
        minutes: u32,
    ) -> AppResult<()> {
        validate_cardio_minutes(minutes)?;
        let mut record = self.current(workouts).await?;
        record.cardio.time = minutes;
        workouts.save(&record).await
    }

    /// Revert the most recently completed toggle; returns whether anything changed
    ///
    /// # Errors
    ///
    /// Returns the load or save error
    pub async fn undo_last(&mut self, workouts: &mut WorkoutStore) -> AppResult<bool> {
        let Some(step) = self.last_completed else {
            return Ok(false);
        };
        let mut record = self.current(workouts).await?;
        *Self::flag(&mut record, step) = false;
        workouts.save(&record).await?;
        self.last_completed = None;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AuthUser, SessionHandle};
    use crate::errors::ErrorCode;
    use crate::repositories::WorkoutRepositoryImpl;
    use crate::store::Store;

    fn setup() -> (WarmupPanel, WorkoutStore) {
        let workouts = WorkoutStore::new(
            SessionHandle::signed_in(AuthUser::new("u1", None)),
            WorkoutRepositoryImpl::new(Store::memory()),
        );
        (
            WarmupPanel::new(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
            workouts,
        )
    }

    #[tokio::test]
    async fn test_complete_needs_both_toggles() {
        let (mut panel, mut workouts) = setup();
        assert!(panel.toggle_stretch(&mut workouts).await.unwrap());
        assert!(!panel.is_complete(&workouts));
        assert!(panel.toggle_cardio(&mut workouts).await.unwrap());
        assert!(panel.is_complete(&workouts));
        assert_eq!(panel.last_completed(), Some(WarmupStep::Cardio));
    }

    #[tokio::test]
    async fn test_undo_reverts_last_toggle_once() {
        let (mut panel, mut workouts) = setup();
        panel.toggle_stretch(&mut workouts).await.unwrap();
        panel.toggle_cardio(&mut workouts).await.unwrap();

        assert!(panel.undo_last(&mut workouts).await.unwrap());
        assert!(!panel.undo_last(&mut workouts).await.unwrap());

        workouts.clear();
        let record = workouts
            .load_by_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .await
            .unwrap();
        assert!(record.stretch);
        assert!(!record.cardio_completed);
    }

    #[tokio::test]
    async fn test_cardio_settings() {
        let (panel, mut workouts) = setup();
        let err = panel
            .set_cardio_minutes(&mut workouts, 61)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);

        panel.set_cardio_minutes(&mut workouts, 25).await.unwrap();
        panel
            .set_cardio_type(&mut workouts, CardioType::Bike)
            .await
            .unwrap();
        let record = workouts.record(panel.date).unwrap();
        assert_eq!(record.cardio.time, 25);
        assert_eq!(record.cardio.kind, CardioType::Bike);
    }
}
