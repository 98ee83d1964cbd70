// ABOUTME: Per-date workout record model with warm-up, completion and rating state
// ABOUTME: Normalizes legacy cardio/isCompleted shapes when reading stored documents
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::lenient_u32;
use crate::constants::{cardio, workout::DATE_FORMAT, workout::MAX_RATING};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Cardio machine or activity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardioType {
    /// Treadmill walk or run
    #[default]
    Treadmill,
    /// Stationary bike
    Bike,
    /// Outdoor running
    Running,
}

impl CardioType {
    /// All selectable types in display order
    pub const ALL: [Self; 3] = [Self::Treadmill, Self::Bike, Self::Running];

    /// Parse a stored label, case-insensitive
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "treadmill" => Some(Self::Treadmill),
            "bike" => Some(Self::Bike),
            "running" => Some(Self::Running),
            _ => None,
        }
    }

    /// Stored label
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Treadmill => "treadmill",
            Self::Bike => "bike",
            Self::Running => "running",
        }
    }
}

impl fmt::Display for CardioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cardio portion of the warm-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardioSession {
    /// Activity
    #[serde(rename = "type", default)]
    pub kind: CardioType,
    /// Minutes
    #[serde(default = "default_minutes", deserialize_with = "lenient_u32")]
    pub time: u32,
}

const fn default_minutes() -> u32 {
    cardio::DEFAULT_MINUTES
}

impl Default for CardioSession {
    fn default() -> Self {
        Self {
            kind: CardioType::Treadmill,
            time: cardio::DEFAULT_MINUTES,
        }
    }
}

/// Catalog snapshot referenced from a workout record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseRef {
    /// Exercise title at the time it was added
    #[serde(default)]
    pub title: String,
    /// Personal best at the time it was added
    #[serde(default, deserialize_with = "lenient_u32")]
    pub max: u32,
    /// Notes
    #[serde(default)]
    pub notes: String,
}

/// Workout record stored at `users/{uid}/workouts/{date}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    /// Document id, always equal to `date`
    #[serde(default)]
    pub id: String,
    /// Calendar date, `YYYY-MM-DD`
    #[serde(default)]
    pub date: String,
    /// Stretching done
    #[serde(default)]
    pub stretch: bool,
    /// Planned or completed cardio
    #[serde(default)]
    pub cardio: CardioSession,
    /// Cardio done
    #[serde(default)]
    pub cardio_completed: bool,
    /// Workout has been started
    #[serde(default)]
    pub is_started: bool,
    /// Workout has been finished
    #[serde(default)]
    pub is_finished: bool,
    /// Finish dialog has been submitted
    #[serde(default)]
    pub is_rated: bool,
    /// 0 means unrated, otherwise 1-5
    #[serde(default, deserialize_with = "rating")]
    pub rating: u8,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
    /// Exercises added to this workout keyed by catalog id
    #[serde(default)]
    pub exercises: BTreeMap<String, ExerciseRef>,
}

fn rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = lenient_u32(deserializer)?;
    Ok(u8::try_from(value.min(u32::from(MAX_RATING))).unwrap_or(MAX_RATING))
}

impl WorkoutRecord {
    /// Document id for a calendar date
    #[must_use]
    pub fn key_for(date: NaiveDate) -> String {
        date.format(DATE_FORMAT).to_string()
    }

    /// Record created the first time a date is opened
    #[must_use]
    pub fn blank(date: NaiveDate) -> Self {
        let key = Self::key_for(date);
        Self {
            id: key.clone(),
            date: key,
            stretch: false,
            cardio: CardioSession::default(),
            cardio_completed: false,
            is_started: false,
            is_finished: false,
            is_rated: false,
            rating: 0,
            notes: String::new(),
            exercises: BTreeMap::new(),
        }
    }

    /// Normalize a raw stored document into the current shape
    ///
    /// Older revisions stored `cardio` as a boolean next to `cardioType` and
    /// `cardioLength`, and `isCompleted` instead of `isFinished`.
    ///
    /// # Errors
    ///
    /// Returns an error if the remaining fields cannot be deserialized
    pub fn from_document(id: &str, data: Value) -> Result<Self, serde_json::Error> {
        let mut fields = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        fields.remove("workoutData");
        normalize_cardio(&mut fields);
        if let Some(completed) = fields.remove("isCompleted") {
            fields.entry("isFinished").or_insert(completed);
        }

        let mut record: Self = serde_json::from_value(Value::Object(fields))?;
        id.clone_into(&mut record.id);
        if record.date.is_empty() {
            id.clone_into(&mut record.date);
        }
        Ok(record)
    }

    /// Both warm-up toggles are on
    #[must_use]
    pub const fn warmup_complete(&self) -> bool {
        self.stretch && self.cardio_completed
    }
}

fn normalize_cardio(fields: &mut Map<String, Value>) {
    let legacy_type = fields.remove("cardioType");
    let legacy_length = fields.remove("cardioLength");

    let mut session = match fields.remove("cardio") {
        Some(Value::Bool(done)) => {
            fields.entry("cardioCompleted").or_insert(Value::Bool(done));
            let mut session = Map::new();
            if let Some(kind) = legacy_type {
                session.insert("type".to_owned(), kind);
            }
            if let Some(length) = legacy_length {
                session.insert("time".to_owned(), length);
            }
            session
        }
        Some(Value::Object(session)) => session,
        _ => Map::new(),
    };

    let kind = session
        .get("type")
        .and_then(Value::as_str)
        .and_then(CardioType::parse)
        .unwrap_or_default();
    session.insert("type".to_owned(), Value::String(kind.as_str().to_owned()));
    fields.insert("cardio".to_owned(), Value::Object(session));
}

/// Fields written when a workout is finished or un-finished
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionPatch {
    /// New finished flag
    pub is_finished: bool,
    /// New rated flag
    pub is_rated: bool,
    /// Rating from the finish dialog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    /// Notes from the finish dialog
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl CompletionPatch {
    /// Patch for submitting the finish dialog
    #[must_use]
    pub const fn finish(rating: u8, notes: String) -> Self {
        Self {
            is_finished: true,
            is_rated: true,
            rating: Some(rating),
            notes: Some(notes),
        }
    }

    /// Patch that reopens a finished workout
    #[must_use]
    pub const fn undo() -> Self {
        Self {
            is_finished: false,
            is_rated: false,
            rating: None,
            notes: None,
        }
    }

    /// Apply to a local copy of the record
    pub fn apply(&self, record: &mut WorkoutRecord) {
        record.is_finished = self.is_finished;
        record.is_rated = self.is_rated;
        if let Some(rating) = self.rating {
            record.rating = rating;
        }
        if let Some(notes) = &self.notes {
            record.notes.clone_from(notes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blank_record_defaults() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let record = WorkoutRecord::blank(date);

        assert_eq!(record.id, "2024-01-01");
        assert_eq!(record.date, "2024-01-01");
        assert!(!record.is_started);
        assert!(!record.stretch);
        assert_eq!(record.cardio.kind, CardioType::Treadmill);
        assert_eq!(record.cardio.time, 10);
        assert_eq!(record.rating, 0);
        assert!(record.exercises.is_empty());
    }

    #[test]
    fn test_blank_record_serializes_camel_case() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let value = serde_json::to_value(WorkoutRecord::blank(date)).unwrap();

        assert_eq!(value["cardio"]["type"], "treadmill");
        assert_eq!(value["cardioCompleted"], false);
        assert_eq!(value["isStarted"], false);
    }

    #[test]
    fn test_legacy_cardio_boolean() {
        let record = WorkoutRecord::from_document(
            "2023-05-02",
            json!({
                "cardio": true,
                "cardioType": "bike",
                "cardioLength": 25,
                "isCompleted": true,
                "workoutData": { "anything": 1 }
            }),
        )
        .unwrap();

        assert!(record.cardio_completed);
        assert_eq!(record.cardio.kind, CardioType::Bike);
        assert_eq!(record.cardio.time, 25);
        assert!(record.is_finished);
        assert_eq!(record.date, "2023-05-02");
    }

    #[test]
    fn test_unknown_cardio_type_reads_as_treadmill() {
        let record = WorkoutRecord::from_document(
            "2023-05-03",
            json!({ "cardio": { "type": "rowing", "time": 12 } }),
        )
        .unwrap();

        assert_eq!(record.cardio.kind, CardioType::Treadmill);
        assert_eq!(record.cardio.time, 12);
    }

    #[test]
    fn test_current_finished_flag_wins_over_legacy() {
        let record = WorkoutRecord::from_document(
            "2023-05-04",
            json!({ "isFinished": false, "isCompleted": true }),
        )
        .unwrap();
        assert!(!record.is_finished);
    }

    #[test]
    fn test_completion_patch_round_trip() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 2).unwrap();
        let mut record = WorkoutRecord::blank(date);

        CompletionPatch::finish(4, "solid".to_owned()).apply(&mut record);
        assert!(record.is_finished && record.is_rated);
        assert_eq!(record.rating, 4);

        CompletionPatch::undo().apply(&mut record);
        assert!(!record.is_finished && !record.is_rated);
        assert_eq!(record.notes, "solid");
    }
}
