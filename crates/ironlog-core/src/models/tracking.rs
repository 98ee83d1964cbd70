// ABOUTME: Tracking entry model holding one exercise's logged sets within a workout
// ABOUTME: Entries snapshot catalog fields and are rewritten whole on every set change
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{lenient_opt_u32, lenient_u32, Exercise};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// One logged set
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetEntry {
    /// 1-based position within the entry
    #[serde(default, deserialize_with = "lenient_u32")]
    pub set_number: u32,
    /// Repetitions
    #[serde(default, deserialize_with = "lenient_u32")]
    pub reps: u32,
    /// Weight
    #[serde(default, deserialize_with = "lenient_u32")]
    pub weight: u32,
}

impl SetEntry {
    /// Fresh set at the given position with zero reps and weight
    #[must_use]
    pub const fn empty(set_number: u32) -> Self {
        Self {
            set_number,
            reps: 0,
            weight: 0,
        }
    }
}

/// Editable numeric field of a set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    /// Repetitions
    Reps,
    /// Weight
    Weight,
}

impl FromStr for SetField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reps" => Ok(Self::Reps),
            "weight" => Ok(Self::Weight),
            other => Err(format!("unknown set field '{other}'")),
        }
    }
}

impl fmt::Display for SetField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reps => f.write_str("reps"),
            Self::Weight => f.write_str("weight"),
        }
    }
}

/// Entry stored at `users/{uid}/workouts/{date}/exerciseTracking/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingEntry {
    /// Document id
    #[serde(default)]
    pub id: String,
    /// Catalog id the entry was created from
    #[serde(default)]
    pub exercise_id: String,
    /// Title snapshot
    #[serde(default)]
    pub exercise_title: String,
    /// Logged sets, numbered 1..N
    #[serde(default)]
    pub sets: Vec<SetEntry>,
    /// Catalog `max` at the time the entry was created
    #[serde(default, deserialize_with = "lenient_u32")]
    pub personal_best: u32,
    /// Tag snapshot
    #[serde(default)]
    pub muscle_tags: Vec<String>,
    /// Notes snapshot
    #[serde(default)]
    pub notes: String,
    /// Display position within the workout
    #[serde(
        default,
        deserialize_with = "lenient_opt_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub order: Option<u32>,
}

impl TrackingEntry {
    /// New entry for a catalog exercise with a single empty set
    #[must_use]
    pub fn from_exercise(id: String, exercise: &Exercise) -> Self {
        Self {
            id,
            exercise_id: exercise.id.clone(),
            exercise_title: exercise.title.clone(),
            sets: vec![SetEntry::empty(1)],
            personal_best: exercise.max,
            muscle_tags: exercise.muscle_tags.clone(),
            notes: exercise.notes.clone(),
            order: None,
        }
    }

    /// Read a stored entry, renumbering sets whose numbers are missing or out of sequence
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be deserialized
    pub fn from_document(id: &str, data: Value) -> Result<Self, serde_json::Error> {
        let mut entry: Self = serde_json::from_value(data)?;
        id.clone_into(&mut entry.id);
        entry.renumber();
        Ok(entry)
    }

    /// Most recently logged set
    #[must_use]
    pub fn last_set(&self) -> Option<&SetEntry> {
        self.sets.last()
    }

    /// Number sets 1..N in their current order
    pub fn renumber(&mut self) {
        for (set_number, set) in (1_u32..).zip(self.sets.iter_mut()) {
            set.set_number = set_number;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExercise;
    use serde_json::json;

    #[test]
    fn test_from_exercise_snapshots_catalog_fields() {
        let mut exercise = NewExercise::new("Deadlift", &["Hamstrings", "Glutes"])
            .into_exercise("dl".to_owned());
        exercise.max = 315;
        exercise.notes = "mixed grip".to_owned();

        let entry = TrackingEntry::from_exercise("t1".to_owned(), &exercise);

        assert_eq!(entry.exercise_id, "dl");
        assert_eq!(entry.personal_best, 315);
        assert_eq!(entry.sets, vec![SetEntry::empty(1)]);
        assert_eq!(entry.notes, "mixed grip");
    }

    #[test]
    fn test_from_document_renumbers_sets() {
        let entry = TrackingEntry::from_document(
            "t2",
            json!({
                "exerciseId": "e",
                "sets": [{ "reps": "8", "weight": 100 }, { "setNumber": 7, "reps": 6, "weight": null }]
            }),
        )
        .unwrap();

        assert_eq!(entry.id, "t2");
        assert_eq!(entry.sets[0].set_number, 1);
        assert_eq!(entry.sets[0].reps, 8);
        assert_eq!(entry.sets[1].set_number, 2);
        assert_eq!(entry.sets[1].weight, 0);
        assert_eq!(entry.order, None);
    }

    #[test]
    fn test_set_field_parse() {
        assert_eq!("Reps".parse::<SetField>().unwrap(), SetField::Reps);
        assert_eq!("weight".parse::<SetField>().unwrap(), SetField::Weight);
        assert!("tempo".parse::<SetField>().is_err());
    }
}
