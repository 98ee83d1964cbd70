// ABOUTME: Exercise catalog entry model with legacy muscleGroup → muscleTags migration
// ABOUTME: Normalizes raw stored documents and reports whether a rewrite is needed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::lenient_u32;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field older app revisions used for a single muscle group
const LEGACY_MUSCLE_GROUP: &str = "muscleGroup";
const MUSCLE_TAGS: &str = "muscleTags";

/// One entry in the user's exercise library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    /// Document id
    #[serde(default)]
    pub id: String,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Muscle-group labels, multi-word labels are single elements
    #[serde(default)]
    pub muscle_tags: Vec<String>,
    /// Personal-best weight
    #[serde(default, deserialize_with = "lenient_u32")]
    pub max: u32,
    /// Weight of the last logged set
    #[serde(default, deserialize_with = "lenient_u32")]
    pub last_used_weight: u32,
    /// Reps of the last logged set
    #[serde(default, deserialize_with = "lenient_u32")]
    pub last_used_reps: u32,
    /// Date the entry was last saved from the catalog
    #[serde(default)]
    pub last_used: Option<String>,
    /// Free-form notes
    #[serde(default)]
    pub notes: String,
}

/// Input for a catalog entry that does not exist yet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExercise {
    /// Explicit id; generated when absent
    pub id: Option<String>,
    /// Display title
    pub title: String,
    /// Muscle-group labels
    pub muscle_tags: Vec<String>,
    /// Personal-best weight
    pub max: u32,
    /// Free-form notes
    pub notes: String,
}

impl NewExercise {
    /// Convenience constructor used by seeding and tests
    #[must_use]
    pub fn new(title: &str, muscle_tags: &[&str]) -> Self {
        Self {
            id: None,
            title: title.to_owned(),
            muscle_tags: muscle_tags.iter().map(|tag| (*tag).to_owned()).collect(),
            max: 0,
            notes: String::new(),
        }
    }

    /// Materialize the entry under the given id
    #[must_use]
    pub fn into_exercise(self, id: String) -> Exercise {
        Exercise {
            id,
            title: self.title,
            muscle_tags: self.muscle_tags,
            max: self.max,
            last_used_weight: 0,
            last_used_reps: 0,
            last_used: None,
            notes: self.notes,
        }
    }
}

/// Result of reading a stored catalog document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedExercise {
    /// Exercise in the current shape
    pub exercise: Exercise,
    /// Whether the stored document is in a legacy shape and should be rewritten
    pub migrated: bool,
}

impl Exercise {
    /// Normalize a raw stored document into the current shape
    ///
    /// A record without an array-typed `muscleTags` takes its tags from the
    /// legacy `muscleGroup` string (or none), and the legacy field is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the remaining fields cannot be deserialized
    pub fn from_document(id: &str, data: Value) -> Result<NormalizedExercise, serde_json::Error> {
        let mut fields = match data {
            Value::Object(map) => map,
            _ => Map::new(),
        };

        let migrated = migrate_muscle_tags(&mut fields);
        let mut exercise: Self = serde_json::from_value(Value::Object(fields))?;
        id.clone_into(&mut exercise.id);

        Ok(NormalizedExercise { exercise, migrated })
    }

    /// Distinct categories this exercise resolves to
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for tag in &self.muscle_tags {
            let category = crate::constants::muscles::category_for(tag);
            if !categories.contains(&category) {
                categories.push(category);
            }
        }
        categories
    }

    /// Whether any of the given tags appears on this exercise
    #[must_use]
    pub fn matches_any_tag(&self, tags: &[String]) -> bool {
        tags.iter().any(|tag| self.muscle_tags.contains(tag))
    }
}

fn migrate_muscle_tags(fields: &mut Map<String, Value>) -> bool {
    if matches!(fields.get(MUSCLE_TAGS), Some(Value::Array(_))) {
        return false;
    }

    let tags = match fields.remove(LEGACY_MUSCLE_GROUP) {
        Some(Value::String(group)) if !group.trim().is_empty() => vec![Value::String(group)],
        _ => Vec::new(),
    };
    fields.insert(MUSCLE_TAGS.to_owned(), Value::Array(tags));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_legacy_muscle_group_is_migrated() {
        let normalized = Exercise::from_document(
            "e1",
            json!({ "title": "Bench", "muscleGroup": "Chest", "max": 100 }),
        )
        .unwrap();

        assert!(normalized.migrated);
        assert_eq!(normalized.exercise.id, "e1");
        assert_eq!(normalized.exercise.muscle_tags, vec!["Chest".to_owned()]);

        let rewritten = serde_json::to_value(&normalized.exercise).unwrap();
        assert!(rewritten.get("muscleGroup").is_none());
    }

    #[test]
    fn test_missing_tags_become_empty() {
        let normalized = Exercise::from_document("e2", json!({ "title": "Mystery" })).unwrap();
        assert!(normalized.migrated);
        assert!(normalized.exercise.muscle_tags.is_empty());
    }

    #[test]
    fn test_current_shape_is_untouched() {
        let normalized = Exercise::from_document(
            "e3",
            json!({ "title": "Good Mornings", "muscleTags": ["Hamstrings", "Lower Back"] }),
        )
        .unwrap();

        assert!(!normalized.migrated);
        assert_eq!(normalized.exercise.muscle_tags.len(), 2);
        assert_eq!(normalized.exercise.muscle_tags[1], "Lower Back");
    }

    #[test]
    fn test_null_numeric_fields_read_as_zero() {
        let normalized = Exercise::from_document(
            "e4",
            json!({ "title": "Rows", "muscleTags": ["Lats"], "lastUsedWeight": null, "lastUsedReps": "" }),
        )
        .unwrap();

        assert_eq!(normalized.exercise.last_used_weight, 0);
        assert_eq!(normalized.exercise.last_used_reps, 0);
    }

    #[test]
    fn test_categories_are_distinct() {
        let exercise = NewExercise::new("Squats", &["Quads", "Glutes", "Hamstrings"])
            .into_exercise("s".to_owned());
        assert_eq!(exercise.categories(), vec!["Legs"]);

        let bench = NewExercise::new("Bench Press", &["Chest", "Triceps", "Shoulders"])
            .into_exercise("b".to_owned());
        assert_eq!(bench.categories(), vec!["Chest", "Arms", "Shoulders"]);
    }
}
