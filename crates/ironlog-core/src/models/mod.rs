// ABOUTME: Document models for profiles, exercises, workouts, tracking entries, and schedules
// ABOUTME: Includes lenient deserializers for fields older app revisions stored loosely
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Document Models
//!
//! Every model serializes with camelCase field names so that the stored
//! documents keep the layout existing clients already read. Reads are lenient:
//! legacy shapes are normalized by the `from_document` constructors and numeric
//! fields tolerate `null`, empty strings and numeric strings.

/// Exercise catalog entries and legacy `muscleGroup` migration
pub mod exercise;
/// User profile and partial updates
pub mod profile;
/// Day-indexed muscle-tag schedule
pub mod schedule;
/// Per-exercise set logs within a workout
pub mod tracking;
/// Per-date workout records
pub mod workout;

pub use exercise::{Exercise, NewExercise, NormalizedExercise};
pub use profile::{Height, Profile, ProfileUpdate};
pub use schedule::MuscleTagSchedule;
pub use tracking::{SetEntry, SetField, TrackingEntry};
pub use workout::{CardioSession, CardioType, CompletionPatch, ExerciseRef, WorkoutRecord};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Read a non-negative integer from a loosely typed field
///
/// Accepts integers, floats (truncated), numeric strings, and treats `null`,
/// empty strings, negatives and anything unparseable as zero.
pub(crate) fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_u32(&value).unwrap_or(0))
}

/// Like [`lenient_u32`] but keeps the distinction between absent and zero
pub(crate) fn lenient_opt_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_u32(&value))
}

fn coerce_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(number) => number
            .as_u64()
            .map(|n| u32::try_from(n).unwrap_or(u32::MAX))
            .or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f as u32)
            }),
        Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_u32_variants() {
        assert_eq!(coerce_u32(&json!(135)), Some(135));
        assert_eq!(coerce_u32(&json!(12.9)), Some(12));
        assert_eq!(coerce_u32(&json!("8")), Some(8));
        assert_eq!(coerce_u32(&json!("")), None);
        assert_eq!(coerce_u32(&json!(null)), None);
        assert_eq!(coerce_u32(&json!(-3)), None);
    }
}
