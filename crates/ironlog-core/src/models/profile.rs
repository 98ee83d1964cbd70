// ABOUTME: User profile document with physical stats and the workout-day cursor
// ABOUTME: Partial updates overlay set fields onto the profile the client last observed
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{lenient_opt_u32, lenient_u32};
use crate::constants::schedule::FIRST_WORKOUT_DAY;
use serde::{Deserialize, Serialize};

/// Height split into feet and inches, both unset until onboarding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Height {
    /// Feet component
    #[serde(default)]
    pub feet: Option<u8>,
    /// Inches component
    #[serde(default)]
    pub inches: Option<u8>,
}

/// Profile stored at `users/{uid}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Given name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Height; older documents store `null`
    #[serde(default, deserialize_with = "nullable_height")]
    pub height: Height,
    /// Body weight in pounds
    #[serde(default, deserialize_with = "lenient_opt_u32")]
    pub weight: Option<u32>,
    /// Number of scheduled workout days chosen at onboarding
    #[serde(default, deserialize_with = "lenient_opt_u32")]
    pub workout_days: Option<u32>,
    /// 1-based cursor into the schedule
    #[serde(default = "first_workout_day", deserialize_with = "cursor")]
    pub workout_day: u32,
    /// Whether onboarding has been completed
    #[serde(default)]
    pub intro_complete: bool,
    /// Email of the authenticated account
    #[serde(default)]
    pub email: Option<String>,
}

const fn first_workout_day() -> u32 {
    FIRST_WORKOUT_DAY
}

fn cursor<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let day = lenient_u32(deserializer)?;
    Ok(day.max(FIRST_WORKOUT_DAY))
}

fn nullable_height<'de, D>(deserializer: D) -> Result<Height, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Height>::deserialize(deserializer)?.unwrap_or_default())
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            first_name: None,
            last_name: None,
            height: Height::default(),
            weight: None,
            workout_days: None,
            workout_day: FIRST_WORKOUT_DAY,
            intro_complete: false,
            email: None,
        }
    }
}

impl Profile {
    /// Default profile written the first time a user signs in
    #[must_use]
    pub fn new_for(email: Option<String>) -> Self {
        Self {
            email,
            ..Self::default()
        }
    }

    /// Pull the cursor back inside `[1, total_days]`
    ///
    /// Returns `true` when the cursor moved.
    pub fn clamp_workout_day(&mut self, total_days: u32) -> bool {
        let total = total_days.max(FIRST_WORKOUT_DAY);
        let clamped = self.workout_day.clamp(FIRST_WORKOUT_DAY, total);
        let moved = clamped != self.workout_day;
        self.workout_day = clamped;
        moved
    }
}

/// Partial profile update; `None` fields keep the current value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New given name
    pub first_name: Option<String>,
    /// New family name
    pub last_name: Option<String>,
    /// New height
    pub height: Option<Height>,
    /// New weight
    pub weight: Option<u32>,
    /// New number of workout days
    pub workout_days: Option<u32>,
    /// New cursor position
    pub workout_day: Option<u32>,
    /// New onboarding flag
    pub intro_complete: Option<bool>,
}

impl ProfileUpdate {
    /// Update that only moves the cursor
    #[must_use]
    pub fn workout_day(day: u32) -> Self {
        Self {
            workout_day: Some(day),
            ..Self::default()
        }
    }

    /// Overlay the set fields onto `base`
    #[must_use]
    pub fn apply(&self, base: &Profile) -> Profile {
        let mut merged = base.clone();
        if let Some(first_name) = &self.first_name {
            merged.first_name = Some(first_name.clone());
        }
        if let Some(last_name) = &self.last_name {
            merged.last_name = Some(last_name.clone());
        }
        if let Some(height) = self.height {
            merged.height = height;
        }
        if let Some(weight) = self.weight {
            merged.weight = Some(weight);
        }
        if let Some(workout_days) = self.workout_days {
            merged.workout_days = Some(workout_days);
        }
        if let Some(workout_day) = self.workout_day {
            merged.workout_day = workout_day;
        }
        if let Some(intro_complete) = self.intro_complete {
            merged.intro_complete = intro_complete;
        }
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_apply_keeps_omitted_fields() {
        let base = Profile {
            first_name: Some("Ada".to_owned()),
            weight: Some(150),
            workout_days: Some(4),
            workout_day: 3,
            ..Profile::default()
        };

        let merged = ProfileUpdate {
            weight: Some(155),
            ..ProfileUpdate::default()
        }
        .apply(&base);

        assert_eq!(merged.weight, Some(155));
        assert_eq!(merged.first_name.as_deref(), Some("Ada"));
        assert_eq!(merged.workout_day, 3);
    }

    #[test]
    fn test_legacy_document_shapes() {
        let profile: Profile = serde_json::from_value(json!({
            "height": null,
            "weight": "180",
            "workoutDay": "2",
            "introComplete": true
        }))
        .unwrap();

        assert_eq!(profile.height, Height::default());
        assert_eq!(profile.weight, Some(180));
        assert_eq!(profile.workout_day, 2);
        assert!(profile.intro_complete);
    }

    #[test]
    fn test_null_cursor_reads_as_first_day() {
        let profile: Profile = serde_json::from_value(json!({ "workoutDay": null })).unwrap();
        assert_eq!(profile.workout_day, 1);
    }

    #[test]
    fn test_clamp_workout_day() {
        let mut profile = Profile {
            workout_day: 6,
            ..Profile::default()
        };
        assert!(profile.clamp_workout_day(4));
        assert_eq!(profile.workout_day, 4);
        assert!(!profile.clamp_workout_day(4));
    }
}
