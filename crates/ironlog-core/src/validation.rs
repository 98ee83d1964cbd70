// ABOUTME: Input validation that runs before any document store dispatch
// ABOUTME: Onboarding, catalog entry, warm-up, rating, date and feedback checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::{
    cardio::{MAX_MINUTES, MIN_MINUTES},
    profile::{MAX_HEIGHT_FEET, MAX_HEIGHT_INCHES},
    schedule::{FIRST_WORKOUT_DAY, MAX_WORKOUT_DAYS, MIN_WORKOUT_DAYS},
    workout::{DATE_FORMAT, MAX_RATING, MIN_USER_RATING},
};
use crate::errors::{AppError, AppResult};
use crate::models::{Height, ProfileUpdate};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Answers collected by the onboarding flow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingInput {
    /// Given name
    pub first_name: String,
    /// Family name
    pub last_name: String,
    /// Height, feet component
    pub feet: u32,
    /// Height, inches component
    pub inches: u32,
    /// Body weight
    pub weight: u32,
    /// Number of weekly workout days
    pub workout_days: u32,
}

/// Validate onboarding answers and build the profile update that completes onboarding
///
/// # Errors
///
/// Returns a validation error naming the first field that fails
pub fn validate_onboarding(input: &OnboardingInput) -> AppResult<ProfileUpdate> {
    let first_name = input.first_name.trim();
    if first_name.is_empty() {
        return Err(AppError::missing_field("First name"));
    }
    let last_name = input.last_name.trim();
    if last_name.is_empty() {
        return Err(AppError::missing_field("Last name"));
    }

    let feet = u8::try_from(input.feet)
        .ok()
        .filter(|feet| *feet <= MAX_HEIGHT_FEET)
        .ok_or_else(|| {
            AppError::out_of_range(format!("Feet must be between 0 and {MAX_HEIGHT_FEET}."))
        })?;
    let inches = u8::try_from(input.inches)
        .ok()
        .filter(|inches| *inches <= MAX_HEIGHT_INCHES)
        .ok_or_else(|| {
            AppError::out_of_range(format!(
                "Inches must be between 0 and {MAX_HEIGHT_INCHES}."
            ))
        })?;

    if input.weight == 0 {
        return Err(AppError::out_of_range("Weight must be a positive number."));
    }
    validate_workout_days(input.workout_days)?;

    Ok(ProfileUpdate {
        first_name: Some(first_name.to_owned()),
        last_name: Some(last_name.to_owned()),
        height: Some(Height {
            feet: Some(feet),
            inches: Some(inches),
        }),
        weight: Some(input.weight),
        workout_days: Some(input.workout_days),
        workout_day: Some(FIRST_WORKOUT_DAY),
        intro_complete: Some(true),
    })
}

/// Number of weekly workout days must be 1-7
///
/// # Errors
///
/// Returns `ValueOutOfRange` outside the allowed range
pub fn validate_workout_days(days: u32) -> AppResult<()> {
    if (u32::from(MIN_WORKOUT_DAYS)..=u32::from(MAX_WORKOUT_DAYS)).contains(&days) {
        Ok(())
    } else {
        Err(AppError::out_of_range(format!(
            "Workout days must be between {MIN_WORKOUT_DAYS} and {MAX_WORKOUT_DAYS}."
        )))
    }
}

/// Catalog entries need a title and at least one muscle tag
///
/// # Errors
///
/// Returns `MissingRequiredField` for an empty title or tag list
pub fn validate_exercise_input(title: &str, muscle_tags: &[String]) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::missing_field("Exercise title"));
    }
    if muscle_tags.iter().all(|tag| tag.trim().is_empty()) {
        return Err(AppError::missing_field("At least one muscle tag"));
    }
    Ok(())
}

/// Cardio minutes must be 1-60
///
/// # Errors
///
/// Returns `ValueOutOfRange` outside the allowed range
pub fn validate_cardio_minutes(minutes: u32) -> AppResult<()> {
    if (MIN_MINUTES..=MAX_MINUTES).contains(&minutes) {
        Ok(())
    } else {
        Err(AppError::out_of_range(format!(
            "Cardio time must be between {MIN_MINUTES} and {MAX_MINUTES} minutes."
        )))
    }
}

/// A submitted rating must be 1-5
///
/// # Errors
///
/// Returns `ValueOutOfRange` outside the allowed range
pub fn validate_rating(rating: u8) -> AppResult<()> {
    if (MIN_USER_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(AppError::out_of_range(format!(
            "Rating must be between {MIN_USER_RATING} and {MAX_RATING}."
        )))
    }
}

/// Parse a workout document key
///
/// # Errors
///
/// Returns `InvalidInput` if the key is not a `YYYY-MM-DD` date
pub fn parse_workout_date(key: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(key.trim(), DATE_FORMAT)
        .map_err(|e| AppError::invalid_input(format!("Invalid workout date '{key}': {e}")))
}

/// Feedback messages must not be blank
///
/// # Errors
///
/// Returns `MissingRequiredField` for a blank message
pub fn validate_feedback_message(message: &str) -> AppResult<()> {
    if message.trim().is_empty() {
        return Err(AppError::missing_field("Feedback message"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    fn valid_input() -> OnboardingInput {
        OnboardingInput {
            first_name: "Sam".to_owned(),
            last_name: "Rivera".to_owned(),
            feet: 5,
            inches: 11,
            weight: 170,
            workout_days: 4,
        }
    }

    #[test]
    fn test_valid_onboarding_completes_intro() {
        let update = validate_onboarding(&valid_input()).unwrap();
        assert_eq!(update.intro_complete, Some(true));
        assert_eq!(update.workout_day, Some(1));
        assert_eq!(update.workout_days, Some(4));
        assert_eq!(update.height.unwrap().inches, Some(11));
    }

    #[test]
    fn test_onboarding_rejects_each_field() {
        let cases: Vec<(OnboardingInput, ErrorCode)> = vec![
            (
                OnboardingInput {
                    first_name: "  ".to_owned(),
                    ..valid_input()
                },
                ErrorCode::MissingRequiredField,
            ),
            (
                OnboardingInput {
                    last_name: String::new(),
                    ..valid_input()
                },
                ErrorCode::MissingRequiredField,
            ),
            (
                OnboardingInput {
                    feet: 9,
                    ..valid_input()
                },
                ErrorCode::ValueOutOfRange,
            ),
            (
                OnboardingInput {
                    inches: 12,
                    ..valid_input()
                },
                ErrorCode::ValueOutOfRange,
            ),
            (
                OnboardingInput {
                    weight: 0,
                    ..valid_input()
                },
                ErrorCode::ValueOutOfRange,
            ),
            (
                OnboardingInput {
                    workout_days: 8,
                    ..valid_input()
                },
                ErrorCode::ValueOutOfRange,
            ),
        ];

        for (input, code) in cases {
            let err = validate_onboarding(&input).unwrap_err();
            assert_eq!(err.code, code, "{input:?}");
            assert!(err.code.is_validation());
        }
    }

    #[test]
    fn test_exercise_input() {
        assert!(validate_exercise_input("Bench Press", &["Chest".to_owned()]).is_ok());
        assert!(validate_exercise_input("", &["Chest".to_owned()]).is_err());
        assert!(validate_exercise_input("Bench Press", &[]).is_err());
    }

    #[test]
    fn test_ranges() {
        assert!(validate_cardio_minutes(1).is_ok());
        assert!(validate_cardio_minutes(60).is_ok());
        assert!(validate_cardio_minutes(0).is_err());
        assert!(validate_cardio_minutes(61).is_err());
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_parse_workout_date() {
        let date = parse_workout_date("2024-01-01").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(
            parse_workout_date("01/01/2024").unwrap_err().code,
            ErrorCode::InvalidInput
        );
    }

    #[test]
    fn test_feedback_message() {
        assert!(validate_feedback_message("great app").is_ok());
        assert!(validate_feedback_message("   ").is_err());
    }
}
