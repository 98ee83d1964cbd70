// ABOUTME: Workout-day cursor arithmetic with wrap-around
// ABOUTME: next and previous are inverses for every cursor within the schedule
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::schedule::FIRST_WORKOUT_DAY;

/// Cursor after finishing `current`; wraps to day 1 past `total_days`
///
/// A cursor already beyond the schedule (the schedule shrank) also wraps.
#[must_use]
pub const fn next_workout_day(current: u32, total_days: u32) -> u32 {
    if total_days == 0 || current >= total_days {
        FIRST_WORKOUT_DAY
    } else {
        current + 1
    }
}

/// Cursor after undoing a finish at `current`; wraps to `total_days` below day 1
#[must_use]
pub const fn previous_workout_day(current: u32, total_days: u32) -> u32 {
    let total = if total_days == 0 { FIRST_WORKOUT_DAY } else { total_days };
    if current <= FIRST_WORKOUT_DAY || current > total {
        total
    } else {
        current - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wraps() {
        assert_eq!(next_workout_day(3, 3), 1);
        assert_eq!(next_workout_day(1, 3), 2);
        assert_eq!(previous_workout_day(1, 3), 3);
        assert_eq!(previous_workout_day(3, 3), 2);
        assert_eq!(next_workout_day(1, 1), 1);
        assert_eq!(previous_workout_day(1, 1), 1);
    }

    #[test]
    fn test_finish_then_undo_restores_cursor() {
        for total in 1..=7 {
            for day in 1..=total {
                let advanced = next_workout_day(day, total);
                assert_eq!(previous_workout_day(advanced, total), day, "{day}/{total}");
            }
        }
    }

    #[test]
    fn test_cursor_past_shrunk_schedule() {
        assert_eq!(next_workout_day(6, 4), 1);
        assert_eq!(previous_workout_day(6, 4), 4);
    }
}
