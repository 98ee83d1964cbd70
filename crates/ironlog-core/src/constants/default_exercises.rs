// ABOUTME: Starter exercise catalog seeded into an empty library
// ABOUTME: Title and muscle tags per entry; all numeric fields start at zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Number of seeded entries
pub const DEFAULT_EXERCISE_COUNT: usize = 42;

/// `(title, muscle tags)` for each seeded entry, in seeding order
///
/// Titles may repeat ("Good Mornings" is listed under both Hamstrings and
/// Lower Back); each row is still its own catalog entry.
pub const DEFAULT_EXERCISES: [(&str, &[&str]); DEFAULT_EXERCISE_COUNT] = [
    ("Bench Press", &["Chest", "Triceps", "Shoulders"]),
    ("Incline Dumbbell Press", &["Chest", "Shoulders"]),
    ("Chest Flyes", &["Chest"]),
    ("Deadlift", &["Back", "Hamstrings", "Glutes"]),
    ("Pull-Ups", &["Back", "Biceps"]),
    ("Bent-Over Rows", &["Back", "Biceps"]),
    ("Overhead Press", &["Shoulders", "Triceps"]),
    ("Lateral Raises", &["Shoulders"]),
    ("Front Raises", &["Shoulders"]),
    ("Barbell Curls", &["Biceps"]),
    ("Dumbbell Hammer Curls", &["Biceps", "Forearms"]),
    ("Preacher Curls", &["Biceps"]),
    ("Tricep Pushdowns", &["Triceps"]),
    ("Skull Crushers", &["Triceps"]),
    ("Overhead Tricep Extension", &["Triceps"]),
    ("Squats", &["Quads", "Glutes", "Hamstrings"]),
    ("Leg Press", &["Quads", "Glutes"]),
    ("Lunges", &["Quads", "Glutes", "Hamstrings"]),
    ("Romanian Deadlifts", &["Hamstrings", "Glutes"]),
    ("Leg Curls", &["Hamstrings"]),
    ("Good Mornings", &["Hamstrings", "Lower Back"]),
    ("Hip Thrusts", &["Glutes", "Hamstrings"]),
    ("Glute Bridges", &["Glutes", "Hamstrings"]),
    ("Step-Ups", &["Glutes", "Quads"]),
    ("Standing Calf Raises", &["Calves"]),
    ("Seated Calf Raises", &["Calves"]),
    ("Leg Press Calf Extensions", &["Calves"]),
    ("Crunches", &["Abs"]),
    ("Planks", &["Abs", "Lower Back"]),
    ("Russian Twists", &["Abs", "Obliques"]),
    ("Wrist Curls", &["Forearms"]),
    ("Reverse Wrist Curls", &["Forearms"]),
    ("Farmer's Walk", &["Forearms", "Traps"]),
    ("Shrugs", &["Traps"]),
    ("Upright Rows", &["Traps", "Shoulders"]),
    ("Face Pulls", &["Traps", "Shoulders"]),
    ("Hyperextensions", &["Lower Back", "Glutes"]),
    ("Good Mornings", &["Lower Back", "Hamstrings"]),
    ("Deadlifts", &["Lower Back", "Glutes", "Hamstrings"]),
    ("Side Planks", &["Obliques", "Abs"]),
    ("Woodchoppers", &["Obliques", "Abs", "Shoulders"]),
    ("Bicycle Crunches", &["Obliques", "Abs"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_entry_is_tagged() {
        for (title, tags) in DEFAULT_EXERCISES {
            assert!(!title.is_empty());
            assert!(!tags.is_empty(), "{title}");
        }
    }

    #[test]
    fn test_bench_press_tags() {
        assert_eq!(
            DEFAULT_EXERCISES[0],
            ("Bench Press", &["Chest", "Triceps", "Shoulders"][..])
        );
    }
}
