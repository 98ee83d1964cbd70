// ABOUTME: Muscle-group labels and their broader display categories
// ABOUTME: Fixed tag → category table plus the preferred category display order
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Labels offered when assigning muscle groups to schedule days
pub const MUSCLE_GROUPS: [&str; 14] = [
    "Quads",
    "Hamstrings",
    "Glutes",
    "Calves",
    "Chest",
    "Lats",
    "Traps",
    "Shoulders",
    "Biceps",
    "Triceps",
    "Abs",
    "Obliques",
    "Lower Back",
    "Forearms",
];

/// Tag → category mapping
pub const TAG_CATEGORIES: [(&str, &str); 14] = [
    ("Quads", "Legs"),
    ("Hamstrings", "Legs"),
    ("Glutes", "Legs"),
    ("Calves", "Legs"),
    ("Chest", "Chest"),
    ("Lats", "Back"),
    ("Traps", "Back"),
    ("Lower Back", "Back"),
    ("Shoulders", "Shoulders"),
    ("Biceps", "Arms"),
    ("Triceps", "Arms"),
    ("Forearms", "Arms"),
    ("Abs", "Core"),
    ("Obliques", "Core"),
];

/// Display order for mapped categories; anything else is appended after these
pub const CATEGORY_ORDER: [&str; 6] = ["Chest", "Back", "Shoulders", "Arms", "Legs", "Core"];

/// Bucket for exercises that carry no tags at all
pub const UNTAGGED_CATEGORY: &str = "Other";

/// Resolve a tag to its category; an unmapped tag is its own category
#[must_use]
pub fn category_for(tag: &str) -> &str {
    TAG_CATEGORIES
        .iter()
        .find(|(mapped, _)| *mapped == tag)
        .map_or(tag, |(_, category)| *category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_offered_group_is_mapped() {
        for group in MUSCLE_GROUPS {
            assert!(CATEGORY_ORDER.contains(&category_for(group)), "{group}");
        }
    }

    #[test]
    fn test_unmapped_tag_is_own_category() {
        assert_eq!(category_for("Back"), "Back");
        assert_eq!(category_for("Neck"), "Neck");
        assert_eq!(category_for("Lower Back"), "Back");
    }
}
