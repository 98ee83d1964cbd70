// ABOUTME: Catalog grouping by muscle category and the exercise picker's day partition
// ABOUTME: Multi-category exercises fan out to every category they resolve to
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::muscles::{CATEGORY_ORDER, UNTAGGED_CATEGORY};
use crate::models::Exercise;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Exercises filed under one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup<'a> {
    /// Category name
    pub category: String,
    /// Exercises in catalog order
    pub exercises: Vec<&'a Exercise>,
}

/// One side (today or rest) of the picker
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartitionSide<'a> {
    /// Single-category exercises grouped by category
    pub by_category: Vec<CategoryGroup<'a>>,
    /// Exercises spanning more than one category
    pub compound: Vec<&'a Exercise>,
}

impl PartitionSide<'_> {
    /// Total number of exercises on this side
    #[must_use]
    pub fn len(&self) -> usize {
        self.compound.len()
            + self
                .by_category
                .iter()
                .map(|group| group.exercises.len())
                .sum::<usize>()
    }

    /// Whether this side is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Picker view split around today's scheduled muscle groups
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayPartition<'a> {
    /// Exercises matching any of today's tags
    pub today: PartitionSide<'a>,
    /// Everything else
    pub rest: PartitionSide<'a>,
}

impl<'a> DayPartition<'a> {
    /// Keep only exercises whose title contains `query`, case-insensitive
    ///
    /// A blank query returns the partition unchanged; emptied categories are dropped.
    #[must_use]
    pub fn filter_title(&self, query: &str) -> Self {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.clone();
        }
        let keep = |exercise: &&'a Exercise| exercise.title.to_lowercase().contains(&needle);
        let filter_side = |side: &PartitionSide<'a>| PartitionSide {
            by_category: side
                .by_category
                .iter()
                .map(|group| CategoryGroup {
                    category: group.category.clone(),
                    exercises: group.exercises.iter().copied().filter(keep).collect(),
                })
                .filter(|group| !group.exercises.is_empty())
                .collect(),
            compound: side.compound.iter().copied().filter(keep).collect(),
        };
        Self {
            today: filter_side(&self.today),
            rest: filter_side(&self.rest),
        }
    }
}

fn compare_categories(a: &str, b: &str) -> Ordering {
    let rank = |category: &str| {
        if category == UNTAGGED_CATEGORY {
            (2, usize::MAX)
        } else {
            CATEGORY_ORDER
                .iter()
                .position(|known| *known == category)
                .map_or((1, 0), |position| (0, position))
        }
    };
    rank(a).cmp(&rank(b)).then_with(|| a.cmp(b))
}

fn into_ordered_groups<'a>(groups: BTreeMap<String, Vec<&'a Exercise>>) -> Vec<CategoryGroup<'a>> {
    let mut ordered: Vec<CategoryGroup<'a>> = groups
        .into_iter()
        .map(|(category, exercises)| CategoryGroup {
            category,
            exercises,
        })
        .collect();
    ordered.sort_by(|a, b| compare_categories(&a.category, &b.category));
    ordered
}

/// Group the catalog by muscle category
///
/// Every exercise appears under each category its tags resolve to, and
/// untagged exercises under "Other". Categories come in the fixed order
/// Chest, Back, Shoulders, Arms, Legs, Core, then any unmapped category
/// alphabetically, then "Other".
#[must_use]
pub fn group_by_category(exercises: &[Exercise]) -> Vec<CategoryGroup<'_>> {
    let mut groups: BTreeMap<String, Vec<&Exercise>> = BTreeMap::new();
    for exercise in exercises {
        let categories = exercise.categories();
        if categories.is_empty() {
            groups
                .entry(UNTAGGED_CATEGORY.to_owned())
                .or_default()
                .push(exercise);
        }
        for category in categories {
            groups.entry(category.to_owned()).or_default().push(exercise);
        }
    }
    into_ordered_groups(groups)
}

/// Split the catalog around today's tags for the exercise picker
#[must_use]
pub fn partition_for_day<'a>(
    exercises: &'a [Exercise],
    today_tags: &[String],
) -> DayPartition<'a> {
    let mut today: BTreeMap<String, Vec<&Exercise>> = BTreeMap::new();
    let mut rest: BTreeMap<String, Vec<&Exercise>> = BTreeMap::new();
    let mut today_compound = Vec::new();
    let mut rest_compound = Vec::new();

    for exercise in exercises {
        let is_today = exercise.matches_any_tag(today_tags);
        let categories = exercise.categories();
        let (groups, compound) = if is_today {
            (&mut today, &mut today_compound)
        } else {
            (&mut rest, &mut rest_compound)
        };

        match categories.as_slice() {
            [] => groups
                .entry(UNTAGGED_CATEGORY.to_owned())
                .or_default()
                .push(exercise),
            [single] => groups.entry((*single).to_owned()).or_default().push(exercise),
            _ => compound.push(exercise),
        }
    }

    DayPartition {
        today: PartitionSide {
            by_category: into_ordered_groups(today),
            compound: today_compound,
        },
        rest: PartitionSide {
            by_category: into_ordered_groups(rest),
            compound: rest_compound,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExercise;

    fn exercise(id: &str, tags: &[&str]) -> Exercise {
        NewExercise::new(id, tags).into_exercise(id.to_owned())
    }

    fn categories(groups: &[CategoryGroup<'_>]) -> Vec<String> {
        groups.iter().map(|g| g.category.clone()).collect()
    }

    #[test]
    fn test_fan_out_and_order() {
        let catalog = vec![
            exercise("bench", &["Chest", "Triceps"]),
            exercise("neck", &["Neck"]),
            exercise("mystery", &[]),
            exercise("squat", &["Quads"]),
            exercise("plank", &["Abs"]),
            exercise("shrug", &["Traps"]),
        ];

        let groups = group_by_category(&catalog);
        assert_eq!(
            categories(&groups),
            vec!["Chest", "Back", "Arms", "Legs", "Core", "Neck", "Other"]
        );

        let arms = groups.iter().find(|g| g.category == "Arms").unwrap();
        assert_eq!(arms.exercises[0].id, "bench");
        let chest = groups.iter().find(|g| g.category == "Chest").unwrap();
        assert_eq!(chest.exercises[0].id, "bench");
    }

    #[test]
    fn test_legacy_and_native_records_group_the_same() {
        let legacy = Exercise::from_document(
            "bench",
            serde_json::json!({ "title": "bench", "muscleGroup": "Chest" }),
        )
        .unwrap()
        .exercise;
        let native = exercise("bench", &["Chest"]);

        let legacy_groups = group_by_category(std::slice::from_ref(&legacy));
        let native_groups = group_by_category(std::slice::from_ref(&native));
        assert_eq!(categories(&legacy_groups), categories(&native_groups));
    }

    #[test]
    fn test_partition_for_day() {
        let catalog = vec![
            exercise("bench", &["Chest", "Triceps"]),
            exercise("flyes", &["Chest"]),
            exercise("curl", &["Biceps"]),
            exercise("deadlift", &["Lower Back", "Hamstrings"]),
        ];
        let today = vec!["Chest".to_owned()];

        let partition = partition_for_day(&catalog, &today);
        assert_eq!(partition.today.compound[0].id, "bench");
        assert_eq!(categories(&partition.today.by_category), vec!["Chest"]);
        assert_eq!(partition.rest.compound[0].id, "deadlift");
        assert_eq!(categories(&partition.rest.by_category), vec!["Arms"]);
        assert_eq!(partition.today.len() + partition.rest.len(), catalog.len());
    }

    #[test]
    fn test_filter_title() {
        let catalog = vec![
            exercise("Bench Press", &["Chest"]),
            exercise("Incline Bench", &["Chest", "Shoulders"]),
            exercise("Curl", &["Biceps"]),
        ];
        let partition = partition_for_day(&catalog, &["Chest".to_owned()]);

        let filtered = partition.filter_title("bench");
        assert_eq!(filtered.today.len(), 2);
        assert!(filtered.rest.is_empty());
        assert_eq!(partition.filter_title("  ").today.len(), 2);
    }
}
