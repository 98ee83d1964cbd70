// ABOUTME: Day-indexed muscle-tag schedule with contiguous keys 1..n
// ABOUTME: Day add/remove and tag assignment rules shared by the store and the CLI
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::schedule::{MAX_WORKOUT_DAYS, MIN_WORKOUT_DAYS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// Ordered muscle-group labels per workout day
///
/// Keys are always exactly `1..=n` with `1 <= n <= 7`. Labels are kept in the
/// order they were assigned and never split, so "Lower Back" stays one label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MuscleTagSchedule {
    days: BTreeMap<u8, Vec<String>>,
}

impl Default for MuscleTagSchedule {
    fn default() -> Self {
        let mut days = BTreeMap::new();
        days.insert(MIN_WORKOUT_DAYS, Vec::new());
        Self { days }
    }
}

impl MuscleTagSchedule {
    /// Schedule with `count` empty days, clamped to the allowed range
    #[must_use]
    pub fn with_days(count: u8) -> Self {
        let count = count.clamp(MIN_WORKOUT_DAYS, MAX_WORKOUT_DAYS);
        Self {
            days: (MIN_WORKOUT_DAYS..=count).map(|day| (day, Vec::new())).collect(),
        }
    }

    /// Build from stored `(day key, tags)` pairs
    ///
    /// Keys that are not positive integers within range are skipped with a
    /// warning. Gaps are closed by renumbering in ascending key order. An empty
    /// input yields the single empty day 1.
    #[must_use]
    pub fn from_stored<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut parsed: BTreeMap<u8, Vec<String>> = BTreeMap::new();
        for (key, tags) in entries {
            match key.trim().parse::<u8>() {
                Ok(day) if (MIN_WORKOUT_DAYS..=MAX_WORKOUT_DAYS).contains(&day) => {
                    parsed.insert(day, tags);
                }
                _ => warn!(day_key = %key, "Skipping stored schedule day with invalid key"),
            }
        }

        if parsed.is_empty() {
            return Self::default();
        }

        let days = (MIN_WORKOUT_DAYS..)
            .zip(parsed.into_values())
            .collect::<BTreeMap<_, _>>();
        Self { days }
    }

    /// Number of days
    #[must_use]
    pub fn day_count(&self) -> u8 {
        u8::try_from(self.days.len()).unwrap_or(MAX_WORKOUT_DAYS)
    }

    /// Highest day index
    #[must_use]
    pub fn last_day(&self) -> u8 {
        self.days.keys().next_back().copied().unwrap_or(MIN_WORKOUT_DAYS)
    }

    /// Tags for a day, if the day exists
    #[must_use]
    pub fn tags_for(&self, day: u8) -> Option<&[String]> {
        self.days.get(&day).map(Vec::as_slice)
    }

    /// Whether the day exists
    #[must_use]
    pub fn contains_day(&self, day: u8) -> bool {
        self.days.contains_key(&day)
    }

    /// Days that carry at least one tag
    #[must_use]
    pub fn days_with_tags(&self) -> Vec<u8> {
        self.days
            .iter()
            .filter(|(_, tags)| !tags.is_empty())
            .map(|(day, _)| *day)
            .collect()
    }

    /// Iterate days in order
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[String])> {
        self.days.iter().map(|(day, tags)| (*day, tags.as_slice()))
    }

    /// Stored document keys
    #[must_use]
    pub fn day_keys(&self) -> Vec<String> {
        self.days.keys().map(ToString::to_string).collect()
    }

    /// Append an empty day at `last_day + 1`
    ///
    /// Returns `false` without changes when the schedule is already full.
    pub fn add_day(&mut self) -> bool {
        if self.day_count() >= MAX_WORKOUT_DAYS {
            return false;
        }
        let next = self.last_day() + 1;
        self.days.insert(next, Vec::new());
        true
    }

    /// Drop the highest day
    ///
    /// Returns `false` without changes when only one day is left.
    pub fn remove_last_day(&mut self) -> bool {
        if self.day_count() <= MIN_WORKOUT_DAYS {
            return false;
        }
        let last = self.last_day();
        self.days.remove(&last);
        true
    }

    /// Append the tags that the day does not already carry
    ///
    /// Returns the number of tags added; unknown days add nothing.
    pub fn assign(&mut self, day: u8, tags: &[String]) -> usize {
        let Some(current) = self.days.get_mut(&day) else {
            return 0;
        };
        let mut added = 0;
        for tag in tags {
            if !current.contains(tag) {
                current.push(tag.clone());
                added += 1;
            }
        }
        added
    }

    /// Remove a tag from a day; returns whether anything was removed
    pub fn remove_tag(&mut self, day: u8, tag: &str) -> bool {
        let Some(current) = self.days.get_mut(&day) else {
            return false;
        };
        let before = current.len();
        current.retain(|existing| existing != tag);
        current.len() != before
    }
}
