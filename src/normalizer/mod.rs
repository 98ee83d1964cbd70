// ABOUTME: Pure transforms deriving views and edits from synced state
// ABOUTME: Category grouping, day partitioning, set-array edits and cursor rollover
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Exercise-Tracking Normalizer
//!
//! Nothing in this module touches the store. Every function takes the current
//! local state and returns a derived view or edits it in place.

/// Catalog grouping by muscle category and the picker's day partition
pub mod grouping;
/// Workout-day cursor rollover
pub mod rollover;
/// Set-array edits on tracking entries
pub mod sets;

pub use grouping::{
    group_by_category, partition_for_day, CategoryGroup, DayPartition, PartitionSide,
};
pub use rollover::{next_workout_day, previous_workout_day};
pub use sets::{add_set, edit_set, remove_set};
