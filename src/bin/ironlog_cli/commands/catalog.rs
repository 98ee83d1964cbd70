// ABOUTME: Catalog commands for ironlog-cli
// ABOUTME: Default seeding and grouped or day-partitioned catalog listings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use ironlog::{errors::AppResult, state::AppState};
use tracing::info;

use crate::helpers::display::{display_groups, display_partition};

type Result<T> = AppResult<T>;

/// Seed the default library if the catalog is empty
pub async fn seed_defaults(state: &mut AppState) -> Result<()> {
    let seeded = state.catalog.seed_defaults().await?;
    if seeded == 0 {
        println!(
            "Catalog already has {} exercises; nothing seeded.",
            state.catalog.exercises().len()
        );
    } else {
        info!(count = seeded, "Default catalog seeded");
        println!("Seeded {seeded} default exercises.");
    }
    Ok(())
}

/// Print the catalog grouped by category, or split around today's tags
pub fn show(state: &AppState, today: bool, filter: Option<&str>) {
    let query = filter.unwrap_or_default();
    if today {
        let tags = state.today_tags();
        let partition = state.catalog.partition(tags).filter_title(query);
        display_partition(state.profile.workout_day(), tags, &partition);
        return;
    }

    let needle = query.trim().to_lowercase();
    let mut groups = state.catalog.grouped();
    if !needle.is_empty() {
        for group in &mut groups {
            group
                .exercises
                .retain(|exercise| exercise.title.to_lowercase().contains(&needle));
        }
        groups.retain(|group| !group.exercises.is_empty());
    }
    display_groups(&groups);
}
