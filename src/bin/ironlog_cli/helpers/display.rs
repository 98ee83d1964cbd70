// ABOUTME: Output formatting helpers for ironlog-cli
// ABOUTME: Consistent display for schedules, catalog groups, workouts and history
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use ironlog::{
    models::{Exercise, MuscleTagSchedule, TrackingEntry, WorkoutRecord},
    normalizer::{CategoryGroup, DayPartition, PartitionSide},
};

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

fn exercise_line(exercise: &Exercise) -> String {
    let mut line = format!("{} [{}]", exercise.title, exercise.muscle_tags.join(", "));
    if exercise.max > 0 {
        line.push_str(&format!(" max {}", exercise.max));
    }
    if exercise.last_used_reps > 0 {
        line.push_str(&format!(
            " last {}x{}",
            exercise.last_used_reps, exercise.last_used_weight
        ));
    }
    line
}

/// Display every schedule day, marking the cursor
pub fn display_schedule(schedule: &MuscleTagSchedule, workout_day: u32) {
    println!("\nSchedule ({} days)", schedule.day_count());
    println!("{}", "=".repeat(40));
    for (day, tags) in schedule.iter() {
        let marker = if u32::from(day) == workout_day { ">" } else { " " };
        let tags = if tags.is_empty() {
            "(rest)".to_owned()
        } else {
            tags.join(", ")
        };
        println!("{marker} Day {day}: {tags}");
    }
}

/// Display catalog groups in category order
pub fn display_groups(groups: &[CategoryGroup<'_>]) {
    if groups.is_empty() {
        println!("Catalog is empty. Run `ironlog-cli seed-defaults` to add the starter library.");
        return;
    }
    for group in groups {
        println!("\n{} ({})", group.category, group.exercises.len());
        println!("{}", "-".repeat(40));
        for exercise in &group.exercises {
            println!("  {}", exercise_line(exercise));
        }
    }
}

fn display_side(label: &str, side: &PartitionSide<'_>) {
    println!("\n{label} ({})", side.len());
    println!("{}", "=".repeat(40));
    display_groups_inline(&side.by_category);
    if !side.compound.is_empty() {
        println!("  Compound");
        for exercise in &side.compound {
            println!("    {}", exercise_line(exercise));
        }
    }
}

fn display_groups_inline(groups: &[CategoryGroup<'_>]) {
    for group in groups {
        println!("  {}", group.category);
        for exercise in &group.exercises {
            println!("    {}", exercise_line(exercise));
        }
    }
}

/// Display the picker split for the cursor day
pub fn display_partition(workout_day: u32, tags: &[String], partition: &DayPartition<'_>) {
    if tags.is_empty() {
        println!("Day {workout_day} has no muscle groups scheduled.");
    } else {
        println!("Day {workout_day}: {}", tags.join(", "));
    }
    display_side("Today", &partition.today);
    display_side("Other exercises", &partition.rest);
}

/// Display one record with its tracked exercises
pub fn display_workout(record: &WorkoutRecord, entries: &[TrackingEntry]) {
    println!("\nWorkout {}", record.date);
    println!("{}", "=".repeat(40));
    println!("   Started: {}", yes_no(record.is_started));
    println!("   Finished: {}", yes_no(record.is_finished));
    if record.is_rated {
        println!("   Rating: {}/5", record.rating);
    }
    println!("   Stretch: {}", yes_no(record.stretch));
    println!(
        "   Cardio: {} for {} min (done: {})",
        record.cardio.kind,
        record.cardio.time,
        yes_no(record.cardio_completed)
    );
    if !record.notes.is_empty() {
        println!("   Notes: {}", record.notes);
    }

    if entries.is_empty() {
        println!("\nNo exercises tracked yet.");
        return;
    }
    for entry in entries {
        println!("\n  {} (best {})", entry.exercise_title, entry.personal_best);
        for set in &entry.sets {
            println!("    Set {}: {} x {}", set.set_number, set.reps, set.weight);
        }
    }
}

/// Display a one-line summary per record
pub fn display_history(records: &[&WorkoutRecord]) {
    if records.is_empty() {
        println!("No workouts recorded.");
        return;
    }
    println!("\n{:<12} {:<9} {:<9} Rating", "Date", "Started", "Finished");
    println!("{}", "-".repeat(40));
    for record in records {
        let rating = if record.is_rated {
            record.rating.to_string()
        } else {
            "-".to_owned()
        };
        println!(
            "{:<12} {:<9} {:<9} {rating}",
            record.date,
            yes_no(record.is_started),
            yes_no(record.is_finished)
        );
    }
}
