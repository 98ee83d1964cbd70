// ABOUTME: Set-array edits on a tracking entry
// ABOUTME: Appends, removals with renumbering, and single-field draft edits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use crate::models::{SetEntry, SetField, TrackingEntry};

/// Append `{N+1, 0, 0}` and return the new set
pub fn add_set(entry: &mut TrackingEntry) -> SetEntry {
    let set_number = u32::try_from(entry.sets.len()).map_or(u32::MAX, |len| len.saturating_add(1));
    let set = SetEntry::empty(set_number);
    entry.sets.push(set);
    set
}

/// Remove the set at `index` (0-based) and renumber the rest 1..N
///
/// # Errors
///
/// Returns `ValueOutOfRange` if there is no set at `index`
pub fn remove_set(entry: &mut TrackingEntry, index: usize) -> AppResult<SetEntry> {
    if index >= entry.sets.len() {
        return Err(out_of_range(entry, index));
    }
    let removed = entry.sets.remove(index);
    entry.renumber();
    Ok(removed)
}

/// Change one field of the set at `index` (0-based)
///
/// # Errors
///
/// Returns `ValueOutOfRange` if there is no set at `index`
pub fn edit_set(
    entry: &mut TrackingEntry,
    index: usize,
    field: SetField,
    value: u32,
) -> AppResult<()> {
    if index >= entry.sets.len() {
        return Err(out_of_range(entry, index));
    }
    let set = &mut entry.sets[index];
    match field {
        SetField::Reps => set.reps = value,
        SetField::Weight => set.weight = value,
    }
    Ok(())
}

fn out_of_range(entry: &TrackingEntry, index: usize) -> AppError {
    AppError::out_of_range(format!(
        "Set {} does not exist; entry has {} sets",
        index + 1,
        entry.sets.len()
    ))
    .with_resource_id(entry.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewExercise;

    fn entry() -> TrackingEntry {
        let exercise = NewExercise::new("Squats", &["Quads"]).into_exercise("sq".to_owned());
        TrackingEntry::from_exercise("t1".to_owned(), &exercise)
    }

    #[test]
    fn test_add_set_appends_next_number() {
        let mut entry = entry();
        let added = add_set(&mut entry);
        assert_eq!(added, SetEntry { set_number: 2, reps: 0, weight: 0 });
        assert_eq!(entry.sets.len(), 2);
    }

    #[test]
    fn test_remove_set_renumbers() {
        let mut entry = entry();
        add_set(&mut entry);
        add_set(&mut entry);
        edit_set(&mut entry, 2, SetField::Reps, 5).unwrap();

        let removed = remove_set(&mut entry, 0).unwrap();
        assert_eq!(removed.set_number, 1);
        let numbers: Vec<u32> = entry.sets.iter().map(|s| s.set_number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert_eq!(entry.sets[1].reps, 5);
    }

    #[test]
    fn test_out_of_range_index() {
        let mut entry = entry();
        assert!(remove_set(&mut entry, 3).is_err());
        assert!(edit_set(&mut entry, 1, SetField::Weight, 100).is_err());
        assert_eq!(entry.sets.len(), 1);
    }
}
