// ABOUTME: Typed document and collection paths for the per-user store layout
// ABOUTME: Builders for every collection the repositories read and write
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Path layout, schema version 1:
//!
//! ```text
//! users/{uid}
//! users/{uid}/exercises/{id}
//! users/{uid}/workouts/{date}
//! users/{uid}/workouts/{date}/exerciseTracking/{entryId}
//! users/{uid}/muscleTags/{day}
//! ```

use crate::constants::collections;
use crate::errors::{StoreError, StoreResult};
use std::fmt;

fn validate_segment(segment: &str, full: &str) -> StoreResult<()> {
    if segment.is_empty() || segment.contains('/') || segment == "." || segment == ".." {
        return Err(StoreError::InvalidPath {
            path: full.to_owned(),
        });
    }
    Ok(())
}

/// Path to a collection: an odd number of segments
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollectionPath(String);

/// Path to a document: an even number of segments
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocPath {
    collection: CollectionPath,
    id: String,
}

impl CollectionPath {
    /// Parse a slash-separated collection path
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` for empty segments or an even segment count
    pub fn parse(path: &str) -> StoreResult<Self> {
        let segments: Vec<&str> = path.split('/').collect();
        if segments.len() % 2 == 0 {
            return Err(StoreError::InvalidPath {
                path: path.to_owned(),
            });
        }
        for segment in &segments {
            validate_segment(segment, path)?;
        }
        Ok(Self(path.to_owned()))
    }

    /// Document inside this collection
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if `id` is empty or contains a slash
    pub fn doc(&self, id: &str) -> StoreResult<DocPath> {
        validate_segment(id, &format!("{}/{id}", self.0))?;
        Ok(DocPath {
            collection: self.clone(),
            id: id.to_owned(),
        })
    }

    /// Slash-separated form
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl DocPath {
    /// Parse a slash-separated document path
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` for empty segments or an odd segment count
    pub fn parse(path: &str) -> StoreResult<Self> {
        let (collection, id) = path.rsplit_once('/').ok_or_else(|| StoreError::InvalidPath {
            path: path.to_owned(),
        })?;
        CollectionPath::parse(collection)?.doc(id)
    }

    /// Containing collection
    #[must_use]
    pub const fn collection(&self) -> &CollectionPath {
        &self.collection
    }

    /// Last segment
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sub-collection under this document
    ///
    /// # Errors
    ///
    /// Returns `InvalidPath` if `name` is not a valid segment
    pub fn child(&self, name: &str) -> StoreResult<CollectionPath> {
        let full = format!("{self}/{name}");
        validate_segment(name, &full)?;
        Ok(CollectionPath(full))
    }
}

impl fmt::Display for CollectionPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

/// `users`
#[must_use]
pub fn users() -> CollectionPath {
    CollectionPath(collections::USERS.to_owned())
}

/// `users/{uid}`
///
/// # Errors
///
/// Returns `InvalidPath` for an unusable uid
pub fn user_doc(uid: &str) -> StoreResult<DocPath> {
    users().doc(uid)
}

/// `users/{uid}/exercises`
///
/// # Errors
///
/// Returns `InvalidPath` for an unusable uid
pub fn exercises(uid: &str) -> StoreResult<CollectionPath> {
    user_doc(uid)?.child(collections::EXERCISES)
}

/// `users/{uid}/exercises/{id}`
///
/// # Errors
///
/// Returns `InvalidPath` for an unusable uid or id
pub fn exercise(uid: &str, id: &str) -> StoreResult<DocPath> {
    exercises(uid)?.doc(id)
}

/// `users/{uid}/workouts`
///
/// # Errors
///
/// Returns `InvalidPath` for an unusable uid
pub fn workouts(uid: &str) -> StoreResult<CollectionPath> {
    user_doc(uid)?.child(collections::WORKOUTS)
}

/// `users/{uid}/workouts/{date}`
///
/// # Errors
///
/// Returns `InvalidPath` for an unusable uid or date key
pub fn workout(uid: &str, date: &str) -> StoreResult<DocPath> {
    workouts(uid)?.doc(date)
}

/// `users/{uid}/workouts/{date}/exerciseTracking`
///
/// # Errors
///
/// Returns `InvalidPath` for an unusable uid or date key
pub fn tracking(uid: &str, date: &str) -> StoreResult<CollectionPath> {
    workout(uid, date)?.child(collections::EXERCISE_TRACKING)
}

/// `users/{uid}/workouts/{date}/exerciseTracking/{entryId}`
///
/// # Errors
///
/// Returns `InvalidPath` for an unusable uid, date key or entry id
pub fn tracking_entry(uid: &str, date: &str, entry_id: &str) -> StoreResult<DocPath> {
    tracking(uid, date)?.doc(entry_id)
}

/// `users/{uid}/muscleTags`
///
/// # Errors
///
/// Returns `InvalidPath` for an unusable uid
pub fn muscle_tags(uid: &str) -> StoreResult<CollectionPath> {
    user_doc(uid)?.child(collections::MUSCLE_TAGS)
}

/// `users/{uid}/muscleTags/{day}`
///
/// # Errors
///
/// Returns `InvalidPath` for an unusable uid
pub fn muscle_tag_day(uid: &str, day: u8) -> StoreResult<DocPath> {
    muscle_tags(uid)?.doc(&day.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout() {
        assert_eq!(user_doc("u1").unwrap().to_string(), "users/u1");
        assert_eq!(
            tracking_entry("u1", "2024-01-01", "t9").unwrap().to_string(),
            "users/u1/workouts/2024-01-01/exerciseTracking/t9"
        );
        assert_eq!(
            muscle_tag_day("u1", 3).unwrap().to_string(),
            "users/u1/muscleTags/3"
        );
    }

    #[test]
    fn test_rejects_bad_segments() {
        assert!(user_doc("").is_err());
        assert!(exercise("u1", "a/b").is_err());
        assert!(CollectionPath::parse("users/u1").is_err());
        assert!(DocPath::parse("users").is_err());
    }

    #[test]
    fn test_parse_round_trip() {
        let path = DocPath::parse("users/u1/exercises/e1").unwrap();
        assert_eq!(path.id(), "e1");
        assert_eq!(path.collection().as_str(), "users/u1/exercises");
    }
}
