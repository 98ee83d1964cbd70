// ABOUTME: Profile repository implementation
// ABOUTME: Reads, creates, merges and deletes the users/{uid} document
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::ProfileRepository;
use crate::errors::AppResult;
use crate::models::Profile;
use crate::store::{paths, DocumentStore, Store, WriteMode};
use async_trait::async_trait;
use tracing::debug;

/// Store-backed implementation of `ProfileRepository`
pub struct ProfileRepositoryImpl {
    store: Store,
}

impl ProfileRepositoryImpl {
    /// Create a new `ProfileRepository` over the given store
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileRepository for ProfileRepositoryImpl {
    async fn get(&self, uid: &str) -> AppResult<Option<Profile>> {
        let path = paths::user_doc(uid)?;
        match self.store.get(&path).await? {
            Some(data) => Ok(Some(serde_json::from_value(data)?)),
            None => Ok(None),
        }
    }

    async fn create(&self, uid: &str, profile: &Profile) -> AppResult<()> {
        let path = paths::user_doc(uid)?;
        self.store
            .set(&path, serde_json::to_value(profile)?, WriteMode::Replace)
            .await?;
        debug!(user.id = %uid, "Profile created");
        Ok(())
    }

    async fn merge(&self, uid: &str, profile: &Profile) -> AppResult<()> {
        let path = paths::user_doc(uid)?;
        self.store
            .set(&path, serde_json::to_value(profile)?, WriteMode::Merge)
            .await?;
        Ok(())
    }

    async fn delete(&self, uid: &str) -> AppResult<()> {
        self.store.delete(&paths::user_doc(uid)?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_then_merge() {
        let repo = ProfileRepositoryImpl::new(Store::memory());
        assert!(repo.get("u1").await.unwrap().is_none());

        repo.create("u1", &Profile::new_for(Some("u1@example.com".to_owned())))
            .await
            .unwrap();
        let mut moved = repo.get("u1").await.unwrap().unwrap();
        moved.workout_day = 3;
        repo.merge("u1", &moved).await.unwrap();

        let stored = repo.get("u1").await.unwrap().unwrap();
        assert_eq!(stored.workout_day, 3);
        assert_eq!(stored.email.as_deref(), Some("u1@example.com"));

        repo.delete("u1").await.unwrap();
        assert!(repo.get("u1").await.unwrap().is_none());
    }
}
