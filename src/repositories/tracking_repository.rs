// ABOUTME: Tracking entry repository implementation
// ABOUTME: Per-workout set logs with order-aware listing and batched reordering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::TrackingRepository;
use crate::errors::AppResult;
use crate::models::TrackingEntry;
use crate::store::{paths, DocumentStore, Store, WriteBatch, WriteMode};
use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, warn};

/// Store-backed implementation of `TrackingRepository`
pub struct TrackingRepositoryImpl {
    store: Store,
}

impl TrackingRepositoryImpl {
    /// Create a new `TrackingRepository` over the given store
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

/// Sort by `order`, entries without one last; ties keep their current order
pub fn sort_by_order(entries: &mut [TrackingEntry]) {
    entries.sort_by_key(|entry| entry.order.map_or((1, 0), |order| (0, order)));
}

#[async_trait]
impl TrackingRepository for TrackingRepositoryImpl {
    async fn list(&self, uid: &str, date: &str) -> AppResult<Vec<TrackingEntry>> {
        let documents = self.store.list(&paths::tracking(uid, date)?).await?;
        let mut entries = Vec::with_capacity(documents.len());
        for document in documents {
            match TrackingEntry::from_document(&document.id, document.data) {
                Ok(entry) => entries.push(entry),
                Err(e) => {
                    warn!(entry.id = %document.id, error = %e, "Skipping unreadable tracking entry");
                }
            }
        }
        sort_by_order(&mut entries);
        Ok(entries)
    }

    async fn save(&self, uid: &str, date: &str, entry: &TrackingEntry) -> AppResult<()> {
        let path = paths::tracking_entry(uid, date, &entry.id)?;
        self.store
            .set(&path, serde_json::to_value(entry)?, WriteMode::Merge)
            .await?;
        debug!(
            user.id = %uid,
            workout.date = %date,
            entry.id = %entry.id,
            sets = entry.sets.len(),
            "Tracking entry saved"
        );
        Ok(())
    }

    async fn delete(&self, uid: &str, date: &str, entry_id: &str) -> AppResult<()> {
        self.store
            .delete(&paths::tracking_entry(uid, date, entry_id)?)
            .await?;
        Ok(())
    }

    async fn reorder(&self, uid: &str, date: &str, entry_ids: &[String]) -> AppResult<()> {
        let mut batch = WriteBatch::new();
        for (order, entry_id) in (0_u32..).zip(entry_ids) {
            batch.set(
                paths::tracking_entry(uid, date, entry_id)?,
                json!({ "order": order }),
                WriteMode::Update,
            );
        }
        self.store.commit(batch).await?;
        Ok(())
    }
}
