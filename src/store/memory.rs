// ABOUTME: In-memory document store for tests and offline use
// ABOUTME: Collections of JSON documents behind a shared async lock
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    apply_write, BatchOp, CollectionPath, DocPath, Document, DocumentStore, WriteBatch, WriteMode,
};
use crate::errors::StoreResult;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

type Collections = BTreeMap<CollectionPath, BTreeMap<String, Value>>;

/// Process-local store; clones share the same data
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    collections: Arc<RwLock<Collections>>,
}

impl MemoryStore {
    /// Empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored documents
    pub async fn document_count(&self) -> usize {
        self.collections
            .read()
            .await
            .values()
            .map(BTreeMap::len)
            .sum()
    }
}

fn write_into(
    collections: &mut Collections,
    path: &DocPath,
    data: Value,
    mode: WriteMode,
) -> StoreResult<()> {
    let current = collections
        .get(path.collection())
        .and_then(|docs| docs.get(path.id()))
        .cloned();
    let body = apply_write(path, current, data, mode)?;
    collections
        .entry(path.collection().clone())
        .or_default()
        .insert(path.id().to_owned(), body);
    Ok(())
}

fn delete_from(collections: &mut Collections, path: &DocPath) {
    if let Some(docs) = collections.get_mut(path.collection()) {
        docs.remove(path.id());
        if docs.is_empty() {
            collections.remove(path.collection());
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &DocPath) -> StoreResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(path.collection())
            .and_then(|docs| docs.get(path.id()))
            .cloned())
    }

    async fn set(&self, path: &DocPath, data: Value, mode: WriteMode) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        write_into(&mut collections, path, data, mode)?;
        debug!(path = %path, ?mode, "memory store write");
        Ok(())
    }

    async fn delete(&self, path: &DocPath) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        delete_from(&mut collections, path);
        debug!(path = %path, "memory store delete");
        Ok(())
    }

    async fn list(&self, collection: &CollectionPath) -> StoreResult<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .map(|(id, data)| Document {
                        id: id.clone(),
                        data: data.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        // Stage on a copy so a failing op leaves the store untouched
        let mut staged = collections.clone();
        let op_count = batch.len();
        for op in batch.into_ops() {
            match op {
                BatchOp::Set { path, data, mode } => write_into(&mut staged, &path, data, mode)?,
                BatchOp::Delete { path } => delete_from(&mut staged, &path),
            }
        }
        *collections = staged;
        debug!(op_count, "memory store batch committed");
        Ok(())
    }
}
