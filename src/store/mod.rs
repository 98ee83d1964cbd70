// ABOUTME: Document store abstraction with in-memory and SQLite backends
// ABOUTME: Get, set (replace/merge/update), delete, list, equality query and atomic batches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Document Store
//!
//! Documents are JSON objects addressed by slash-separated paths (see
//! [`paths`]). Deleting a document never touches its sub-collections; callers
//! that want a cascade delete the children explicitly.

/// Runtime backend selection from a store URL
pub mod factory;
/// Process-local backend
pub mod memory;
/// Typed path builders for the per-user layout
pub mod paths;
/// `SQLite` backend
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use factory::{detect_store_type, Store, StoreType};
pub use memory::MemoryStore;
pub use paths::{CollectionPath, DocPath};
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use crate::errors::{StoreError, StoreResult};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// How a write combines with an existing document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Overwrite the whole document, creating it if absent
    Replace,
    /// Deep-merge into the existing document, creating it if absent
    Merge,
    /// Deep-merge into the existing document, failing if absent
    Update,
}

/// A stored document
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// Last path segment
    pub id: String,
    /// Document body
    pub data: Value,
}

/// One operation inside a [`WriteBatch`]
#[derive(Debug, Clone, PartialEq)]
pub enum BatchOp {
    /// Write a document
    Set {
        /// Target document
        path: DocPath,
        /// Body
        data: Value,
        /// Write mode
        mode: WriteMode,
    },
    /// Remove a document
    Delete {
        /// Target document
        path: DocPath,
    },
}

impl BatchOp {
    /// Target document
    #[must_use]
    pub const fn path(&self) -> &DocPath {
        match self {
            Self::Set { path, .. } | Self::Delete { path } => path,
        }
    }
}

/// Writes applied all-or-nothing by [`DocumentStore::commit`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WriteBatch {
    ops: Vec<BatchOp>,
}

impl WriteBatch {
    /// Empty batch
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a write
    pub fn set(&mut self, path: DocPath, data: Value, mode: WriteMode) -> &mut Self {
        self.ops.push(BatchOp::Set { path, data, mode });
        self
    }

    /// Queue a delete
    pub fn delete(&mut self, path: DocPath) -> &mut Self {
        self.ops.push(BatchOp::Delete { path });
        self
    }

    /// Queued operations in order
    #[must_use]
    pub fn ops(&self) -> &[BatchOp] {
        &self.ops
    }

    /// Number of queued operations
    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Whether nothing is queued
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Take the queued operations
    #[must_use]
    pub fn into_ops(self) -> Vec<BatchOp> {
        self.ops
    }
}

/// Capability interface every backend implements
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document
    async fn get(&self, path: &DocPath) -> StoreResult<Option<Value>>;

    /// Write one document
    async fn set(&self, path: &DocPath, data: Value, mode: WriteMode) -> StoreResult<()>;

    /// Remove one document; removing a missing document succeeds
    async fn delete(&self, path: &DocPath) -> StoreResult<()>;

    /// All documents directly inside a collection, ordered by id
    async fn list(&self, collection: &CollectionPath) -> StoreResult<Vec<Document>>;

    /// Documents whose top-level `field` equals `value`
    async fn query_eq(
        &self,
        collection: &CollectionPath,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>> {
        Ok(self
            .list(collection)
            .await?
            .into_iter()
            .filter(|doc| doc.data.get(field) == Some(value))
            .collect())
    }

    /// Apply every operation or none
    async fn commit(&self, batch: WriteBatch) -> StoreResult<()>;
}

/// Deep-merge `patch` into `target`
///
/// Objects merge key by key, recursively; any other value replaces the target.
pub fn merge_json(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target_map), Value::Object(patch_map)) => {
            for (key, value) in patch_map {
                match target_map.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        target_map.insert(key, value);
                    }
                }
            }
        }
        (target, patch) => *target = patch,
    }
}

/// Compute the stored body for a write given the current body
///
/// # Errors
///
/// Returns `NotFound` for an update of a missing document and
/// `WriteFailed` when the body is not a JSON object
pub fn apply_write(
    path: &DocPath,
    current: Option<Value>,
    data: Value,
    mode: WriteMode,
) -> StoreResult<Value> {
    if !data.is_object() {
        return Err(StoreError::write(format!(
            "document body for {path} must be a JSON object"
        )));
    }
    match (mode, current) {
        (WriteMode::Replace, _) | (WriteMode::Merge, None) => Ok(data),
        (WriteMode::Merge | WriteMode::Update, Some(mut existing)) => {
            if !existing.is_object() {
                existing = Value::Object(Map::new());
            }
            merge_json(&mut existing, data);
            Ok(existing)
        }
        (WriteMode::Update, None) => Err(StoreError::NotFound {
            path: path.to_string(),
        }),
    }
}
