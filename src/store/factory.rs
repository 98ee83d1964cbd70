// ABOUTME: Store factory selecting the in-memory or SQLite backend at runtime
// ABOUTME: Delegating enum so callers hold one concrete, cloneable store type
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Store factory
//!
//! Detects the backend from the store URL and wraps it in [`Store`].

use super::{CollectionPath, DocPath, Document, DocumentStore, MemoryStore, WriteBatch, WriteMode};
#[cfg(feature = "sqlite")]
use super::SqliteStore;
use crate::config::StoreUrl;
use crate::errors::{AppError, AppResult, StoreResult};
use crate::logging::AppLogger;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info};

/// Supported backends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreType {
    /// [`MemoryStore`]
    Memory,
    /// `SqliteStore`
    Sqlite,
}

/// Store instance that delegates to the selected backend
#[derive(Debug, Clone)]
pub enum Store {
    /// Process-local backend
    Memory(MemoryStore),
    /// `SQLite` backend
    #[cfg(feature = "sqlite")]
    Sqlite(SqliteStore),
}

impl Store {
    /// Create a store from a URL string
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for an unsupported URL and the backend error if
    /// the database cannot be opened
    pub async fn new(store_url: &str) -> AppResult<Self> {
        debug!("Detecting store type from URL: {}", store_url);
        let store_type = detect_store_type(store_url)?;
        info!("Detected store type: {:?}", store_type);

        match store_type {
            StoreType::Memory => Ok(Self::Memory(MemoryStore::new())),
            #[cfg(feature = "sqlite")]
            StoreType::Sqlite => Ok(Self::Sqlite(SqliteStore::new(store_url).await?)),
            #[cfg(not(feature = "sqlite"))]
            StoreType::Sqlite => Err(AppError::config(
                "SQLite support not enabled. Enable the 'sqlite' feature flag.",
            )),
        }
    }

    /// Create a store from parsed configuration
    ///
    /// # Errors
    ///
    /// See [`Store::new`]
    pub async fn from_url(url: &StoreUrl) -> AppResult<Self> {
        Self::new(&url.to_connection_string()).await
    }

    /// Fresh in-memory store
    #[must_use]
    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    /// Backend kind
    #[must_use]
    pub const fn store_type(&self) -> StoreType {
        match self {
            Self::Memory(_) => StoreType::Memory,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => StoreType::Sqlite,
        }
    }

    /// Short description for logs
    #[must_use]
    pub const fn backend_info(&self) -> &'static str {
        match self {
            Self::Memory(_) => "In-memory (tests and offline use)",
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => "SQLite (local persistence)",
        }
    }
}

/// Detect the backend from a store URL
///
/// # Errors
///
/// Returns `ConfigError` if the URL is neither `memory://` nor `sqlite:`
pub fn detect_store_type(store_url: &str) -> AppResult<StoreType> {
    if store_url == "memory://" {
        Ok(StoreType::Memory)
    } else if store_url.starts_with("sqlite:") {
        Ok(StoreType::Sqlite)
    } else {
        Err(AppError::config(format!(
            "Unsupported store URL format: {store_url}. \
             Supported formats: memory://, sqlite:path/to/db.sqlite, sqlite::memory:"
        )))
    }
}

#[async_trait]
impl DocumentStore for Store {
    async fn get(&self, path: &DocPath) -> StoreResult<Option<Value>> {
        match self {
            Self::Memory(store) => store.get(path).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(store) => store.get(path).await,
        }
    }

    async fn set(&self, path: &DocPath, data: Value, mode: WriteMode) -> StoreResult<()> {
        match self {
            Self::Memory(store) => store.set(path, data, mode).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(store) => store.set(path, data, mode).await,
        }
    }

    async fn delete(&self, path: &DocPath) -> StoreResult<()> {
        match self {
            Self::Memory(store) => store.delete(path).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(store) => store.delete(path).await,
        }
    }

    async fn list(&self, collection: &CollectionPath) -> StoreResult<Vec<Document>> {
        match self {
            Self::Memory(store) => store.list(collection).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(store) => store.list(collection).await,
        }
    }

    async fn query_eq(
        &self,
        collection: &CollectionPath,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>> {
        match self {
            Self::Memory(store) => store.query_eq(collection, field, value).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(store) => store.query_eq(collection, field, value).await,
        }
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        let target = format!("{} writes", batch.len());
        let start = Instant::now();
        let result = match self {
            Self::Memory(store) => store.commit(batch).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(store) => store.commit(batch).await,
        };
        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        AppLogger::log_store_operation("commit", &target, result.is_ok(), duration_ms);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_store_type() {
        assert_eq!(detect_store_type("memory://").unwrap(), StoreType::Memory);
        assert_eq!(detect_store_type("sqlite::memory:").unwrap(), StoreType::Sqlite);
        assert_eq!(detect_store_type("sqlite:./x.db").unwrap(), StoreType::Sqlite);
        assert!(detect_store_type("postgres://db").is_err());
    }

    #[tokio::test]
    async fn test_memory_factory() {
        let store = Store::new("memory://").await.unwrap();
        assert_eq!(store.store_type(), StoreType::Memory);
    }
}
