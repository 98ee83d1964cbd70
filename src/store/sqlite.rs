// ABOUTME: SQLite-backed document store using sqlx
// ABOUTME: One row per document, merges and batches run inside transactions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    apply_write, BatchOp, CollectionPath, DocPath, Document, DocumentStore, WriteBatch, WriteMode,
};
use crate::constants::collections::SCHEMA_VERSION;
use crate::errors::{StoreError, StoreResult};
use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqliteConnection, SqlitePool};
use std::str::FromStr;
use tracing::{debug, info};

/// Document store persisted in a `SQLite` database
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connect and run migrations
    ///
    /// `sqlite::memory:` is limited to one pooled connection so every query
    /// sees the same database.
    ///
    /// # Errors
    ///
    /// Returns `ReadFailed` if the database cannot be opened or migrated
    pub async fn new(database_url: &str) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(StoreError::read)?
            .create_if_missing(true);

        let is_memory = database_url.contains(":memory:");
        let pool = SqlitePoolOptions::new()
            .max_connections(if is_memory { 1 } else { 5 })
            .connect_with(options)
            .await
            .map_err(StoreError::read)?;

        let store = Self { pool };
        store.migrate().await?;
        info!(database_url, "SQLite document store ready");
        Ok(store)
    }

    /// Underlying pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create tables if they do not exist and record the schema version
    ///
    /// # Errors
    ///
    /// Returns `WriteFailed` if a statement fails
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                doc_id TEXT NOT NULL,
                data TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                PRIMARY KEY (collection, doc_id)
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(StoreError::write)?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS store_meta (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(StoreError::write)?;

        sqlx::query("INSERT OR IGNORE INTO store_meta (key, value) VALUES ('schema_version', ?1)")
            .bind(SCHEMA_VERSION.to_string())
            .execute(&self.pool)
            .await
            .map_err(StoreError::write)?;

        Ok(())
    }

    /// Schema version recorded in the database
    ///
    /// # Errors
    ///
    /// Returns `ReadFailed` if the metadata row cannot be read
    pub async fn schema_version(&self) -> StoreResult<Option<u32>> {
        let row = sqlx::query("SELECT value FROM store_meta WHERE key = 'schema_version'")
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::read)?;

        row.map(|row| {
            let value: String = row.try_get("value").map_err(StoreError::read)?;
            value.parse::<u32>().map_err(StoreError::read)
        })
        .transpose()
    }
}

async fn read_doc(conn: &mut SqliteConnection, path: &DocPath) -> StoreResult<Option<Value>> {
    let row = sqlx::query("SELECT data FROM documents WHERE collection = ?1 AND doc_id = ?2")
        .bind(path.collection().as_str())
        .bind(path.id())
        .fetch_optional(&mut *conn)
        .await
        .map_err(StoreError::read)?;

    match row {
        Some(row) => {
            let data: String = row.try_get("data").map_err(StoreError::read)?;
            Ok(Some(serde_json::from_str(&data)?))
        }
        None => Ok(None),
    }
}

async fn write_doc(
    conn: &mut SqliteConnection,
    path: &DocPath,
    data: Value,
    mode: WriteMode,
) -> StoreResult<()> {
    let current = match mode {
        WriteMode::Replace => None,
        WriteMode::Merge | WriteMode::Update => read_doc(conn, path).await?,
    };
    let body = apply_write(path, current, data, mode)?;

    sqlx::query(
        r"
        INSERT INTO documents (collection, doc_id, data, updated_at)
        VALUES (?1, ?2, ?3, ?4)
        ON CONFLICT(collection, doc_id) DO UPDATE SET
            data = excluded.data,
            updated_at = excluded.updated_at
        ",
    )
    .bind(path.collection().as_str())
    .bind(path.id())
    .bind(serde_json::to_string(&body)?)
    .bind(Utc::now().to_rfc3339())
    .execute(&mut *conn)
    .await
    .map_err(StoreError::write)?;

    Ok(())
}

async fn delete_doc(conn: &mut SqliteConnection, path: &DocPath) -> StoreResult<()> {
    sqlx::query("DELETE FROM documents WHERE collection = ?1 AND doc_id = ?2")
        .bind(path.collection().as_str())
        .bind(path.id())
        .execute(&mut *conn)
        .await
        .map_err(StoreError::write)?;
    Ok(())
}

#[async_trait]
impl DocumentStore for SqliteStore {
    async fn get(&self, path: &DocPath) -> StoreResult<Option<Value>> {
        let mut conn = self.pool.acquire().await.map_err(StoreError::read)?;
        read_doc(&mut conn, path).await
    }

    async fn set(&self, path: &DocPath, data: Value, mode: WriteMode) -> StoreResult<()> {
        let mut tx = self.pool.begin().await.map_err(StoreError::write)?;
        write_doc(&mut tx, path, data, mode).await?;
        tx.commit().await.map_err(StoreError::write)?;
        debug!(path = %path, ?mode, "sqlite store write");
        Ok(())
    }

    async fn delete(&self, path: &DocPath) -> StoreResult<()> {
        let mut conn = self.pool.acquire().await.map_err(StoreError::write)?;
        delete_doc(&mut conn, path).await?;
        debug!(path = %path, "sqlite store delete");
        Ok(())
    }

    async fn list(&self, collection: &CollectionPath) -> StoreResult<Vec<Document>> {
        let rows = sqlx::query(
            "SELECT doc_id, data FROM documents WHERE collection = ?1 ORDER BY doc_id",
        )
        .bind(collection.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::read)?;

        rows.into_iter()
            .map(|row| {
                let id: String = row.try_get("doc_id").map_err(StoreError::read)?;
                let data: String = row.try_get("data").map_err(StoreError::read)?;
                Ok(Document {
                    id,
                    data: serde_json::from_str(&data)?,
                })
            })
            .collect()
    }

    async fn query_eq(
        &self,
        collection: &CollectionPath,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Document>> {
        let json_path = format!("$.{field}");
        let rows = sqlx::query(
            r"
            SELECT doc_id, data FROM documents
            WHERE collection = ?1 AND json_extract(data, ?2) IS NOT NULL
            ORDER BY doc_id
            ",
        )
        .bind(collection.as_str())
        .bind(json_path)
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::read)?;

        let mut documents = Vec::new();
        for row in rows {
            let id: String = row.try_get("doc_id").map_err(StoreError::read)?;
            let data: String = row.try_get("data").map_err(StoreError::read)?;
            let data: Value = serde_json::from_str(&data)?;
            // json_extract flattens types, so compare the decoded value exactly
            if data.get(field) == Some(value) {
                documents.push(Document { id, data });
            }
        }
        Ok(documents)
    }

    async fn commit(&self, batch: WriteBatch) -> StoreResult<()> {
        let op_count = batch.len();
        let mut tx = self.pool.begin().await.map_err(StoreError::write)?;
        for op in batch.into_ops() {
            match op {
                BatchOp::Set { path, data, mode } => write_doc(&mut tx, &path, data, mode).await?,
                BatchOp::Delete { path } => delete_doc(&mut tx, &path).await?,
            }
        }
        tx.commit().await.map_err(StoreError::write)?;
        debug!(op_count, "sqlite store batch committed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::paths;
    use serde_json::json;

    #[tokio::test]
    async fn test_merge_and_schema_version() {
        let store = SqliteStore::new("sqlite::memory:").await.unwrap();
        assert_eq!(store.schema_version().await.unwrap(), Some(SCHEMA_VERSION));

        let path = paths::user_doc("u1").unwrap();
        store
            .set(&path, json!({ "height": { "feet": 6 }, "weight": 180 }), WriteMode::Replace)
            .await
            .unwrap();
        store
            .set(&path, json!({ "height": { "inches": 1 } }), WriteMode::Merge)
            .await
            .unwrap();

        assert_eq!(
            store.get(&path).await.unwrap(),
            Some(json!({ "height": { "feet": 6, "inches": 1 }, "weight": 180 }))
        );
    }

    #[tokio::test]
    async fn test_failed_batch_rolls_back() {
        let store = SqliteStore::new("sqlite::memory:").await.unwrap();
        let day = paths::muscle_tag_day("u1", 1).unwrap();
        store.set(&day, json!({ "tags": ["Abs"] }), WriteMode::Replace).await.unwrap();

        let mut batch = WriteBatch::new();
        batch
            .delete(day.clone())
            .set(
                paths::workout("u1", "2024-01-01").unwrap(),
                json!({ "isFinished": true }),
                WriteMode::Update,
            );

        assert!(store.commit(batch).await.is_err());
        assert_eq!(store.get(&day).await.unwrap(), Some(json!({ "tags": ["Abs"] })));
    }
}
