// SPDX-FileCopyrightText: 2026 Gitmesh Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Database connection management with PRAGMA setup, WAL mode, and lifecycle.
//!
//! All operations are serialized through tokio-rusqlite's single background
//! thread. Do NOT create additional Connection instances for writes.

use std::path::Path;
use std::time::Duration;

use tokio_rusqlite::Connection;
use tracing::debug;

use gitmesh_core::GitmeshError;

use crate::migrations;

/// Handle to the cache database.
///
/// Wraps a single `tokio_rusqlite::Connection`. Query modules accept
/// `&Database` and go through [`Database::connection`]; the background
/// thread serializes every closure, so single-statement operations and
/// explicit transactions are atomic with respect to other callers.
/// Clones share the same background connection.
#[derive(Clone)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the cache database at `path`, creating parent directories and
    /// the file as needed, then apply PRAGMA setup and run embedded
    /// migrations.
    pub async fn open(path: &str, wal_mode: bool) -> Result<Self, GitmeshError> {
        if let Some(parent) = Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| GitmeshError::Storage {
                    source: Box::new(e),
                })?;
            }
        }

        let conn = Connection::open(path)
            .await
            .map_err(|e| map_tr_err(e.into()))?;

        conn.call(move |conn| {
            if wal_mode {
                conn.pragma_update_and_check(None, "journal_mode", "WAL", |_row| Ok(()))?;
                conn.pragma_update(None, "synchronous", "NORMAL")?;
            }
            conn.pragma_update(None, "foreign_keys", "ON")?;
            conn.busy_timeout(Duration::from_secs(5))?;
            Ok(())
        })
        .await
        .map_err(map_tr_err)?;

        conn.call(|conn| Ok(migrations::run_migrations(conn)))
            .await
            .map_err(map_tr_err)??;

        debug!(path, "cache database opened");
        Ok(Self { conn })
    }

    /// Access the underlying connection handle.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Checkpoint the WAL and close the underlying connection.
    ///
    /// After this returns, operations on any clone of this handle fail
    /// with a closed-connection error.
    pub async fn close(&self) -> Result<(), GitmeshError> {
        self.conn
            .call(|conn| {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(map_tr_err)?;
        self.conn.clone().close().await.map_err(map_tr_err)?;
        debug!("cache database closed");
        Ok(())
    }
}

/// Map a tokio-rusqlite error into the core storage error.
pub(crate) fn map_tr_err(err: tokio_rusqlite::Error) -> GitmeshError {
    GitmeshError::Storage {
        source: Box::new(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;
    use tempfile::tempdir;

    #[tokio::test]
    async fn open_creates_database_file_and_schema() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("open_test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        assert!(db_path.exists());

        // Both tables exist after migration.
        let tables: i64 = db
            .connection()
            .call(|conn| {
                let count = conn.query_row(
                    "SELECT COUNT(*) FROM sqlite_master
                     WHERE type = 'table' AND name IN ('events', 'files')",
                    [],
                    |row| row.get(0),
                )?;
                Ok::<i64, rusqlite::Error>(count)
            })
            .await
            .unwrap();
        assert_eq!(tables, 2);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn open_creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("nested/dirs/cache.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        assert!(db_path.exists());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn reopen_is_idempotent() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("reopen.db");

        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        db.close().await.unwrap();

        // Migrations already applied; reopening must not fail.
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn calls_after_close_fail() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("closed.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        db.close().await.unwrap();

        let result = db
            .connection()
            .call(|conn| {
                conn.execute("DELETE FROM events", [])?;
                Ok::<(), rusqlite::Error>(())
            })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn concurrent_writers_no_sqlite_busy() {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("concurrent.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();

        // Spawn 10 concurrent tasks all writing through the same Database.
        let mut handles = Vec::new();
        for i in 0..10 {
            let conn = db.connection().clone();
            let handle = tokio::spawn(async move {
                conn.call(move |conn| {
                    conn.execute(
                        "INSERT INTO files (transaction_id, path, content, cached_at, last_accessed_at)
                         VALUES (?1, ?2, ?3, ?4, ?4)",
                        params![format!("tx-{i}"), "README.md", "contents", i],
                    )?;
                    Ok::<(), rusqlite::Error>(())
                })
                .await
            });
            handles.push(handle);
        }

        // All should complete without SQLITE_BUSY.
        for handle in handles {
            let result = handle.await.unwrap();
            assert!(result.is_ok(), "concurrent write failed: {result:?}");
        }

        let count: i64 = db
            .connection()
            .call(|conn| {
                let count = conn.query_row("SELECT COUNT(*) FROM files", [], |row| row.get(0))?;
                Ok::<i64, rusqlite::Error>(count)
            })
            .await
            .unwrap();
        assert_eq!(count, 10);

        db.close().await.unwrap();
    }
}
