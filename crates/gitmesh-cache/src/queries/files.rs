// SPDX-FileCopyrightText: 2026 Gitmesh Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-cache operations.
//!
//! Content at a given `(transaction_id, path)` is immutable by
//! construction, so rows carry no expiry; only LRU eviction removes them.

use gitmesh_core::GitmeshError;
use rusqlite::params;

use crate::database::Database;
use crate::models::CachedFile;
use crate::queries::now_ms;

/// Write or update the row for `(transaction_id, path)`.
pub async fn upsert_file(
    db: &Database,
    transaction_id: &str,
    path: &str,
    content: &str,
) -> Result<(), GitmeshError> {
    let transaction_id = transaction_id.to_string();
    let path = path.to_string();
    let content = content.to_string();
    db.connection()
        .call(move |conn| {
            let now = now_ms();
            conn.execute(
                "INSERT INTO files (transaction_id, path, content, cached_at, last_accessed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 ON CONFLICT (transaction_id, path) DO UPDATE SET
                     content = excluded.content,
                     cached_at = excluded.cached_at,
                     last_accessed_at = excluded.last_accessed_at",
                params![transaction_id, path, content, now, now],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch the row for `(transaction_id, path)`, refreshing its last-access
/// timestamp in the same transaction. Returns `None` on a miss.
pub async fn get_file(
    db: &Database,
    transaction_id: &str,
    path: &str,
) -> Result<Option<CachedFile>, GitmeshError> {
    let transaction_id = transaction_id.to_string();
    let path = path.to_string();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;

            let result = {
                let mut stmt = tx.prepare(
                    "SELECT id, transaction_id, path, content, cached_at, last_accessed_at
                     FROM files WHERE transaction_id = ?1 AND path = ?2",
                )?;
                stmt.query_row(params![transaction_id, path], |row| {
                    Ok(CachedFile {
                        id: Some(row.get(0)?),
                        transaction_id: row.get(1)?,
                        path: row.get(2)?,
                        content: row.get(3)?,
                        cached_at: row.get(4)?,
                        last_accessed_at: row.get(5)?,
                    })
                })
            };

            match result {
                Ok(mut file) => {
                    let now = now_ms();
                    tx.execute(
                        "UPDATE files SET last_accessed_at = ?1 WHERE id = ?2",
                        params![now, file.id],
                    )?;
                    tx.commit()?;
                    file.last_accessed_at = now;
                    Ok(Some(file))
                }
                Err(rusqlite::Error::QueryReturnedNoRows) => {
                    tx.commit()?;
                    Ok(None)
                }
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    async fn setup_db() -> (Database, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let db_path = dir.path().join("test.db");
        let db = Database::open(db_path.to_str().unwrap(), true).await.unwrap();
        (db, dir)
    }

    async fn count_files(db: &Database) -> i64 {
        db.connection()
            .call(|conn| {
                let count = conn.query_row("SELECT COUNT(*) FROM files", [], |row| row.get(0))?;
                Ok::<i64, rusqlite::Error>(count)
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn upsert_and_get_roundtrips() {
        let (db, _dir) = setup_db().await;

        upsert_file(&db, "tx-1", "src/main.rs", "fn main() {}")
            .await
            .unwrap();

        let file = get_file(&db, "tx-1", "src/main.rs").await.unwrap().unwrap();
        assert_eq!(file.transaction_id, "tx-1");
        assert_eq!(file.path, "src/main.rs");
        assert_eq!(file.content, "fn main() {}");
        assert!(file.id.is_some());

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_missing_returns_none() {
        let (db, _dir) = setup_db().await;
        let result = get_file(&db, "tx-1", "no/such/file").await.unwrap();
        assert!(result.is_none());
        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn upsert_same_key_leaves_one_row() {
        let (db, _dir) = setup_db().await;

        upsert_file(&db, "tx-1", "README.md", "v1").await.unwrap();
        let first = get_file(&db, "tx-1", "README.md").await.unwrap().unwrap();

        upsert_file(&db, "tx-1", "README.md", "v2").await.unwrap();
        let second = get_file(&db, "tx-1", "README.md").await.unwrap().unwrap();

        assert_eq!(count_files(&db).await, 1);
        assert_eq!(second.content, "v2");
        assert_eq!(first.id, second.id);

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn same_path_under_different_transactions_is_two_rows() {
        let (db, _dir) = setup_db().await;

        upsert_file(&db, "tx-1", "README.md", "old").await.unwrap();
        upsert_file(&db, "tx-2", "README.md", "new").await.unwrap();

        assert_eq!(count_files(&db).await, 2);
        let old = get_file(&db, "tx-1", "README.md").await.unwrap().unwrap();
        assert_eq!(old.content, "old");

        db.close().await.unwrap();
    }

    #[tokio::test]
    async fn get_refreshes_last_accessed_at() {
        let (db, _dir) = setup_db().await;

        upsert_file(&db, "tx-1", "README.md", "contents").await.unwrap();

        db.connection()
            .call(|conn| {
                conn.execute("UPDATE files SET last_accessed_at = 1000", [])?;
                Ok::<(), rusqlite::Error>(())
            })
            .await
            .unwrap();

        let file = get_file(&db, "tx-1", "README.md").await.unwrap().unwrap();
        assert!(file.last_accessed_at > 1000);

        db.close().await.unwrap();
    }
}
