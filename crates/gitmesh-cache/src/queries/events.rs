// SPDX-FileCopyrightText: 2026 Gitmesh Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Event-cache operations: TTL upserts, stale-aware reads, invalidation,
//! and expiry sweeps.

use gitmesh_core::GitmeshError;
use rusqlite::params;

use crate::database::Database;
use crate::models::CachedEvent;
use crate::queries::now_ms;

/// Write or update the row for `(kind, event_id)`.
///
/// A single upsert statement keyed on the compound unique index; an
/// existing row keeps its surrogate id and gets a fresh payload and fresh
/// timestamps. `expires_at` is set to `now + ttl_ms`.
pub async fn upsert_event(
    db: &Database,
    kind: i64,
    event_id: &str,
    data: &str,
    ttl_ms: i64,
) -> Result<(), GitmeshError> {
    let event_id = event_id.to_string();
    let data = data.to_string();
    db.connection()
        .call(move |conn| {
            let now = now_ms();
            conn.execute(
                "INSERT INTO events (kind, event_id, data, cached_at, expires_at, last_accessed_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                 ON CONFLICT (kind, event_id) DO UPDATE SET
                     data = excluded.data,
                     cached_at = excluded.cached_at,
                     expires_at = excluded.expires_at,
                     last_accessed_at = excluded.last_accessed_at",
                params![kind, event_id, data, now, now.saturating_add(ttl_ms), now],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Fetch the row for `(kind, event_id)`, refreshing its last-access
/// timestamp in the same transaction (the LRU touch). Returns `None` on a
/// miss. Expired rows are returned like any other; staleness is the
/// caller's read-time computation.
pub async fn get_event(
    db: &Database,
    kind: i64,
    event_id: &str,
) -> Result<Option<CachedEvent>, GitmeshError> {
    let event_id = event_id.to_string();
    db.connection()
        .call(move |conn| {
            let tx = conn.transaction()?;

            let result = {
                let mut stmt = tx.prepare(
                    "SELECT id, kind, event_id, data, cached_at, expires_at, last_accessed_at
                     FROM events WHERE kind = ?1 AND event_id = ?2",
                )?;
                stmt.query_row(params![kind, event_id], |row| {
                    let raw: String = row.get(3)?;
                    let data = serde_json::from_str(&raw).map_err(|e| {
                        rusqlite::Error::FromSqlConversionFailure(
                            3,
                            rusqlite::types::Type::Text,
                            Box::new(e),
                        )
                    })?;
                    Ok(CachedEvent {
                        id: Some(row.get(0)?),
                        kind: row.get(1)?,
                        event_id: row.get(2)?,
                        data,
                        cached_at: row.get(4)?,
                        expires_at: row.get(5)?,
                        last_accessed_at: row.get(6)?,
                    })
                })
            };

            match result {
                Ok(mut event) => {
                    let now = now_ms();
                    tx.execute(
                        "UPDATE events SET last_accessed_at = ?1 WHERE id = ?2",
                        params![now, event.id],
                    )?;
                    tx.commit()?;
                    event.last_accessed_at = now;
                    Ok(Some(event))
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

/// Delete event rows of one kind, or every event row when `kind` is
/// `None`. Returns the number of rows deleted. Files are never touched.
pub async fn invalidate(db: &Database, kind: Option<i64>) -> Result<usize, GitmeshError> {
    db.connection()
        .call(move |conn| {
            let deleted = match kind {
                Some(kind) => conn.execute("DELETE FROM events WHERE kind = ?1", params![kind])?,
                None => conn.execute("DELETE FROM events", [])?,
            };
            Ok(deleted)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Delete all event rows whose expiry is strictly in the past. Pure
/// TTL-based reclamation; access recency is not considered.
pub async fn delete_expired(db: &Database) -> Result<usize, GitmeshError> {
    db.connection()
        .call(|conn| {
            let deleted = conn.execute(
                "DELETE FROM events WHERE expires_at < ?1",
                params![now_ms()],
            )?;
            Ok(deleted)
        })
        .await
        .map_err(crate::database::map_tr_err)
}
