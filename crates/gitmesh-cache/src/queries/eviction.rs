// SPDX-FileCopyrightText: 2026 Gitmesh Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! LRU eviction across both cache tables.

use gitmesh_core::GitmeshError;
use rusqlite::params;

use crate::database::Database;

/// Delete up to `batch_size` least-recently-used rows from each table.
///
/// The two tables are batched independently so one frequently-read entity
/// type cannot starve the other of reclaimable space. Ties on
/// `last_accessed_at` are broken by surrogate id, oldest first. Returns
/// the per-table `(events, files)` deletion counts; `(0, 0)` on an empty
/// cache.
pub async fn evict_lru(db: &Database, batch_size: usize) -> Result<(usize, usize), GitmeshError> {
    let batch = batch_size as i64;
    db.connection()
        .call(move |conn| {
            let events = conn.execute(
                "DELETE FROM events WHERE id IN (
                     SELECT id FROM events
                     ORDER BY last_accessed_at ASC, id ASC
                     LIMIT ?1
                 )",
                params![batch],
            )?;
            let files = conn.execute(
                "DELETE FROM files WHERE id IN (
                     SELECT id FROM files
                     ORDER BY last_accessed_at ASC, id ASC
                     LIMIT ?1
                 )",
                params![batch],
            )?;
            Ok((events, files))
        })
        .await
        .map_err(crate::database::map_tr_err)
}
