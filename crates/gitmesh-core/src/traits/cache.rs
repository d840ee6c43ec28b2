// SPDX-FileCopyrightText: 2026 Gitmesh Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent cache trait consumed by the data-fetching layer.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::types::CacheResult;

/// The persistent side cache between the fetching layer and the network.
///
/// Every operation is asynchronous and **non-throwing**: failures degrade
/// to the miss-shaped return value and are logged by the implementation,
/// so call sites need no error handling of their own. A cache failure must
/// never make the application less available than having no cache at all.
///
/// The cache performs no network I/O and no event validation; callers
/// supply already-validated domain payloads and own the TTL policy per
/// event kind.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Write or update one event-derived object under `(kind, event_id)`.
    ///
    /// Rejected with a logged warning (and no storage access) when `kind`
    /// is negative, `event_id` is empty, or `ttl` is zero.
    async fn cache_event(&self, kind: i64, event_id: &str, data: &Value, ttl: Duration);

    /// Read one event-derived object.
    ///
    /// Returns the stored data even past expiry, with `is_stale` set, so
    /// the caller can serve it immediately and refresh in the background.
    /// Refreshes the row's last-access timestamp on a hit.
    async fn get_cached_event(&self, kind: i64, event_id: &str) -> CacheResult<Value>;

    /// Delete cached events of one kind, or all of them when `kind` is
    /// `None`. Never touches cached files.
    async fn invalidate_events(&self, kind: Option<i64>);

    /// Delete all event rows whose expiry has passed. Returns the number
    /// of rows removed. Files have no expiry and are untouched.
    async fn clear_expired(&self) -> u64;

    /// Write or update one immutable file body under
    /// `(transaction_id, path)`. Rejected with a logged warning when
    /// either key component is empty.
    async fn cache_file(&self, transaction_id: &str, path: &str, content: &str);

    /// Read one cached file body, refreshing its last-access timestamp.
    async fn get_cached_file(&self, transaction_id: &str, path: &str) -> Option<String>;

    /// Reclaim storage by deleting the least-recently-used batch from each
    /// table. Returns the total number of rows deleted; `0` on an empty
    /// cache.
    async fn evict_lru(&self) -> u64;
}
