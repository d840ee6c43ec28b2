// SPDX-FileCopyrightText: 2026 Gitmesh Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared across the Gitmesh client crates.
//!
//! The persistent cache stores two kinds of rows: domain objects derived
//! from signed network events (with a TTL), and immutable file bodies
//! fetched from content-addressed storage (no TTL). Both carry epoch
//! millisecond timestamps; `last_accessed_at` drives LRU eviction.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One cached domain object derived from a network event.
///
/// At most one row exists per `(kind, event_id)` pair; writes are upserts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedEvent {
    /// Engine-assigned surrogate key. `None` before the first write.
    pub id: Option<i64>,
    /// Semantic type tag of the cached object (repository, issue, ...).
    /// Always >= 0 for a stored row.
    pub kind: i64,
    /// Immutable identifier of the originating event.
    pub event_id: String,
    /// Opaque, already-validated domain payload. The cache does not
    /// interpret its shape.
    pub data: Value,
    /// Absolute write timestamp, milliseconds since epoch.
    pub cached_at: i64,
    /// Absolute expiry timestamp: `cached_at + ttl`.
    pub expires_at: i64,
    /// Timestamp of the most recent read or write.
    pub last_accessed_at: i64,
}

/// One immutable file body fetched from content-addressed storage.
///
/// Content at a given `(transaction_id, path)` never changes, so there is
/// no expiry; only LRU eviction removes a row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedFile {
    /// Engine-assigned surrogate key. `None` before the first write.
    pub id: Option<i64>,
    /// Identifier of the immutable content bundle containing this path.
    pub transaction_id: String,
    /// File path within the content bundle.
    pub path: String,
    /// File body.
    pub content: String,
    /// Absolute write timestamp, milliseconds since epoch.
    pub cached_at: i64,
    /// Timestamp of the most recent read or write.
    pub last_accessed_at: i64,
}

/// Read-time wrapper implementing stale-while-revalidate.
///
/// `data` is returned even past expiry; `is_stale` signals the caller to
/// trigger a background refresh. A miss is `{ data: None, is_stale: false }`
/// -- absence is never "stale".
#[derive(Debug, Clone, PartialEq)]
pub struct CacheResult<T> {
    pub data: Option<T>,
    pub is_stale: bool,
}

impl<T> CacheResult<T> {
    /// A cache miss (also the degraded result on storage failure).
    pub fn miss() -> Self {
        Self {
            data: None,
            is_stale: false,
        }
    }

    /// A cache hit. `is_stale` is computed by the reader from the row's
    /// expiry; the data is returned either way.
    pub fn hit(data: T, is_stale: bool) -> Self {
        Self {
            data: Some(data),
            is_stale,
        }
    }

    /// True when the result carries data, stale or not.
    pub fn is_hit(&self) -> bool {
        self.data.is_some()
    }
}
