// SPDX-FileCopyrightText: 2026 Gitmesh Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the `CacheStore` trait.
//!
//! This is the no-throw edge of the cache: query modules return explicit
//! `Result`s internally, and this layer collapses every failure to the
//! miss-shaped value with a logged warning. A broken cache must behave
//! exactly like a cold one -- the fetching layer above falls through to
//! the network path either way.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use gitmesh_config::CacheConfig;
use gitmesh_core::{CacheResult, CacheStore, GitmeshError};

use crate::database::Database;
use crate::queries;

/// SQLite-backed persistent cache.
///
/// Wraps a [`Database`] handle and delegates to the typed query modules.
/// The database is opened once, on the first call to
/// [`SqliteCache::initialize`], and held for the process lifetime. The
/// seven `CacheStore` operations never propagate errors; only the
/// lifecycle methods return `Result`.
pub struct SqliteCache {
    config: CacheConfig,
    db: OnceCell<Database>,
}

impl SqliteCache {
    /// Create a new cache service with the given configuration.
    ///
    /// The database is not opened until [`SqliteCache::initialize`] is
    /// called.
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Open the database at the configured path and run migrations.
    pub async fn initialize(&self) -> Result<(), GitmeshError> {
        let db = Database::open(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| GitmeshError::Storage {
            source: "cache already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "cache storage initialized");
        Ok(())
    }

    /// Checkpoint the WAL and close the database.
    pub async fn close(&self) -> Result<(), GitmeshError> {
        self.db()?.close().await
    }

    /// Returns the underlying database, or an error if not initialized.
    fn db(&self) -> Result<&Database, GitmeshError> {
        self.db.get().ok_or_else(|| GitmeshError::Storage {
            source: "cache not initialized -- call initialize() first".into(),
        })
    }
}

#[async_trait]
impl CacheStore for SqliteCache {
    async fn cache_event(&self, kind: i64, event_id: &str, data: &Value, ttl: Duration) {
        if kind < 0 || event_id.is_empty() || ttl.is_zero() {
            warn!(
                kind,
                event_id,
                ttl_ms = ttl.as_millis() as u64,
                "rejected event cache write: invalid key or ttl"
            );
            return;
        }
        let db = match self.db() {
            Ok(db) => db,
            Err(e) => {
                warn!(error = %e, kind, event_id, "event cache write degraded");
                return;
            }
        };
        let ttl_ms = ttl.as_millis().min(i64::MAX as u128) as i64;
        let payload = data.to_string();
        if let Err(e) = queries::events::upsert_event(db, kind, event_id, &payload, ttl_ms).await {
            warn!(error = %e, kind, event_id, "event cache write degraded");
        }
    }

    async fn get_cached_event(&self, kind: i64, event_id: &str) -> CacheResult<Value> {
        let db = match self.db() {
            Ok(db) => db,
            Err(e) => {
                warn!(error = %e, kind, event_id, "event cache read degraded to miss");
                return CacheResult::miss();
            }
        };
        match queries::events::get_event(db, kind, event_id).await {
            Ok(Some(event)) => {
                let is_stale = queries::now_ms() > event.expires_at;
                CacheResult::hit(event.data, is_stale)
            }
            Ok(None) => CacheResult::miss(),
            Err(e) => {
                warn!(error = %e, kind, event_id, "event cache read degraded to miss");
                CacheResult::miss()
            }
        }
    }

    async fn invalidate_events(&self, kind: Option<i64>) {
        let db = match self.db() {
            Ok(db) => db,
            Err(e) => {
                warn!(error = %e, ?kind, "cache invalidation degraded");
                return;
            }
        };
        match queries::events::invalidate(db, kind).await {
            Ok(deleted) => debug!(?kind, deleted, "invalidated cached events"),
            Err(e) => warn!(error = %e, ?kind, "cache invalidation degraded"),
        }
    }

    async fn clear_expired(&self) -> u64 {
        let db = match self.db() {
            Ok(db) => db,
            Err(e) => {
                warn!(error = %e, "expiry sweep degraded");
                return 0;
            }
        };
        match queries::events::delete_expired(db).await {
            Ok(deleted) => {
                debug!(deleted, "swept expired events");
                deleted as u64
            }
            Err(e) => {
                warn!(error = %e, "expiry sweep degraded");
                0
            }
        }
    }

    async fn cache_file(&self, transaction_id: &str, path: &str, content: &str) {
        if transaction_id.is_empty() || path.is_empty() {
            warn!(
                transaction_id,
                path, "rejected file cache write: empty key component"
            );
            return;
        }
        let db = match self.db() {
            Ok(db) => db,
            Err(e) => {
                warn!(error = %e, transaction_id, path, "file cache write degraded");
                return;
            }
        };
        if let Err(e) = queries::files::upsert_file(db, transaction_id, path, content).await {
            warn!(error = %e, transaction_id, path, "file cache write degraded");
        }
    }

    async fn get_cached_file(&self, transaction_id: &str, path: &str) -> Option<String> {
        let db = match self.db() {
            Ok(db) => db,
            Err(e) => {
                warn!(error = %e, transaction_id, path, "file cache read degraded to miss");
                return None;
            }
        };
        match queries::files::get_file(db, transaction_id, path).await {
            Ok(file) => file.map(|f| f.content),
            Err(e) => {
                warn!(error = %e, transaction_id, path, "file cache read degraded to miss");
                None
            }
        }
    }

    async fn evict_lru(&self) -> u64 {
        let db = match self.db() {
            Ok(db) => db,
            Err(e) => {
                warn!(error = %e, "cache eviction degraded");
                return 0;
            }
        };
        match queries::eviction::evict_lru(db, self.config.eviction_batch_size).await {
            Ok((events, files)) => {
                debug!(events, files, "evicted least-recently-used cache rows");
                (events + files) as u64
            }
            Err(e) => {
                warn!(error = %e, "cache eviction degraded");
                0
            }
        }
    }
}
