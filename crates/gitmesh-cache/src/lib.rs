// SPDX-FileCopyrightText: 2026 Gitmesh Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent client-side cache for the Gitmesh browser.
//!
//! Two SQLite-backed tables sit between the data-fetching layer and the
//! network: event-derived domain objects with per-write TTL and
//! stale-while-revalidate reads, and immutable file bodies reclaimed only
//! by LRU eviction. WAL-mode storage with embedded migrations and a
//! single-writer concurrency model via `tokio-rusqlite`; the public
//! [`SqliteCache`] service never propagates storage errors to callers.

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;
pub mod service;

pub use database::Database;
pub use models::*;
pub use service::SqliteCache;
