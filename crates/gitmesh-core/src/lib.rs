// SPDX-FileCopyrightText: 2026 Gitmesh Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Gitmesh client.
//!
//! This crate provides the foundational error type, cache domain types,
//! and the `CacheStore` trait that the data-fetching layer programs
//! against. The SQLite implementation lives in `gitmesh-cache`.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::GitmeshError;
pub use traits::CacheStore;
pub use types::{CacheResult, CachedEvent, CachedFile};
