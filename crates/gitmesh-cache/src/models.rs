// SPDX-FileCopyrightText: 2026 Gitmesh Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for cache entities.
//!
//! The canonical types are defined in `gitmesh-core::types` for use across
//! the `CacheStore` trait boundary. This module re-exports them for
//! convenience within the cache crate.

pub use gitmesh_core::types::{CacheResult, CachedEvent, CachedFile};
