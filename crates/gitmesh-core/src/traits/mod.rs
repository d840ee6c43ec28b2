// SPDX-FileCopyrightText: 2026 Gitmesh Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between the data-fetching layer and its collaborators.

pub mod cache;

pub use cache::CacheStore;
