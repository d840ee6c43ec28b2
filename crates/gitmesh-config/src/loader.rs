// SPDX-FileCopyrightText: 2026 Gitmesh Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./gitmesh.toml` > `~/.config/gitmesh/gitmesh.toml`
//! > `/etc/gitmesh/gitmesh.toml` with environment variable overrides via the
//! `GITMESH_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::GitmeshConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/gitmesh/gitmesh.toml` (system-wide)
/// 3. `~/.config/gitmesh/gitmesh.toml` (user XDG config)
/// 4. `./gitmesh.toml` (local directory)
/// 5. `GITMESH_*` environment variables
pub fn load_config() -> Result<GitmeshConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GitmeshConfig::default()))
        .merge(Toml::file("/etc/gitmesh/gitmesh.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("gitmesh/gitmesh.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("gitmesh.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<GitmeshConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GitmeshConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GitmeshConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GitmeshConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `GITMESH_CACHE_DATABASE_PATH` must map
/// to `cache.database_path`, not `cache.database.path`.
fn env_provider() -> Env {
    Env::prefixed("GITMESH_").map(|key| {
        // `key` is the lowercased env var name with the prefix stripped.
        // Example: GITMESH_CACHE_DATABASE_PATH -> "cache_database_path"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("log_", "log.", 1)
            .replacen("cache_", "cache.", 1);
        mapped.into()
    })
}
