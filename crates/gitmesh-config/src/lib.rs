// SPDX-FileCopyrightText: 2026 Gitmesh Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Gitmesh client.
//!
//! Provides TOML configuration parsing with strict validation
//! (`deny_unknown_fields`), XDG file hierarchy lookup, and environment
//! variable overrides.
//!
//! # Usage
//!
//! ```no_run
//! use gitmesh_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Cache database: {}", config.cache.database_path);
//! ```

pub mod error;
pub mod loader;
pub mod model;
pub mod validation;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::{CacheConfig, GitmeshConfig, LogConfig};

/// Load configuration from the XDG hierarchy and validate it.
///
/// This is the high-level entry point that:
/// 1. Loads config from TOML files + env vars via Figment
/// 2. On success: runs post-deserialization validation
///
/// Returns either a valid `GitmeshConfig` or the list of errors.
pub fn load_and_validate() -> Result<GitmeshConfig, Vec<ConfigError>> {
    match loader::load_config() {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![err.into()]),
    }
}

/// Load configuration from a specific TOML string and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<GitmeshConfig, Vec<ConfigError>> {
    match loader::load_config_from_str(toml_content) {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(vec![err.into()]),
    }
}
