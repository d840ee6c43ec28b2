// SPDX-FileCopyrightText: 2026 Gitmesh Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration error type.

use thiserror::Error;

/// A configuration error surfaced by loading or validation.
///
/// Rendering is left to the embedding application; this crate only
/// collects and reports the errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config sources could not be parsed or merged.
    #[error("failed to load configuration: {message}")]
    Load { message: String },

    /// A deserialized value violates a semantic constraint.
    #[error("invalid configuration: {message}")]
    Validation { message: String },
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Load {
            message: err.to_string(),
        }
    }
}
