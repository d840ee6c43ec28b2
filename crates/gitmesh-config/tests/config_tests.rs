// SPDX-FileCopyrightText: 2026 Gitmesh Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for config loading, merging, and validation.

use std::io::Write;

use serial_test::serial;

use gitmesh_config::{
    ConfigError, GitmeshConfig, load_and_validate_str, load_config_from_path, load_config_from_str,
};

#[test]
fn defaults_load_without_any_sources() {
    let config = load_config_from_str("").unwrap();
    assert_eq!(config.log.level, "info");
    assert!(config.cache.wal_mode);
    assert_eq!(config.cache.eviction_batch_size, 10);
    assert!(config.cache.database_path.ends_with("cache.db"));
}

#[test]
fn toml_values_override_defaults() {
    let config = load_config_from_str(
        r#"
[log]
level = "debug"

[cache]
database_path = "/tmp/gitmesh-test/cache.db"
eviction_batch_size = 25
"#,
    )
    .unwrap();
    assert_eq!(config.log.level, "debug");
    assert_eq!(config.cache.database_path, "/tmp/gitmesh-test/cache.db");
    assert_eq!(config.cache.eviction_batch_size, 25);
    // Untouched keys keep their defaults.
    assert!(config.cache.wal_mode);
}

#[test]
fn unknown_keys_are_rejected() {
    let result = toml::from_str::<GitmeshConfig>(
        r#"
[cache]
database_path = "/tmp/cache.db"
eviction_batch_sixe = 5
"#,
    );
    assert!(result.is_err(), "typo'd key must not deserialize");
}

#[test]
fn unknown_section_is_rejected() {
    let result = toml::from_str::<GitmeshConfig>(
        r#"
[caches]
database_path = "/tmp/cache.db"
"#,
    );
    assert!(result.is_err());
}

#[test]
fn invalid_values_surface_as_validation_errors() {
    let errors = load_and_validate_str(
        r#"
[log]
level = "loud"

[cache]
eviction_batch_size = 0
"#,
    )
    .unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(
        errors
            .iter()
            .all(|e| matches!(e, ConfigError::Validation { .. }))
    );
}

#[test]
fn valid_custom_config_passes_validation() {
    let config = load_and_validate_str(
        r#"
[cache]
database_path = "/tmp/gitmesh/cache.db"
eviction_batch_size = 50
"#,
    )
    .unwrap();
    assert_eq!(config.cache.eviction_batch_size, 50);
}

#[test]
#[serial]
fn env_vars_override_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gitmesh.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "[cache]\ndatabase_path = \"/from/file.db\"").unwrap();

    // SAFETY: guarded by #[serial]; no other test reads process env
    // concurrently.
    unsafe {
        std::env::set_var("GITMESH_CACHE_DATABASE_PATH", "/from/env.db");
        std::env::set_var("GITMESH_LOG_LEVEL", "warn");
    }
    let config = load_config_from_path(&path).unwrap();
    unsafe {
        std::env::remove_var("GITMESH_CACHE_DATABASE_PATH");
        std::env::remove_var("GITMESH_LOG_LEVEL");
    }

    assert_eq!(config.cache.database_path, "/from/env.db");
    assert_eq!(config.log.level, "warn");
}

#[test]
#[serial]
fn underscored_keys_map_to_sections_not_nested_tables() {
    // GITMESH_CACHE_EVICTION_BATCH_SIZE must land on
    // cache.eviction_batch_size, not cache.eviction.batch.size.
    unsafe {
        std::env::set_var("GITMESH_CACHE_EVICTION_BATCH_SIZE", "3");
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gitmesh.toml");
    std::fs::write(&path, "").unwrap();
    let config = load_config_from_path(&path).unwrap();
    unsafe {
        std::env::remove_var("GITMESH_CACHE_EVICTION_BATCH_SIZE");
    }
    assert_eq!(config.cache.eviction_batch_size, 3);
}
