// SPDX-FileCopyrightText: 2026 Gitmesh Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Embedded database migrations using refinery.
//!
//! SQL migration files are compiled into the binary at build time via
//! `embed_migrations!`. Migrations run automatically on database open.
//! Schema evolution is additive only; the migration sequence number is the
//! cache's schema version.

use gitmesh_core::GitmeshError;

mod embedded {
    use refinery::embed_migrations;
    embed_migrations!("migrations");
}

/// Run all pending migrations against the given connection.
///
/// Refinery tracks applied migrations in its own `refinery_schema_history`
/// table.
pub fn run_migrations(conn: &mut rusqlite::Connection) -> Result<(), GitmeshError> {
    embedded::migrations::runner().run(conn).map_err(|e| {
        GitmeshError::Storage {
            source: Box::new(e),
        }
    })?;
    Ok(())
}
