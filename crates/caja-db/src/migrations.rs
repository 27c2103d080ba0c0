//! # Database Migrations
//!
//! Embedded SQL migrations, applied automatically on startup.
//!
//! ## Migration Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Migration Execution                                  │
//! │                                                                         │
//! │  Database::new()                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  run_migrations(pool)                                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sqlx compares migrations/sqlite/*.sql against _sqlx_migrations        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Pending migrations run in order; applied ones are skipped             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Migration files live in `migrations/sqlite/` at the workspace root and
//! are embedded into the binary at compile time, so a deployed build never
//! depends on loose SQL files.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::StoreResult;

/// Embedded migrator, built at compile time from the workspace migration
/// directory.
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Runs all pending migrations against the given pool.
///
/// Safe to call repeatedly: migrations that have already been applied are
/// recorded in the `_sqlx_migrations` table and skipped on later runs.
pub async fn run_migrations(pool: &SqlitePool) -> StoreResult<()> {
    info!("Running database migrations");

    MIGRATOR.run(pool).await?;

    info!("Database migrations complete");
    Ok(())
}

/// Returns `(total, applied)` migration counts.
///
/// Useful for health endpoints and the seed tool to confirm the schema is
/// fully up to date before writing data.
pub async fn migration_status(pool: &SqlitePool) -> StoreResult<(usize, usize)> {
    let total = MIGRATOR.iter().count();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await
        .unwrap_or(0);

    Ok((total, applied as usize))
}
