//! # Database Connection Pool
//!
//! SQLite connection management with pooling and automatic migrations.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Database                                         │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────────────────────────┐  │
//! │  │                    SqlitePool                                     │  │
//! │  │                                                                   │  │
//! │  │   ┌──────┐  ┌──────┐  ┌──────┐  ┌──────┐  ┌──────┐               │  │
//! │  │   │ Conn │  │ Conn │  │ Conn │  │ Conn │  │ Conn │               │  │
//! │  │   └──────┘  └──────┘  └──────┘  └──────┘  └──────┘               │  │
//! │  │                                                                   │  │
//! │  └───────────────────────────────────────────────────────────────────┘  │
//! │       │              │              │                                   │
//! │       ▼              ▼              ▼                                   │
//! │  ProductRepository  SaleRepository  ReportRepository                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## SQLite Settings
//! - **WAL mode**: readers don't block the writer, so report queries can
//!   run while a sale is being recorded
//! - **Foreign keys ON**: sale line items must reference a real sale, and
//!   deleting a product detaches its historical line items
//! - **mode=rwc**: creates the database file on first launch

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{
    SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};
use crate::migrations;
use crate::repository::product::ProductRepository;
use crate::repository::report::ReportRepository;
use crate::repository::sale::SaleRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file, or `:memory:` for an in-memory
    /// database.
    pub database_path: PathBuf,

    /// Maximum number of pooled connections.
    pub max_connections: u32,

    /// Minimum number of idle connections to keep open.
    pub min_connections: u32,

    /// How long to wait for a connection from the pool.
    pub connect_timeout: Duration,

    /// How long an idle connection may live before being closed.
    pub idle_timeout: Duration,

    /// Whether to run pending migrations on startup.
    pub run_migrations: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("./caja.db"),
            max_connections: 5,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
            run_migrations: true,
        }
    }
}

impl DbConfig {
    /// Creates a config pointing at the given database file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: path.into(),
            ..Default::default()
        }
    }

    /// Creates a config for an in-memory database.
    ///
    /// Used by tests: a single connection is mandatory because each new
    /// in-memory connection would see its own empty database.
    pub fn in_memory() -> Self {
        Self {
            database_path: PathBuf::from(":memory:"),
            max_connections: 1,
            min_connections: 1,
            ..Default::default()
        }
    }

    /// Sets the maximum number of pooled connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Enables or disables automatic migrations on startup.
    pub fn run_migrations(mut self, run: bool) -> Self {
        self.run_migrations = run;
        self
    }
}

// =============================================================================
// Database Handle
// =============================================================================

/// Handle to the store: owns the connection pool and hands out repositories.
///
/// Cloning is cheap (the pool is internally reference-counted), so a `Database`
/// can be shared across tasks freely.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Opens (or creates) the database and prepares it for use.
    ///
    /// ## Startup Sequence
    /// ```text
    /// 1. Build connect options (WAL, NORMAL sync, foreign keys ON)
    /// 2. Open the connection pool
    /// 3. Run pending migrations (unless disabled in config)
    /// ```
    pub async fn new(config: DbConfig) -> StoreResult<Self> {
        let connect_url = format!("sqlite://{}?mode=rwc", config.database_path.display());

        info!(path = %config.database_path.display(), "Opening SQLite database");

        let options = SqliteConnectOptions::from_str(&connect_url)
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(config.idle_timeout)
            .connect_with(options)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        debug!(
            max_connections = config.max_connections,
            "Connection pool ready"
        );

        let db = Self { pool };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Runs pending migrations. Safe to call more than once.
    pub async fn run_migrations(&self) -> StoreResult<()> {
        migrations::run_migrations(&self.pool).await
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Returns the sale repository.
    pub fn sales(&self) -> SaleRepository {
        SaleRepository::new(self.pool.clone())
    }

    /// Returns the report repository.
    pub fn reports(&self) -> ReportRepository {
        ReportRepository::new(self.pool.clone())
    }

    /// Checks that the database is reachable.
    pub async fn health_check(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Closes all pool connections gracefully.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.health_check().await.unwrap();
        db.close().await;
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = DbConfig::new("/tmp/caja_test.db")
            .max_connections(10)
            .run_migrations(false);

        assert_eq!(config.database_path, PathBuf::from("/tmp/caja_test.db"));
        assert_eq!(config.max_connections, 10);
        assert!(!config.run_migrations);
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        // A second run must skip already-applied migrations, not fail.
        db.run_migrations().await.unwrap();

        let (total, applied) = migrations::migration_status(db.pool()).await.unwrap();
        assert!(total >= 1);
        assert_eq!(applied, total);
    }
}
