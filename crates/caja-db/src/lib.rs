//! # Caja Store
//!
//! SQLite persistence for the Caja point-of-sale: schema migrations, a
//! pooled connection handle, and repositories for products, sales, and
//! reports.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         caja-db                                         │
//! │                                                                         │
//! │  ┌──────────────┐   ┌──────────────┐   ┌──────────────────────────┐    │
//! │  │   pool.rs    │   │ migrations.rs│   │      repository/         │    │
//! │  │              │   │              │   │                          │    │
//! │  │  Database    │──▶│  embedded    │   │  product.rs  (catalog)   │    │
//! │  │  DbConfig    │   │  SQL runner  │   │  sale.rs     (recording) │    │
//! │  │              │   │              │   │  report.rs   (read-only) │    │
//! │  └──────────────┘   └──────────────┘   └──────────────────────────┘    │
//! │         │                                        │                      │
//! │         └────────────────┬───────────────────────┘                      │
//! │                          ▼                                              │
//! │                   SQLite (WAL mode)                                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Domain types and validation live in `caja-core`; this crate owns
//! everything that touches SQL.
//!
//! ## Usage
//! ```no_run
//! use caja_db::{Database, DbConfig};
//!
//! # async fn open() -> Result<(), caja_db::StoreError> {
//! let db = Database::new(DbConfig::new("./caja.db")).await?;
//! let products = db.products().list().await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{StoreError, StoreResult};
pub use pool::{Database, DbConfig};
pub use repository::product::ProductRepository;
pub use repository::report::ReportRepository;
pub use repository::sale::SaleRepository;
