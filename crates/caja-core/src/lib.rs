//! # caja-core: Pure Business Logic for Caja
//!
//! This crate is the **heart** of Caja, a small point-of-sale / inventory
//! manager. It contains all business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Caja Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     UI Shell (out of scope)                     │   │
//! │  │    Catalog view ──► Cart ──► Checkout ──► Reports view          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ command / query calls                  │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ caja-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   stock   │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │ StockLevel│  │   rules   │  │   │
//! │  │   │   Sale    │  │  (cents)  │  │  classify │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                     caja-db (Database Layer)                    │   │
//! │  │              SQLite queries, migrations, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, report rows, input DTOs)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`stock`] - Stock level classification for restock alerts
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use caja_core::money::Money;
//! use caja_core::stock::StockLevel;
//!
//! // Create money from cents (never from floats!)
//! let unit_price = Money::from_cents(1099); // $10.99
//!
//! // Line totals are plain integer multiplication
//! let line_total = unit_price.multiply_quantity(3);
//! assert_eq!(line_total.cents(), 3297);
//!
//! // Stock classification drives the restock badge in the UI
//! assert_eq!(StockLevel::classify(3), StockLevel::Low);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod stock;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use caja_core::Money` instead of
// `use caja_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use stock::StockLevel;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Customer label recorded when a sale has no named customer.
///
/// ## Why a constant?
/// The sales table keeps `customer` NOT NULL so reports never deal with
/// missing labels. Blank or absent input is replaced with this value at the
/// store boundary.
pub const DEFAULT_CUSTOMER: &str = "Walk-in customer";

/// Default boundary for the low-stock report.
///
/// Products with `stock <= threshold` show up in the restock list.
/// Callers may pass their own threshold; this is the conventional default.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// Maximum quantity of a single line item in a sale.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;
