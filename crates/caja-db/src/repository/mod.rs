//! # Repository Layer
//!
//! One repository per aggregate, each owning a handle to the shared pool.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Repository Layer                                    │
//! │                                                                         │
//! │   ProductRepository      SaleRepository        ReportRepository        │
//! │   ─────────────────      ──────────────        ────────────────        │
//! │   create / update        record_sale           sales_today             │
//! │   delete / list          list / items          best_selling_product    │
//! │   adjust_stock           get_by_id             sales_in_range          │
//! │   low_stock              count                 revenue_summary         │
//! │        │                      │                      │                  │
//! │        └──────────────────────┴──────────────────────┘                  │
//! │                               │                                         │
//! │                               ▼                                         │
//! │                          SqlitePool                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Repositories take owned domain types in and hand owned domain types back;
//! SQL never leaks above this layer.

pub mod product;
pub mod report;
pub mod sale;
