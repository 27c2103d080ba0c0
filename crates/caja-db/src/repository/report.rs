//! # Report Repository
//!
//! Read-only aggregates over recorded sales: daily takings, best sellers,
//! and date-ranged revenue summaries.
//!
//! ## Date Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Timestamps are stored in UTC; reports bucket them by UTC calendar     │
//! │  day using SQLite's DATE().                                             │
//! │                                                                         │
//! │  sales_today        DATE(recorded_at) = DATE('now')                     │
//! │  sales_in_range     DATE(recorded_at) BETWEEN DATE(start) AND DATE(end)│
//! │                     (both endpoints inclusive)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Report queries never mutate; recording stays in the sale repository.

use caja_core::{BestSeller, DailySales, RevenueSummary, SaleSummary};
use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::error::StoreResult;

/// Repository for sales reporting.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new repository backed by the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns today's sale count and revenue (UTC day).
    ///
    /// A day with no sales reports zeros rather than an error.
    pub async fn sales_today(&self) -> StoreResult<DailySales> {
        let today: DailySales = sqlx::query_as(
            r#"
            SELECT COUNT(*) AS sales_count,
                   COALESCE(SUM(total_cents), 0) AS revenue_cents
            FROM sales
            WHERE DATE(recorded_at) = DATE('now')
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(today)
    }

    /// Returns the product with the most units sold across all history,
    /// or `None` before the first sale.
    ///
    /// Ties go to the product that entered the catalog first. Line items
    /// whose product was deleted no longer count toward a name.
    pub async fn best_selling_product(&self) -> StoreResult<Option<BestSeller>> {
        let best: Option<BestSeller> = sqlx::query_as(
            r#"
            SELECT p.name AS name, SUM(si.quantity) AS units_sold
            FROM sale_items si
            INNER JOIN products p ON p.id = si.product_id
            GROUP BY si.product_id
            ORDER BY units_sold DESC, p.rowid ASC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        Ok(best)
    }

    /// Lists sales whose UTC date falls within `[start, end]`, newest first,
    /// with the same item summaries as the full sale list.
    pub async fn sales_in_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<Vec<SaleSummary>> {
        let sales: Vec<SaleSummary> = sqlx::query_as(
            r#"
            SELECT s.id, s.total_cents, s.recorded_at, s.customer, s.payment_method,
                   GROUP_CONCAT(p.name || ' x' || si.quantity) AS items_summary
            FROM sales s
            LEFT JOIN sale_items si ON si.sale_id = s.id
            LEFT JOIN products p ON p.id = si.product_id
            WHERE DATE(s.recorded_at) BETWEEN DATE(?1) AND DATE(?2)
            GROUP BY s.id
            ORDER BY s.recorded_at DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Builds a revenue summary (total, average ticket, per-method breakdown)
    /// for the inclusive date range.
    pub async fn revenue_summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> StoreResult<RevenueSummary> {
        let sales = self.sales_in_range(start, end).await?;
        Ok(RevenueSummary::from_sales(&sales))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
