//! # Domain Types
//!
//! Core domain types used throughout Caja.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │  SaleLineItem   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │       │
//! │  │  name           │   │  total_cents    │   │  sale_id (FK)   │       │
//! │  │  price_cents    │   │  recorded_at    │   │  product_id     │       │
//! │  │  stock          │   │  customer       │   │  quantity       │       │
//! │  │  barcode?       │   │  payment_method │   │  subtotal_cents │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Inputs:   ProductInput, NewSale, SaleItemInput                        │
//! │  Reports:  SaleSummary, DailySales, BestSeller, RevenueSummary         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity has an `id`: UUID v4 string - immutable, used for database
//! relations. Products additionally carry an optional `barcode` as a
//! human-scannable business identifier (unique when present).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::money::Money;
use crate::stock::StockLevel;

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
///
/// Stored as snake_case text in the database and serialized the same way,
/// so the wire format and the column value always agree.
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Debit card.
    Debit,
    /// Credit card.
    Credit,
    /// Bank transfer.
    Transfer,
    /// Mobile wallet / QR payment.
    MobileWallet,
    /// Anything else (voucher, store credit, ...).
    Other,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        PaymentMethod::Cash
    }
}

impl PaymentMethod {
    /// Human-readable label for receipts and console output.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Debit => "Debit card",
            PaymentMethod::Credit => "Credit card",
            PaymentMethod::Transfer => "Transfer",
            PaymentMethod::MobileWallet => "Mobile wallet",
            PaymentMethod::Other => "Other",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to the cashier and on receipts.
    pub name: String,

    /// Optional description for product details.
    pub description: Option<String>,

    /// Price in cents (smallest currency unit). Always positive.
    pub price_cents: i64,

    /// Current stock level. Never negative.
    pub stock: i64,

    /// Optional category label for catalog grouping.
    pub category: Option<String>,

    /// Barcode (EAN-13, UPC-A, etc.). Unique across products when present.
    pub barcode: Option<String>,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Returns the coarse stock band for this product.
    #[inline]
    pub fn stock_level(&self) -> StockLevel {
        StockLevel::classify(self.stock)
    }
}

/// Input for creating or updating a product.
///
/// The same shape serves both operations: an update replaces every field of
/// the stored product (ids and timestamps are managed by the store).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    /// Initial stock on create; replacement stock on update.
    pub stock: i64,
    pub category: Option<String>,
    pub barcode: Option<String>,
}

// =============================================================================
// Sale
// =============================================================================

/// A recorded sale transaction. Never edited after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: String,
    /// Sum of the line item subtotals, computed at recording time.
    pub total_cents: i64,
    pub recorded_at: DateTime<Utc>,
    /// Customer label; a generic one is substituted when none was given.
    pub customer: String,
    pub payment_method: PaymentMethod,
}

impl Sale {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A line item within a sale.
///
/// `product_id` is `None` once the referenced product has been deleted;
/// the quantity and prices remain as recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleLineItem {
    pub id: String,
    pub sale_id: String,
    pub product_id: Option<String>,
    pub quantity: i64,
    /// Unit price in cents at time of sale (frozen).
    pub unit_price_cents: i64,
    /// quantity × unit_price_cents, frozen at time of sale.
    pub subtotal_cents: i64,
}

impl SaleLineItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.subtotal_cents)
    }
}

/// One line of a sale being submitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItemInput {
    pub product_id: String,
    pub quantity: i64,
    /// Unit price in cents, snapshotted from the catalog by the caller's cart.
    pub unit_price_cents: i64,
}

impl SaleItemInput {
    /// The subtotal this line contributes to the sale total.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_cents(self.unit_price_cents).multiply_quantity(self.quantity)
    }
}

/// A sale being submitted for recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSale {
    /// Optional customer label; blank counts as absent.
    pub customer: Option<String>,
    /// Defaults to cash when not supplied.
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub items: Vec<SaleItemInput>,
}

impl NewSale {
    /// Total of all line subtotals. The store records this value and never
    /// trusts a caller-supplied total.
    pub fn total(&self) -> Money {
        self.items.iter().map(SaleItemInput::subtotal).sum()
    }
}

// =============================================================================
// Sale History & Report Rows
// =============================================================================

/// A flattened sale row for history lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleSummary {
    pub id: String,
    pub total_cents: i64,
    pub recorded_at: DateTime<Utc>,
    pub customer: String,
    pub payment_method: PaymentMethod,
    /// Aggregated "Name x2,Other x1" description of the line items.
    /// `None` when every product on the sale has since been deleted.
    pub items_summary: Option<String>,
}

impl SaleSummary {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// Today's sales at a glance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DailySales {
    pub sales_count: i64,
    pub revenue_cents: i64,
}

impl DailySales {
    /// Returns the revenue as Money.
    #[inline]
    pub fn revenue(&self) -> Money {
        Money::from_cents(self.revenue_cents)
    }
}

/// The product with the highest total units sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BestSeller {
    pub name: String,
    pub units_sold: i64,
}

/// Revenue attributed to one payment method within a summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRevenue {
    pub total_cents: i64,
    pub sales_count: i64,
}

impl MethodRevenue {
    /// Returns the method's revenue as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// Aggregated revenue figures over a set of sales.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub total_cents: i64,
    /// Rounded to the nearest cent; zero when there are no sales.
    pub average_cents: i64,
    pub sales_count: i64,
    pub per_method: HashMap<PaymentMethod, MethodRevenue>,
}

impl RevenueSummary {
    /// Aggregates a slice of sales into a revenue summary.
    ///
    /// Pure: the store filters sales to a date range and hands them here.
    /// An empty slice yields all zeros and an empty per-method map.
    pub fn from_sales(sales: &[SaleSummary]) -> Self {
        let sales_count = sales.len() as i64;
        let total: Money = sales.iter().map(SaleSummary::total).sum();

        let mut per_method: HashMap<PaymentMethod, MethodRevenue> = HashMap::new();
        for sale in sales {
            let entry = per_method.entry(sale.payment_method).or_default();
            entry.total_cents += sale.total_cents;
            entry.sales_count += 1;
        }

        RevenueSummary {
            total_cents: total.cents(),
            average_cents: total.average_over(sales_count).cents(),
            sales_count,
            per_method,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(total_cents: i64, payment_method: PaymentMethod) -> SaleSummary {
        SaleSummary {
            id: "s".to_string(),
            total_cents,
            recorded_at: Utc::now(),
            customer: crate::DEFAULT_CUSTOMER.to_string(),
            payment_method,
            items_summary: None,
        }
    }

    #[test]
    fn test_payment_method_wire_format() {
        let json = serde_json::to_string(&PaymentMethod::MobileWallet).unwrap();
        assert_eq!(json, "\"mobile_wallet\"");

        let back: PaymentMethod = serde_json::from_str("\"debit\"").unwrap();
        assert_eq!(back, PaymentMethod::Debit);
    }

    #[test]
    fn test_new_sale_defaults_from_wire() {
        let json = r#"{"items":[{"product_id":"p1","quantity":2,"unit_price_cents":500}]}"#;
        let sale: NewSale = serde_json::from_str(json).unwrap();

        assert_eq!(sale.payment_method, PaymentMethod::Cash);
        assert!(sale.customer.is_none());
        assert_eq!(sale.total().cents(), 1000);
    }

    #[test]
    fn test_new_sale_total_sums_subtotals() {
        let sale = NewSale {
            customer: None,
            payment_method: PaymentMethod::Cash,
            items: vec![
                SaleItemInput {
                    product_id: "a".to_string(),
                    quantity: 3,
                    unit_price_cents: 1000,
                },
                SaleItemInput {
                    product_id: "b".to_string(),
                    quantity: 1,
                    unit_price_cents: 250,
                },
            ],
        };
        assert_eq!(sale.total().cents(), 3250);
    }

    #[test]
    fn test_product_stock_level() {
        let product = Product {
            id: "p".to_string(),
            name: "Coffee".to_string(),
            description: None,
            price_cents: 1099,
            stock: 3,
            category: None,
            barcode: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert_eq!(product.stock_level(), StockLevel::Low);
        assert_eq!(product.price().cents(), 1099);
    }

    #[test]
    fn test_revenue_summary_empty() {
        let summary = RevenueSummary::from_sales(&[]);
        assert_eq!(summary.total_cents, 0);
        assert_eq!(summary.average_cents, 0);
        assert_eq!(summary.sales_count, 0);
        assert!(summary.per_method.is_empty());
    }

    #[test]
    fn test_revenue_summary_groups_by_method() {
        let sales = [
            summary(1000, PaymentMethod::Cash),
            summary(2000, PaymentMethod::Cash),
            summary(500, PaymentMethod::Debit),
        ];
        let agg = RevenueSummary::from_sales(&sales);

        assert_eq!(agg.total_cents, 3500);
        assert_eq!(agg.sales_count, 3);
        // 3500 / 3 = 1166.67, rounds to 1167
        assert_eq!(agg.average_cents, 1167);

        let cash = agg.per_method[&PaymentMethod::Cash];
        assert_eq!(cash.total_cents, 3000);
        assert_eq!(cash.sales_count, 2);

        let debit = agg.per_method[&PaymentMethod::Debit];
        assert_eq!(debit.total_cents, 500);
        assert_eq!(debit.sales_count, 1);
    }

    #[test]
    fn test_revenue_summary_map_serializes_with_string_keys() {
        let agg = RevenueSummary::from_sales(&[summary(1000, PaymentMethod::MobileWallet)]);
        let value = serde_json::to_value(&agg).unwrap();
        assert_eq!(value["per_method"]["mobile_wallet"]["total_cents"], 1000);
    }
}
