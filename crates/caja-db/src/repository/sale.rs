//! # Sale Repository
//!
//! Atomic sale recording and sale history queries.
//!
//! ## Recording a Sale
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    record_sale (one transaction)                        │
//! │                                                                         │
//! │  validate input (non-empty, sane quantities and prices)                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │    INSERT sale header (total, customer, payment method)                 │
//! │    for each line item:                                                  │
//! │       check product exists and has enough stock ──── fail ──┐           │
//! │       INSERT sale_items row                                 │           │
//! │       UPDATE products SET stock = stock - qty               │           │
//! │  COMMIT                                                     ▼           │
//! │       │                                               ROLLBACK          │
//! │       ▼                                          (nothing persisted)    │
//! │  Sale returned to caller                                                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The header, every line item, and every stock decrement land together or
//! not at all. An error anywhere in the loop returns early, which drops the
//! transaction and rolls the whole sale back.

use caja_core::{validation, NewSale, Sale, SaleLineItem, SaleSummary, DEFAULT_CUSTOMER};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Repository for sale recording and history.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new repository backed by the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Recording
    // =========================================================================

    /// Records a sale atomically and returns the persisted header.
    ///
    /// The stored total is computed here from the line items, never taken
    /// from the caller. A missing customer (or a blank one) is recorded as
    /// [`DEFAULT_CUSTOMER`].
    pub async fn record_sale(&self, sale: NewSale) -> StoreResult<Sale> {
        validation::validate_new_sale(&sale)?;

        let total = sale.total();
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let customer = sale
            .customer
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| DEFAULT_CUSTOMER.to_string());

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO sales (id, total_cents, recorded_at, customer, payment_method)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&id)
        .bind(total.cents())
        .bind(now)
        .bind(&customer)
        .bind(sale.payment_method)
        .execute(&mut *tx)
        .await?;

        for item in &sale.items {
            let row: Option<(String, i64)> =
                sqlx::query_as("SELECT name, stock FROM products WHERE id = ?1")
                    .bind(&item.product_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            let (name, stock) =
                row.ok_or_else(|| StoreError::not_found("Product", item.product_id.as_str()))?;

            if stock < item.quantity {
                // Returning drops `tx`, rolling back the header and any
                // lines already written.
                return Err(StoreError::InsufficientStock {
                    product: name,
                    available: stock,
                    requested: item.quantity,
                });
            }

            sqlx::query(
                r#"
                INSERT INTO sale_items (id, sale_id, product_id, quantity,
                                        unit_price_cents, subtotal_cents)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(Uuid::new_v4().to_string())
            .bind(&id)
            .bind(&item.product_id)
            .bind(item.quantity)
            .bind(item.unit_price_cents)
            .bind(item.subtotal().cents())
            .execute(&mut *tx)
            .await?;

            sqlx::query("UPDATE products SET stock = stock - ?2, updated_at = ?3 WHERE id = ?1")
                .bind(&item.product_id)
                .bind(item.quantity)
                .bind(now)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        info!(
            sale_id = %id,
            total_cents = total.cents(),
            items = sale.items.len(),
            "Sale recorded"
        );

        Ok(Sale {
            id,
            total_cents: total.cents(),
            recorded_at: now,
            customer,
            payment_method: sale.payment_method,
        })
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Lists all sales, newest first, each with a one-line item summary
    /// like `"Coffee x2,Milk x1"`.
    ///
    /// Line items whose product was later deleted drop out of the summary;
    /// the totals are untouched.
    pub async fn list(&self) -> StoreResult<Vec<SaleSummary>> {
        let sales: Vec<SaleSummary> = sqlx::query_as(
            r#"
            SELECT s.id, s.total_cents, s.recorded_at, s.customer, s.payment_method,
                   GROUP_CONCAT(p.name || ' x' || si.quantity) AS items_summary
            FROM sales s
            LEFT JOIN sale_items si ON si.sale_id = s.id
            LEFT JOIN products p ON p.id = si.product_id
            GROUP BY s.id
            ORDER BY s.recorded_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Fetches a single sale header by id.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Sale>> {
        let sale: Option<Sale> = sqlx::query_as(
            r#"
            SELECT id, total_cents, recorded_at, customer, payment_method
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(sale)
    }

    /// Lists the line items of a sale in the order they were rung up.
    pub async fn items(&self, sale_id: &str) -> StoreResult<Vec<SaleLineItem>> {
        let items: Vec<SaleLineItem> = sqlx::query_as(
            r#"
            SELECT id, sale_id, product_id, quantity, unit_price_cents, subtotal_cents
            FROM sale_items
            WHERE sale_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(sale_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Counts recorded sales.
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use caja_core::{PaymentMethod, Product, ProductInput, SaleItemInput};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_product(db: &Database, name: &str, price_cents: i64, stock: i64) -> Product {
        db.products()
            .create(ProductInput {
                name: name.to_string(),
                price_cents,
                stock,
                ..Default::default()
            })
            .await
            .unwrap()
    }

    fn line(product: &Product, quantity: i64) -> SaleItemInput {
        SaleItemInput {
            product_id: product.id.clone(),
            quantity,
            unit_price_cents: product.price_cents,
        }
    }

    fn cash_sale(items: Vec<SaleItemInput>) -> NewSale {
        NewSale {
            customer: None,
            payment_method: PaymentMethod::Cash,
            items,
        }
    }

    #[tokio::test]
    async fn test_record_sale_decrements_stock() {
        let db = test_db().await;
        let coffee = seed_product(&db, "Coffee", 1000, 5).await;

        let sale = db
            .sales()
            .record_sale(cash_sale(vec![line(&coffee, 3)]))
            .await
            .unwrap();

        assert_eq!(sale.total_cents, 3000);
        assert_eq!(sale.customer, DEFAULT_CUSTOMER);

        let after = db.products().get_by_id(&coffee.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 2);
        assert_eq!(db.sales().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_recorded_total_matches_line_subtotals() {
        let db = test_db().await;
        let coffee = seed_product(&db, "Coffee", 1000, 10).await;
        let tea = seed_product(&db, "Tea", 500, 10).await;

        let sale = db
            .sales()
            .record_sale(cash_sale(vec![line(&coffee, 2), line(&tea, 3)]))
            .await
            .unwrap();
        assert_eq!(sale.total_cents, 3500);

        let items = db.sales().items(&sale.id).await.unwrap();
        assert_eq!(items.len(), 2);

        // Items come back in the order they were rung up.
        assert_eq!(items[0].product_id.as_deref(), Some(coffee.id.as_str()));
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].subtotal_cents, 2000);
        assert_eq!(items[1].subtotal_cents, 1500);

        let sum: i64 = items.iter().map(|i| i.subtotal_cents).sum();
        assert_eq!(sum, sale.total_cents);
    }

    #[tokio::test]
    async fn test_unknown_product_rolls_back_whole_sale() {
        let db = test_db().await;
        let coffee = seed_product(&db, "Coffee", 1000, 5).await;

        let mut items = vec![line(&coffee, 1)];
        items.push(SaleItemInput {
            product_id: "no-such-product".to_string(),
            quantity: 1,
            unit_price_cents: 100,
        });

        let err = db.sales().record_sale(cash_sale(items)).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));

        // The first line's decrement must have been rolled back too.
        let after = db.products().get_by_id(&coffee.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 5);
        assert_eq!(db.sales().count().await.unwrap(), 0);
        assert!(db.sales().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insufficient_stock_rolls_back_whole_sale() {
        let db = test_db().await;
        let tea = seed_product(&db, "Tea", 500, 10).await;
        let coffee = seed_product(&db, "Coffee", 1000, 2).await;

        let err = db
            .sales()
            .record_sale(cash_sale(vec![line(&tea, 1), line(&coffee, 3)]))
            .await
            .unwrap_err();

        match err {
            StoreError::InsufficientStock {
                product,
                available,
                requested,
            } => {
                assert_eq!(product, "Coffee");
                assert_eq!(available, 2);
                assert_eq!(requested, 3);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        let tea_after = db.products().get_by_id(&tea.id).await.unwrap().unwrap();
        let coffee_after = db.products().get_by_id(&coffee.id).await.unwrap().unwrap();
        assert_eq!(tea_after.stock, 10);
        assert_eq!(coffee_after.stock, 2);
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_sale_can_drain_stock_to_zero() {
        let db = test_db().await;
        let coffee = seed_product(&db, "Coffee", 1000, 3).await;

        db.sales()
            .record_sale(cash_sale(vec![line(&coffee, 3)]))
            .await
            .unwrap();

        let after = db.products().get_by_id(&coffee.id).await.unwrap().unwrap();
        assert_eq!(after.stock, 0);
    }

    #[tokio::test]
    async fn test_empty_sale_rejected() {
        let db = test_db().await;

        let err = db.sales().record_sale(cash_sale(vec![])).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        assert_eq!(db.sales().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_zero_quantity_rejected() {
        let db = test_db().await;
        let coffee = seed_product(&db, "Coffee", 1000, 5).await;

        let err = db
            .sales()
            .record_sale(cash_sale(vec![line(&coffee, 0)]))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_customer_defaults_when_blank() {
        let db = test_db().await;
        let coffee = seed_product(&db, "Coffee", 1000, 10).await;

        let mut sale = cash_sale(vec![line(&coffee, 1)]);
        sale.customer = Some("   ".to_string());
        let recorded = db.sales().record_sale(sale).await.unwrap();
        assert_eq!(recorded.customer, DEFAULT_CUSTOMER);

        let mut sale = cash_sale(vec![line(&coffee, 1)]);
        sale.customer = Some("  Ana  ".to_string());
        let recorded = db.sales().record_sale(sale).await.unwrap();
        assert_eq!(recorded.customer, "Ana");

        let stored = db.sales().get_by_id(&recorded.id).await.unwrap().unwrap();
        assert_eq!(stored.customer, "Ana");
    }

    #[tokio::test]
    async fn test_payment_method_roundtrip() {
        let db = test_db().await;
        let coffee = seed_product(&db, "Coffee", 1000, 10).await;

        let mut sale = cash_sale(vec![line(&coffee, 1)]);
        sale.payment_method = PaymentMethod::MobileWallet;
        let recorded = db.sales().record_sale(sale).await.unwrap();

        let stored = db.sales().get_by_id(&recorded.id).await.unwrap().unwrap();
        assert_eq!(stored.payment_method, PaymentMethod::MobileWallet);
    }

    #[tokio::test]
    async fn test_list_newest_first_with_item_summary() {
        let db = test_db().await;
        let coffee = seed_product(&db, "Coffee", 1000, 10).await;
        let tea = seed_product(&db, "Tea", 500, 10).await;

        let first = db
            .sales()
            .record_sale(cash_sale(vec![line(&coffee, 2)]))
            .await
            .unwrap();
        let second = db
            .sales()
            .record_sale(cash_sale(vec![line(&tea, 1)]))
            .await
            .unwrap();

        let listed = db.sales().list().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
        assert_eq!(listed[1].items_summary.as_deref(), Some("Coffee x2"));
    }

    #[tokio::test]
    async fn test_deleting_product_keeps_sale_history() {
        let db = test_db().await;
        let coffee = seed_product(&db, "Coffee", 1000, 10).await;

        let sale = db
            .sales()
            .record_sale(cash_sale(vec![line(&coffee, 2)]))
            .await
            .unwrap();

        assert_eq!(db.products().delete(&coffee.id).await.unwrap(), 1);

        // Header and line survive with their recorded prices; only the
        // product reference is cleared.
        let listed = db.sales().list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].total_cents, 2000);
        assert_eq!(listed[0].items_summary, None);

        let items = db.sales().items(&sale.id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].product_id, None);
        assert_eq!(items[0].unit_price_cents, 1000);
    }
}
