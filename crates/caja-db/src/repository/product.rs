//! # Product Repository
//!
//! CRUD and stock control for the product catalog.
//!
//! ## Product Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Lifecycle                                    │
//! │                                                                         │
//! │  create(input)                                                          │
//! │       │  validate → normalize barcode → reject duplicates               │
//! │       ▼                                                                 │
//! │  ┌─────────┐   update(id, input)   ┌─────────┐                          │
//! │  │ in      │ ────────────────────▶ │ in      │                          │
//! │  │ catalog │ ◀──────────────────── │ catalog │                          │
//! │  └─────────┘   adjust_stock(±n)    └─────────┘                          │
//! │       │                                                                 │
//! │       ▼  delete(id)                                                     │
//! │  removed from catalog; historical sale lines keep their prices but     │
//! │  lose the product reference (FK ON DELETE SET NULL)                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock changes always go through the guarded UPDATE in [`adjust_stock`]
//! (or the sale transaction), so the `stock >= 0` invariant holds even with
//! concurrent writers.
//!
//! [`adjust_stock`]: ProductRepository::adjust_stock

use caja_core::{validation, Product, ProductInput};
use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Repository for product catalog operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new repository backed by the given pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Lists the whole catalog, ordered by name.
    pub async fn list(&self) -> StoreResult<Vec<Product>> {
        let products: Vec<Product> = sqlx::query_as(
            r#"
            SELECT id, name, description, price_cents, stock, category, barcode,
                   created_at, updated_at
            FROM products
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Fetches a single product by id.
    pub async fn get_by_id(&self, id: &str) -> StoreResult<Option<Product>> {
        let product: Option<Product> = sqlx::query_as(
            r#"
            SELECT id, name, description, price_cents, stock, category, barcode,
                   created_at, updated_at
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Fetches a single product by barcode (scanner lookup).
    pub async fn get_by_barcode(&self, barcode: &str) -> StoreResult<Option<Product>> {
        let product: Option<Product> = sqlx::query_as(
            r#"
            SELECT id, name, description, price_cents, stock, category, barcode,
                   created_at, updated_at
            FROM products
            WHERE barcode = ?1
            "#,
        )
        .bind(barcode)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Lists products at or below the given stock threshold, most urgent
    /// (lowest stock) first.
    pub async fn low_stock(&self, threshold: i64) -> StoreResult<Vec<Product>> {
        let products: Vec<Product> = sqlx::query_as(
            r#"
            SELECT id, name, description, price_cents, stock, category, barcode,
                   created_at, updated_at
            FROM products
            WHERE stock <= ?1
            ORDER BY stock
            "#,
        )
        .bind(threshold)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Counts products in the catalog.
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Creates a product and returns it.
    ///
    /// The name is stored trimmed; a blank barcode is stored as NULL so the
    /// UNIQUE index only applies to products that actually carry one.
    pub async fn create(&self, input: ProductInput) -> StoreResult<Product> {
        validation::validate_product_input(&input)?;
        let barcode = validation::normalize_barcode(input.barcode.as_deref())?;

        if let Some(code) = barcode.as_deref() {
            if self.barcode_in_use(code, None).await? {
                return Err(StoreError::conflict("barcode", code));
            }
        }

        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let name = input.name.trim().to_string();

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price_cents, stock,
                                  category, barcode, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&id)
        .bind(&name)
        .bind(&input.description)
        .bind(input.price_cents)
        .bind(input.stock)
        .bind(&input.category)
        .bind(&barcode)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(product_id = %id, name = %name, "Product created");

        Ok(Product {
            id,
            name,
            description: input.description,
            price_cents: input.price_cents,
            stock: input.stock,
            category: input.category,
            barcode,
            created_at: now,
            updated_at: now,
        })
    }

    /// Updates a product in place, returning the number of rows changed.
    ///
    /// Returns `Ok(0)` when no product has that id; the caller decides
    /// whether that is an error.
    pub async fn update(&self, id: &str, input: ProductInput) -> StoreResult<u64> {
        validation::validate_product_input(&input)?;
        let barcode = validation::normalize_barcode(input.barcode.as_deref())?;

        // A product keeping its own barcode is not a conflict.
        if let Some(code) = barcode.as_deref() {
            if self.barcode_in_use(code, Some(id)).await? {
                return Err(StoreError::conflict("barcode", code));
            }
        }

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = ?2, description = ?3, price_cents = ?4, stock = ?5,
                category = ?6, barcode = ?7, updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(input.price_cents)
        .bind(input.stock)
        .bind(&input.category)
        .bind(&barcode)
        .bind(now)
        .execute(&self.pool)
        .await?;

        debug!(
            product_id = %id,
            rows = result.rows_affected(),
            "Product updated"
        );

        Ok(result.rows_affected())
    }

    /// Deletes a product, returning the number of rows removed.
    ///
    /// Historical sale line items survive the delete with their recorded
    /// prices; only their product reference is cleared.
    pub async fn delete(&self, id: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(
            product_id = %id,
            rows = result.rows_affected(),
            "Product deleted"
        );

        Ok(result.rows_affected())
    }

    /// Adjusts stock by a signed delta, returning the number of rows changed.
    ///
    /// The guard in the WHERE clause refuses any change that would take stock
    /// below zero, atomically even under concurrent writers:
    /// ```text
    /// UPDATE ... SET stock = stock + delta
    /// WHERE id = ? AND stock + delta >= 0
    /// ```
    ///
    /// Returns `Ok(0)` for an unknown id and `InsufficientStock` when the
    /// product exists but the delta would overdraw it.
    pub async fn adjust_stock(&self, id: &str, delta: i64) -> StoreResult<u64> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE products
            SET stock = stock + ?2, updated_at = ?3
            WHERE id = ?1 AND stock + ?2 >= 0
            "#,
        )
        .bind(id)
        .bind(delta)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            // Zero rows means the product is missing or the guard rejected
            // the change; a re-fetch tells the two cases apart.
            if let Some(product) = self.get_by_id(id).await? {
                return Err(StoreError::InsufficientStock {
                    product: product.name,
                    available: product.stock,
                    requested: delta.abs(),
                });
            }
            return Ok(0);
        }

        debug!(product_id = %id, delta, "Stock adjusted");

        Ok(result.rows_affected())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Checks whether another product already uses this barcode.
    async fn barcode_in_use(&self, barcode: &str, exclude_id: Option<&str>) -> StoreResult<bool> {
        let existing: Option<String> = match exclude_id {
            Some(id) => {
                sqlx::query_scalar("SELECT id FROM products WHERE barcode = ?1 AND id <> ?2")
                    .bind(barcode)
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_scalar("SELECT id FROM products WHERE barcode = ?1")
                    .bind(barcode)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };

        Ok(existing.is_some())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
