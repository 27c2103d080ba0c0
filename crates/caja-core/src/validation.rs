//! # Validation Module
//!
//! Input validation utilities for Caja.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller (UI shell)                                            │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Store boundary (Rust)                                        │
//! │  └── THIS MODULE: Business rule validation, before any write           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── UNIQUE constraints (barcode)                                      │
//! │  └── CHECK constraints (price > 0, stock >= 0, quantity > 0)           │
//! │                                                                         │
//! │  Defense in depth: Multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use caja_core::validation::{validate_product_name, validate_quantity};
//!
//! validate_product_name("Coca-Cola 330ml").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{NewSale, ProductInput};
use crate::MAX_LINE_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use caja_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Coca-Cola 330ml").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Normalizes a barcode: trims whitespace, maps blank input to `None`.
///
/// ## Rules
/// - `None`, empty, or whitespace-only input normalizes to `None`
/// - Must be at most 64 characters
///
/// ## Returns
/// The trimmed barcode, or `None` when absent. Uniqueness is the store's
/// job; this only canonicalizes the value it checks.
///
/// ## Example
/// ```rust
/// use caja_core::validation::normalize_barcode;
///
/// assert_eq!(normalize_barcode(Some(" 7798 ")).unwrap(), Some("7798".to_string()));
/// assert_eq!(normalize_barcode(Some("   ")).unwrap(), None);
/// assert_eq!(normalize_barcode(None).unwrap(), None);
/// ```
pub fn normalize_barcode(barcode: Option<&str>) -> ValidationResult<Option<String>> {
    let Some(raw) = barcode else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    if trimmed.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: 64,
        });
    }

    Ok(Some(trimmed.to_string()))
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a catalog price in cents.
///
/// ## Rules
/// - Must be positive (> 0); free catalog items are not a thing here
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a line item's unit price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0); zero is allowed (promotional giveaways)
pub fn validate_unit_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::CannotBeNegative {
            field: "unit price".to_string(),
        });
    }

    Ok(())
}

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_LINE_QUANTITY`]
///
/// ## User Workflow
/// ```text
/// Cart line: quantity 5
///      │
///      ▼
/// validate_quantity(5) ← THIS FUNCTION
///      │
///      ├── qty <= 0? → Error: "quantity must be positive"
///      ├── qty > 999? → Error: "quantity must be between 1 and 999"
///      └── OK → Proceed with record_sale
/// ```
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a product's stock count (on create or update).
///
/// ## Rules
/// - Must be non-negative (>= 0)
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::CannotBeNegative {
            field: "stock".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a full product input (create or update).
///
/// Checks name, price, and stock. The barcode is handled separately via
/// [`normalize_barcode`] because the caller needs the normalized value.
pub fn validate_product_input(input: &ProductInput) -> ValidationResult<()> {
    validate_product_name(&input.name)?;
    validate_price_cents(input.price_cents)?;
    validate_stock(input.stock)?;
    Ok(())
}

/// Validates a sale submission before any write happens.
///
/// ## Rules
/// - At least one line item
/// - Every quantity positive and within bounds
/// - Every unit price non-negative
pub fn validate_new_sale(sale: &NewSale) -> ValidationResult<()> {
    if sale.items.is_empty() {
        return Err(ValidationError::EmptySale);
    }

    for item in &sale.items {
        validate_quantity(item.quantity)?;
        validate_unit_price_cents(item.unit_price_cents)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SaleItemInput;

    fn item(quantity: i64, unit_price_cents: i64) -> SaleItemInput {
        SaleItemInput {
            product_id: "p1".to_string(),
            quantity,
            unit_price_cents,
        }
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Coca-Cola 330ml").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_normalize_barcode() {
        assert_eq!(
            normalize_barcode(Some("7790001234567")).unwrap(),
            Some("7790001234567".to_string())
        );
        assert_eq!(
            normalize_barcode(Some("  779 ")).unwrap(),
            Some("779".to_string())
        );
        assert_eq!(normalize_barcode(Some("")).unwrap(), None);
        assert_eq!(normalize_barcode(Some("   ")).unwrap(), None);
        assert_eq!(normalize_barcode(None).unwrap(), None);
        assert!(normalize_barcode(Some(&"9".repeat(80))).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(1).is_ok());
        assert!(validate_price_cents(0).is_err());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_unit_price_cents() {
        assert!(validate_unit_price_cents(0).is_ok()); // giveaway line
        assert!(validate_unit_price_cents(500).is_ok());
        assert!(validate_unit_price_cents(-1).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_stock() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(50).is_ok());
        assert!(validate_stock(-1).is_err());
    }

    #[test]
    fn test_validate_product_input() {
        let good = ProductInput {
            name: "Coffee".to_string(),
            price_cents: 1099,
            stock: 10,
            ..Default::default()
        };
        assert!(validate_product_input(&good).is_ok());

        let no_name = ProductInput {
            name: "  ".to_string(),
            price_cents: 1099,
            ..Default::default()
        };
        assert!(validate_product_input(&no_name).is_err());

        let free = ProductInput {
            name: "Coffee".to_string(),
            price_cents: 0,
            ..Default::default()
        };
        assert!(validate_product_input(&free).is_err());

        let negative_stock = ProductInput {
            name: "Coffee".to_string(),
            price_cents: 1099,
            stock: -1,
            ..Default::default()
        };
        assert!(validate_product_input(&negative_stock).is_err());
    }

    #[test]
    fn test_validate_new_sale() {
        let empty = NewSale {
            customer: None,
            payment_method: Default::default(),
            items: vec![],
        };
        assert!(matches!(
            validate_new_sale(&empty),
            Err(ValidationError::EmptySale)
        ));

        let good = NewSale {
            customer: None,
            payment_method: Default::default(),
            items: vec![item(2, 500)],
        };
        assert!(validate_new_sale(&good).is_ok());

        let zero_qty = NewSale {
            customer: None,
            payment_method: Default::default(),
            items: vec![item(0, 500)],
        };
        assert!(validate_new_sale(&zero_qty).is_err());

        let negative_price = NewSale {
            customer: None,
            payment_method: Default::default(),
            items: vec![item(1, -5)],
        };
        assert!(validate_new_sale(&negative_price).is_err());
    }
}
