//! # Stock Level Classification
//!
//! Pure classification of a product's stock count into coarse bands.
//! The UI renders these as restock badges; the store never acts on them.
//!
//! ```text
//! stock:   0        1..=5        6..=20        21..
//! band:   Out        Low         Medium         Ok
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::DEFAULT_LOW_STOCK_THRESHOLD;

/// Upper bound of the Medium band; above this a product is comfortably stocked.
const MEDIUM_MAX: i64 = 20;

/// Coarse stock band for a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    /// Nothing left to sell.
    Out,
    /// At or below the low-stock threshold; restock soon.
    Low,
    /// Stocked, but worth watching.
    Medium,
    /// Comfortably stocked.
    Ok,
}

impl StockLevel {
    /// Classifies a stock count into its band.
    ///
    /// ## Example
    /// ```rust
    /// use caja_core::stock::StockLevel;
    ///
    /// assert_eq!(StockLevel::classify(0), StockLevel::Out);
    /// assert_eq!(StockLevel::classify(5), StockLevel::Low);
    /// assert_eq!(StockLevel::classify(20), StockLevel::Medium);
    /// assert_eq!(StockLevel::classify(21), StockLevel::Ok);
    /// ```
    pub const fn classify(stock: i64) -> Self {
        if stock <= 0 {
            StockLevel::Out
        } else if stock <= DEFAULT_LOW_STOCK_THRESHOLD {
            StockLevel::Low
        } else if stock <= MEDIUM_MAX {
            StockLevel::Medium
        } else {
            StockLevel::Ok
        }
    }

    /// Whether this band should trigger a restock alert.
    pub const fn needs_restock(&self) -> bool {
        matches!(self, StockLevel::Out | StockLevel::Low)
    }

    /// Human-readable badge label.
    pub const fn label(&self) -> &'static str {
        match self {
            StockLevel::Out => "Out of stock",
            StockLevel::Low => "Low",
            StockLevel::Medium => "Medium",
            StockLevel::Ok => "OK",
        }
    }
}

impl fmt::Display for StockLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(StockLevel::classify(0), StockLevel::Out);
        assert_eq!(StockLevel::classify(1), StockLevel::Low);
        assert_eq!(StockLevel::classify(5), StockLevel::Low);
        assert_eq!(StockLevel::classify(6), StockLevel::Medium);
        assert_eq!(StockLevel::classify(20), StockLevel::Medium);
        assert_eq!(StockLevel::classify(21), StockLevel::Ok);
    }

    #[test]
    fn test_negative_counts_are_out() {
        // The store never lets stock go negative, but classification
        // stays total over all inputs.
        assert_eq!(StockLevel::classify(-3), StockLevel::Out);
    }

    #[test]
    fn test_restock_alerts() {
        assert!(StockLevel::Out.needs_restock());
        assert!(StockLevel::Low.needs_restock());
        assert!(!StockLevel::Medium.needs_restock());
        assert!(!StockLevel::Ok.needs_restock());
    }

    #[test]
    fn test_labels() {
        assert_eq!(StockLevel::Out.to_string(), "Out of stock");
        assert_eq!(StockLevel::Ok.to_string(), "OK");
    }
}
