//! # Validation Module
//!
//! Structural input checks run when Articles and Sales are built.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Data provider (resell-db adapter)                            │
//! │  ├── Normalizes row shapes                                             │
//! │  └── Computes unit cost from purchase total / quantity                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Article / Sale constructors                                  │
//! │  └── THIS MODULE: ids, quantities, finite non-negative amounts         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine functions                                             │
//! │  └── Total over constructed values, guarded divisions                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use resell_core::validation::{validate_id, validate_quantity};
//!
//! assert!(validate_id("article", "a-1").is_ok());
//! assert!(validate_quantity(-1).is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Largest quantity a single article lot may carry.
pub const MAX_ARTICLE_QUANTITY: i64 = 1_000_000;

/// Validates an opaque identifier.
///
/// ## Rules
/// - Must not be empty or whitespace only
pub fn validate_id(entity: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::required(format!("{entity} id")));
    }
    Ok(())
}

/// Validates the number of units acquired for an article.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: placeholder lots)
/// - Must not exceed [`MAX_ARTICLE_QUANTITY`]
///
/// ## Example
/// ```rust
/// use resell_core::validation::validate_quantity;
///
/// assert!(validate_quantity(0).is_ok());
/// assert!(validate_quantity(12).is_ok());
/// assert!(validate_quantity(-3).is_err());
/// ```
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::negative("quantity", quantity));
    }

    if quantity > MAX_ARTICLE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ARTICLE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a day count used as a window or lookback.
///
/// ## Rules
/// - Must be positive (a zero-day window compares a period with itself)
pub fn validate_window_days(field: &str, days: u32) -> ValidationResult<()> {
    if days == 0 {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 1,
            max: i64::from(u32::MAX),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_id() {
        assert!(validate_id("article", "abc").is_ok());
        assert_eq!(
            validate_id("sale", "  ").unwrap_err(),
            ValidationError::required("sale id")
        );
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(0).is_ok());
        assert!(validate_quantity(MAX_ARTICLE_QUANTITY).is_ok());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_ARTICLE_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_window_days() {
        assert!(validate_window_days("lookback_days", 7).is_ok());
        assert!(validate_window_days("lookback_days", 0).is_err());
    }
}
