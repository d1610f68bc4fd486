//! # Error Types
//!
//! Domain-specific error types for resell-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  resell-core errors (this file)                                        │
//! │  ├── CoreError        - Engine-level failures                          │
//! │  └── ValidationError  - Structurally invalid input                     │
//! │                                                                         │
//! │  resell-db errors (separate crate)                                     │
//! │  └── DbError          - Database and row-adapter failures              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError / DbError → caller                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## "No result" is not an error
//! A growth percentage with a zero baseline, or the best weekday of an empty
//! sale list, is reported as `None`. Those are expected outcomes the caller
//! branches on, so they never appear in these enums.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Engine-level errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed structural validation (negative quantity, NaN price...).
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// Analytics configuration is unusable.
    ///
    /// ## When This Occurs
    /// - A scoring weight is negative or not finite
    /// - A band table is empty or not ordered
    /// - A lookback or flash-sale window is zero
    #[error("Invalid analytics configuration: {0}")]
    InvalidConfig(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Structural input validation errors.
///
/// Raised synchronously when an Article or Sale is constructed, never
/// retried, always surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative (got {value})")]
    Negative { field: String, value: String },

    /// Numeric value is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },
}

impl ValidationError {
    /// Creates a Required error for a field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a Negative error for a field and the offending value.
    pub fn negative(field: impl Into<String>, value: impl ToString) -> Self {
        ValidationError::Negative {
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Creates a NotFinite error for a field.
    pub fn not_finite(field: impl Into<String>) -> Self {
        ValidationError::NotFinite {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::negative("quantity", -2);
        assert_eq!(err.to_string(), "quantity must not be negative (got -2)");

        let err = ValidationError::not_finite("sale_price");
        assert_eq!(err.to_string(), "sale_price must be a finite number");

        let err = ValidationError::required("id");
        assert_eq!(err.to_string(), "id is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::required("id").into();
        assert!(matches!(core_err, CoreError::InvalidInput(_)));
        assert_eq!(core_err.to_string(), "Invalid input: id is required");
    }
}
