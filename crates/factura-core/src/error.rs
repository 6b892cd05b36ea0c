//! # Error Types
//!
//! Domain-specific error types for factura-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  factura-core errors (this file)                                        │
//! │  ├── CoreError        - General domain errors                           │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  factura-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                     │
//! │                                                                         │
//! │  factura-render errors (separate crate)                                 │
//! │  └── RenderError      - Document rendering failures                     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError/RenderError → CLI          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, index, value)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or domain logic failures.
/// They should be caught and translated to user-friendly messages.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Tax rate outside the mathematical domain of the pricing engine.
    ///
    /// ## When This Occurs
    /// - A rate of -100% (or below) makes the tax multiplier zero or
    ///   negative and the base-price division meaningless
    /// - A non-finite rate (NaN, infinity) reached the engine boundary
    ///
    /// The pricing engine rejects these at `TaxRate` construction instead
    /// of silently producing `Infinity`/`NaN` results.
    #[error("Invalid tax rate: {percent}% (must be a finite percentage greater than -100)")]
    InvalidTaxRate { percent: f64 },

    /// A line item index does not exist in the draft.
    #[error("Line {index} does not exist (draft has {len} lines)")]
    LineOutOfRange { index: usize, len: usize },

    /// Removing the line would leave the invoice empty.
    ///
    /// An invoice draft always retains at least one line; the UI disables
    /// the remove button on the last line for the same reason.
    #[error("Cannot remove the last remaining line item")]
    LastLine,

    /// Draft has exceeded the maximum allowed line items.
    #[error("Invoice cannot have more than {max} line items")]
    TooManyLines { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or greater.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Value must be a finite number (not NaN or infinity).
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Invalid format (e.g., invalid UUID, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::LineOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "Line 4 does not exist (draft has 2 lines)");

        let err = CoreError::InvalidTaxRate { percent: -100.0 };
        assert!(err.to_string().contains("-100"));
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::NotFinite {
            field: "unit price".to_string(),
        };
        assert_eq!(err.to_string(), "unit price must be a finite number");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
