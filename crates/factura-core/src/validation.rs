//! # Validation Module
//!
//! Input validation utilities for Factura.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI / draft file (user input)                                 │
//! │  ├── Type validation (deserialization)                                  │
//! │  └── THIS MODULE: field-level rules                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Draft model (factura-core)                                    │
//! │  └── Structural invariants (at least one line, line caps)               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                             │
//! │  └── NOT NULL constraints, primary keys                                 │
//! │                                                                         │
//! │  The pricing engine itself trusts its typed inputs: everything          │
//! │  reaching it has already passed these boundaries.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_LINE_QUANTITY, MAX_NAME_LEN, MAX_NUMBER_LEN, MAX_TEXT_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an invoice number.
///
/// ## Rules
/// - Must not be empty (required before an invoice can be persisted)
/// - Must be at most 50 characters
pub fn validate_invoice_number(number: &str) -> ValidationResult<()> {
    let number = number.trim();

    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "invoice number".to_string(),
        });
    }

    if number.len() > MAX_NUMBER_LEN {
        return Err(ValidationError::TooLong {
            field: "invoice number".to_string(),
            max: MAX_NUMBER_LEN,
        });
    }

    Ok(())
}

/// Validates a party (issuer/client) name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_party_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a product name.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a line item description.
///
/// ## Rules
/// - May be empty (a line being typed has no description yet)
/// - Must be at most 500 characters
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.len() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_LINE_QUANTITY (999)
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_LINE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_LINE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a tax-inclusive unit price.
///
/// ## Rules
/// - Must be a finite number (NaN/infinity never enter the engine)
/// - Must be non-negative; zero is allowed (free items)
pub fn validate_unit_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "unit price".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit price".to_string(),
        });
    }

    Ok(())
}

/// Validates a user-entered tax rate percentage.
///
/// ## Rules
/// - Must be finite
/// - Must be within the 0-100 form range
///
/// Note this is stricter than the engine's own domain (any finite rate
/// above -100). The form boundary pins rates to the displayed range; the
/// [`crate::types::TaxRate`] constructor enforces only the mathematical
/// precondition.
pub fn validate_tax_rate_percent(percent: f64) -> ValidationResult<()> {
    if !percent.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "tax rate".to_string(),
        });
    }

    if !(0.0..=100.0).contains(&percent) {
        return Err(ValidationError::OutOfRange {
            field: "tax rate".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// UUID Validators
// =============================================================================

/// Validates a UUID string format.
///
/// ## Example
/// ```rust
/// use factura_core::validation::validate_uuid;
///
/// assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("not-a-uuid").is_err());
/// ```
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_invoice_number() {
        assert!(validate_invoice_number("FAC-2024-001").is_ok());
        assert!(validate_invoice_number("").is_err());
        assert!(validate_invoice_number("   ").is_err());
        assert!(validate_invoice_number(&"9".repeat(60)).is_err());
    }

    #[test]
    fn test_validate_party_name() {
        assert!(validate_party_name("Empresa S.L.").is_ok());
        assert!(validate_party_name("").is_err());
        assert!(validate_party_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_description_allows_empty() {
        assert!(validate_description("").is_ok());
        assert!(validate_description("Diseño web").is_ok());
        assert!(validate_description(&"x".repeat(600)).is_err());
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
    fn test_validate_unit_price() {
        assert!(validate_unit_price(0.0).is_ok());
        assert!(validate_unit_price(121.0).is_ok());

        assert!(validate_unit_price(-0.01).is_err());
        assert!(validate_unit_price(f64::NAN).is_err());
        assert!(validate_unit_price(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_tax_rate_percent() {
        assert!(validate_tax_rate_percent(0.0).is_ok());
        assert!(validate_tax_rate_percent(21.0).is_ok());
        assert!(validate_tax_rate_percent(100.0).is_ok());

        assert!(validate_tax_rate_percent(-1.0).is_err());
        assert!(validate_tax_rate_percent(100.5).is_err());
        assert!(validate_tax_rate_percent(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }
}
