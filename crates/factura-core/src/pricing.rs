//! # Pricing Engine
//!
//! Pure functions that turn tax-inclusive line prices into a consistent
//! base/tax/total breakdown.
//!
//! ## The Tax-Inclusive Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  TAX-INCLUSIVE PRICING (IVA model)                                      │
//! │                                                                         │
//! │  The user types what the customer PAYS:   121.00 €  (21% IVA)          │
//! │                                                                         │
//! │  The engine derives the base:             121 / 1.21 = 100.00 €        │
//! │                                                                         │
//! │  Invoice breakdown:                                                     │
//! │    total    = Σ quantity × unit_price      (tax-inclusive sum FIRST)   │
//! │    subtotal = total / (1 + rate/100)       (base imponible)            │
//! │    tax      = total − subtotal             (IVA, the residual)         │
//! │                                                                         │
//! │  Because tax is defined as the residual, subtotal + tax reconstructs   │
//! │  total by construction - the breakdown can never drift apart.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Canonical Summation Order
//! Summing the tax-inclusive amounts first and backing the tax out ONCE is
//! the canonical order. Summing per-line derived bases instead would agree
//! in exact arithmetic but not bit-for-bit in floating point; every
//! consumer (preview, PDF export) must go through [`totals`] so both show
//! identical numbers for identical input.
//!
//! ## No Internal Rounding
//! These functions return full-precision `f64`. Rounding to two decimals
//! is a display concern owned by the render layer; keeping it out of here
//! means repeated re-derivation never compounds rounding error.

use serde::{Deserialize, Serialize};

use crate::types::{LineItem, TaxRate};

// =============================================================================
// Totals
// =============================================================================

/// The derived breakdown of an invoice: base, tax and tax-inclusive total.
///
/// Always recomputed from line items and the tax rate - never stored, so
/// it can never go stale relative to its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Sum of pre-tax base amounts (base imponible).
    pub subtotal: f64,

    /// Tax amount, defined as `total - subtotal`.
    pub tax: f64,

    /// Sum of tax-inclusive line totals.
    pub total: f64,
}

impl Totals {
    /// All-zero totals, the result for an invoice with no lines.
    pub const ZERO: Totals = Totals {
        subtotal: 0.0,
        tax: 0.0,
        total: 0.0,
    };
}

// =============================================================================
// Operations
// =============================================================================

/// Derives the pre-tax base from a tax-inclusive price.
///
/// `base = post_tax_price / (1 + rate/100)`
///
/// Pure and deterministic. The divisor is finite and strictly positive
/// for every constructed [`TaxRate`], so the result is always finite for
/// finite input.
///
/// ## Example
/// ```rust
/// use factura_core::pricing::pre_tax_price;
/// use factura_core::types::TaxRate;
///
/// let rate = TaxRate::new(21.0).unwrap();
/// let base = pre_tax_price(121.0, rate);
/// assert!((base - 100.0).abs() < 1e-9);
/// ```
#[inline]
pub fn pre_tax_price(post_tax_price: f64, rate: TaxRate) -> f64 {
    post_tax_price / rate.multiplier()
}

/// Computes the invoice breakdown from line items and a single tax rate.
///
/// ## Computation (canonical order)
/// 1. `total` - sum of `quantity × unit_price` over all lines
///    (tax-inclusive amounts first)
/// 2. `subtotal` - `total / (1 + rate/100)`
/// 3. `tax` - `total - subtotal` (residual)
///
/// An empty slice yields [`Totals::ZERO`].
///
/// ## Example
/// ```rust
/// use factura_core::pricing::totals;
/// use factura_core::types::{LineItem, TaxRate};
///
/// let items = vec![LineItem {
///     description: "Servicio".into(),
///     quantity: 2,
///     unit_price: 121.0,
/// }];
/// let t = totals(&items, TaxRate::new(21.0).unwrap());
/// assert_eq!(t.total, 242.0);
/// ```
pub fn totals(items: &[LineItem], rate: TaxRate) -> Totals {
    let total: f64 = items.iter().map(LineItem::line_total).sum();
    let subtotal = total / rate.multiplier();

    Totals {
        subtotal,
        tax: total - subtotal,
        total,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: i64, unit_price: f64) -> LineItem {
        LineItem {
            description: String::new(),
            quantity,
            unit_price,
        }
    }

    fn rate(percent: f64) -> TaxRate {
        TaxRate::new(percent).unwrap()
    }

    #[test]
    fn test_pre_tax_price_zero_rate_is_identity() {
        assert_eq!(pre_tax_price(0.0, rate(0.0)), 0.0);
        assert_eq!(pre_tax_price(121.0, rate(0.0)), 121.0);
        assert_eq!(pre_tax_price(0.07, rate(0.0)), 0.07);
    }

    #[test]
    fn test_pre_tax_price_standard_iva() {
        // 121 € at 21% IVA implies a base of 100 €
        let base = pre_tax_price(121.0, rate(21.0));
        assert!((base - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_items_yield_zero_totals() {
        assert_eq!(totals(&[], rate(21.0)), Totals::ZERO);
        assert_eq!(totals(&[], rate(0.0)), Totals::ZERO);
        assert_eq!(totals(&[], rate(-50.0)), Totals::ZERO);
    }

    #[test]
    fn test_worked_scenario() {
        // 2 × 121.00 + 1 × 60.50 at 21%:
        // total = 302.5, subtotal ≈ 250, tax ≈ 52.5
        let items = vec![line(2, 121.0), line(1, 60.5)];
        let t = totals(&items, rate(21.0));

        assert_eq!(t.total, 302.5);
        assert!((t.subtotal - 250.0).abs() < 1e-9);
        assert!((t.tax - 52.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_price_item_any_rate() {
        let items = vec![line(1, 0.0)];
        for pct in [0.0, 4.0, 10.0, 21.0, 99.0] {
            let t = totals(&items, rate(pct));
            assert_eq!(t, Totals::ZERO);
        }
    }

    #[test]
    fn test_residual_identity() {
        // subtotal + tax reconstructs total exactly: tax IS the residual
        let items = vec![line(3, 19.99), line(7, 1.05), line(1, 250.0)];
        for pct in [0.0, 4.0, 10.0, 21.0, 33.3] {
            let t = totals(&items, rate(pct));
            assert_eq!(t.subtotal + t.tax, t.total);
        }
    }

    #[test]
    fn test_idempotence() {
        // No hidden state: identical inputs give bit-identical output
        let items = vec![line(2, 121.0), line(5, 3.33)];
        let r = rate(21.0);

        let a = totals(&items, r);
        let b = totals(&items, r);
        assert_eq!(a, b);

        assert_eq!(pre_tax_price(3.33, r), pre_tax_price(3.33, r));
    }

    #[test]
    fn test_per_line_base_sum_matches_subtotal() {
        // Consistency law: quantity-weighted per-line bases sum to the
        // aggregate subtotal within floating-point tolerance
        let items = vec![line(2, 121.0), line(1, 60.5), line(13, 0.07)];
        let r = rate(21.0);

        let t = totals(&items, r);
        let per_line_sum: f64 = items
            .iter()
            .map(|i| i.quantity as f64 * pre_tax_price(i.unit_price, r))
            .sum();

        assert!((per_line_sum - t.subtotal).abs() < 1e-9);
    }

    #[test]
    fn test_negative_rate_inside_domain() {
        // -100 < rate < 0 behaves like a discount: base above the
        // inclusive price, negative tax residual
        let items = vec![line(1, 50.0)];
        let t = totals(&items, rate(-50.0));

        assert_eq!(t.total, 50.0);
        assert!((t.subtotal - 100.0).abs() < 1e-9);
        assert!(t.tax < 0.0);
        assert_eq!(t.subtotal + t.tax, t.total);
    }

    #[test]
    fn test_full_precision_no_internal_rounding() {
        // The engine must NOT round to cents: 1 € at 21% is 0.8264...,
        // not 0.83
        let base = pre_tax_price(1.0, rate(21.0));
        assert!((base - 0.826446280991735).abs() < 1e-12);
    }
}
