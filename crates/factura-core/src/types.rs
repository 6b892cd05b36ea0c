//! # Domain Types
//!
//! Core domain types used throughout Factura.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    Invoice      │   │     Client      │   │    Product      │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │        │
//! │  │  invoice_number │   │  name           │   │  name           │        │
//! │  │  issuer/client  │   │  tax_id         │   │  price (incl.)  │        │
//! │  │  items + rate   │   │  address        │   │  category       │        │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘        │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │    TaxRate      │   │    LineItem     │                              │
//! │  │  ─────────────  │   │  ─────────────  │                              │
//! │  │  percent (f64)  │   │  description    │                              │
//! │  │  21.0 = 21%     │   │  quantity       │                              │
//! │  └─────────────────┘   │  unit_price     │  ◄── tax-INCLUSIVE           │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Tax-Inclusive Prices
//! Every price a user types (and every stored product price) is the amount
//! the customer actually pays, tax already included. The pre-tax base is
//! always DERIVED from it, never stored - see [`crate::pricing`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate as a percentage (21.0 means 21%).
///
/// ## Why a Newtype?
/// The pricing engine divides by `1 + percent/100`. A rate of -100% (or a
/// NaN) would make that division meaningless, so construction is the one
/// place that precondition is enforced - every `TaxRate` value in the
/// system is finite and strictly greater than -100.
///
/// ## Example
/// ```rust
/// use factura_core::types::TaxRate;
///
/// let iva = TaxRate::new(21.0).unwrap();
/// assert_eq!(iva.percent(), 21.0);
/// assert_eq!(iva.multiplier(), 1.21);
///
/// assert!(TaxRate::new(-100.0).is_err());
/// assert!(TaxRate::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TaxRate(f64);

impl TaxRate {
    /// Creates a tax rate from a percentage.
    ///
    /// ## Errors
    /// Returns [`CoreError::InvalidTaxRate`] when the percentage is not a
    /// finite number or is -100 or below (the division-by-zero domain of
    /// the pricing formula).
    pub fn new(percent: f64) -> Result<Self, CoreError> {
        if !percent.is_finite() || percent <= -100.0 {
            return Err(CoreError::InvalidTaxRate { percent });
        }
        Ok(TaxRate(percent))
    }

    /// Returns the rate as a percentage (for display and storage).
    #[inline]
    pub fn percent(&self) -> f64 {
        self.0
    }

    /// Returns the tax multiplier `1 + percent/100`.
    ///
    /// Finite and strictly positive for every constructed value.
    #[inline]
    pub fn multiplier(&self) -> f64 {
        1.0 + self.0 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub fn zero() -> Self {
        TaxRate(0.0)
    }

    /// Checks if the tax rate is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

/// Default rate is the Spanish standard IVA of 21%.
impl Default for TaxRate {
    fn default() -> Self {
        TaxRate(crate::DEFAULT_TAX_RATE_PERCENT)
    }
}

/// Validated deserialization: a stored or transmitted rate goes through
/// the same domain check as a constructed one.
impl TryFrom<f64> for TaxRate {
    type Error = CoreError;

    fn try_from(percent: f64) -> Result<Self, Self::Error> {
        TaxRate::new(percent)
    }
}

impl From<TaxRate> for f64 {
    fn from(rate: TaxRate) -> f64 {
        rate.percent()
    }
}

impl std::fmt::Display for TaxRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One row of an invoice.
///
/// ## Fields
/// - `description`: free-form label, may be empty while the user is typing
/// - `quantity`: positive integer count (validated at the draft boundary)
/// - `unit_price`: tax-INCLUSIVE price per unit, non-negative
///
/// The pre-tax base of a line is never stored; it is derived on every
/// render via [`crate::pricing::pre_tax_price`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl LineItem {
    /// A fresh line as created by the "add line" action.
    pub fn new() -> Self {
        LineItem {
            description: String::new(),
            quantity: 1,
            unit_price: 0.0,
        }
    }

    /// The tax-inclusive total for this line (`quantity × unit_price`).
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

impl Default for LineItem {
    fn default() -> Self {
        LineItem::new()
    }
}

// =============================================================================
// Party
// =============================================================================

/// Issuer or client block on an invoice.
///
/// Matches the four-field contact block the form collects for both sides
/// of the invoice. All fields are free-form text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    /// Company or person name.
    pub name: String,

    /// Fiscal identifier (NIF/CIF).
    pub tax_id: String,

    /// Postal address, single line.
    pub address: String,

    /// Phone/email contact line.
    pub contact: String,
}

// =============================================================================
// Invoice
// =============================================================================

/// A persisted invoice record.
///
/// ## Derived Totals
/// Note what is NOT here: no subtotal, tax or total column. Totals are
/// recomputed from `items` + `tax_rate` on every read, so a stored
/// invoice can never carry a stale breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Human-readable invoice number (e.g. "FAC-2024-001").
    pub invoice_number: String,

    /// Issue date.
    pub date: NaiveDate,

    /// Issuer contact block.
    pub issuer: Party,

    /// Client contact block.
    pub client: Party,

    /// Line items, in entry order. Always at least one.
    pub items: Vec<LineItem>,

    /// Single tax rate applied uniformly to every line.
    pub tax_rate: TaxRate,

    /// When the record was created.
    pub created_at: DateTime<Utc>,

    /// When the record was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Recomputes the breakdown from the stored lines and rate.
    pub fn totals(&self) -> crate::pricing::Totals {
        crate::pricing::totals(&self.items, self.tax_rate)
    }
}

// =============================================================================
// Client
// =============================================================================

/// A saved client record, reusable across invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub tax_id: String,
    pub address: String,
    pub contact: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// The contact block this client contributes to an invoice.
    pub fn to_party(&self) -> Party {
        Party {
            name: self.name.clone(),
            tax_id: self.tax_id.clone(),
            address: self.address.clone(),
            contact: self.contact.clone(),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A saved product record, insertable as an invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,

    /// Tax-inclusive unit price.
    pub price: f64,

    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// The invoice line this product expands to when selected.
    ///
    /// Description falls back to the product name when no separate
    /// description was stored.
    pub fn to_line_item(&self) -> LineItem {
        let description = if self.description.trim().is_empty() {
            self.name.clone()
        } else {
            self.description.clone()
        };
        LineItem {
            description,
            quantity: 1,
            unit_price: self.price,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
