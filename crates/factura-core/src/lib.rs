//! # Factura Core
//!
//! Pure domain logic for the Factura invoicing engine.
//!
//! ## Design: NO I/O ALLOWED
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         factura-core                                    │
//! │                                                                         │
//! │  ✅ ALLOWED                        ❌ FORBIDDEN                          │
//! │  ├── Domain types                  ├── Database access (→ factura-db)   │
//! │  ├── Pricing arithmetic            ├── File system access               │
//! │  ├── Draft state transitions       ├── Network calls                    │
//! │  ├── Validation rules              ├── PDF generation (→ factura-render)│
//! │  └── Error types                   └── Terminal output                  │
//! │                                                                         │
//! │  Everything here is synchronous, deterministic and unit-testable        │
//! │  without any runtime or external resource.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//! - [`types`]: domain types (TaxRate, LineItem, Party, Invoice, Client, Product)
//! - [`pricing`]: the tax-inclusive pricing engine
//! - [`draft`]: the editable invoice form state
//! - [`validation`]: field-level input rules
//! - [`error`]: error taxonomy

pub mod draft;
pub mod error;
pub mod pricing;
pub mod types;
pub mod validation;

// Re-export commonly used types at crate root
pub use draft::{DraftData, InvoiceDraft};
pub use error::{CoreError, CoreResult, ValidationError};
pub use pricing::{pre_tax_price, totals, Totals};
pub use types::{Client, Invoice, LineItem, Party, Product, TaxRate};

// =============================================================================
// Constants
// =============================================================================

/// Default tax rate percentage (Spanish standard IVA).
pub const DEFAULT_TAX_RATE_PERCENT: f64 = 21.0;

/// Maximum number of line items on one invoice.
pub const MAX_LINE_ITEMS: usize = 100;

/// Maximum quantity on a single line.
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum length of a party or product name.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length of an invoice number.
pub const MAX_NUMBER_LEN: usize = 50;

/// Maximum length of a line item description.
pub const MAX_TEXT_LEN: usize = 500;
