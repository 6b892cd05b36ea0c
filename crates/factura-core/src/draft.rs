//! # Invoice Draft
//!
//! The editable invoice: what the user is filling in before export/save.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft State Operations                               │
//! │                                                                         │
//! │  User Action               Draft Method            State Change         │
//! │  ───────────               ────────────            ────────────         │
//! │                                                                         │
//! │  "Añadir concepto" ──────► add_line() ───────────► items.push(default)  │
//! │                                                                         │
//! │  Edit a field ───────────► set_line_*() ─────────► items[i].field = v   │
//! │                                                                         │
//! │  Remove a line ──────────► remove_line(i) ───────► items.remove(i)      │
//! │                            (refused on the last remaining line)         │
//! │                                                                         │
//! │  Pick stored client ─────► use_client(&c) ───────► client = c.to_party  │
//! │                                                                         │
//! │  Pick stored product ────► add_product_line(&p) ─► items.push(line)     │
//! │                                                                         │
//! │  Reuse old invoice ──────► copy_from(&inv) ──────► items/parties/rate   │
//! │                                                    copied, number blank │
//! │                                                                         │
//! │  Show totals ────────────► totals() ─────────────► (recomputed, pure)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - There is always at least one line item
//! - Every field edit is validated before it lands (quantity positive,
//!   unit price finite and non-negative, tax rate in the 0-100 form range)
//! - Totals are derived on every call; the draft never caches a breakdown

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::pricing::{self, Totals};
use crate::types::{Client, Invoice, LineItem, Party, Product, TaxRate};
use crate::validation;
use crate::MAX_LINE_ITEMS;

// =============================================================================
// Invoice Draft
// =============================================================================

/// The in-progress invoice being edited.
///
/// `items` is private so the "at least one line" invariant cannot be
/// bypassed; serde goes through [`DraftData`] which re-validates on the
/// way in (draft files are user input too).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DraftData", into = "DraftData")]
pub struct InvoiceDraft {
    invoice_number: String,
    date: NaiveDate,
    issuer: Party,
    client: Party,
    items: Vec<LineItem>,
    tax_rate: TaxRate,
}

impl InvoiceDraft {
    /// A fresh draft: blank parties, today's date, one default line,
    /// the default 21% rate.
    pub fn new() -> Self {
        InvoiceDraft {
            invoice_number: String::new(),
            date: Utc::now().date_naive(),
            issuer: Party::default(),
            client: Party::default(),
            items: vec![LineItem::new()],
            tax_rate: TaxRate::default(),
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn invoice_number(&self) -> &str {
        &self.invoice_number
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn issuer(&self) -> &Party {
        &self.issuer
    }

    pub fn client(&self) -> &Party {
        &self.client
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn tax_rate(&self) -> TaxRate {
        self.tax_rate
    }

    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    // -------------------------------------------------------------------------
    // Header edits
    // -------------------------------------------------------------------------

    pub fn set_invoice_number(&mut self, number: impl Into<String>) {
        self.invoice_number = number.into();
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        self.date = date;
    }

    pub fn set_issuer(&mut self, issuer: Party) {
        self.issuer = issuer;
    }

    pub fn set_client(&mut self, client: Party) {
        self.client = client;
    }

    /// Sets the invoice tax rate from a user-entered percentage.
    ///
    /// Goes through the 0-100 form range check before touching the
    /// engine-level [`TaxRate`] constructor.
    pub fn set_tax_rate(&mut self, percent: f64) -> CoreResult<()> {
        validation::validate_tax_rate_percent(percent)?;
        self.tax_rate = TaxRate::new(percent)?;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Line edits
    // -------------------------------------------------------------------------

    /// Appends a default line (`"", 1, 0.0`) - the "Añadir concepto"
    /// action.
    pub fn add_line(&mut self) -> CoreResult<()> {
        if self.items.len() >= MAX_LINE_ITEMS {
            return Err(CoreError::TooManyLines {
                max: MAX_LINE_ITEMS,
            });
        }
        self.items.push(LineItem::new());
        Ok(())
    }

    /// Removes a line by index.
    ///
    /// Refused when only one line remains: an invoice always retains at
    /// least one line.
    pub fn remove_line(&mut self, index: usize) -> CoreResult<()> {
        if self.items.len() <= 1 {
            return Err(CoreError::LastLine);
        }
        if index >= self.items.len() {
            return Err(CoreError::LineOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.items.remove(index);
        Ok(())
    }

    pub fn set_line_description(&mut self, index: usize, description: impl Into<String>) -> CoreResult<()> {
        let description = description.into();
        validation::validate_description(&description)?;
        self.line_mut(index)?.description = description;
        Ok(())
    }

    pub fn set_line_quantity(&mut self, index: usize, quantity: i64) -> CoreResult<()> {
        validation::validate_quantity(quantity)?;
        self.line_mut(index)?.quantity = quantity;
        Ok(())
    }

    pub fn set_line_unit_price(&mut self, index: usize, unit_price: f64) -> CoreResult<()> {
        validation::validate_unit_price(unit_price)?;
        self.line_mut(index)?.unit_price = unit_price;
        Ok(())
    }

    fn line_mut(&mut self, index: usize) -> CoreResult<&mut LineItem> {
        let len = self.items.len();
        self.items
            .get_mut(index)
            .ok_or(CoreError::LineOutOfRange { index, len })
    }

    // -------------------------------------------------------------------------
    // Stored-record pulls
    // -------------------------------------------------------------------------

    /// Fills the client block from a saved client record
    /// ("Seleccionar Cliente").
    pub fn use_client(&mut self, client: &Client) {
        self.client = client.to_party();
    }

    /// Appends a line built from a saved product record
    /// ("Seleccionar Producto").
    pub fn add_product_line(&mut self, product: &Product) -> CoreResult<()> {
        if self.items.len() >= MAX_LINE_ITEMS {
            return Err(CoreError::TooManyLines {
                max: MAX_LINE_ITEMS,
            });
        }
        self.items.push(product.to_line_item());
        Ok(())
    }

    /// Reuses a saved invoice as the starting point for a new one:
    /// parties, items and rate are copied; the number is cleared and the
    /// date reset to today (a copied invoice is a NEW invoice).
    pub fn copy_from(&mut self, invoice: &Invoice) {
        self.invoice_number = String::new();
        self.date = Utc::now().date_naive();
        self.issuer = invoice.issuer.clone();
        self.client = invoice.client.clone();
        self.items = invoice.items.clone();
        self.tax_rate = invoice.tax_rate;
    }

    /// Back to the blank-form state.
    pub fn reset(&mut self) {
        *self = InvoiceDraft::new();
    }

    // -------------------------------------------------------------------------
    // Derived values
    // -------------------------------------------------------------------------

    /// Recomputes the subtotal/tax/total breakdown from the current lines
    /// and rate. Called on every render; nothing is cached.
    pub fn totals(&self) -> Totals {
        pricing::totals(&self.items, self.tax_rate)
    }

    /// Freezes the draft into a persistable [`Invoice`] record.
    ///
    /// The invoice number becomes required at this point: a draft may sit
    /// unnumbered while being edited, a stored invoice may not.
    pub fn into_invoice(self, id: String, now: DateTime<Utc>) -> CoreResult<Invoice> {
        validation::validate_invoice_number(&self.invoice_number)?;

        Ok(Invoice {
            id,
            invoice_number: self.invoice_number,
            date: self.date,
            issuer: self.issuer,
            client: self.client,
            items: self.items,
            tax_rate: self.tax_rate,
            created_at: now,
            updated_at: now,
        })
    }
}

impl Default for InvoiceDraft {
    fn default() -> Self {
        InvoiceDraft::new()
    }
}

// =============================================================================
// Serde Mirror
// =============================================================================

/// Wire shape of a draft file. Converting back into [`InvoiceDraft`]
/// re-applies every boundary rule, so a hand-edited JSON file cannot
/// smuggle an invalid draft into the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftData {
    pub invoice_number: String,
    pub date: NaiveDate,
    pub issuer: Party,
    pub client: Party,
    pub items: Vec<LineItem>,
    pub tax_rate: TaxRate,
}

impl From<InvoiceDraft> for DraftData {
    fn from(draft: InvoiceDraft) -> Self {
        DraftData {
            invoice_number: draft.invoice_number,
            date: draft.date,
            issuer: draft.issuer,
            client: draft.client,
            items: draft.items,
            tax_rate: draft.tax_rate,
        }
    }
}

impl TryFrom<DraftData> for InvoiceDraft {
    type Error = CoreError;

    fn try_from(data: DraftData) -> Result<Self, Self::Error> {
        if data.items.is_empty() {
            return Err(CoreError::LastLine);
        }
        if data.items.len() > MAX_LINE_ITEMS {
            return Err(CoreError::TooManyLines {
                max: MAX_LINE_ITEMS,
            });
        }
        for item in &data.items {
            validation::validate_description(&item.description)?;
            validation::validate_quantity(item.quantity)?;
            validation::validate_unit_price(item.unit_price)?;
        }
        validation::validate_tax_rate_percent(data.tax_rate.percent())?;

        Ok(InvoiceDraft {
            invoice_number: data.invoice_number,
            date: data.date,
            issuer: data.issuer,
            client: data.client,
            items: data.items,
            tax_rate: data.tax_rate,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> Client {
        let now = Utc::now();
        Client {
            id: "c1".to_string(),
            name: "Cliente S.L.".to_string(),
            tax_id: "A87654321".to_string(),
            address: "Avenida Cliente 456, 28002 Madrid".to_string(),
            contact: "info@cliente.es".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    fn test_product() -> Product {
        let now = Utc::now();
        Product {
            id: "p1".to_string(),
            name: "Diseño web".to_string(),
            description: "Diseño de página web corporativa".to_string(),
            price: 121.0,
            category: "Servicios".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_new_draft_defaults() {
        let draft = InvoiceDraft::new();
        assert_eq!(draft.invoice_number(), "");
        assert_eq!(draft.line_count(), 1);
        assert_eq!(draft.items()[0], LineItem::new());
        assert_eq!(draft.tax_rate().percent(), 21.0);
        assert_eq!(draft.totals(), Totals::ZERO);
    }

    #[test]
    fn test_add_and_edit_lines() {
        let mut draft = InvoiceDraft::new();
        draft.set_line_description(0, "Consultoría").unwrap();
        draft.set_line_quantity(0, 2).unwrap();
        draft.set_line_unit_price(0, 121.0).unwrap();

        draft.add_line().unwrap();
        draft.set_line_unit_price(1, 60.5).unwrap();

        assert_eq!(draft.line_count(), 2);
        let t = draft.totals();
        assert_eq!(t.total, 302.5);
        assert!((t.subtotal - 250.0).abs() < 1e-9);
        assert!((t.tax - 52.5).abs() < 1e-9);
    }

    #[test]
    fn test_cannot_remove_last_line() {
        let mut draft = InvoiceDraft::new();
        assert!(matches!(draft.remove_line(0), Err(CoreError::LastLine)));

        draft.add_line().unwrap();
        draft.remove_line(1).unwrap();
        assert_eq!(draft.line_count(), 1);
    }

    #[test]
    fn test_remove_line_out_of_range() {
        let mut draft = InvoiceDraft::new();
        draft.add_line().unwrap();
        assert!(matches!(
            draft.remove_line(5),
            Err(CoreError::LineOutOfRange { index: 5, len: 2 })
        ));
    }

    #[test]
    fn test_field_edits_are_validated() {
        let mut draft = InvoiceDraft::new();

        assert!(draft.set_line_quantity(0, 0).is_err());
        assert!(draft.set_line_quantity(0, -3).is_err());
        assert!(draft.set_line_unit_price(0, -1.0).is_err());
        assert!(draft.set_line_unit_price(0, f64::NAN).is_err());
        assert!(draft.set_tax_rate(101.0).is_err());
        assert!(draft.set_tax_rate(-1.0).is_err());

        // Nothing changed
        assert_eq!(draft.items()[0], LineItem::new());
        assert_eq!(draft.tax_rate().percent(), 21.0);
    }

    #[test]
    fn test_use_client_and_product() {
        let mut draft = InvoiceDraft::new();
        draft.use_client(&test_client());
        assert_eq!(draft.client().name, "Cliente S.L.");
        assert_eq!(draft.client().tax_id, "A87654321");

        draft.add_product_line(&test_product()).unwrap();
        assert_eq!(draft.line_count(), 2);
        assert_eq!(draft.items()[1].unit_price, 121.0);
        assert_eq!(draft.items()[1].description, "Diseño de página web corporativa");
    }

    #[test]
    fn test_copy_from_clears_number_and_keeps_content() {
        let mut source = InvoiceDraft::new();
        source.set_invoice_number("FAC-2024-001");
        source.set_line_description(0, "Servicio").unwrap();
        source.set_line_unit_price(0, 121.0).unwrap();
        source.set_tax_rate(10.0).unwrap();
        let invoice = source
            .into_invoice("id-1".to_string(), Utc::now())
            .unwrap();

        let mut draft = InvoiceDraft::new();
        draft.copy_from(&invoice);

        assert_eq!(draft.invoice_number(), "");
        assert_eq!(draft.items(), invoice.items.as_slice());
        assert_eq!(draft.tax_rate().percent(), 10.0);
    }

    #[test]
    fn test_reset_restores_blank_form() {
        let mut draft = InvoiceDraft::new();
        draft.set_invoice_number("FAC-1");
        draft.add_line().unwrap();
        draft.set_tax_rate(4.0).unwrap();

        draft.reset();
        assert_eq!(draft.invoice_number(), "");
        assert_eq!(draft.line_count(), 1);
        assert_eq!(draft.tax_rate().percent(), 21.0);
    }

    #[test]
    fn test_into_invoice_requires_number() {
        let draft = InvoiceDraft::new();
        assert!(draft.into_invoice("id".to_string(), Utc::now()).is_err());

        let mut draft = InvoiceDraft::new();
        draft.set_invoice_number("FAC-2024-002");
        let invoice = draft.into_invoice("id".to_string(), Utc::now()).unwrap();
        assert_eq!(invoice.invoice_number, "FAC-2024-002");
        assert_eq!(invoice.items.len(), 1);
    }

    #[test]
    fn test_draft_json_round_trip() {
        let mut draft = InvoiceDraft::new();
        draft.set_invoice_number("FAC-2024-003");
        draft.set_line_description(0, "Hosting anual").unwrap();
        draft.set_line_unit_price(0, 60.5).unwrap();

        let json = serde_json::to_string(&draft).unwrap();
        let back: InvoiceDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(back, draft);
    }

    #[test]
    fn test_draft_deserialization_rejects_invalid() {
        // No lines
        let json = r#"{
            "invoice_number": "",
            "date": "2024-05-01",
            "issuer": {"name":"","tax_id":"","address":"","contact":""},
            "client": {"name":"","tax_id":"","address":"","contact":""},
            "items": [],
            "tax_rate": 21.0
        }"#;
        assert!(serde_json::from_str::<InvoiceDraft>(json).is_err());

        // Non-positive quantity
        let json = r#"{
            "invoice_number": "",
            "date": "2024-05-01",
            "issuer": {"name":"","tax_id":"","address":"","contact":""},
            "client": {"name":"","tax_id":"","address":"","contact":""},
            "items": [{"description":"","quantity":0,"unit_price":1.0}],
            "tax_rate": 21.0
        }"#;
        assert!(serde_json::from_str::<InvoiceDraft>(json).is_err());

        // Rate a TaxRate itself allows but the 0-100 form range does not
        let json = r#"{
            "invoice_number": "",
            "date": "2024-05-01",
            "issuer": {"name":"","tax_id":"","address":"","contact":""},
            "client": {"name":"","tax_id":"","address":"","contact":""},
            "items": [{"description":"","quantity":1,"unit_price":1.0}],
            "tax_rate": -50.0
        }"#;
        assert!(serde_json::from_str::<InvoiceDraft>(json).is_err());
    }
}
