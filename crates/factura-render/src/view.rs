//! # Document View
//!
//! The formatted, render-ready projection of an invoice.
//!
//! ## Why a View Layer?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  One View, Two Renderers                                │
//! │                                                                         │
//! │  Invoice / InvoiceDraft                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DocumentView::from_*  ◄── derives totals ONCE, formats every           │
//! │       │                    number ONCE                                  │
//! │       ├──────────────┐                                                  │
//! │       ▼              ▼                                                  │
//! │  preview::render  pdf::render                                           │
//! │  (terminal text)  (A4 printpdf)                                         │
//! │                                                                         │
//! │  Both renderers consume the SAME pre-formatted strings, so the          │
//! │  on-screen preview and the exported PDF show identical numbers          │
//! │  by construction, not by coincidence.                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use factura_core::pricing::{self, Totals};
use factura_core::{Invoice, InvoiceDraft, LineItem, Party, TaxRate};

use crate::format::{format_amount, format_date, format_eur};

// =============================================================================
// Row View
// =============================================================================

/// One formatted table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub description: String,
    /// Quantity as entered ("2").
    pub quantity: String,
    /// Derived pre-tax base for the whole row, two decimals.
    pub base: String,
    /// Tax-inclusive row total, two decimals.
    pub total: String,
}

// =============================================================================
// Document View
// =============================================================================

/// Fully formatted invoice, ready for any renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentView {
    /// Invoice number, or a placeholder while the draft is unnumbered.
    pub invoice_number: String,
    /// Issue date as dd/mm/YYYY.
    pub date: String,
    pub issuer: Party,
    pub client: Party,
    pub rows: Vec<RowView>,
    /// Totals block label for the tax row, e.g. "IVA (21%)".
    pub tax_label: String,
    /// "Base Imponible" amount with euro sign.
    pub subtotal: String,
    /// Tax amount with euro sign.
    pub tax: String,
    /// "Total con IVA" amount with euro sign.
    pub total: String,
    /// Full-precision breakdown the strings were derived from.
    pub totals: Totals,
}

impl DocumentView {
    /// Builds a view from raw invoice parts.
    pub fn new(
        invoice_number: &str,
        date: NaiveDate,
        issuer: &Party,
        client: &Party,
        items: &[LineItem],
        tax_rate: TaxRate,
    ) -> Self {
        let totals = pricing::totals(items, tax_rate);

        let rows = items
            .iter()
            .map(|item| {
                let row_total = item.line_total();
                let row_base = pricing::pre_tax_price(row_total, tax_rate);
                RowView {
                    description: item.description.clone(),
                    quantity: item.quantity.to_string(),
                    base: format_amount(row_base),
                    total: format_amount(row_total),
                }
            })
            .collect();

        let invoice_number = if invoice_number.trim().is_empty() {
            "(sin número)".to_string()
        } else {
            invoice_number.to_string()
        };

        DocumentView {
            invoice_number,
            date: format_date(date),
            issuer: issuer.clone(),
            client: client.clone(),
            rows,
            tax_label: format!("IVA ({}%)", tax_rate.percent()),
            subtotal: format_eur(totals.subtotal),
            tax: format_eur(totals.tax),
            total: format_eur(totals.total),
            totals,
        }
    }

    /// Builds a view from a stored invoice.
    pub fn from_invoice(invoice: &Invoice) -> Self {
        DocumentView::new(
            &invoice.invoice_number,
            invoice.date,
            &invoice.issuer,
            &invoice.client,
            &invoice.items,
            invoice.tax_rate,
        )
    }

    /// Builds a view from the draft being edited.
    pub fn from_draft(draft: &InvoiceDraft) -> Self {
        DocumentView::new(
            draft.invoice_number(),
            draft.date(),
            draft.issuer(),
            draft.client(),
            draft.items(),
            draft.tax_rate(),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
