//! # PDF Export
//!
//! Renders a [`DocumentView`] as a single-page A4 PDF.
//!
//! ## Layout
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  FACTURA                    Nº: FAC-2024-001 │
//! │                             Fecha: 05/03/2024│
//! │  ─────────────────────────────────────────── │
//! │  Datos del Emisor        Datos del Cliente   │
//! │  Mi Empresa S.L.         Cliente S.A.        │
//! │  B12345678               A87654321           │
//! │  ...                     ...                 │
//! │  ─────────────────────────────────────────── │
//! │  Descripción    Cantidad    Base    Total    │
//! │  Diseño web        2       200.00   242.00   │
//! │  ─────────────────────────────────────────── │
//! │                 Base Imponible:   250.00 €   │
//! │                 IVA (21%):         52.50 €   │
//! │                 Total con IVA:    302.50 €   │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! Every number printed here is a pre-formatted string from the view;
//! this module never touches the pricing arithmetic.

use printpdf::{BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point};
use tracing::debug;

use crate::error::{RenderError, RenderResult};
use crate::view::DocumentView;
use factura_core::Party;

// A4 page, margins and column positions in mm
const PAGE_W: f32 = 210.0;
const PAGE_H: f32 = 297.0;
const MARGIN_L: f32 = 15.0;
const MARGIN_R: f32 = 195.0;

const X_QTY: f32 = 120.0;
const X_BASE: f32 = 145.0;
const X_TOTAL: f32 = 172.0;

const ROW_STEP: f32 = 6.0;
const TABLE_FLOOR: f32 = 55.0;

/// Renders the invoice as PDF bytes.
///
/// ## Errors
/// - [`RenderError::PageOverflow`] when the rows don't fit on one page
/// - [`RenderError::Pdf`] when the PDF backend fails
pub fn render(view: &DocumentView) -> RenderResult<Vec<u8>> {
    debug!(number = %view.invoice_number, rows = view.rows.len(), "Rendering PDF");

    let (doc, page1, layer1) = PdfDocument::new("Factura", Mm(PAGE_W), Mm(PAGE_H), "Layer 1");
    let layer = doc.get_page(page1).get_layer(layer1);

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;

    // Header: title left, number and date right
    text(&layer, &font_bold, "FACTURA", 22.0, MARGIN_L, 280.0);
    text(
        &layer,
        &font_bold,
        &format!("Nº: {}", view.invoice_number),
        11.0,
        130.0,
        283.0,
    );
    text(
        &layer,
        &font,
        &format!("Fecha: {}", view.date),
        11.0,
        130.0,
        277.0,
    );

    divider(&layer, 271.0);

    // Party blocks side by side
    let mut y = 263.0;
    text(&layer, &font_bold, "Datos del Emisor", 11.0, MARGIN_L, y);
    text(&layer, &font_bold, "Datos del Cliente", 11.0, 110.0, y);
    y -= 6.0;
    let left_bottom = party_block(&layer, &font, &view.issuer, MARGIN_L, y);
    let right_bottom = party_block(&layer, &font, &view.client, 110.0, y);
    y = left_bottom.min(right_bottom) - 6.0;

    // Table header
    text(&layer, &font_bold, "Descripción", 10.0, MARGIN_L, y);
    text(&layer, &font_bold, "Cantidad", 10.0, X_QTY, y);
    text(&layer, &font_bold, "Base", 10.0, X_BASE, y);
    text(&layer, &font_bold, "Total con IVA", 10.0, X_TOTAL, y);
    y -= 3.0;
    divider(&layer, y);
    y -= ROW_STEP;

    // Rows
    for row in &view.rows {
        if y < TABLE_FLOOR {
            return Err(RenderError::PageOverflow {
                lines: view.rows.len(),
            });
        }

        text(&layer, &font, &row.description, 10.0, MARGIN_L, y);
        text(&layer, &font, &row.quantity, 10.0, X_QTY, y);
        text(&layer, &font, &row.base, 10.0, X_BASE, y);
        text(&layer, &font, &row.total, 10.0, X_TOTAL, y);
        y -= ROW_STEP;
    }

    y -= 2.0;
    divider(&layer, y);

    // Totals block, right aligned labels
    y -= 9.0;
    text(&layer, &font, "Base Imponible:", 11.0, 125.0, y);
    text(&layer, &font, &view.subtotal, 11.0, X_TOTAL, y);
    y -= 7.0;
    text(
        &layer,
        &font,
        &format!("{}:", view.tax_label),
        11.0,
        125.0,
        y,
    );
    text(&layer, &font, &view.tax, 11.0, X_TOTAL, y);
    y -= 8.0;
    text(&layer, &font_bold, "Total con IVA:", 12.0, 125.0, y);
    text(&layer, &font_bold, &view.total, 12.0, X_TOTAL, y);

    let mut writer = std::io::BufWriter::new(Vec::<u8>::new());
    doc.save(&mut writer)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    writer
        .into_inner()
        .map_err(|e| RenderError::Pdf(e.to_string()))
}

fn text(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    content: &str,
    size: f32,
    x: f32,
    y: f32,
) {
    layer.use_text(content, size, Mm(x), Mm(y), font);
}

fn divider(layer: &PdfLayerReference, y: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(MARGIN_L), Mm(y)), false),
            (Point::new(Mm(MARGIN_R), Mm(y)), false),
        ],
        is_closed: false,
    });
}

/// Prints the non-empty lines of a party block, returns the y position
/// below the last printed line.
fn party_block(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    party: &Party,
    x: f32,
    mut y: f32,
) -> f32 {
    for value in [&party.name, &party.tax_id, &party.address, &party.contact] {
        if !value.trim().is_empty() {
            text(layer, font, value, 10.0, x, y);
            y -= 5.0;
        }
    }
    y
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use factura_core::{LineItem, TaxRate};

    fn view_with_rows(n: usize) -> DocumentView {
        let items: Vec<LineItem> = (0..n)
            .map(|i| LineItem {
                description: format!("Concepto {i}"),
                quantity: 1,
                unit_price: 10.0,
            })
            .collect();
        DocumentView::new(
            "FAC-2024-001",
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            &Party::default(),
            &Party::default(),
            &items,
            TaxRate::new(21.0).unwrap(),
        )
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = render(&view_with_rows(3)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_too_many_rows_overflow() {
        assert!(matches!(
            render(&view_with_rows(60)),
            Err(RenderError::PageOverflow { lines: 60 })
        ));
    }
}
