//! # Text Preview
//!
//! Renders a [`DocumentView`] as fixed-width terminal text. Shown by
//! `factura preview` so the user can check the numbers before exporting
//! the PDF; both outputs read from the same view, so they always agree.

use crate::view::DocumentView;

const WIDTH: usize = 78;
const DESC_WIDTH: usize = 38;

/// Renders the invoice preview as plain text.
pub fn render(view: &DocumentView) -> String {
    let mut out = String::new();
    let rule = "=".repeat(WIDTH);
    let thin = "-".repeat(WIDTH);

    out.push_str(&rule);
    out.push('\n');
    out.push_str(&format!(
        "{:<w$}\n",
        format!("FACTURA  Nº: {}    Fecha: {}", view.invoice_number, view.date),
        w = WIDTH
    ));
    out.push_str(&rule);
    out.push('\n');

    out.push_str("Datos del Emisor\n");
    push_party_lines(&mut out, &view.issuer.name, &view.issuer.tax_id, &view.issuer.address, &view.issuer.contact);
    out.push('\n');

    out.push_str("Datos del Cliente\n");
    push_party_lines(&mut out, &view.client.name, &view.client.tax_id, &view.client.address, &view.client.contact);
    out.push('\n');

    out.push_str(&thin);
    out.push('\n');
    out.push_str(&format!(
        "{:<desc$} {:>8} {:>12} {:>14}\n",
        "Descripción",
        "Cantidad",
        "Base",
        "Total con IVA",
        desc = DESC_WIDTH
    ));
    out.push_str(&thin);
    out.push('\n');

    for row in &view.rows {
        out.push_str(&format!(
            "{:<desc$} {:>8} {:>12} {:>14}\n",
            truncate(&row.description, DESC_WIDTH),
            row.quantity,
            row.base,
            row.total,
            desc = DESC_WIDTH
        ));
    }

    out.push_str(&thin);
    out.push('\n');
    out.push_str(&format!("{:>62}  {:>14}\n", "Base Imponible:", view.subtotal));
    out.push_str(&format!(
        "{:>62}  {:>14}\n",
        format!("{}:", view.tax_label),
        view.tax
    ));
    out.push_str(&format!("{:>62}  {:>14}\n", "Total con IVA:", view.total));
    out.push_str(&rule);
    out.push('\n');

    out
}

fn push_party_lines(out: &mut String, name: &str, tax_id: &str, address: &str, contact: &str) {
    for value in [name, tax_id, address, contact] {
        if !value.trim().is_empty() {
            out.push_str(&format!("  {}\n", value));
        }
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{cut}…")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use factura_core::{LineItem, Party, TaxRate};

    fn sample_view() -> DocumentView {
        let items = vec![
            LineItem {
                description: "Diseño web".to_string(),
                quantity: 2,
                unit_price: 121.0,
            },
            LineItem {
                description: "Hosting".to_string(),
                quantity: 1,
                unit_price: 60.5,
            },
        ];
        let issuer = Party {
            name: "Mi Empresa S.L.".to_string(),
            tax_id: "B12345678".to_string(),
            address: String::new(),
            contact: String::new(),
        };
        DocumentView::new(
            "FAC-2024-001",
            NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            &issuer,
            &Party::default(),
            &items,
            TaxRate::new(21.0).unwrap(),
        )
    }

    #[test]
    fn test_preview_contains_header_and_totals() {
        let text = render(&sample_view());

        assert!(text.contains("FACTURA"));
        assert!(text.contains("Nº: FAC-2024-001"));
        assert!(text.contains("Fecha: 05/03/2024"));
        assert!(text.contains("Base Imponible:"));
        assert!(text.contains("IVA (21%):"));
        assert!(text.contains("302.50 €"));
        assert!(text.contains("250.00 €"));
        assert!(text.contains("52.50 €"));
    }

    #[test]
    fn test_preview_skips_empty_party_lines() {
        let text = render(&sample_view());
        assert!(text.contains("  Mi Empresa S.L.\n"));
        // Blank address/contact lines are omitted, not printed empty
        assert!(!text.contains("\n  \n"));
    }

    #[test]
    fn test_long_description_is_truncated() {
        let long = "x".repeat(100);
        assert_eq!(truncate(&long, 10).chars().count(), 10);
        assert!(truncate(&long, 10).ends_with('…'));
        assert_eq!(truncate("corto", 10), "corto");
    }
}
