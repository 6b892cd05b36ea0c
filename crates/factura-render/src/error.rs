//! # Render Error Types

use thiserror::Error;

/// Document rendering errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The invoice has more lines than fit on a single A4 page.
    ///
    /// Single-page output is a deliberate constraint of the layout; the
    /// caller should split the invoice rather than overflow silently.
    #[error("Invoice with {lines} lines does not fit on one page")]
    PageOverflow { lines: usize },

    /// The PDF backend failed (font registration, document write).
    #[error("PDF generation failed: {0}")]
    Pdf(String),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
