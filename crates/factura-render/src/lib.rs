//! # factura-render: Document Rendering for Factura
//!
//! Turns invoices into human-facing documents: a terminal text preview
//! and an A4 PDF export.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Rendering Pipeline                                 │
//! │                                                                         │
//! │  factura-core (Invoice / InvoiceDraft)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  view::DocumentView  ◄── totals derived once, numbers formatted once   │
//! │       │                                                                 │
//! │       ├── preview::render  → String (terminal)                         │
//! │       └── pdf::render      → Vec<u8> (A4 PDF via printpdf)             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`view`] - formatted projection shared by all renderers
//! - [`format`] - the display-layer rounding rules (the only rounding anywhere)
//! - [`preview`] - plain-text renderer
//! - [`pdf`] - printpdf renderer
//! - [`error`] - render error types

pub mod error;
pub mod format;
pub mod pdf;
pub mod preview;
pub mod view;

pub use error::{RenderError, RenderResult};
pub use view::{DocumentView, RowView};
