//! # Repository Module
//!
//! Repository implementations for database access.
//!
//! ## Repository Pattern
//! Each entity gets its own repository struct wrapping the shared pool.
//! Repositories own the row↔domain mapping: rows come out of SQLite as
//! plain column structs and are converted into validated domain types
//! before they leave this crate.

pub mod client;
pub mod invoice;
pub mod product;

pub use client::ClientRepository;
pub use invoice::InvoiceRepository;
pub use product::ProductRepository;

use uuid::Uuid;

/// Generates a new record ID (UUID v4).
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
