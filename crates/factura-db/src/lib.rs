//! # factura-db: Database Layer for Factura
//!
//! This crate provides database access for the Factura invoicing tool.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Factura Data Flow                                │
//! │                                                                         │
//! │  CLI command (factura invoices list)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    factura-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │ (invoice.rs,  │    │  (embedded)  │  │   │
//! │  │   │               │    │  client.rs,   │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  product.rs)  │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (~/.local/share/factura/factura.db)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (invoice, client, product)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use factura_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("factura.db")).await?;
//! let invoices = db.invoices().list(20).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::client::ClientRepository;
pub use repository::generate_id;
pub use repository::invoice::InvoiceRepository;
pub use repository::product::ProductRepository;
