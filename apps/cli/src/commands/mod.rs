//! # CLI Commands
//!
//! One module per command group. Each command opens its own database
//! handle (cheap: a pooled SQLite file) and translates domain errors
//! into `anyhow` context for the terminal.

pub mod clients;
pub mod draft;
pub mod init;
pub mod invoices;
pub mod products;

use anyhow::Result;
use factura_db::{Database, DbConfig};

use crate::config;

/// Opens the configured database, running migrations if needed.
pub async fn open_db() -> Result<Database> {
    let path = config::database_path()?;
    let db = Database::new(DbConfig::new(path)).await?;
    Ok(db)
}
