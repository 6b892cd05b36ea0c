//! # CLI Configuration
//!
//! Resolves where the SQLite database lives.
//!
//! ## Resolution Order
//! 1. `FACTURA_DB` environment variable (also honored from `.env`)
//! 2. Platform data directory (`~/.local/share/factura/factura.db` on
//!    Linux, the equivalent on macOS/Windows)

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;

/// Environment variable overriding the database location.
pub const DB_ENV_VAR: &str = "FACTURA_DB";

/// Returns the database path, creating the parent directory if needed.
pub fn database_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var(DB_ENV_VAR) {
        return Ok(PathBuf::from(path));
    }

    let dirs = ProjectDirs::from("", "", "factura")
        .context("could not determine a data directory for this platform")?;

    let data_dir = dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("creating data directory {}", data_dir.display()))?;

    Ok(data_dir.join("factura.db"))
}
