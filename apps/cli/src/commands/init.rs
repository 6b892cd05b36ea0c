//! `factura init` - create the database file and apply migrations.

use anyhow::Result;
use factura_db::migrations;

use crate::config;

pub async fn run() -> Result<()> {
    let path = config::database_path()?;
    let db = super::open_db().await?;

    let (total, applied) = migrations::migration_status(db.pool()).await?;

    println!("Database ready: {}", path.display());
    println!("Migrations applied: {applied}/{total}");
    Ok(())
}
