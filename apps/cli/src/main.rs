//! # Factura CLI
//!
//! Terminal front end for the Factura invoicing engine.
//!
//! ## Command Overview
//! ```text
//! factura init                          Create/migrate the database
//! factura template [--out draft.json]   Emit a starter draft
//! factura preview <draft.json>          Text preview of a draft
//! factura export <draft.json> --out f.pdf [--save]
//! factura clients  add|list|remove      Stored client records
//! factura products add|list|remove      Stored product records
//! factura invoices list|copy            Saved invoices
//! ```

mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "factura", version, about = "Tax-inclusive invoice creation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the database and apply migrations
    Init,
    /// Write a starter draft JSON (the default form state)
    Template(commands::draft::TemplateArgs),
    /// Print the text preview of a draft file
    Preview(commands::draft::PreviewArgs),
    /// Render a draft to PDF, optionally saving the invoice
    Export(commands::draft::ExportArgs),
    /// Manage saved clients
    Clients {
        #[command(subcommand)]
        action: commands::clients::ClientAction,
    },
    /// Manage saved products
    Products {
        #[command(subcommand)]
        action: commands::products::ProductAction,
    },
    /// List or reuse saved invoices
    Invoices {
        #[command(subcommand)]
        action: commands::invoices::InvoiceAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; ignore a missing file
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Init => commands::init::run().await,
        Command::Template(args) => commands::draft::template(args),
        Command::Preview(args) => commands::draft::preview(args),
        Command::Export(args) => commands::draft::export(args).await,
        Command::Clients { action } => commands::clients::run(action).await,
        Command::Products { action } => commands::products::run(action).await,
        Command::Invoices { action } => commands::invoices::run(action).await,
    }
}
