//! `factura invoices` - saved invoices.
//!
//! `copy` implements the reuse flow: a saved invoice becomes a fresh
//! draft with the number cleared and the date reset to today.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;

use factura_core::{validation, InvoiceDraft};
use factura_render::format::format_eur;

#[derive(Subcommand)]
pub enum InvoiceAction {
    /// List saved invoices, newest first
    List {
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
    /// Start a new draft from a saved invoice
    Copy {
        id: String,
        /// Where to write the new draft
        #[arg(long, default_value = "draft.json")]
        out: PathBuf,
    },
    /// Remove a saved invoice by id
    Remove { id: String },
}

pub async fn run(action: InvoiceAction) -> Result<()> {
    let db = super::open_db().await?;
    let repo = db.invoices();

    match action {
        InvoiceAction::List { limit } => {
            let invoices = repo.list(limit).await?;
            if invoices.is_empty() {
                println!("No invoices saved");
                return Ok(());
            }
            for inv in invoices {
                let totals = inv.totals();
                println!(
                    "{}  {}  {}  {}  {}",
                    inv.id,
                    inv.invoice_number,
                    inv.date,
                    inv.client.name,
                    format_eur(totals.total)
                );
            }
        }

        InvoiceAction::Copy { id, out } => {
            validation::validate_uuid(&id).context("invalid invoice id")?;
            let invoice = repo
                .get_by_id(&id)
                .await?
                .with_context(|| format!("invoice {id} not found"))?;

            // Drafts only accept rates in the 0-100 form range; refuse to
            // write a file that could not be loaded back.
            validation::validate_tax_rate_percent(invoice.tax_rate.percent())
                .with_context(|| {
                    format!(
                        "invoice {} has tax rate {} outside the draft range",
                        invoice.invoice_number, invoice.tax_rate
                    )
                })?;

            let mut draft = InvoiceDraft::new();
            draft.copy_from(&invoice);

            let json = serde_json::to_string_pretty(&draft)?;
            std::fs::write(&out, json)
                .with_context(|| format!("writing {}", out.display()))?;
            println!(
                "Draft copied from {} to {} (number cleared, date reset)",
                invoice.invoice_number,
                out.display()
            );
        }

        InvoiceAction::Remove { id } => {
            validation::validate_uuid(&id).context("invalid invoice id")?;
            repo.delete(&id).await?;
            println!("Invoice {id} removed");
        }
    }

    Ok(())
}
