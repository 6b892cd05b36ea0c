//! `factura template` / `preview` / `export` - the draft workflow.
//!
//! A draft lives in a JSON file the user edits by hand (or seeds from
//! `template` / `invoices copy`). Deserialization re-validates every
//! field, so a broken draft file fails with a domain message instead of
//! producing a wrong invoice.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;

use factura_core::InvoiceDraft;
use factura_db::generate_id;
use factura_render::{pdf, preview, DocumentView};

#[derive(Args)]
pub struct TemplateArgs {
    /// Where to write the starter draft (stdout when omitted)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// Draft JSON file
    pub draft: PathBuf,
}

#[derive(Args)]
pub struct ExportArgs {
    /// Draft JSON file
    pub draft: PathBuf,

    /// Output PDF path
    #[arg(long)]
    pub out: PathBuf,

    /// Also save the invoice to the database
    #[arg(long)]
    pub save: bool,
}

/// Writes the default form state as a starting point.
pub fn template(args: TemplateArgs) -> Result<()> {
    let draft = InvoiceDraft::new();
    let json = serde_json::to_string_pretty(&draft)?;

    match args.out {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("Draft template written to {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Prints the text preview of a draft.
pub fn preview(args: PreviewArgs) -> Result<()> {
    let draft = load_draft(&args.draft)?;
    let view = DocumentView::from_draft(&draft);
    print!("{}", preview::render(&view));
    Ok(())
}

/// Renders a draft to PDF; with `--save`, also persists the invoice.
///
/// The PDF and the preview both come from the same [`DocumentView`], so
/// what `preview` showed is exactly what lands in the file.
pub async fn export(args: ExportArgs) -> Result<()> {
    let draft = load_draft(&args.draft)?;
    let view = DocumentView::from_draft(&draft);

    let bytes = pdf::render(&view)?;
    std::fs::write(&args.out, bytes)
        .with_context(|| format!("writing {}", args.out.display()))?;
    println!("PDF written to {}", args.out.display());

    if args.save {
        let invoice = draft
            .into_invoice(generate_id(), Utc::now())
            .context("draft cannot be saved")?;
        let db = super::open_db().await?;
        db.invoices().insert(&invoice).await?;
        println!("Invoice {} saved ({})", invoice.invoice_number, invoice.id);
    }

    Ok(())
}

fn load_draft(path: &PathBuf) -> Result<InvoiceDraft> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let draft: InvoiceDraft =
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?;
    Ok(draft)
}
