//! # Invoice Repository
//!
//! Database operations for invoices.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     invoices table                                      │
//! │                                                                         │
//! │  id             TEXT  (UUID)                                           │
//! │  invoice_number TEXT                                                    │
//! │  date           TEXT  (YYYY-MM-DD)                                     │
//! │  issuer_json    TEXT  ◄── Party serialized as JSON                     │
//! │  client_json    TEXT  ◄── Party serialized as JSON                     │
//! │  items_json     TEXT  ◄── Vec<LineItem> serialized as JSON             │
//! │  tax_rate       REAL  (percentage)                                     │
//! │  created_at     TEXT  (ISO 8601, UTC)                                  │
//! │  updated_at     TEXT                                                    │
//! │                                                                         │
//! │  NO totals columns. Subtotal/tax/total are derived from                │
//! │  items_json + tax_rate on every read, so a stored invoice can          │
//! │  never carry a breakdown that disagrees with its lines.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Row → Domain Conversion
//! Reads go through [`InvoiceRow`] and a fallible conversion that
//! re-validates the JSON blobs and the stored rate. A database file that
//! was hand-edited into an invalid state surfaces as
//! [`DbError::Corrupt`], never as a panic or a silent bad invoice.

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use factura_core::{Invoice, LineItem, Party, TaxRate};

// =============================================================================
// Row Type
// =============================================================================

/// Raw invoice row as stored in SQLite.
#[derive(Debug, sqlx::FromRow)]
struct InvoiceRow {
    id: String,
    invoice_number: String,
    date: NaiveDate,
    issuer_json: String,
    client_json: String,
    items_json: String,
    tax_rate: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<InvoiceRow> for Invoice {
    type Error = DbError;

    fn try_from(row: InvoiceRow) -> Result<Self, Self::Error> {
        let issuer: Party = serde_json::from_str(&row.issuer_json)
            .map_err(|e| DbError::corrupt("Invoice", &row.id, format!("issuer_json: {e}")))?;
        let client: Party = serde_json::from_str(&row.client_json)
            .map_err(|e| DbError::corrupt("Invoice", &row.id, format!("client_json: {e}")))?;
        let items: Vec<LineItem> = serde_json::from_str(&row.items_json)
            .map_err(|e| DbError::corrupt("Invoice", &row.id, format!("items_json: {e}")))?;

        if items.is_empty() {
            return Err(DbError::corrupt("Invoice", &row.id, "no line items"));
        }

        let tax_rate = TaxRate::new(row.tax_rate)
            .map_err(|e| DbError::corrupt("Invoice", &row.id, e.to_string()))?;

        Ok(Invoice {
            id: row.id,
            invoice_number: row.invoice_number,
            date: row.date,
            issuer,
            client,
            items,
            tax_rate,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for invoice database operations.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: SqlitePool,
}

impl InvoiceRepository {
    /// Creates a new InvoiceRepository.
    pub fn new(pool: SqlitePool) -> Self {
        InvoiceRepository { pool }
    }

    /// Inserts a new invoice.
    ///
    /// ## Returns
    /// * `Ok(())` - Invoice stored
    /// * `Err(DbError::Internal)` - A block failed to serialize (would
    ///   indicate a bug, domain types always serialize)
    pub async fn insert(&self, invoice: &Invoice) -> DbResult<()> {
        debug!(id = %invoice.id, number = %invoice.invoice_number, "Inserting invoice");

        let issuer_json = serde_json::to_string(&invoice.issuer)
            .map_err(|e| DbError::Internal(e.to_string()))?;
        let client_json = serde_json::to_string(&invoice.client)
            .map_err(|e| DbError::Internal(e.to_string()))?;
        let items_json = serde_json::to_string(&invoice.items)
            .map_err(|e| DbError::Internal(e.to_string()))?;

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, invoice_number, date,
                issuer_json, client_json, items_json,
                tax_rate, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&invoice.id)
        .bind(&invoice.invoice_number)
        .bind(invoice.date)
        .bind(issuer_json)
        .bind(client_json)
        .bind(items_json)
        .bind(invoice.tax_rate.percent())
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets an invoice by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Invoice))` - Invoice found and valid
    /// * `Ok(None)` - No such invoice
    /// * `Err(DbError::Corrupt)` - Row exists but fails domain checks
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Invoice>> {
        let row = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT id, invoice_number, date,
                   issuer_json, client_json, items_json,
                   tax_rate, created_at, updated_at
            FROM invoices
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Invoice::try_from).transpose()
    }

    /// Lists invoices, newest first.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Invoice>> {
        let rows = sqlx::query_as::<_, InvoiceRow>(
            r#"
            SELECT id, invoice_number, date,
                   issuer_json, client_json, items_json,
                   tax_rate, created_at, updated_at
            FROM invoices
            ORDER BY created_at DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Invoice::try_from).collect()
    }

    /// Updates an existing invoice, bumping `updated_at`.
    ///
    /// ## Returns
    /// * `Err(DbError::NotFound)` - Invoice doesn't exist
    pub async fn update(&self, invoice: &Invoice) -> DbResult<()> {
        debug!(id = %invoice.id, "Updating invoice");

        let issuer_json = serde_json::to_string(&invoice.issuer)
            .map_err(|e| DbError::Internal(e.to_string()))?;
        let client_json = serde_json::to_string(&invoice.client)
            .map_err(|e| DbError::Internal(e.to_string()))?;
        let items_json = serde_json::to_string(&invoice.items)
            .map_err(|e| DbError::Internal(e.to_string()))?;

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE invoices SET
                invoice_number = ?2,
                date = ?3,
                issuer_json = ?4,
                client_json = ?5,
                items_json = ?6,
                tax_rate = ?7,
                updated_at = ?8
            WHERE id = ?1
            "#,
        )
        .bind(&invoice.id)
        .bind(&invoice.invoice_number)
        .bind(invoice.date)
        .bind(issuer_json)
        .bind(client_json)
        .bind(items_json)
        .bind(invoice.tax_rate.percent())
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Invoice", &invoice.id));
        }

        Ok(())
    }

    /// Deletes an invoice by ID.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting invoice");

        let result = sqlx::query("DELETE FROM invoices WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Invoice", id));
        }

        Ok(())
    }

    /// Counts stored invoices (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM invoices")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::generate_id;
    use factura_core::InvoiceDraft;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn test_invoice(number: &str) -> Invoice {
        let mut draft = InvoiceDraft::new();
        draft.set_invoice_number(number);
        draft.set_issuer(Party {
            name: "Mi Empresa S.L.".to_string(),
            tax_id: "B12345678".to_string(),
            address: "Calle Mayor 1, 28001 Madrid".to_string(),
            contact: "factura@miempresa.es".to_string(),
        });
        draft.set_line_description(0, "Consultoría").unwrap();
        draft.set_line_quantity(0, 2).unwrap();
        draft.set_line_unit_price(0, 121.0).unwrap();
        draft.into_invoice(generate_id(), Utc::now()).unwrap()
    }

    #[tokio::test]
    async fn test_insert_and_get_round_trip() {
        let db = test_db().await;
        let repo = db.invoices();

        let invoice = test_invoice("FAC-2024-001");
        repo.insert(&invoice).await.unwrap();

        let loaded = repo.get_by_id(&invoice.id).await.unwrap().unwrap();
        assert_eq!(loaded.invoice_number, "FAC-2024-001");
        assert_eq!(loaded.items, invoice.items);
        assert_eq!(loaded.tax_rate, invoice.tax_rate);
        assert_eq!(loaded.issuer.name, "Mi Empresa S.L.");
    }

    #[tokio::test]
    async fn test_get_missing_returns_none() {
        let db = test_db().await;
        let repo = db.invoices();

        assert!(repo.get_by_id("no-such-id").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let db = test_db().await;
        let repo = db.invoices();

        let mut first = test_invoice("FAC-2024-001");
        first.created_at = Utc::now() - chrono::Duration::hours(1);
        repo.insert(&first).await.unwrap();
        repo.insert(&test_invoice("FAC-2024-002")).await.unwrap();

        let all = repo.list(10).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].invoice_number, "FAC-2024-002");
        assert_eq!(all[1].invoice_number, "FAC-2024-001");
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = test_db().await;
        let repo = db.invoices();

        let mut invoice = test_invoice("FAC-2024-001");
        repo.insert(&invoice).await.unwrap();

        invoice.invoice_number = "FAC-2024-001-R".to_string();
        repo.update(&invoice).await.unwrap();

        let loaded = repo.get_by_id(&invoice.id).await.unwrap().unwrap();
        assert_eq!(loaded.invoice_number, "FAC-2024-001-R");

        repo.delete(&invoice.id).await.unwrap();
        assert!(repo.get_by_id(&invoice.id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(&invoice.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_corrupt_row_is_reported_not_panicked() {
        let db = test_db().await;
        let repo = db.invoices();

        // Bypass the repository to plant an invalid row
        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, invoice_number, date,
                issuer_json, client_json, items_json,
                tax_rate, created_at, updated_at
            ) VALUES ('bad-1', 'FAC-X', '2024-01-01',
                      '{}', '{}', 'not json',
                      21.0, '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')
            "#,
        )
        .execute(db.pool())
        .await
        .unwrap();

        assert!(matches!(
            repo.get_by_id("bad-1").await,
            Err(DbError::Corrupt { .. })
        ));
    }

    #[tokio::test]
    async fn test_corrupt_tax_rate_is_reported() {
        let db = test_db().await;
        let repo = db.invoices();

        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, invoice_number, date,
                issuer_json, client_json, items_json,
                tax_rate, created_at, updated_at
            ) VALUES ('bad-2', 'FAC-Y', '2024-01-01',
                      '{"name":"","tax_id":"","address":"","contact":""}',
                      '{"name":"","tax_id":"","address":"","contact":""}',
                      '[{"description":"","quantity":1,"unit_price":1.0}]',
                      -100.0, '2024-01-01T00:00:00Z', '2024-01-01T00:00:00Z')
            "#,
        )
        .execute(db.pool())
        .await
        .unwrap();

        assert!(matches!(
            repo.get_by_id("bad-2").await,
            Err(DbError::Corrupt { .. })
        ));
    }
}
