//! # Client Repository
//!
//! Database operations for saved clients. Clients are flat records (no
//! JSON columns), so rows map straight onto the domain type.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use factura_core::Client;

// =============================================================================
// Row Type
// =============================================================================

/// Raw client row as stored in SQLite.
#[derive(Debug, sqlx::FromRow)]
struct ClientRow {
    id: String,
    name: String,
    tax_id: String,
    address: String,
    contact: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: row.id,
            name: row.name,
            tax_id: row.tax_id,
            address: row.address,
            contact: row.contact,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for client database operations.
#[derive(Debug, Clone)]
pub struct ClientRepository {
    pool: SqlitePool,
}

impl ClientRepository {
    /// Creates a new ClientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ClientRepository { pool }
    }

    /// Inserts a new client.
    pub async fn insert(&self, client: &Client) -> DbResult<()> {
        debug!(id = %client.id, name = %client.name, "Inserting client");

        sqlx::query(
            r#"
            INSERT INTO clients (id, name, tax_id, address, contact, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&client.id)
        .bind(&client.name)
        .bind(&client.tax_id)
        .bind(&client.address)
        .bind(&client.contact)
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a client by its ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Client>> {
        let row = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, name, tax_id, address, contact, created_at, updated_at
            FROM clients
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Client::from))
    }

    /// Lists clients sorted by name.
    pub async fn list(&self, limit: u32) -> DbResult<Vec<Client>> {
        let rows = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, name, tax_id, address, contact, created_at, updated_at
            FROM clients
            ORDER BY name
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Client::from).collect())
    }

    /// Updates an existing client, bumping `updated_at`.
    pub async fn update(&self, client: &Client) -> DbResult<()> {
        debug!(id = %client.id, "Updating client");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE clients SET
                name = ?2,
                tax_id = ?3,
                address = ?4,
                contact = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&client.id)
        .bind(&client.name)
        .bind(&client.tax_id)
        .bind(&client.address)
        .bind(&client.contact)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", &client.id));
        }

        Ok(())
    }

    /// Deletes a client by ID.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting client");

        let result = sqlx::query("DELETE FROM clients WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Client", id));
        }

        Ok(())
    }

    /// Counts stored clients.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
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

    fn test_client(name: &str) -> Client {
        let now = Utc::now();
        Client {
            id: generate_id(),
            name: name.to_string(),
            tax_id: "A87654321".to_string(),
            address: "Avenida Cliente 456, 28002 Madrid".to_string(),
            contact: "info@cliente.es".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_insert_get_round_trip() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.clients();

        let client = test_client("Cliente S.L.");
        repo.insert(&client).await.unwrap();

        let loaded = repo.get_by_id(&client.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Cliente S.L.");
        assert_eq!(loaded.tax_id, "A87654321");
    }

    #[tokio::test]
    async fn test_list_sorted_by_name() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.clients();

        repo.insert(&test_client("Zeta S.A.")).await.unwrap();
        repo.insert(&test_client("Alfa S.L.")).await.unwrap();

        let all = repo.list(10).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Alfa S.L.");
        assert_eq!(all[1].name, "Zeta S.A.");
    }

    #[tokio::test]
    async fn test_update_persists_changes() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.clients();

        let mut client = test_client("Cliente S.L.");
        repo.insert(&client).await.unwrap();

        client.name = "Cliente Renombrado S.L.".to_string();
        client.contact = "nuevo@cliente.es".to_string();
        repo.update(&client).await.unwrap();

        let loaded = repo.get_by_id(&client.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Cliente Renombrado S.L.");
        assert_eq!(loaded.contact, "nuevo@cliente.es");
        assert_eq!(loaded.tax_id, "A87654321");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.clients();

        let client = test_client("Cliente S.L.");
        assert!(matches!(
            repo.update(&client).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.clients();

        let client = test_client("Cliente S.L.");
        repo.insert(&client).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        repo.delete(&client.id).await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 0);
    }
}
