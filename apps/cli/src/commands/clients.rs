//! `factura clients` - stored client records.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Subcommand;

use factura_core::{validation, Client};
use factura_db::generate_id;

#[derive(Subcommand)]
pub enum ClientAction {
    /// Add a client
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        tax_id: String,
        #[arg(long, default_value = "")]
        address: String,
        #[arg(long, default_value = "")]
        contact: String,
    },
    /// Edit a stored client (only the given fields change)
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        tax_id: Option<String>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        contact: Option<String>,
    },
    /// List clients
    List {
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Remove a client by id
    Remove { id: String },
}

/// Applies the optional edit flags onto a loaded client.
///
/// Returns whether anything actually changed, so the caller can skip the
/// write (and say so) when every flag was omitted.
fn apply_edits(
    client: &mut Client,
    name: Option<String>,
    tax_id: Option<String>,
    address: Option<String>,
    contact: Option<String>,
) -> Result<bool> {
    let mut changed = false;
    if let Some(name) = name {
        validation::validate_party_name(&name).context("invalid client")?;
        client.name = name;
        changed = true;
    }
    if let Some(tax_id) = tax_id {
        client.tax_id = tax_id;
        changed = true;
    }
    if let Some(address) = address {
        client.address = address;
        changed = true;
    }
    if let Some(contact) = contact {
        client.contact = contact;
        changed = true;
    }
    Ok(changed)
}

pub async fn run(action: ClientAction) -> Result<()> {
    let db = super::open_db().await?;
    let repo = db.clients();

    match action {
        ClientAction::Add {
            name,
            tax_id,
            address,
            contact,
        } => {
            validation::validate_party_name(&name).context("invalid client")?;

            let now = Utc::now();
            let client = Client {
                id: generate_id(),
                name,
                tax_id,
                address,
                contact,
                created_at: now,
                updated_at: now,
            };
            repo.insert(&client).await?;
            println!("Client {} added ({})", client.name, client.id);
        }

        ClientAction::Edit {
            id,
            name,
            tax_id,
            address,
            contact,
        } => {
            validation::validate_uuid(&id).context("invalid client id")?;
            let mut client = repo
                .get_by_id(&id)
                .await?
                .with_context(|| format!("client {id} not found"))?;

            if !apply_edits(&mut client, name, tax_id, address, contact)? {
                println!("Nothing to change");
                return Ok(());
            }
            repo.update(&client).await?;
            println!("Client {} updated", client.name);
        }

        ClientAction::List { limit } => {
            let clients = repo.list(limit).await?;
            if clients.is_empty() {
                println!("No clients saved");
                return Ok(());
            }
            for c in clients {
                println!("{}  {}  {}", c.id, c.name, c.tax_id);
            }
        }

        ClientAction::Remove { id } => {
            validation::validate_uuid(&id).context("invalid client id")?;
            repo.delete(&id).await?;
            println!("Client {id} removed");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_client() -> Client {
        let now = Utc::now();
        Client {
            id: "c1".to_string(),
            name: "Cliente S.L.".to_string(),
            tax_id: "A87654321".to_string(),
            address: "Avenida Cliente 456, 28002 Madrid".to_string(),
            contact: "info@cliente.es".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_apply_edits_only_touches_given_fields() {
        let mut client = stored_client();
        let changed = apply_edits(
            &mut client,
            Some("Cliente Renombrado S.L.".to_string()),
            None,
            None,
            Some("nuevo@cliente.es".to_string()),
        )
        .unwrap();

        assert!(changed);
        assert_eq!(client.name, "Cliente Renombrado S.L.");
        assert_eq!(client.contact, "nuevo@cliente.es");
        assert_eq!(client.tax_id, "A87654321");
    }

    #[test]
    fn test_apply_edits_without_flags_changes_nothing() {
        let mut client = stored_client();
        let changed = apply_edits(&mut client, None, None, None, None).unwrap();
        assert!(!changed);
        assert_eq!(client.name, "Cliente S.L.");
        assert_eq!(client.tax_id, "A87654321");
    }

    #[test]
    fn test_apply_edits_rejects_blank_name() {
        let mut client = stored_client();
        let result = apply_edits(&mut client, Some("   ".to_string()), None, None, None);
        assert!(result.is_err());
    }
}
