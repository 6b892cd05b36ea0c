//! `factura products` - stored product records.
//!
//! Product prices are tax-inclusive, like everything the user types.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Subcommand;

use factura_core::{validation, Product};
use factura_db::generate_id;
use factura_render::format::format_eur;

#[derive(Subcommand)]
pub enum ProductAction {
    /// Add a product
    Add {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Tax-inclusive unit price
        #[arg(long)]
        price: f64,
        #[arg(long, default_value = "")]
        category: String,
    },
    /// Edit a stored product (only the given fields change)
    Edit {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Tax-inclusive unit price
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        category: Option<String>,
    },
    /// List products
    List {
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },
    /// Remove a product by id
    Remove { id: String },
}

/// Applies the optional edit flags onto a loaded product.
///
/// Returns whether anything actually changed, so the caller can skip the
/// write (and say so) when every flag was omitted.
fn apply_edits(
    product: &mut Product,
    name: Option<String>,
    description: Option<String>,
    price: Option<f64>,
    category: Option<String>,
) -> Result<bool> {
    let mut changed = false;
    if let Some(name) = name {
        validation::validate_product_name(&name).context("invalid product")?;
        product.name = name;
        changed = true;
    }
    if let Some(description) = description {
        product.description = description;
        changed = true;
    }
    if let Some(price) = price {
        validation::validate_unit_price(price).context("invalid product")?;
        product.price = price;
        changed = true;
    }
    if let Some(category) = category {
        product.category = category;
        changed = true;
    }
    Ok(changed)
}

pub async fn run(action: ProductAction) -> Result<()> {
    let db = super::open_db().await?;
    let repo = db.products();

    match action {
        ProductAction::Add {
            name,
            description,
            price,
            category,
        } => {
            validation::validate_product_name(&name).context("invalid product")?;
            validation::validate_unit_price(price).context("invalid product")?;

            let now = Utc::now();
            let product = Product {
                id: generate_id(),
                name,
                description,
                price,
                category,
                created_at: now,
                updated_at: now,
            };
            repo.insert(&product).await?;
            println!("Product {} added ({})", product.name, product.id);
        }

        ProductAction::Edit {
            id,
            name,
            description,
            price,
            category,
        } => {
            validation::validate_uuid(&id).context("invalid product id")?;
            let mut product = repo
                .get_by_id(&id)
                .await?
                .with_context(|| format!("product {id} not found"))?;

            if !apply_edits(&mut product, name, description, price, category)? {
                println!("Nothing to change");
                return Ok(());
            }
            repo.update(&product).await?;
            println!("Product {} updated", product.name);
        }

        ProductAction::List { limit } => {
            let products = repo.list(limit).await?;
            if products.is_empty() {
                println!("No products saved");
                return Ok(());
            }
            for p in products {
                println!("{}  {}  {}", p.id, p.name, format_eur(p.price));
            }
        }

        ProductAction::Remove { id } => {
            validation::validate_uuid(&id).context("invalid product id")?;
            repo.delete(&id).await?;
            println!("Product {id} removed");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_product() -> Product {
        let now = Utc::now();
        Product {
            id: "p1".to_string(),
            name: "Diseño web".to_string(),
            description: "Diseño de página web corporativa".to_string(),
            price: 121.0,
            category: "Servicios".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_apply_edits_only_touches_given_fields() {
        let mut product = stored_product();
        let changed = apply_edits(
            &mut product,
            None,
            None,
            Some(72.6),
            Some("Mantenimiento".to_string()),
        )
        .unwrap();

        assert!(changed);
        assert_eq!(product.price, 72.6);
        assert_eq!(product.category, "Mantenimiento");
        assert_eq!(product.name, "Diseño web");
    }

    #[test]
    fn test_apply_edits_without_flags_changes_nothing() {
        let mut product = stored_product();
        let changed = apply_edits(&mut product, None, None, None, None).unwrap();
        assert!(!changed);
        assert_eq!(product.price, 121.0);
    }

    #[test]
    fn test_apply_edits_rejects_invalid_price() {
        let mut product = stored_product();
        assert!(apply_edits(&mut product, None, None, Some(-1.0), None).is_err());
        assert!(apply_edits(&mut product, None, None, Some(f64::NAN), None).is_err());
        assert_eq!(product.price, 121.0);
    }
}
