//! Product maintenance commands.
//!
//! # Usage
//!
//! ```bash
//! av-cli products list
//! av-cli products export > products.json
//! av-cli products publish <id>
//! av-cli products unpublish <id>
//! av-cli products delete <id>
//! ```

use av_store_core::{Product, ProductId, ProductRepository};

use super::CliError;

/// One line of `products list` output.
fn format_row(product: &Product) -> String {
    let visibility = if product.published {
        "published"
    } else {
        "hidden"
    };
    format!(
        "{}\t{}\t{}\t{}\t{}",
        product.id,
        visibility,
        product.category.as_str(),
        product.price.display(),
        product.title
    )
}

/// Print every product, newest first.
///
/// # Errors
///
/// Returns an error if the collection cannot be read.
pub async fn list<R: ProductRepository>(repo: &R) -> Result<(), CliError> {
    let products = repo.list().await?;

    #[allow(clippy::print_stdout)]
    {
        if products.is_empty() {
            println!("No products yet.");
        }
        for product in &products {
            println!("{}", format_row(product));
        }
    }
    Ok(())
}

/// Print the stored collection exactly as persisted.
///
/// # Errors
///
/// Returns an error if the collection cannot be read.
pub async fn export<R: ProductRepository>(repo: &R) -> Result<(), CliError> {
    let raw = repo.raw().await?;

    #[allow(clippy::print_stdout)]
    {
        println!("{raw}");
    }
    Ok(())
}

/// Show or hide a product on the public catalog.
///
/// # Errors
///
/// Returns [`CliError::ProductNotFound`] for an unknown id.
pub async fn set_published<R: ProductRepository>(
    repo: &R,
    id: &str,
    published: bool,
) -> Result<(), CliError> {
    let id = ProductId::new(id);
    let product = repo
        .set_published(&id, published)
        .await?
        .ok_or_else(|| CliError::ProductNotFound(id.to_string()))?;

    tracing::info!(id = %product.id, title = %product.title, published, "Product updated");
    Ok(())
}

/// Delete a product.
///
/// # Errors
///
/// Returns [`CliError::ProductNotFound`] for an unknown id.
pub async fn delete<R: ProductRepository>(repo: &R, id: &str) -> Result<(), CliError> {
    let id = ProductId::new(id);
    let product = repo
        .delete(&id)
        .await?
        .ok_or_else(|| CliError::ProductNotFound(id.to_string()))?;

    tracing::info!(id = %product.id, title = %product.title, "Product deleted");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use av_store_core::store::MemoryStore;
    use av_store_core::{Category, Price, ProductStore};
    use chrono::{TimeZone, Utc};

    use super::*;

    fn product(id: &str, published: bool) -> Product {
        Product {
            id: ProductId::new(id),
            title: "Cap".to_string(),
            category: Category::Wear,
            price: Price::parse_input("15").unwrap(),
            image: None,
            published,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_format_row() {
        assert_eq!(
            format_row(&product("1", false)),
            "1\thidden\twear\t₦15.00\tCap"
        );
    }

    #[tokio::test]
    async fn test_publish_and_delete() {
        let repo = ProductStore::new(MemoryStore::new());
        repo.save(product("1", false)).await.unwrap();

        set_published(&repo, "1", true).await.unwrap();
        assert!(repo.get(&ProductId::new("1")).await.unwrap().unwrap().published);

        delete(&repo, "1").await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_id_is_an_error() {
        let repo = ProductStore::new(MemoryStore::new());
        assert!(matches!(
            set_published(&repo, "missing", true).await,
            Err(CliError::ProductNotFound(_))
        ));
        assert!(matches!(
            delete(&repo, "missing").await,
            Err(CliError::ProductNotFound(_))
        ));
    }
}
