//! Public catalog view model.
//!
//! Only published products are shown. Products tagged `drink` go into the
//! drinks grid and everything else into the wears grid, each in collection
//! order.

use crate::repository::{ProductRepository, RepositoryError};
use crate::types::{Product, ProductId, image_src};

/// Placeholder shown when the wears grid is empty.
pub const EMPTY_WEARS_MESSAGE: &str = "No wears yet. Check back soon.";

/// Placeholder shown when the drinks grid is empty.
pub const EMPTY_DRINKS_MESSAGE: &str = "No drinks yet. Check back soon.";

/// One product card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogCard {
    /// Product id.
    pub id: ProductId,
    /// Image `src`, falling back to the default logo.
    pub image_src: String,
    /// Product title.
    pub title: String,
    /// `Wear` or `Drink`.
    pub category_label: &'static str,
    /// Price with currency sign and two decimals.
    pub price_label: String,
}

impl From<&Product> for CatalogCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            image_src: image_src(product.image.as_ref()).to_owned(),
            title: product.title.clone(),
            category_label: product.category.label(),
            price_label: product.price.display(),
        }
    }
}

/// Published products split into the two catalog grids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    /// Cards for the wears grid.
    pub wears: Vec<CatalogCard>,
    /// Cards for the drinks grid.
    pub drinks: Vec<CatalogCard>,
}

impl Catalog {
    /// Partition `products`, skipping unpublished ones.
    #[must_use]
    pub fn from_products(products: &[Product]) -> Self {
        let mut catalog = Self::default();
        for product in products.iter().filter(|p| p.published) {
            let card = CatalogCard::from(product);
            if product.category.is_drink() {
                catalog.drinks.push(card);
            } else {
                catalog.wears.push(card);
            }
        }
        catalog
    }

    /// Build the catalog from the current collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository cannot be read.
    pub async fn load<R: ProductRepository>(repo: &R) -> Result<Self, RepositoryError> {
        Ok(Self::from_products(&repo.list().await?))
    }

    /// Total number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.wears.len() + self.drinks.len()
    }

    /// Returns `true` when neither grid has a card.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.wears.is_empty() && self.drinks.is_empty()
    }
}
