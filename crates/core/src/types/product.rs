//! Product records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, ImageData, Price, PriceError, ProductId};

/// A single product as persisted in the collection.
///
/// The JSON shape (`id`, `title`, `category`, `price`, `image`, `published`,
/// `createdAt`) is also the export format, so field names must not change.
///
/// Only `id` is required when reading. Missing fields take their defaults
/// (empty title, `wear`, zero price, unpublished, the Unix epoch).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identity, generated at creation.
    pub id: ProductId,
    /// Display name.
    #[serde(default)]
    pub title: String,
    /// Catalog grid the product renders into.
    #[serde(default)]
    pub category: Category,
    /// Price, stored as a two-decimal string.
    #[serde(default)]
    pub price: Price,
    /// Inlined image, if one was uploaded.
    #[serde(default)]
    pub image: Option<ImageData>,
    /// Whether the product is visible on the public catalog.
    #[serde(default)]
    pub published: bool,
    /// Creation time (informational).
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Create a new, published product from a validated draft.
    #[must_use]
    pub fn create(
        id: ProductId,
        draft: ProductDraft,
        image: Option<ImageData>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: draft.title,
            category: draft.category,
            price: draft.price,
            image,
            published: true,
            created_at: now,
        }
    }

    /// Rebuild the record from an edited draft.
    ///
    /// Only the id survives. The record is published again and its creation
    /// time becomes `now`.
    pub fn revise(&mut self, draft: ProductDraft, image: Option<ImageData>, now: DateTime<Utc>) {
        *self = Self::create(self.id.clone(), draft, image, now);
    }
}

/// Errors that can occur when validating editor input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// The title is blank after trimming.
    #[error("title cannot be empty")]
    EmptyTitle,
    /// The price is not a number.
    #[error(transparent)]
    Price(#[from] PriceError),
}

/// Validated editor input, ready to become or update a [`Product`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    /// Trimmed title.
    pub title: String,
    /// Selected category.
    pub category: Category,
    /// Parsed price.
    pub price: Price,
}

impl ProductDraft {
    /// Validate raw form values.
    ///
    /// # Errors
    ///
    /// Returns [`DraftError::EmptyTitle`] for a blank title and
    /// [`DraftError::Price`] for a non-numeric price.
    pub fn parse(title: &str, category: Category, price: &str) -> Result<Self, DraftError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DraftError::EmptyTitle);
        }

        Ok(Self {
            title: title.to_owned(),
            category,
            price: Price::parse_input(price)?,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_trims_title_and_formats_price() {
        let draft = ProductDraft::parse("  Cap ", Category::Wear, "15").unwrap();
        assert_eq!(draft.title, "Cap");
        assert_eq!(draft.price.to_fixed(), "15.00");
    }

    #[test]
    fn test_parse_rejects_blank_title() {
        assert_eq!(
            ProductDraft::parse("   ", Category::Wear, "1"),
            Err(DraftError::EmptyTitle)
        );
    }

    #[test]
    fn test_parse_rejects_bad_price() {
        assert!(matches!(
            ProductDraft::parse("Cap", Category::Wear, "cheap"),
            Err(DraftError::Price(_))
        ));
    }

    #[test]
    fn test_create_is_published() {
        let draft = ProductDraft::parse("Cap", Category::Wear, "15").unwrap();
        let product = Product::create(ProductId::new("1"), draft, None, created());
        assert!(product.published);
        assert_eq!(product.created_at, created());
    }

    #[test]
    fn test_revise_keeps_id_and_republishes() {
        let draft = ProductDraft::parse("Cap", Category::Wear, "15").unwrap();
        let mut product = Product::create(ProductId::new("1"), draft, None, created());
        product.published = false;

        let edit = ProductDraft::parse("Zobo", Category::Drink, "3.5").unwrap();
        let later = created() + chrono::Duration::hours(1);
        product.revise(edit, None, later);

        assert_eq!(product.id.as_str(), "1");
        assert!(product.published);
        assert_eq!(product.created_at, later);
        assert_eq!(product.title, "Zobo");
        assert_eq!(product.category, Category::Drink);
        assert_eq!(product.price.to_fixed(), "3.50");
    }

    #[test]
    fn test_json_shape() {
        let draft = ProductDraft::parse("Cap", Category::Wear, "15").unwrap();
        let product = Product::create(ProductId::new("1714564800000"), draft, None, created());
        let value = serde_json::to_value(&product).unwrap();

        assert_eq!(value["id"], "1714564800000");
        assert_eq!(value["title"], "Cap");
        assert_eq!(value["category"], "wear");
        assert_eq!(value["price"], "15.00");
        assert!(value["image"].is_null());
        assert_eq!(value["published"], true);
        assert_eq!(value["createdAt"], "2024-05-01T12:00:00Z");
    }

    #[test]
    fn test_reads_browser_written_record() {
        let json = r#"{
            "id": "1714564800000",
            "title": "Zobo",
            "category": "drink",
            "price": "2.50",
            "image": null,
            "published": false,
            "createdAt": "2024-05-01T12:00:00.000Z"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.category, Category::Drink);
        assert_eq!(product.price.to_fixed(), "2.50");
        assert!(!product.published);
        assert_eq!(product.created_at, created());
    }

    #[test]
    fn test_reads_sparse_record_with_numeric_id() {
        let product: Product = serde_json::from_str(r#"{"id": 7, "title": "Zobo"}"#).unwrap();
        assert_eq!(product.id.as_str(), "7");
        assert_eq!(product.title, "Zobo");
        assert_eq!(product.category, Category::Wear);
        assert_eq!(product.price.to_fixed(), "0.00");
        assert!(!product.published);
        assert_eq!(product.created_at, DateTime::<Utc>::default());
    }

    #[test]
    fn test_record_without_id_is_rejected() {
        assert!(serde_json::from_str::<Product>(r#"{"title": "Zobo"}"#).is_err());
    }
}
