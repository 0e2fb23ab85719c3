//! Product repository.
//!
//! The whole collection is one JSON array under [`PRODUCTS_KEY`]. Every
//! mutation loads the array, changes it and writes the whole array back.
//! Mutations made through one [`ProductStore`] are serialized by a write lock.
//!
//! Array elements that do not read as products are hidden from every read
//! but written back unchanged.

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::store::{KeyValueStore, PRODUCTS_KEY, StoreError};
use crate::types::{ImageData, Product, ProductDraft, ProductId};

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The storage backend failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// The collection could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// What [`ProductRepository::save`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveKind {
    /// No record had the id; the product was prepended.
    Inserted,
    /// The record with the same id was replaced in place.
    Replaced,
}

/// Access to the product collection.
///
/// Operations that target an id return `None` when no record has that id, and
/// leave the collection untouched.
pub trait ProductRepository: Send + Sync {
    /// All products in collection order (newest first).
    fn list(&self) -> impl Future<Output = Result<Vec<Product>, RepositoryError>> + Send;

    /// The product with `id`.
    fn get(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Option<Product>, RepositoryError>> + Send;

    /// Replace the record with the same id in place, or prepend the product.
    fn save(&self, product: Product)
    -> impl Future<Output = Result<SaveKind, RepositoryError>> + Send;

    /// Prepend a new published product built from `draft`.
    ///
    /// The id is derived from `now` and bumped past every id already stored,
    /// under the same lock as the write, so it never replaces a record.
    fn insert_new(
        &self,
        draft: ProductDraft,
        image: Option<ImageData>,
        now: DateTime<Utc>,
    ) -> impl Future<Output = Result<Product, RepositoryError>> + Send;

    /// Apply `change` to the product with `id` and persist it.
    fn update<F>(
        &self,
        id: &ProductId,
        change: F,
    ) -> impl Future<Output = Result<Option<Product>, RepositoryError>> + Send
    where
        F: FnOnce(&mut Product) + Send;

    /// Remove the product with `id`, keeping the others in order.
    fn delete(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Option<Product>, RepositoryError>> + Send;

    /// Set the published flag of the product with `id`.
    fn set_published(
        &self,
        id: &ProductId,
        published: bool,
    ) -> impl Future<Output = Result<Option<Product>, RepositoryError>> + Send;

    /// Flip the published flag of the product with `id`.
    fn toggle_published(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Option<Product>, RepositoryError>> + Send;

    /// The serialized collection exactly as stored (`[]` when absent).
    fn raw(&self) -> impl Future<Output = Result<String, RepositoryError>> + Send;
}

/// One element of the stored array.
///
/// Elements that do not read as a [`Product`] are kept as raw JSON so that a
/// write-back never drops them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum StoredRecord {
    Product(Product),
    Unreadable(serde_json::Value),
}

impl StoredRecord {
    const fn product(&self) -> Option<&Product> {
        match self {
            Self::Product(product) => Some(product),
            Self::Unreadable(_) => None,
        }
    }

    const fn product_mut(&mut self) -> Option<&mut Product> {
        match self {
            Self::Product(product) => Some(product),
            Self::Unreadable(_) => None,
        }
    }

    fn has_id(&self, id: &ProductId) -> bool {
        self.product().is_some_and(|p| &p.id == id)
    }
}

/// [`ProductRepository`] over any [`KeyValueStore`].
#[derive(Debug)]
pub struct ProductStore<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> ProductStore<S> {
    /// Create a repository over `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// The underlying key/value store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Load the stored array. Anything that is not a JSON array reads as an
    /// empty collection.
    async fn load(&self) -> Result<Vec<StoredRecord>, RepositoryError> {
        let Some(raw) = self.store.get(PRODUCTS_KEY).await? else {
            return Ok(Vec::new());
        };

        let records: Vec<StoredRecord> = match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(error = %e, "Stored product collection is malformed, treating it as empty");
                return Ok(Vec::new());
            }
        };

        let unreadable = records.iter().filter(|r| r.product().is_none()).count();
        if unreadable > 0 {
            tracing::warn!(unreadable, "Skipping stored records that are not products");
        }
        Ok(records)
    }

    async fn products(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .load()
            .await?
            .into_iter()
            .filter_map(|record| match record {
                StoredRecord::Product(product) => Some(product),
                StoredRecord::Unreadable(_) => None,
            })
            .collect())
    }

    async fn persist(&self, records: &[StoredRecord]) -> Result<(), RepositoryError> {
        let json = serde_json::to_string(records)?;
        self.store.set(PRODUCTS_KEY, &json).await?;
        Ok(())
    }

    /// Load, apply `change`, and write back when it reports a modification.
    async fn mutate<T, F>(&self, change: F) -> Result<T, RepositoryError>
    where
        F: FnOnce(&mut Vec<StoredRecord>) -> (T, bool) + Send,
        T: Send,
    {
        let _guard = self.write_lock.lock().await;
        let mut records = self.load().await?;
        let (outcome, modified) = change(&mut records);
        if modified {
            self.persist(&records).await?;
        }
        Ok(outcome)
    }
}

impl<S: KeyValueStore> ProductRepository for ProductStore<S> {
    async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        self.products().await
    }

    async fn get(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        Ok(self.products().await?.into_iter().find(|p| &p.id == id))
    }

    async fn save(&self, product: Product) -> Result<SaveKind, RepositoryError> {
        self.mutate(move |records| {
            match records.iter_mut().find(|r| r.has_id(&product.id)) {
                Some(slot) => {
                    *slot = StoredRecord::Product(product);
                    (SaveKind::Replaced, true)
                }
                None => {
                    records.insert(0, StoredRecord::Product(product));
                    (SaveKind::Inserted, true)
                }
            }
        })
        .await
    }

    async fn insert_new(
        &self,
        draft: ProductDraft,
        image: Option<ImageData>,
        now: DateTime<Utc>,
    ) -> Result<Product, RepositoryError> {
        self.mutate(move |records| {
            let taken = records.iter().filter_map(StoredRecord::product).map(|p| &p.id);
            let id = ProductId::generate(now, taken);
            let product = Product::create(id, draft, image, now);
            records.insert(0, StoredRecord::Product(product.clone()));
            (product, true)
        })
        .await
    }

    async fn update<F>(&self, id: &ProductId, change: F) -> Result<Option<Product>, RepositoryError>
    where
        F: FnOnce(&mut Product) + Send,
    {
        self.mutate(move |records| {
            match records
                .iter_mut()
                .filter_map(StoredRecord::product_mut)
                .find(|p| &p.id == id)
            {
                Some(product) => {
                    change(product);
                    (Some(product.clone()), true)
                }
                None => (None, false),
            }
        })
        .await
    }

    async fn delete(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        self.mutate(|records| match records.iter().position(|r| r.has_id(id)) {
            Some(index) => match records.remove(index) {
                StoredRecord::Product(product) => (Some(product), true),
                StoredRecord::Unreadable(_) => (None, false),
            },
            None => (None, false),
        })
        .await
    }

    async fn set_published(
        &self,
        id: &ProductId,
        published: bool,
    ) -> Result<Option<Product>, RepositoryError> {
        self.update(id, move |product| product.published = published)
            .await
    }

    async fn toggle_published(&self, id: &ProductId) -> Result<Option<Product>, RepositoryError> {
        self.update(id, |product| product.published = !product.published)
            .await
    }

    async fn raw(&self) -> Result<String, RepositoryError> {
        Ok(self
            .store
            .get(PRODUCTS_KEY)
            .await?
            .unwrap_or_else(|| "[]".to_owned()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::store::MemoryStore;
    use crate::types::{Category, ProductDraft};

    fn product(id: &str, title: &str, category: Category) -> Product {
        let draft = ProductDraft::parse(title, category, "10").unwrap();
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Product::create(ProductId::new(id), draft, None, created)
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_empty_store_lists_nothing() {
        let repo = ProductStore::new(MemoryStore::new());
        assert!(repo.list().await.unwrap().is_empty());
        assert_eq!(repo.raw().await.unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_save_then_reload_round_trips() {
        let store = MemoryStore::new();
        let repo = ProductStore::new(store.clone());
        let cap = product("1", "Cap", Category::Wear);
        assert_eq!(repo.save(cap.clone()).await.unwrap(), SaveKind::Inserted);

        let reloaded = ProductStore::new(store).list().await.unwrap();
        let matching: Vec<_> = reloaded.iter().filter(|p| p.id == cap.id).collect();
        assert_eq!(matching, vec![&cap]);
    }

    #[tokio::test]
    async fn test_new_products_are_prepended() {
        let repo = ProductStore::new(MemoryStore::new());
        repo.save(product("1", "Cap", Category::Wear)).await.unwrap();
        repo.save(product("2", "Zobo", Category::Drink)).await.unwrap();
        assert_eq!(ids(&repo.list().await.unwrap()), ["2", "1"]);
    }

    #[tokio::test]
    async fn test_save_existing_id_replaces_in_place() {
        let repo = ProductStore::new(MemoryStore::new());
        repo.save(product("1", "Cap", Category::Wear)).await.unwrap();
        repo.save(product("2", "Zobo", Category::Drink)).await.unwrap();

        let renamed = product("1", "Bucket Hat", Category::Wear);
        assert_eq!(repo.save(renamed).await.unwrap(), SaveKind::Replaced);

        let products = repo.list().await.unwrap();
        assert_eq!(ids(&products), ["2", "1"]);
        assert_eq!(products[1].title, "Bucket Hat");
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_flag() {
        let repo = ProductStore::new(MemoryStore::new());
        repo.save(product("1", "Cap", Category::Wear)).await.unwrap();
        let id = ProductId::new("1");

        let once = repo.toggle_published(&id).await.unwrap().unwrap();
        assert!(!once.published);
        let twice = repo.toggle_published(&id).await.unwrap().unwrap();
        assert!(twice.published);
        assert!(repo.get(&id).await.unwrap().unwrap().published);
    }

    #[tokio::test]
    async fn test_set_published() {
        let repo = ProductStore::new(MemoryStore::new());
        repo.save(product("1", "Cap", Category::Wear)).await.unwrap();
        let id = ProductId::new("1");

        repo.set_published(&id, false).await.unwrap();
        assert!(!repo.get(&id).await.unwrap().unwrap().published);
        repo.set_published(&id, false).await.unwrap();
        assert!(!repo.get(&id).await.unwrap().unwrap().published);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one_and_keeps_order() {
        let repo = ProductStore::new(MemoryStore::new());
        for id in ["1", "2", "3", "4"] {
            repo.save(product(id, "Item", Category::Wear)).await.unwrap();
        }

        let removed = repo.delete(&ProductId::new("3")).await.unwrap().unwrap();
        assert_eq!(removed.id.as_str(), "3");
        assert_eq!(ids(&repo.list().await.unwrap()), ["4", "2", "1"]);
    }

    #[tokio::test]
    async fn test_stale_ids_are_no_ops() {
        let store = MemoryStore::new();
        let repo = ProductStore::new(store.clone());
        repo.save(product("1", "Cap", Category::Wear)).await.unwrap();
        let before = repo.raw().await.unwrap();
        let gone = ProductId::new("404");

        assert!(repo.delete(&gone).await.unwrap().is_none());
        assert!(repo.toggle_published(&gone).await.unwrap().is_none());
        assert!(repo.update(&gone, |p| p.title.clear()).await.unwrap().is_none());
        assert!(repo.get(&gone).await.unwrap().is_none());
        assert_eq!(repo.raw().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_malformed_collection_reads_as_empty() {
        let store = MemoryStore::new();
        store.set(PRODUCTS_KEY, "{broken").await.unwrap();
        let repo = ProductStore::new(store);

        assert!(repo.list().await.unwrap().is_empty());
        assert_eq!(repo.raw().await.unwrap(), "{broken");

        repo.save(product("1", "Cap", Category::Wear)).await.unwrap();
        assert_eq!(ids(&repo.list().await.unwrap()), ["1"]);
    }

    #[tokio::test]
    async fn test_raw_is_the_stored_json_array() {
        let repo = ProductStore::new(MemoryStore::new());
        repo.save(product("1", "Cap", Category::Wear)).await.unwrap();
        let raw: serde_json::Value = serde_json::from_str(&repo.raw().await.unwrap()).unwrap();
        assert_eq!(raw[0]["id"], "1");
        assert_eq!(raw[0]["price"], "10.00");
    }

    #[tokio::test]
    async fn test_unreadable_records_survive_a_write() {
        let store = MemoryStore::new();
        store
            .set(
                PRODUCTS_KEY,
                r#"[{"id":"1","title":"Cap","category":"wear","price":"15.00","image":null,"published":true,"createdAt":"2024-05-01T12:00:00Z"},
                    {"title":"Zobo","price":{"amount":3}},
                    {"id":2,"title":"Hat"}]"#,
            )
            .await
            .unwrap();
        let repo = ProductStore::new(store);

        assert_eq!(ids(&repo.list().await.unwrap()), ["1", "2"]);

        repo.save(product("3", "Tote", Category::Wear)).await.unwrap();
        assert_eq!(ids(&repo.list().await.unwrap()), ["3", "1", "2"]);

        let raw: serde_json::Value = serde_json::from_str(&repo.raw().await.unwrap()).unwrap();
        let records = raw.as_array().unwrap();
        assert_eq!(records.len(), 4);
        assert_eq!(records[2]["title"], "Zobo");
        assert_eq!(records[2]["price"]["amount"], 3);
    }

    #[tokio::test]
    async fn test_insert_new_skips_taken_ids() {
        let repo = ProductStore::new(MemoryStore::new());
        let created = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let draft = || ProductDraft::parse("Cap", Category::Wear, "1").unwrap();

        let first = repo.insert_new(draft(), None, created).await.unwrap();
        let second = repo.insert_new(draft(), None, created).await.unwrap();

        assert_eq!(first.id.as_str(), created.timestamp_millis().to_string());
        assert_ne!(first.id, second.id);
        assert_eq!(
            ids(&repo.list().await.unwrap()),
            [second.id.as_str(), first.id.as_str()]
        );
    }

    #[tokio::test]
    async fn test_unknown_category_tag_is_written_back() {
        let store = MemoryStore::new();
        store
            .set(
                PRODUCTS_KEY,
                r#"[{"id":"1","title":"Mug","category":"merch","price":"3.00","image":null,"published":true,"createdAt":"2024-05-01T12:00:00Z"},
                    {"id":"2","title":"Cap","category":"wear","price":"15.00","image":null,"published":true,"createdAt":"2024-05-01T12:00:00Z"}]"#,
            )
            .await
            .unwrap();
        let repo = ProductStore::new(store);

        repo.toggle_published(&ProductId::new("2")).await.unwrap();

        let mug = repo.get(&ProductId::new("1")).await.unwrap().unwrap();
        assert_eq!(mug.category.as_str(), "merch");
        assert!(repo.raw().await.unwrap().contains("\"category\":\"merch\""));
    }
}
