//! Application state shared across handlers.

use std::sync::Arc;

use av_store_core::{ProductStore, Storage};

use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the product repository and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    products: ProductStore<Storage>,
}

impl AppState {
    /// Create a new application state over an opened storage backend.
    #[must_use]
    pub fn new(config: StorefrontConfig, storage: Storage) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                products: ProductStore::new(storage),
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product repository.
    #[must_use]
    pub fn products(&self) -> &ProductStore<Storage> {
        &self.inner.products
    }
}
