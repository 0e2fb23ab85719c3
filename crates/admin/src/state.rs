//! Application state shared across handlers.

use std::sync::Arc;

use av_store_core::{CredentialStore, ProductStore, Storage};

use crate::config::AdminConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// the product repository, the credential store and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    products: ProductStore<Storage>,
    credentials: CredentialStore<Storage>,
}

impl AppState {
    /// Create a new application state over an opened storage backend.
    ///
    /// Products and credentials share the same backend.
    #[must_use]
    pub fn new(config: AdminConfig, storage: Storage) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                products: ProductStore::new(storage.clone()),
                credentials: CredentialStore::new(storage),
            }),
        }
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the product repository.
    #[must_use]
    pub fn products(&self) -> &ProductStore<Storage> {
        &self.inner.products
    }

    /// Get a reference to the credential store.
    #[must_use]
    pub fn credentials(&self) -> &CredentialStore<Storage> {
        &self.inner.credentials
    }
}
