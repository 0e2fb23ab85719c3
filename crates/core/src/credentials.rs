//! Admin credential storage.
//!
//! A single hex-encoded SHA-256 digest lives under [`PASSWORD_HASH_KEY`]. The
//! username is the constant [`ADMIN_USERNAME`].

use secrecy::SecretString;

use crate::store::{KeyValueStore, PASSWORD_HASH_KEY, StoreError};
use crate::types::{ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD, PasswordHash};

/// Reads and writes the admin password digest.
#[derive(Debug, Clone)]
pub struct CredentialStore<S> {
    store: S,
}

impl<S: KeyValueStore> CredentialStore<S> {
    /// Create a credential store over `store`.
    #[must_use]
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Seed the default password if no digest is stored yet.
    ///
    /// Returns `true` when the default was written.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read or written.
    pub async fn ensure_default(&self) -> Result<bool, StoreError> {
        if self.store.get(PASSWORD_HASH_KEY).await?.is_some() {
            return Ok(false);
        }

        self.store
            .set(PASSWORD_HASH_KEY, PasswordHash::default_password().as_str())
            .await?;
        tracing::info!(
            "Default admin password set to \"{DEFAULT_ADMIN_PASSWORD}\". Change it after login."
        );
        Ok(true)
    }

    /// The stored digest, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn stored_hash(&self) -> Result<Option<PasswordHash>, StoreError> {
        Ok(self
            .store
            .get(PASSWORD_HASH_KEY)
            .await?
            .map(PasswordHash::from_stored))
    }

    /// Replace the stored digest with the digest of `password`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub async fn set_password(&self, password: &SecretString) -> Result<(), StoreError> {
        self.store
            .set(PASSWORD_HASH_KEY, PasswordHash::of(password).as_str())
            .await
    }

    /// Restore the default password.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be written.
    pub async fn reset(&self) -> Result<(), StoreError> {
        self.store
            .set(PASSWORD_HASH_KEY, PasswordHash::default_password().as_str())
            .await
    }

    /// Check a login attempt.
    ///
    /// The trimmed username must equal [`ADMIN_USERNAME`] and the password
    /// digest must equal the stored digest exactly. With nothing stored every
    /// attempt fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub async fn verify(&self, username: &str, password: &SecretString) -> Result<bool, StoreError> {
        let Some(stored) = self.stored_hash().await? else {
            return Ok(false);
        };
        Ok(username.trim() == ADMIN_USERNAME && stored.matches(password))
    }
}
