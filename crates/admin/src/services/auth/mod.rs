//! Admin authentication service.
//!
//! A single operator account: the username is fixed and the password is
//! checked against the SHA-256 digest in storage. No lockout, no rate
//! limiting.

mod error;

pub use error::AdminAuthError;

use av_store_core::{CredentialStore, KeyValueStore};
use secrecy::SecretString;

use crate::models::CurrentAdmin;

/// Admin authentication service.
pub struct AdminAuthService<'a, S> {
    credentials: &'a CredentialStore<S>,
}

impl<'a, S: KeyValueStore> AdminAuthService<'a, S> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(credentials: &'a CredentialStore<S>) -> Self {
        Self { credentials }
    }

    /// Seed the default password on first run.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::Store` if storage fails.
    pub async fn ensure_default_password(&self) -> Result<(), AdminAuthError> {
        self.credentials.ensure_default().await?;
        Ok(())
    }

    /// Check a login attempt and return the identity to store in the session.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidCredentials` when the username or
    /// password does not match, and `AdminAuthError::Store` if storage fails.
    pub async fn login(
        &self,
        username: &str,
        password: &SecretString,
    ) -> Result<CurrentAdmin, AdminAuthError> {
        if !self.credentials.verify(username, password).await? {
            return Err(AdminAuthError::InvalidCredentials);
        }

        Ok(CurrentAdmin {
            username: username.trim().to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use av_store_core::store::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_login_with_default_password() {
        let credentials = CredentialStore::new(MemoryStore::new());
        let auth = AdminAuthService::new(&credentials);
        auth.ensure_default_password().await.unwrap();

        let admin = auth
            .login(" admin ", &SecretString::from("admin123"))
            .await
            .unwrap();
        assert_eq!(admin.username, "admin");
    }

    #[tokio::test]
    async fn test_login_rejects_wrong_password() {
        let credentials = CredentialStore::new(MemoryStore::new());
        let auth = AdminAuthService::new(&credentials);
        auth.ensure_default_password().await.unwrap();

        let result = auth.login("admin", &SecretString::from("nope")).await;
        assert!(matches!(result, Err(AdminAuthError::InvalidCredentials)));
    }
}
