//! Admin credential types.
//!
//! The admin password is kept only as an unsalted SHA-256 digest, encoded as
//! lowercase hex. The username is a fixed constant.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// The only accepted admin username.
pub const ADMIN_USERNAME: &str = "admin";

/// Password seeded on first run when no hash is stored.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Hex-encoded SHA-256 digest of the admin password.
///
/// Compared by exact string equality, so a malformed stored value simply
/// never matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Hash a password.
    #[must_use]
    pub fn of(password: &SecretString) -> Self {
        let digest = Sha256::digest(password.expose_secret().as_bytes());
        Self(hex::encode(digest))
    }

    /// Hash of [`DEFAULT_ADMIN_PASSWORD`].
    #[must_use]
    pub fn default_password() -> Self {
        Self::of(&SecretString::from(DEFAULT_ADMIN_PASSWORD))
    }

    /// Wrap a stored digest string without validating it.
    #[must_use]
    pub fn from_stored(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    /// Get the hex digest as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if `password` hashes to this digest.
    #[must_use]
    pub fn matches(&self, password: &SecretString) -> bool {
        Self::of(password) == *self
    }
}

impl AsRef<str> for PasswordHash {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
