//! Admin authentication error types.

use av_store_core::StoreError;
use thiserror::Error;

/// Errors that can occur during admin authentication operations.
#[derive(Debug, Error)]
pub enum AdminAuthError {
    /// Username or password did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Credential storage failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}
