//! Admin password commands.
//!
//! # Usage
//!
//! ```bash
//! av-cli password set 'new-password'
//! av-cli password reset
//! ```
//!
//! The admin console reads the digest on every login, so changes apply
//! without a restart.

use av_store_core::{CredentialStore, KeyValueStore};
use secrecy::SecretString;

use super::CliError;

/// Replace the admin password.
///
/// # Errors
///
/// Returns an error if the password is empty or storage fails.
pub async fn set<S: KeyValueStore>(store: S, password: String) -> Result<(), CliError> {
    if password.is_empty() {
        return Err(CliError::InvalidArgument("password cannot be empty"));
    }

    CredentialStore::new(store)
        .set_password(&SecretString::from(password))
        .await?;
    tracing::info!("Admin password updated");
    Ok(())
}

/// Restore the default admin password.
///
/// # Errors
///
/// Returns an error if storage fails.
pub async fn reset<S: KeyValueStore>(store: S) -> Result<(), CliError> {
    CredentialStore::new(store).reset().await?;
    tracing::warn!(
        "Admin password reset to \"{}\". Change it after login.",
        av_store_core::DEFAULT_ADMIN_PASSWORD
    );
    Ok(())
}
