//! Storage migration command.
//!
//! # Usage
//!
//! ```bash
//! AV_STORAGE_URL=postgres://localhost/av_store av-cli migrate
//! ```
//!
//! Only `PostgreSQL` storage has a schema. Memory and file storage need no
//! migration.

use av_store_core::Storage;

use super::CliError;

/// Run the key/value table migrations.
///
/// # Errors
///
/// Returns an error if the storage is not `PostgreSQL` or a migration fails.
pub async fn run(storage: &Storage) -> Result<(), CliError> {
    let Storage::Postgres(store) = storage else {
        return Err(CliError::Unsupported(
            "migrate only applies to postgres storage; set AV_STORAGE_URL to a postgres:// URL",
        ));
    };

    tracing::info!("Running storage migrations...");
    store.migrate().await?;
    tracing::info!("Storage migrations complete!");
    Ok(())
}
