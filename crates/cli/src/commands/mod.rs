//! CLI subcommands.

pub mod migrate;
pub mod password;
pub mod products;

use av_store_core::store::DEFAULT_STORAGE_URL;
use av_store_core::{RepositoryError, Storage, StorageConfig, StoreError};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Storage could not be opened or written.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// The product collection could not be read or written.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// No product has the given id.
    #[error("No product with id {0}")]
    ProductNotFound(String),

    /// The command needs a different storage backend.
    #[error("{0}")]
    Unsupported(&'static str),

    /// The argument is not acceptable.
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Open the storage named by `AV_STORAGE_URL`.
///
/// # Errors
///
/// Returns an error if the URL is invalid or the backend cannot be reached.
pub async fn open_storage() -> Result<Storage, CliError> {
    dotenvy::dotenv().ok();

    let url = std::env::var("AV_STORAGE_URL").unwrap_or_else(|_| DEFAULT_STORAGE_URL.to_owned());
    let config = StorageConfig::parse(&url)?;

    tracing::info!(storage = ?config, "Opening storage...");
    Ok(Storage::connect(&config).await?)
}
