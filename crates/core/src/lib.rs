//! AV Store Core - Shared library.
//!
//! This crate provides everything the AV Store binaries share:
//! - `storefront` - Public catalog page
//! - `admin` - Operator console (login, product editor, export)
//! - `cli` - Command-line tools for migrations, passwords and products
//!
//! # Architecture
//!
//! All persisted state lives in a string key/value store, one key for the
//! admin password digest and one for the JSON product collection. The
//! binaries never touch a backend directly; they go through the repository
//! and credential store defined here.
//!
//! # Modules
//!
//! - [`types`] - Product record, price, category, image and credential types
//! - [`store`] - Key/value storage trait and backends
//! - [`repository`] - Product collection access
//! - [`credentials`] - Admin password digest
//! - [`editor`] - Per-session product editor state
//! - [`catalog`] - Public catalog partitioning

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod credentials;
pub mod editor;
pub mod repository;
pub mod store;
pub mod types;

pub use catalog::{Catalog, CatalogCard};
pub use credentials::CredentialStore;
pub use editor::{EditorError, EditorMode, EditorState, FormValues, SaveOutcome};
pub use repository::{ProductRepository, ProductStore, RepositoryError, SaveKind};
pub use store::{KeyValueStore, Storage, StorageConfig, StoreError};
pub use types::*;
