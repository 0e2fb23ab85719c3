//! Core types for AV Store.
//!
//! This module provides type-safe wrappers for the product record and its fields.

pub mod category;
pub mod credential;
pub mod id;
pub mod image;
pub mod price;
pub mod product;

pub use category::Category;
pub use credential::{ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD, PasswordHash};
pub use id::ProductId;
pub use image::{DEFAULT_IMAGE_PATH, ImageData, ImageError, image_src};
pub use price::{CURRENCY_SYMBOL, Price, PriceError};
pub use product::{DraftError, Product, ProductDraft};
