//! Business logic services for admin.
//!
//! # Services
//!
//! - `auth` - Single-operator password authentication
//! - `editor` - Per-session product editor persistence

pub mod auth;
pub mod editor;

pub use auth::{AdminAuthError, AdminAuthService};
