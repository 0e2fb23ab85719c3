//! Session-related types for admin authentication.
//!
//! Types stored in the session for authentication and editor state.

use serde::{Deserialize, Serialize};

/// Session-stored operator identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAdmin {
    /// Username the operator signed in with.
    pub username: String,
}

/// Session keys for admin data.
pub mod keys {
    /// Key for storing the current logged-in operator.
    pub const CURRENT_ADMIN: &str = "current_admin";

    /// Key for the product editor state.
    pub const EDITOR: &str = "editor";
}
