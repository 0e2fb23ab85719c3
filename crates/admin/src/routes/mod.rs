//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! # Health checks
//! GET  /health                  - Liveness check
//! GET  /health/ready            - Readiness check (storage reachable)
//!
//! # Authentication
//! GET  /login                   - Login form
//! POST /login                   - Verify credentials
//! POST /logout                  - Clear session
//!
//! # Panel (auth required)
//! GET  /                        - Editor and product list
//! GET  /export                  - Raw stored collection
//!
//! # Products (auth required)
//! POST /products                - Save the editor form (multipart)
//! POST /products/image          - Stage an image (multipart)
//! POST /products/clear          - Reset the editor
//! POST /products/{id}/edit      - Load a product into the editor
//! POST /products/{id}/toggle    - Flip published
//! GET  /products/{id}/delete    - Delete confirmation
//! POST /products/{id}/delete    - Delete if confirmed
//! ```

pub mod auth;
pub mod export;
pub mod health;
pub mod panel;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(auth::router())
        .route("/", get(panel::show))
        .route("/export", get(export::show))
        .route("/products", post(products::save))
        .route("/products/image", post(products::stage_image))
        .route("/products/clear", post(products::clear))
        .route("/products/{id}/edit", post(products::edit))
        .route("/products/{id}/toggle", post(products::toggle))
        .route(
            "/products/{id}/delete",
            get(products::confirm_delete).post(products::delete),
        )
}
