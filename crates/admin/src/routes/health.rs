//! Health check endpoints.

use av_store_core::ProductRepository;
use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// Liveness health check endpoint.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Reads both the product collection and the password digest. Returns 503
/// Service Unavailable if either read fails.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    if let Err(e) = state.products().raw().await {
        tracing::warn!(error = %e, "Readiness check failed: products");
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    if let Err(e) = state.credentials().stored_hash().await {
        tracing::warn!(error = %e, "Readiness check failed: credentials");
        return StatusCode::SERVICE_UNAVAILABLE;
    }
    StatusCode::OK
}
