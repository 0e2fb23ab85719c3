//! Health check endpoints.

use av_store_core::ProductRepository;
use axum::extract::State;
use axum::http::StatusCode;

use crate::state::AppState;

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies the product store can be read before returning OK.
/// Returns 503 Service Unavailable if it cannot.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.products().raw().await {
        Ok(_) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
