//! AV Store Admin library.
//!
//! This crate provides the operator console as a library,
//! allowing it to be tested and reused.
//!
//! # Security
//!
//! This crate can rewrite the product collection. Every route except
//! `/login` and the health checks requires a signed-in session.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use std::path::Path;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use middleware::{create_session_layer, security_headers_middleware};
use state::AppState;

/// Room left in a request body for the text fields around an image.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Build the admin router.
///
/// Static assets are served from `static_dir` under `/static`.
pub fn app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    let body_limit = state
        .config()
        .max_upload_bytes
        .saturating_add(FORM_OVERHEAD_BYTES);
    let session_layer = create_session_layer(state.config());

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::default().on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}
