//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request tracing)
//! 3. Security headers (CSP, frame and sniffing protection)

pub mod security_headers;

pub use security_headers::security_headers_middleware;
