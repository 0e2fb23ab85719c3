//! Integration tests for AV Store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p av-store-integration-tests
//! ```
//!
//! The admin and storefront routers run in-process over one shared in-memory
//! store, so the tests need no database and no running servers. Requests are
//! driven with `tower::ServiceExt::oneshot`.
//!
//! # Test Categories
//!
//! - `admin_auth` - Login, logout, and the auth gate
//! - `admin_products` - Editor and list actions
//! - `storefront_catalog` - Public catalog rendering
//! - `end_to_end` - Admin changes seen by the storefront

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::fmt::Write as _;

use av_store_admin::config::AdminConfig;
use av_store_admin::middleware::SESSION_COOKIE_NAME;
use av_store_admin::services::AdminAuthService;
use av_store_core::store::MemoryStore;
use av_store_core::{Product, ProductRepository, ProductStore, Storage};
use av_store_storefront::config::StorefrontConfig;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

/// Default operator password seeded on first start.
pub const DEFAULT_PASSWORD: &str = "admin123";

/// A response with its body read.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub location: Option<String>,
    pub body: String,
}

/// Admin and storefront apps over one in-memory store, plus a cookie jar
/// holding the operator session.
pub struct TestContext {
    pub storage: MemoryStore,
    admin: Router,
    storefront: Router,
    session_cookie: Option<String>,
}

impl TestContext {
    /// Build both apps over fresh storage and seed the default password.
    pub async fn new() -> Self {
        let storage = MemoryStore::new();

        let admin_state =
            av_store_admin::state::AppState::new(AdminConfig::for_tests(), Storage::from(storage.clone()));
        AdminAuthService::new(admin_state.credentials())
            .ensure_default_password()
            .await
            .unwrap();
        let admin = av_store_admin::app(
            admin_state,
            concat!(env!("CARGO_MANIFEST_DIR"), "/../admin/static"),
        );

        let storefront_state = av_store_storefront::state::AppState::new(
            StorefrontConfig::for_tests(),
            Storage::from(storage.clone()),
        );
        let storefront = av_store_storefront::app(
            storefront_state,
            concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static"),
        );

        Self {
            storage,
            admin,
            storefront,
            session_cookie: None,
        }
    }

    /// Repository view of the shared storage.
    #[must_use]
    pub fn products(&self) -> ProductStore<MemoryStore> {
        ProductStore::new(self.storage.clone())
    }

    /// All stored products.
    pub async fn stored_products(&self) -> Vec<Product> {
        self.products().list().await.unwrap()
    }

    /// Send a request to the admin app with the session cookie, and keep any
    /// cookie the response sets.
    pub async fn admin_request(&mut self, request: Request<Body>) -> TestResponse {
        let mut request = request;
        if let Some(cookie) = &self.session_cookie {
            request
                .headers_mut()
                .insert(header::COOKIE, cookie.parse().unwrap());
        }

        let response = self.admin.clone().oneshot(request).await.unwrap();

        for value in response.headers().get_all(header::SET_COOKIE) {
            let value = value.to_str().unwrap();
            let pair = value.split(';').next().unwrap_or_default().trim();
            if let Some(session_id) = pair.strip_prefix(&format!("{SESSION_COOKIE_NAME}=")) {
                self.session_cookie = if session_id.is_empty() || value.contains("Max-Age=0") {
                    None
                } else {
                    Some(pair.to_owned())
                };
            }
        }

        read_response(response).await
    }

    /// GET a path on the admin app.
    pub async fn admin_get(&mut self, path: &str) -> TestResponse {
        self.admin_request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// POST a urlencoded form to the admin app.
    pub async fn admin_post_form(&mut self, path: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = Request::post(path)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(encode_form(fields)))
            .unwrap();
        self.admin_request(request).await
    }

    /// POST a multipart body to the admin app.
    pub async fn admin_post_multipart(&mut self, path: &str, body: MultipartBody) -> TestResponse {
        let (content_type, bytes) = body.finish();
        let request = Request::post(path)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(bytes))
            .unwrap();
        self.admin_request(request).await
    }

    /// Log in with the given credentials.
    pub async fn login_as(&mut self, username: &str, password: &str) -> TestResponse {
        self.admin_post_form("/login", &[("username", username), ("password", password)])
            .await
    }

    /// Log in with the default credentials and assert success.
    pub async fn login(&mut self) {
        let response = self.login_as("admin", DEFAULT_PASSWORD).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert_eq!(response.location.as_deref(), Some("/"));
    }

    /// Whether the context holds a session cookie.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.session_cookie.is_some()
    }

    /// Save the editor form with text fields only.
    pub async fn save_product(&mut self, title: &str, category: &str, price: &str) -> TestResponse {
        let body = MultipartBody::new()
            .text("title", title)
            .text("category", category)
            .text("price", price)
            .empty_file("image");
        self.admin_post_multipart("/products", body).await
    }

    /// GET a path on the storefront app.
    pub async fn storefront_get(&self, path: &str) -> TestResponse {
        let request = Request::get(path).body(Body::empty()).unwrap();
        let response = self.storefront.clone().oneshot(request).await.unwrap();
        read_response(response).await
    }
}

async fn read_response(response: axum::response::Response) -> TestResponse {
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_owned());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        location,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

/// Percent-encode form fields.
#[must_use]
pub fn encode_form(fields: &[(&str, &str)]) -> String {
    fields
        .iter()
        .map(|(name, value)| format!("{}={}", encode_component(name), encode_component(value)))
        .collect::<Vec<_>>()
        .join("&")
}

fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(char::from(byte));
            }
            b' ' => encoded.push('+'),
            _ => {
                let _ = write!(encoded, "%{byte:02X}");
            }
        }
    }
    encoded
}

/// Builder for a `multipart/form-data` request body.
#[derive(Debug, Default)]
pub struct MultipartBody {
    bytes: Vec<u8>,
}

impl MultipartBody {
    const BOUNDARY: &'static str = "av-store-test-boundary";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text field.
    #[must_use]
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n",
                Self::BOUNDARY
            )
            .as_bytes(),
        );
        self
    }

    /// Add a file field.
    #[must_use]
    pub fn file(mut self, name: &str, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.bytes.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: {content_type}\r\n\r\n",
                Self::BOUNDARY
            )
            .as_bytes(),
        );
        self.bytes.extend_from_slice(data);
        self.bytes.extend_from_slice(b"\r\n");
        self
    }

    /// Add a file input with nothing selected, the way browsers send it.
    #[must_use]
    pub fn empty_file(self, name: &str) -> Self {
        self.file(name, "", "application/octet-stream", &[])
    }

    /// Close the body and return its content type and bytes.
    #[must_use]
    pub fn finish(mut self) -> (String, Vec<u8>) {
        self.bytes
            .extend_from_slice(format!("--{}--\r\n", Self::BOUNDARY).as_bytes());
        (
            format!("multipart/form-data; boundary={}", Self::BOUNDARY),
            self.bytes,
        )
    }
}

/// A small valid PNG header, enough to be accepted as an image upload.
pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Count occurrences of `needle` in `haystack`.
#[must_use]
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

/// Extract the HTML of the element opened by `open_tag` up to `close_tag`.
#[must_use]
pub fn section<'a>(html: &'a str, open_tag: &str, close_tag: &str) -> &'a str {
    let Some(start) = html.find(open_tag) else {
        return "";
    };
    let rest = html.get(start..).unwrap_or_default();
    let end = rest.find(close_tag).unwrap_or(rest.len());
    rest.get(..end).unwrap_or_default()
}
