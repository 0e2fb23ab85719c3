//! Authentication route handlers for admin.
//!
//! A single username/password form. A failed attempt re-renders the form
//! with the typed username kept.

use askama::Template;
use askama_web::WebTemplate;
use av_store_core::EditorState;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use secrecy::SecretString;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAdminAuth, clear_session, set_current_admin};
use crate::services::{AdminAuthError, AdminAuthService, editor};
use crate::state::AppState;

/// Alert shown after a failed login.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    /// Username to prefill.
    pub username: String,
    /// Alert text, if any.
    pub error_message: Option<&'static str>,
}

/// Submitted login form.
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
}

/// Render the login page.
///
/// GET /login
async fn login_page(OptionalAdminAuth(admin): OptionalAdminAuth) -> Response {
    if admin.is_some() {
        return Redirect::to("/").into_response();
    }

    LoginTemplate {
        username: String::new(),
        error_message: None,
    }
    .into_response()
}

/// Verify credentials.
///
/// POST /login
#[instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let password = SecretString::from(form.password);
    let auth = AdminAuthService::new(state.credentials());

    match auth.login(&form.username, &password).await {
        Ok(admin) => {
            set_current_admin(&session, &admin).await?;
            editor::store(&session, &EditorState::new()).await?;
            set_sentry_user(&admin.username);
            tracing::info!(username = %admin.username, "Operator signed in");
            Ok(Redirect::to("/").into_response())
        }
        Err(AdminAuthError::InvalidCredentials) => {
            tracing::info!(username = %form.username.trim(), "Rejected login attempt");
            let template = LoginTemplate {
                username: form.username,
                error_message: Some(INVALID_CREDENTIALS_MESSAGE),
            };
            Ok((StatusCode::UNAUTHORIZED, template).into_response())
        }
        Err(AdminAuthError::Store(e)) => Err(e.into()),
    }
}

/// Logout and clear session.
///
/// POST /logout
async fn logout(session: Session) -> Result<Redirect> {
    clear_session(&session).await?;
    clear_sentry_user();
    Ok(Redirect::to("/login"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_login_template_keeps_username() {
        let html = LoginTemplate {
            username: "operator".to_string(),
            error_message: Some(INVALID_CREDENTIALS_MESSAGE),
        }
        .render()
        .unwrap();

        assert!(html.contains("value=\"operator\""));
        assert!(html.contains("Invalid credentials"));
    }

    #[test]
    fn test_login_template_without_alert() {
        let html = LoginTemplate {
            username: String::new(),
            error_message: None,
        }
        .render()
        .unwrap();

        assert!(!html.contains("Invalid credentials"));
    }
}
