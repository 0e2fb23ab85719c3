//! Export view: the stored collection exactly as persisted.

use askama::Template;
use askama_web::WebTemplate;
use av_store_core::ProductRepository;
use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::state::AppState;

/// Export page template. The raw JSON is escaped into a `<pre>` block.
#[derive(Template, WebTemplate)]
#[template(path = "export.html")]
pub struct ExportTemplate {
    pub raw: String,
}

/// Show the raw stored collection.
///
/// GET /export
#[instrument(skip(_admin, state))]
pub async fn show(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<ExportTemplate> {
    let raw = state.products().raw().await?;
    Ok(ExportTemplate { raw })
}
