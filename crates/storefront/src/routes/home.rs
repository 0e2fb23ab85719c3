//! Catalog page route handler.

use askama::Template;
use askama_web::WebTemplate;
use av_store_core::catalog::{EMPTY_DRINKS_MESSAGE, EMPTY_WEARS_MESSAGE};
use av_store_core::{Catalog, CatalogCard};
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::state::AppState;

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog.html")]
pub struct CatalogTemplate {
    /// Published wears, in collection order.
    pub wears: Vec<CatalogCard>,
    /// Published drinks, in collection order.
    pub drinks: Vec<CatalogCard>,
    /// Placeholder for an empty wears grid.
    pub empty_wears: &'static str,
    /// Placeholder for an empty drinks grid.
    pub empty_drinks: &'static str,
}

impl From<Catalog> for CatalogTemplate {
    fn from(catalog: Catalog) -> Self {
        Self {
            wears: catalog.wears,
            drinks: catalog.drinks,
            empty_wears: EMPTY_WEARS_MESSAGE,
            empty_drinks: EMPTY_DRINKS_MESSAGE,
        }
    }
}

/// Display the catalog.
///
/// The collection is read on every request; there is no cache.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let catalog = Catalog::load(state.products()).await?;
    tracing::debug!(
        wears = catalog.wears.len(),
        drinks = catalog.drinks.len(),
        "Rendering catalog"
    );
    Ok(CatalogTemplate::from(catalog))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_catalog_renders_placeholders() {
        let html = CatalogTemplate::from(Catalog::default()).render().unwrap();
        assert!(html.contains("No wears yet. Check back soon."));
        assert!(html.contains("No drinks yet. Check back soon."));
    }

    #[test]
    fn test_titles_are_escaped() {
        let card = CatalogCard {
            id: "1".into(),
            image_src: "/static/logo.svg".to_string(),
            title: "<b>Cap</b>".to_string(),
            category_label: "Wear",
            price_label: "₦15.00".to_string(),
        };
        let catalog = Catalog {
            wears: vec![card],
            drinks: Vec::new(),
        };
        let html = CatalogTemplate::from(catalog).render().unwrap();
        assert!(html.contains("&#60;b&#62;Cap&#60;/b&#62;") || html.contains("&lt;b&gt;Cap&lt;/b&gt;"));
        assert!(!html.contains("<b>Cap</b>"));
        assert!(html.contains("₦15.00"));
        assert!(html.contains("No drinks yet. Check back soon."));
        assert!(!html.contains("No wears yet. Check back soon."));
    }
}
