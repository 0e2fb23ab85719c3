//! Admin panel: the product editor above the product list.

use askama::Template;
use askama_web::WebTemplate;
use av_store_core::{Category, EditorState, Product, ProductRepository, image_src};
use axum::extract::{Query, State};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::services::editor;
use crate::state::AppState;

/// Shown instead of the list when the collection is empty.
pub const EMPTY_LIST_MESSAGE: &str = "No products yet.";

/// Outcome codes passed to the panel as `?success=` or `?error=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// The editor form was saved.
    Saved,
    /// The title was blank.
    TitleRequired,
    /// The price was not a number.
    PriceNotNumber,
    /// The upload was empty.
    ImageEmpty,
    /// The upload was not an image.
    ImageType,
    /// The upload exceeded the size limit.
    ImageSize,
}

impl Notice {
    /// Query-string code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::TitleRequired => "title",
            Self::PriceNotNumber => "price",
            Self::ImageEmpty => "image_empty",
            Self::ImageType => "image_type",
            Self::ImageSize => "image_size",
        }
    }

    /// Parse a query-string code. Unknown codes are ignored.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "saved" => Some(Self::Saved),
            "title" => Some(Self::TitleRequired),
            "price" => Some(Self::PriceNotNumber),
            "image_empty" => Some(Self::ImageEmpty),
            "image_type" => Some(Self::ImageType),
            "image_size" => Some(Self::ImageSize),
            _ => None,
        }
    }

    /// Text shown to the operator.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Saved => "Product saved",
            Self::TitleRequired => "Title is required",
            Self::PriceNotNumber => "Price must be a number",
            Self::ImageEmpty => "The selected image is empty",
            Self::ImageType => "Please choose an image file",
            Self::ImageSize => "Image is too large",
        }
    }

    /// Returns `true` for the success notice.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Saved)
    }

    /// Panel URL carrying this notice.
    #[must_use]
    pub fn redirect_path(self) -> String {
        let kind = if self.is_success() { "success" } else { "error" };
        format!("/?{kind}={}", self.code())
    }
}

/// Panel query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct PanelQuery {
    /// Success code.
    pub success: Option<String>,
    /// Error code.
    pub error: Option<String>,
}

/// One `<option>` of the category select.
#[derive(Debug, Clone)]
pub struct CategoryOption {
    /// Stored tag.
    pub value: String,
    /// Display label.
    pub label: &'static str,
    /// Whether the option is selected.
    pub selected: bool,
}

fn category_options(current: &Category) -> Vec<CategoryOption> {
    Category::ALL
        .iter()
        .map(|category| CategoryOption {
            value: category.as_str().to_owned(),
            label: category.label(),
            selected: category == current,
        })
        .collect()
}

/// Product row for the admin list.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: String,
    pub title: String,
    pub category: String,
    pub price_label: String,
    pub image_src: String,
    pub published: bool,
}

impl From<&Product> for ProductRow {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_str().to_owned(),
            title: product.title.clone(),
            category: product.category.as_str().to_owned(),
            price_label: product.price.display(),
            image_src: image_src(product.image.as_ref()).to_owned(),
            published: product.published,
        }
    }
}

/// Admin panel template.
#[derive(Template, WebTemplate)]
#[template(path = "panel.html")]
pub struct PanelTemplate {
    pub admin_username: String,
    pub editing: bool,
    pub title: String,
    pub price: String,
    pub category_options: Vec<CategoryOption>,
    pub staged_image: Option<String>,
    pub next_selection: u64,
    pub rows: Vec<ProductRow>,
    pub empty_message: &'static str,
    pub success_message: Option<&'static str>,
    pub error_message: Option<&'static str>,
}

impl PanelTemplate {
    /// Build the panel for an operator from the editor and the collection.
    #[must_use]
    pub fn new(admin_username: String, editor: &EditorState, products: &[Product]) -> Self {
        let form = editor.form();
        Self {
            admin_username,
            editing: editor.is_editing(),
            title: form.title.clone(),
            price: form.price.clone(),
            category_options: category_options(&form.category),
            staged_image: editor
                .staged_image()
                .filter(|image| image.is_image_uri())
                .map(|image| image.as_str().to_owned()),
            next_selection: editor.next_selection(),
            rows: products.iter().map(ProductRow::from).collect(),
            empty_message: EMPTY_LIST_MESSAGE,
            success_message: None,
            error_message: None,
        }
    }

    /// Attach the notices named in the query string.
    #[must_use]
    pub fn with_notices(mut self, query: &PanelQuery) -> Self {
        self.success_message = query
            .success
            .as_deref()
            .and_then(Notice::from_code)
            .filter(|notice| notice.is_success())
            .map(Notice::message);
        self.error_message = query
            .error
            .as_deref()
            .and_then(Notice::from_code)
            .filter(|notice| !notice.is_success())
            .map(Notice::message);
        self
    }
}

/// Display the editor and the product list.
///
/// GET /
#[instrument(skip(admin, state, session))]
pub async fn show(
    RequireAdminAuth(admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PanelQuery>,
) -> Result<PanelTemplate> {
    let editor = editor::load(&session).await?;
    let products = state.products().list().await?;

    Ok(PanelTemplate::new(admin.username, &editor, &products).with_notices(&query))
}
