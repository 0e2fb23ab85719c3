//! Product editor and list action handlers.
//!
//! Every action ends in a redirect back to the panel. Actions naming an id
//! that no longer exists are ignored.

use askama::Template;
use askama_web::WebTemplate;
use av_store_core::{
    Category, DraftError, EditorError, EditorState, FormValues, ImageData, ImageError,
    ProductId, ProductRepository, SaveOutcome,
};
use axum::{
    Form,
    body::Bytes,
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::panel::Notice;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdminAuth;
use crate::services::editor;
use crate::state::AppState;

/// A file part from the editor form.
#[derive(Debug)]
struct Upload {
    content_type: Option<String>,
    bytes: Bytes,
}

/// Parsed multipart body of the editor form.
#[derive(Debug, Default)]
struct Submission {
    form: FormValues,
    selection: Option<u64>,
    image: Option<Upload>,
}

/// Read the editor form fields out of a multipart body.
///
/// A file input left empty arrives as a part with no filename and no bytes;
/// it is treated as no selection.
async fn read_submission(mut multipart: Multipart) -> Result<Submission> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_owned();
        match name.as_str() {
            "title" => submission.form.title = field.text().await?,
            "category" => submission.form.category = Category::from_tag(&field.text().await?),
            "price" => submission.form.price = field.text().await?,
            "selection" => submission.selection = field.text().await?.trim().parse().ok(),
            "image" => {
                let has_name = field.file_name().is_some_and(|name| !name.is_empty());
                let content_type = field.content_type().map(str::to_owned);
                let bytes = field.bytes().await?;
                if has_name || !bytes.is_empty() {
                    submission.image = Some(Upload {
                        content_type,
                        bytes,
                    });
                }
            }
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(submission)
}

const fn image_notice(error: &ImageError) -> Notice {
    match error {
        ImageError::Empty => Notice::ImageEmpty,
        ImageError::NotAnImage(_) => Notice::ImageType,
        ImageError::TooLarge { .. } => Notice::ImageSize,
    }
}

/// Apply a submission to the editor: take its form values and stage its image.
///
/// Returns the notice to show if the image was rejected.
fn apply_submission(
    editor: &mut EditorState,
    submission: Submission,
    max_upload_bytes: usize,
) -> Option<Notice> {
    editor.set_form(submission.form);

    let upload = submission.image?;
    let selection = submission
        .selection
        .unwrap_or_else(|| editor.next_selection());

    match ImageData::from_upload(
        upload.content_type.as_deref(),
        &upload.bytes,
        max_upload_bytes,
    ) {
        Ok(image) => {
            editor.stage_image(selection, Some(image));
            None
        }
        Err(e) => {
            tracing::info!(error = %e, "Rejected image upload");
            Some(image_notice(&e))
        }
    }
}

/// Save the editor form.
///
/// POST /products
#[instrument(skip_all)]
pub async fn save(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<Redirect> {
    let submission = read_submission(multipart).await?;
    let mut editor = editor::load(&session).await?;

    if let Some(notice) =
        apply_submission(&mut editor, submission, state.config().max_upload_bytes)
    {
        editor::store(&session, &editor).await?;
        return Ok(Redirect::to(&notice.redirect_path()));
    }

    let notice = match editor.save(state.products(), chrono::Utc::now()).await {
        Ok(outcome) => {
            match &outcome {
                SaveOutcome::Created(id) => tracing::info!(id = %id, "Product created"),
                SaveOutcome::Updated(id) => tracing::info!(id = %id, "Product updated"),
                SaveOutcome::Stale(id) => tracing::debug!(id = %id, "Edit target gone"),
            }
            Notice::Saved
        }
        Err(EditorError::Draft(DraftError::EmptyTitle)) => Notice::TitleRequired,
        Err(EditorError::Draft(DraftError::Price(e))) => {
            tracing::info!(error = %e, "Rejected product price");
            Notice::PriceNotNumber
        }
        Err(EditorError::Repository(e)) => return Err(e.into()),
    };

    editor::store(&session, &editor).await?;
    Ok(Redirect::to(&notice.redirect_path()))
}

/// Stage an image without saving. The typed form values are kept.
///
/// POST /products/image
#[instrument(skip_all)]
pub async fn stage_image(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    multipart: Multipart,
) -> Result<Redirect> {
    let submission = read_submission(multipart).await?;
    let mut editor = editor::load(&session).await?;

    let notice = apply_submission(&mut editor, submission, state.config().max_upload_bytes);
    editor::store(&session, &editor).await?;

    Ok(notice.map_or_else(
        || Redirect::to("/"),
        |notice| Redirect::to(&notice.redirect_path()),
    ))
}

/// Reset the editor to an empty create form.
///
/// POST /products/clear
#[instrument(skip_all)]
pub async fn clear(
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
) -> Result<Redirect> {
    let mut editor = editor::load(&session).await?;
    editor.reset();
    editor::store(&session, &editor).await?;
    Ok(Redirect::to("/"))
}

/// Load a product into the editor.
///
/// POST /products/{id}/edit
#[instrument(skip(_admin, state, session))]
pub async fn edit(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id = ProductId::new(id);
    if let Some(product) = state.products().get(&id).await? {
        let mut editor = editor::load(&session).await?;
        editor.begin_edit(&product);
        editor::store(&session, &editor).await?;
    } else {
        tracing::debug!(id = %id, "Edit requested for unknown product");
    }
    Ok(Redirect::to("/"))
}

/// Flip a product's published flag.
///
/// POST /products/{id}/toggle
#[instrument(skip(_admin, state))]
pub async fn toggle(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect> {
    let id = ProductId::new(id);
    match state.products().toggle_published(&id).await? {
        Some(product) => {
            tracing::info!(id = %id, published = product.published, "Product visibility changed");
        }
        None => tracing::debug!(id = %id, "Toggle requested for unknown product"),
    }
    Ok(Redirect::to("/"))
}

/// Delete confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "delete_confirm.html")]
pub struct DeleteConfirmTemplate {
    /// Product id.
    pub id: String,
    /// Product title.
    pub title: String,
}

/// Submitted delete confirmation.
#[derive(Debug, Deserialize)]
pub struct DeleteForm {
    #[serde(default)]
    confirm: String,
}

/// Ask before deleting.
///
/// GET /products/{id}/delete
#[instrument(skip(_admin, state))]
pub async fn confirm_delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let id = ProductId::new(id);
    let Some(product) = state.products().get(&id).await? else {
        tracing::debug!(id = %id, "Delete requested for unknown product");
        return Ok(Redirect::to("/").into_response());
    };

    Ok(DeleteConfirmTemplate {
        id: product.id.into_inner(),
        title: product.title,
    }
    .into_response())
}

/// Delete a product if the operator confirmed.
///
/// POST /products/{id}/delete
#[instrument(skip(_admin, state, form))]
pub async fn delete(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect> {
    let id = ProductId::new(id);
    if form.confirm != "yes" {
        tracing::debug!(id = %id, "Delete cancelled");
        return Ok(Redirect::to("/"));
    }

    match state.products().delete(&id).await? {
        Some(product) => tracing::info!(id = %id, title = %product.title, "Product deleted"),
        None => tracing::debug!(id = %id, "Delete requested for unknown product"),
    }
    Ok(Redirect::to("/"))
}
