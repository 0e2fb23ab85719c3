//! Product editor state.
//!
//! One [`EditorState`] exists per operator session. It records whether the
//! form creates a new product or edits an existing one, the values currently
//! in the form, and the staged image.
//!
//! # Image staging
//!
//! Every image selection carries a generation number. A staging result is
//! accepted only when its generation is newer than the last accepted one, so
//! a slow upload for an earlier selection can never overwrite a later one.
//! Beginning an edit also advances the generation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::repository::{ProductRepository, RepositoryError};
use crate::types::{Category, DraftError, ImageData, Product, ProductDraft, ProductId};

/// Errors that can occur when saving the editor.
#[derive(Debug, Error)]
pub enum EditorError {
    /// The form values are invalid. The form is left as typed.
    #[error(transparent)]
    Draft(#[from] DraftError),

    /// The repository failed.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// What the next save does.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EditorMode {
    /// Prepend a new product.
    #[default]
    Create,
    /// Replace the fields of an existing product.
    Editing {
        /// Edit target.
        id: ProductId,
    },
}

/// Raw form values, kept exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormValues {
    /// Title input.
    pub title: String,
    /// Category select.
    pub category: Category,
    /// Price input.
    pub price: String,
}

impl FormValues {
    /// Form values showing an existing product.
    #[must_use]
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            category: product.category.clone(),
            price: product.price.to_fixed(),
        }
    }

    /// Validate into a draft.
    ///
    /// # Errors
    ///
    /// See [`ProductDraft::parse`].
    pub fn to_draft(&self) -> Result<ProductDraft, DraftError> {
        ProductDraft::parse(&self.title, self.category.clone(), &self.price)
    }
}

/// Result of a successful [`EditorState::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new product was prepended.
    Created(ProductId),
    /// The edit target was updated in place.
    Updated(ProductId),
    /// The edit target no longer exists; nothing changed.
    Stale(ProductId),
}

impl SaveOutcome {
    /// Id the save targeted.
    #[must_use]
    pub const fn id(&self) -> &ProductId {
        match self {
            Self::Created(id) | Self::Updated(id) | Self::Stale(id) => id,
        }
    }
}

/// Per-session editor.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditorState {
    mode: EditorMode,
    form: FormValues,
    staged_image: Option<ImageData>,
    selection: u64,
}

impl EditorState {
    /// A fresh editor in create mode.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> &EditorMode {
        &self.mode
    }

    /// Current form values.
    #[must_use]
    pub const fn form(&self) -> &FormValues {
        &self.form
    }

    /// The image the next save will use.
    #[must_use]
    pub const fn staged_image(&self) -> Option<&ImageData> {
        self.staged_image.as_ref()
    }

    /// Generation of the last accepted image selection.
    #[must_use]
    pub const fn selection(&self) -> u64 {
        self.selection
    }

    /// Generation to hand out for the next image selection.
    #[must_use]
    pub const fn next_selection(&self) -> u64 {
        self.selection.saturating_add(1)
    }

    /// Returns `true` while editing an existing product.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        matches!(self.mode, EditorMode::Editing { .. })
    }

    /// Replace the form values.
    pub fn set_form(&mut self, form: FormValues) {
        self.form = form;
    }

    /// Stage `image` for selection `selection`.
    ///
    /// Returns `false` and leaves the staged image untouched when a newer
    /// selection has already been accepted.
    pub fn stage_image(&mut self, selection: u64, image: Option<ImageData>) -> bool {
        if selection <= self.selection {
            tracing::debug!(
                selection,
                latest = self.selection,
                "Discarding stale image selection"
            );
            return false;
        }
        self.selection = selection;
        self.staged_image = image;
        true
    }

    /// Load `product` into the form and make it the edit target.
    pub fn begin_edit(&mut self, product: &Product) {
        self.mode = EditorMode::Editing {
            id: product.id.clone(),
        };
        self.form = FormValues::from_product(product);
        self.staged_image = product.image.clone();
        self.selection = self.next_selection();
    }

    /// Return to create mode with an empty form. The selection generation
    /// keeps counting.
    pub fn reset(&mut self) {
        self.mode = EditorMode::Create;
        self.form = FormValues::default();
        self.staged_image = None;
    }

    /// Save the form through `repo`.
    ///
    /// In create mode a new published product is prepended with an id derived
    /// from `now`. In edit mode the target is rebuilt from the form under its
    /// old id, published again and stamped with `now`; a target that no
    /// longer exists is left alone. On success the editor resets.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Draft`] when the form is invalid, leaving the
    /// editor unchanged, and [`EditorError::Repository`] when storage fails.
    pub async fn save<R: ProductRepository>(
        &mut self,
        repo: &R,
        now: DateTime<Utc>,
    ) -> Result<SaveOutcome, EditorError> {
        let draft = self.form.to_draft()?;
        let image = self.staged_image.clone();

        let outcome = match &self.mode {
            EditorMode::Create => {
                let product = repo.insert_new(draft, image, now).await?;
                SaveOutcome::Created(product.id)
            }
            EditorMode::Editing { id } => {
                if repo
                    .update(id, move |product| product.revise(draft, image, now))
                    .await?
                    .is_some()
                {
                    SaveOutcome::Updated(id.clone())
                } else {
                    tracing::debug!(id = %id, "Edit target no longer exists");
                    SaveOutcome::Stale(id.clone())
                }
            }
        };

        self.reset();
        Ok(outcome)
    }
}
