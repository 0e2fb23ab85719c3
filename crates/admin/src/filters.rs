//! Custom Askama template filters.

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Label for the publish toggle, given the product's current `published` flag.
///
/// Usage in templates: `{{ row.published|toggle_label }}`
#[allow(clippy::unnecessary_wraps)]
#[askama::filter_fn]
pub fn toggle_label(published: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(if published.to_string() == "true" {
        "Unpublish"
    } else {
        "Publish"
    })
}
