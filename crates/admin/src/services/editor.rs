//! Editor state kept in the operator session.

use av_store_core::EditorState;
use tower_sessions::Session;

use crate::models::session_keys;

/// Load the session's editor, or a fresh one.
///
/// # Errors
///
/// Returns an error if the session cannot be read.
pub async fn load(session: &Session) -> Result<EditorState, tower_sessions::session::Error> {
    Ok(session
        .get::<EditorState>(session_keys::EDITOR)
        .await?
        .unwrap_or_default())
}

/// Write the editor back into the session.
///
/// # Errors
///
/// Returns an error if the session cannot be written.
pub async fn store(
    session: &Session,
    editor: &EditorState,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::EDITOR, editor).await
}
