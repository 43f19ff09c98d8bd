//! Static file serving for the editor UI and other project files.
//!
//! Everything outside `/api` is looked up under the project root by a
//! `ServeDir` fallback (see [`super::build_router`]). `ServeDir` refuses
//! `..` segments on its own; directories are never listed, and anything that
//! does not resolve to a file answers with [`not_found`].

use std::io;
use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::core::{EditorError, QuestEditor};

/// `GET /` serves the configured editor page.
pub async fn editor_entry(State(editor): State<Arc<QuestEditor>>) -> Result<Response, EditorError> {
    let path = &editor.paths().editor_entry;
    let html = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(file_not_found()),
        Err(e) => return Err(e.into()),
    };
    Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], html).into_response())
}

/// Fallback for paths `ServeDir` could not resolve to a file.
pub async fn not_found() -> EditorError {
    file_not_found()
}

fn file_not_found() -> EditorError {
    EditorError::not_found("File not found")
}
