//! Response bodies and the error boundary.
//!
//! `EditorError` turns into `{"error": "<message>"}` here and nowhere else.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Json,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::core::{EditorError, ErrorKind, QuestEditor};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body returned by the save endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
}

impl SaveResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishResponse {
    pub success: bool,
    pub message: String,
    /// Absolute path of the generated page.
    pub file: String,
    /// Quest file the page was built from.
    pub source: String,
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::ClientInput => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        ErrorKind::Content | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for EditorError {
    fn into_response(self) -> Response {
        let status = status_for(self.kind());
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = ?self, "{message}");
        } else {
            tracing::warn!(status = status.as_u16(), "{message}");
        }

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<QueryRejection> for EditorError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<BytesRejection> for EditorError {
    fn from(rejection: BytesRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// Run an editor operation on the blocking pool.
pub async fn blocking<T, F>(editor: Arc<QuestEditor>, op: F) -> Result<T, EditorError>
where
    F: FnOnce(&QuestEditor) -> crate::core::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(move || op(&editor))
        .await
        .map_err(|e| EditorError::Internal(format!("Editor task failed: {e}")))?
}
