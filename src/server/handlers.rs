//! API handlers. Each one delegates to [`QuestEditor`] on the blocking pool.
//!
//! Extractor rejections are taken as `Result` so they go through the same
//! `{"error": ...}` boundary as editor failures.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, QueryRejection},
        Json, Query, State,
    },
};
use serde::Deserialize;
use serde_json::Value;

use super::response::{blocking, PublishResponse, SaveResponse};
use crate::core::{EditorError, QuestEditor};

/// `?file=<name>`; absent means `quests.json`.
#[derive(Debug, Default, Deserialize)]
pub struct FileQuery {
    pub file: Option<String>,
}

type ApiResult<T> = Result<Json<T>, EditorError>;

/// `GET /api/quest-files`
pub async fn list_quest_files(State(editor): State<Arc<QuestEditor>>) -> ApiResult<Vec<String>> {
    let files = blocking(editor, |e| e.list_quest_files()).await?;
    Ok(Json(files))
}

/// `GET /api/quests?file=<name>`
pub async fn get_quests(
    State(editor): State<Arc<QuestEditor>>,
    query: Result<Query<FileQuery>, QueryRejection>,
) -> ApiResult<Value> {
    let Query(query) = query?;
    let quests = blocking(editor, move |e| e.load_quests(query.file.as_deref())).await?;
    Ok(Json(quests))
}

/// `POST /api/quests?file=<name>`
pub async fn save_quests(
    State(editor): State<Arc<QuestEditor>>,
    query: Result<Query<FileQuery>, QueryRejection>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<SaveResponse> {
    let Query(query) = query?;
    let body = body?;
    let name = blocking(editor, move |e| e.save_quests(query.file.as_deref(), &body)).await?;
    Ok(Json(SaveResponse::ok(format!("Quests saved to {name}"))))
}

/// `GET /api/character`
pub async fn get_character(State(editor): State<Arc<QuestEditor>>) -> ApiResult<Value> {
    let character = blocking(editor, |e| e.load_character()).await?;
    Ok(Json(character))
}

/// `POST /api/character`
pub async fn save_character(
    State(editor): State<Arc<QuestEditor>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<SaveResponse> {
    let body = body?;
    blocking(editor, move |e| e.save_character(&body)).await?;
    Ok(Json(SaveResponse::ok("Character data saved")))
}

/// `POST /api/publish?file=<name>`
pub async fn publish(
    State(editor): State<Arc<QuestEditor>>,
    query: Result<Query<FileQuery>, QueryRejection>,
) -> ApiResult<PublishResponse> {
    let Query(query) = query?;
    let report = blocking(editor, move |e| e.publish(query.file.as_deref())).await?;
    Ok(Json(PublishResponse {
        success: true,
        message: format!("Published successfully from {}", report.source),
        file: report.output.display().to_string(),
        source: report.source,
    }))
}
