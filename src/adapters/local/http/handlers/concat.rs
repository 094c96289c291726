use super::multipart::{accept, store_videos};
use crate::adapters::local::http::AppState;
use crate::error::EditResult;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ConcatResponse {
    pub message: &'static str,
    pub job_id: String,
    pub video_ids: Vec<String>,
    pub concat_task: &'static str,
}

/// Store the posted files and hand them to the background concat workers.
/// Files stored by a request whose job cannot be queued are removed again.
/// The response only acknowledges the job; poll `/jobs/:id` for the outcome.
pub async fn handle(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> EditResult<Json<ConcatResponse>> {
    let assets = store_videos(state.editor.storage(), accept(multipart)?).await?;
    let job_id = state.editor.submit_concat(&assets).await?;

    Ok(Json(ConcatResponse {
        message: "Concat task started successfully",
        job_id,
        video_ids: assets.into_iter().map(|asset| asset.id).collect(),
        concat_task: "Processing in background",
    }))
}
