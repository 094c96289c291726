use super::multipart::{accept, store_videos};
use crate::adapters::local::http::AppState;
use crate::domain::video::UploadedAsset;
use crate::error::EditResult;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: &'static str,
    pub uploaded_files: Vec<UploadedAsset>,
}

pub async fn handle(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> EditResult<Json<UploadResponse>> {
    let assets = store_videos(state.editor.storage(), accept(multipart)?).await?;
    state.editor.register_uploads(&assets).await;

    Ok(Json(UploadResponse {
        message: "Files uploaded successfully",
        uploaded_files: assets,
    }))
}
